use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Which deadline a timed-out call exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutScope {
    /// A single attempt ran past its per-attempt deadline.
    Attempt,
    /// The whole retry sequence ran past the total deadline.
    Overall,
}

impl std::fmt::Display for TimeoutScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeoutScope::Attempt => write!(f, "attempt"),
            TimeoutScope::Overall => write!(f, "overall"),
        }
    }
}

/// Errors surfaced by every public SDK operation.
///
/// Validation and schema errors are raised before any network attempt;
/// transient errors are retried per [`crate::RetryPolicy`] and surfaced only
/// after exhaustion; terminal errors are surfaced immediately and never
/// retried.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed request, detected locally. Never reaches the network.
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Channel could not be established or re-established.
    #[error("connection error: {reason}")]
    Connect { reason: String },

    /// Retryable status from the service or transport; the last observed
    /// status after retry exhaustion.
    #[error("{op}: retryable error (rpc code {rpc_code:?}, server code {server_code}): {message}")]
    Transient {
        op: &'static str,
        rpc_code: tonic::Code,
        server_code: i32,
        message: String,
    },

    /// Non-retryable status from the service or transport.
    #[error("{op}: {message} (rpc code {rpc_code:?}, server code {server_code})")]
    Terminal {
        op: &'static str,
        rpc_code: tonic::Code,
        server_code: i32,
        message: String,
    },

    /// A per-attempt or whole-sequence deadline was exceeded.
    #[error("{op}: {scope} timeout exceeded")]
    Timeout { op: &'static str, scope: TimeoutScope },

    /// The caller cancelled the call before it completed.
    #[error("call cancelled")]
    Cancelled,

    /// Payload does not match the declared or fetched schema.
    #[error("schema mismatch on field '{field}': {reason}")]
    SchemaMismatch { field: String, reason: String },

    /// Malformed or unexpected wire response. Any partially decoded data is
    /// discarded.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl Error {
    pub(crate) fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn mismatch(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::SchemaMismatch {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn decode(reason: impl Into<String>) -> Self {
        Error::Decode(reason.into())
    }
}

impl From<grpc_client::GrpcError> for Error {
    fn from(err: grpc_client::GrpcError) -> Self {
        Error::Connect {
            reason: err.to_string(),
        }
    }
}
