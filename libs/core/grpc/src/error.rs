use thiserror::Error;

pub type GrpcResult<T> = Result<T, GrpcError>;

/// Errors that can occur while creating or configuring a gRPC channel
#[derive(Error, Debug)]
pub enum GrpcError {
    /// Invalid URI provided for connection
    #[error("Invalid URI: {0}")]
    InvalidUri(tonic::transport::Error),

    /// Invalid TLS configuration
    #[error("Invalid TLS configuration: {0}")]
    InvalidTls(tonic::transport::Error),

    /// Failed to establish connection
    #[error("Connection failed: {0}")]
    ConnectionFailed(tonic::transport::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
