//! Unary call executor: classifies failures, retries transient ones with
//! exponential backoff and jitter, and enforces per-attempt and overall
//! deadlines. Cancellation is cooperative via [`cancellable`].

use std::future::Future;
use std::time::Duration;

use futures::future::{AbortHandle, Abortable};
use protos::vector::v1::StatusCode;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::error::{Error, Result, TimeoutScope};

/// A failed attempt, before classification: the channel could not be
/// acquired, the transport refused the call, or the server answered with a
/// non-OK application status.
#[derive(Debug)]
pub(crate) enum CallFailure {
    Connect(Error),
    Rpc(tonic::Status),
    Service { code: i32, reason: String },
}

/// Retry and deadline policy applied to every unary call.
///
/// Which rpc codes count as transient is configuration, not a hardcoded
/// taxonomy; the default set covers transport-level flakiness.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub per_attempt_timeout: Option<Duration>,
    pub total_timeout: Option<Duration>,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    pub backoff_multiplier: f64,
    pub use_jitter: bool,
    pub retryable_codes: Vec<tonic::Code>,
    /// Whether a server-side rate-limit status is retried or surfaced.
    pub retry_on_rate_limit: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            per_attempt_timeout: None,
            total_timeout: None,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(5),
            backoff_multiplier: 2.0,
            use_jitter: true,
            retryable_codes: vec![
                tonic::Code::Unavailable,
                tonic::Code::ResourceExhausted,
                tonic::Code::Aborted,
                tonic::Code::Unknown,
            ],
            retry_on_rate_limit: true,
        }
    }
}

impl RetryPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single attempt, no backoff.
    pub fn no_retries() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_per_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.per_attempt_timeout = Some(timeout);
        self
    }

    pub fn with_total_timeout(mut self, timeout: Duration) -> Self {
        self.total_timeout = Some(timeout);
        self
    }

    pub fn with_initial_backoff(mut self, backoff: Duration) -> Self {
        self.initial_backoff = backoff;
        self
    }

    pub fn with_max_backoff(mut self, backoff: Duration) -> Self {
        self.max_backoff = backoff;
        self
    }

    pub fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    pub fn with_jitter(mut self, use_jitter: bool) -> Self {
        self.use_jitter = use_jitter;
        self
    }

    pub fn with_retryable_codes(mut self, codes: Vec<tonic::Code>) -> Self {
        self.retryable_codes = codes;
        self
    }

    pub fn with_retry_on_rate_limit(mut self, retry: bool) -> Self {
        self.retry_on_rate_limit = retry;
        self
    }

    /// Map a failed attempt to its error and whether it may be retried.
    fn classify(&self, op: &'static str, failure: CallFailure) -> (Error, bool) {
        match failure {
            CallFailure::Connect(error) => (error, false),
            CallFailure::Rpc(status) => match status.code() {
                tonic::Code::DeadlineExceeded => (
                    Error::Timeout {
                        op,
                        scope: TimeoutScope::Attempt,
                    },
                    false,
                ),
                tonic::Code::Cancelled => (Error::Cancelled, false),
                code => {
                    let retryable = self.retryable_codes.contains(&code);
                    let error = if retryable {
                        Error::Transient {
                            op,
                            rpc_code: code,
                            server_code: 0,
                            message: status.message().to_string(),
                        }
                    } else {
                        Error::Terminal {
                            op,
                            rpc_code: code,
                            server_code: 0,
                            message: status.message().to_string(),
                        }
                    };
                    (error, retryable)
                }
            },
            CallFailure::Service { code, reason } => {
                if code == StatusCode::RateLimited as i32 && self.retry_on_rate_limit {
                    (
                        Error::Transient {
                            op,
                            rpc_code: tonic::Code::Ok,
                            server_code: code,
                            message: reason,
                        },
                        true,
                    )
                } else {
                    (
                        Error::Terminal {
                            op,
                            rpc_code: tonic::Code::Ok,
                            server_code: code,
                            message: reason,
                        },
                        false,
                    )
                }
            }
        }
    }
}

/// Run one unary operation under `policy`, retrying transient failures.
///
/// When attempts are exhausted the error of the last attempt is returned
/// unchanged; an exceeded overall deadline surfaces as an overall timeout.
pub(crate) async fn execute<F, Fut, T>(
    op: &'static str,
    policy: &RetryPolicy,
    mut call: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<T, CallFailure>>,
{
    let deadline = policy.total_timeout.map(|t| Instant::now() + t);
    let mut delay = policy.initial_backoff;

    for attempt in 1..=policy.max_attempts {
        let outcome = match policy.per_attempt_timeout {
            Some(timeout) => match tokio::time::timeout(timeout, call()).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    return Err(Error::Timeout {
                        op,
                        scope: TimeoutScope::Attempt,
                    });
                }
            },
            None => call().await,
        };

        let failure = match outcome {
            Ok(value) => {
                if attempt > 1 {
                    debug!(target: "vector_sdk", op, attempt, "call succeeded after retry");
                }
                return Ok(value);
            }
            Err(failure) => failure,
        };

        let (error, retryable) = policy.classify(op, failure);
        if !retryable || attempt == policy.max_attempts {
            if retryable {
                warn!(target: "vector_sdk", op, attempt, error = %error, "retries exhausted");
            }
            return Err(error);
        }

        let sleep_for = if policy.use_jitter {
            apply_jitter(delay)
        } else {
            delay
        };
        if let Some(deadline) = deadline {
            if Instant::now() + sleep_for >= deadline {
                return Err(Error::Timeout {
                    op,
                    scope: TimeoutScope::Overall,
                });
            }
        }
        warn!(
            target: "vector_sdk",
            op,
            attempt,
            delay_ms = sleep_for.as_millis() as u64,
            error = %error,
            "transient failure, retrying"
        );
        tokio::time::sleep(sleep_for).await;

        delay = Duration::from_millis(
            ((delay.as_millis() as f64) * policy.backoff_multiplier) as u64,
        )
        .min(policy.max_backoff);
    }

    // max_attempts is clamped to at least 1, so the loop always returns.
    Err(Error::Timeout {
        op,
        scope: TimeoutScope::Overall,
    })
}

/// Random jitter between 50% and 100% of the delay, to spread out
/// simultaneous retries without pulling in an RNG crate.
fn apply_jitter(delay: Duration) -> Duration {
    use std::collections::hash_map::RandomState;
    use std::hash::{BuildHasher, Hasher};
    use std::time::SystemTime;

    let mut hasher = RandomState::new().build_hasher();
    if let Ok(elapsed) = SystemTime::now().duration_since(SystemTime::UNIX_EPOCH) {
        hasher.write_u128(elapsed.as_nanos());
    }
    let factor = 0.5 + (hasher.finish() % 1000) as f64 / 2000.0;
    Duration::from_millis((delay.as_millis() as f64 * factor) as u64)
}

/// Handle for aborting an in-flight call from another task.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    inner: AbortHandle,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.inner.abort();
    }
}

/// Wrap a call future so it can be aborted; an aborted call resolves to
/// [`Error::Cancelled`] promptly instead of waiting out its deadline.
pub fn cancellable<T>(
    fut: impl Future<Output = Result<T>>,
) -> (CancelHandle, impl Future<Output = Result<T>>) {
    let (handle, registration) = AbortHandle::new_pair();
    let wrapped = Abortable::new(fut, registration);
    let guarded = async move {
        match wrapped.await {
            Ok(result) => result,
            Err(_aborted) => Err(Error::Cancelled),
        }
    };
    (CancelHandle { inner: handle }, guarded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn unavailable() -> CallFailure {
        CallFailure::Rpc(tonic::Status::unavailable("connection reset"))
    }

    fn fast_policy() -> RetryPolicy {
        RetryPolicy::new()
            .with_initial_backoff(Duration::from_millis(1))
            .with_max_backoff(Duration::from_millis(2))
            .with_jitter(false)
    }

    #[tokio::test]
    async fn test_succeeds_after_transient_failures() {
        let attempts = Arc::new(AtomicU32::new(0));
        let counter = attempts.clone();

        let result = execute("search", &fast_policy().with_max_attempts(3), move || {
            let counter = counter.clone();
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(unavailable())
                } else {
                    Ok(42u32)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_exhaustion_returns_last_error() {
        let attempts = Arc::new(AtomicU32::new(0));
        let counter = attempts.clone();

        let result: Result<u32> =
            execute("search", &fast_policy().with_max_attempts(3), move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err(unavailable())
                }
            })
            .await;

        assert_eq!(attempts.load(Ordering::SeqCst), 3);
        assert!(matches!(
            result,
            Err(Error::Transient { rpc_code: tonic::Code::Unavailable, .. })
        ));
    }

    #[tokio::test]
    async fn test_terminal_failure_never_retried() {
        let attempts = Arc::new(AtomicU32::new(0));
        let counter = attempts.clone();

        let result: Result<u32> =
            execute("insert", &fast_policy().with_max_attempts(5), move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err(CallFailure::Rpc(tonic::Status::invalid_argument(
                        "bad expr",
                    )))
                }
            })
            .await;

        assert_eq!(attempts.load(Ordering::SeqCst), 1);
        assert!(matches!(
            result,
            Err(Error::Terminal { rpc_code: tonic::Code::InvalidArgument, .. })
        ));
    }

    #[tokio::test]
    async fn test_rate_limit_retry_is_gated() {
        let rate_limited = || CallFailure::Service {
            code: StatusCode::RateLimited as i32,
            reason: "too many requests".into(),
        };

        let attempts = Arc::new(AtomicU32::new(0));
        let counter = attempts.clone();
        let _: Result<u32> = execute("insert", &fast_policy().with_max_attempts(3), move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(rate_limited())
            }
        })
        .await;
        assert_eq!(attempts.load(Ordering::SeqCst), 3);

        let attempts = Arc::new(AtomicU32::new(0));
        let counter = attempts.clone();
        let policy = fast_policy()
            .with_max_attempts(3)
            .with_retry_on_rate_limit(false);
        let result: Result<u32> = execute("insert", &policy, move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(rate_limited())
            }
        })
        .await;
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(Error::Terminal { .. })));
    }

    #[tokio::test]
    async fn test_deadline_exceeded_is_attempt_timeout() {
        let result: Result<u32> = execute("query", &fast_policy(), || async {
            Err(CallFailure::Rpc(tonic::Status::deadline_exceeded("late")))
        })
        .await;
        assert!(matches!(
            result,
            Err(Error::Timeout { scope: TimeoutScope::Attempt, .. })
        ));
    }

    #[tokio::test]
    async fn test_overall_deadline_cuts_retries_short() {
        let attempts = Arc::new(AtomicU32::new(0));
        let counter = attempts.clone();
        let policy = RetryPolicy::new()
            .with_max_attempts(10)
            .with_initial_backoff(Duration::from_millis(50))
            .with_jitter(false)
            .with_total_timeout(Duration::from_millis(20));

        let result: Result<u32> = execute("flush", &policy, move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(unavailable())
            }
        })
        .await;

        assert_eq!(attempts.load(Ordering::SeqCst), 1);
        assert!(matches!(
            result,
            Err(Error::Timeout { scope: TimeoutScope::Overall, .. })
        ));
    }

    #[tokio::test]
    async fn test_per_attempt_timeout() {
        let policy = fast_policy()
            .with_max_attempts(1)
            .with_per_attempt_timeout(Duration::from_millis(5));
        let result: Result<u32> = execute("search", &policy, || async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok(1)
        })
        .await;
        assert!(matches!(
            result,
            Err(Error::Timeout { scope: TimeoutScope::Attempt, .. })
        ));
    }

    #[tokio::test]
    async fn test_cancellation_resolves_promptly() {
        let (handle, fut) = cancellable(async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(1u32)
        });
        let task = tokio::spawn(fut);
        tokio::time::sleep(Duration::from_millis(10)).await;
        handle.cancel();
        let result = tokio::time::timeout(Duration::from_millis(100), task)
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(result, Err(Error::Cancelled)));
    }
}
