//! Connection lifecycle: dial, health probe, idle recovery and close.
//!
//! One logical connection wraps one HTTP/2 channel. Calls multiplex over it
//! concurrently; the connection only re-dials after observing the channel
//! broken, never speculatively.

use std::sync::{Arc, Mutex as StdMutex};
use std::time::{Duration, Instant};

use grpc_client::{create_channel, AuthInterceptor, ChannelConfig};
use protos::vector::v1 as pb;
use protos::vector::v1::vector_service_client::VectorServiceClient;
use tokio::sync::Mutex;
use tonic::service::interceptor::InterceptedService;
use tonic::transport::{Channel, ClientTlsConfig};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

const MAX_MESSAGE_SIZE: usize = 64 * 1024 * 1024;

pub(crate) type SvcClient = VectorServiceClient<InterceptedService<Channel, AuthInterceptor>>;

/// How to reach and authenticate against a server.
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    pub uri: String,
    pub token: Option<String>,
    pub tls: Option<ClientTlsConfig>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Idle gap after which the next call probes channel health first.
    pub idle_probe_threshold: Duration,
}

impl ConnectOptions {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            token: None,
            tls: None,
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(30),
            idle_probe_threshold: Duration::from_secs(60),
        }
    }

    /// Static API token sent as the `authorization` header on every call.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// User/password credentials, sent as a `user:password` token.
    pub fn with_credentials(
        mut self,
        user: impl AsRef<str>,
        password: impl AsRef<str>,
    ) -> Self {
        self.token = Some(format!("{}:{}", user.as_ref(), password.as_ref()));
        self
    }

    pub fn with_tls(mut self, tls: ClientTlsConfig) -> Self {
        self.tls = Some(tls);
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_idle_probe_threshold(mut self, threshold: Duration) -> Self {
        self.idle_probe_threshold = threshold;
        self
    }

    fn channel_config(&self) -> ChannelConfig {
        let mut config = ChannelConfig::new()
            .with_connect_timeout(self.connect_timeout)
            .with_request_timeout(self.request_timeout);
        if let Some(tls) = &self.tls {
            config = config.with_tls(tls.clone());
        }
        config
    }
}

enum State {
    Ready(SvcClient),
    Broken,
    Closed,
}

struct Inner {
    options: ConnectOptions,
    state: Mutex<State>,
    last_used: StdMutex<Instant>,
}

/// Shared handle to one server connection. Cloning is cheap; all clones
/// multiplex over the same channel.
#[derive(Clone)]
pub struct Connection {
    inner: Arc<Inner>,
}

impl Connection {
    /// Dial the server and verify it answers a health probe before handing
    /// the connection out.
    pub async fn open(options: ConnectOptions) -> Result<Self> {
        let mut client = dial(&options).await?;
        probe(&mut client).await?;
        info!(target: "vector_sdk", uri = %options.uri, "connection established");
        Ok(Self {
            inner: Arc::new(Inner {
                options,
                state: Mutex::new(State::Ready(client)),
                last_used: StdMutex::new(Instant::now()),
            }),
        })
    }

    /// A client handle for issuing one call.
    ///
    /// After sitting idle past the probe threshold the channel is probed
    /// first; a failed probe marks it broken and triggers exactly one
    /// re-dial attempt before the call is allowed through.
    ///
    /// The state lock is only taken to read or swap the state, never across
    /// the probe or the re-dial, so a slow probe does not stall concurrent
    /// calls.
    pub(crate) async fn client(&self) -> Result<SvcClient> {
        let ready = {
            let state = self.inner.state.lock().await;
            match &*state {
                State::Ready(client) => Some(client.clone()),
                State::Broken => None,
                State::Closed => {
                    return Err(Error::Connect {
                        reason: "connection is closed".into(),
                    })
                }
            }
        };

        if let Some(mut client) = ready {
            if self.idle_elapsed() < self.inner.options.idle_probe_threshold {
                self.touch();
                return Ok(client);
            }
            debug!(target: "vector_sdk", uri = %self.inner.options.uri, "probing idle channel");
            if probe(&mut client).await.is_ok() {
                self.touch();
                return Ok(client);
            }
            warn!(target: "vector_sdk", uri = %self.inner.options.uri, "idle channel broken");
            self.mark_broken().await;
        }

        self.reconnect().await
    }

    async fn reconnect(&self) -> Result<SvcClient> {
        let mut client = dial(&self.inner.options).await?;
        probe(&mut client).await?;
        let mut state = self.inner.state.lock().await;
        // close() may have run while we were dialing; a closed connection
        // stays closed.
        if matches!(*state, State::Closed) {
            return Err(Error::Connect {
                reason: "connection is closed".into(),
            });
        }
        info!(target: "vector_sdk", uri = %self.inner.options.uri, "reconnected");
        *state = State::Ready(client.clone());
        drop(state);
        self.touch();
        Ok(client)
    }

    /// Mark the channel broken so the next call re-dials.
    pub(crate) async fn mark_broken(&self) {
        let mut state = self.inner.state.lock().await;
        if !matches!(*state, State::Closed) {
            *state = State::Broken;
        }
    }

    /// Release the channel. Idempotent; later calls fail with a connect
    /// error instead of re-dialing.
    pub async fn close(&self) {
        let mut state = self.inner.state.lock().await;
        if !matches!(*state, State::Closed) {
            info!(target: "vector_sdk", uri = %self.inner.options.uri, "connection closed");
            *state = State::Closed;
        }
    }

    pub fn uri(&self) -> &str {
        &self.inner.options.uri
    }

    fn idle_elapsed(&self) -> Duration {
        match self.inner.last_used.lock() {
            Ok(last) => last.elapsed(),
            Err(_) => Duration::ZERO,
        }
    }

    fn touch(&self) {
        if let Ok(mut last) = self.inner.last_used.lock() {
            *last = Instant::now();
        }
    }
}

async fn dial(options: &ConnectOptions) -> Result<SvcClient> {
    let channel = create_channel(options.uri.clone(), options.channel_config()).await?;
    let interceptor = match &options.token {
        Some(token) => AuthInterceptor::token(token.clone()),
        None => AuthInterceptor::none(),
    };
    Ok(VectorServiceClient::with_interceptor(channel, interceptor)
        .max_decoding_message_size(MAX_MESSAGE_SIZE)
        .max_encoding_message_size(MAX_MESSAGE_SIZE))
}

async fn probe(client: &mut SvcClient) -> Result<()> {
    let response = client
        .health_check(pb::HealthCheckRequest {})
        .await
        .map_err(|status| Error::Connect {
            reason: format!("health probe failed: {status}"),
        })?;
    if response.get_ref().is_healthy {
        Ok(())
    } else {
        Err(Error::Connect {
            reason: "server reports unhealthy".into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_options_defaults() {
        let options = ConnectOptions::new("http://localhost:19530");
        assert!(options.token.is_none());
        assert!(options.tls.is_none());
        assert_eq!(options.connect_timeout, Duration::from_secs(5));
        assert_eq!(options.idle_probe_threshold, Duration::from_secs(60));
    }

    #[test]
    fn test_credentials_form_a_token() {
        let options = ConnectOptions::new("http://localhost:19530")
            .with_credentials("root", "secret");
        assert_eq!(options.token.as_deref(), Some("root:secret"));
    }

    #[tokio::test]
    async fn test_open_fails_when_nothing_listens() {
        let options = ConnectOptions::new("http://127.0.0.1:1")
            .with_connect_timeout(Duration::from_millis(200));
        let result = Connection::open(options).await;
        assert!(matches!(result, Err(Error::Connect { .. })));
    }
}
