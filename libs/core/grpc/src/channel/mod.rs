pub mod config;

pub use config::ChannelConfig;

use crate::error::{GrpcError, GrpcResult};
use tonic::transport::{Channel, Endpoint};

/// Creates a gRPC channel and connects immediately
///
/// One channel is meant to be shared by a whole logical connection; tonic
/// multiplexes concurrent calls over it, so there is no per-call handshake
/// cost.
///
/// ## Example
/// ```ignore
/// use grpc_client::{create_channel, ChannelConfig};
/// use protos::vector::v1::vector_service_client::VectorServiceClient;
///
/// let channel = create_channel("http://127.0.0.1:19530", ChannelConfig::default()).await?;
/// let client = VectorServiceClient::new(channel);
/// ```
pub async fn create_channel(addr: impl Into<String>, config: ChannelConfig) -> GrpcResult<Channel> {
    let addr_string = addr.into();

    let endpoint = Endpoint::from_shared(addr_string.clone()).map_err(|e| {
        tracing::error!(target: "grpc_client", addr = %addr_string, error = ?e, "Invalid URI");
        GrpcError::InvalidUri(e)
    })?;

    let endpoint = config.apply_to_endpoint(endpoint)?;

    tracing::debug!(
        target: "grpc_client",
        addr = %addr_string,
        "Creating gRPC channel"
    );

    endpoint.connect().await.map_err(|e| {
        tracing::error!(
            target: "grpc_client",
            addr = %addr_string,
            error = ?e,
            "Failed to connect to gRPC service"
        );
        GrpcError::ConnectionFailed(e)
    })
}

/// Creates a lazy gRPC channel that connects on first request
///
/// Returns immediately without establishing a connection; the connection is
/// made when the first RPC is invoked. Useful when the service may not be
/// reachable yet at client construction time.
pub fn create_channel_lazy(addr: impl Into<String>, config: ChannelConfig) -> GrpcResult<Channel> {
    let addr_string = addr.into();

    let endpoint = Endpoint::from_shared(addr_string.clone()).map_err(|e| {
        tracing::error!(target: "grpc_client", addr = %addr_string, error = ?e, "Invalid URI");
        GrpcError::InvalidUri(e)
    })?;

    let endpoint = config.apply_to_endpoint(endpoint)?;

    tracing::debug!(
        target: "grpc_client",
        addr = %addr_string,
        "Creating lazy gRPC channel (connects on first request)"
    );

    Ok(endpoint.connect_lazy())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_uri() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let result = runtime.block_on(create_channel("not a valid uri", ChannelConfig::default()));
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), GrpcError::InvalidUri(_)));
    }

    #[test]
    fn test_connection_failed() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        // Port that is definitely not listening
        let result = runtime.block_on(create_channel("http://[::1]:1", ChannelConfig::default()));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_lazy_channel_does_not_connect() {
        // No listener required; the channel is only materialized on first use.
        let result = create_channel_lazy("http://[::1]:1", ChannelConfig::default());
        assert!(result.is_ok());
    }
}
