//! # gRPC Client Library
//!
//! Channel creation with HTTP/2 tuning, TLS and auth-header injection,
//! shared by the vector SDK.
//!
//! ## Quick Start
//!
//! ```ignore
//! use grpc_client::{create_channel, ChannelConfig};
//! use protos::vector::v1::vector_service_client::VectorServiceClient;
//!
//! let channel = create_channel("http://127.0.0.1:19530", ChannelConfig::default()).await?;
//! let client = VectorServiceClient::new(channel);
//! ```
//!
//! ## With Auth
//!
//! ```ignore
//! use grpc_client::{create_channel, interceptors::AuthInterceptor, ChannelConfig};
//! use protos::vector::v1::vector_service_client::VectorServiceClient;
//!
//! let channel = create_channel("https://db.example.com:19530", config).await?;
//! let auth = AuthInterceptor::token("root:secret");
//! let client = VectorServiceClient::with_interceptor(channel, auth);
//! ```

pub mod channel;
pub mod error;
pub mod interceptors;

pub use channel::{create_channel, create_channel_lazy, ChannelConfig};
pub use error::{GrpcError, GrpcResult};
pub use interceptors::AuthInterceptor;
