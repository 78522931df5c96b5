use tonic::{Request, Status};

/// Interceptor that injects an `authorization` header into every request
///
/// Credentials are attached once when the connection is opened; because the
/// interceptor is part of the client value, they are re-applied transparently
/// when the channel is rebuilt on reconnect.
///
/// # Example
/// ```ignore
/// use grpc_client::interceptors::AuthInterceptor;
/// use protos::vector::v1::vector_service_client::VectorServiceClient;
///
/// let auth = AuthInterceptor::token("root:mypassword");
/// let client = VectorServiceClient::with_interceptor(channel, auth);
/// ```
#[derive(Clone, Debug)]
pub struct AuthInterceptor {
    header_value: Option<String>,
}

impl AuthInterceptor {
    /// Interceptor that attaches nothing; for unauthenticated deployments
    pub fn none() -> Self {
        Self { header_value: None }
    }

    /// Create an interceptor with an API token
    pub fn token(token: impl Into<String>) -> Self {
        Self {
            header_value: Some(token.into()),
        }
    }

    /// Create an interceptor with a Bearer token (OAuth 2.0 / JWT)
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            header_value: Some(format!("Bearer {}", token.into())),
        }
    }

    /// Create an interceptor with a preformatted authorization header value
    pub fn custom(value: impl Into<String>) -> Self {
        Self {
            header_value: Some(value.into()),
        }
    }
}

impl tonic::service::Interceptor for AuthInterceptor {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        if let Some(value) = &self.header_value {
            request.metadata_mut().insert(
                "authorization",
                value
                    .parse()
                    .map_err(|_| Status::internal("Invalid auth header"))?,
            );
        }
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonic::service::Interceptor;

    #[test]
    fn test_token() {
        let mut auth = AuthInterceptor::token("root:secret");
        let req = auth.call(Request::new(())).unwrap();
        let header = req.metadata().get("authorization").unwrap();
        assert_eq!(header, "root:secret");
    }

    #[test]
    fn test_bearer_token() {
        let mut auth = AuthInterceptor::bearer("test-token");
        let req = auth.call(Request::new(())).unwrap();
        let header = req.metadata().get("authorization").unwrap();
        assert_eq!(header, "Bearer test-token");
    }

    #[test]
    fn test_none_leaves_metadata_untouched() {
        let mut auth = AuthInterceptor::none();
        let req = auth.call(Request::new(())).unwrap();
        assert!(req.metadata().get("authorization").is_none());
    }

    #[test]
    fn test_invalid_header_value_rejected() {
        let mut auth = AuthInterceptor::custom("bad\nvalue");
        assert!(auth.call(Request::new(())).is_err());
    }
}
