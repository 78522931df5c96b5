//! Vector database test infrastructure
//!
//! Provides a `TestVectorDb` helper that starts a standalone server container
//! for live integration tests.

use testcontainers::core::{IntoContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage, ImageExt};

const GRPC_PORT: u16 = 19530;

/// Test server wrapper that ensures proper cleanup
///
/// The container is automatically stopped and removed when this struct is
/// dropped.
pub struct TestVectorDb {
    #[allow(dead_code)]
    container: ContainerAsync<GenericImage>,
    pub uri: String,
}

impl TestVectorDb {
    /// Start a standalone server container and wait until it accepts calls.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use test_utils::TestVectorDb;
    ///
    /// # async fn example() {
    /// let db = TestVectorDb::new().await;
    /// // Connect a client against db.uri()
    /// # }
    /// ```
    pub async fn new() -> Self {
        let image = GenericImage::new("milvusdb/milvus", "v2.4.13")
            .with_exposed_port(GRPC_PORT.tcp())
            .with_wait_for(WaitFor::message_on_stdout("Proxy successfully started"))
            .with_env_var("ETCD_USE_EMBED", "true")
            .with_env_var("ETCD_DATA_DIR", "/var/lib/milvus/etcd")
            .with_env_var("COMMON_STORAGETYPE", "local")
            .with_cmd(["milvus", "run", "standalone"]);

        let container = image
            .start()
            .await
            .expect("Failed to start vector database container");

        let host_port = container
            .get_host_port_ipv4(GRPC_PORT)
            .await
            .expect("Failed to get host port");

        let uri = format!("http://127.0.0.1:{host_port}");

        tracing::info!(port = host_port, "Test vector database ready");

        Self { container, uri }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }
}

impl Drop for TestVectorDb {
    fn drop(&mut self) {
        tracing::debug!("Cleaning up test vector database container");
    }
}
