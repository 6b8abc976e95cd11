//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use product_api::config::AppConfig;
use product_api::http::HttpServer;
use product_api::lifecycle::Shutdown;
use product_api::products::ProductStore;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub const API_KEY: &str = "test-key";

/// Configuration used by every test server.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.server.host = "127.0.0.1".into();
    config.server.port = 0;
    config.auth.api_key = API_KEY.into();
    config
}

/// A server running on an ephemeral port.
#[allow(dead_code)]
pub struct RunningServer {
    pub addr: SocketAddr,
    pub store: Arc<ProductStore>,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

#[allow(dead_code)]
impl RunningServer {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Trigger shutdown and wait for the server task to finish.
    pub async fn stop(self) {
        self.shutdown.trigger();
        let result = tokio::time::timeout(Duration::from_secs(5), self.handle)
            .await
            .expect("server did not stop in time")
            .expect("server task panicked");
        assert!(result.is_ok(), "server returned error: {:?}", result);
    }
}

/// Start a server with a seeded store on 127.0.0.1 and an OS-assigned port.
#[allow(dead_code)]
pub async fn start_server() -> RunningServer {
    let store = Arc::new(ProductStore::seeded());
    let server = HttpServer::with_store(test_config(), store.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let handle = tokio::spawn(async move { server.run(listener, server_shutdown).await });

    RunningServer {
        addr,
        store,
        shutdown,
        handle,
    }
}
