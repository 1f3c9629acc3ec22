//! Test server lifecycle management
//!
//! This module manages spawning and shutting down test HTTP servers.
//! Each test gets an isolated server with its own database, template and
//! output directory.

use super::constants::*;
use super::fixtures::{create_test_dirs, TestDirs};
use charge_notification_server::customer_store::{CustomerStore, SqliteCustomerStore};
use charge_notification_server::document::{FileTemplateSource, TextDocumentRenderer};
use charge_notification_server::server::server::make_app;
use charge_notification_server::server::{RequestsLoggingLevel, ServerConfig};
use charge_notification_server::work::create_engine;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

/// Test server instance with isolated database and output directory
///
/// When dropped, the server and its work processor shut down and temp
/// resources are cleaned up.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// The port the server is listening on
    pub port: u16,

    /// Customer store for direct database access in tests
    pub store: Arc<dyn CustomerStore>,

    /// Directory the notification documents are written into
    pub output_dir: PathBuf,

    /// Shutdown token shared with the work processor
    pub shutdown: CancellationToken,

    // Private fields - keep resources alive until drop
    _dirs: TestDirs,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a new test server on a random port
    ///
    /// This function:
    /// 1. Creates a temporary database, template and output directory
    /// 2. Builds the work engine and spawns its processor
    /// 3. Binds to a random port (127.0.0.1:0)
    /// 4. Spawns the server in a background task
    /// 5. Waits for the server to be ready
    pub async fn spawn() -> Self {
        let dirs = create_test_dirs();

        let store: Arc<dyn CustomerStore> = Arc::new(
            SqliteCustomerStore::open(&dirs.db_path).expect("Failed to open customer store"),
        );

        let shutdown = CancellationToken::new();
        let (processor, engine) = create_engine(
            Arc::clone(&store),
            Arc::new(TextDocumentRenderer),
            Arc::new(FileTemplateSource::new(&dirs.template_path)),
            dirs.output_dir.clone(),
            shutdown.clone(),
        );
        tokio::spawn(processor.run(shutdown.clone()));

        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");

        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let base_url = format!("http://127.0.0.1:{}", port);

        // Create shutdown channel
        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let config = ServerConfig {
            port,
            requests_logging_level: RequestsLoggingLevel::None,
        };

        let app = make_app(config, Arc::clone(&store), Arc::new(engine));

        // Spawn server in background task with graceful shutdown
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            port,
            store,
            output_dir: dirs.output_dir.clone(),
            shutdown,
            _dirs: dirs,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Waits for the server to become ready by polling the /health endpoint
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client.get(format!("{}/health", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => {
                    // Server is ready
                    return;
                }
                _ => {
                    // Server not ready yet, wait and retry
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        // Stop the HTTP server and the work processor
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
        self.shutdown.cancel();
        // TempDir will be cleaned up automatically
    }
}
