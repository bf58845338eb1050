//! Common test utilities for joke-battles integration tests.

use joke_battles::config::{AppConfig, DatabaseConfig, ProviderConfig, ServerConfig};
use joke_battles::startup::Application;
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize tracing for tests (only once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,joke_battles=debug,sqlx=warn")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Explicit test configuration: random port, hermetic in-memory storage, no
/// provider credentials (every branch resolves locally).
pub fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig { port: 0 },
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
        },
        providers: ProviderConfig::default(),
    }
}

/// Spawn a test application and return its base URL.
pub async fn spawn_app() -> String {
    init_tracing();

    let app = Application::build(test_config())
        .await
        .expect("Failed to build application");
    let port = app.port();

    tokio::spawn(async move {
        app.run_until_stopped().await.ok();
    });

    let base_url = format!("http://127.0.0.1:{}", port);

    // Wait for the server to be ready with retry.
    let client = reqwest::Client::new();
    let mut attempts = 0;
    loop {
        match client.get(format!("{}/health", base_url)).send().await {
            Ok(_) => break,
            Err(_) if attempts < 20 => {
                attempts += 1;
                tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
            }
            Err(e) => panic!("Server not ready after 20 attempts: {}", e),
        }
    }

    base_url
}
