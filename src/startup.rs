//! Application startup and lifecycle management.

use crate::config::AppConfig;
use crate::error::AppError;
use crate::handlers;
use crate::services::votes::{self, VoteStore};
use crate::services::JokeAggregator;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared application state. Read-only after startup; the storage pool is
/// the only thing requests share mutably.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn VoteStore>,
    pub aggregator: Arc<JokeAggregator>,
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: AppConfig) -> Result<Self, AppError> {
        let store = votes::connect(&config.database).await.map_err(|e| {
            tracing::error!("Failed to initialize vote store: {}", e);
            e
        })?;

        let aggregator = Arc::new(JokeAggregator::from_config(&config.providers));
        tracing::info!(
            providers = aggregator.provider_count(),
            "Initialized joke aggregator"
        );

        let state = AppState { store, aggregator };

        // Port 0 = random port for testing.
        let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);
        axum::serve(self.listener, router).await
    }
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/api/generate-jokes", post(handlers::generate_jokes))
        .route("/api/vote", post(handlers::submit_vote))
        .route("/api/scores", get(handlers::get_scores))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
