//! HTTP server for the ranking API and health endpoints
//!
//! This module provides the Axum server hosting the ranking, leaderboard,
//! health, and Prometheus metrics endpoints for the pitch-rank service.

use crate::api::handlers;
use crate::leaderboard::LeaderboardManager;
use crate::metrics::MetricsCollector;
use crate::ranking::RankingEngine;
use crate::service::app::AppState;
use anyhow::{Context, Result};
use axum::{
    routing::{get, post, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tracing::{info, warn};

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host to bind to (typically "0.0.0.0" for all interfaces)
    pub host: String,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "0.0.0.0".to_string(),
        }
    }
}

/// Shared state for the API handlers
#[derive(Clone)]
pub struct ApiState {
    pub app_state: Arc<AppState>,
    pub engine: Arc<RankingEngine>,
    pub leaderboard: Arc<LeaderboardManager>,
    pub metrics: Arc<MetricsCollector>,
}

impl ApiState {
    /// Build handler state from the application state
    pub fn from_app_state(app_state: Arc<AppState>) -> Self {
        Self {
            engine: app_state.engine(),
            leaderboard: app_state.leaderboard(),
            metrics: app_state.metrics(),
            app_state,
        }
    }
}

/// HTTP server hosting the ranking API
pub struct ApiServer {
    config: ApiServerConfig,
    state: ApiState,
    shutdown_tx: broadcast::Sender<()>,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(config: ApiServerConfig, app_state: Arc<AppState>) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            config,
            state: ApiState::from_app_state(app_state),
            shutdown_tx,
        }
    }

    /// Start the API server
    pub async fn start(&self) -> Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .context("Invalid API server address")?;

        let app = self.create_router();
        let listener = TcpListener::bind(addr).await?;

        info!("API server listening on http://{}", addr);

        // Create a shutdown receiver for this task
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        // Serve with graceful shutdown
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
                info!("API server shutdown signal received");
            })
            .await?;

        info!("API server stopped");
        Ok(())
    }

    /// Create the Axum router with all endpoints
    pub fn create_router(&self) -> Router {
        Router::new()
            .route("/", get(handlers::root_handler))
            .route("/rank", post(handlers::rank_handler))
            .route(
                "/players/{id}",
                get(handlers::get_player_handler).delete(handlers::delete_player_handler),
            )
            .route("/players/{id}/stats", put(handlers::upsert_stats_handler))
            .route("/leaderboard", get(handlers::leaderboard_handler))
            .route("/health", get(handlers::health_handler))
            .route("/ready", get(handlers::ready_handler))
            .route("/alive", get(handlers::alive_handler))
            .route("/metrics", get(handlers::metrics_handler))
            .route("/stats", get(handlers::stats_handler))
            .with_state(self.state.clone())
    }

    /// Stop the API server
    pub fn stop(&self) -> Result<()> {
        info!("Stopping API server...");

        if let Err(e) = self.shutdown_tx.send(()) {
            warn!("Failed to send shutdown signal to API server: {}", e);
        }

        Ok(())
    }
}
