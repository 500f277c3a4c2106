//! Application state and service wiring
//!
//! This module builds the ranking engine, leaderboard, and metrics from
//! configuration and tracks the service lifecycle.

use crate::config::AppConfig;
use crate::leaderboard::{InMemoryStatsStorage, LeaderboardManager};
use crate::metrics::MetricsCollector;
use crate::ranking::RankingEngine;
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::info;

/// Shared application state for the ranking service
pub struct AppState {
    config: AppConfig,
    engine: Arc<RankingEngine>,
    leaderboard: Arc<LeaderboardManager>,
    metrics: Arc<MetricsCollector>,
    running: RwLock<bool>,
    started_at: Instant,
}

impl AppState {
    /// Build the application state from configuration
    pub async fn new(config: AppConfig) -> Result<Self> {
        let engine = Arc::new(
            RankingEngine::new(config.scoring.clone())
                .context("Failed to build ranking engine from scoring config")?,
        );

        let storage = Arc::new(InMemoryStatsStorage::new(config.leaderboard.max_entries));
        let leaderboard = Arc::new(LeaderboardManager::new(storage, engine.clone()));

        let metrics =
            Arc::new(MetricsCollector::new().context("Failed to create metrics collector")?);

        Ok(Self {
            config,
            engine,
            leaderboard,
            metrics,
            running: RwLock::new(false),
            started_at: Instant::now(),
        })
    }

    /// Mark the service as started
    pub async fn start(&self) -> Result<()> {
        let mut running = self.running.write().await;
        *running = true;
        info!("Service components started");
        Ok(())
    }

    /// Mark the service as stopped
    pub async fn stop(&self) -> Result<()> {
        let mut running = self.running.write().await;
        *running = false;
        info!("Service components stopped");
        Ok(())
    }

    /// Whether the service is accepting requests
    pub async fn is_running(&self) -> bool {
        *self.running.read().await
    }

    /// Time since the state was created
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the ranking engine
    pub fn engine(&self) -> Arc<RankingEngine> {
        self.engine.clone()
    }

    /// Get the leaderboard manager
    pub fn leaderboard(&self) -> Arc<LeaderboardManager> {
        self.leaderboard.clone()
    }

    /// Get the metrics collector
    pub fn metrics(&self) -> Arc<MetricsCollector> {
        self.metrics.clone()
    }
}
