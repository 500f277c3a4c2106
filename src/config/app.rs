//! Main application configuration
//!
//! This module defines the primary configuration structures for the
//! pitch-rank ranking service, including environment variable loading,
//! TOML file loading, and validation.

use crate::config::scoring::ScoringConfig;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub leaderboard: LeaderboardSettings,
    pub scoring: ScoringConfig,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging and metrics
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Host to bind the HTTP server to
    pub http_host: String,
    /// Port for the HTTP API and health endpoints
    pub http_port: u16,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout_seconds: u64,
}

/// Leaderboard-specific settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaderboardSettings {
    /// Maximum number of players kept in storage
    pub max_entries: usize,
    /// Leaderboard page size when the caller does not specify one
    pub default_limit: usize,
    /// Upper bound on the leaderboard page size
    pub max_limit: usize,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "pitch-rank".to_string(),
            log_level: "info".to_string(),
            http_host: "0.0.0.0".to_string(),
            http_port: 8080,
            shutdown_timeout_seconds: 30,
        }
    }
}

impl Default for LeaderboardSettings {
    fn default() -> Self {
        Self {
            max_entries: 10_000,
            default_limit: 20,
            max_limit: 100,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            config.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            config.service.log_level = log_level;
        }
        if let Ok(host) = env::var("HTTP_HOST") {
            config.service.http_host = host;
        }
        if let Ok(port) = env::var("HTTP_PORT") {
            config.service.http_port = port
                .parse()
                .map_err(|_| anyhow!("Invalid HTTP_PORT value: {}", port))?;
        }
        if let Ok(timeout) = env::var("SHUTDOWN_TIMEOUT_SECONDS") {
            config.service.shutdown_timeout_seconds = timeout
                .parse()
                .map_err(|_| anyhow!("Invalid SHUTDOWN_TIMEOUT_SECONDS value: {}", timeout))?;
        }

        // Leaderboard settings
        if let Ok(max_entries) = env::var("LEADERBOARD_MAX_ENTRIES") {
            config.leaderboard.max_entries = max_entries
                .parse()
                .map_err(|_| anyhow!("Invalid LEADERBOARD_MAX_ENTRIES value: {}", max_entries))?;
        }
        if let Ok(limit) = env::var("LEADERBOARD_DEFAULT_LIMIT") {
            config.leaderboard.default_limit = limit
                .parse()
                .map_err(|_| anyhow!("Invalid LEADERBOARD_DEFAULT_LIMIT value: {}", limit))?;
        }
        if let Ok(limit) = env::var("LEADERBOARD_MAX_LIMIT") {
            config.leaderboard.max_limit = limit
                .parse()
                .map_err(|_| anyhow!("Invalid LEADERBOARD_MAX_LIMIT value: {}", limit))?;
        }

        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        validate_config(&config)?;
        Ok(config)
    }

    /// Get shutdown timeout as Duration
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.service.shutdown_timeout_seconds)
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    // Validate ports
    if config.service.http_port == 0 {
        return Err(anyhow!("HTTP port cannot be 0"));
    }

    // Validate timeouts
    if config.service.shutdown_timeout_seconds == 0 {
        return Err(anyhow!("Shutdown timeout must be greater than 0"));
    }

    // Validate leaderboard settings
    if config.leaderboard.max_entries == 0 {
        return Err(anyhow!("Leaderboard max entries must be greater than 0"));
    }
    if config.leaderboard.default_limit == 0 {
        return Err(anyhow!("Leaderboard default limit must be greater than 0"));
    }
    if config.leaderboard.default_limit > config.leaderboard.max_limit {
        return Err(anyhow!(
            "Leaderboard default limit ({}) cannot exceed max limit ({})",
            config.leaderboard.default_limit,
            config.leaderboard.max_limit
        ));
    }

    // Validate scoring formula
    config.scoring.validate()?;

    Ok(())
}
