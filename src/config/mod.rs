//! Configuration management for the pitch-rank service
//!
//! This module handles all configuration loading from environment variables
//! and TOML files, validation, and default values for the ranking service.

pub mod app;
pub mod scoring;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, LeaderboardSettings, ServiceSettings};
pub use scoring::ScoringConfig;
