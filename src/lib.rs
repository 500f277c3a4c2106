//! Pitch Rank - Player performance ranking service
//!
//! This crate converts cumulative player match statistics into normalized
//! performance scores and discrete rank tiers, and serves them over an HTTP
//! leaderboard API.

pub mod api;
pub mod config;
pub mod error;
pub mod leaderboard;
pub mod metrics;
pub mod ranking;
pub mod service;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{RankingError, Result};
pub use types::*;

// Re-export key components
pub use leaderboard::{InMemoryStatsStorage, LeaderboardManager, StatsStorage};
pub use ranking::{RankCalculator, RankingEngine};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
