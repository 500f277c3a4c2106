//! Leaderboard layer: stats storage and ranked player queries

pub mod manager;
pub mod storage;

// Re-export commonly used types
pub use manager::{LeaderboardManager, LeaderboardStats};
pub use storage::{InMemoryStatsStorage, StatsEntry, StatsStorage};
