//! Shared fixtures for integration tests

use pitch_rank::leaderboard::{InMemoryStatsStorage, LeaderboardManager};
use pitch_rank::ranking::RankingEngine;
use pitch_rank::types::PlayerStats;
use std::sync::Arc;

/// Build a complete leaderboard system with the production engine
pub fn create_test_system() -> (Arc<LeaderboardManager>, Arc<RankingEngine>) {
    let engine = Arc::new(RankingEngine::default());
    let storage = Arc::new(InMemoryStatsStorage::default());
    let manager = Arc::new(LeaderboardManager::new(storage, engine.clone()));

    (manager, engine)
}

/// The seeded sample profile from the mobile app (scores 47.8, tier C)
pub fn sample_profile() -> PlayerStats {
    PlayerStats::new(31, 47, 23, 18)
}

/// A profile that saturates every component (scores 100.0, tier S)
pub fn elite_profile() -> PlayerStats {
    PlayerStats::new(50, 50, 150, 100)
}

/// A profile with no recorded games (scores 0.0, tier C)
pub fn empty_profile() -> PlayerStats {
    PlayerStats::default()
}
