//! Player ranking core
//!
//! This module provides the weighted-blend scoring engine, the calculator
//! seam the leaderboard layer depends on, and score breakdowns for auditing.

pub mod calculator;
pub mod engine;

// Re-export commonly used types
pub use calculator::RankCalculator;
pub use engine::{RankingEngine, ScoreBreakdown};
