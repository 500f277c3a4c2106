//! Common types used throughout the ranking service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for players
pub type PlayerId = String;

/// Cumulative match statistics for a single player
///
/// Fields are unsigned, so negative counts are unrepresentable. No upper
/// bound is enforced; arbitrarily large values are accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub wins: u64,
    pub games_played: u64,
    pub goals: u64,
    pub assists: u64,
}

impl PlayerStats {
    pub fn new(wins: u64, games_played: u64, goals: u64, assists: u64) -> Self {
        Self {
            wins,
            games_played,
            goals,
            assists,
        }
    }
}

/// Discrete performance tier, ordered `C < B < A < S`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RankTier {
    C,
    B,
    A,
    S,
}

impl RankTier {
    /// Minimum rounded score for the S tier
    pub const S_THRESHOLD: f64 = 85.0;
    /// Minimum rounded score for the A tier
    pub const A_THRESHOLD: f64 = 70.0;
    /// Minimum rounded score for the B tier
    pub const B_THRESHOLD: f64 = 55.0;

    /// Classify a rounded score into a tier, highest band first
    pub fn from_score(score: f64) -> Self {
        if score >= Self::S_THRESHOLD {
            RankTier::S
        } else if score >= Self::A_THRESHOLD {
            RankTier::A
        } else if score >= Self::B_THRESHOLD {
            RankTier::B
        } else {
            RankTier::C
        }
    }

    /// Display color token for the tier
    pub fn color(&self) -> &'static str {
        match self {
            RankTier::S => "#F59E0B", // Amber
            RankTier::A => "#10B981", // Green
            RankTier::B => "#3B82F6", // Blue
            RankTier::C => "#6B7280", // Gray
        }
    }

    /// Human-readable tier label
    pub fn description(&self) -> &'static str {
        match self {
            RankTier::S => "Elite",
            RankTier::A => "Advanced",
            RankTier::B => "Intermediate",
            RankTier::C => "Beginner",
        }
    }
}

impl std::fmt::Display for RankTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RankTier::S => write!(f, "S"),
            RankTier::A => write!(f, "A"),
            RankTier::B => write!(f, "B"),
            RankTier::C => write!(f, "C"),
        }
    }
}

/// Result of a ranking calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankingResult {
    /// Normalized performance score in [0, 100], rounded to one decimal
    pub score: f64,
    /// Tier derived from the rounded score
    pub rank: RankTier,
}

/// A player with their stored stats and computed ranking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedPlayer {
    pub player_id: PlayerId,
    pub stats: PlayerStats,
    pub score: f64,
    pub rank: RankTier,
    pub last_updated: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ordering() {
        assert!(RankTier::S > RankTier::A);
        assert!(RankTier::A > RankTier::B);
        assert!(RankTier::B > RankTier::C);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(RankTier::from_score(85.0), RankTier::S);
        assert_eq!(RankTier::from_score(84.9), RankTier::A);
        assert_eq!(RankTier::from_score(70.0), RankTier::A);
        assert_eq!(RankTier::from_score(69.9), RankTier::B);
        assert_eq!(RankTier::from_score(55.0), RankTier::B);
        assert_eq!(RankTier::from_score(54.9), RankTier::C);
        assert_eq!(RankTier::from_score(0.0), RankTier::C);
        assert_eq!(RankTier::from_score(100.0), RankTier::S);
    }

    #[test]
    fn test_tier_display_tokens() {
        assert_eq!(RankTier::S.to_string(), "S");
        assert_eq!(RankTier::S.color(), "#F59E0B");
        assert_eq!(RankTier::A.color(), "#10B981");
        assert_eq!(RankTier::B.color(), "#3B82F6");
        assert_eq!(RankTier::C.color(), "#6B7280");
        assert_eq!(RankTier::S.description(), "Elite");
        assert_eq!(RankTier::C.description(), "Beginner");
    }

    #[test]
    fn test_stats_defaults_to_empty() {
        let stats = PlayerStats::default();
        assert_eq!(stats.games_played, 0);
        assert_eq!(stats.wins, 0);
    }
}
