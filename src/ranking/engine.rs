//! Weighted-blend ranking engine
//!
//! Converts a player's cumulative statistics into a normalized performance
//! score in [0, 100] and a discrete tier. The formula blends four normalized
//! components with fixed weights from `ScoringConfig`:
//!
//! - win rate, clamped to [0, 100]
//! - goals per game, saturating at `goals_per_game_cap`
//! - assists per game, saturating at `assists_per_game_cap`
//! - volume (sample size), saturating at `volume_cap_games`
//!
//! The blended score is rounded half away from zero to one decimal and the
//! tier is classified from the rounded value.

use crate::config::ScoringConfig;
use crate::ranking::calculator::RankCalculator;
use crate::types::{PlayerStats, RankTier, RankingResult};
use crate::utils::round_to_tenths;
use serde::{Deserialize, Serialize};

/// Per-component breakdown of a score, before weighting
///
/// Each component is normalized to [0, 100]. Useful for explaining a score
/// in API responses and for auditing the formula in tests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub win_rate: f64,
    pub goals_norm: f64,
    pub assists_norm: f64,
    pub volume_norm: f64,
}

/// Pure ranking engine parameterized by a validated `ScoringConfig`
///
/// The engine is stateless and side-effect free; it may be shared across
/// threads and called concurrently without coordination.
#[derive(Debug, Clone)]
pub struct RankingEngine {
    config: ScoringConfig,
}

impl RankingEngine {
    /// Create a new engine, validating the scoring configuration
    pub fn new(config: ScoringConfig) -> crate::error::Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get the scoring configuration
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Compute the normalized components for a stats record
    ///
    /// Returns `None` when `games_played` is zero, since the per-game rates
    /// are undefined in that case.
    pub fn breakdown(&self, stats: &PlayerStats) -> Option<ScoreBreakdown> {
        if stats.games_played == 0 {
            return None;
        }

        let games = stats.games_played as f64;

        // Win rate above 100 is only possible with inconsistent upstream
        // data (wins > games_played); the clamp absorbs it.
        let win_rate = (stats.wins as f64 / games * 100.0).clamp(0.0, 100.0);

        let goals_per_game = stats.goals as f64 / games;
        let goals_norm = (goals_per_game / self.config.goals_per_game_cap).min(1.0) * 100.0;

        let assists_per_game = stats.assists as f64 / games;
        let assists_norm = (assists_per_game / self.config.assists_per_game_cap).min(1.0) * 100.0;

        let volume_norm = (games / self.config.volume_cap_games as f64).min(1.0) * 100.0;

        Some(ScoreBreakdown {
            win_rate,
            goals_norm,
            assists_norm,
            volume_norm,
        })
    }

    /// Convert cumulative statistics into a score and tier
    ///
    /// Players with no recorded games land in the lowest tier with a zero
    /// score; this doubles as the division-by-zero guard.
    pub fn calculate(&self, stats: &PlayerStats) -> RankingResult {
        let Some(breakdown) = self.breakdown(stats) else {
            return RankingResult {
                score: 0.0,
                rank: RankTier::C,
            };
        };

        let blended = self.config.win_rate_weight * breakdown.win_rate
            + self.config.goals_weight * breakdown.goals_norm
            + self.config.assists_weight * breakdown.assists_norm
            + self.config.volume_weight * breakdown.volume_norm;

        let score = round_to_tenths(blended);

        RankingResult {
            score,
            rank: RankTier::from_score(score),
        }
    }
}

impl Default for RankingEngine {
    fn default() -> Self {
        // The default scoring config is statically valid
        Self {
            config: ScoringConfig::default(),
        }
    }
}

impl RankCalculator for RankingEngine {
    fn calculate_ranking(&self, stats: &PlayerStats) -> crate::error::Result<RankingResult> {
        Ok(self.calculate(stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> RankingEngine {
        RankingEngine::default()
    }

    #[test]
    fn test_no_games_is_lowest_tier() {
        let result = engine().calculate(&PlayerStats::new(0, 0, 0, 0));
        assert_eq!(result.score, 0.0);
        assert_eq!(result.rank, RankTier::C);

        // Other fields are ignored when no games are recorded
        let result = engine().calculate(&PlayerStats::new(10, 0, 99, 99));
        assert_eq!(result.score, 0.0);
        assert_eq!(result.rank, RankTier::C);
    }

    #[test]
    fn test_seeded_sample_profile() {
        // 31 wins over 47 games, 23 goals, 18 assists
        let result = engine().calculate(&PlayerStats::new(31, 47, 23, 18));
        assert_eq!(result.score, 47.8);
        assert_eq!(result.rank, RankTier::C);
    }

    #[test]
    fn test_maximal_saturation() {
        // Every component saturates: perfect win rate, 3 goals and 2 assists
        // per game, 50+ games
        let result = engine().calculate(&PlayerStats::new(50, 50, 150, 100));
        assert_eq!(result.score, 100.0);
        assert_eq!(result.rank, RankTier::S);
    }

    #[test]
    fn test_mid_table_profile() {
        let result = engine().calculate(&PlayerStats::new(28, 40, 20, 10));
        assert_eq!(result.score, 47.0);
        assert_eq!(result.rank, RankTier::C);
    }

    #[test]
    fn test_score_bounds() {
        let extremes = [
            PlayerStats::new(0, 1, 0, 0),
            PlayerStats::new(1, 1, 0, 0),
            PlayerStats::new(u64::MAX, u64::MAX, u64::MAX, u64::MAX),
            PlayerStats::new(0, u64::MAX, 0, 0),
        ];

        for stats in extremes {
            let result = engine().calculate(&stats);
            assert!(
                (0.0..=100.0).contains(&result.score),
                "score {} out of bounds for {:?}",
                result.score,
                stats
            );
        }
    }

    #[test]
    fn test_inconsistent_wins_clamped() {
        // More wins than games: the win-rate clamp absorbs it instead of
        // letting the component exceed 100
        let inconsistent = engine().calculate(&PlayerStats::new(100, 10, 0, 0));
        let perfect = engine().calculate(&PlayerStats::new(10, 10, 0, 0));
        assert_eq!(inconsistent.score, perfect.score);
    }

    #[test]
    fn test_breakdown_components() {
        let breakdown = engine()
            .breakdown(&PlayerStats::new(28, 40, 20, 10))
            .unwrap();
        assert_eq!(breakdown.win_rate, 70.0);
        assert_eq!(breakdown.goals_norm, 20.0);
        assert_eq!(breakdown.assists_norm, 12.5);
        assert_eq!(breakdown.volume_norm, 80.0);

        assert!(engine().breakdown(&PlayerStats::default()).is_none());
    }

    #[test]
    fn test_determinism() {
        let stats = PlayerStats::new(31, 47, 23, 18);
        let first = engine().calculate(&stats);
        let second = engine().calculate(&stats);
        assert_eq!(first.score.to_bits(), second.score.to_bits());
        assert_eq!(first.rank, second.rank);
    }

    #[test]
    fn test_custom_caps_shift_saturation() {
        let config = ScoringConfig {
            goals_per_game_cap: 1.0,
            ..Default::default()
        };
        let custom = RankingEngine::new(config).unwrap();

        // One goal per game saturates the goals component under the custom cap
        let breakdown = custom.breakdown(&PlayerStats::new(0, 10, 10, 0)).unwrap();
        assert_eq!(breakdown.goals_norm, 100.0);

        let default_breakdown = engine().breakdown(&PlayerStats::new(0, 10, 10, 0)).unwrap();
        assert_eq!(default_breakdown.goals_norm, 40.0);
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        let config = ScoringConfig {
            win_rate_weight: 0.9,
            ..Default::default()
        };
        assert!(RankingEngine::new(config).is_err());
    }
}
