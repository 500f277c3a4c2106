//! Scoring formula configuration
//!
//! The blend weights and saturation caps are policy decisions, so they live
//! in configuration rather than inline literals. Defaults reproduce the
//! production formula exactly.

use crate::error::RankingError;
use serde::{Deserialize, Serialize};

/// Tolerance when checking that the blend weights sum to 1.0
const WEIGHT_SUM_EPSILON: f64 = 1e-9;

/// Configuration for the ranking score formula
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Weight of the clamped win-rate component
    pub win_rate_weight: f64,
    /// Weight of the goals-per-game component
    pub goals_weight: f64,
    /// Weight of the assists-per-game component
    pub assists_weight: f64,
    /// Weight of the sample-size (volume) component
    pub volume_weight: f64,
    /// Goals-per-game rate at which the goals component saturates
    pub goals_per_game_cap: f64,
    /// Assists-per-game rate at which the assists component saturates
    pub assists_per_game_cap: f64,
    /// Games played at which the volume component saturates
    pub volume_cap_games: u64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            win_rate_weight: 0.45,
            goals_weight: 0.25,
            assists_weight: 0.20,
            volume_weight: 0.10,
            goals_per_game_cap: 2.5,
            assists_per_game_cap: 2.0,
            volume_cap_games: 50,
        }
    }
}

impl ScoringConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        let weights = [
            ("win_rate_weight", self.win_rate_weight),
            ("goals_weight", self.goals_weight),
            ("assists_weight", self.assists_weight),
            ("volume_weight", self.volume_weight),
        ];

        for (name, weight) in weights {
            if !(0.0..=1.0).contains(&weight) {
                return Err(RankingError::InvalidScoringConfig {
                    message: format!("{} must be within [0, 1], got {}", name, weight),
                }
                .into());
            }
        }

        let sum: f64 = weights.iter().map(|(_, w)| w).sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_EPSILON {
            return Err(RankingError::InvalidScoringConfig {
                message: format!("weights must sum to 1.0, got {}", sum),
            }
            .into());
        }

        if self.goals_per_game_cap <= 0.0 {
            return Err(RankingError::InvalidScoringConfig {
                message: "goals_per_game_cap must be positive".to_string(),
            }
            .into());
        }
        if self.assists_per_game_cap <= 0.0 {
            return Err(RankingError::InvalidScoringConfig {
                message: "assists_per_game_cap must be positive".to_string(),
            }
            .into());
        }
        if self.volume_cap_games == 0 {
            return Err(RankingError::InvalidScoringConfig {
                message: "volume_cap_games must be greater than 0".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
