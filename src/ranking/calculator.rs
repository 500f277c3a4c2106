//! Rank calculator trait and test doubles
//!
//! This module defines the interface the leaderboard layer uses to compute
//! rankings, so the scoring formula can be swapped or mocked at the seam.

use crate::types::{PlayerStats, RankTier, RankingResult};
use std::sync::Mutex;

/// Trait for converting cumulative stats into a ranking
pub trait RankCalculator: Send + Sync {
    /// Calculate the score and tier for a stats record
    fn calculate_ranking(&self, stats: &PlayerStats) -> crate::error::Result<RankingResult>;
}

/// Mock rank calculator for testing
#[derive(Debug)]
pub struct MockRankCalculator {
    calculation_calls: Mutex<Vec<PlayerStats>>,
    fixed_result: Mutex<Option<RankingResult>>,
}

impl MockRankCalculator {
    pub fn new() -> Self {
        Self {
            calculation_calls: Mutex::new(Vec::new()),
            fixed_result: Mutex::new(None),
        }
    }

    /// Set a fixed result to return for all calculations
    pub fn set_fixed_result(&self, result: RankingResult) {
        if let Ok(mut fixed) = self.fixed_result.lock() {
            *fixed = Some(result);
        }
    }

    /// Get all calculation calls made (for testing)
    pub fn get_calculation_calls(&self) -> Vec<PlayerStats> {
        self.calculation_calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Clear recorded calls
    pub fn clear_calls(&self) {
        if let Ok(mut calls) = self.calculation_calls.lock() {
            calls.clear();
        }
    }
}

impl Default for MockRankCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl RankCalculator for MockRankCalculator {
    fn calculate_ranking(&self, stats: &PlayerStats) -> crate::error::Result<RankingResult> {
        // Record the call
        if let Ok(mut calls) = self.calculation_calls.lock() {
            calls.push(*stats);
        }

        // Return fixed result if set, otherwise a neutral default
        if let Ok(fixed) = self.fixed_result.lock() {
            if let Some(result) = fixed.as_ref() {
                return Ok(*result);
            }
        }

        Ok(RankingResult {
            score: 0.0,
            rank: RankTier::C,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_records_calls() {
        let calculator = MockRankCalculator::new();
        let stats = PlayerStats::new(5, 10, 3, 2);

        let result = calculator.calculate_ranking(&stats).unwrap();
        assert_eq!(result.rank, RankTier::C);

        let calls = calculator.get_calculation_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], stats);

        calculator.clear_calls();
        assert!(calculator.get_calculation_calls().is_empty());
    }

    #[test]
    fn test_mock_fixed_result() {
        let calculator = MockRankCalculator::new();
        calculator.set_fixed_result(RankingResult {
            score: 91.2,
            rank: RankTier::S,
        });

        let result = calculator
            .calculate_ranking(&PlayerStats::default())
            .unwrap();
        assert_eq!(result.score, 91.2);
        assert_eq!(result.rank, RankTier::S);
    }
}
