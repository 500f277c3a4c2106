//! Leaderboard manager
//!
//! Coordinates the stats storage and the rank calculator: records stats
//! updates, computes rankings on demand, and serves the sorted leaderboard.

use crate::error::RankingError;
use crate::leaderboard::storage::{StatsEntry, StatsStorage};
use crate::ranking::RankCalculator;
use crate::types::{PlayerId, PlayerStats, RankedPlayer};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Counters describing leaderboard activity since service start
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeaderboardStats {
    pub players_tracked: usize,
    pub stats_updates: u64,
    pub rankings_computed: u64,
}

/// Manager that owns the leaderboard workflow
pub struct LeaderboardManager {
    storage: Arc<dyn StatsStorage>,
    calculator: Arc<dyn RankCalculator>,
    stats_updates: AtomicU64,
    rankings_computed: AtomicU64,
}

impl LeaderboardManager {
    /// Create a new leaderboard manager
    pub fn new(storage: Arc<dyn StatsStorage>, calculator: Arc<dyn RankCalculator>) -> Self {
        Self {
            storage,
            calculator,
            stats_updates: AtomicU64::new(0),
            rankings_computed: AtomicU64::new(0),
        }
    }

    /// Store a player's cumulative stats and return their ranking
    pub async fn record_stats(
        &self,
        player_id: PlayerId,
        stats: PlayerStats,
    ) -> crate::error::Result<RankedPlayer> {
        let entry = self.storage.upsert_stats(player_id, stats).await?;
        self.stats_updates.fetch_add(1, Ordering::Relaxed);

        debug!(
            player_id = %entry.player_id,
            games_played = entry.stats.games_played,
            "Recorded stats update"
        );

        self.rank_entry(entry)
    }

    /// Get a single ranked player, if tracked
    pub async fn get_player(
        &self,
        player_id: &PlayerId,
    ) -> crate::error::Result<Option<RankedPlayer>> {
        match self.storage.get_stats(player_id).await? {
            Some(entry) => Ok(Some(self.rank_entry(entry)?)),
            None => Ok(None),
        }
    }

    /// Get a single ranked player, erroring when not tracked
    pub async fn require_player(&self, player_id: &PlayerId) -> crate::error::Result<RankedPlayer> {
        self.get_player(player_id).await?.ok_or_else(|| {
            RankingError::PlayerNotFound {
                player_id: player_id.clone(),
            }
            .into()
        })
    }

    /// Remove a player from the leaderboard
    pub async fn remove_player(&self, player_id: &PlayerId) -> crate::error::Result<bool> {
        self.storage.remove_stats(player_id).await
    }

    /// Get the top `limit` players ordered by score
    ///
    /// Ties are broken by player id so repeated queries are deterministic.
    pub async fn leaderboard(&self, limit: usize) -> crate::error::Result<Vec<RankedPlayer>> {
        let entries = self.storage.get_all_stats().await?;

        let mut ranked = entries
            .into_iter()
            .map(|entry| self.rank_entry(entry))
            .collect::<crate::error::Result<Vec<_>>>()?;

        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.player_id.cmp(&b.player_id))
        });
        ranked.truncate(limit);

        Ok(ranked)
    }

    /// Get activity counters
    pub async fn stats(&self) -> crate::error::Result<LeaderboardStats> {
        Ok(LeaderboardStats {
            players_tracked: self.storage.player_count().await?,
            stats_updates: self.stats_updates.load(Ordering::Relaxed),
            rankings_computed: self.rankings_computed.load(Ordering::Relaxed),
        })
    }

    fn rank_entry(&self, entry: StatsEntry) -> crate::error::Result<RankedPlayer> {
        let result = self.calculator.calculate_ranking(&entry.stats)?;
        self.rankings_computed.fetch_add(1, Ordering::Relaxed);

        Ok(RankedPlayer {
            player_id: entry.player_id,
            stats: entry.stats,
            score: result.score,
            rank: result.rank,
            last_updated: entry.last_updated,
        })
    }
}
