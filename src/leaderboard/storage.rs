//! Stats storage interface and implementations
//!
//! This module defines the interface for persisting and retrieving player
//! statistics, with an in-memory implementation suitable for a single
//! instance and a trait boundary ready for a database-backed one.

use crate::error::RankingError;
use crate::types::{PlayerId, PlayerStats};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Storage entry for a player's stats with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsEntry {
    pub player_id: PlayerId,
    pub stats: PlayerStats,
    pub last_updated: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl StatsEntry {
    /// Create a new entry for a player
    pub fn new(player_id: PlayerId, stats: PlayerStats) -> Self {
        let now = Utc::now();
        Self {
            player_id,
            stats,
            last_updated: now,
            created_at: now,
        }
    }

    /// Replace the stats and refresh the update timestamp
    pub fn update_stats(&mut self, stats: PlayerStats) {
        self.stats = stats;
        self.last_updated = Utc::now();
    }
}

/// Trait for stats storage operations
#[async_trait]
pub trait StatsStorage: Send + Sync {
    /// Get a player's stats entry
    async fn get_stats(&self, player_id: &PlayerId) -> crate::error::Result<Option<StatsEntry>>;

    /// Store or update a player's stats, returning the stored entry
    async fn upsert_stats(
        &self,
        player_id: PlayerId,
        stats: PlayerStats,
    ) -> crate::error::Result<StatsEntry>;

    /// Get all stored entries (for leaderboard assembly)
    async fn get_all_stats(&self) -> crate::error::Result<Vec<StatsEntry>>;

    /// Remove a player's stats, returning whether an entry existed
    async fn remove_stats(&self, player_id: &PlayerId) -> crate::error::Result<bool>;

    /// Get total number of tracked players
    async fn player_count(&self) -> crate::error::Result<usize>;
}

/// In-memory stats storage implementation
#[derive(Debug)]
pub struct InMemoryStatsStorage {
    entries: RwLock<HashMap<PlayerId, StatsEntry>>,
    max_entries: usize,
}

impl InMemoryStatsStorage {
    /// Create a new in-memory stats storage
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_entries,
        }
    }

    /// Evict the stalest entries if we exceed max_entries
    async fn cleanup_if_needed(&self) {
        let mut entries = self.entries.write().await;

        if entries.len() > self.max_entries {
            // Remove oldest entries (by last_updated timestamp)
            let mut stale: Vec<_> = entries
                .iter()
                .map(|(k, v)| (k.clone(), v.last_updated))
                .collect();
            stale.sort_by(|a, b| a.1.cmp(&b.1));

            let to_remove = entries.len() - self.max_entries;
            for (player_id, _) in stale.into_iter().take(to_remove) {
                entries.remove(&player_id);
            }
        }
    }
}

impl Default for InMemoryStatsStorage {
    fn default() -> Self {
        Self::new(10_000)
    }
}

#[async_trait]
impl StatsStorage for InMemoryStatsStorage {
    async fn get_stats(&self, player_id: &PlayerId) -> crate::error::Result<Option<StatsEntry>> {
        let entries = self.entries.read().await;
        Ok(entries.get(player_id).cloned())
    }

    async fn upsert_stats(
        &self,
        player_id: PlayerId,
        stats: PlayerStats,
    ) -> crate::error::Result<StatsEntry> {
        if player_id.is_empty() {
            return Err(RankingError::InvalidStats {
                reason: "Player id cannot be empty".to_string(),
            }
            .into());
        }

        let entry = {
            let mut entries = self.entries.write().await;
            match entries.get_mut(&player_id) {
                Some(existing) => {
                    existing.update_stats(stats);
                    existing.clone()
                }
                None => {
                    let entry = StatsEntry::new(player_id.clone(), stats);
                    entries.insert(player_id, entry.clone());
                    entry
                }
            }
        };

        self.cleanup_if_needed().await;
        Ok(entry)
    }

    async fn get_all_stats(&self) -> crate::error::Result<Vec<StatsEntry>> {
        let entries = self.entries.read().await;
        Ok(entries.values().cloned().collect())
    }

    async fn remove_stats(&self, player_id: &PlayerId) -> crate::error::Result<bool> {
        let mut entries = self.entries.write().await;
        Ok(entries.remove(player_id).is_some())
    }

    async fn player_count(&self) -> crate::error::Result<usize> {
        let entries = self.entries.read().await;
        Ok(entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upsert_and_get() {
        let storage = InMemoryStatsStorage::default();
        let stats = PlayerStats::new(5, 10, 8, 4);

        let entry = storage
            .upsert_stats("player1".to_string(), stats)
            .await
            .unwrap();
        assert_eq!(entry.stats, stats);
        assert_eq!(entry.created_at, entry.last_updated);

        let fetched = storage.get_stats(&"player1".to_string()).await.unwrap();
        assert_eq!(fetched.unwrap().stats, stats);

        assert!(storage
            .get_stats(&"missing".to_string())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_update_refreshes_timestamp() {
        let storage = InMemoryStatsStorage::default();
        let created = storage
            .upsert_stats("player1".to_string(), PlayerStats::new(1, 2, 0, 0))
            .await
            .unwrap();

        let updated = storage
            .upsert_stats("player1".to_string(), PlayerStats::new(2, 3, 1, 0))
            .await
            .unwrap();

        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.last_updated >= created.last_updated);
        assert_eq!(updated.stats.wins, 2);
        assert_eq!(storage.player_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_empty_player_id_rejected() {
        let storage = InMemoryStatsStorage::default();
        let result = storage
            .upsert_stats(String::new(), PlayerStats::default())
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_remove() {
        let storage = InMemoryStatsStorage::default();
        storage
            .upsert_stats("player1".to_string(), PlayerStats::default())
            .await
            .unwrap();

        assert!(storage.remove_stats(&"player1".to_string()).await.unwrap());
        assert!(!storage.remove_stats(&"player1".to_string()).await.unwrap());
        assert_eq!(storage.player_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_eviction_keeps_freshest_entries() {
        let storage = InMemoryStatsStorage::new(2);

        for id in ["a", "b", "c"] {
            storage
                .upsert_stats(id.to_string(), PlayerStats::default())
                .await
                .unwrap();
            // Distinct last_updated timestamps keep eviction order stable
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }

        assert_eq!(storage.player_count().await.unwrap(), 2);
        // The first inserted entry is the stalest and gets evicted
        assert!(storage
            .get_stats(&"a".to_string())
            .await
            .unwrap()
            .is_none());
        assert!(storage
            .get_stats(&"c".to_string())
            .await
            .unwrap()
            .is_some());
    }
}
