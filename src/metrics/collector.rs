//! Metrics collection using Prometheus
//!
//! This module provides metrics collection for the pitch-rank ranking
//! service using Prometheus metrics.

use crate::leaderboard::LeaderboardStats;
use crate::types::RankTier;
use anyhow::Result;
use prometheus::{
    Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Main metrics collector for the ranking service
#[derive(Clone)]
pub struct MetricsCollector {
    /// Prometheus registry
    registry: Arc<Registry>,

    /// Service-level metrics
    service_metrics: ServiceMetrics,

    /// Ranking calculation metrics
    ranking_metrics: RankingMetrics,

    /// Leaderboard metrics
    leaderboard_metrics: LeaderboardMetrics,
}

/// Service-level metrics
#[derive(Clone)]
pub struct ServiceMetrics {
    /// Service uptime in seconds
    pub uptime_seconds: IntGauge,

    /// Total HTTP requests by endpoint and status
    pub http_requests_total: IntCounterVec,

    /// Health check status (0=unhealthy, 1=degraded, 2=healthy)
    pub health_status: IntGauge,
}

/// Ranking calculation metrics
#[derive(Clone)]
pub struct RankingMetrics {
    /// Total rankings computed by tier
    pub rankings_computed_total: IntCounterVec,

    /// Distribution of computed scores
    pub score_distribution: Histogram,

    /// Ranking calculation time
    pub calculation_duration: Histogram,
}

/// Leaderboard metrics
#[derive(Clone)]
pub struct LeaderboardMetrics {
    /// Players currently tracked
    pub players_tracked: IntGauge,

    /// Total stats updates accepted
    pub stats_updates_total: IntCounter,

    /// Total leaderboard queries served
    pub leaderboard_queries_total: IntCounter,
}

impl MetricsCollector {
    /// Create a new metrics collector with default registry
    pub fn new() -> Result<Self> {
        let registry = Arc::new(Registry::new());
        Self::with_registry(registry)
    }

    /// Create a new metrics collector with custom registry
    pub fn with_registry(registry: Arc<Registry>) -> Result<Self> {
        let service_metrics = ServiceMetrics::new(&registry)?;
        let ranking_metrics = RankingMetrics::new(&registry)?;
        let leaderboard_metrics = LeaderboardMetrics::new(&registry)?;

        Ok(Self {
            registry,
            service_metrics,
            ranking_metrics,
            leaderboard_metrics,
        })
    }

    /// Get the Prometheus registry
    pub fn registry(&self) -> Arc<Registry> {
        self.registry.clone()
    }

    /// Get service metrics
    pub fn service(&self) -> &ServiceMetrics {
        &self.service_metrics
    }

    /// Get ranking metrics
    pub fn ranking(&self) -> &RankingMetrics {
        &self.ranking_metrics
    }

    /// Get leaderboard metrics
    pub fn leaderboard(&self) -> &LeaderboardMetrics {
        &self.leaderboard_metrics
    }

    /// Record a computed ranking
    pub fn record_ranking(&self, tier: RankTier, score: f64, duration: Duration) {
        let tier_str = match tier {
            RankTier::S => "s",
            RankTier::A => "a",
            RankTier::B => "b",
            RankTier::C => "c",
        };

        self.ranking_metrics
            .rankings_computed_total
            .with_label_values(&[tier_str])
            .inc();

        self.ranking_metrics.score_distribution.observe(score);

        self.ranking_metrics
            .calculation_duration
            .observe(duration.as_secs_f64());
    }

    /// Record an HTTP request
    pub fn record_http_request(&self, endpoint: &str, status: u16) {
        self.service_metrics
            .http_requests_total
            .with_label_values(&[endpoint, &status.to_string()])
            .inc();
    }

    /// Record a stats update being accepted
    pub fn record_stats_update(&self) {
        self.leaderboard_metrics.stats_updates_total.inc();
    }

    /// Record a leaderboard query
    pub fn record_leaderboard_query(&self) {
        self.leaderboard_metrics.leaderboard_queries_total.inc();
    }

    /// Update gauges from leaderboard activity counters
    pub fn update_from_leaderboard_stats(&self, stats: &LeaderboardStats) {
        self.leaderboard_metrics
            .players_tracked
            .set(stats.players_tracked as i64);
    }

    /// Update health status
    pub fn update_health_status(&self, status: u8) {
        self.service_metrics.health_status.set(status as i64);
    }

    /// Update the uptime gauge
    pub fn update_uptime(&self, uptime: Duration) {
        self.service_metrics
            .uptime_seconds
            .set(uptime.as_secs() as i64);
    }

    /// Create a timer for measuring operation duration
    pub fn start_timer(&self) -> MetricsTimer {
        MetricsTimer::new()
    }
}

/// Timer for measuring operation durations
pub struct MetricsTimer {
    start: Instant,
}

impl MetricsTimer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get the elapsed duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop the timer and return the duration
    pub fn stop(self) -> Duration {
        self.elapsed()
    }
}

impl ServiceMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let uptime_seconds =
            IntGauge::new("pitch_rank_uptime_seconds", "Service uptime in seconds")?;
        registry.register(Box::new(uptime_seconds.clone()))?;

        let http_requests_total = IntCounterVec::new(
            Opts::new("pitch_rank_http_requests_total", "Total HTTP requests"),
            &["endpoint", "status"],
        )?;
        registry.register(Box::new(http_requests_total.clone()))?;

        let health_status = IntGauge::new(
            "pitch_rank_health_status",
            "Health status (0=unhealthy, 1=degraded, 2=healthy)",
        )?;
        registry.register(Box::new(health_status.clone()))?;

        Ok(Self {
            uptime_seconds,
            http_requests_total,
            health_status,
        })
    }
}

impl RankingMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let rankings_computed_total = IntCounterVec::new(
            Opts::new(
                "pitch_rank_rankings_computed_total",
                "Total rankings computed",
            ),
            &["tier"],
        )?;
        registry.register(Box::new(rankings_computed_total.clone()))?;

        let score_distribution = Histogram::with_opts(
            HistogramOpts::new(
                "pitch_rank_score_distribution",
                "Distribution of computed scores",
            )
            .buckets(vec![10.0, 20.0, 30.0, 40.0, 55.0, 70.0, 85.0, 100.0]),
        )?;
        registry.register(Box::new(score_distribution.clone()))?;

        let calculation_duration = Histogram::with_opts(
            HistogramOpts::new(
                "pitch_rank_calculation_duration_seconds",
                "Ranking calculation time",
            )
            .buckets(vec![1e-7, 1e-6, 1e-5, 1e-4, 1e-3]),
        )?;
        registry.register(Box::new(calculation_duration.clone()))?;

        Ok(Self {
            rankings_computed_total,
            score_distribution,
            calculation_duration,
        })
    }
}

impl LeaderboardMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let players_tracked = IntGauge::new(
            "pitch_rank_players_tracked",
            "Players currently tracked in the leaderboard",
        )?;
        registry.register(Box::new(players_tracked.clone()))?;

        let stats_updates_total = IntCounter::new(
            "pitch_rank_stats_updates_total",
            "Total stats updates accepted",
        )?;
        registry.register(Box::new(stats_updates_total.clone()))?;

        let leaderboard_queries_total = IntCounter::new(
            "pitch_rank_leaderboard_queries_total",
            "Total leaderboard queries served",
        )?;
        registry.register(Box::new(leaderboard_queries_total.clone()))?;

        Ok(Self {
            players_tracked,
            stats_updates_total,
            leaderboard_queries_total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_registers_metrics() {
        let collector = MetricsCollector::new().unwrap();

        collector.record_ranking(RankTier::S, 92.5, Duration::from_micros(3));
        collector.record_http_request("/rank", 200);
        collector.record_stats_update();
        collector.record_leaderboard_query();
        collector.update_health_status(2);
        collector.update_uptime(Duration::from_secs(5));

        let families = collector.registry().gather();
        assert!(!families.is_empty());

        let names: Vec<_> = families.iter().map(|f| f.get_name().to_string()).collect();
        assert!(names.contains(&"pitch_rank_rankings_computed_total".to_string()));
        assert!(names.contains(&"pitch_rank_score_distribution".to_string()));
        assert!(names.contains(&"pitch_rank_players_tracked".to_string()));
    }

    #[test]
    fn test_timer_measures_elapsed() {
        let collector = MetricsCollector::new().unwrap();
        let timer = collector.start_timer();
        let duration = timer.stop();
        assert!(duration.as_nanos() > 0);
    }

    #[test]
    fn test_update_from_leaderboard_stats() {
        let collector = MetricsCollector::new().unwrap();
        let stats = LeaderboardStats {
            players_tracked: 42,
            stats_updates: 100,
            rankings_computed: 200,
        };

        collector.update_from_leaderboard_stats(&stats);
        assert_eq!(collector.leaderboard().players_tracked.get(), 42);
    }
}
