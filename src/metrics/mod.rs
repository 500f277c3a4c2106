//! Metrics and monitoring for the pitch-rank ranking service

pub mod collector;

pub use collector::{
    LeaderboardMetrics, MetricsCollector, MetricsTimer, RankingMetrics, ServiceMetrics,
};
