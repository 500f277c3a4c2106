//! HTTP request handlers and wire types for the ranking API

use crate::api::server::ApiState;
use crate::service::health::{HealthCheck, HealthStatus};
use crate::types::{PlayerStats, RankTier, RankedPlayer};
use crate::utils::generate_request_id;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use prometheus::{Encoder, TextEncoder};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error, warn};

/// Response body for a computed ranking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankResponse {
    pub score: f64,
    pub rank: RankTier,
    pub color: String,
    pub description: String,
}

impl RankResponse {
    fn new(score: f64, rank: RankTier) -> Self {
        Self {
            score,
            rank,
            color: rank.color().to_string(),
            description: rank.description().to_string(),
        }
    }
}

/// Response body for a tracked player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerResponse {
    pub player_id: String,
    pub stats: PlayerStats,
    pub ranking: RankResponse,
    pub last_updated: chrono::DateTime<chrono::Utc>,
}

impl From<RankedPlayer> for PlayerResponse {
    fn from(player: RankedPlayer) -> Self {
        Self {
            player_id: player.player_id,
            stats: player.stats,
            ranking: RankResponse::new(player.score, player.rank),
            last_updated: player.last_updated,
        }
    }
}

/// Query parameters for the leaderboard endpoint
#[derive(Debug, Default, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<usize>,
}

fn internal_error(endpoint: &str, err: anyhow::Error) -> Response {
    error!("Request to {} failed: {:#}", endpoint, err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal service error" })),
    )
        .into_response()
}

/// Root endpoint handler, shows service information
pub async fn root_handler() -> impl IntoResponse {
    let info = json!({
        "service": "pitch-rank",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "/rank",
            "/players/{id}",
            "/players/{id}/stats",
            "/leaderboard",
            "/health",
            "/ready",
            "/alive",
            "/metrics",
            "/stats"
        ]
    });

    Json(info)
}

/// Compute a ranking from raw stats without touching storage
pub async fn rank_handler(
    State(state): State<ApiState>,
    Json(stats): Json<PlayerStats>,
) -> Response {
    let request_id = generate_request_id();
    debug!(%request_id, ?stats, "Ranking requested");

    let timer = state.metrics.start_timer();
    let result = state.engine.calculate(&stats);
    state
        .metrics
        .record_ranking(result.rank, result.score, timer.stop());
    state.metrics.record_http_request("/rank", 200);

    Json(RankResponse::new(result.score, result.rank)).into_response()
}

/// Upsert a player's cumulative stats and return their ranking
pub async fn upsert_stats_handler(
    State(state): State<ApiState>,
    Path(player_id): Path<String>,
    Json(stats): Json<PlayerStats>,
) -> Response {
    if stats.wins > stats.games_played {
        warn!(
            %player_id,
            wins = stats.wins,
            games_played = stats.games_played,
            "Stats update with more wins than games; win rate will clamp"
        );
    }

    match state.leaderboard.record_stats(player_id, stats).await {
        Ok(ranked) => {
            state.metrics.record_stats_update();
            state.metrics.record_http_request("/players/stats", 200);
            Json(PlayerResponse::from(ranked)).into_response()
        }
        Err(e) => {
            state.metrics.record_http_request("/players/stats", 500);
            internal_error("/players/{id}/stats", e)
        }
    }
}

/// Fetch a tracked player with their current ranking
pub async fn get_player_handler(
    State(state): State<ApiState>,
    Path(player_id): Path<String>,
) -> Response {
    match state.leaderboard.get_player(&player_id).await {
        Ok(Some(ranked)) => {
            state.metrics.record_http_request("/players", 200);
            Json(PlayerResponse::from(ranked)).into_response()
        }
        Ok(None) => {
            state.metrics.record_http_request("/players", 404);
            (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": format!("Player not found: {}", player_id) })),
            )
                .into_response()
        }
        Err(e) => {
            state.metrics.record_http_request("/players", 500);
            internal_error("/players/{id}", e)
        }
    }
}

/// Remove a player from the leaderboard
pub async fn delete_player_handler(
    State(state): State<ApiState>,
    Path(player_id): Path<String>,
) -> Response {
    match state.leaderboard.remove_player(&player_id).await {
        Ok(true) => {
            state.metrics.record_http_request("/players", 204);
            StatusCode::NO_CONTENT.into_response()
        }
        Ok(false) => {
            state.metrics.record_http_request("/players", 404);
            (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": format!("Player not found: {}", player_id) })),
            )
                .into_response()
        }
        Err(e) => {
            state.metrics.record_http_request("/players", 500);
            internal_error("/players/{id}", e)
        }
    }
}

/// Fetch the top players ordered by score
pub async fn leaderboard_handler(
    State(state): State<ApiState>,
    Query(query): Query<LeaderboardQuery>,
) -> Response {
    let settings = &state.app_state.config().leaderboard;
    let limit = query
        .limit
        .unwrap_or(settings.default_limit)
        .min(settings.max_limit);

    match state.leaderboard.leaderboard(limit).await {
        Ok(players) => {
            state.metrics.record_leaderboard_query();
            if let Ok(stats) = state.leaderboard.stats().await {
                state.metrics.update_from_leaderboard_stats(&stats);
            }
            state.metrics.record_http_request("/leaderboard", 200);

            let entries: Vec<PlayerResponse> =
                players.into_iter().map(PlayerResponse::from).collect();
            Json(json!({ "limit": limit, "players": entries })).into_response()
        }
        Err(e) => {
            state.metrics.record_http_request("/leaderboard", 500);
            internal_error("/leaderboard", e)
        }
    }
}

/// Lightweight health check endpoint handler
pub async fn health_handler(State(state): State<ApiState>) -> impl IntoResponse {
    debug!("Health check requested");

    let status = HealthCheck::liveness_check(state.app_state.clone())
        .await
        .unwrap_or(HealthStatus::Unhealthy);

    let code = match status {
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (
        code,
        Json(json!({
            "status": status,
            "service": "pitch-rank",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// Readiness check endpoint handler
pub async fn ready_handler(State(state): State<ApiState>) -> impl IntoResponse {
    debug!("Readiness check requested");

    match HealthCheck::readiness_check(state.app_state.clone()).await {
        Ok(HealthStatus::Healthy) => (StatusCode::OK, "Ready"),
        Ok(HealthStatus::Degraded) => (StatusCode::OK, "Degraded but ready"),
        Ok(HealthStatus::Unhealthy) => (StatusCode::SERVICE_UNAVAILABLE, "Not ready"),
        Err(e) => {
            error!("Readiness check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "Not ready")
        }
    }
}

/// Liveness check endpoint handler
pub async fn alive_handler(State(state): State<ApiState>) -> impl IntoResponse {
    debug!("Liveness check requested");

    match HealthCheck::liveness_check(state.app_state.clone()).await {
        Ok(HealthStatus::Healthy) => (StatusCode::OK, "Alive"),
        _ => (StatusCode::SERVICE_UNAVAILABLE, "Not alive"),
    }
}

/// Prometheus metrics endpoint handler
pub async fn metrics_handler(State(state): State<ApiState>) -> Response {
    debug!("Metrics endpoint requested");

    let registry = state.metrics.registry();
    let metric_families = registry.gather();
    let encoder = TextEncoder::new();

    match encoder.encode_to_string(&metric_families) {
        Ok(metrics_output) => {
            debug!("Serving {} metric families", metric_families.len());

            (
                StatusCode::OK,
                [("content-type", encoder.format_type().to_string())],
                metrics_output,
            )
                .into_response()
        }
        Err(e) => {
            error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to encode metrics".to_string(),
            )
                .into_response()
        }
    }
}

/// Detailed service statistics endpoint handler (for debugging/human consumption)
pub async fn stats_handler(State(state): State<ApiState>) -> Response {
    debug!("Stats endpoint requested");

    match HealthCheck::check(state.app_state.clone()).await {
        Ok(health) => {
            let stats = json!({
                "service": {
                    "name": "pitch-rank",
                    "version": env!("CARGO_PKG_VERSION"),
                    "status": health.status,
                    "uptime_seconds": health.stats.uptime_seconds
                },
                "leaderboard": {
                    "players_tracked": health.stats.players_tracked,
                    "stats_updates": health.stats.stats_updates
                },
                "ranking": {
                    "rankings_computed": health.stats.rankings_computed
                },
                "components": health.checks,
                "timestamp": chrono::Utc::now()
            });

            (StatusCode::OK, Json(stats)).into_response()
        }
        Err(e) => {
            error!("Failed to get stats: {}", e);

            let error_response = json!({
                "service": {
                    "name": "pitch-rank",
                    "version": env!("CARGO_PKG_VERSION"),
                    "status": "error"
                },
                "error": "Failed to get service stats",
                "timestamp": chrono::Utc::now()
            });

            (StatusCode::SERVICE_UNAVAILABLE, Json(error_response)).into_response()
        }
    }
}
