//! HTTP API for the pitch-rank ranking service

pub mod handlers;
pub mod server;

pub use handlers::{LeaderboardQuery, PlayerResponse, RankResponse};
pub use server::{ApiServer, ApiServerConfig, ApiState};
