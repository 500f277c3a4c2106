//! Service layer for the pitch-rank ranking service
//!
//! This module contains the main application state, lifecycle tracking,
//! and health check machinery for the production service.

pub mod app;
pub mod health;

pub use app::AppState;
pub use health::{HealthCheck, HealthStatus};
