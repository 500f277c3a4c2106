//! Utility functions for the ranking service

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generate a new unique request ID for log correlation
pub fn generate_request_id() -> Uuid {
    Uuid::new_v4()
}

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Round half away from zero to one decimal place
///
/// `f64::round` rounds half away from zero, which matches the scoring
/// contract (84.95 becomes 85.0, a tier boundary).
pub fn round_to_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
