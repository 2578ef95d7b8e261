//! Timestamps embedded in tool payloads and HTTP responses

use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Source of "now", injectable so payloads can be compared in tests.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

pub fn system_clock() -> Clock {
    Arc::new(Utc::now)
}

/// A clock frozen at `at`
pub fn fixed_clock(at: DateTime<Utc>) -> Clock {
    Arc::new(move || at)
}

/// UTC timestamp with microseconds and a `Z` suffix, e.g. `2026-02-14T10:20:00.000000Z`
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}
