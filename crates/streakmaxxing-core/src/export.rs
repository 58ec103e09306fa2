//! Serializable streak records for external consumers.
//!
//! Durations cross the boundary as whole seconds and timestamps as RFC 3339
//! strings with an explicit UTC offset.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::streak::Streak;

/// Flat export shape of one streak.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakRecord {
    pub id: String,
    pub name: String,
    /// Seconds
    pub expiry_window: i64,
    /// Seconds
    pub value: i64,
    pub created_at: String,
    pub last_updated_at: String,
    /// Seconds
    pub notify_before: i64,
}

impl From<&Streak> for StreakRecord {
    fn from(streak: &Streak) -> Self {
        Self {
            id: streak.id().to_string(),
            name: streak.name().to_string(),
            expiry_window: whole_seconds(streak.expiry_window()),
            value: whole_seconds(streak.value()),
            created_at: format_timestamp(streak.created_at()),
            last_updated_at: format_timestamp(streak.last_updated_at()),
            notify_before: whole_seconds(streak.notify_before()),
        }
    }
}

/// Round a duration to the nearest whole second, half away from zero.
pub fn whole_seconds(duration: Duration) -> i64 {
    let secs = duration.num_seconds();
    let nanos = duration.subsec_nanos();
    if nanos >= 500_000_000 {
        secs.saturating_add(1)
    } else if nanos <= -500_000_000 {
        secs.saturating_sub(1)
    } else {
        secs
    }
}

/// Render an instant as RFC 3339 with a `+00:00` offset.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}
