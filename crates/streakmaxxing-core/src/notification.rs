use serde::{Deserialize, Serialize};

use crate::export::format_timestamp;
use crate::streak::Streak;

/// Near-expiry notice for one streak.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakNotification {
    pub streak_id: String,
    pub title: String,
    pub message: String,
}

impl StreakNotification {
    /// Build the notice for a streak that is about to lapse.
    pub fn expiring(streak: &Streak) -> Self {
        Self {
            streak_id: streak.id().to_string(),
            title: format!("Streak '{}' is about to expire", streak.name()),
            message: format!(
                "Your streak expires at {}. Add time to keep it alive.",
                format_timestamp(streak.expires_at())
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn test_expiring_templates() {
        let at = Utc.with_ymd_and_hms(2026, 1, 1, 10, 0, 0).unwrap();
        let streak = Streak::new("Hydration", Duration::hours(12), at);

        let notice = StreakNotification::expiring(&streak);
        assert_eq!(notice.streak_id, streak.id().as_str());
        assert_eq!(notice.title, "Streak 'Hydration' is about to expire");
        assert_eq!(
            notice.message,
            "Your streak expires at 2026-01-01T22:00:00+00:00. Add time to keep it alive."
        );
    }

    #[test]
    fn test_wire_shape_is_flat() {
        let at = Utc.with_ymd_and_hms(2026, 1, 1, 10, 0, 0).unwrap();
        let streak = Streak::new("Hydration", Duration::hours(12), at);

        let notice = StreakNotification::expiring(&streak);
        let json = serde_json::to_value(notice).unwrap();
        let obj = json.as_object().unwrap();
        let mut keys: Vec<_> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["message", "streak_id", "title"]);
    }
}
