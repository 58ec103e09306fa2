use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StreakError};

/// Component counts composed into a single amount of streak time.
///
/// Components may be negative; only the composed total is checked, by
/// [`Streak::add_time`](super::Streak::add_time).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationParts {
    #[serde(default)]
    pub weeks: i64,
    #[serde(default)]
    pub days: i64,
    #[serde(default)]
    pub hours: i64,
    #[serde(default)]
    pub minutes: i64,
}

impl DurationParts {
    pub fn weeks(weeks: i64) -> Self {
        Self {
            weeks,
            ..Self::default()
        }
    }

    pub fn days(days: i64) -> Self {
        Self {
            days,
            ..Self::default()
        }
    }

    pub fn hours(hours: i64) -> Self {
        Self {
            hours,
            ..Self::default()
        }
    }

    pub fn minutes(minutes: i64) -> Self {
        Self {
            minutes,
            ..Self::default()
        }
    }

    /// Compose the components into one duration.
    ///
    /// # Errors
    ///
    /// Returns [`StreakError::InvalidArgument`] if any component or the sum
    /// falls outside the representable duration range.
    pub fn to_duration(&self) -> Result<Duration> {
        let overflow = || StreakError::invalid("amount", "duration components out of range");

        let parts = [
            Duration::try_weeks(self.weeks),
            Duration::try_days(self.days),
            Duration::try_hours(self.hours),
            Duration::try_minutes(self.minutes),
        ];

        parts.into_iter().try_fold(Duration::zero(), |total, part| {
            let part = part.ok_or_else(overflow)?;
            total.checked_add(&part).ok_or_else(overflow)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_all_components() {
        let parts = DurationParts {
            weeks: 1,
            days: 2,
            hours: 3,
            minutes: 4,
        };
        let expected = Duration::minutes(((7 + 2) * 24 + 3) * 60 + 4);
        assert_eq!(parts.to_duration().unwrap(), expected);
    }

    #[test]
    fn test_default_is_zero() {
        let total = DurationParts::default().to_duration().unwrap();
        assert_eq!(total, Duration::zero());
    }

    #[test]
    fn test_negative_components_net_out() {
        let parts = DurationParts {
            days: 1,
            hours: -30,
            ..Default::default()
        };
        assert_eq!(parts.to_duration().unwrap(), Duration::hours(-6));
    }

    #[test]
    fn test_out_of_range_component() {
        let err = DurationParts::weeks(i64::MAX).to_duration().unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_deserialize_with_missing_fields() {
        let parts: DurationParts = serde_json::from_str(r#"{"hours": 2}"#).unwrap();
        assert_eq!(parts, DurationParts::hours(2));
    }
}
