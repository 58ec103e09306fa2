//! The streak entity and its time-decay model.
//!
//! A streak accumulates duration and lapses once `expiry_window` has passed
//! since its last update. The entity never reads a clock: every
//! time-dependent method takes `now` from the caller.

use std::borrow::Borrow;
use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, StreakError};

/// Default lead time for expiry warnings (2 hours).
pub const DEFAULT_NOTIFY_BEFORE_SECS: i64 = 2 * 60 * 60;

/// Opaque streak identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StreakId(String);

impl StreakId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StreakId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for StreakId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for StreakId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A single streak tracked by the system.
#[derive(Debug, Clone, PartialEq)]
pub struct Streak {
    id: StreakId,
    name: String,
    expiry_window: Duration,
    value: Duration,
    created_at: DateTime<Utc>,
    last_updated_at: DateTime<Utc>,
    notify_before: Duration,
}

impl Streak {
    /// Create a streak with zero value and the default notify-before lead time.
    ///
    /// The name and expiry window are not validated here; the service checks
    /// them before constructing.
    pub fn new(name: impl Into<String>, expiry_window: Duration, now: DateTime<Utc>) -> Self {
        Self {
            id: StreakId::generate(),
            name: name.into(),
            expiry_window,
            value: Duration::zero(),
            created_at: now,
            last_updated_at: now,
            notify_before: Duration::seconds(DEFAULT_NOTIFY_BEFORE_SECS),
        }
    }

    /// Create a streak with an explicit starting value and notify-before lead time.
    ///
    /// # Errors
    ///
    /// Returns [`StreakError::InvalidArgument`] if `notify_before` is not
    /// positive or `value` is negative.
    pub fn with_settings(
        name: impl Into<String>,
        expiry_window: Duration,
        value: Duration,
        notify_before: Duration,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        if notify_before <= Duration::zero() {
            return Err(StreakError::invalid(
                "notify_before",
                "notify_before must be positive",
            ));
        }
        if value < Duration::zero() {
            return Err(StreakError::invalid("value", "value cannot be negative"));
        }

        let mut streak = Self::new(name, expiry_window, now);
        streak.value = value;
        streak.notify_before = notify_before;
        Ok(streak)
    }

    pub fn id(&self) -> &StreakId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn expiry_window(&self) -> Duration {
        self.expiry_window
    }

    /// Accumulated streak length.
    pub fn value(&self) -> Duration {
        self.value
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_updated_at(&self) -> DateTime<Utc> {
        self.last_updated_at
    }

    pub fn notify_before(&self) -> Duration {
        self.notify_before
    }

    /// Add time to the streak and refresh its update timestamp.
    ///
    /// `now` is trusted as given: an instant earlier than the current
    /// `last_updated_at` moves the expiry deadline backwards.
    ///
    /// # Errors
    ///
    /// Returns [`StreakError::InvalidArgument`] if `amount` is not positive or
    /// the new value would overflow. The streak is unchanged on error.
    pub fn add_time(&mut self, amount: Duration, now: DateTime<Utc>) -> Result<()> {
        if amount <= Duration::zero() {
            return Err(StreakError::invalid("amount", "amount must be positive"));
        }
        let Some(value) = self.value.checked_add(&amount) else {
            return Err(StreakError::invalid(
                "amount",
                "amount overflows streak value",
            ));
        };

        self.value = value;
        self.last_updated_at = now;
        Ok(())
    }

    /// Reset the streak value to zero.
    pub fn reset(&mut self, now: DateTime<Utc>) {
        self.value = Duration::zero();
        self.last_updated_at = now;
    }

    /// When the streak lapses if it is not updated again.
    ///
    /// Saturates at the latest representable instant, or the earliest one
    /// for a negative window.
    pub fn expires_at(&self) -> DateTime<Utc> {
        let bound = if self.expiry_window < Duration::zero() {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        };
        self.last_updated_at
            .checked_add_signed(self.expiry_window)
            .unwrap_or(bound)
    }

    /// Signed time left until expiry; negative once lapsed.
    pub fn time_to_expiry(&self, now: DateTime<Utc>) -> Duration {
        self.expires_at().signed_duration_since(now)
    }

    /// True once the expiry deadline has passed.
    pub fn is_lapsed(&self, now: DateTime<Utc>) -> bool {
        self.expires_at() < now
    }

    /// True when the streak expires within `window` from `now`.
    ///
    /// A streak that has already lapsed is not "expiring within" any window.
    ///
    /// # Errors
    ///
    /// Returns [`StreakError::InvalidArgument`] if `window` is negative.
    pub fn is_expiring_within(&self, window: Duration, now: DateTime<Utc>) -> Result<bool> {
        if window < Duration::zero() {
            return Err(StreakError::invalid("window", "window cannot be negative"));
        }
        Ok(self.expiring_within_unchecked(window, now))
    }

    /// True when the streak expires within its own notify-before lead time.
    pub fn is_due_for_notice(&self, now: DateTime<Utc>) -> bool {
        self.expiring_within_unchecked(self.notify_before, now)
    }

    pub(crate) fn expiring_within_unchecked(&self, window: Duration, now: DateTime<Utc>) -> bool {
        let remaining = self.time_to_expiry(now);
        remaining >= Duration::zero() && remaining <= window
    }
}
