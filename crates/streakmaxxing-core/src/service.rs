//! In-memory streak registry.
//!
//! [`StreakService`] owns every [`Streak`], validates caller input, resolves the
//! effective `now` from its injected [`Clock`], and derives expiry
//! notifications by scanning the registry. Streaks live for the lifetime of
//! the service; there is no delete.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use indexmap::IndexMap;

use crate::clock::{Clock, SystemClock};
use crate::config::StreakConfig;
use crate::error::{Result, StreakError};
use crate::export::StreakRecord;
use crate::notification::StreakNotification;
use crate::streak::{DurationParts, Streak, StreakId};

/// Registry of streaks keyed by id, in insertion order.
pub struct StreakService {
    streaks: IndexMap<StreakId, Streak>,
    clock: Arc<dyn Clock>,
    config: StreakConfig,
}

impl StreakService {
    /// Create an empty service on the system clock with default configuration.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self::with_config(StreakConfig::default(), clock)
    }

    pub fn with_config(config: StreakConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            streaks: IndexMap::new(),
            clock,
            config,
        }
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn config(&self) -> &StreakConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.streaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streaks.is_empty()
    }

    fn resolve_now(&self, now: Option<DateTime<Utc>>) -> DateTime<Utc> {
        now.unwrap_or_else(|| self.clock.now())
    }

    /// Create and register a new streak.
    ///
    /// The name is trimmed; the streak starts at zero with the configured
    /// notify-before lead time.
    ///
    /// # Errors
    ///
    /// Returns [`StreakError::InvalidArgument`] if the trimmed name is empty or
    /// `expiry_window` is not positive.
    pub fn add_streak(&mut self, name: &str, expiry_window: Duration) -> Result<&Streak> {
        let name = name.trim();
        if name.is_empty() {
            tracing::warn!("Rejected streak with empty name");
            return Err(StreakError::invalid("name", "name is required"));
        }
        if expiry_window <= Duration::zero() {
            tracing::warn!("Rejected streak '{}' with non-positive expiry window", name);
            return Err(StreakError::invalid(
                "expiry_window",
                "expiry_window must be positive",
            ));
        }

        let streak = Streak::with_settings(
            name,
            expiry_window,
            Duration::zero(),
            self.config.notify_before(),
            self.clock.now(),
        )?;
        let id = streak.id().clone();
        tracing::info!(streak_id = %id, "Created streak '{}'", name);

        let (index, _) = self.streaks.insert_full(id, streak);
        Ok(&self.streaks[index])
    }

    /// All streaks, in creation order.
    pub fn list_streaks(&self) -> Vec<&Streak> {
        self.streaks.values().collect()
    }

    /// Look up one streak by id.
    ///
    /// # Errors
    ///
    /// Returns [`StreakError::NotFound`] if no streak has this id.
    pub fn get_streak(&self, id: &str) -> Result<&Streak> {
        self.streaks
            .get(id)
            .ok_or_else(|| StreakError::NotFound(id.to_string()))
    }

    fn get_streak_mut(&mut self, id: &str) -> Result<&mut Streak> {
        self.streaks
            .get_mut(id)
            .ok_or_else(|| StreakError::NotFound(id.to_string()))
    }

    /// Add a custom amount of time to a streak.
    ///
    /// # Errors
    ///
    /// Returns [`StreakError::NotFound`] for an unknown id, and
    /// [`StreakError::InvalidArgument`] if the composed amount is not positive.
    pub fn add_to_streak(
        &mut self,
        id: &str,
        parts: DurationParts,
        now: Option<DateTime<Utc>>,
    ) -> Result<&Streak> {
        let amount = parts.to_duration()?;
        let at = self.resolve_now(now);
        let streak = self.get_streak_mut(id)?;
        streak.add_time(amount, at)?;

        tracing::debug!(
            streak_id = %id,
            "Added {}s to streak, value now {}s",
            amount.num_seconds(),
            streak.value().num_seconds()
        );
        Ok(&*streak)
    }

    /// Reset a streak to zero.
    ///
    /// # Errors
    ///
    /// Returns [`StreakError::NotFound`] for an unknown id.
    pub fn reset_streak(&mut self, id: &str, now: Option<DateTime<Utc>>) -> Result<&Streak> {
        let at = self.resolve_now(now);
        let streak = self.get_streak_mut(id)?;
        streak.reset(at);

        tracing::debug!(streak_id = %id, "Reset streak");
        Ok(&*streak)
    }

    /// Notices for every streak that lapses within `window` from `now`.
    ///
    /// # Errors
    ///
    /// Returns [`StreakError::InvalidArgument`] if `window` is negative,
    /// before any streak is examined.
    pub fn notify_expiring_streaks(
        &self,
        window: Duration,
        now: Option<DateTime<Utc>>,
    ) -> Result<Vec<StreakNotification>> {
        if window < Duration::zero() {
            return Err(StreakError::invalid("window", "window cannot be negative"));
        }
        let at = self.resolve_now(now);

        let expiring = |streak: &Streak| streak.expiring_within_unchecked(window, at);
        let notifications = self.collect_notifications(expiring);
        tracing::debug!(
            "Expiry scan over {} streaks (window {}s) produced {} notifications",
            self.streaks.len(),
            window.num_seconds(),
            notifications.len()
        );
        Ok(notifications)
    }

    /// Notices for every streak that lapses within its own notify-before
    /// lead time.
    pub fn notify_due_streaks(&self, now: Option<DateTime<Utc>>) -> Vec<StreakNotification> {
        let at = self.resolve_now(now);

        let due = |streak: &Streak| streak.is_due_for_notice(at);
        let notifications = self.collect_notifications(due);
        tracing::debug!(
            "Due scan over {} streaks produced {} notifications",
            self.streaks.len(),
            notifications.len()
        );
        notifications
    }

    fn collect_notifications<F>(&self, mut matches: F) -> Vec<StreakNotification>
    where
        F: FnMut(&Streak) -> bool,
    {
        self.streaks
            .values()
            .filter(|streak| matches(*streak))
            .map(StreakNotification::expiring)
            .collect()
    }

    /// Serializable representation of all streaks.
    pub fn export(&self) -> Vec<StreakRecord> {
        self.streaks.values().map(StreakRecord::from).collect()
    }
}

impl Default for StreakService {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StreakService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreakService")
            .field("streaks", &self.streaks)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
