//! Thread-safe handle over a [`StreakService`].
//!
//! Mutations hold the write lock for the whole read-modify-write, reads share
//! the read lock, so no caller observes a half-updated streak. Returned
//! streaks are owned snapshots taken under the lock.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Duration, Utc};

use crate::error::Result;
use crate::export::StreakRecord;
use crate::notification::StreakNotification;
use crate::service::StreakService;
use crate::streak::{DurationParts, Streak};

#[derive(Clone, Debug)]
pub struct SharedStreakService {
    inner: Arc<RwLock<StreakService>>,
}

impl SharedStreakService {
    pub fn new(service: StreakService) -> Self {
        Self {
            inner: Arc::new(RwLock::new(service)),
        }
    }

    // Every mutation validates before writing, so a poisoned registry is
    // still consistent.
    fn read(&self) -> RwLockReadGuard<'_, StreakService> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StreakService> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_streak(&self, name: &str, expiry_window: Duration) -> Result<Streak> {
        self.write().add_streak(name, expiry_window).cloned()
    }

    pub fn list_streaks(&self) -> Vec<Streak> {
        self.read().list_streaks().into_iter().cloned().collect()
    }

    pub fn get_streak(&self, id: &str) -> Result<Streak> {
        self.read().get_streak(id).cloned()
    }

    pub fn add_to_streak(
        &self,
        id: &str,
        parts: DurationParts,
        now: Option<DateTime<Utc>>,
    ) -> Result<Streak> {
        self.write().add_to_streak(id, parts, now).cloned()
    }

    pub fn reset_streak(&self, id: &str, now: Option<DateTime<Utc>>) -> Result<Streak> {
        self.write().reset_streak(id, now).cloned()
    }

    pub fn notify_expiring_streaks(
        &self,
        window: Duration,
        now: Option<DateTime<Utc>>,
    ) -> Result<Vec<StreakNotification>> {
        self.read().notify_expiring_streaks(window, now)
    }

    pub fn notify_due_streaks(&self, now: Option<DateTime<Utc>>) -> Vec<StreakNotification> {
        self.read().notify_due_streaks(now)
    }

    pub fn export(&self) -> Vec<StreakRecord> {
        self.read().export()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

impl Default for SharedStreakService {
    fn default() -> Self {
        Self::new(StreakService::new())
    }
}

impl From<StreakService> for SharedStreakService {
    fn from(service: StreakService) -> Self {
        Self::new(service)
    }
}
