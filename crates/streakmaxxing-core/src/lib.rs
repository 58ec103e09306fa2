//! # Streakmaxxing Core Library
//!
//! Tracks streaks: named counters of accumulated duration that lapse once
//! their expiry window passes without an update.
//!
//! ## Architecture
//!
//! - **Streak**: the entity and its time-decay model. Every time-dependent
//!   method takes `now` explicitly.
//! - **Service**: an in-memory registry that validates input, falls back to an
//!   injected [`Clock`] when callers omit `now`, and scans for streaks that are
//!   about to lapse
//! - **Shared**: a lock-guarded handle for use across threads
//!
//! ## Key Components
//!
//! - [`Streak`]: a single streak
//! - [`StreakService`]: registry and notification scan
//! - [`SharedStreakService`]: thread-safe wrapper returning snapshots
//! - [`StreakConfig`]: TOML-backed service defaults
//!
//! Persistence, scheduling and presentation are left to callers; the wire
//! shapes they need are [`StreakRecord`] and [`StreakNotification`].

pub mod clock;
pub mod config;
pub mod error;
pub mod export;
pub mod notification;
pub mod service;
pub mod shared;
pub mod streak;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{DefaultsConfig, StreakConfig};
pub use error::{ConfigError, StreakError};
pub use export::StreakRecord;
pub use notification::StreakNotification;
pub use service::StreakService;
pub use shared::SharedStreakService;
pub use streak::{DurationParts, Streak, StreakId};
