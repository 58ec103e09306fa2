mod amount;
mod entity;

pub use amount::DurationParts;
pub use entity::{Streak, StreakId, DEFAULT_NOTIFY_BEFORE_SECS};
