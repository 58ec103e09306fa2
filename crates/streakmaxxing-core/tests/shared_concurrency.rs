//! Concurrency tests for the shared streak service.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use chrono::{DateTime, Duration, TimeZone, Utc};
use streakmaxxing_core::{Clock, DurationParts, ManualClock, SharedStreakService, StreakService};

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 10, 0, 0).unwrap()
}

/// Clock that moves forward one minute every time it is read.
struct TickingClock {
    inner: ManualClock,
}

impl TickingClock {
    fn new(start: DateTime<Utc>) -> Self {
        Self {
            inner: ManualClock::new(start),
        }
    }
}

impl Clock for TickingClock {
    fn now(&self) -> DateTime<Utc> {
        self.inner.advance(Duration::minutes(1)) - Duration::minutes(1)
    }
}

#[test]
fn test_concurrent_creation_yields_unique_ids() {
    let shared = SharedStreakService::default();

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let shared = shared.clone();
            thread::spawn(move || {
                (0..25)
                    .map(|i| {
                        shared
                            .add_streak(&format!("w{worker}-{i}"), Duration::days(1))
                            .unwrap()
                            .id()
                            .clone()
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        for id in handle.join().unwrap() {
            assert!(ids.insert(id));
        }
    }

    assert_eq!(ids.len(), 200);
    assert_eq!(shared.len(), 200);
    assert_eq!(shared.list_streaks().len(), 200);
}

#[test]
fn test_concurrent_adds_sum_exactly() {
    let clock = Arc::new(TickingClock::new(base_time()));
    let shared = SharedStreakService::new(StreakService::with_clock(clock));
    let id = shared
        .add_streak("Practice", Duration::days(1))
        .unwrap()
        .id()
        .to_string();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let shared = shared.clone();
            let id = id.clone();
            thread::spawn(move || {
                for _ in 0..50 {
                    shared
                        .add_to_streak(&id, DurationParts::minutes(1), None)
                        .unwrap();
                }
            })
        })
        .collect();

    // Every add reads the clock once under the lock, so the value and the
    // update stamp must always move together.
    let readers: Vec<_> = (0..2)
        .map(|_| {
            let shared = shared.clone();
            let id = id.clone();
            thread::spawn(move || {
                for _ in 0..200 {
                    let streak = shared.get_streak(&id).unwrap();
                    let elapsed = streak.last_updated_at() - streak.created_at();
                    assert_eq!(elapsed, streak.value());
                }
            })
        })
        .collect();

    for handle in handles.into_iter().chain(readers) {
        handle.join().unwrap();
    }

    let streak = shared.get_streak(&id).unwrap();
    assert_eq!(streak.value(), Duration::minutes(400));
    let expected = base_time() + Duration::minutes(400);
    assert_eq!(streak.last_updated_at(), expected);
}

#[test]
fn test_shared_notifications_and_export() {
    let shared = SharedStreakService::default();
    let streak = shared.add_streak("Hydration", Duration::hours(12)).unwrap();
    let id = streak.id().as_str();
    let hour = DurationParts::hours(1);
    shared.add_to_streak(id, hour, Some(base_time())).unwrap();

    let at = base_time() + Duration::hours(10) + Duration::minutes(30);
    let notices = shared
        .notify_expiring_streaks(Duration::hours(2), Some(at))
        .unwrap();
    assert_eq!(notices.len(), 1);
    assert_eq!(shared.notify_due_streaks(Some(at)), notices);

    let err = shared
        .notify_expiring_streaks(Duration::hours(-2), None)
        .unwrap_err();
    assert!(err.is_invalid_argument());
    let err = shared.get_streak("missing").unwrap_err();
    assert!(err.is_not_found());

    let reset = shared.reset_streak(id, Some(base_time())).unwrap();
    assert_eq!(reset.value(), Duration::zero());
    assert_eq!(shared.export()[0].value, 0);
}
