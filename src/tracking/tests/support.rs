//! Shared fixtures for tracking unit tests.

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use std::sync::Mutex;

use crate::tracking::domain::TaskDetails;

/// Clock that only moves when a test advances it.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Creates a clock pinned to the given instant.
    pub fn starting_at(instant: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(instant),
        }
    }

    /// Creates a clock pinned to the shared test epoch.
    pub fn at_epoch() -> Self {
        Self::starting_at(test_epoch())
    }

    /// Moves the clock forward by whole minutes.
    pub fn advance_minutes(&self, minutes: i64) {
        let mut now = self.now.lock().expect("clock lock poisoned");
        *now += Duration::minutes(minutes);
    }

    /// Moves the clock forward by whole seconds.
    pub fn advance_seconds(&self, seconds: i64) {
        let mut now = self.now.lock().expect("clock lock poisoned");
        *now += Duration::seconds(seconds);
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock poisoned")
    }
}

/// Fixed instant all manual clocks start from.
pub fn test_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0)
        .single()
        .expect("valid test epoch")
}

/// Minimal valid task details for tests that do not care about the fields.
pub fn sample_details(title: &str, department: &str) -> TaskDetails {
    TaskDetails::new(
        title,
        "exercise the tracking core",
        chrono::NaiveDate::from_ymd_opt(2026, 3, 31).expect("valid deadline"),
        department,
        90,
    )
}
