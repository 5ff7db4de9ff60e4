//! Clock adapters.
//!
//! Production wiring uses [`skyroster_core::SystemClock`]; the manual clock
//! here exists so tests can pin and step time deterministically.

use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};

use skyroster_core::Clock;

/// Manually driven clock. Starts at a fixed instant and only moves when told
/// to, which makes `start_at`/`end_at` stamps assertable.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.guard() = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.guard();
        *now = *now + by;
    }

    fn guard(&self) -> MutexGuard<'_, DateTime<Utc>> {
        // A poisoned lock still holds a valid timestamp.
        self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.guard()
    }
}
