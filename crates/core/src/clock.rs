//! Time source abstraction.

use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Source of the current wall-clock time.
///
/// Assignment timestamps (`start_at`, `end_at`) are always taken from a
/// `Clock`, never from `Utc::now()` directly, so ledger behavior stays
/// deterministic under test.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;
}

/// System wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl<C> Clock for Arc<C>
where
    C: Clock + ?Sized,
{
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}
