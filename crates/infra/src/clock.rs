//! System clock adapter

use chrono::{DateTime, Local, NaiveDate, Utc};
use tabguard_core::ports::Clock;

/// Wall-clock time source. Daily records are keyed by the *local* calendar
/// date so "today" matches what the user sees.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
