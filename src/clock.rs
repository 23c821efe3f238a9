//! Clock abstraction for import timestamps
//!
//! Importing stamps each layer with the current time. Hosts use
//! [`SystemClock`]; tests pin the time with [`FixedClock`].
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use cura_profile::clock::{Clock, FixedClock};
//!
//! let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
//! let clock = FixedClock::new(at);
//! assert_eq!(clock.now(), at);
//! ```

use chrono::{DateTime, Utc};

/// Source of the current instant.
pub trait Clock: Send + Sync {
    /// Current time in UTC
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that always reports the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    at: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self { at }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.at
    }
}
