//! Time source abstraction
//!
//! Cool-down bookkeeping and cache expiry need a clock that tests can control,
//! so all time access in the crate goes through the `Clock` trait instead of
//! calling `Instant::now()` directly.

use std::time::Instant;

/// Trait for reading the current time.
///
/// Production code uses [`SystemClock`]; tests drive a manually advanced clock
/// to exercise cool-down expiry without sleeping.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> Instant;
}

/// The real wall clock.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Clock;
    use parking_lot::Mutex;
    use std::time::{Duration, Instant};

    /// A clock that only moves when told to.
    pub(crate) struct ManualClock {
        origin: Instant,
        offset: Mutex<Duration>,
    }

    impl ManualClock {
        pub fn new() -> Self {
            Self {
                origin: Instant::now(),
                offset: Mutex::new(Duration::ZERO),
            }
        }

        /// Advances the clock by the given duration.
        pub fn advance(&self, by: Duration) {
            *self.offset.lock() += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            self.origin + *self.offset.lock()
        }
    }
}
