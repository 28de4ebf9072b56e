use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

/// Source of the current time for token issuance and expiry checks.
pub trait Clock: Send + Sync + 'static {
    /// Current instant in UTC.
    fn now(&self) -> DateTime<Utc>;

    /// Current instant as a Unix timestamp in seconds.
    fn timestamp(&self) -> i64 {
        self.now().timestamp()
    }
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock with second precision.
///
/// Starts at a fixed instant and only moves when told to. Lets tests walk a
/// token past its expiry without sleeping.
#[derive(Debug)]
pub struct ManualClock {
    seconds: AtomicI64,
}

impl ManualClock {
    /// Create a clock frozen at the given instant.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            seconds: AtomicI64::new(start.timestamp()),
        }
    }

    /// Create a clock frozen at the current wall-clock second.
    pub fn starting_now() -> Self {
        Self::new(Utc::now())
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        self.seconds.fetch_add(by.num_seconds(), Ordering::SeqCst);
    }

    /// Jump to an absolute instant.
    pub fn set(&self, to: DateTime<Utc>) {
        self.seconds.store(to.timestamp(), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.seconds.load(Ordering::SeqCst), 0).unwrap_or_default()
    }

    fn timestamp(&self) -> i64 {
        self.seconds.load(Ordering::SeqCst)
    }
}
