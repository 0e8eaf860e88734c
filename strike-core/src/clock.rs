use std::sync::atomic::{AtomicU64, Ordering};

/// Number of seconds in one day
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Number of seconds in one week
pub const SECONDS_PER_WEEK: u64 = 7 * SECONDS_PER_DAY;

/// Source of the current time for the engine
///
/// All expiry and window checks compare against an injected clock rather
/// than ambient host time, so the temporal logic can be driven
/// deterministically in tests.
pub trait Clock: Send + Sync {
    /// Current time as a Unix timestamp in seconds
    fn now(&self) -> u64;
}

/// Clock backed by the host's wall clock
#[derive(Debug, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        SystemClock
    }
}

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        let now = chrono::Utc::now().timestamp();
        // timestamp() is negative only before the epoch
        now.max(0) as u64
    }
}

/// Manually driven clock for testing
///
/// Starts at a fixed instant and only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    /// Create a clock pinned at the given timestamp
    pub fn new(start: u64) -> Self {
        Self {
            now: AtomicU64::new(start),
        }
    }

    /// Move the clock forward by `seconds`
    pub fn advance(&self, seconds: u64) {
        self.now.fetch_add(seconds, Ordering::SeqCst);
    }

    /// Pin the clock to an absolute timestamp
    pub fn set(&self, timestamp: u64) {
        self.now.store(timestamp, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}
