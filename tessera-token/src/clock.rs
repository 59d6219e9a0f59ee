//! Time sources for token generation and freshness checks.
//!
//! The codec never reads the system clock directly. It asks a [`Clock`], which
//! is injected at construction so tests can move time forward or backward
//! without sleeping and without touching any global state.

use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

/// A source of the current time.
///
/// Implementations must be safe to read from many threads at once.
pub trait Clock: Send + Sync {
    /// Current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl<F> Clock for F
where
    F: Fn() -> DateTime<Utc> + Send + Sync,
{
    #[inline]
    fn now(&self) -> DateTime<Utc> {
        self()
    }
}

/// A manually driven clock with millisecond resolution.
///
/// Share it through an `Arc` between the codec and the test that moves it.
///
/// ```rust
/// use std::sync::Arc;
/// use std::time::Duration;
/// use tessera_token::{Clock, MockClock};
///
/// let clock = Arc::new(MockClock::starting_now());
/// let before = clock.now();
/// clock.advance(Duration::from_secs(60));
/// assert_eq!((clock.now() - before).num_seconds(), 60);
/// ```
pub struct MockClock {
    millis: AtomicI64,
}

impl MockClock {
    /// Create a clock frozen at the given instant.
    pub fn new(at: DateTime<Utc>) -> Self {
        Self {
            millis: AtomicI64::new(at.timestamp_millis()),
        }
    }

    /// Create a clock frozen at the current system time.
    pub fn starting_now() -> Self {
        Self::new(Utc::now())
    }

    /// Jump to an absolute instant.
    pub fn set(&self, at: DateTime<Utc>) {
        self.millis.store(at.timestamp_millis(), Ordering::SeqCst);
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        self.millis.fetch_add(to_millis(by), Ordering::SeqCst);
    }

    /// Move the clock backward.
    pub fn rewind(&self, by: Duration) {
        self.millis.fetch_sub(to_millis(by), Ordering::SeqCst);
    }
}

impl Clock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        let millis = self.millis.load(Ordering::SeqCst);
        DateTime::from_timestamp_millis(millis).unwrap_or_default()
    }
}

impl fmt::Debug for MockClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockClock").field("now", &self.now()).finish()
    }
}

fn to_millis(d: Duration) -> i64 {
    i64::try_from(d.as_millis()).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_tracks_utc_now() {
        let before = Utc::now();
        let now = SystemClock.now();
        assert!(now >= before);
    }

    #[test]
    fn test_mock_clock_is_frozen() {
        let at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let clock = MockClock::new(at);
        assert_eq!(clock.now(), at);
        assert_eq!(clock.now(), at);
    }

    #[test]
    fn test_mock_clock_advance_and_rewind() {
        let at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let clock = MockClock::new(at);

        clock.advance(Duration::from_secs(20 * 60));
        assert_eq!(clock.now().timestamp(), 1_700_000_000 + 1200);

        clock.rewind(Duration::from_secs(1800));
        assert_eq!(clock.now().timestamp(), 1_700_000_000 - 600);

        clock.set(at);
        assert_eq!(clock.now(), at);
    }

    #[test]
    fn test_closure_clock() {
        let at = DateTime::from_timestamp(42, 0).unwrap();
        let clock = move || at;
        assert_eq!(Clock::now(&clock), at);
    }
}
