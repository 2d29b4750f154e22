use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

use crate::features::rate_limits::models::{RateDecision, RateEntry};

/// Storage backend for rate-limit counters.
///
/// `check_and_count` owns the whole read-modify-write: an implementation
/// must decide and count in one atomic step for its medium (a single mutex
/// critical section here, a transaction or script for a shared store).
/// Splitting the decision into separate get/increment calls would let two
/// concurrent requests observe the same count and both be admitted.
pub trait RateLimitStore: Send + Sync {
    /// Count one request for `key` against the window containing `now`.
    ///
    /// Creates or replaces the entry with `count = 1` when none exists or
    /// the stored window has expired; otherwise increments while the count
    /// is below `max_requests` and denies beyond it.
    fn check_and_count(
        &self,
        key: &str,
        now: DateTime<Utc>,
        max_requests: u32,
        window: Duration,
    ) -> RateDecision;
}

/// Process-local store guarding the counter map with a mutex.
///
/// Entries persist for the process lifetime; there is no expiry sweep.
#[derive(Default)]
pub struct InMemoryRateLimitStore {
    entries: Mutex<HashMap<String, RateEntry>>,
}

impl InMemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RateLimitStore for InMemoryRateLimitStore {
    fn check_and_count(
        &self,
        key: &str,
        now: DateTime<Utc>,
        max_requests: u32,
        window: Duration,
    ) -> RateDecision {
        let mut entries = self.entries.lock().expect("rate limit store poisoned");

        match entries.get_mut(key) {
            Some(entry) if now < entry.reset_at => {
                if entry.count < max_requests {
                    entry.count += 1;
                    RateDecision::allowed()
                } else {
                    let remaining_ms = (entry.reset_at - now).num_milliseconds();
                    RateDecision::denied(((remaining_ms + 999) / 1000) as u64)
                }
            }
            // First request from this key, or the stored window has expired
            _ => {
                entries.insert(
                    key.to_string(),
                    RateEntry {
                        count: 1,
                        reset_at: now + window,
                    },
                );
                RateDecision::allowed()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_counts_up_to_the_limit_within_one_window() {
        let store = InMemoryRateLimitStore::new();
        let window = Duration::seconds(60);

        for _ in 0..3 {
            assert!(store.check_and_count("1.2.3.4", t0(), 3, window).allowed);
        }

        let denied = store.check_and_count("1.2.3.4", t0(), 3, window);
        assert!(!denied.allowed);
        assert_eq!(denied.retry_after_secs, Some(60));
    }

    #[test]
    fn test_expired_window_is_replaced() {
        let store = InMemoryRateLimitStore::new();
        let window = Duration::seconds(60);

        assert!(store.check_and_count("1.2.3.4", t0(), 1, window).allowed);
        assert!(!store.check_and_count("1.2.3.4", t0(), 1, window).allowed);

        let next_window = t0() + Duration::seconds(60);
        assert!(store
            .check_and_count("1.2.3.4", next_window, 1, window)
            .allowed);
    }

    #[test]
    fn test_concurrent_requests_never_exceed_the_limit() {
        use std::sync::Arc;

        let store = Arc::new(InMemoryRateLimitStore::new());
        let window = Duration::seconds(60);
        let now = t0();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    (0..10)
                        .filter(|_| store.check_and_count("1.2.3.4", now, 20, window).allowed)
                        .count()
                })
            })
            .collect();

        let admitted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(admitted, 20);
    }
}
