use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::core::config::RateLimitConfig;
use crate::features::rate_limits::models::RateDecision;
use crate::features::rate_limits::services::{InMemoryRateLimitStore, RateLimitStore};

/// Service enforcing a fixed-window request quota per client key.
///
/// The window is anchored at the first request: the entry is created with
/// `reset_at = now + window` and replaced wholesale once that instant has
/// passed. Requests beyond the limit are denied until the window rolls over.
/// Deciding and counting happen in one atomic store operation, so concurrent
/// requests for the same key cannot be over-admitted.
pub struct RateLimitService {
    store: Arc<dyn RateLimitStore>,
    max_requests: u32,
    window: Duration,
}

impl RateLimitService {
    pub fn new(config: RateLimitConfig) -> Self {
        Self::with_store(Arc::new(InMemoryRateLimitStore::new()), config)
    }

    pub fn with_store(store: Arc<dyn RateLimitStore>, config: RateLimitConfig) -> Self {
        Self {
            store,
            max_requests: config.max_requests,
            window: Duration::seconds(config.window_secs as i64),
        }
    }

    /// Check and count a request for `key` against the current window.
    pub fn check(&self, key: &str) -> RateDecision {
        self.check_at(key, Utc::now())
    }

    /// Deterministic-time variant of [`check`](Self::check).
    pub fn check_at(&self, key: &str, now: DateTime<Utc>) -> RateDecision {
        let decision = self
            .store
            .check_and_count(key, now, self.max_requests, self.window);

        if let Some(retry_after_secs) = decision.retry_after_secs {
            tracing::debug!(
                "Rate limit exceeded for key={}, retry after {}s",
                key,
                retry_after_secs
            );
        }

        decision
    }
}
