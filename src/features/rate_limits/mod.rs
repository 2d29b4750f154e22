//! Fixed-window rate limiting for the conversion endpoint.
//!
//! Counters are process-local and keyed by the caller-derived client id.
//! Entries are created lazily, replaced when their window expires and never
//! swept; a multi-instance deployment needs an external `RateLimitStore`
//! implementation.

pub mod models;
pub mod services;

pub use services::{InMemoryRateLimitStore, RateLimitService, RateLimitStore};
