mod rate_limit_service;
mod rate_limit_store;

pub use rate_limit_service::RateLimitService;
pub use rate_limit_store::{InMemoryRateLimitStore, RateLimitStore};
