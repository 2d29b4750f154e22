mod rate_entry;

pub use rate_entry::{RateDecision, RateEntry};
