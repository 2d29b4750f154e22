use chrono::{DateTime, Utc};

/// Counter state for one client within the current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateEntry {
    pub count: u32,
    pub reset_at: DateTime<Utc>,
}

/// Outcome of a rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateDecision {
    pub allowed: bool,
    /// Whole seconds until the window resets; set only on denial.
    pub retry_after_secs: Option<u64>,
}

impl RateDecision {
    pub fn allowed() -> Self {
        Self {
            allowed: true,
            retry_after_secs: None,
        }
    }

    pub fn denied(retry_after_secs: u64) -> Self {
        Self {
            allowed: false,
            retry_after_secs: Some(retry_after_secs),
        }
    }
}
