//! Rate limiter state and decisions.

use chrono::{DateTime, Utc};

/// Request counter for one identifier within its current window
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitEntry {
    pub identifier: String,
    pub count: u32,
    pub window_reset_time: DateTime<Utc>,
}

impl RateLimitEntry {
    /// Start a fresh window ending at `window_reset_time`
    pub fn new(identifier: impl Into<String>, window_reset_time: DateTime<Utc>) -> Self {
        Self {
            identifier: identifier.into(),
            count: 0,
            window_reset_time,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.window_reset_time
    }
}

/// Outcome of a rate-limit check
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    pub reset_at: DateTime<Utc>,
    /// Whole seconds until the window resets; set only on rejection
    pub retry_after_secs: Option<u64>,
}

impl RateLimitDecision {
    /// Informational headers for the caller
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = vec![
            ("X-RateLimit-Limit", self.limit.to_string()),
            ("X-RateLimit-Remaining", self.remaining.to_string()),
            ("X-RateLimit-Reset", self.reset_at.timestamp().to_string()),
        ];

        if let Some(retry_after) = self.retry_after_secs {
            headers.push(("Retry-After", retry_after.to_string()));
        }

        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_entry_expiry_is_inclusive() {
        let reset = Utc.with_ymd_and_hms(2026, 1, 1, 0, 1, 0).unwrap();
        let entry = RateLimitEntry::new("ip:1.2.3.4", reset);

        assert!(!entry.is_expired(reset - chrono::Duration::milliseconds(1)));
        assert!(entry.is_expired(reset));
    }

    #[test]
    fn test_rejection_headers_include_retry_after() {
        let reset = Utc.with_ymd_and_hms(2026, 1, 1, 0, 1, 0).unwrap();
        let decision = RateLimitDecision {
            allowed: false,
            limit: 5,
            remaining: 0,
            reset_at: reset,
            retry_after_secs: Some(42),
        };

        let headers = decision.headers();
        assert!(headers.contains(&("Retry-After", "42".to_string())));
        assert!(headers.contains(&("X-RateLimit-Remaining", "0".to_string())));
        assert!(headers.contains(&("X-RateLimit-Reset", reset.timestamp().to_string())));
    }
}
