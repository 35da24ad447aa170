//! Rate limiting configuration and named presets.

use std::fmt;

use chrono::Duration;

/// Window length and quota for one rate-limited bucket
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub window_duration_ms: u64,
    pub max_requests_per_window: u32,
}

impl RateLimitConfig {
    pub const fn new(window_duration_ms: u64, max_requests_per_window: u32) -> Self {
        Self {
            window_duration_ms,
            max_requests_per_window,
        }
    }

    /// `max_requests` per minute
    pub const fn per_minute(max_requests: u32) -> Self {
        Self::new(60_000, max_requests)
    }

    pub fn window(&self) -> Duration {
        i64::try_from(self.window_duration_ms)
            .ok()
            .and_then(Duration::try_milliseconds)
            .unwrap_or(Duration::MAX)
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        RateLimitPreset::Standard.config()
    }
}

/// Named configurations chosen by endpoint sensitivity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RateLimitPreset {
    /// Authentication and 2FA endpoints
    Strict,
    Standard,
    /// Cheap read-only endpoints
    Relaxed,
    /// Endpoints that fan out to AI providers
    Ai,
}

impl RateLimitPreset {
    pub const ALL: [RateLimitPreset; 4] = [
        RateLimitPreset::Strict,
        RateLimitPreset::Standard,
        RateLimitPreset::Relaxed,
        RateLimitPreset::Ai,
    ];

    pub const fn config(self) -> RateLimitConfig {
        match self {
            RateLimitPreset::Strict => RateLimitConfig::per_minute(5),
            RateLimitPreset::Standard => RateLimitConfig::per_minute(30),
            RateLimitPreset::Relaxed => RateLimitConfig::per_minute(100),
            RateLimitPreset::Ai => RateLimitConfig::per_minute(10),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            RateLimitPreset::Strict => "strict",
            RateLimitPreset::Standard => "standard",
            RateLimitPreset::Relaxed => "relaxed",
            RateLimitPreset::Ai => "ai",
        }
    }

    /// Store key for a caller under this preset; presets never share quota
    pub fn bucket_key(self, identifier: &str) -> String {
        format!("{}:{}", self.name(), identifier)
    }
}

impl fmt::Display for RateLimitPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
