//! Rate limiting service for controlling request frequency.
//!
//! Requests are counted per identifier in fixed windows. State lives behind
//! the [`RateLimitStore`] trait so a single instance can keep it in process
//! while a multi-instance deployment can plug in a shared store.

use crate::{
    config::{RateLimitConfig, RateLimitPreset},
    models::{RateLimitDecision, RateLimitEntry},
    services::clock::{Clock, SystemClock},
};
use chrono::{DateTime, Utc};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

/// Identifier used when a caller cannot be identified
pub const UNKNOWN_IDENTIFIER: &str = "unknown";

/// Storage for rate-limit windows, keyed by identifier
pub trait RateLimitStore: Send + Sync {
    fn get(&self, identifier: &str) -> Option<RateLimitEntry>;

    fn set(&self, entry: RateLimitEntry);

    /// Returns `true` if an entry was removed
    fn delete(&self, identifier: &str) -> bool;

    fn entries(&self) -> Vec<RateLimitEntry>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-local store for single-instance deployments
#[derive(Default)]
pub struct InMemoryRateLimitStore {
    entries: Mutex<HashMap<String, RateLimitEntry>>,
}

impl InMemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock cannot leave an entry half-written.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, RateLimitEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RateLimitStore for InMemoryRateLimitStore {
    fn get(&self, identifier: &str) -> Option<RateLimitEntry> {
        self.lock().get(identifier).cloned()
    }

    fn set(&self, entry: RateLimitEntry) {
        self.lock().insert(entry.identifier.clone(), entry);
    }

    fn delete(&self, identifier: &str) -> bool {
        self.lock().remove(identifier).is_some()
    }

    fn entries(&self) -> Vec<RateLimitEntry> {
        self.lock().values().cloned().collect()
    }

    fn len(&self) -> usize {
        self.lock().len()
    }
}

/// Fixed-window rate limiter
pub struct RateLimiter {
    store: Arc<dyn RateLimitStore>,
    clock: Arc<dyn Clock>,
    // Serializes get/set pairs against the store within this process.
    update_lock: Mutex<()>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

impl RateLimiter {
    /// In-memory limiter on the system clock
    pub fn new() -> Self {
        Self::with_store(Arc::new(InMemoryRateLimitStore::new()), Arc::new(SystemClock))
    }

    pub fn with_store(store: Arc<dyn RateLimitStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            update_lock: Mutex::new(()),
        }
    }

    /// Count a request from `identifier` and decide whether to admit it
    ///
    /// A blank identifier is counted against the shared `"unknown"` bucket.
    pub fn check(&self, identifier: &str, config: &RateLimitConfig) -> RateLimitDecision {
        let identifier = normalize_identifier(identifier);
        let _guard = self.update_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let now = self.clock.now();

        let mut entry = match self.store.get(identifier) {
            Some(entry) if !entry.is_expired(now) => entry,
            _ => RateLimitEntry::new(identifier, window_end(now, config)),
        };
        entry.count = entry.count.saturating_add(1);
        self.store.set(entry.clone());

        let limit = config.max_requests_per_window;
        if entry.count > limit {
            RateLimitDecision {
                allowed: false,
                limit,
                remaining: 0,
                reset_at: entry.window_reset_time,
                retry_after_secs: Some(seconds_until(now, entry.window_reset_time)),
            }
        } else {
            RateLimitDecision {
                allowed: true,
                limit,
                remaining: limit - entry.count,
                reset_at: entry.window_reset_time,
                retry_after_secs: None,
            }
        }
    }

    /// Check `identifier` against a named preset in that preset's own bucket
    pub fn check_preset(&self, identifier: &str, preset: RateLimitPreset) -> RateLimitDecision {
        let key = preset.bucket_key(normalize_identifier(identifier));
        self.check(&key, &preset.config())
    }

    /// Remove every entry whose window has ended; returns how many were removed
    pub fn cleanup(&self) -> usize {
        let _guard = self.update_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let now = self.clock.now();

        let mut removed = 0;
        for entry in self.store.entries() {
            if entry.is_expired(now) && self.store.delete(&entry.identifier) {
                removed += 1;
            }
        }
        removed
    }

    /// Number of identifiers currently tracked
    pub fn tracked_identifiers(&self) -> usize {
        self.store.len()
    }
}

fn normalize_identifier(identifier: &str) -> &str {
    let trimmed = identifier.trim();
    if trimmed.is_empty() {
        UNKNOWN_IDENTIFIER
    } else {
        trimmed
    }
}

/// End of a window opened at `now`; saturates at the latest representable time
fn window_end(now: DateTime<Utc>, config: &RateLimitConfig) -> DateTime<Utc> {
    now.checked_add_signed(config.window())
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Whole seconds from `now` until `reset`, rounded up
fn seconds_until(now: DateTime<Utc>, reset: DateTime<Utc>) -> u64 {
    let millis = u64::try_from((reset - now).num_milliseconds()).unwrap_or(0);
    millis.div_ceil(1000)
}
