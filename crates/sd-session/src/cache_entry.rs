use crate::clock::duration_millis;

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How usable a cached entry still is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Fresh,
    /// Usable, but due for a refresh
    Stale,
    /// Past the absolute lifetime; must be discarded
    Expired,
}

/// A persisted payload with the time it was captured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    pub value: T,
    /// Epoch milliseconds of the last successful write
    pub timestamp: i64,
}

impl<T> CacheEntry<T> {
    pub fn new(value: T, timestamp: i64) -> Self {
        Self { value, timestamp }
    }

    /// Milliseconds since capture; a timestamp from the future counts as zero.
    pub fn age_millis(&self, now: i64) -> i64 {
        now.saturating_sub(self.timestamp).max(0)
    }

    pub fn is_expired(&self, now: i64, lifetime: Duration) -> bool {
        self.age_millis(now) > duration_millis(lifetime)
    }

    pub fn freshness(&self, now: i64, lifetime: Duration, stale_after: Duration) -> Freshness {
        let age = self.age_millis(now);
        if age > duration_millis(lifetime) {
            Freshness::Expired
        } else if age > duration_millis(stale_after) {
            Freshness::Stale
        } else {
            Freshness::Fresh
        }
    }
}

/// Session-scoped marker naming the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMarker {
    pub token: String,
    pub timestamp: i64,
}

/// Cookie-scoped credential the route guard checks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportCredential {
    pub value: String,
    pub expires_at: i64,
}

impl TransportCredential {
    pub fn is_live(&self, now: i64) -> bool {
        !self.value.is_empty() && now < self.expires_at
    }
}
