//! In-memory TTL cache with lazy eviction.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::clock::{Clock, SystemClock};

/// Cache entry with an absolute expiry.
struct CacheEntry<V> {
    value: V,
    /// `None` when `now + ttl` is beyond what the clock can represent.
    expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires_at) => now >= expires_at,
            None => false,
        }
    }
}

/// Thread-safe key/value cache where every entry expires after its TTL.
///
/// A single mutex guards the whole map. Reads take it exclusively because a
/// read that finds an expired entry removes it. Critical sections are plain
/// map operations, so callers must never hold the cache across I/O (the API
/// makes that impossible: nothing borrowed from the map escapes a call).
///
/// There is no size bound and no background sweeper: an entry is dropped
/// only when a `get` observes it expired, or when `set` replaces it.
pub struct TtlCache<V, C = SystemClock> {
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
    clock: C,
}

impl<V> TtlCache<V, SystemClock> {
    /// Creates an empty cache on the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<V> Default for TtlCache<V, SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, C: Clock> TtlCache<V, C> {
    /// Creates an empty cache reading time from `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Returns a copy of the value stored under `key`, if it has not expired.
    ///
    /// An expired entry is removed and reported as absent.
    pub fn get(&self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        let mut entries = self.entries.lock();
        let now = self.clock.now();

        match entries.get(key) {
            None => return None,
            Some(entry) if !entry.is_expired(now) => return Some(entry.value.clone()),
            Some(_) => {}
        }

        entries.remove(key);
        trace!(key, "Evicted expired cache entry");
        None
    }

    /// Stores `value` under `key` until `now + ttl`, replacing any prior entry.
    ///
    /// A zero `ttl` stores an entry that is already expired.
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let mut entries = self.entries.lock();
        let expires_at = self.clock.now().checked_add(ttl);

        entries.insert(key.into(), CacheEntry { value, expires_at });
    }

    /// Returns the number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Returns cache statistics without evicting anything.
    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.lock();
        let now = self.clock.now();
        let expired = entries.values().filter(|e| e.is_expired(now)).count();

        CacheStats {
            total_entries: entries.len(),
            expired_entries: expired,
            valid_entries: entries.len() - expired,
        }
    }
}

/// Cache statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Total entries (including expired)
    pub total_entries: usize,
    /// Expired entries not yet evicted
    pub expired_entries: usize,
    /// Valid (non-expired) entries
    pub valid_entries: usize,
}

impl std::ops::Add for CacheStats {
    type Output = CacheStats;

    fn add(self, rhs: CacheStats) -> CacheStats {
        CacheStats {
            total_entries: self.total_entries + rhs.total_entries,
            expired_entries: self.expired_entries + rhs.expired_entries,
            valid_entries: self.valid_entries + rhs.valid_entries,
        }
    }
}
