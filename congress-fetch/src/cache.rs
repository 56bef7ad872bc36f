//! Typed response caches, one per upstream payload.

use std::sync::Arc;

use congress_cache::{CacheStats, Clock, SystemClock, TtlCache};
use congress_core::types::{Bill, Representative, Statement, UpcomingBill};

/// The process-wide response cache.
///
/// Each query type gets its own `TtlCache` over its own payload type, so an
/// accessor can only ever read back what it stored. Keys are upstream URLs.
pub struct ResponseCache<C = SystemClock> {
    pub(crate) upcoming_bills: TtlCache<Arc<Vec<UpcomingBill>>, C>,
    pub(crate) cosponsors: TtlCache<Arc<Vec<Representative>>, C>,
    pub(crate) statements: TtlCache<Arc<Vec<Statement>>, C>,
    pub(crate) bills: TtlCache<Arc<Bill>, C>,
}

impl ResponseCache<SystemClock> {
    /// Creates empty caches on the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for ResponseCache<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock + Clone> ResponseCache<C> {
    /// Creates empty caches sharing `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self {
            upcoming_bills: TtlCache::with_clock(clock.clone()),
            cosponsors: TtlCache::with_clock(clock.clone()),
            statements: TtlCache::with_clock(clock.clone()),
            bills: TtlCache::with_clock(clock),
        }
    }
}

impl<C: Clock> ResponseCache<C> {
    /// Returns statistics summed over every payload cache.
    pub fn stats(&self) -> CacheStats {
        self.upcoming_bills.stats()
            + self.cosponsors.stats()
            + self.statements.stats()
            + self.bills.stats()
    }

    /// Returns the number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.upcoming_bills.len() + self.cosponsors.len() + self.statements.len() + self.bills.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.upcoming_bills.is_empty()
            && self.cosponsors.is_empty()
            && self.statements.is_empty()
            && self.bills.is_empty()
    }
}
