//! Cache-aside accessors and fan-out aggregation.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use congress_cache::{Clock, SystemClock, TtlCache};
use congress_core::constants::DEFAULT_CACHE_TTL;
use congress_core::error::{CongressError, Result};
use congress_core::traits::LegislationSource;
use congress_core::types::{
    Bill, BillRef, Chamber, Endpoint, Representative, Statement, UpcomingBill,
};

use crate::cache::ResponseCache;

/// Returns the cached value for `key`, or runs `fetch` and caches its success.
///
/// Errors from `fetch` are returned untouched and never stored, so the next
/// call for the same key goes upstream again. The cache lock is only held
/// inside `get`/`set`, never while `fetch` is pending.
pub async fn cache_aside<V, C, F, Fut>(
    cache: &TtlCache<V, C>,
    key: &str,
    ttl: Duration,
    fetch: F,
) -> Result<V>
where
    V: Clone,
    C: Clock,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<V>>,
{
    if let Some(value) = cache.get(key) {
        debug!(key, "Cache hit");
        return Ok(value);
    }

    debug!(key, "Cache miss, fetching upstream");
    let value = fetch().await?;

    cache.set(key, value.clone(), ttl);
    info!(key, ttl_seconds = ttl.as_secs(), "Cached upstream response");

    Ok(value)
}

/// Fetcher configuration.
#[derive(Clone, Debug)]
pub struct FetcherConfig {
    /// TTL applied to every cached response
    pub cache_ttl: Duration,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }
}

impl FetcherConfig {
    /// Creates a config with the given TTL.
    pub fn with_ttl(cache_ttl: Duration) -> Self {
        Self { cache_ttl }
    }
}

/// Cache-aside front for a [`LegislationSource`].
///
/// The response cache is injected so that one instance can be shared by the
/// whole process while tests build their own.
pub struct LegislationFetcher<S: ?Sized, C = SystemClock> {
    source: Arc<S>,
    cache: Arc<ResponseCache<C>>,
    config: FetcherConfig,
}

impl<S, C> LegislationFetcher<S, C>
where
    S: LegislationSource + ?Sized,
    C: Clock,
{
    /// Creates a fetcher over `source`, storing into `cache`.
    pub fn new(source: Arc<S>, cache: Arc<ResponseCache<C>>, config: FetcherConfig) -> Self {
        Self {
            source,
            cache,
            config,
        }
    }

    /// Returns the shared response cache.
    pub fn cache(&self) -> &ResponseCache<C> {
        &self.cache
    }

    /// Returns the TTL applied to cached responses.
    pub fn cache_ttl(&self) -> Duration {
        self.config.cache_ttl
    }

    /// Upcoming bills of one chamber.
    #[instrument(skip(self))]
    pub async fn upcoming_bills(&self, chamber: Chamber) -> Result<Arc<Vec<UpcomingBill>>> {
        let key = self.source.endpoint_url(&Endpoint::UpcomingBills(chamber));
        cache_aside(&self.cache.upcoming_bills, &key, self.config.cache_ttl, || async move {
            self.source.upcoming_bills(chamber).await.map(Arc::new)
        })
        .await
    }

    /// Upcoming bills of both chambers, House first.
    ///
    /// Both chambers are fetched concurrently, each through its own
    /// cache-aside path, and both are awaited before anything is returned.
    /// If either fails the whole call fails; when both fail the House error
    /// is returned and the Senate error is logged.
    #[instrument(skip(self))]
    pub async fn all_upcoming_bills(&self) -> Result<Vec<UpcomingBill>> {
        let [first, second] = Chamber::ALL;
        let (a, b) = tokio::join!(self.upcoming_bills(first), self.upcoming_bills(second));
        concat_chambers([(first, a), (second, b)])
    }

    /// Cosponsors of a bill.
    #[instrument(skip(self))]
    pub async fn bill_cosponsors(&self, bill: &BillRef) -> Result<Arc<Vec<Representative>>> {
        let key = self.source.endpoint_url(&Endpoint::BillCosponsors(bill.clone()));
        cache_aside(&self.cache.cosponsors, &key, self.config.cache_ttl, || async move {
            self.source.bill_cosponsors(bill).await.map(Arc::new)
        })
        .await
    }

    /// Statements about a bill.
    #[instrument(skip(self))]
    pub async fn bill_statements(&self, bill: &BillRef) -> Result<Arc<Vec<Statement>>> {
        let key = self.source.endpoint_url(&Endpoint::BillStatements(bill.clone()));
        cache_aside(&self.cache.statements, &key, self.config.cache_ttl, || async move {
            self.source.bill_statements(bill).await.map(Arc::new)
        })
        .await
    }

    /// A single bill.
    #[instrument(skip(self))]
    pub async fn bill(&self, bill: &BillRef) -> Result<Arc<Bill>> {
        let key = self.source.endpoint_url(&Endpoint::Bill(bill.clone()));
        cache_aside(&self.cache.bills, &key, self.config.cache_ttl, || async move {
            self.source.bill(bill).await.map(Arc::new)
        })
        .await
    }
}

/// Concatenates per-chamber results in the given order.
///
/// The first failure in order wins; later failures are only logged.
fn concat_chambers<const N: usize>(
    results: [(Chamber, Result<Arc<Vec<UpcomingBill>>>); N],
) -> Result<Vec<UpcomingBill>> {
    let mut bills = Vec::new();
    let mut failure: Option<CongressError> = None;

    for (chamber, result) in results {
        match result {
            Ok(chunk) => bills.extend(chunk.iter().cloned()),
            Err(source) if failure.is_none() => {
                failure = Some(CongressError::AggregationFailed {
                    chamber,
                    source: Box::new(source),
                });
            }
            Err(source) => {
                warn!(%chamber, error = %source, "Additional chamber failed");
            }
        }
    }

    match failure {
        Some(err) => Err(err),
        None => Ok(bills),
    }
}
