//! App state: the shared fetcher and its configuration.

use std::sync::Arc;

use congress_core::error::Result;
use congress_core::traits::LegislationSource;
use congress_fetch::{FetcherConfig, LegislationFetcher, ResponseCache};
use congress_propublica::ProPublicaClient;

use crate::config::ServerConfig;

/// State shared by every request handler.
pub struct AppState {
    /// Server configuration
    pub config: ServerConfig,
    /// Cache-aside fetcher over the upstream API
    pub fetcher: LegislationFetcher<dyn LegislationSource>,
}

impl AppState {
    /// Creates state backed by the ProPublica API.
    pub fn new(config: ServerConfig) -> Result<Self> {
        let client = ProPublicaClient::with_config(config.propublica())?;
        Ok(Self::with_source(config, Arc::new(client)))
    }

    /// Creates state backed by any upstream source, with a fresh response cache.
    pub fn with_source(config: ServerConfig, source: Arc<dyn LegislationSource>) -> Self {
        let fetcher = LegislationFetcher::new(
            source,
            Arc::new(ResponseCache::new()),
            FetcherConfig::with_ttl(config.cache_ttl),
        );

        Self { config, fetcher }
    }
}
