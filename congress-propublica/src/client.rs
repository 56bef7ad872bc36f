//! HTTP client for the ProPublica Congress API.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use url::Url;

use congress_core::constants::{API_KEY_HEADER, DEFAULT_API_BASE, DEFAULT_TIMEOUT_SECONDS};
use congress_core::error::{CongressError, Result};
use congress_core::traits::LegislationSource;
use congress_core::types::{
    Bill, BillEnvelope, BillRef, Chamber, CosponsorsEnvelope, Endpoint, Envelope,
    Representative, Statement, StatementsEnvelope, UpcomingBill, UpcomingBillsEnvelope,
};

/// ProPublica client configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProPublicaConfig {
    /// API base URL (e.g., "https://api.propublica.org/congress/v1")
    pub base_url: String,
    /// API key sent with every request
    pub api_key: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for ProPublicaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.into(),
            api_key: String::new(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl ProPublicaConfig {
    /// Creates a config for the given base URL and key.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            ..Default::default()
        }
    }
}

/// ProPublica Congress API client.
pub struct ProPublicaClient {
    base_url: String,
    api_key: String,
    timeout_seconds: u64,
    http_client: reqwest::Client,
}

impl ProPublicaClient {
    /// Creates a client, validating the base URL.
    pub fn with_config(config: ProPublicaConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url).map_err(|e| {
            CongressError::ConfigError(format!("Invalid API base '{}': {}", config.base_url, e))
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(CongressError::ConfigError(format!(
                "Unsupported API base scheme: {}",
                base.scheme()
            )));
        }

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| CongressError::ConfigError(e.to_string()))?;

        Ok(Self {
            base_url: base.as_str().trim_end_matches('/').to_string(),
            api_key: config.api_key,
            timeout_seconds: config.timeout_seconds,
            http_client,
        })
    }

    /// Returns the normalised API base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Calls an endpoint with the API key and decodes its envelope.
    async fn request<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<Envelope<T>> {
        let url = self.endpoint_url(endpoint);
        info!(endpoint = %url, "Calling ProPublica API");

        let response = self
            .http_client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CongressError::UnexpectedStatusCode {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;

        let envelope: Envelope<T> = serde_json::from_slice(&body).map_err(|e| {
            debug!(endpoint = %url, error = %e, "Failed decoding response");
            CongressError::from(e)
        })?;

        debug!(
            endpoint = %url,
            status = %envelope.status,
            results = envelope.results.len(),
            "Results from ProPublica API"
        );
        Ok(envelope)
    }

    fn transport_error(&self, err: reqwest::Error) -> CongressError {
        if err.is_timeout() {
            CongressError::ConnectionTimeout(format!(
                "no response within {}s",
                self.timeout_seconds
            ))
        } else {
            CongressError::HttpError(err.to_string())
        }
    }
}

#[async_trait]
impl LegislationSource for ProPublicaClient {
    fn endpoint_url(&self, endpoint: &Endpoint) -> String {
        endpoint.url(&self.base_url)
    }

    #[instrument(skip(self))]
    async fn upcoming_bills(&self, chamber: Chamber) -> Result<Vec<UpcomingBill>> {
        let envelope: UpcomingBillsEnvelope =
            self.request(&Endpoint::UpcomingBills(chamber)).await?;
        Ok(envelope.into_first()?.bills)
    }

    #[instrument(skip(self))]
    async fn bill_cosponsors(&self, bill: &BillRef) -> Result<Vec<Representative>> {
        let envelope: CosponsorsEnvelope =
            self.request(&Endpoint::BillCosponsors(bill.clone())).await?;
        Ok(envelope.into_first()?.cosponsors)
    }

    #[instrument(skip(self))]
    async fn bill_statements(&self, bill: &BillRef) -> Result<Vec<Statement>> {
        let envelope: StatementsEnvelope =
            self.request(&Endpoint::BillStatements(bill.clone())).await?;
        envelope.into_results()
    }

    #[instrument(skip(self))]
    async fn bill(&self, bill: &BillRef) -> Result<Bill> {
        let envelope: BillEnvelope = self.request(&Endpoint::Bill(bill.clone())).await?;
        envelope.into_first()
    }
}
