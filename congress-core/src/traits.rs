//! Common traits for the Congress proxy.
//!
//! These traits define the seams between the caching layer and the network,
//! so the orchestrator can be exercised against in-memory doubles.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Bill, BillRef, Chamber, Endpoint, Representative, Statement, UpcomingBill};

// ═══════════════════════════════════════════════════════════════════════════════
// UPSTREAM TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Interface for the upstream legislative-data API.
///
/// Implementations perform the network call and validate the response
/// envelope. They may be slow and may fail; they never cache.
#[async_trait]
pub trait LegislationSource: Send + Sync {
    /// Returns the full URL of an endpoint.
    ///
    /// The orchestrator uses this as the cache key, so it must be deterministic.
    fn endpoint_url(&self, endpoint: &Endpoint) -> String;

    /// Fetches the upcoming bills of one chamber.
    async fn upcoming_bills(&self, chamber: Chamber) -> Result<Vec<UpcomingBill>>;

    /// Fetches the cosponsors of a bill.
    async fn bill_cosponsors(&self, bill: &BillRef) -> Result<Vec<Representative>>;

    /// Fetches the statements about a bill.
    async fn bill_statements(&self, bill: &BillRef) -> Result<Vec<Statement>>;

    /// Fetches a single bill.
    async fn bill(&self, bill: &BillRef) -> Result<Bill>;
}
