//! Payloads returned by the ProPublica Congress API.
//!
//! Only the fields the client renders are kept. Upstream sends `null` for
//! missing strings, which is read as an empty string.

use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::EXPECTED_STATUS;
use crate::error::{CongressError, Result};

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// ═══════════════════════════════════════════════════════════════════════════════
// PAYLOADS
// ═══════════════════════════════════════════════════════════════════════════════

/// A bill scheduled for floor consideration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcomingBill {
    /// Bill ID, e.g. `hr4249-115`
    #[serde(default, deserialize_with = "null_as_empty")]
    pub bill_id: String,
    /// Human-readable description
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    /// Bill number, e.g. `H.R.4249`
    #[serde(default, deserialize_with = "null_as_empty")]
    pub bill_number: String,
    /// Bill slug, e.g. `hr4249`
    #[serde(default, deserialize_with = "null_as_empty")]
    pub bill_slug: String,
    /// Chamber the bill is scheduled in
    #[serde(default, deserialize_with = "null_as_empty")]
    pub chamber: String,
    /// Congress number
    #[serde(default, deserialize_with = "null_as_empty")]
    pub congress: String,
    /// Link to the bill text
    #[serde(default, deserialize_with = "null_as_empty")]
    pub bill_url: String,
}

/// A bill cosponsor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Representative {
    /// Member ID
    #[serde(default, deserialize_with = "null_as_empty")]
    pub cosponsor_id: String,
    /// Member name
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    /// Party code, e.g. `D`
    #[serde(default, deserialize_with = "null_as_empty")]
    pub cosponsor_party: String,
    /// State code, e.g. `CA`
    #[serde(default, deserialize_with = "null_as_empty")]
    pub cosponsor_state: String,
}

/// A congressional statement mentioning a bill.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    /// Statement URL, unique per statement
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
    /// Statement title
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    /// Statement type, e.g. `Press Release`
    #[serde(rename = "type", default, deserialize_with = "null_as_empty")]
    pub statement_type: String,
    /// Speaker name
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
}

/// A single bill.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    /// Bill ID
    #[serde(default, deserialize_with = "null_as_empty")]
    pub bill_id: String,
    /// Short title
    #[serde(default, deserialize_with = "null_as_empty")]
    pub short_title: String,
    /// Bill number
    #[serde(default, deserialize_with = "null_as_empty")]
    pub number: String,
    /// Bill slug
    #[serde(default, deserialize_with = "null_as_empty")]
    pub bill_slug: String,
    /// Congress number
    #[serde(default, deserialize_with = "null_as_empty")]
    pub congress: String,
    /// Link to the GPO PDF
    #[serde(default, deserialize_with = "null_as_empty")]
    pub gpo_pdf_uri: String,
}

// ═══════════════════════════════════════════════════════════════════════════════
// ENVELOPES
// ═══════════════════════════════════════════════════════════════════════════════

/// Response envelope shared by every ProPublica endpoint.
#[derive(Clone, Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    /// `OK` on success
    #[serde(default, deserialize_with = "null_as_empty")]
    pub status: String,
    /// Result list
    #[serde(default)]
    pub results: Vec<T>,
}

impl<T> Envelope<T> {
    /// Checks the status field and returns the results.
    pub fn into_results(self) -> Result<Vec<T>> {
        if self.status != EXPECTED_STATUS {
            return Err(CongressError::BadStatus(self.status));
        }
        Ok(self.results)
    }

    /// Checks the status field and returns the first result.
    pub fn into_first(self) -> Result<T> {
        self.into_results()?
            .into_iter()
            .next()
            .ok_or(CongressError::NoData)
    }
}

/// One entry of the upcoming-bills `results` list.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpcomingBillsResult {
    /// Scheduled bills
    #[serde(default)]
    pub bills: Vec<UpcomingBill>,
}

/// One entry of the cosponsors `results` list.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CosponsorsResult {
    /// Cosponsors of the bill
    #[serde(default)]
    pub cosponsors: Vec<Representative>,
}

/// Upcoming bills response.
pub type UpcomingBillsEnvelope = Envelope<UpcomingBillsResult>;
/// Bill cosponsors response.
pub type CosponsorsEnvelope = Envelope<CosponsorsResult>;
/// Bill statements response.
pub type StatementsEnvelope = Envelope<Statement>;
/// Single bill response.
pub type BillEnvelope = Envelope<Bill>;
