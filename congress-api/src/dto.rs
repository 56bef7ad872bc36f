//! JSON:API documents served to the client.

use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use congress_cache::CacheStats;
use congress_core::constants::JSONAPI_MEDIA_TYPE;
use congress_core::types::{Bill, Representative, Statement, UpcomingBill};

use crate::error::ApiError;

/// Top-level JSON:API document.
#[derive(Debug, Serialize)]
pub struct Document<T> {
    /// Primary data: one resource or a list of resources
    pub data: T,
}

/// A JSON:API resource object.
#[derive(Debug, Serialize)]
pub struct Resource<A> {
    /// Resource type
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Resource ID
    pub id: String,
    /// Resource attributes
    pub attributes: A,
}

/// Response wrapper that serialises a document with the JSON:API media type.
pub struct JsonApi<T>(pub Document<T>);

impl<T: Serialize> IntoResponse for JsonApi<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self.0) {
            Ok(body) => ([(header::CONTENT_TYPE, JSONAPI_MEDIA_TYPE)], body).into_response(),
            Err(e) => ApiError::internal(format!("Failed to encode response: {}", e)).into_response(),
        }
    }
}

/// Attributes of an upcoming bill.
#[derive(Debug, Serialize)]
pub struct UpcomingBillAttributes {
    /// Description
    pub name: String,
    /// Bill number
    pub number: String,
    /// Bill slug
    pub slug: String,
    /// Chamber
    pub chamber: String,
    /// Congress number
    pub congress: String,
    /// Link to the bill
    pub url: String,
}

impl From<&UpcomingBill> for Resource<UpcomingBillAttributes> {
    fn from(bill: &UpcomingBill) -> Self {
        Resource {
            kind: "legislation",
            id: bill.bill_id.clone(),
            attributes: UpcomingBillAttributes {
                name: bill.description.clone(),
                number: bill.bill_number.clone(),
                slug: bill.bill_slug.clone(),
                chamber: bill.chamber.clone(),
                congress: bill.congress.clone(),
                url: bill.bill_url.clone(),
            },
        }
    }
}

/// Attributes of a single bill.
#[derive(Debug, Serialize)]
pub struct BillAttributes {
    /// Short title
    pub name: String,
    /// Bill number
    pub number: String,
    /// Bill slug
    pub slug: String,
    /// Congress number
    pub congress: String,
    /// Link to the GPO PDF
    pub url: String,
}

impl From<&Bill> for Resource<BillAttributes> {
    fn from(bill: &Bill) -> Self {
        Resource {
            kind: "legislation",
            id: bill.bill_id.clone(),
            attributes: BillAttributes {
                name: bill.short_title.clone(),
                number: bill.number.clone(),
                slug: bill.bill_slug.clone(),
                congress: bill.congress.clone(),
                url: bill.gpo_pdf_uri.clone(),
            },
        }
    }
}

/// Attributes of a representative.
#[derive(Debug, Serialize)]
pub struct RepresentativeAttributes {
    /// Member name
    pub name: String,
    /// Party code
    #[serde(rename = "party-id")]
    pub party_id: String,
    /// State code
    pub state: String,
}

impl From<&Representative> for Resource<RepresentativeAttributes> {
    fn from(rep: &Representative) -> Self {
        Resource {
            kind: "representative",
            id: rep.cosponsor_id.clone(),
            attributes: RepresentativeAttributes {
                name: rep.name.clone(),
                party_id: rep.cosponsor_party.clone(),
                state: rep.cosponsor_state.clone(),
            },
        }
    }
}

/// Attributes of a statement.
#[derive(Debug, Serialize)]
pub struct StatementAttributes {
    /// Title
    pub title: String,
    /// Statement type
    #[serde(rename = "type")]
    pub statement_type: String,
    /// Speaker name
    pub speaker: String,
}

impl From<&Statement> for Resource<StatementAttributes> {
    fn from(statement: &Statement) -> Self {
        Resource {
            kind: "statement",
            id: statement.url.clone(),
            attributes: StatementAttributes {
                title: statement.title.clone(),
                statement_type: statement.statement_type.clone(),
                speaker: statement.name.clone(),
            },
        }
    }
}

/// Builds a collection document from upstream payloads.
pub fn collection<'a, T, A>(items: impl IntoIterator<Item = &'a T>) -> JsonApi<Vec<Resource<A>>>
where
    T: 'a,
    Resource<A>: From<&'a T>,
{
    JsonApi(Document {
        data: items.into_iter().map(Resource::from).collect(),
    })
}

/// Response for the health check.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `ok` when the server answers
    pub status: &'static str,
    /// Response cache statistics
    pub cache: CacheStats,
}
