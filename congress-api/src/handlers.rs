//! API route handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::debug;

use congress_core::types::BillRef;

use crate::dto::*;
use crate::error::ApiError;
use crate::state::AppState;

type Result<T> = std::result::Result<T, ApiError>;

/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        cache: state.fetcher.cache().stats(),
    })
}

/// GET /congress/v1/legislation
///
/// Upcoming bills of the House followed by those of the Senate.
pub async fn upcoming_bills(
    State(state): State<Arc<AppState>>,
) -> Result<JsonApi<Vec<Resource<UpcomingBillAttributes>>>> {
    let bills = state.fetcher.all_upcoming_bills().await?;
    debug!(count = bills.len(), "Serving upcoming bills");
    Ok(collection(&bills))
}

/// GET /congress/v1/legislation/:bill_slug
pub async fn get_bill(
    State(state): State<Arc<AppState>>,
    Path(bill_slug): Path<String>,
) -> Result<JsonApi<Resource<BillAttributes>>> {
    let bill_ref: BillRef = bill_slug.parse()?;
    let bill = state.fetcher.bill(&bill_ref).await?;
    Ok(JsonApi(Document {
        data: Resource::from(bill.as_ref()),
    }))
}

/// GET /congress/v1/legislation/:bill_slug/representatives
pub async fn bill_cosponsors(
    State(state): State<Arc<AppState>>,
    Path(bill_slug): Path<String>,
) -> Result<JsonApi<Vec<Resource<RepresentativeAttributes>>>> {
    let bill_ref: BillRef = bill_slug.parse()?;
    let cosponsors = state.fetcher.bill_cosponsors(&bill_ref).await?;
    Ok(collection(cosponsors.iter()))
}

/// GET /congress/v1/congress/:congress_id/legislation/:bill_slug/statements
pub async fn bill_statements(
    State(state): State<Arc<AppState>>,
    Path((congress_id, bill_slug)): Path<(u32, String)>,
) -> Result<JsonApi<Vec<Resource<StatementAttributes>>>> {
    let bill_ref = BillRef::new(&bill_slug, congress_id)?;
    let statements = state.fetcher.bill_statements(&bill_ref).await?;
    Ok(collection(statements.iter()))
}
