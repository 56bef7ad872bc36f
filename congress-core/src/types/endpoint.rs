//! Upstream endpoints.
//!
//! Every query exposed by the proxy maps to exactly one upstream endpoint.
//! The substituted path is what identifies a cached response.

use std::fmt;

use crate::types::{BillRef, Chamber};

/// An upstream query with its identifying parameters.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Upcoming bills scheduled in one chamber.
    UpcomingBills(Chamber),
    /// Cosponsors of a bill.
    BillCosponsors(BillRef),
    /// Congressional statements about a bill.
    BillStatements(BillRef),
    /// A single bill.
    Bill(BillRef),
}

impl Endpoint {
    /// Returns the endpoint path relative to the API base, with parameters substituted.
    pub fn path(&self) -> String {
        match self {
            Endpoint::UpcomingBills(chamber) => format!("bills/upcoming/{}.json", chamber),
            Endpoint::BillCosponsors(bill) => {
                format!("{}/bills/{}/cosponsors.json", bill.congress, bill.slug)
            }
            Endpoint::BillStatements(bill) => {
                format!("{}/bills/{}/statements.json", bill.congress, bill.slug)
            }
            Endpoint::Bill(bill) => format!("{}/bills/{}.json", bill.congress, bill.slug),
        }
    }

    /// Joins the endpoint path onto an API base URL.
    pub fn url(&self, base: &str) -> String {
        format!("{}/{}", base.trim_end_matches('/'), self.path())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
