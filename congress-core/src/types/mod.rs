//! Domain types for the Congress proxy.
//!
//! - [`Chamber`]: House or Senate
//! - [`BillRef`]: A bill identified by slug and congress number
//! - [`Endpoint`]: An upstream query, used to derive cache keys
//! - [`UpcomingBill`], [`Representative`], [`Statement`], [`Bill`]: Upstream payloads

mod chamber;
mod bill_ref;
mod endpoint;
mod payload;

pub use chamber::*;
pub use bill_ref::*;
pub use endpoint::*;
pub use payload::*;
