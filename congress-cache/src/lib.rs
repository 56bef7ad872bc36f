//! TTL cache for upstream Congress API responses.
//!
//! Generic in-memory cache where every entry carries an absolute expiry.
//! Expired entries are removed lazily by the read that observes them.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod cache;
mod clock;

pub use cache::{CacheStats, TtlCache};
pub use clock::{Clock, ManualClock, SystemClock};
