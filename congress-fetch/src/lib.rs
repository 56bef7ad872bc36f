//! # Congress Fetch
//!
//! Cache-aside orchestration over a [`LegislationSource`].
//!
//! Every query type checks its typed cache first, calls upstream on a miss,
//! and stores only successful results. Upcoming bills for both chambers are
//! fetched concurrently and concatenated House first.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use congress_fetch::{FetcherConfig, LegislationFetcher, ResponseCache};
//!
//! let cache = Arc::new(ResponseCache::new());
//! let fetcher = LegislationFetcher::new(source, cache, FetcherConfig::default());
//! let bills = fetcher.all_upcoming_bills().await?;
//! ```
//!
//! [`LegislationSource`]: congress_core::LegislationSource

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod cache;
mod fetcher;

pub use cache::ResponseCache;
pub use fetcher::{cache_aside, FetcherConfig, LegislationFetcher};
