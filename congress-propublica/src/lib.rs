//! Client for the ProPublica Congress API.
//!
//! Performs the upstream network calls and validates response envelopes.
//! Results are never cached here; see `congress-fetch`.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod client;

pub use client::{ProPublicaClient, ProPublicaConfig};
