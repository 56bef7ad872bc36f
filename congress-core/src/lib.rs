//! # Congress Core
//!
//! Core types, errors, and traits shared by every crate of the Congress proxy.
//!
//! This crate provides the foundational building blocks:
//!
//! - **Types**: Chambers, bill references, upstream endpoints and the payloads
//!   returned by the ProPublica Congress API
//! - **Errors**: The `CongressError` taxonomy
//! - **Constants**: Upstream protocol constants and defaults
//! - **Traits**: The `LegislationSource` upstream interface
//!
//! ## Example
//!
//! ```rust
//! use congress_core::{BillRef, Endpoint};
//!
//! let bill: BillRef = "hr4249-115".parse().unwrap();
//! assert_eq!(Endpoint::Bill(bill).path(), "115/bills/hr4249.json");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{CongressError, Result};
pub use traits::*;
pub use types::*;
