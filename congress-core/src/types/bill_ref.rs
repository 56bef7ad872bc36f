//! Bill references parsed from client-facing slugs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CongressError, Result};

/// A bill identified by its slug and the congress it belongs to.
///
/// Client URLs carry both in one segment, e.g. `hr4249-115`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BillRef {
    /// Bill slug, e.g. `hr4249`
    pub slug: String,
    /// Congress number, e.g. `115`
    pub congress: u32,
}

impl BillRef {
    /// Creates a bill reference, normalising the slug.
    pub fn new(slug: impl AsRef<str>, congress: u32) -> Result<Self> {
        let slug = slug.as_ref().trim().to_ascii_lowercase();
        if slug.is_empty() || !slug.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CongressError::InvalidBillSlug(slug));
        }
        Ok(Self { slug, congress })
    }
}

impl FromStr for BillRef {
    type Err = CongressError;

    /// Parses `<slug>-<congress>`, splitting on the last `-`.
    fn from_str(s: &str) -> Result<Self> {
        let (slug, congress) = s
            .trim()
            .rsplit_once('-')
            .ok_or_else(|| CongressError::InvalidBillSlug(s.to_string()))?;

        let congress = congress
            .parse::<u32>()
            .map_err(|_| CongressError::InvalidBillSlug(s.to_string()))?;

        Self::new(slug, congress).map_err(|_| CongressError::InvalidBillSlug(s.to_string()))
    }
}

impl fmt::Display for BillRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.slug, self.congress)
    }
}
