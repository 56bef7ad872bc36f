//! Legislative chambers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CongressError, Result};

/// A chamber of Congress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chamber {
    /// House of Representatives
    House,
    /// Senate
    Senate,
}

impl Chamber {
    /// Both chambers, in the fixed order used when combining results.
    pub const ALL: [Chamber; 2] = [Chamber::House, Chamber::Senate];

    /// Returns the lowercase name used in upstream URLs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Chamber::House => "house",
            Chamber::Senate => "senate",
        }
    }
}

impl fmt::Display for Chamber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Chamber {
    type Err = CongressError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "house" => Ok(Chamber::House),
            "senate" => Ok(Chamber::Senate),
            other => Err(CongressError::ConfigError(format!("Unknown chamber: {}", other))),
        }
    }
}
