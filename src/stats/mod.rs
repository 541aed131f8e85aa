//! # Statistics
//!
//! The two pure functions the coincidence engine consumes:
//!
//! - [`binomial::test`] — binomial test p-value for one of three tails
//! - [`significance::correct`] — multiple-testing adjusted threshold

pub mod binomial;
pub mod significance;

use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::Error;

pub use significance::Correction;

/// Alternative hypothesis for the binomial test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Alternative {
    /// Observed ≤ expected.
    Less,
    /// Observed ≥ expected.
    Greater,
    TwoSided,
}

impl Alternative {
    pub fn as_str(&self) -> &'static str {
        match self {
            Alternative::Less => "less",
            Alternative::Greater => "greater",
            Alternative::TwoSided => "two-sided",
        }
    }
}

impl std::fmt::Display for Alternative {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Alternative {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "less" => Ok(Alternative::Less),
            "greater" => Ok(Alternative::Greater),
            "two-sided" | "two_sided" | "twosided" | "two-tailed" => Ok(Alternative::TwoSided),
            other => Err(Error::ConfigError(format!(
                "Invalid alternative hypothesis '{other}' (expected less, greater or two-sided)"
            ))),
        }
    }
}

impl TryFrom<String> for Alternative {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Alternative> for String {
    fn from(alt: Alternative) -> Self {
        alt.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alternative_parse() {
        assert_eq!("less".parse::<Alternative>().unwrap(), Alternative::Less);
        assert_eq!("GREATER".parse::<Alternative>().unwrap(), Alternative::Greater);
        assert_eq!("two_sided".parse::<Alternative>().unwrap(), Alternative::TwoSided);
        assert!("sideways".parse::<Alternative>().is_err());
    }

    #[test]
    fn test_alternative_display_roundtrips() {
        for alt in [Alternative::Less, Alternative::Greater, Alternative::TwoSided] {
            assert_eq!(alt.to_string().parse::<Alternative>().unwrap(), alt);
        }
    }
}
