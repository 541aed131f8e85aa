//! Multiple-testing correction of the significance threshold.

use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::Error;

/// Correction scheme for multiple simultaneous comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Correction {
    None,
    Bonferroni,
    /// Šidák: exact under independence.
    Sidak,
}

impl Correction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Correction::None => "none",
            Correction::Bonferroni => "bonferroni",
            Correction::Sidak => "sidak",
        }
    }
}

impl std::fmt::Display for Correction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Correction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Correction::None),
            "bonferroni" => Ok(Correction::Bonferroni),
            "sidak" | "šidák" => Ok(Correction::Sidak),
            other => Err(Error::ConfigError(format!(
                "Invalid correction '{other}' (expected none, bonferroni or sidak)"
            ))),
        }
    }
}

impl TryFrom<String> for Correction {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Correction> for String {
    fn from(c: Correction) -> Self {
        c.as_str().to_string()
    }
}

/// Adjust `sig_level` for `comparisons` simultaneous tests.
///
/// Zero comparisons leave the threshold untouched.
pub fn correct(sig_level: f64, correction: Correction, comparisons: usize) -> f64 {
    if comparisons == 0 {
        return sig_level;
    }
    let m = comparisons as f64;
    match correction {
        Correction::None => sig_level,
        Correction::Bonferroni => sig_level / m,
        Correction::Sidak => 1.0 - (1.0 - sig_level).powf(1.0 / m),
    }
}
