//! Analysis configuration.
//!
//! An `AnalysisConfig` is read once per run and shared read-only by every
//! pair evaluation. It can be built in code, or decoded from JSON with every
//! field optional:
//!
//! ```json
//! {
//!   "sig_level": 0.05,
//!   "correction": "bonferroni",
//!   "coin_set_mode": "INTERSECTION",
//!   "coin_max_mode": "ACCOMPANY",
//!   "alt_hypothesis": "two-sided",
//!   "output_all": false,
//!   "verbose": false
//! }
//! ```

use std::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::stats::{Alternative, Correction};
use crate::{Error, Result};

// ============================================================================
// Set mode
// ============================================================================

/// How the universe of possible observations is sized for a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SetMode {
    /// Observations = connectors touched by either entity of the pair.
    Intersection,
    /// Observations = every connector known to the dataset.
    Full,
}

impl SetMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SetMode::Intersection => "INTERSECTION",
            SetMode::Full => "FULL",
        }
    }
}

impl FromStr for SetMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "INTERSECTION" => Ok(SetMode::Intersection),
            "FULL" => Ok(SetMode::Full),
            other => Err(Error::ConfigError(format!(
                "Invalid set mode '{other}' (expected INTERSECTION or FULL)"
            ))),
        }
    }
}

impl TryFrom<String> for SetMode {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<SetMode> for String {
    fn from(mode: SetMode) -> Self {
        mode.as_str().to_string()
    }
}

// ============================================================================
// Max mode
// ============================================================================

/// What counts as a success, and the chance of success under independence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MaxMode {
    /// Success = exactly one entity of the pair holds the connector.
    Avoid,
    /// Success = both entities hold the connector.
    Accompany,
}

impl MaxMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaxMode::Avoid => "AVOID",
            MaxMode::Accompany => "ACCOMPANY",
        }
    }
}

impl FromStr for MaxMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "AVOID" => Ok(MaxMode::Avoid),
            "ACCOMPANY" => Ok(MaxMode::Accompany),
            other => Err(Error::ConfigError(format!(
                "Invalid max mode '{other}' (expected AVOID or ACCOMPANY)"
            ))),
        }
    }
}

impl TryFrom<String> for MaxMode {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<MaxMode> for String {
    fn from(mode: MaxMode) -> Self {
        mode.as_str().to_string()
    }
}

// ============================================================================
// AnalysisConfig
// ============================================================================

/// Options recognized by a coincidence run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Significance threshold before correction.
    pub sig_level: f64,
    /// Correction applied with comparison count = total distinct edges.
    pub correction: Correction,
    pub coin_set_mode: SetMode,
    pub coin_max_mode: MaxMode,
    pub alt_hypothesis: Alternative,
    /// Emit non-significant pairs too.
    pub output_all: bool,
    /// Write a per-pair diagnostic trace.
    pub verbose: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sig_level: 0.05,
            correction: Correction::Bonferroni,
            coin_set_mode: SetMode::Intersection,
            coin_max_mode: MaxMode::Accompany,
            alt_hypothesis: Alternative::TwoSided,
            output_all: false,
            verbose: false,
        }
    }
}

impl AnalysisConfig {
    /// Decode and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: AnalysisConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject a significance level outside `(0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if !(self.sig_level > 0.0 && self.sig_level <= 1.0) {
            return Err(Error::ConfigError(format!(
                "Significance level must be in (0, 1], got {}",
                self.sig_level
            )));
        }
        Ok(())
    }

    pub fn with_set_mode(mut self, mode: SetMode) -> Self {
        self.coin_set_mode = mode;
        self
    }

    pub fn with_max_mode(mut self, mode: MaxMode) -> Self {
        self.coin_max_mode = mode;
        self
    }

    pub fn with_alternative(mut self, alt: Alternative) -> Self {
        self.alt_hypothesis = alt;
        self
    }

    pub fn with_correction(mut self, correction: Correction) -> Self {
        self.correction = correction;
        self
    }

    pub fn with_sig_level(mut self, sig_level: f64) -> Self {
        self.sig_level = sig_level;
        self
    }

    pub fn with_output_all(mut self, output_all: bool) -> Self {
        self.output_all = output_all;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse_is_case_insensitive() {
        assert_eq!("intersection".parse::<SetMode>().unwrap(), SetMode::Intersection);
        assert_eq!("Full".parse::<SetMode>().unwrap(), SetMode::Full);
        assert_eq!("accompany".parse::<MaxMode>().unwrap(), MaxMode::Accompany);
        assert_eq!("AVOID".parse::<MaxMode>().unwrap(), MaxMode::Avoid);
    }

    #[test]
    fn test_invalid_modes_are_config_errors() {
        assert!(matches!("UNION".parse::<SetMode>(), Err(Error::ConfigError(_))));
        assert!(matches!("MAX".parse::<MaxMode>(), Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_from_json_defaults() {
        let config = AnalysisConfig::from_json("{}").unwrap();
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn test_from_json_full() {
        let config = AnalysisConfig::from_json(
            r#"{
                "sig_level": 0.01,
                "correction": "none",
                "coin_set_mode": "FULL",
                "coin_max_mode": "AVOID",
                "alt_hypothesis": "greater",
                "output_all": true,
                "verbose": true
            }"#,
        )
        .unwrap();

        assert_eq!(config.sig_level, 0.01);
        assert_eq!(config.correction, Correction::None);
        assert_eq!(config.coin_set_mode, SetMode::Full);
        assert_eq!(config.coin_max_mode, MaxMode::Avoid);
        assert_eq!(config.alt_hypothesis, Alternative::Greater);
        assert!(config.output_all);
        assert!(config.verbose);
    }

    #[test]
    fn test_from_json_rejects_bad_mode() {
        let err = AnalysisConfig::from_json(r#"{"coin_set_mode": "PARTIAL"}"#);
        assert!(matches!(err, Err(Error::Parse(_))));
    }

    #[test]
    fn test_from_json_rejects_unknown_field() {
        assert!(AnalysisConfig::from_json(r#"{"sig": 0.1}"#).is_err());
    }

    #[test]
    fn test_validate_sig_level() {
        assert!(AnalysisConfig::default().with_sig_level(0.0).validate().is_err());
        assert!(AnalysisConfig::default().with_sig_level(1.5).validate().is_err());
        assert!(AnalysisConfig::default().with_sig_level(f64::NAN).validate().is_err());
        assert!(AnalysisConfig::default().with_sig_level(1.0).validate().is_ok());
    }

    #[test]
    fn test_json_roundtrip_uses_identifiers() {
        let json = serde_json::to_string(&AnalysisConfig::default()).unwrap();
        assert!(json.contains("\"INTERSECTION\""));
        assert!(json.contains("\"ACCOMPANY\""));
        assert!(json.contains("\"two-sided\""));
    }
}
