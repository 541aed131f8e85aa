//! # coincidence-rs — Pairwise Coincidence Testing
//!
//! Tests every unordered pair of entities for co-occurrence (or mutual
//! exclusion) of the connectors they touch, under a binomial null model with
//! multiple-testing correction.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `Registry` is the contract between the engine and loaded data
//! 2. **Clean DTOs**: `Entity`, `Connector`, `Edge`, `PairResult` cross all boundaries
//! 3. **Explicit configuration**: one immutable `AnalysisConfig` per run, passed by reference
//! 4. **Pure pair evaluation**: only the sinks are shared and mutable
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use coincidence_rs::{AnalysisConfig, CoincidenceAnalysis, MemoryRegistry};
//!
//! # fn example() -> coincidence_rs::Result<()> {
//! let mut registry = MemoryRegistry::new();
//! registry.add_edge("X", "p", 0.4)?;
//! registry.add_edge("X", "q", 1.0)?;
//! registry.add_edge("Y", "q", 0.7)?;
//! registry.add_edge("Y", "r", 0.2)?;
//!
//! let engine = CoincidenceAnalysis::new(AnalysisConfig::default())?;
//! let outcome = engine.run(&registry, "results/run1")?; // results/run1_pairs.csv
//!
//! for record in &outcome.records {
//!     println!("{} {} p={}", record.source, record.target, record.p_value);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modes
//!
//! | Option | Values | Effect |
//! |--------|--------|--------|
//! | `coin_set_mode` | `INTERSECTION`, `FULL` | Observation universe: pair union vs. all connectors |
//! | `coin_max_mode` | `ACCOMPANY`, `AVOID` | Success: both present vs. exactly one present |
//! | `alt_hypothesis` | `less`, `greater`, `two-sided` | Binomial test tail |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod registry;
pub mod stats;
pub mod config;
pub mod coincidence;
pub mod output;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{Connector, ConnectorId, Edge, Entity, edge_key};

// ============================================================================
// Re-exports: Registry
// ============================================================================

pub use registry::{MemoryRegistry, Registry};

// ============================================================================
// Re-exports: Configuration & statistics
// ============================================================================

pub use config::{AnalysisConfig, MaxMode, SetMode};
pub use stats::{Alternative, Correction};

// ============================================================================
// Re-exports: Engine & output
// ============================================================================

pub use coincidence::{CoincidenceAnalysis, PairVerdict, RunOutcome};
pub use output::{Diagnostics, PairResult, ResultSink};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
