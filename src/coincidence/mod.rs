//! # Pairwise Coincidence Engine
//!
//! Tests every unordered entity pair for co-occurrence (or mutual exclusion)
//! of connectors under a binomial null model.
//!
//! ```text
//! entities ──► flat (i, j) index space ──► rayon workers
//!     per pair: overlap ─► null model ─► binomial test ─► correction
//!               ─► secondary stats ─► ResultSink (mutex, one row per lock)
//! ```
//!
//! Pair evaluation is pure; the sink, the diagnostic writer and the record
//! collector are the only shared mutable state.

pub mod null_model;
pub mod overlap;
pub mod secondary;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::{AnalysisConfig, MaxMode};
use crate::model::Entity;
use crate::output::{Diagnostics, PairResult, PairTrace, ResultSink};
use crate::registry::Registry;
use crate::stats::{binomial, significance};
use crate::{Error, Result};

pub use null_model::NullModel;
pub use overlap::Overlap;

/// Suffix appended to the output prefix.
pub const OUTPUT_SUFFIX: &str = "_pairs.csv";

/// Suffix of the in-progress file, renamed away on success.
const PARTIAL_SUFFIX: &str = ".partial";

// ============================================================================
// Pair verdicts
// ============================================================================

/// What happened to one pair.
#[derive(Debug, Clone, PartialEq)]
pub enum PairVerdict {
    /// `Intersection` sizing found no connectors on either side.
    NoObservations,
    /// Rate of exactly 0 or 1.
    DegenerateRate { rate: f64 },
    /// Above the corrected threshold and `output_all` is off.
    NotSignificant { p_value: f64 },
    /// Goes to the sink. `record.significant` tells the two emit paths apart.
    Emit(PairResult),
}

// ============================================================================
// Run outcome
// ============================================================================

/// Summary of a completed run.
#[derive(Debug, Clone, Default)]
pub struct RunOutcome {
    /// Emitted records, in no particular order. Empty when the engine was
    /// built [`without_records`](CoincidenceAnalysis::without_records).
    pub records: Vec<PairResult>,
    /// Rows appended to the sink.
    pub emitted: usize,
    /// Unordered pairs evaluated.
    pub evaluated: usize,
    pub skipped_no_observations: usize,
    pub skipped_degenerate_rate: usize,
    /// Pairs at or below the corrected threshold.
    pub significant: usize,
    /// Threshold after multiple-testing correction.
    pub corrected_threshold: f64,
}

impl RunOutcome {
    pub fn found_any(&self) -> bool {
        self.emitted > 0
    }

    /// `0` if at least one pair was emitted, `-1` otherwise.
    pub fn status(&self) -> i32 {
        if self.found_any() { 0 } else { -1 }
    }
}

#[derive(Default)]
struct Counters {
    evaluated: AtomicUsize,
    no_observations: AtomicUsize,
    degenerate_rate: AtomicUsize,
    significant: AtomicUsize,
    emitted: AtomicUsize,
}

// ============================================================================
// CoincidenceAnalysis
// ============================================================================

/// The engine. Holds the immutable configuration and, when verbose, the
/// diagnostic writer.
#[derive(Debug)]
pub struct CoincidenceAnalysis {
    config: AnalysisConfig,
    diagnostics: Option<Diagnostics>,
    retain_records: bool,
}

impl CoincidenceAnalysis {
    /// Validate `config`. Verbose runs trace to stderr unless
    /// [`with_diagnostics`](Self::with_diagnostics) redirects them.
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        let diagnostics = config.verbose.then(Diagnostics::stderr);
        Ok(Self {
            config,
            diagnostics,
            retain_records: true,
        })
    }

    /// Only write rows to the sink; [`RunOutcome::records`] stays empty and
    /// memory no longer grows with the number of emitted pairs.
    pub fn without_records(mut self) -> Self {
        self.retain_records = false;
        self
    }

    /// Send the verbose trace to `diagnostics`. Ignored unless verbose.
    pub fn with_diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        if self.config.verbose {
            self.diagnostics = Some(diagnostics);
        }
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Significance threshold corrected for the registry's edge count.
    pub fn corrected_threshold<R: Registry + ?Sized>(&self, registry: &R) -> f64 {
        significance::correct(self.config.sig_level, self.config.correction, registry.edge_count())
    }

    /// Run against `registry` and write `<prefix>_pairs.csv`.
    ///
    /// Any previous `<prefix>_pairs.csv` is removed up front. Rows go to
    /// `<prefix>_pairs.csv.partial`, which is renamed into place only once
    /// every pair has been evaluated and flushed. On error the partial file
    /// is removed, so a failed run leaves neither file behind.
    pub fn run<R: Registry + ?Sized>(&self, registry: &R, prefix: impl AsRef<Path>) -> Result<RunOutcome> {
        let path = output_path(prefix.as_ref());
        let partial = with_suffix(&path, PARTIAL_SUFFIX);
        info!(path = %path.display(), "writing pair results");

        remove_if_present(&path)?;
        let result = self.write_partial(registry, &partial).and_then(|outcome| {
            fs::rename(&partial, &path)?;
            Ok(outcome)
        });

        if let Err(err) = &result {
            warn!(path = %partial.display(), error = %err, "discarding partial output");
            if let Err(rm) = fs::remove_file(&partial) {
                debug!(error = %rm, "partial output already gone");
            }
        }
        result
    }

    fn write_partial<R: Registry + ?Sized>(&self, registry: &R, partial: &Path) -> Result<RunOutcome> {
        let file = File::create(partial)?;
        let sink = ResultSink::new(BufWriter::new(file), self.config.coin_max_mode)?;
        let outcome = self.run_with_sink(registry, &sink)?;
        let writer = sink.finish()?;
        writer.into_inner().map_err(|e| Error::Io(e.into_error()))?;
        Ok(outcome)
    }

    /// Run against `registry`, appending rows to `sink`.
    ///
    /// The first fatal error from any worker stops the run and is returned.
    pub fn run_with_sink<R, W>(&self, registry: &R, sink: &ResultSink<W>) -> Result<RunOutcome>
    where
        R: Registry + ?Sized,
        W: Write + Send,
    {
        if sink.max_mode() != self.config.coin_max_mode {
            return Err(Error::ConfigError(format!(
                "Sink was opened for {} but the analysis runs {}",
                sink.max_mode().as_str(),
                self.config.coin_max_mode.as_str()
            )));
        }

        let entities = registry.entities();
        let n = entities.len();
        let cor_sig = self.corrected_threshold(registry);

        info!(
            entities = n,
            connectors = registry.connector_count(),
            edges = registry.edge_count(),
            set_mode = self.config.coin_set_mode.as_str(),
            max_mode = self.config.coin_max_mode.as_str(),
            alternative = %self.config.alt_hypothesis,
            corrected_threshold = cor_sig,
            "iterating pair matrix"
        );

        let counters = Counters::default();
        let records = Mutex::new(Vec::new());

        (0..n * n).into_par_iter().try_for_each(|flat| -> Result<()> {
            let source = &entities[flat / n];
            let target = &entities[flat % n];
            if target.name <= source.name {
                return Ok(());
            }
            counters.evaluated.fetch_add(1, Ordering::Relaxed);

            match self.evaluate_pair(registry, source, target, cor_sig)? {
                PairVerdict::NoObservations => {
                    counters.no_observations.fetch_add(1, Ordering::Relaxed);
                }
                PairVerdict::DegenerateRate { .. } => {
                    counters.degenerate_rate.fetch_add(1, Ordering::Relaxed);
                }
                PairVerdict::NotSignificant { .. } => {}
                PairVerdict::Emit(record) => {
                    if record.significant {
                        counters.significant.fetch_add(1, Ordering::Relaxed);
                    }
                    sink.append(&record)?;
                    counters.emitted.fetch_add(1, Ordering::Relaxed);
                    if self.retain_records {
                        records.lock().push(record);
                    }
                }
            }
            Ok(())
        })?;

        let outcome = RunOutcome {
            records: records.into_inner(),
            emitted: counters.emitted.into_inner(),
            evaluated: counters.evaluated.into_inner(),
            skipped_no_observations: counters.no_observations.into_inner(),
            skipped_degenerate_rate: counters.degenerate_rate.into_inner(),
            significant: counters.significant.into_inner(),
            corrected_threshold: cor_sig,
        };

        info!(
            evaluated = outcome.evaluated,
            emitted = outcome.emitted,
            significant = outcome.significant,
            "pair matrix complete"
        );
        Ok(outcome)
    }

    /// Evaluate one ordered pair against threshold `cor_sig`.
    ///
    /// Callers are expected to pass `source.name < target.name`; the
    /// orientation is what ends up in the record.
    pub fn evaluate_pair<R: Registry + ?Sized>(
        &self,
        registry: &R,
        source: &Entity,
        target: &Entity,
        cor_sig: f64,
    ) -> Result<PairVerdict> {
        let config = &self.config;
        let overlap = Overlap::between(source, target);
        let universe = registry.connector_count();

        let Some(observations) = null_model::observations(config.coin_set_mode, &overlap, universe) else {
            debug!(source = %source.name, target = %target.name, "rejected: no observations");
            self.diag_line(format_args!(
                "Rejected ({}, {}) because there are no observations.",
                source.name, target.name
            ))?;
            return Ok(PairVerdict::NoObservations);
        };

        let model = NullModel::new(config.coin_max_mode, &overlap, observations);
        if model.is_degenerate() {
            debug!(source = %source.name, target = %target.name, rate = model.rate, "rejected: degenerate rate");
            self.diag_line(format_args!(
                "Rejected ({}, {}) because the rate is {}.",
                source.name, target.name, model.rate
            ))?;
            return Ok(PairVerdict::DegenerateRate { rate: model.rate });
        }

        let successes = model.successes as u64;
        let trials = model.observations as u64;
        let p_value = binomial::test(config.alt_hypothesis, successes, trials, model.rate);

        let significant = p_value <= cor_sig;
        if let Some(diag) = &self.diagnostics {
            let verdict = if significant {
                format!(
                    "Accepted ({}, {}) because it is significant with p = {p_value}.",
                    source.name, target.name
                )
            } else {
                format!(
                    "Rejected ({}, {}) because it isn't significant with p = {p_value}.",
                    source.name, target.name
                )
            };
            let trace = PairTrace {
                source: &source.name,
                target: &target.name,
                source_degree: overlap.source_degree,
                target_degree: overlap.target_degree,
                both: overlap.overlap_count(),
                either: overlap.total_range(),
                universe,
                chance_source: model.chance_source,
                chance_target: model.chance_target,
                not_chance_source: model.not_chance_source,
                not_chance_target: model.not_chance_target,
                rate: model.rate,
                successes,
                observations: trials,
            };
            diag.trace(&trace, &verdict)?;
        }

        if !significant && !config.output_all {
            return Ok(PairVerdict::NotSignificant { p_value });
        }

        let avg_synthetic_distance = match config.coin_max_mode {
            MaxMode::Accompany => Some(secondary::avg_synthetic_distance(
                registry,
                source,
                target,
                &overlap.shared,
            )?),
            MaxMode::Avoid => None,
        };

        Ok(PairVerdict::Emit(PairResult {
            source: source.name.clone(),
            target: target.name.clone(),
            p_value,
            avg_synthetic_distance,
            successes,
            observations: trials,
            rate: model.rate,
            expected: model.expected(),
            source_degree: overlap.source_degree as u64,
            target_degree: overlap.target_degree as u64,
            source_fraction: model.chance_source,
            target_fraction: model.chance_target,
            significant,
        }))
    }

    fn diag_line(&self, message: std::fmt::Arguments<'_>) -> Result<()> {
        match &self.diagnostics {
            Some(diag) => diag.line(&message.to_string()),
            None => Ok(()),
        }
    }
}

/// `<prefix>_pairs.csv`.
pub fn output_path(prefix: &Path) -> PathBuf {
    with_suffix(prefix, OUTPUT_SUFFIX)
}

fn remove_if_present(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "removed previous output");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

// ============================================================================
// Tests
// ============================================================================
