//! Null model selection: set mode sizes the universe, max mode picks the
//! success definition and its chance under independence.

use crate::config::{MaxMode, SetMode};
use super::overlap::Overlap;

/// Number of observations for a pair, or `None` when there are none to test.
///
/// Only `Intersection` can come up empty; `Full` always uses the dataset's
/// connector count.
pub fn observations(mode: SetMode, overlap: &Overlap, universe: usize) -> Option<usize> {
    match mode {
        SetMode::Intersection => {
            let n = overlap.total_range();
            (n > 0).then_some(n)
        }
        SetMode::Full => Some(universe),
    }
}

/// Success count and binomial rate for one pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NullModel {
    pub observations: usize,
    pub chance_source: f64,
    pub chance_target: f64,
    pub not_chance_source: f64,
    pub not_chance_target: f64,
    pub rate: f64,
    pub successes: usize,
}

impl NullModel {
    pub fn new(mode: MaxMode, overlap: &Overlap, observations: usize) -> Self {
        let chance_source = fraction(overlap.source_degree, observations);
        let chance_target = fraction(overlap.target_degree, observations);
        let not_chance_source =
            fraction(observations.saturating_sub(overlap.source_degree), observations);
        let not_chance_target =
            fraction(observations.saturating_sub(overlap.target_degree), observations);

        let (successes, rate) = match mode {
            // Upper triangle of the pair matrix counts "exactly one of".
            MaxMode::Avoid => (
                overlap.exclusive_count(),
                chance_source * not_chance_target + chance_target * not_chance_source,
            ),
            MaxMode::Accompany => (overlap.overlap_count(), chance_source * chance_target),
        };

        Self {
            observations,
            chance_source,
            chance_target,
            not_chance_source,
            not_chance_target,
            rate,
            successes,
        }
    }

    /// A rate of exactly 0 or 1 makes the binomial test uninformative.
    pub fn is_degenerate(&self) -> bool {
        self.rate == 0.0 || self.rate == 1.0
    }

    /// Expected successes under the null, rounded half up.
    pub fn expected(&self) -> u64 {
        (self.rate * self.observations as f64 + 0.5).floor() as u64
    }
}

/// `part / whole`, with an empty universe counting as zero chance.
fn fraction(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}
