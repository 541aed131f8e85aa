//! Set algebra over two entities' connector sets.

use smallvec::SmallVec;
use crate::model::{ConnectorId, Entity};

/// Overlap statistics for an ordered pair (source, target).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlap {
    pub source_degree: usize,
    pub target_degree: usize,
    /// Connectors held by both, in the source's iteration order.
    pub shared: SmallVec<[ConnectorId; 8]>,
}

impl Overlap {
    pub fn between(source: &Entity, target: &Entity) -> Self {
        let shared = source
            .connectors()
            .filter(|c| target.has_connector(*c))
            .collect();
        Self {
            source_degree: source.degree(),
            target_degree: target.degree(),
            shared,
        }
    }

    /// Connectors held by both.
    pub fn overlap_count(&self) -> usize {
        self.shared.len()
    }

    /// Connectors held by either: `|A| + |B| - |A ∩ B|`.
    pub fn total_range(&self) -> usize {
        self.source_degree + self.target_degree - self.overlap_count()
    }

    /// Connectors held by exactly one (symmetric difference size).
    pub fn exclusive_count(&self) -> usize {
        self.total_range() - self.overlap_count()
    }
}

/// Deduplicated union: every connector of `source`, then the connectors of
/// `target` that `source` lacks. Its length equals [`Overlap::total_range`].
pub fn union(source: &Entity, target: &Entity) -> Vec<ConnectorId> {
    source
        .connectors()
        .chain(target.connectors().filter(|c| !source.has_connector(*c)))
        .collect()
}
