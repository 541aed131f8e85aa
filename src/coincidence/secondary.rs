//! Secondary statistics for significant co-occurrence.

use crate::model::{ConnectorId, Entity};
use crate::registry::Registry;
use crate::Result;

/// Mean absolute weight difference over the shared connectors.
///
/// Returns `NaN` when nothing is shared. A shared connector without an edge
/// in the registry is a `NotFound` error.
pub fn avg_synthetic_distance<R: Registry + ?Sized>(
    registry: &R,
    source: &Entity,
    target: &Entity,
    shared: &[ConnectorId],
) -> Result<f64> {
    if shared.is_empty() {
        return Ok(f64::NAN);
    }

    let mut sum = 0.0;
    for connector in shared {
        let w1 = registry.edge_between(source, *connector)?.weight;
        let w2 = registry.edge_between(target, *connector)?.weight;
        sum += (w1 - w2).abs();
    }
    Ok(sum / shared.len() as f64)
}
