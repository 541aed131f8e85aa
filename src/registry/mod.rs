//! # Registry Trait
//!
//! The contract between the coincidence engine and whatever loaded the
//! dataset. The engine only reads through this trait; nothing mutates a
//! registry while an analysis is running.
//!
//! ## Implementations
//!
//! | Registry | Module | Description |
//! |----------|--------|-------------|
//! | `MemoryRegistry` | `memory` | In-memory tables built edge by edge |

pub mod memory;

use crate::model::*;
use crate::Result;

pub use memory::MemoryRegistry;

/// Read-only lookup tables for entities, connectors and edges.
///
/// `Sync` because pair evaluation reads the registry from every worker.
pub trait Registry: Sync {
    /// All entities, in load order.
    fn entities(&self) -> &[Entity];

    fn connector(&self, id: ConnectorId) -> Option<&Connector>;

    /// Number of distinct connectors known to the dataset.
    fn connector_count(&self) -> usize;

    /// Edge by composite key. Fails with `NotFound` if absent.
    fn edge(&self, key: &str) -> Result<&Edge>;

    /// Total number of distinct edges.
    fn edge_count(&self) -> usize;

    /// Edge joining `entity` to `connector`.
    fn edge_between(&self, entity: &Entity, connector: ConnectorId) -> Result<&Edge> {
        let connector = self.connector(connector).ok_or_else(|| {
            crate::Error::NotFound(format!("Connector {connector}"))
        })?;
        self.edge(&edge_key(&entity.name, &connector.name))
    }
}
