//! Weighted edge between an entity and a connector.

use serde::{Deserialize, Serialize};
use super::ConnectorId;

/// Joins entity and connector names into an edge key.
pub const EDGE_SEPARATOR: char = '-';

/// Composite edge key: `"<entity>-<connector>"`.
pub fn edge_key(entity: &str, connector: &str) -> String {
    let mut key = String::with_capacity(entity.len() + connector.len() + 1);
    key.push_str(entity);
    key.push(EDGE_SEPARATOR);
    key.push_str(connector);
    key
}

/// An edge, immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Composite key, see [`edge_key`].
    pub key: String,
    /// Owning entity name.
    pub entity: String,
    pub connector: ConnectorId,
    pub weight: f64,
}

impl Edge {
    pub fn new(entity: impl Into<String>, connector: ConnectorId, connector_name: &str, weight: f64) -> Self {
        let entity = entity.into();
        Self {
            key: edge_key(&entity, connector_name),
            entity,
            connector,
            weight,
        }
    }
}
