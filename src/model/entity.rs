//! Entity ("alpha"): a named unit under coincidence testing.

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use super::ConnectorId;

/// An entity and the connectors it touches.
///
/// The occurrence count per connector is kept for completeness; the engine
/// only looks at presence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    pub edges: BTreeMap<ConnectorId, u32>,
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            edges: BTreeMap::new(),
        }
    }

    pub fn with_connector(mut self, connector: ConnectorId) -> Self {
        self.touch(connector);
        self
    }

    /// Record one more occurrence of `connector`.
    pub fn touch(&mut self, connector: ConnectorId) {
        *self.edges.entry(connector).or_insert(0) += 1;
    }

    /// Number of distinct connectors (the entity's degree).
    pub fn degree(&self) -> usize {
        self.edges.len()
    }

    pub fn has_connector(&self, connector: ConnectorId) -> bool {
        self.edges.contains_key(&connector)
    }

    pub fn connectors(&self) -> impl Iterator<Item = ConnectorId> + '_ {
        self.edges.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touch_counts_occurrences_not_degree() {
        let mut e = Entity::new("X");
        e.touch(ConnectorId(1));
        e.touch(ConnectorId(1));
        e.touch(ConnectorId(2));
        assert_eq!(e.degree(), 2);
        assert_eq!(e.edges[&ConnectorId(1)], 2);
    }

    #[test]
    fn test_has_connector() {
        let e = Entity::new("X").with_connector(ConnectorId(7));
        assert!(e.has_connector(ConnectorId(7)));
        assert!(!e.has_connector(ConnectorId(8)));
    }
}
