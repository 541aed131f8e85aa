//! In-memory registry.
//!
//! This is the reference implementation of `Registry`. Tables are plain
//! vectors plus `hashbrown` indexes; building requires `&mut self`, reading
//! only `&self`, so a built registry can be shared across workers freely.
//!
//! ## Load rules
//!
//! - Connectors and entities are created on first sight, in load order.
//! - Repeating an `(entity, connector)` edge bumps the occurrence count and
//!   keeps the first weight.
//! - Two different `(entity, connector)` pairs that compose to the same
//!   `"<entity>-<connector>"` key are rejected.

use hashbrown::HashMap;

use crate::model::*;
use crate::{Error, Result};
use super::Registry;

// ============================================================================
// MemoryRegistry
// ============================================================================

/// In-memory entity/connector/edge tables.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    entities: Vec<Entity>,
    /// entity name → index into `entities`
    entity_index: HashMap<String, usize>,
    connectors: Vec<Connector>,
    /// connector name → id
    connector_index: HashMap<String, ConnectorId>,
    /// composite key → edge
    edges: HashMap<String, Edge>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connector, returning the existing id if already known.
    pub fn add_connector(&mut self, name: &str) -> ConnectorId {
        if let Some(id) = self.connector_index.get(name) {
            return *id;
        }
        let id = ConnectorId(self.connectors.len() as u32);
        self.connectors.push(Connector::new(id, name));
        self.connector_index.insert(name.to_string(), id);
        id
    }

    /// Register an entity with no edges yet.
    pub fn add_entity(&mut self, name: &str) -> Result<usize> {
        if self.entity_index.contains_key(name) {
            return Err(Error::ConstraintViolation(format!("Duplicate entity '{name}'")));
        }
        Ok(self.insert_entity(name))
    }

    /// Record an edge between `entity` and `connector` with `weight`.
    pub fn add_edge(&mut self, entity: &str, connector: &str, weight: f64) -> Result<()> {
        if !weight.is_finite() {
            return Err(Error::ConstraintViolation(format!(
                "Edge {} has non-finite weight {weight}",
                edge_key(entity, connector)
            )));
        }

        let key = edge_key(entity, connector);
        if let Some(existing) = self.edges.get(&key) {
            let same_pair = existing.entity == entity
                && self.connector_index.get(connector) == Some(&existing.connector);
            if !same_pair {
                return Err(Error::ConstraintViolation(format!(
                    "Edge key '{key}' is ambiguous: already used by entity '{}'",
                    existing.entity
                )));
            }
        }

        let connector_id = self.add_connector(connector);
        if !self.edges.contains_key(&key) {
            self.edges.insert(key, Edge::new(entity, connector_id, connector, weight));
        }

        let idx = match self.entity_index.get(entity) {
            Some(idx) => *idx,
            None => self.insert_entity(entity),
        };
        self.entities[idx].touch(connector_id);
        Ok(())
    }

    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entity_index.get(name).map(|idx| &self.entities[*idx])
    }

    pub fn connector_id(&self, name: &str) -> Option<ConnectorId> {
        self.connector_index.get(name).copied()
    }

    fn insert_entity(&mut self, name: &str) -> usize {
        let idx = self.entities.len();
        self.entities.push(Entity::new(name));
        self.entity_index.insert(name.to_string(), idx);
        idx
    }
}

// ============================================================================
// Registry impl
// ============================================================================

impl Registry for MemoryRegistry {
    fn entities(&self) -> &[Entity] {
        &self.entities
    }

    fn connector(&self, id: ConnectorId) -> Option<&Connector> {
        self.connectors.get(id.0 as usize)
    }

    fn connector_count(&self) -> usize {
        self.connectors.len()
    }

    fn edge(&self, key: &str) -> Result<&Edge> {
        self.edges
            .get(key)
            .ok_or_else(|| Error::NotFound(format!("Edge '{key}'")))
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

// ============================================================================
// Tests
// ============================================================================
