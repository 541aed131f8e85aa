//! Connector ("beta"): the category that makes edges comparable across entities.

use serde::{Deserialize, Serialize};

/// Opaque connector identifier.
///
/// Two entities share a connector iff they hold the same `ConnectorId`.
/// Ids are only meaningful within the registry that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ConnectorId(pub u32);

impl std::fmt::Display for ConnectorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connector {
    pub id: ConnectorId,
    pub name: String,
}

impl Connector {
    pub fn new(id: ConnectorId, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}
