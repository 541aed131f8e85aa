//! # Coincidence Data Model
//!
//! Clean DTOs shared by the registry, the engine and the output layer.
//!
//! Design rule: this module is pure data — no I/O, no locking, no statistics.

pub mod connector;
pub mod edge;
pub mod entity;

pub use connector::{Connector, ConnectorId};
pub use edge::{Edge, EDGE_SEPARATOR, edge_key};
pub use entity::Entity;
