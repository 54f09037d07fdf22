//! Domain layer for podchaos
//!
//! Contains the vocabulary of a fault-injection run: targets, instances,
//! readiness, snapshots and the outcome record. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
