//! Application layer - Use cases and orchestration
//!
//! Contains the fault-injection engine: snapshot capture, deletion
//! confirmation, recovery detection and the orchestrating service, plus the
//! port through which they reach the cluster.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
