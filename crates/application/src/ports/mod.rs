//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod cluster_control_port;

pub use cluster_control_port::ClusterControlPort;
#[cfg(test)]
pub use cluster_control_port::MockClusterControlPort;
