//! Infrastructure layer - Adapters for external systems
//!
//! Implements the cluster control port on top of the Kubernetes API and
//! provides configuration loading and telemetry setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, ClusterAppConfig, DEFAULT_CONFIG_FILE};
pub use telemetry::{TelemetryConfig, TelemetryError, TelemetryGuard, init_telemetry};
