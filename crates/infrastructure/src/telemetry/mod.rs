//! Logging and distributed tracing
//!
//! Console logging through `tracing-subscriber` plus optional OTLP span export.

mod otel;

pub use otel::{TelemetryConfig, TelemetryError, TelemetryGuard, init_telemetry};
