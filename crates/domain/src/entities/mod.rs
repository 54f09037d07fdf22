//! Domain entities - Objects with identity and lifecycle

mod injection_outcome;
mod instance;
mod instance_snapshot;

pub use injection_outcome::{DeletionStatus, InjectionOutcome, RecoveryStatus, ScenarioKind};
pub use instance::{Instance, InstanceSummary, ReadinessState};
pub use instance_snapshot::InstanceSnapshot;
