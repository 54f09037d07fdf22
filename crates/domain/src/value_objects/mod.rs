//! Value Objects - Immutable, identity-less domain primitives

mod group_labels;
mod instance_phase;
mod run_id;
mod target_ref;

pub use group_labels::GroupLabels;
pub use instance_phase::InstancePhase;
pub use run_id::RunId;
pub use target_ref::TargetRef;
