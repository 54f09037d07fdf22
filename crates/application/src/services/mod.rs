//! Application services - Use case implementations

mod cancel;
mod deletion_confirmer;
mod injection_config;
mod injection_service;
mod recovery_detector;
mod snapshot;
#[cfg(test)]
mod test_support;

pub use cancel::{CancelHandle, CancelSignal};
pub use deletion_confirmer::DeletionConfirmer;
pub use injection_config::InjectionConfig;
pub use injection_service::InjectionService;
pub use recovery_detector::RecoveryDetector;
pub use snapshot::capture_snapshot;
