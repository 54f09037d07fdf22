//! Pre-fault identity of a target instance

use serde::{Deserialize, Serialize};

use super::Instance;
use crate::value_objects::{GroupLabels, TargetRef};

/// Identity and grouping labels captured before the target is destroyed
///
/// Read-only once captured. The group labels are the equality selector used
/// to find a successor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceSnapshot {
    target: TargetRef,
    uid: Option<String>,
    group_labels: GroupLabels,
}

impl InstanceSnapshot {
    /// Create a snapshot from parts
    #[must_use]
    pub const fn new(target: TargetRef, uid: Option<String>, group_labels: GroupLabels) -> Self {
        Self {
            target,
            uid,
            group_labels,
        }
    }

    /// Capture the snapshot of a fetched instance
    #[must_use]
    pub fn of(target: TargetRef, instance: &Instance) -> Self {
        Self::new(target, instance.uid.clone(), instance.labels.clone())
    }

    /// The target this snapshot describes
    #[must_use]
    pub const fn target(&self) -> &TargetRef {
        &self.target
    }

    /// Unique id of the destroyed incarnation, if the control plane reported one
    #[must_use]
    pub fn uid(&self) -> Option<&str> {
        self.uid.as_deref()
    }

    /// Labels a successor must carry
    #[must_use]
    pub const fn group_labels(&self) -> &GroupLabels {
        &self.group_labels
    }

    /// Whether a managing controller is expected to create a successor
    #[must_use]
    pub fn expects_successor(&self) -> bool {
        !self.group_labels.is_empty()
    }

    /// Check if `candidate` could be a successor of the captured instance
    ///
    /// It must carry every group label and must not be the captured
    /// incarnation itself (for example while that one is still terminating).
    #[must_use]
    pub fn is_successor(&self, candidate: &Instance) -> bool {
        self.group_labels.matches(&candidate.labels) && !candidate.same_incarnation(self.uid())
    }
}
