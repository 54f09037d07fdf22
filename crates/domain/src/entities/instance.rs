//! Workload instance as observed through the cluster control plane

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{GroupLabels, InstancePhase};

/// Point-in-time readiness observation of an instance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessState {
    /// Lifecycle phase
    pub phase: InstancePhase,
    /// One entry per declared container
    pub container_ready: Vec<bool>,
}

impl ReadinessState {
    /// Create a readiness observation
    #[must_use]
    pub const fn new(phase: InstancePhase, container_ready: Vec<bool>) -> Self {
        Self {
            phase,
            container_ready,
        }
    }

    /// An instance is ready iff it is `Running`, reports at least one
    /// container, and every container is ready.
    ///
    /// Zero containers is never ready.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.phase.is_running()
            && !self.container_ready.is_empty()
            && self.container_ready.iter().all(|ready| *ready)
    }
}

/// A single running copy of a workload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    /// Instance name
    pub name: String,
    /// Namespace the instance lives in
    pub namespace: String,
    /// Control-plane unique id; differs between an instance and a successor
    /// that reuses its name
    pub uid: Option<String>,
    /// Node the instance is scheduled on, if any
    pub node: Option<String>,
    /// Creation timestamp reported by the control plane
    pub created_at: Option<DateTime<Utc>>,
    /// Label set
    pub labels: GroupLabels,
    /// Phase and per-container readiness
    pub readiness: ReadinessState,
}

impl Instance {
    /// Create an instance with no labels, node or readiness information
    #[must_use]
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            uid: None,
            node: None,
            created_at: None,
            labels: GroupLabels::new(),
            readiness: ReadinessState::default(),
        }
    }

    /// Set the unique id
    #[must_use]
    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    /// Whether this instance is the incarnation identified by `uid`
    ///
    /// Only a positive match of two known ids counts; a successor may reuse
    /// the name of its predecessor.
    #[must_use]
    pub fn same_incarnation(&self, uid: Option<&str>) -> bool {
        matches!((self.uid.as_deref(), uid), (Some(mine), Some(theirs)) if mine == theirs)
    }

    /// Set the label set
    #[must_use]
    pub fn with_labels(mut self, labels: GroupLabels) -> Self {
        self.labels = labels;
        self
    }

    /// Set the readiness state
    #[must_use]
    pub fn with_readiness(mut self, readiness: ReadinessState) -> Self {
        self.readiness = readiness;
        self
    }

    /// Set the node name
    #[must_use]
    pub fn with_node(mut self, node: impl Into<String>) -> Self {
        self.node = Some(node.into());
        self
    }

    /// Set the creation timestamp
    #[must_use]
    pub const fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Shorthand for the readiness predicate
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.readiness.is_ready()
    }

    /// Current phase
    #[must_use]
    pub const fn phase(&self) -> &InstancePhase {
        &self.readiness.phase
    }

    /// Reduce to the listing view
    #[must_use]
    pub fn summary(&self) -> InstanceSummary {
        InstanceSummary {
            name: self.name.clone(),
            phase: self.readiness.phase.clone(),
            node: self.node.clone(),
            created: self.created_at,
        }
    }
}

/// Listing view of an instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceSummary {
    /// Instance name
    pub name: String,
    /// Lifecycle phase
    pub phase: InstancePhase,
    /// Node the instance is scheduled on
    pub node: Option<String>,
    /// Creation timestamp
    pub created: Option<DateTime<Utc>>,
}
