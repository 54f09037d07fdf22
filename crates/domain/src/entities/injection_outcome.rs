//! Terminal record of one injection run

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{RunId, TargetRef};

/// Kind of fault a run injects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    /// Termination of a single instance
    #[default]
    InstanceCrash,
}

impl ScenarioKind {
    /// Stable identifier
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InstanceCrash => "instance_crash",
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How confirmation of the deletion ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletionStatus {
    /// Confirmation never ran
    #[default]
    NotAttempted,
    /// The instance was observed absent
    Confirmed,
    /// Still present when the confirmation budget ran out
    TimedOut,
    /// Stopped by an external cancellation
    Cancelled,
}

impl DeletionStatus {
    /// Human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::NotAttempted => "not attempted",
            Self::Confirmed => "confirmed",
            Self::TimedOut => "timed out",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for DeletionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of looking for a successor instance
///
/// Distinguishes a successor that became ready from a search that gave up at
/// the timeout, even when both report the same elapsed time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecoveryStatus {
    /// Detection never ran (the run stopped earlier)
    #[default]
    NotAttempted,
    /// The target had no group labels; no successor is expected
    NotApplicable,
    /// A successor became ready
    Recovered {
        /// Time from detection start to the ready observation, whole seconds
        #[serde(with = "secs")]
        after: Duration,
        /// Name of the successor
        replacement: String,
    },
    /// No ready successor within the recovery timeout
    TimedOut {
        /// Time spent searching, whole seconds
        #[serde(with = "secs")]
        after: Duration,
    },
    /// Stopped by an external cancellation
    Cancelled {
        /// Time spent searching, whole seconds
        #[serde(with = "secs")]
        after: Duration,
    },
}

impl RecoveryStatus {
    /// Time to recovery, present only when a successor became ready
    #[must_use]
    pub const fn recovered_after(&self) -> Option<Duration> {
        match self {
            Self::Recovered { after, .. } => Some(*after),
            _ => None,
        }
    }

    /// Check if a successor became ready
    #[must_use]
    pub const fn is_recovered(&self) -> bool {
        matches!(self, Self::Recovered { .. })
    }

    /// Time spent searching, for every outcome where a search ran
    #[must_use]
    pub const fn elapsed(&self) -> Option<Duration> {
        match self {
            Self::Recovered { after, .. } | Self::TimedOut { after } | Self::Cancelled { after } => {
                Some(*after)
            },
            Self::NotAttempted | Self::NotApplicable => None,
        }
    }
}

/// Terminal record of one injection run
///
/// Built by the orchestrator while the run progresses and immutable once
/// [`InjectionOutcome::finish`] has been called.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjectionOutcome {
    run_id: RunId,
    scenario_kind: ScenarioKind,
    target: TargetRef,
    injected_at: DateTime<Utc>,
    deleted: bool,
    deletion: DeletionStatus,
    recovery: RecoveryStatus,
    #[serde(with = "option_secs")]
    recovered_after: Option<Duration>,
    message: String,
    completed_at: Option<DateTime<Utc>>,
}

impl InjectionOutcome {
    /// Start the record for a new run, stamping `injected_at` now
    #[must_use]
    pub fn begin(target: TargetRef) -> Self {
        Self::begin_at(target, Utc::now())
    }

    /// Start the record with an explicit start time
    #[must_use]
    pub fn begin_at(target: TargetRef, injected_at: DateTime<Utc>) -> Self {
        Self {
            run_id: RunId::new(),
            scenario_kind: ScenarioKind::InstanceCrash,
            target,
            injected_at,
            deleted: false,
            deletion: DeletionStatus::NotAttempted,
            recovery: RecoveryStatus::NotAttempted,
            recovered_after: None,
            message: String::new(),
            completed_at: None,
        }
    }

    /// Record that the control plane accepted the deletion request
    pub fn mark_deleted(&mut self) {
        self.deleted = true;
    }

    /// Record how deletion confirmation ended
    pub fn set_deletion(&mut self, status: DeletionStatus) {
        self.deletion = status;
    }

    /// Record the recovery result
    ///
    /// Ignored unless the deletion was accepted, so `recovered_after` can
    /// never be present on a run that deleted nothing.
    pub fn set_recovery(&mut self, status: RecoveryStatus) {
        if !self.deleted {
            return;
        }
        self.recovered_after = status.recovered_after();
        self.recovery = status;
    }

    /// Seal the record with its summary message
    #[must_use]
    pub fn finish(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self.completed_at = Some(Utc::now());
        self
    }

    /// Run identifier
    #[must_use]
    pub const fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Always [`ScenarioKind::InstanceCrash`]
    #[must_use]
    pub const fn scenario_kind(&self) -> ScenarioKind {
        self.scenario_kind
    }

    /// The destroyed (or attempted) target
    #[must_use]
    pub const fn target(&self) -> &TargetRef {
        &self.target
    }

    /// When the run started
    #[must_use]
    pub const fn injected_at(&self) -> DateTime<Utc> {
        self.injected_at
    }

    /// Whether the deletion request was accepted (not whether it completed)
    #[must_use]
    pub const fn deleted(&self) -> bool {
        self.deleted
    }

    /// Deletion confirmation result
    #[must_use]
    pub const fn deletion(&self) -> DeletionStatus {
        self.deletion
    }

    /// Recovery detection result
    #[must_use]
    pub const fn recovery(&self) -> &RecoveryStatus {
        &self.recovery
    }

    /// Time to recovery, present only if a successor became ready in time
    #[must_use]
    pub const fn recovered_after(&self) -> Option<Duration> {
        self.recovered_after
    }

    /// Human-readable summary
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// When the run finished
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }
}

mod secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

mod option_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::ref_option)] // signature required by serde(with)
    pub fn serialize<S: Serializer>(
        value: &Option<Duration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => serializer.serialize_some(&d.as_secs()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Duration>, D::Error> {
        Option::<u64>::deserialize(deserializer).map(|secs| secs.map(Duration::from_secs))
    }
}
