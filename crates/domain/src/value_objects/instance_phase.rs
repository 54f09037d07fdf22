//! Instance lifecycle phase

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle phase reported by the control plane for an instance
///
/// Mirrors the Kubernetes pod phases. Phases this crate does not know about
/// are kept verbatim in [`InstancePhase::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstancePhase {
    /// Accepted but not all containers are running yet
    Pending,
    /// Bound to a node with at least one container running
    Running,
    /// All containers terminated successfully
    Succeeded,
    /// All containers terminated, at least one in failure
    Failed,
    /// State could not be obtained
    #[default]
    Unknown,
    /// Implementation-defined phase
    Other(String),
}

impl InstancePhase {
    /// Parse the control-plane spelling (`"Running"`, `"Pending"`, ...)
    ///
    /// A missing phase maps to [`InstancePhase::Unknown`].
    #[must_use]
    pub fn from_api(phase: Option<&str>) -> Self {
        match phase {
            Some("Pending") => Self::Pending,
            Some("Running") => Self::Running,
            Some("Succeeded") => Self::Succeeded,
            Some("Failed") => Self::Failed,
            Some("Unknown") | None => Self::Unknown,
            Some(other) => Self::Other(other.to_string()),
        }
    }

    /// Check if the phase is `Running`
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    /// Get the control-plane spelling
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::Running => "Running",
            Self::Succeeded => "Succeeded",
            Self::Failed => "Failed",
            Self::Unknown => "Unknown",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for InstancePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
