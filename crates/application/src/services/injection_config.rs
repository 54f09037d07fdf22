//! Timing configuration for injection runs

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Default interval between deletion confirmation polls in seconds
const DEFAULT_DELETION_POLL_INTERVAL_SECS: u64 = 2;

/// Default budget for confirming a deletion in seconds
const DEFAULT_DELETION_TIMEOUT_SECS: u64 = 60;

/// Default interval between recovery polls in seconds
const DEFAULT_RECOVERY_POLL_INTERVAL_SECS: u64 = 3;

/// Default budget for detecting a ready successor in seconds
const DEFAULT_RECOVERY_TIMEOUT_SECS: u64 = 120;

/// Configuration for the polling loops of an injection run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjectionConfig {
    /// Seconds between deletion confirmation polls (default: 2)
    #[serde(default = "default_deletion_poll_interval")]
    pub deletion_poll_interval_secs: u64,

    /// Seconds to wait for the target to disappear (default: 60)
    ///
    /// Running out is not an error; detection proceeds anyway.
    #[serde(default = "default_deletion_timeout")]
    pub deletion_timeout_secs: u64,

    /// Seconds between recovery polls (default: 3)
    #[serde(default = "default_recovery_poll_interval")]
    pub recovery_poll_interval_secs: u64,

    /// Seconds to wait for a ready successor (default: 120)
    #[serde(default = "default_recovery_timeout")]
    pub recovery_timeout_secs: u64,

    /// Namespace used by front ends when none is given (default: "default")
    #[serde(default = "default_namespace")]
    pub default_namespace: String,
}

const fn default_deletion_poll_interval() -> u64 {
    DEFAULT_DELETION_POLL_INTERVAL_SECS
}

const fn default_deletion_timeout() -> u64 {
    DEFAULT_DELETION_TIMEOUT_SECS
}

const fn default_recovery_poll_interval() -> u64 {
    DEFAULT_RECOVERY_POLL_INTERVAL_SECS
}

const fn default_recovery_timeout() -> u64 {
    DEFAULT_RECOVERY_TIMEOUT_SECS
}

fn default_namespace() -> String {
    "default".to_string()
}

impl Default for InjectionConfig {
    fn default() -> Self {
        Self {
            deletion_poll_interval_secs: default_deletion_poll_interval(),
            deletion_timeout_secs: default_deletion_timeout(),
            recovery_poll_interval_secs: default_recovery_poll_interval(),
            recovery_timeout_secs: default_recovery_timeout(),
            default_namespace: default_namespace(),
        }
    }
}

impl InjectionConfig {
    /// Interval between deletion confirmation polls
    #[must_use]
    pub const fn deletion_poll_interval(&self) -> Duration {
        Duration::from_secs(self.deletion_poll_interval_secs)
    }

    /// Budget for deletion confirmation
    #[must_use]
    pub const fn deletion_timeout(&self) -> Duration {
        Duration::from_secs(self.deletion_timeout_secs)
    }

    /// Interval between recovery polls
    #[must_use]
    pub const fn recovery_poll_interval(&self) -> Duration {
        Duration::from_secs(self.recovery_poll_interval_secs)
    }

    /// Budget for recovery detection
    #[must_use]
    pub const fn recovery_timeout(&self) -> Duration {
        Duration::from_secs(self.recovery_timeout_secs)
    }

    /// Check that every interval and timeout is usable
    pub fn validate(&self) -> Result<(), ApplicationError> {
        let pairs = [
            (
                "deletion",
                self.deletion_poll_interval_secs,
                self.deletion_timeout_secs,
            ),
            (
                "recovery",
                self.recovery_poll_interval_secs,
                self.recovery_timeout_secs,
            ),
        ];

        for (phase, interval, timeout) in pairs {
            if interval == 0 || timeout == 0 {
                return Err(ApplicationError::Configuration(format!(
                    "{phase} poll interval and timeout must be positive"
                )));
            }
            if interval > timeout {
                return Err(ApplicationError::Configuration(format!(
                    "{phase} poll interval ({interval}s) exceeds its timeout ({timeout}s)"
                )));
            }
        }

        if self.default_namespace.trim().is_empty() {
            return Err(ApplicationError::Configuration(
                "default namespace must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
