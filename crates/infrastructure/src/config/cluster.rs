//! Kubernetes API connection settings

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default connect timeout for the API server in seconds
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Default read timeout for API requests in seconds
const DEFAULT_READ_TIMEOUT_SECS: u64 = 30;

/// How to reach the Kubernetes API server
///
/// Without `kubeconfig` and `context` the client configuration is inferred
/// (`KUBECONFIG`, `~/.kube/config`, then in-cluster service account).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterAppConfig {
    /// Explicit kubeconfig file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubeconfig: Option<PathBuf>,

    /// Kubeconfig context to use instead of the current one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// Connect timeout in seconds (default: 5)
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Read timeout in seconds (default: 30)
    #[serde(default = "default_read_timeout")]
    pub read_timeout_secs: u64,
}

const fn default_connect_timeout() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

const fn default_read_timeout() -> u64 {
    DEFAULT_READ_TIMEOUT_SECS
}

impl Default for ClusterAppConfig {
    fn default() -> Self {
        Self {
            kubeconfig: None,
            context: None,
            connect_timeout_secs: default_connect_timeout(),
            read_timeout_secs: default_read_timeout(),
        }
    }
}

impl ClusterAppConfig {
    /// Connect timeout as a duration
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Read timeout as a duration
    #[must_use]
    pub const fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    /// Whether an explicit kubeconfig file or context was requested
    #[must_use]
    pub const fn uses_explicit_kubeconfig(&self) -> bool {
        self.kubeconfig.is_some() || self.context.is_some()
    }
}
