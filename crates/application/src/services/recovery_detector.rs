//! Recovery detection
//!
//! Looks for a successor carrying the snapshot's group labels and measures
//! how long it takes until one is fully ready.

use std::sync::Arc;
use std::time::Duration;

use domain::{InstanceSnapshot, RecoveryStatus};
use tokio::time::{Instant, sleep};
use tracing::{debug, info, instrument, warn};

use super::{CancelSignal, InjectionConfig};
use crate::ports::ClusterControlPort;

/// Polls for a ready successor of a destroyed instance
pub struct RecoveryDetector {
    cluster: Arc<dyn ClusterControlPort>,
    poll_interval: Duration,
    timeout: Duration,
}

impl std::fmt::Debug for RecoveryDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecoveryDetector")
            .field("cluster", &"<ClusterControlPort>")
            .field("poll_interval", &self.poll_interval)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Truncate to whole seconds
const fn whole_secs(elapsed: Duration) -> Duration {
    Duration::from_secs(elapsed.as_secs())
}

impl RecoveryDetector {
    /// Create a detector with the default timing (3s interval, 120s budget)
    #[must_use]
    pub fn new(cluster: Arc<dyn ClusterControlPort>) -> Self {
        Self::from_config(cluster, &InjectionConfig::default())
    }

    /// Create a detector using the recovery timing of `config`
    #[must_use]
    pub fn from_config(cluster: Arc<dyn ClusterControlPort>, config: &InjectionConfig) -> Self {
        Self {
            cluster,
            poll_interval: config.recovery_poll_interval(),
            timeout: config.recovery_timeout(),
        }
    }

    /// Override the poll interval
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Override the detection budget
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Search for a ready successor of `snapshot`
    ///
    /// The first poll happens immediately. The first candidate found ready,
    /// in the order the port lists them, ends the search. Listing errors only
    /// cost the current round. A snapshot without group labels yields
    /// [`RecoveryStatus::NotApplicable`] without touching the port.
    #[instrument(skip(self, snapshot, cancel), fields(pod = %snapshot.target()))]
    pub async fn detect(&self, snapshot: &InstanceSnapshot, cancel: &CancelSignal) -> RecoveryStatus {
        if !snapshot.expects_successor() {
            return RecoveryStatus::NotApplicable;
        }

        let namespace = snapshot.target().namespace();
        let selector = snapshot.group_labels();
        let start = Instant::now();

        while start.elapsed() < self.timeout {
            match self.cluster.list_instances(namespace, selector).await {
                Ok(candidates) => {
                    let ready = candidates
                        .iter()
                        .find(|candidate| snapshot.is_successor(candidate) && candidate.is_ready());

                    if let Some(successor) = ready {
                        let after = whole_secs(start.elapsed());
                        info!(
                            replacement = %successor.name,
                            recovered_after_secs = after.as_secs(),
                            "Successor ready"
                        );
                        return RecoveryStatus::Recovered {
                            after,
                            replacement: successor.name.clone(),
                        };
                    }

                    debug!(candidates = candidates.len(), "No ready successor yet");
                },
                Err(e) => {
                    warn!(error = %e, "Listing successor candidates failed, retrying");
                },
            }

            tokio::select! {
                () = sleep(self.poll_interval) => {},
                () = cancel.cancelled() => {
                    let after = whole_secs(start.elapsed());
                    warn!(elapsed_secs = after.as_secs(), "Recovery detection cancelled");
                    return RecoveryStatus::Cancelled { after };
                }
            }
        }

        let after = whole_secs(start.elapsed());
        warn!(
            timeout_secs = self.timeout.as_secs(),
            elapsed_secs = after.as_secs(),
            "No ready successor within recovery timeout"
        );
        RecoveryStatus::TimedOut { after }
    }
}
