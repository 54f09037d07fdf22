//! Deletion confirmation
//!
//! Polls the control plane until the deleted instance is observed absent.
//! Running out of time is a soft outcome: the run carries on and the
//! deletion is assumed to still be in flight.

use std::sync::Arc;
use std::time::Duration;

use domain::{DeletionStatus, TargetRef};
use tokio::time::{Instant, sleep};
use tracing::{debug, info, instrument, warn};

use super::{CancelSignal, InjectionConfig};
use crate::error::ApplicationError;
use crate::ports::ClusterControlPort;

/// Polls until a deleted instance is gone
pub struct DeletionConfirmer {
    cluster: Arc<dyn ClusterControlPort>,
    poll_interval: Duration,
    timeout: Duration,
}

impl std::fmt::Debug for DeletionConfirmer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeletionConfirmer")
            .field("cluster", &"<ClusterControlPort>")
            .field("poll_interval", &self.poll_interval)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl DeletionConfirmer {
    /// Create a confirmer with the default timing (2s interval, 60s budget)
    #[must_use]
    pub fn new(cluster: Arc<dyn ClusterControlPort>) -> Self {
        Self::from_config(cluster, &InjectionConfig::default())
    }

    /// Create a confirmer using the deletion timing of `config`
    #[must_use]
    pub fn from_config(cluster: Arc<dyn ClusterControlPort>, config: &InjectionConfig) -> Self {
        Self {
            cluster,
            poll_interval: config.deletion_poll_interval(),
            timeout: config.deletion_timeout(),
        }
    }

    /// Override the poll interval
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Override the confirmation budget
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Wait until `target` is absent, the budget runs out, or `cancel` fires
    ///
    /// Only [`ApplicationError::NotFound`] counts as absence. Any other read
    /// error is returned and ends the run.
    #[instrument(skip(self, target, cancel), fields(pod = %target))]
    pub async fn confirm(
        &self,
        target: &TargetRef,
        cancel: &CancelSignal,
    ) -> Result<DeletionStatus, ApplicationError> {
        let start = Instant::now();

        while start.elapsed() < self.timeout {
            match self.cluster.get_instance(target).await {
                Ok(instance) => {
                    debug!(phase = %instance.phase(), "Instance still present");
                },
                Err(e) if e.is_not_found() => {
                    info!(
                        elapsed_secs = start.elapsed().as_secs(),
                        "Instance deletion confirmed"
                    );
                    return Ok(DeletionStatus::Confirmed);
                },
                Err(e) => return Err(e),
            }

            tokio::select! {
                () = sleep(self.poll_interval) => {},
                () = cancel.cancelled() => {
                    warn!("Deletion confirmation cancelled");
                    return Ok(DeletionStatus::Cancelled);
                }
            }
        }

        warn!(
            timeout_secs = self.timeout.as_secs(),
            "Instance still present after deletion timeout, continuing"
        );
        Ok(DeletionStatus::TimedOut)
    }
}
