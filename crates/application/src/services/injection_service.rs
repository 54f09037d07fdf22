//! Injection orchestration
//!
//! Runs one instance-crash experiment: snapshot the target, delete it,
//! confirm it is gone, then wait for a ready successor. Every failure is
//! folded into the returned [`InjectionOutcome`].

use std::sync::Arc;

use domain::{
    DeletionStatus, GroupLabels, InjectionOutcome, Instance, InstanceSummary, RecoveryStatus,
    TargetRef,
};
use tracing::{Span, error, info, instrument, warn};

use super::{
    CancelSignal, DeletionConfirmer, InjectionConfig, RecoveryDetector, capture_snapshot,
};
use crate::error::ApplicationError;
use crate::ports::ClusterControlPort;

const CANCELLED_BEFORE_DELETE: &str = "Run cancelled before deletion; nothing was deleted";

/// Orchestrates fault injection runs against a cluster
pub struct InjectionService {
    cluster: Arc<dyn ClusterControlPort>,
    config: InjectionConfig,
}

impl std::fmt::Debug for InjectionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InjectionService")
            .field("cluster", &"<ClusterControlPort>")
            .field("config", &self.config)
            .finish()
    }
}

impl InjectionService {
    /// Create a service with default timing
    #[must_use]
    pub fn new(cluster: Arc<dyn ClusterControlPort>) -> Self {
        Self {
            cluster,
            config: InjectionConfig::default(),
        }
    }

    /// Use custom timing
    #[must_use]
    pub fn with_config(mut self, config: InjectionConfig) -> Self {
        self.config = config;
        self
    }

    /// Current timing configuration
    #[must_use]
    pub const fn config(&self) -> &InjectionConfig {
        &self.config
    }

    /// Run one injection with bounded timeouts and no external cancellation
    pub async fn inject(&self, target: &TargetRef) -> InjectionOutcome {
        self.inject_with_cancel(target, &CancelSignal::never()).await
    }

    /// Run one injection, stopping early if `cancel` fires
    ///
    /// Never fails: errors end the run and are described in the outcome
    /// message. `deleted` is set as soon as the control plane accepts the
    /// deletion request.
    #[instrument(
        skip(self, target, cancel),
        fields(
            run_id = tracing::field::Empty,
            namespace = %target.namespace(),
            name = %target.name()
        )
    )]
    pub async fn inject_with_cancel(
        &self,
        target: &TargetRef,
        cancel: &CancelSignal,
    ) -> InjectionOutcome {
        let mut outcome = InjectionOutcome::begin(target.clone());
        Span::current().record("run_id", tracing::field::display(outcome.run_id()));
        info!("Starting instance crash injection");

        let read = tokio::select! {
            biased;
            () = cancel.cancelled() => None,
            result = capture_snapshot(self.cluster.as_ref(), target) => Some(result),
        };
        let Some(read) = read else {
            warn!("Run cancelled before deletion");
            return outcome.finish(CANCELLED_BEFORE_DELETE);
        };

        let snapshot = match read {
            Ok(snapshot) => snapshot,
            Err(e) if e.is_not_found() => {
                warn!("Target does not exist, nothing deleted");
                return outcome.finish(format!("Target not found: {target}"));
            },
            Err(e) => {
                error!(error = %e, "Failed to read target");
                return outcome.finish(format!("Could not read target: {e}"));
            },
        };

        if cancel.is_cancelled() {
            warn!("Run cancelled before deletion");
            return outcome.finish(CANCELLED_BEFORE_DELETE);
        }

        if let Err(e) = self.cluster.delete_instance(target).await {
            error!(error = %e, "Deletion rejected");
            return outcome.finish(format!("Deletion rejected: {e}"));
        }
        outcome.mark_deleted();
        info!("Deletion accepted");

        let confirmer = DeletionConfirmer::from_config(Arc::clone(&self.cluster), &self.config);
        let deletion = match confirmer.confirm(target, cancel).await {
            Ok(status) => status,
            Err(e) => {
                error!(error = %e, "Deletion confirmation failed");
                return outcome.finish(format!(
                    "Deletion requested but confirmation failed: {e}"
                ));
            },
        };
        outcome.set_deletion(deletion);

        if deletion == DeletionStatus::Cancelled {
            return outcome.finish("Deletion requested; run cancelled before deletion was confirmed");
        }

        if !snapshot.expects_successor() {
            info!("Target has no group labels, skipping recovery detection");
            outcome.set_recovery(RecoveryStatus::NotApplicable);
            let message = self.summarize(deletion, outcome.recovery());
            return outcome.finish(message);
        }

        let detector = RecoveryDetector::from_config(Arc::clone(&self.cluster), &self.config);
        let recovery = detector.detect(&snapshot, cancel).await;
        let message = self.summarize(deletion, &recovery);
        outcome.set_recovery(recovery);

        info!(
            recovered_after_secs = outcome.recovered_after().map(|d| d.as_secs()),
            "Injection run finished"
        );
        outcome.finish(message)
    }

    fn summarize(&self, deletion: DeletionStatus, recovery: &RecoveryStatus) -> String {
        let message = match recovery {
            RecoveryStatus::Recovered { after, replacement } => format!(
                "Instance deleted; replacement {replacement} ready after {}s",
                after.as_secs()
            ),
            RecoveryStatus::TimedOut { after } => format!(
                "Instance deleted; no ready replacement within {}s",
                after.as_secs()
            ),
            RecoveryStatus::Cancelled { after } => format!(
                "Instance deleted; recovery detection cancelled after {}s",
                after.as_secs()
            ),
            RecoveryStatus::NotApplicable | RecoveryStatus::NotAttempted => {
                "Instance deleted; target has no group labels, no recovery signal expected"
                    .to_string()
            },
        };

        if deletion == DeletionStatus::TimedOut {
            format!(
                "{message} (removal not confirmed within {}s)",
                self.config.deletion_timeout_secs
            )
        } else {
            message
        }
    }

    /// List the instances of a namespace for display
    ///
    /// Best effort: a failing control plane is logged and yields an empty list.
    #[instrument(skip(self))]
    pub async fn list_instances_summary(&self, namespace: &str) -> Vec<InstanceSummary> {
        match self
            .cluster
            .list_instances(namespace, &GroupLabels::new())
            .await
        {
            Ok(instances) => instances.iter().map(Instance::summary).collect(),
            Err(e) => {
                error!(error = %e, "Failed to list instances");
                Vec::new()
            },
        }
    }

    /// Read the current state of a target without touching it
    #[instrument(skip(self, target), fields(pod = %target))]
    pub async fn inspect(&self, target: &TargetRef) -> Result<Instance, ApplicationError> {
        self.cluster.get_instance(target).await
    }
}
