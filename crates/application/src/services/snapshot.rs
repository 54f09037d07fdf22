//! Pre-fault snapshot capture

use domain::{InstanceSnapshot, TargetRef};
use tracing::{info, instrument};

use crate::error::ApplicationError;
use crate::ports::ClusterControlPort;

/// Fetch the target and record its identity and group labels
///
/// Read-only. A missing target surfaces as [`ApplicationError::NotFound`];
/// neither that nor any other read error is retried.
#[instrument(skip(cluster, target), fields(pod = %target))]
pub async fn capture_snapshot(
    cluster: &dyn ClusterControlPort,
    target: &TargetRef,
) -> Result<InstanceSnapshot, ApplicationError> {
    let instance = cluster.get_instance(target).await?;

    info!(
        phase = %instance.phase(),
        labels = %instance.labels.to_selector(),
        "Target exists"
    );

    Ok(InstanceSnapshot::of(target.clone(), &instance))
}
