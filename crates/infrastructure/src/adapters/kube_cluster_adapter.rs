//! Kubernetes adapter - Implements ClusterControlPort over the pods API

use application::error::ApplicationError;
use application::ports::ClusterControlPort;
use async_trait::async_trait;
use domain::{GroupLabels, Instance, InstancePhase, ReadinessState, TargetRef};
use k8s_openapi::api::core::v1::Pod;
use kube::api::{Api, DeleteParams, ListParams};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
use tracing::{debug, info, instrument};

use crate::config::ClusterAppConfig;

/// Cluster control adapter backed by a `kube::Client`
#[derive(Clone)]
pub struct KubeClusterAdapter {
    client: Client,
}

impl std::fmt::Debug for KubeClusterAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KubeClusterAdapter")
            .field("client", &"kube::Client")
            .finish()
    }
}

impl KubeClusterAdapter {
    /// Build a client from the cluster settings
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Configuration`] if no usable kubeconfig or
    /// in-cluster environment is found, or the client cannot be created.
    pub async fn connect(config: &ClusterAppConfig) -> Result<Self, ApplicationError> {
        let mut kube_config = if config.uses_explicit_kubeconfig() {
            let kubeconfig = match &config.kubeconfig {
                Some(path) => Kubeconfig::read_from(path).map_err(|e| {
                    ApplicationError::Configuration(format!(
                        "Failed to read kubeconfig from {}: {e}",
                        path.display()
                    ))
                })?,
                None => Kubeconfig::read().map_err(|e| {
                    ApplicationError::Configuration(format!(
                        "Failed to read default kubeconfig: {e}"
                    ))
                })?,
            };

            let options = KubeConfigOptions {
                context: config.context.clone(),
                cluster: None,
                user: None,
            };

            Config::from_custom_kubeconfig(kubeconfig, &options)
                .await
                .map_err(|e| {
                    ApplicationError::Configuration(format!(
                        "Failed to create config from kubeconfig: {e}"
                    ))
                })?
        } else {
            Config::infer().await.map_err(|e| {
                ApplicationError::Configuration(format!("Failed to infer cluster config: {e}"))
            })?
        };

        kube_config.connect_timeout = Some(config.connect_timeout());
        kube_config.read_timeout = Some(config.read_timeout());
        info!(cluster_url = %kube_config.cluster_url, "Connecting to Kubernetes API");

        let client = Client::try_from(kube_config).map_err(|e| {
            ApplicationError::Configuration(format!("Failed to create Kubernetes client: {e}"))
        })?;
        Ok(Self::from_client(client))
    }

    /// Wrap an existing client
    #[must_use]
    pub const fn from_client(client: Client) -> Self {
        Self { client }
    }

    fn pods(&self, namespace: &str) -> Api<Pod> {
        Api::namespaced(self.client.clone(), namespace)
    }

    /// Map a kube error to an application error
    fn map_error(err: kube::Error) -> ApplicationError {
        match err {
            kube::Error::Api(ae) => {
                let reason = if ae.message.is_empty() {
                    ae.reason
                } else {
                    ae.message
                };
                ApplicationError::control_interface(Some(ae.code), reason)
            },
            other => ApplicationError::control_interface(None, other.to_string()),
        }
    }
}

/// Convert a pod into the domain view
///
/// Missing status information degrades to an `Unknown` phase with no
/// container readiness, which is never ready.
fn instance_from_pod(pod: &Pod, namespace: &str) -> Instance {
    let metadata = &pod.metadata;
    let status = pod.status.as_ref();

    let labels: GroupLabels = metadata
        .labels
        .as_ref()
        .map(|labels| labels.clone().into())
        .unwrap_or_default();

    let phase = InstancePhase::from_api(status.and_then(|s| s.phase.as_deref()));
    let container_ready = status
        .and_then(|s| s.container_statuses.as_ref())
        .map(|statuses| statuses.iter().map(|c| c.ready).collect())
        .unwrap_or_default();

    let mut instance = Instance::new(
        metadata.namespace.as_deref().unwrap_or(namespace),
        metadata.name.clone().unwrap_or_default(),
    )
    .with_labels(labels)
    .with_readiness(ReadinessState::new(phase, container_ready));

    if let Some(uid) = &metadata.uid {
        instance = instance.with_uid(uid.clone());
    }
    if let Some(node) = pod.spec.as_ref().and_then(|s| s.node_name.as_ref()) {
        instance = instance.with_node(node.clone());
    }
    if let Some(created) = &metadata.creation_timestamp {
        instance = instance.with_created_at(created.0);
    }
    instance
}

#[async_trait]
impl ClusterControlPort for KubeClusterAdapter {
    #[instrument(skip(self, target), fields(pod = %target))]
    async fn get_instance(&self, target: &TargetRef) -> Result<Instance, ApplicationError> {
        match self.pods(target.namespace()).get(target.name()).await {
            Ok(pod) => Ok(instance_from_pod(&pod, target.namespace())),
            Err(kube::Error::Api(ae)) if ae.code == 404 => Err(ApplicationError::not_found(target)),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    #[instrument(skip(self, target), fields(pod = %target))]
    async fn delete_instance(&self, target: &TargetRef) -> Result<(), ApplicationError> {
        self.pods(target.namespace())
            .delete(target.name(), &DeleteParams::default())
            .await
            .map_err(Self::map_error)?;
        debug!("Delete request accepted");
        Ok(())
    }

    #[instrument(skip(self, selector), fields(selector = %selector.to_selector()))]
    async fn list_instances(
        &self,
        namespace: &str,
        selector: &GroupLabels,
    ) -> Result<Vec<Instance>, ApplicationError> {
        let params = if selector.is_empty() {
            ListParams::default()
        } else {
            ListParams::default().labels(&selector.to_selector())
        };

        let pods = self
            .pods(namespace)
            .list(&params)
            .await
            .map_err(Self::map_error)?;

        debug!(count = pods.items.len(), "Listed pods");
        Ok(pods
            .items
            .iter()
            .map(|pod| instance_from_pod(pod, namespace))
            .collect())
    }
}
