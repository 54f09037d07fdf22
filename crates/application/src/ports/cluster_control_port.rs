//! Cluster control port
//!
//! Defines the interface for reading, listing and deleting workload instances.

use async_trait::async_trait;
use domain::{GroupLabels, Instance, TargetRef};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for cluster control operations
///
/// One implementation instance is a session: it is constructed once and
/// reused for every call of an injection run.
#[allow(clippy::struct_field_names)] // automock generates struct with `list_*` prefixes
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ClusterControlPort: Send + Sync {
    /// Fetch an instance by identity
    ///
    /// Returns [`ApplicationError::NotFound`] when it does not exist.
    async fn get_instance(&self, target: &TargetRef) -> Result<Instance, ApplicationError>;

    /// Request deletion of an instance
    ///
    /// `Ok` means the control plane accepted the request, not that the
    /// instance is gone.
    async fn delete_instance(&self, target: &TargetRef) -> Result<(), ApplicationError>;

    /// List instances in a namespace carrying every label in `selector`
    ///
    /// An empty selector lists the whole namespace.
    async fn list_instances(
        &self,
        namespace: &str,
        selector: &GroupLabels,
    ) -> Result<Vec<Instance>, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn ClusterControlPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn ClusterControlPort>();
    }

    #[tokio::test]
    async fn mock_reports_not_found() {
        let mut mock = MockClusterControlPort::new();
        mock.expect_get_instance()
            .returning(|target| Err(ApplicationError::not_found(target)));

        let target = TargetRef::new("default", "gone").unwrap();
        let err = mock.get_instance(&target).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
