//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod kube_cluster_adapter;

pub use kube_cluster_adapter::KubeClusterAdapter;
