#![cfg_attr(not(doctest), doc = include_str!("../README.md"))]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use clap_complete;
pub use k8s_openapi;
pub use kube;

pub mod app;
pub mod cli;
pub use cli::Cli;
pub mod claputil;
pub use claputil::namespace_value_completer;
pub mod client;
pub use client::{ClientFactory, ClusterSource, KubeconfigFactory};
pub mod error;
pub use error::Error;
pub mod fetch;
pub use fetch::{FetchResult, fetch};
pub mod json;
pub mod kubeconfig;
pub use kubeconfig::ConfigStore;
pub mod local;
pub mod multi;
pub use multi::{RunSummary, run_all};
#[cfg(test)]
pub(crate) mod test_utils;

/// Namespace used by the namespaced path when no `--namespace` is given.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Core/v1 resources that are not partitioned by namespace.
///
/// This is a fixed allowlist, not an API discovery lookup. Cluster-scoped
/// kinds outside of it are fetched through the namespaced path.
pub const CLUSTER_SCOPED_RESOURCES: &[&str] = &["nodes", "namespaces", "persistentvolumes"];

/// Returns `true` if `resource` is one of [`CLUSTER_SCOPED_RESOURCES`].
pub fn is_cluster_scoped(resource: &str) -> bool {
    CLUSTER_SCOPED_RESOURCES.contains(&resource)
}

/// Resolved input of a single fetch, shared unchanged by every context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    /// Plural resource name, e.g. `pods` or `nodes`.
    pub resource: String,
    /// Explicit namespace override.
    pub namespace: Option<String>,
}

impl QueryRequest {
    pub fn new(resource: impl Into<String>, namespace: Option<String>) -> Self {
        Self {
            resource: resource.into(),
            namespace,
        }
    }

    pub fn is_cluster_scoped(&self) -> bool {
        is_cluster_scoped(&self.resource)
    }

    /// Determines the namespace queried on the namespaced path.
    ///
    /// Namespace determination follows this priority:
    /// 1. Uses the namespace if explicitly specified.
    /// 2. Uses "default".
    ///
    /// The default namespace of the context itself is never consulted.
    pub fn effective_namespace(&self) -> &str {
        self.namespace.as_deref().unwrap_or(DEFAULT_NAMESPACE)
    }
}
