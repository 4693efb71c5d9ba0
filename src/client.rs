use std::{future::Future, pin::pin};

use futures::AsyncReadExt;
use kube::{
    Api, Client, Config,
    api::{ApiResource, DynamicObject, ListParams},
    config::KubeConfigOptions,
};
use tracing::debug;

use crate::{ConfigStore, Error};

/// Read access to one cluster.
pub trait ClusterSource {
    /// Lists every object of the core/v1 `resource` across the cluster and
    /// returns their names in the order the server sent them.
    fn list_names(&self, resource: &str) -> impl Future<Output = Result<Vec<String>, kube::Error>>;

    /// Issues a raw `GET` for `resource` in `namespace` and returns the body.
    fn raw_get(
        &self,
        namespace: &str,
        resource: &str,
    ) -> impl Future<Output = Result<Vec<u8>, kube::Error>>;
}

/// Builds a [`ClusterSource`] for a named context.
pub trait ClientFactory {
    type Source: ClusterSource;

    /// # Errors
    /// Returns [`Error::ContextConfig`] or [`Error::Connect`] naming `context`.
    fn build(&self, context: &str) -> impl Future<Output = Result<Self::Source, Error>>;
}

/// Clients of a single context.
///
/// One `kube::Client` backs both the typed REST path and the dynamic
/// `Api<DynamicObject>` path.
#[derive(Clone)]
pub struct KubeClients {
    client: Client,
}

impl KubeClients {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

/// Describes the core/v1 resource `plural`.
///
/// Kind is left empty: it only matters for typed objects, and listing goes by
/// plural name alone.
pub fn core_v1(plural: &str) -> ApiResource {
    ApiResource {
        group: String::new(),
        version: String::from("v1"),
        api_version: String::from("v1"),
        kind: String::new(),
        plural: plural.to_string(),
    }
}

impl ClusterSource for KubeClients {
    async fn list_names(&self, resource: &str) -> Result<Vec<String>, kube::Error> {
        let api: Api<DynamicObject> = Api::all_with(self.client.clone(), &core_v1(resource));
        let list = api.list(&ListParams::default()).await?;
        Ok(list
            .items
            .into_iter()
            .map(|object| object.metadata.name.unwrap_or_default())
            .collect())
    }

    async fn raw_get(&self, namespace: &str, resource: &str) -> Result<Vec<u8>, kube::Error> {
        let request = http::Request::get(format!("/api/v1/namespaces/{namespace}/{resource}"))
            .body(Vec::new())
            .map_err(kube::Error::HttpError)?;
        // The body is kept as bytes: it is not required to be UTF-8.
        let mut reader = pin!(self.client.request_stream(request).await?);
        let mut body = Vec::new();
        reader
            .read_to_end(&mut body)
            .await
            .map_err(kube::Error::ReadEvents)?;
        Ok(body)
    }
}

/// Builds clients from the contexts of a [`ConfigStore`].
#[derive(Debug, Clone, Copy)]
pub struct KubeconfigFactory<'a> {
    store: &'a ConfigStore,
}

impl<'a> KubeconfigFactory<'a> {
    pub fn new(store: &'a ConfigStore) -> Self {
        Self { store }
    }
}

impl ClientFactory for KubeconfigFactory<'_> {
    type Source = KubeClients;

    async fn build(&self, context: &str) -> Result<KubeClients, Error> {
        let options = KubeConfigOptions {
            context: Some(context.to_string()),
            ..Default::default()
        };
        let config = Config::from_custom_kubeconfig(self.store.kubeconfig().clone(), &options)
            .await
            .map_err(|source| Error::ContextConfig {
                context: context.to_string(),
                source,
            })?;
        debug!(context, cluster_url = %config.cluster_url, "resolved context config");

        let client = Client::try_from(config).map_err(|source| Error::Connect {
            context: context.to_string(),
            source,
        })?;
        Ok(KubeClients::new(client))
    }
}
