use std::io::{self, Write};

use tracing::debug;

use crate::{ClusterSource, Error, QueryRequest, json};

/// Outcome of a successful fetch against one context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// Object names of a cluster-scoped listing, in server order.
    Names(Vec<String>),
    /// Body of a namespaced raw `GET`.
    Payload(Vec<u8>),
}

impl FetchResult {
    /// Writes the result for display, pretty-printing JSON payloads.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self {
            FetchResult::Names(names) => {
                for name in names {
                    writeln!(out, "    - {name}")?;
                }
            }
            FetchResult::Payload(raw) => {
                out.write_all(&json::pretty(raw))?;
                writeln!(out)?;
            }
        }
        Ok(())
    }
}

/// Fetches `request.resource` from `source`, which belongs to `context`.
///
/// Cluster-scoped resources are listed through the dynamic client, anything
/// else is read with a raw `GET` in [`QueryRequest::effective_namespace`].
///
/// # Errors
/// Returns [`Error::List`] or [`Error::RawGet`] naming `context`.
pub async fn fetch<S: ClusterSource>(
    source: &S,
    context: &str,
    request: &QueryRequest,
) -> Result<FetchResult, Error> {
    let resource = request.resource.as_str();

    if request.is_cluster_scoped() {
        debug!(context, resource, "listing cluster-scoped resource");
        return source
            .list_names(resource)
            .await
            .map(FetchResult::Names)
            .map_err(|source| Error::List {
                resource: resource.to_string(),
                context: context.to_string(),
                source,
            });
    }

    let namespace = request.effective_namespace();
    debug!(context, resource, namespace, "getting namespaced resource");
    source
        .raw_get(namespace, resource)
        .await
        .map(FetchResult::Payload)
        .map_err(|source| Error::RawGet {
            resource: resource.to_string(),
            namespace: namespace.to_string(),
            context: context.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use http::StatusCode;

    use super::{FetchResult, fetch};
    use crate::{
        Error, QueryRequest,
        client::KubeClients,
        test_utils::{FakeSource, stub_client},
    };

    #[tokio::test]
    async fn cluster_scoped_resources_are_listed() {
        let mut source = FakeSource::default();
        source.names.insert(
            String::from("nodes"),
            vec![String::from("worker-2"), String::from("worker-1")],
        );

        let request = QueryRequest::new("nodes", Some(String::from("ignored")));
        let result = fetch(&source, "prod", &request).await.expect("listed");

        assert_eq!(
            result,
            FetchResult::Names(vec![String::from("worker-2"), String::from("worker-1")])
        );
        assert_eq!(*source.calls.borrow(), vec!["list nodes"]);
    }

    #[tokio::test]
    async fn namespaced_resources_default_to_default_namespace() {
        let mut source = FakeSource::default();
        source.payloads.insert(
            (String::from("default"), String::from("pods")),
            br#"{"items":[]}"#.to_vec(),
        );

        let result = fetch(&source, "prod", &QueryRequest::new("pods", None))
            .await
            .expect("fetched");

        assert_eq!(result, FetchResult::Payload(br#"{"items":[]}"#.to_vec()));
        assert_eq!(*source.calls.borrow(), vec!["get default/pods"]);
    }

    #[tokio::test]
    async fn namespace_override_is_used() {
        let source = FakeSource::default();
        let request = QueryRequest::new("configmaps", Some(String::from("kube-system")));
        let err = fetch(&source, "prod", &request).await.expect_err("forbidden");

        assert_eq!(*source.calls.borrow(), vec!["get kube-system/configmaps"]);
        match &err {
            Error::RawGet {
                resource,
                namespace,
                context,
                ..
            } => {
                assert_eq!(resource, "configmaps");
                assert_eq!(namespace, "kube-system");
                assert_eq!(context, "prod");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(
            err.to_string().split(':').next(),
            Some("Failed to get configmaps in ns kube-system for context prod")
        );
    }

    #[tokio::test]
    async fn list_failure_names_context_and_resource() {
        let source = FakeSource::default();
        let err = fetch(&source, "staging", &QueryRequest::new("namespaces", None))
            .await
            .expect_err("not found");

        assert!(matches!(err, Error::List { .. }));
        assert!(
            err.to_string()
                .starts_with("Failed to get namespaces in context staging")
        );
    }

    #[test]
    fn names_render_one_per_line() {
        let mut out: Vec<u8> = Vec::new();
        FetchResult::Names(vec![String::from("a"), String::from("b")])
            .write_to(&mut out)
            .expect("write");
        assert_eq!(out, b"    - a\n    - b\n");
    }

    #[test]
    fn payloads_render_pretty_or_verbatim() {
        let mut out: Vec<u8> = Vec::new();
        FetchResult::Payload(br#"{"kind":"PodList"}"#.to_vec())
            .write_to(&mut out)
            .expect("write");
        assert_eq!(out, b"{\n  \"kind\": \"PodList\"\n}\n");

        let mut out: Vec<u8> = Vec::new();
        FetchResult::Payload(b"not json".to_vec())
            .write_to(&mut out)
            .expect("write");
        assert_eq!(out, b"not json\n");
    }

    #[tokio::test]
    async fn non_utf8_payload_is_printed_verbatim() {
        let (client, _) = stub_client(StatusCode::OK, b"\xff\xfe not json");
        let result = fetch(
            &KubeClients::new(client),
            "prod",
            &QueryRequest::new("pods", None),
        )
        .await
        .expect("2xx response");

        let mut out: Vec<u8> = Vec::new();
        result.write_to(&mut out).expect("write");
        assert_eq!(out, b"\xff\xfe not json\n");
    }
}
