//! Common test utilities.

use std::{
    cell::RefCell,
    collections::HashMap,
    convert::Infallible,
    sync::{Arc, Mutex},
};

use http::{Request, Response, StatusCode};
use kube::{Client, client::Body, core::ErrorResponse};

use crate::{ClientFactory, ClusterSource, Error};

pub fn api_error(code: u16) -> kube::Error {
    kube::Error::Api(ErrorResponse {
        status: String::from("Failure"),
        message: format!("status={code}"),
        reason: String::from("Test"),
        code,
    })
}

/// A cluster answering from canned data, recording every call.
#[derive(Clone, Default)]
pub struct FakeSource {
    pub names: HashMap<String, Vec<String>>,
    pub payloads: HashMap<(String, String), Vec<u8>>,
    pub calls: RefCell<Vec<String>>,
}

impl ClusterSource for FakeSource {
    async fn list_names(&self, resource: &str) -> Result<Vec<String>, kube::Error> {
        self.calls.borrow_mut().push(format!("list {resource}"));
        self.names.get(resource).cloned().ok_or_else(|| api_error(404))
    }

    async fn raw_get(&self, namespace: &str, resource: &str) -> Result<Vec<u8>, kube::Error> {
        self.calls
            .borrow_mut()
            .push(format!("get {namespace}/{resource}"));
        self.payloads
            .get(&(namespace.to_string(), resource.to_string()))
            .cloned()
            .ok_or_else(|| api_error(403))
    }
}

/// Hands out canned sources; unknown contexts fail to connect.
#[derive(Default)]
pub struct FakeFactory {
    pub sources: HashMap<String, FakeSource>,
    pub built: RefCell<Vec<String>>,
}

impl FakeFactory {
    pub fn with_pods(mut self, context: &str, namespace: &str, payload: &str) -> Self {
        let source = self.sources.entry(context.to_string()).or_default();
        source.payloads.insert(
            (namespace.to_string(), String::from("pods")),
            payload.as_bytes().to_vec(),
        );
        self
    }

    pub fn with_names(mut self, context: &str, resource: &str, names: &[&str]) -> Self {
        let source = self.sources.entry(context.to_string()).or_default();
        source.names.insert(
            resource.to_string(),
            names.iter().map(|name| name.to_string()).collect(),
        );
        self
    }
}

impl ClientFactory for FakeFactory {
    type Source = FakeSource;

    async fn build(&self, context: &str) -> Result<FakeSource, Error> {
        self.built.borrow_mut().push(context.to_string());
        self.sources
            .get(context)
            .cloned()
            .ok_or_else(|| Error::Connect {
                context: context.to_string(),
                source: api_error(401),
            })
    }
}

/// A `kube::Client` whose every request is answered with `status` and `body`.
///
/// Returns the client and the request URIs it has seen.
pub fn stub_client(status: StatusCode, body: &[u8]) -> (Client, Arc<Mutex<Vec<String>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let body = body.to_vec();
    let service = {
        let seen = Arc::clone(&seen);
        tower::service_fn(move |request: Request<Body>| {
            seen.lock()
                .expect("uri log")
                .push(request.uri().to_string());
            let mut response = Response::new(Body::from(body.clone()));
            *response.status_mut() = status;
            async move { Ok::<_, Infallible>(response) }
        })
    };
    (Client::new(service, "default"), seen)
}
