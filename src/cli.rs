use std::{ffi::OsString, path::PathBuf};

use clap::Parser;

use crate::QueryRequest;

#[derive(Debug, Parser)]
#[command(
    name = "kubectl-multi",
    version,
    about = "Get a Kubernetes resource from every context in your kubeconfig",
    override_usage = "kubectl multi get <RESOURCE> [--namespace <NAMESPACE>]"
)]
pub struct Cli {
    /// Command to run. Only `get` is supported.
    #[arg(value_name = "COMMAND", value_parser = parse_verb)]
    pub verb: String,

    /// Resource to fetch, e.g. `pods` or `nodes`.
    pub resource: String,

    /// Namespace of namespaced resources. Falls back to "default".
    #[arg(short, long, add = crate::claputil::namespace_value_completer())]
    pub namespace: Option<String>,

    /// Read contexts from this file instead of the default kubeconfig.
    #[arg(long, value_name = "PATH")]
    pub kubeconfig: Option<PathBuf>,

    /// Binary used for the local cluster output.
    #[arg(long, env = "KUBECTL", default_value = "kubectl", value_name = "BIN")]
    pub kubectl: OsString,
}

fn parse_verb(verb: &str) -> Result<String, String> {
    if verb.starts_with("get") {
        Ok(verb.to_string())
    } else {
        Err(format!("unsupported command `{verb}`, expected `get`"))
    }
}

impl Cli {
    /// Request shared by the local display and every context.
    ///
    /// An empty `--namespace` counts as not given.
    pub fn query(&self) -> QueryRequest {
        let namespace = self.namespace.clone().filter(|ns| !ns.is_empty());
        QueryRequest::new(self.resource.clone(), namespace)
    }
}
