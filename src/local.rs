use std::{ffi::OsStr, process::Stdio};

use tokio::process::Command;
use tracing::debug;

use crate::QueryRequest;

/// Arguments passed to `kubectl` for the local display.
pub fn kubectl_args(request: &QueryRequest) -> Vec<&str> {
    let mut args = vec!["get", request.resource.as_str()];
    if let Some(namespace) = request.namespace.as_deref() {
        args.extend(["-n", namespace]);
    }
    args
}

/// Runs `kubectl get` against the current context, streaming its output to
/// ours.
///
/// Best effort: a missing binary or a non-zero exit status is only traced.
pub async fn display(kubectl: &OsStr, request: &QueryRequest) {
    let args = kubectl_args(request);
    debug!(?kubectl, ?args, "running local display");

    let status = Command::new(kubectl)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await;

    match status {
        Ok(status) if status.success() => {}
        Ok(status) => debug!(%status, "local display exited unsuccessfully"),
        Err(error) => debug!(%error, "local display could not be started"),
    }
}
