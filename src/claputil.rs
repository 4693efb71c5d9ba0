use std::ffi::OsStr;

use anyhow::Context;
use clap_complete::engine::{ArgValueCompleter, CompletionCandidate};
use tokio::runtime::{Builder, Handle};
use tracing::debug;

use crate::{ClientFactory, ClusterSource, ConfigStore, Error, KubeconfigFactory};

pub use clap_complete::env::CompleteEnv;

/// Namespaces of `context` starting with `prefix`, in server order.
///
/// Goes through the same client path as `get namespaces`.
pub async fn namespace_candidates<F: ClientFactory>(
    factory: &F,
    context: &str,
    prefix: &str,
) -> Result<Vec<String>, Error> {
    let source = factory.build(context).await?;
    let names = source
        .list_names("namespaces")
        .await
        .map_err(|source| Error::List {
            resource: String::from("namespaces"),
            context: context.to_string(),
            source,
        })?;
    Ok(names
        .into_iter()
        .filter(|name| name.starts_with(prefix))
        .collect())
}

/// Create an `ArgValueCompleter` that lists namespaces of the current context.
///
/// Completion makes a network call and yields nothing on any failure.
/// `--kubeconfig` is not considered, see https://github.com/clap-rs/clap/issues/1910.
pub fn namespace_value_completer() -> ArgValueCompleter {
    ArgValueCompleter::new(|input: &OsStr| -> Vec<CompletionCandidate> {
        let prefix = input.to_string_lossy();
        match complete_namespaces(prefix.trim()) {
            Ok(names) => names.into_iter().map(CompletionCandidate::new).collect(),
            Err(error) => {
                debug!("namespace completion failed: {error:#}");
                Vec::new()
            }
        }
    })
}

// Completion runs before `main` starts its runtime, so it owns one.
fn complete_namespaces(prefix: &str) -> anyhow::Result<Vec<String>> {
    if Handle::try_current().is_ok() {
        anyhow::bail!("cannot block on namespace completion inside a running runtime");
    }

    let store = ConfigStore::load(None)?;
    let context = store
        .current_context()
        .context("current_context is not set")?
        .to_string();

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;
    let names = runtime.block_on(namespace_candidates(
        &KubeconfigFactory::new(&store),
        &context,
        prefix,
    ))?;
    Ok(names)
}
