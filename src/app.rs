use std::{ffi::OsString, io::Write, process::ExitCode};

use anyhow::Context;
use clap::{Parser, error::ErrorKind};
use tracing::debug;

use crate::{Cli, ConfigStore, KubeconfigFactory, local, run_all};

/// Parses the command line, writing usage errors to `err`.
///
/// `Err` carries the code to exit with when there is nothing to run:
/// success after `--help`/`--version`, failure otherwise.
pub fn parse_args<I, T, E>(args: I, err: &mut E) -> Result<Cli, ExitCode>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    E: Write,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Ok(cli),
        Err(error) if matches!(error.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            if let Err(print_error) = error.print() {
                debug!(%print_error, "failed to print help");
            }
            Err(ExitCode::SUCCESS)
        }
        Err(error) => {
            if let Err(write_error) = write!(err, "{error}") {
                debug!(%write_error, "failed to print usage");
            }
            Err(ExitCode::FAILURE)
        }
    }
}

/// Runs the local display, then fetches from every kubeconfig context.
///
/// Fails with [`ExitCode::FAILURE`] only when the kubeconfig cannot be
/// loaded; per-context errors are reported to `err` and do not change the
/// exit code.
///
/// # Errors
/// Returns an error when writing to `out` or `err` fails.
pub async fn run<O, E>(cli: &Cli, out: &mut O, err: &mut E) -> anyhow::Result<ExitCode>
where
    O: Write,
    E: Write,
{
    let request = cli.query();

    writeln!(out, "\nLocal Cluster Output:")?;
    out.flush()?;
    local::display(&cli.kubectl, &request).await;

    let store = match ConfigStore::load(cli.kubeconfig.as_deref()) {
        Ok(store) => store,
        Err(error) => {
            writeln!(err, "{error}")?;
            return Ok(ExitCode::FAILURE);
        }
    };

    let contexts = store.context_names();
    let summary = run_all(&KubeconfigFactory::new(&store), &contexts, &request, out, err)
        .await
        .context("failed to write results")?;
    debug!(?summary, "done");

    Ok(ExitCode::SUCCESS)
}
