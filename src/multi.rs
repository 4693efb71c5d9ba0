use std::io::{self, Write};

use tracing::debug;

use crate::{ClientFactory, Error, FetchResult, QueryRequest, fetch};

/// Counts of a completed run over all contexts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub attempted: usize,
    pub failed: usize,
}

/// Builds the clients of `context` and fetches `request` through them.
pub async fn fetch_context<F: ClientFactory>(
    factory: &F,
    context: &str,
    request: &QueryRequest,
) -> Result<FetchResult, Error> {
    let source = factory.build(context).await?;
    fetch(&source, context, request).await
}

/// Fetches `request` from every context in turn.
///
/// Results go to `out`, per-context errors to `err`. A failing context is
/// reported and skipped, every context gets exactly one attempt.
///
/// # Errors
/// Only fails when writing to `out` or `err` fails.
pub async fn run_all<F, O, E>(
    factory: &F,
    contexts: &[String],
    request: &QueryRequest,
    out: &mut O,
    err: &mut E,
) -> io::Result<RunSummary>
where
    F: ClientFactory,
    O: Write,
    E: Write,
{
    writeln!(out, "\nDiscovered Contexts:")?;
    for context in contexts {
        writeln!(out, "  - {context}")?;
    }

    writeln!(out, "\nRemote Cluster Results:")?;
    let mut summary = RunSummary::default();
    for context in contexts {
        writeln!(out, "Cluster: {context}")?;
        summary.attempted += 1;

        match fetch_context(factory, context, request).await {
            Ok(result) => result.write_to(out)?,
            Err(error) => {
                debug!(%context, ?error, "context failed");
                summary.failed += 1;
                out.flush()?;
                writeln!(err, "  {error}")?;
            }
        }
    }

    out.flush()?;
    Ok(summary)
}
