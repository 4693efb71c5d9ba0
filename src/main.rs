use std::{env, io, process::ExitCode};

use anyhow::Context;
use clap::CommandFactory;
use kubectl_multi::{Cli, app, claputil::CompleteEnv};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Completion callbacks run before any runtime exists.
    CompleteEnv::with_factory(Cli::command).complete();

    init_tracing();

    let cli = match app::parse_args(env::args_os(), &mut io::stderr()) {
        Ok(cli) => cli,
        Err(code) => return code,
    };

    let result = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")
        .and_then(|runtime| {
            runtime.block_on(app::run(
                &cli,
                &mut io::stdout().lock(),
                &mut io::stderr().lock(),
            ))
        });

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
