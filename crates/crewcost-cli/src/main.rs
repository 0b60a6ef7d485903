//! CrewCost binary

use std::io;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use crewcost_cli::{output, run, Args, EXIT_INVALID_CONFIG};
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    let args = Args::parse();

    // Logs go to stderr; stdout may carry the report
    let filter = match &args.log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into())),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match try_main(&args) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            error!("{err:#}");
            // the log filter may be `off`
            let _ = output::write_error(&mut io::stderr().lock(), &err);
            ExitCode::from(EXIT_INVALID_CONFIG)
        }
    }
}

fn try_main(args: &Args) -> anyhow::Result<u8> {
    let outcome = run(args).context("evaluation failed")?;

    if outcome.gates_failed() {
        output::write_violations(&mut io::stderr().lock(), &outcome.violations)
            .context("failed to write gate violations")?;
    }
    Ok(outcome.exit_code())
}
