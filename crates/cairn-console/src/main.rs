use std::path::PathBuf;
use std::process;

use cairn_core::config::CairnConfig;
use clap::Parser;

mod commands;
mod display;
mod error;
mod executor;
mod spec_file;

use commands::Command;
use display::OutputMode;

/// Cairn Console: inspect, build, and validate table descriptors.
#[derive(Parser, Debug)]
#[command(name = "cairn-console", version)]
struct Cli {
    /// JSON config file (e.g. enabling `metaregion.seqid.record.enabled`).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output results as machine-parseable JSON.
    #[arg(short, long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Pretty
    };
    process::exit(run(cli, &mode));
}

/// Returns the exit code: 0 on success, 1 on any error.
fn run(cli: Cli, mode: &OutputMode) -> i32 {
    let config = match cli.config.as_deref().map(CairnConfig::from_json_file) {
        None => None,
        Some(Ok(config)) => Some(config),
        Some(Err(e)) => {
            display::render_error(&e, mode);
            return 1;
        }
    };

    match executor::execute(cli.command, config.as_ref()) {
        Ok(result) => {
            display::render(&result, mode);
            0
        }
        Err(e) => {
            display::render_error(&e, mode);
            1
        }
    }
}
