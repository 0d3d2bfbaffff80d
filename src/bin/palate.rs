//! Palate CLI binary.

use std::process;

use anyhow::Context;
use clap::Parser;
use palate::cli::{args::*, commands::*};
use tracing_subscriber::EnvFilter;

fn main() {
    // Parse command line arguments using clap
    let args = PalateArgs::parse();

    // RUST_LOG wins over the verbosity flags
    let default_level = match args.verbosity() {
        0 => "error",
        1 => "warn",
        2 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("palate={default_level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = run(args) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(args: PalateArgs) -> anyhow::Result<()> {
    let command = args.command.name();
    execute_command(args).with_context(|| format!("`palate {command}` failed"))
}
