//! kanbo - Kanban task board CLI
//!
//! Tasks live in a flat file and move between fixed workflow columns; the
//! subcommands cover scripted use and `kanbo board` opens the terminal view.

use clap::Parser;
use kanbo::cli::Cli;
use kanbo::output::{emit_error, infer_command_name_from_args};
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();

    let command = infer_command_name_from_args();
    let cli = Cli::parse();
    let json = cli.json;
    if let Err(err) = cli.run() {
        let _ = emit_error(&command, &err, json);
        std::process::exit(err.exit_code());
    }
}

/// Tracing is opt-in via RUST_LOG and goes to stderr, keeping stdout clean
/// for JSON output. Invalid filters are ignored rather than fatal.
fn init_tracing() {
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| EnvFilter::try_new(raw.trim()).ok())
        .unwrap_or_else(|| EnvFilter::new("off"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
