//! Command-line interface that exports whitewater reaches to KML.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod export;

pub use error::CliError;
use export::{ExportArgs, run_export};

const ARG_ENDPOINT: &str = "endpoint";
const ARG_USER_AGENT: &str = "user-agent";
const ARG_OUTPUT_DIR: &str = "output-dir";
const ARG_PAGE_SIZE: &str = "page-size";
const ARG_TIMEOUT_SECS: &str = "timeout-secs";
const ENV_PAGE_SIZE: &str = "REACHMAP_CMDS_EXPORT_PAGE_SIZE";

/// Run the reachmap CLI with the current process arguments and environment.
///
/// A bare `reachmap` invocation runs the `export` command with configuration
/// drawn from files and the environment alone.
///
/// # Errors
///
/// Returns [`CliError`] when arguments, configuration, the source or the
/// export itself fail.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let args = match cli.command {
        Some(Command::Export(args)) => args,
        None => ExportArgs::default(),
    };
    let summary = run_export(args)?;
    log::info!(
        "exported {} rivers ({} reaches) into {} files",
        summary.rivers,
        summary.reaches,
        summary.files
    );
    Ok(())
}

#[derive(Debug, Parser)]
#[command(
    name = "reachmap",
    about = "Export American Whitewater reaches as per-state KML files",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch every reach and write one KML file per river and state.
    Export(ExportArgs),
}

#[cfg(test)]
mod tests;
