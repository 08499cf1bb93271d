//! Command-line interface for ingesting and querying material properties.
#![forbid(unsafe_code)]

use std::io::Write;

use camino::Utf8Path;
use clap::{Parser, Subcommand};
use matprops_fs::PathKind;

mod error;
mod ingest;
mod output;
mod search;
mod show;

pub use error::CliError;

use ingest::IngestArgs;
use search::SearchArgs;
use show::ShowArgs;

const ARG_READ: &str = "read";
const ARG_STORE: &str = "store";
const ARG_ON_ERROR: &str = "on-error";
const ARG_DATABASE: &str = "database";
const ARG_PRINT_ROWS: &str = "print-rows";
const ARG_MATERIAL: &str = "material";
const ARG_COLOR: &str = "color";
const ARG_BAND_GAP: &str = "band-gap";
const ARG_TOLERANCE: &str = "tol";
const ARG_BG_MIN: &str = "bg-min";
const ARG_BG_MAX: &str = "bg-max";
const ARG_JSON: &str = "json";

const ENV_INGEST_READ: &str = "MATPROPS_CMDS_INGEST_READ";
const ENV_INGEST_STORE: &str = "MATPROPS_CMDS_INGEST_STORE";
const ENV_SHOW_DATABASE: &str = "MATPROPS_CMDS_SHOW_DATABASE";
const ENV_SHOW_PRINT_ROWS: &str = "MATPROPS_CMDS_SHOW_PRINT_ROWS";
const ENV_SEARCH_DATABASE: &str = "MATPROPS_CMDS_SEARCH_DATABASE";
const ENV_SEARCH_BG_MIN: &str = "MATPROPS_CMDS_SEARCH_BG_MIN";
const ENV_SEARCH_BG_MAX: &str = "MATPROPS_CMDS_SEARCH_BG_MAX";

/// Run the CLI with the current process arguments, writing results to
/// standard output.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    run_command(cli.command, &mut stdout)
}

fn run_command(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Ingest(args) => ingest::run_ingest_with(args, writer),
        Command::Show(args) => show::run_show_with(args, writer),
        Command::Search(args) => search::run_search_with(args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "matprops",
    about = "Ingest and query material band gaps and colors",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load records from a delimited file into a property database.
    Ingest(IngestArgs),
    /// Print the first rows of a property database.
    Show(ShowArgs),
    /// Look up materials by name, color, or band gap.
    Search(SearchArgs),
}

/// Require `path` to name an existing regular file.
fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match matprops_fs::probe_path(path) {
        Ok(PathKind::File) => Ok(()),
        Ok(PathKind::NotFile) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Ok(PathKind::Missing) => Err(CliError::MissingSourceFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests;
