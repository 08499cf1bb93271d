//! Error types emitted by the matprops CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use matprops_core::StoreError;
use matprops_data::ExtractError;
use thiserror::Error;

/// Errors emitted by the matprops CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// `search` was invoked without choosing what to look for.
    #[error("choose one of --material, --color, --band-gap, or --bg-min with --bg-max")]
    MissingQuery,
    /// `search` was given more than one kind of lookup.
    #[error("only one search may be given, found --{}", .flags.join(", --"))]
    ConflictingQueries { flags: Vec<&'static str> },
    /// `--tol` was given without `--band-gap`.
    #[error("--tol only applies together with --band-gap")]
    ToleranceWithoutBandGap,
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Reading records from the source file failed.
    #[error("failed to extract records: {0}")]
    Extract(#[from] ExtractError),
    /// The property store rejected a request or failed to run it.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Serializing query results failed.
    #[error("failed to serialize results: {0}")]
    SerializeRows(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
