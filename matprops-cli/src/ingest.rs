//! `ingest` command: load a delimited file into a property database.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use log::debug;
use matprops_core::{ErrorPolicy, SqlitePropertyStore};
use matprops_data::RecordExtractor;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_ON_ERROR, ARG_READ, ARG_STORE, CliError, ENV_INGEST_READ, ENV_INGEST_STORE,
    require_existing,
};

/// Reaction to failed SQL statements while storing records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum OnError {
    /// Log the failure and keep going.
    #[default]
    Skip,
    /// Stop at the first failure.
    Abort,
}

impl From<OnError> for ErrorPolicy {
    fn from(value: OnError) -> Self {
        match value {
            OnError::Skip => Self::SkipAndReport,
            OnError::Abort => Self::Abort,
        }
    }
}

/// CLI arguments for the `ingest` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Extract material records from a delimited text file and \
                 append them to a SQLite property database, creating the \
                 database and its table when needed. Paths can come from CLI \
                 flags, configuration files, or environment variables.",
    about = "Load material records into a property database"
)]
#[ortho_config(prefix = "MATPROPS")]
pub(crate) struct IngestArgs {
    /// Delimited source file to read.
    #[arg(long = ARG_READ, value_name = "path")]
    #[serde(default)]
    pub(crate) read: Option<Utf8PathBuf>,
    /// SQLite database receiving the records.
    #[arg(long = ARG_STORE, value_name = "path")]
    #[serde(default)]
    pub(crate) store: Option<Utf8PathBuf>,
    /// What to do when a statement fails.
    #[arg(long = ARG_ON_ERROR, value_enum, value_name = "policy")]
    #[serde(default)]
    pub(crate) on_error: Option<OnError>,
}

impl IngestArgs {
    pub(crate) fn into_config(self) -> Result<IngestConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        IngestConfig::try_from(merged)
    }
}

/// Resolved `ingest` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct IngestConfig {
    pub(crate) read: Utf8PathBuf,
    pub(crate) store: Utf8PathBuf,
    pub(crate) policy: ErrorPolicy,
}

impl IngestConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.read, ARG_READ)
    }
}

impl TryFrom<IngestArgs> for IngestConfig {
    type Error = CliError;

    fn try_from(args: IngestArgs) -> Result<Self, Self::Error> {
        let read = args.read.ok_or(CliError::MissingArgument {
            field: ARG_READ,
            env: ENV_INGEST_READ,
        })?;
        let store = args.store.ok_or(CliError::MissingArgument {
            field: ARG_STORE,
            env: ENV_INGEST_STORE,
        })?;
        Ok(Self {
            read,
            store,
            policy: args.on_error.unwrap_or_default().into(),
        })
    }
}

pub(crate) fn resolve_ingest_config(args: IngestArgs) -> Result<IngestConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

pub(crate) fn run_ingest_with(args: IngestArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = resolve_ingest_config(args)?;
    debug!("ingesting {} into {}", config.read, config.store);

    let records = RecordExtractor::default().extract(&config.read)?;
    let store = SqlitePropertyStore::new(config.store.clone()).with_error_policy(config.policy);
    store.ensure_database_exists()?;
    // Appending to an existing table is normal, so creation never aborts.
    store
        .clone()
        .with_error_policy(ErrorPolicy::SkipAndReport)
        .create_table()?;
    let outcome = store.insert_many(&records)?;

    writeln!(
        writer,
        "stored {} of {} records in {} ({} failed)",
        outcome.succeeded,
        records.len(),
        config.store,
        outcome.failed
    )
    .map_err(CliError::WriteOutput)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<IngestConfig, CliError> {
    let merged = IngestArgs::merge_from_layers(layers).map_err(CliError::from)?;
    IngestConfig::try_from(merged)
}
