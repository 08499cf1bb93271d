//! `show` command: print the first rows of a property database.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use matprops_core::{PropertyStore, SqlitePropertyStore};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_DATABASE, ARG_PRINT_ROWS, CliError, ENV_SHOW_DATABASE, ENV_SHOW_PRINT_ROWS,
    require_existing,
};

/// CLI arguments for the `show` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "Print the first rows of a property database")]
#[ortho_config(prefix = "MATPROPS")]
pub(crate) struct ShowArgs {
    /// SQLite database to read.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// Number of rows to print; must be at least one.
    #[arg(
        long = ARG_PRINT_ROWS,
        alias = "print_rows",
        value_name = "n",
        allow_negative_numbers = true
    )]
    #[serde(default)]
    pub(crate) print_rows: Option<i64>,
}

impl ShowArgs {
    pub(crate) fn into_config(self) -> Result<ShowConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ShowConfig::try_from(merged)
    }
}

/// Resolved `show` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ShowConfig {
    pub(crate) database: Utf8PathBuf,
    pub(crate) rows: i64,
}

impl TryFrom<ShowArgs> for ShowConfig {
    type Error = CliError;

    fn try_from(args: ShowArgs) -> Result<Self, Self::Error> {
        let database = args.database.ok_or(CliError::MissingArgument {
            field: ARG_DATABASE,
            env: ENV_SHOW_DATABASE,
        })?;
        let rows = args.print_rows.ok_or(CliError::MissingArgument {
            field: ARG_PRINT_ROWS,
            env: ENV_SHOW_PRINT_ROWS,
        })?;
        Ok(Self { database, rows })
    }
}

pub(crate) fn run_show_with(args: ShowArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    require_existing(&config.database, ARG_DATABASE)?;
    SqlitePropertyStore::new(config.database).print_summary(config.rows, writer)?;
    Ok(())
}
