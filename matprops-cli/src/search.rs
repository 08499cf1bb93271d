//! `search` command: look materials up by name, color, or band gap.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use matprops_core::{DEFAULT_TOLERANCE_PCT, PropertyStore, SqlitePropertyStore};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::output::{OutputFormat, write_rows};
use crate::{
    ARG_BAND_GAP, ARG_BG_MAX, ARG_BG_MIN, ARG_COLOR, ARG_DATABASE, ARG_JSON, ARG_MATERIAL,
    ARG_TOLERANCE, CliError, ENV_SEARCH_BG_MAX, ENV_SEARCH_BG_MIN, ENV_SEARCH_DATABASE,
    require_existing,
};

/// CLI arguments for the `search` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Search a property database. Give exactly one of --material, \
                 --color, --band-gap (optionally with --tol), or the pair \
                 --bg-min and --bg-max.",
    about = "Look materials up by name, color, or band gap"
)]
#[ortho_config(prefix = "MATPROPS")]
pub(crate) struct SearchArgs {
    /// SQLite database to query.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// Exact material name.
    #[arg(long = ARG_MATERIAL, value_name = "name")]
    #[serde(default)]
    pub(crate) material: Option<String>,
    /// Exact color.
    #[arg(long = ARG_COLOR, value_name = "color")]
    #[serde(default)]
    pub(crate) color: Option<String>,
    /// Target band gap in eV.
    #[arg(
        long = ARG_BAND_GAP,
        alias = "band_gap",
        value_name = "ev",
        allow_negative_numbers = true
    )]
    #[serde(default)]
    pub(crate) band_gap: Option<f64>,
    /// Tolerance around --band-gap, in percent of the target [default: 5].
    #[arg(long = ARG_TOLERANCE, value_name = "pct", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) tol: Option<f64>,
    /// Inclusive lower band-gap bound.
    #[arg(
        long = ARG_BG_MIN,
        alias = "bg_min",
        value_name = "ev",
        allow_negative_numbers = true
    )]
    #[serde(default)]
    pub(crate) bg_min: Option<f64>,
    /// Inclusive upper band-gap bound.
    #[arg(
        long = ARG_BG_MAX,
        alias = "bg_max",
        value_name = "ev",
        allow_negative_numbers = true
    )]
    #[serde(default)]
    pub(crate) bg_max: Option<f64>,
    /// Print results as JSON instead of a table.
    #[arg(long = ARG_JSON)]
    #[serde(default)]
    pub(crate) json: bool,
}

impl SearchArgs {
    pub(crate) fn into_config(self) -> Result<SearchConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SearchConfig::try_from(merged)
    }
}

/// The single lookup a `search` invocation performs.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SearchQuery {
    Material(String),
    Color(String),
    BandGap { target: f64, tolerance_pct: f64 },
    Range { min: f64, max: f64 },
}

/// Resolved `search` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SearchConfig {
    pub(crate) database: Utf8PathBuf,
    pub(crate) query: SearchQuery,
    pub(crate) format: OutputFormat,
}

impl TryFrom<SearchArgs> for SearchConfig {
    type Error = CliError;

    fn try_from(args: SearchArgs) -> Result<Self, Self::Error> {
        let database = args.database.ok_or(CliError::MissingArgument {
            field: ARG_DATABASE,
            env: ENV_SEARCH_DATABASE,
        })?;

        let mut chosen = Vec::new();
        if args.material.is_some() {
            chosen.push(ARG_MATERIAL);
        }
        if args.color.is_some() {
            chosen.push(ARG_COLOR);
        }
        if args.band_gap.is_some() {
            chosen.push(ARG_BAND_GAP);
        }
        if args.bg_min.is_some() || args.bg_max.is_some() {
            chosen.push(ARG_BG_MIN);
        }
        if chosen.len() > 1 {
            return Err(CliError::ConflictingQueries { flags: chosen });
        }
        if args.tol.is_some() && args.band_gap.is_none() {
            return Err(CliError::ToleranceWithoutBandGap);
        }

        let query = if let Some(name) = args.material {
            SearchQuery::Material(name)
        } else if let Some(color) = args.color {
            SearchQuery::Color(color)
        } else if let Some(target) = args.band_gap {
            SearchQuery::BandGap {
                target,
                tolerance_pct: args.tol.unwrap_or(DEFAULT_TOLERANCE_PCT),
            }
        } else if args.bg_min.is_some() || args.bg_max.is_some() {
            let min = args.bg_min.ok_or(CliError::MissingArgument {
                field: ARG_BG_MIN,
                env: ENV_SEARCH_BG_MIN,
            })?;
            let max = args.bg_max.ok_or(CliError::MissingArgument {
                field: ARG_BG_MAX,
                env: ENV_SEARCH_BG_MAX,
            })?;
            SearchQuery::Range { min, max }
        } else {
            return Err(CliError::MissingQuery);
        };

        Ok(Self {
            database,
            query,
            format: OutputFormat::from_json_flag(args.json),
        })
    }
}

pub(crate) fn run_search_with(args: SearchArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    require_existing(&config.database, ARG_DATABASE)?;
    let store = SqlitePropertyStore::new(config.database);
    let format = config.format;
    match config.query {
        SearchQuery::Material(name) => write_rows(writer, &store.search_by_name(&name)?, format),
        SearchQuery::Color(color) => write_rows(writer, &store.search_by_color(&color)?, format),
        SearchQuery::BandGap {
            target,
            tolerance_pct,
        } => write_rows(
            writer,
            &store.search_by_band_gap(target, tolerance_pct)?,
            format,
        ),
        SearchQuery::Range { min, max } => write_rows(
            writer,
            &store.search_by_band_gap_range(min, max)?,
            format,
        ),
    }
}
