//! Rendering of query results for the terminal.

use std::io::Write;

use matprops_core::{TableRow, render_table};
use serde::Serialize;

use crate::CliError;

/// How query results are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    pub(crate) const fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Table }
    }
}

pub(crate) fn write_rows<T>(
    writer: &mut dyn Write,
    rows: &[T],
    format: OutputFormat,
) -> Result<(), CliError>
where
    T: TableRow + Serialize,
{
    let payload = match format {
        OutputFormat::Table => render_table(rows),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(rows).map_err(CliError::SerializeRows)?;
            json.push('\n');
            json
        }
    };
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)
}
