//! Error types produced while extracting records.

use std::{io, num::ParseFloatError};

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors produced while inferring the dialect of a source.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum DialectError {
    /// The sample held no non-blank lines.
    #[error("cannot infer a dialect from an empty sample")]
    EmptySample,
    /// No candidate delimiter appeared consistently across the sample.
    #[error("could not determine the field delimiter")]
    UndeterminedDelimiter,
}

/// Errors produced while turning a delimited source into records.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExtractError {
    /// The source file does not exist.
    #[error("source file {path} not found")]
    NotFound {
        /// Requested source location.
        path: Utf8PathBuf,
    },
    /// Reading the source file failed.
    #[error("failed to read source file {path}: {source}")]
    Read {
        /// Requested source location.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The dialect could not be inferred.
    #[error(transparent)]
    Dialect(#[from] DialectError),
    /// The CSV reader rejected the input.
    #[error("failed to parse delimited input: {source}")]
    Csv {
        /// Error reported by the `csv` reader.
        #[source]
        source: csv::Error,
    },
    /// A row carried fewer fields than the positional layout needs.
    #[error("line {line} has {fields} fields but at least 5 are required")]
    MalformedRow {
        /// One-based line number of the row.
        line: u64,
        /// Number of fields found.
        fields: usize,
    },
    /// A row tagged as a band gap held a value that is not a number.
    #[error("line {line}: band gap value {value:?} is not a number: {source}")]
    InvalidBandGap {
        /// One-based line number of the row.
        line: u64,
        /// The offending cell.
        value: String,
        /// Float parsing failure.
        #[source]
        source: ParseFloatError,
    },
}
