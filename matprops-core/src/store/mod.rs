//! Data access for stored material properties.
//!
//! The [`PropertyStore`] trait covers the read side shared by every backend:
//! exact lookups by name and color, band-gap window searches, and a bounded
//! scan used for summaries. Write operations are inherent to the SQLite
//! backend, which opens a fresh connection per call unless a
//! [`StoreSession`] is requested.

use std::io::Write;

#[cfg(feature = "store-sqlite")]
use log::warn;
use thiserror::Error;

use crate::{
    BandGapWindow, ColorMatch, NameMatch, PropertyRecord, QueryError, RowLimit, render_table,
};

#[cfg(feature = "store-sqlite")]
mod session;
#[cfg(feature = "store-sqlite")]
mod sqlite;
#[cfg(feature = "store-sqlite")]
mod statements;

#[cfg(feature = "store-sqlite")]
pub use session::StoreSession;
#[cfg(feature = "store-sqlite")]
pub use sqlite::{DatabaseStatus, SqlitePropertyStore};
#[cfg(feature = "store-sqlite")]
pub use statements::TABLE_NAME;

/// How a store reacts when a SQL statement fails.
///
/// `SkipAndReport` logs the failure and lets the operation return whatever it
/// managed to do, which lets a batch ingest carry on past a table that
/// already exists. `Abort` surfaces the failure as
/// [`StoreError::Statement`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Surface statement failures to the caller.
    Abort,
    /// Log statement failures and return a best-effort result.
    #[default]
    SkipAndReport,
}

impl ErrorPolicy {
    /// Resolve a failed statement according to the policy, yielding
    /// `fallback` when the failure is skipped.
    #[cfg(feature = "store-sqlite")]
    pub(crate) fn absorb<T>(
        self,
        operation: &'static str,
        source: rusqlite::Error,
        fallback: T,
    ) -> Result<T, StoreError> {
        match self {
            Self::Abort => Err(StoreError::Statement { operation, source }),
            Self::SkipAndReport => {
                warn!("{operation} failed: {source}");
                Ok(fallback)
            }
        }
    }
}

/// Row counts reported by write operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOutcome {
    /// Rows inserted or deleted.
    pub succeeded: usize,
    /// Rows or statements that failed and were skipped.
    pub failed: usize,
}

impl WriteOutcome {
    /// Outcome where every one of `count` rows failed.
    #[must_use]
    pub const fn all_failed(count: usize) -> Self {
        Self {
            succeeded: 0,
            failed: count,
        }
    }
}

/// Errors raised by property stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Query parameters were rejected before reaching the database.
    #[error(transparent)]
    Validation(#[from] QueryError),
    /// Checking for the database file failed.
    #[error("failed to inspect database path {path}: {source}")]
    InspectDatabase {
        /// Database location.
        path: camino::Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The database path is occupied by something other than a file.
    #[error("database path {path} exists but is not a file")]
    DatabaseNotAFile {
        /// Database location.
        path: camino::Utf8PathBuf,
    },
    /// Creating the directories above the database failed.
    #[error("failed to create database directory for {path}: {source}")]
    CreateDatabase {
        /// Database location.
        path: camino::Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// No connection could be opened.
    #[cfg(feature = "store-sqlite")]
    #[error("failed to open SQLite database at {path}: {source}")]
    Open {
        /// Database location.
        path: camino::Utf8PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// A statement failed while the store was configured to abort.
    #[cfg(feature = "store-sqlite")]
    #[error("{operation} failed: {source}")]
    Statement {
        /// The operation that issued the statement.
        operation: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Writing a rendered summary failed.
    #[error("failed to write summary: {0}")]
    WriteSummary(#[source] std::io::Error),
}

/// Read access to stored material properties.
///
/// Implementers supply the four primitive lookups; the band-gap helpers and
/// [`PropertyStore::print_summary`] are built on top of them and share their
/// validation.
///
/// # Examples
///
/// ```
/// use matprops_core::{
///     BandGapWindow, ColorMatch, NameMatch, PropertyRecord, PropertyStore, RowLimit, StoreError,
/// };
///
/// struct Single(PropertyRecord);
///
/// impl PropertyStore for Single {
///     fn search_by_name(&self, name: &str) -> Result<Vec<NameMatch>, StoreError> {
///         Ok((self.0.name == name).then(|| NameMatch::from(&self.0)).into_iter().collect())
///     }
///
///     fn search_by_color(&self, color: &str) -> Result<Vec<ColorMatch>, StoreError> {
///         let hit = self.0.color.as_deref() == Some(color);
///         Ok(hit.then(|| ColorMatch::from(&self.0)).into_iter().collect())
///     }
///
///     fn search_by_band_gap_window(
///         &self,
///         window: &BandGapWindow,
///     ) -> Result<Vec<PropertyRecord>, StoreError> {
///         let hit = self.0.band_gap.is_some_and(|gap| window.contains(gap));
///         Ok(hit.then(|| self.0.clone()).into_iter().collect())
///     }
///
///     fn first_rows(&self, _limit: RowLimit) -> Result<Vec<PropertyRecord>, StoreError> {
///         Ok(vec![self.0.clone()])
///     }
/// }
///
/// let store = Single(PropertyRecord::new("P", Some(2.0), Some("Violet".into())));
/// assert_eq!(store.search_by_band_gap(2.0, 5.0).unwrap().len(), 1);
/// assert!(store.search_by_band_gap_range(2.0, 1.0).is_err());
/// ```
pub trait PropertyStore {
    /// All rows whose material equals `name` exactly.
    fn search_by_name(&self, name: &str) -> Result<Vec<NameMatch>, StoreError>;

    /// All rows whose color equals `color` exactly.
    fn search_by_color(&self, color: &str) -> Result<Vec<ColorMatch>, StoreError>;

    /// All rows whose band gap lies inside `window`, bounds included.
    /// Rows without a band gap never match.
    fn search_by_band_gap_window(
        &self,
        window: &BandGapWindow,
    ) -> Result<Vec<PropertyRecord>, StoreError>;

    /// Up to `limit` rows in the backend's natural order.
    fn first_rows(&self, limit: RowLimit) -> Result<Vec<PropertyRecord>, StoreError>;

    /// Rows within `tolerance_pct` percent of `target`.
    ///
    /// See [`BandGapWindow::around`] for how the bounds are derived.
    fn search_by_band_gap(
        &self,
        target: f64,
        tolerance_pct: f64,
    ) -> Result<Vec<PropertyRecord>, StoreError> {
        self.search_by_band_gap_window(&BandGapWindow::around(target, tolerance_pct))
    }

    /// Rows with `min <= band_gap <= max`.
    ///
    /// Negative, non-finite or inverted bounds are rejected with
    /// [`StoreError::Validation`].
    fn search_by_band_gap_range(
        &self,
        min: f64,
        max: f64,
    ) -> Result<Vec<PropertyRecord>, StoreError> {
        let window = BandGapWindow::between(min, max)?;
        self.search_by_band_gap_window(&window)
    }

    /// Render the first `rows` rows as a table into `writer`, returning the
    /// number of rows shown.
    fn print_summary(&self, rows: i64, writer: &mut dyn Write) -> Result<usize, StoreError> {
        let limit = RowLimit::new(rows)?;
        let records = self.first_rows(limit)?;
        writer
            .write_all(render_table(&records).as_bytes())
            .map_err(StoreError::WriteSummary)?;
        Ok(records.len())
    }
}
