//! Core domain types for material-property lookups.
//!
//! The crate defines the record shape produced by ingestion, the validated
//! query parameters accepted by the store, and the [`PropertyStore`] trait with
//! its SQLite implementation. Validation lives in constructors so invalid
//! ranges and row counts are rejected before any SQL is issued.
#![forbid(unsafe_code)]

mod query;
mod record;
pub mod store;
pub mod table;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use query::{BandGapWindow, DEFAULT_TOLERANCE_PCT, QueryError, RowLimit};
pub use record::{BAND_GAP_TAG, COLOR_TAG, ColorMatch, NameMatch, PropertyRecord};
pub use store::{ErrorPolicy, PropertyStore, StoreError, WriteOutcome};
pub use table::{TableRow, render_table};

#[cfg(feature = "store-sqlite")]
pub use store::{DatabaseStatus, SqlitePropertyStore, StoreSession, TABLE_NAME};
