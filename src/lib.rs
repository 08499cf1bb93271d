//! Facade crate for the material-property store.
//!
//! This crate re-exports the record, query, and store types from
//! `matprops-core` together with the CSV extractor from `matprops-data`. The
//! SQLite store is available behind the `store-sqlite` feature.

#![forbid(unsafe_code)]

pub use matprops_core::{
    BAND_GAP_TAG, BandGapWindow, COLOR_TAG, ColorMatch, DEFAULT_TOLERANCE_PCT, ErrorPolicy,
    NameMatch, PropertyRecord, PropertyStore, QueryError, RowLimit, StoreError, TableRow,
    WriteOutcome, render_table,
};

#[cfg(feature = "store-sqlite")]
pub use matprops_core::{DatabaseStatus, SqlitePropertyStore, StoreSession, TABLE_NAME};

pub use matprops_data::{
    Dialect, DialectDetector, DialectError, ExtractError, FixedDialect, RecordExtractor, Sniffer,
    extract_records,
};
