//! Ingestion of material-property records from delimited text.
//!
//! Responsibilities:
//! - Infer the dialect of a delimited source, or accept a pinned one.
//! - Map positional rows into [`matprops_core::PropertyRecord`]s.
//!
//! Boundaries:
//! - Persistence lives in `matprops-core`; this crate never opens a database.
//! - Sources are read whole; streaming very large files is out of scope.
//!
//! Invariants:
//! - Records come back in source order, one per data row.
//! - No global mutable state.
#![forbid(unsafe_code)]

mod extract;

pub use extract::{
    Dialect, DialectDetector, DialectError, ExtractError, FixedDialect, RecordExtractor,
    SAMPLE_SIZE, Sniffer, extract_records, sample_of,
};
