//! Single-connection mode for callers issuing many operations in a row.

use rusqlite::Connection;

use super::{ErrorPolicy, PropertyStore, StoreError, WriteOutcome, statements};
use crate::{BandGapWindow, ColorMatch, NameMatch, PropertyRecord, RowLimit};

/// A property store session holding one open connection.
///
/// The session offers the same operations as
/// [`SqlitePropertyStore`](super::SqlitePropertyStore) and applies the same
/// error policy. The connection closes when the session is dropped.
#[derive(Debug)]
pub struct StoreSession {
    connection: Connection,
    policy: ErrorPolicy,
}

impl StoreSession {
    pub(super) const fn new(connection: Connection, policy: ErrorPolicy) -> Self {
        Self { connection, policy }
    }

    /// Create the `material_properties` table.
    pub fn create_table(&self) -> Result<bool, StoreError> {
        statements::create_table(&self.connection, self.policy)
    }

    /// Insert a single row.
    pub fn insert_one(
        &self,
        name: &str,
        band_gap: Option<f64>,
        color: Option<&str>,
    ) -> Result<WriteOutcome, StoreError> {
        statements::insert_one(&self.connection, self.policy, name, band_gap, color)
    }

    /// Insert every record in one transaction.
    pub fn insert_many(&self, records: &[PropertyRecord]) -> Result<WriteOutcome, StoreError> {
        statements::insert_many(&self.connection, self.policy, records)
    }

    /// Delete every row whose material equals `name`.
    pub fn delete_by_name(&self, name: &str) -> Result<WriteOutcome, StoreError> {
        statements::delete_by_name(&self.connection, self.policy, name)
    }
}

impl PropertyStore for StoreSession {
    fn search_by_name(&self, name: &str) -> Result<Vec<NameMatch>, StoreError> {
        statements::search_by_name(&self.connection, self.policy, name)
    }

    fn search_by_color(&self, color: &str) -> Result<Vec<ColorMatch>, StoreError> {
        statements::search_by_color(&self.connection, self.policy, color)
    }

    fn search_by_band_gap_window(
        &self,
        window: &BandGapWindow,
    ) -> Result<Vec<PropertyRecord>, StoreError> {
        statements::search_by_band_gap(&self.connection, self.policy, window)
    }

    fn first_rows(&self, limit: RowLimit) -> Result<Vec<PropertyRecord>, StoreError> {
        statements::first_rows(&self.connection, self.policy, limit)
    }
}
