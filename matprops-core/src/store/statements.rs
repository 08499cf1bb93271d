//! SQL issued against the `material_properties` table.
//!
//! Every function borrows an open connection so the per-call store and the
//! long-lived session share one implementation.

use log::{debug, info};
use rusqlite::{Connection, Params, Row, params};

use super::{ErrorPolicy, StoreError, WriteOutcome};
use crate::{BandGapWindow, ColorMatch, NameMatch, PropertyRecord, RowLimit};

/// Name of the single table owned by the store.
pub const TABLE_NAME: &str = "material_properties";

const CREATE_TABLE: &str = "CREATE TABLE material_properties (
    material TEXT,
    band_gap REAL,
    color TEXT
)";
const INSERT_ROW: &str =
    "INSERT INTO material_properties (material, band_gap, color) VALUES (?1, ?2, ?3)";
const DELETE_BY_NAME: &str = "DELETE FROM material_properties WHERE material = ?1";
const SELECT_BY_NAME: &str = "SELECT band_gap, color FROM material_properties WHERE material = ?1";
const SELECT_BY_COLOR: &str = "SELECT material, band_gap FROM material_properties WHERE color = ?1";
const SELECT_BY_BAND_GAP: &str = "SELECT material, band_gap, color FROM material_properties
    WHERE band_gap BETWEEN ?1 AND ?2";
const SELECT_FIRST_ROWS: &str = "SELECT material, band_gap, color FROM material_properties LIMIT ?1";

pub(super) fn create_table(
    connection: &Connection,
    policy: ErrorPolicy,
) -> Result<bool, StoreError> {
    match connection.execute(CREATE_TABLE, []) {
        Ok(_) => {
            info!("created table {TABLE_NAME}");
            Ok(true)
        }
        Err(source) => policy.absorb("create table", source, false),
    }
}

pub(super) fn insert_one(
    connection: &Connection,
    policy: ErrorPolicy,
    name: &str,
    band_gap: Option<f64>,
    color: Option<&str>,
) -> Result<WriteOutcome, StoreError> {
    match connection.execute(INSERT_ROW, params![name, band_gap, color]) {
        Ok(inserted) => Ok(WriteOutcome {
            succeeded: inserted,
            failed: 0,
        }),
        Err(source) => policy.absorb("insert row", source, WriteOutcome::all_failed(1)),
    }
}

/// Insert `records` inside one transaction.
///
/// Under [`ErrorPolicy::SkipAndReport`] a failing row is counted and skipped
/// while the remaining rows are still committed. Under
/// [`ErrorPolicy::Abort`] the first failure rolls the whole batch back.
pub(super) fn insert_many(
    connection: &Connection,
    policy: ErrorPolicy,
    records: &[PropertyRecord],
) -> Result<WriteOutcome, StoreError> {
    if records.is_empty() {
        return Ok(WriteOutcome::default());
    }
    let everything_failed = WriteOutcome::all_failed(records.len());

    let transaction = match connection.unchecked_transaction() {
        Ok(transaction) => transaction,
        Err(source) => return policy.absorb("begin insert transaction", source, everything_failed),
    };

    let mut outcome = WriteOutcome::default();
    {
        let mut statement = match transaction.prepare_cached(INSERT_ROW) {
            Ok(statement) => statement,
            Err(source) => return policy.absorb("prepare insert", source, everything_failed),
        };
        for record in records {
            match statement.execute(params![record.name, record.band_gap, record.color]) {
                Ok(inserted) => outcome.succeeded += inserted,
                Err(source) => {
                    policy.absorb("insert row", source, ())?;
                    outcome.failed += 1;
                }
            }
        }
    }

    if let Err(source) = transaction.commit() {
        return policy.absorb("commit inserts", source, everything_failed);
    }
    debug!(
        "inserted {} rows into {TABLE_NAME} ({} failed)",
        outcome.succeeded, outcome.failed
    );
    Ok(outcome)
}

pub(super) fn delete_by_name(
    connection: &Connection,
    policy: ErrorPolicy,
    name: &str,
) -> Result<WriteOutcome, StoreError> {
    match connection.execute(DELETE_BY_NAME, params![name]) {
        Ok(deleted) => {
            debug!("deleted {deleted} rows named {name}");
            Ok(WriteOutcome {
                succeeded: deleted,
                failed: 0,
            })
        }
        Err(source) => policy.absorb("delete by name", source, WriteOutcome::all_failed(1)),
    }
}

pub(super) fn search_by_name(
    connection: &Connection,
    policy: ErrorPolicy,
    name: &str,
) -> Result<Vec<NameMatch>, StoreError> {
    query_rows(connection, SELECT_BY_NAME, params![name], |row| {
        Ok(NameMatch {
            band_gap: row.get(0)?,
            color: row.get(1)?,
        })
    })
    .or_else(|source| policy.absorb("search by name", source, Vec::new()))
}

pub(super) fn search_by_color(
    connection: &Connection,
    policy: ErrorPolicy,
    color: &str,
) -> Result<Vec<ColorMatch>, StoreError> {
    query_rows(connection, SELECT_BY_COLOR, params![color], |row| {
        Ok(ColorMatch {
            material: row.get(0)?,
            band_gap: row.get(1)?,
        })
    })
    .or_else(|source| policy.absorb("search by color", source, Vec::new()))
}

pub(super) fn search_by_band_gap(
    connection: &Connection,
    policy: ErrorPolicy,
    window: &BandGapWindow,
) -> Result<Vec<PropertyRecord>, StoreError> {
    query_rows(
        connection,
        SELECT_BY_BAND_GAP,
        params![window.min(), window.max()],
        record_from_row,
    )
    .or_else(|source| policy.absorb("search by band gap", source, Vec::new()))
}

pub(super) fn first_rows(
    connection: &Connection,
    policy: ErrorPolicy,
    limit: RowLimit,
) -> Result<Vec<PropertyRecord>, StoreError> {
    query_rows(
        connection,
        SELECT_FIRST_ROWS,
        params![limit.get()],
        record_from_row,
    )
    .or_else(|source| policy.absorb("read first rows", source, Vec::new()))
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<PropertyRecord> {
    Ok(PropertyRecord {
        name: row.get(0)?,
        band_gap: row.get(1)?,
        color: row.get(2)?,
    })
}

fn query_rows<T, P, F>(
    connection: &Connection,
    sql: &str,
    params: P,
    map: F,
) -> rusqlite::Result<Vec<T>>
where
    P: Params,
    F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
{
    let mut statement = connection.prepare_cached(sql)?;
    let rows = statement.query_map(params, map)?;
    rows.collect()
}
