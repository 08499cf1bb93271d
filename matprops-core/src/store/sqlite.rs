//! SQLite-backed property store that opens a connection per operation.

use camino::{Utf8Path, Utf8PathBuf};
use log::info;
use matprops_fs::PathKind;
use rusqlite::{Connection, OpenFlags};

use super::{ErrorPolicy, PropertyStore, StoreError, StoreSession, WriteOutcome, statements};
use crate::{BandGapWindow, ColorMatch, NameMatch, PropertyRecord, RowLimit};

/// Result of [`SqlitePropertyStore::ensure_database_exists`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseStatus {
    /// The database file was created by this call.
    Created,
    /// A database file was already present and left untouched.
    AlreadyExists,
}

/// Property store backed by a single SQLite file.
///
/// Every operation opens its own connection and closes it before returning,
/// so no handle is held between calls. Use [`SqlitePropertyStore::session`]
/// to run several operations over one connection.
///
/// # Examples
///
/// ```
/// use camino::Utf8PathBuf;
/// use matprops_core::{PropertyRecord, PropertyStore, SqlitePropertyStore};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dir = tempfile::tempdir()?;
/// let path = Utf8PathBuf::from_path_buf(dir.path().join("materials.db"))
///     .map_err(|_| "non UTF-8 temp dir")?;
/// let store = SqlitePropertyStore::new(path);
/// store.ensure_database_exists()?;
/// store.create_table()?;
/// store.insert_many(&[PropertyRecord::new("Cd1I2", Some(3.19), Some("White".into()))])?;
///
/// let found = store.search_by_color("White")?;
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].material, "Cd1I2");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SqlitePropertyStore {
    path: Utf8PathBuf,
    policy: ErrorPolicy,
}

impl SqlitePropertyStore {
    /// Store backed by the database file at `path`, skipping and reporting
    /// statement failures.
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            path: path.into(),
            policy: ErrorPolicy::default(),
        }
    }

    /// Replace the statement error policy.
    #[must_use]
    pub const fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Location of the database file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Active statement error policy.
    #[must_use]
    pub const fn error_policy(&self) -> ErrorPolicy {
        self.policy
    }

    /// Create the database file, and any missing parent directories, unless
    /// it already exists.
    ///
    /// Calling this repeatedly is harmless: later calls only log that the
    /// database is present.
    pub fn ensure_database_exists(&self) -> Result<DatabaseStatus, StoreError> {
        let kind =
            matprops_fs::probe_path(&self.path).map_err(|source| StoreError::InspectDatabase {
                path: self.path.clone(),
                source,
            })?;
        match kind {
            PathKind::File => {
                info!("database {} already exists", self.path);
                Ok(DatabaseStatus::AlreadyExists)
            }
            PathKind::NotFile => Err(StoreError::DatabaseNotAFile {
                path: self.path.clone(),
            }),
            PathKind::Missing => {
                info!("database {} does not exist; creating it", self.path);
                matprops_fs::ensure_parent_dir(&self.path).map_err(|source| {
                    StoreError::CreateDatabase {
                        path: self.path.clone(),
                        source,
                    }
                })?;
                Connection::open(self.path.as_std_path()).map_err(|source| StoreError::Open {
                    path: self.path.clone(),
                    source,
                })?;
                info!("database {} created", self.path);
                Ok(DatabaseStatus::Created)
            }
        }
    }

    /// Create the `material_properties` table.
    ///
    /// Returns `false` when the statement failed and the policy skipped the
    /// failure, which is what happens when the table already exists.
    pub fn create_table(&self) -> Result<bool, StoreError> {
        let connection = self.connect()?;
        statements::create_table(&connection, self.policy)
    }

    /// Insert a single row.
    pub fn insert_one(
        &self,
        name: &str,
        band_gap: Option<f64>,
        color: Option<&str>,
    ) -> Result<WriteOutcome, StoreError> {
        let connection = self.connect()?;
        statements::insert_one(&connection, self.policy, name, band_gap, color)
    }

    /// Insert every record in one transaction.
    pub fn insert_many(&self, records: &[PropertyRecord]) -> Result<WriteOutcome, StoreError> {
        let connection = self.connect()?;
        statements::insert_many(&connection, self.policy, records)
    }

    /// Delete every row whose material equals `name`.
    pub fn delete_by_name(&self, name: &str) -> Result<WriteOutcome, StoreError> {
        let connection = self.connect()?;
        statements::delete_by_name(&connection, self.policy, name)
    }

    /// Open one connection and keep it for the lifetime of the returned
    /// session.
    pub fn session(&self) -> Result<StoreSession, StoreError> {
        Ok(StoreSession::new(self.connect()?, self.policy))
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        Connection::open_with_flags(self.path.as_std_path(), flags).map_err(|source| {
            StoreError::Open {
                path: self.path.clone(),
                source,
            }
        })
    }
}

impl PropertyStore for SqlitePropertyStore {
    fn search_by_name(&self, name: &str) -> Result<Vec<NameMatch>, StoreError> {
        let connection = self.connect()?;
        statements::search_by_name(&connection, self.policy, name)
    }

    fn search_by_color(&self, color: &str) -> Result<Vec<ColorMatch>, StoreError> {
        let connection = self.connect()?;
        statements::search_by_color(&connection, self.policy, color)
    }

    fn search_by_band_gap_window(
        &self,
        window: &BandGapWindow,
    ) -> Result<Vec<PropertyRecord>, StoreError> {
        let connection = self.connect()?;
        statements::search_by_band_gap(&connection, self.policy, window)
    }

    fn first_rows(&self, limit: RowLimit) -> Result<Vec<PropertyRecord>, StoreError> {
        let connection = self.connect()?;
        statements::first_rows(&connection, self.policy, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_records;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    struct Workspace {
        _dir: TempDir,
        store: SqlitePropertyStore,
    }

    #[fixture]
    fn workspace() -> Workspace {
        let dir = TempDir::new().expect("create temp dir");
        let path =
            Utf8PathBuf::from_path_buf(dir.path().join("materials.db")).expect("utf-8 path");
        Workspace {
            _dir: dir,
            store: SqlitePropertyStore::new(path),
        }
    }

    #[rstest]
    fn ensure_database_is_idempotent(workspace: Workspace) {
        let store = &workspace.store;
        assert_eq!(
            store.ensure_database_exists().expect("create database"),
            DatabaseStatus::Created
        );
        assert!(store.path().is_file());
        store.create_table().expect("create table");
        store.insert_many(&sample_records()).expect("insert");

        assert_eq!(
            store.ensure_database_exists().expect("second call"),
            DatabaseStatus::AlreadyExists
        );
        let rows = store
            .first_rows(RowLimit::new(100).expect("limit"))
            .expect("read rows");
        assert_eq!(rows.len(), sample_records().len(), "no data lost");
    }

    #[rstest]
    fn ensure_database_creates_parent_directories() {
        let dir = TempDir::new().expect("create temp dir");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("nested/data/materials.db"))
            .expect("utf-8 path");
        let store = SqlitePropertyStore::new(path);

        store.ensure_database_exists().expect("create nested database");

        assert!(store.path().is_file());
    }

    #[rstest]
    fn ensure_database_rejects_directories() {
        let dir = TempDir::new().expect("create temp dir");
        let path = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 path");
        let err = SqlitePropertyStore::new(path)
            .ensure_database_exists()
            .expect_err("directory is not a database");
        assert!(matches!(err, StoreError::DatabaseNotAFile { .. }));
    }

    #[rstest]
    fn operations_need_an_existing_database(workspace: Workspace) {
        let err = workspace
            .store
            .search_by_name("P")
            .expect_err("missing database cannot be opened");
        assert!(matches!(err, StoreError::Open { .. }));
        assert!(!workspace.store.path().exists(), "no file is created");
    }

    #[rstest]
    fn create_table_twice_is_best_effort(workspace: Workspace) {
        let store = &workspace.store;
        store.ensure_database_exists().expect("create database");
        assert!(store.create_table().expect("first create"));
        assert!(!store.create_table().expect("second create is skipped"));

        let strict = store.clone().with_error_policy(ErrorPolicy::Abort);
        assert!(matches!(
            strict.create_table(),
            Err(StoreError::Statement { .. })
        ));
    }

    #[rstest]
    fn session_shares_one_connection(workspace: Workspace) {
        let store = &workspace.store;
        store.ensure_database_exists().expect("create database");
        let session = store.session().expect("open session");
        assert!(session.create_table().expect("create table"));
        session.insert_many(&sample_records()).expect("insert");
        session
            .insert_one("Mo1S2", Some(1.8), Some("Grey"))
            .expect("insert one");
        drop(session);

        let found = store.search_by_name("Mo1S2").expect("search");
        assert_eq!(
            found,
            vec![NameMatch {
                band_gap: Some(1.8),
                color: Some("Grey".into()),
            }]
        );
    }
}
