// File: src/storage/sqlite/store.rs

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, params};
use uuid::Uuid;

use super::config::{SqliteConfig, StoreStats};
use super::journal;
use super::pass;
use super::schema;
use super::scopes::{self, ScopeRow};
use crate::branch::{BranchStats, JournalEntry, TEMPLATE_MARKER};
use crate::error::{BranchError, BranchResult, StorageError};
use crate::traits::IdentitySource;

/// Model database holding the module forest and the pass outputs
pub struct SqliteStore {
    /// Database connection
    conn: Mutex<Connection>,

    /// Configuration the connection was opened with
    config: SqliteConfig,
}

impl SqliteStore {
    /// Open (or create) the database at `path` with default configuration
    pub fn new<P: AsRef<Path>>(path: P) -> BranchResult<Self> {
        let config = SqliteConfig {
            path: path.as_ref().to_string_lossy().to_string(),
            ..Default::default()
        };
        Self::with_config(config)
    }

    /// Create with custom configuration
    pub fn with_config(config: SqliteConfig) -> BranchResult<Self> {
        let conn = Connection::open(&config.path).map_err(|e| {
            BranchError::Storage(StorageError::ConnectionFailed(format!(
                "failed to open db: {}",
                e
            )))
        })?;

        Self::configure_connection(&conn, &config)?;

        Ok(Self {
            conn: Mutex::new(conn),
            config,
        })
    }

    /// Create an in-memory database (for testing)
    pub fn in_memory() -> BranchResult<Self> {
        let config = SqliteConfig {
            path: ":memory:".to_string(),
            ..Default::default()
        };
        Self::with_config(config)
    }

    /// Open an existing database (fails if doesn't exist)
    pub fn open<P: AsRef<Path>>(path: P) -> BranchResult<Self> {
        if !path.as_ref().exists() {
            return Err(BranchError::Storage(StorageError::ConnectionFailed(
                "database does not exist".into(),
            )));
        }
        Self::new(path)
    }

    /// Configure SQLite connection pragmas
    fn configure_connection(conn: &Connection, config: &SqliteConfig) -> BranchResult<()> {
        if config.wal_mode {
            conn.pragma_update(None, "journal_mode", "WAL")?;
        }
        conn.pragma_update(None, "busy_timeout", config.busy_timeout_ms)?;
        if config.foreign_keys {
            conn.pragma_update(None, "foreign_keys", "ON")?;
        }
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        Ok(())
    }

    /// Configuration the store was opened with
    pub fn config(&self) -> &SqliteConfig {
        &self.config
    }

    /// Create the schema (idempotent)
    pub fn initialize(&self) -> BranchResult<()> {
        let conn = self.get_conn()?;
        schema::create_tables(&conn)
    }

    /// Check if the schema has been created
    pub fn is_initialized(&self) -> bool {
        self.get_conn()
            .and_then(|conn| schema::schema_version(&conn))
            .map(|v| v.is_some())
            .unwrap_or(false)
    }

    // ========== Population (format readers) ==========

    /// Record module metadata with a raw template marker
    pub fn insert_module_state(
        &self,
        module_id: Uuid,
        template_state: Option<&str>,
    ) -> BranchResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO modules (module_id, template_state) VALUES (?1, ?2)",
            params![module_id.as_bytes().as_slice(), template_state],
        )
        .map_err(StorageError::step("modules"))?;
        Ok(())
    }

    /// Record module metadata
    pub fn insert_module(&self, module_id: Uuid, is_template: bool) -> BranchResult<()> {
        self.insert_module_state(module_id, is_template.then_some(TEMPLATE_MARKER))
    }

    /// Append the next forest row in preorder
    pub fn append_tree_row(&self, module_id: Uuid, level: u32) -> BranchResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO trees (module_id, level) VALUES (?1, ?2)",
            params![module_id.as_bytes().as_slice(), level],
        )
        .map_err(StorageError::step("trees"))?;
        Ok(())
    }

    /// Record an instance; `None` marks a template that could not be resolved
    pub fn insert_join(
        &self,
        template_id: Option<Uuid>,
        instance_id: Uuid,
        label: Option<&str>,
    ) -> BranchResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO joins (module_id, uuid, label) VALUES (?1, ?2, ?3)",
            params![
                template_id.as_ref().map(|id| id.as_bytes().as_slice()),
                instance_id.as_bytes().as_slice(),
                label,
            ],
        )
        .map_err(StorageError::step("joins"))?;
        Ok(())
    }

    // ========== Template expansion ==========

    /// Run the expansion pass, each write committing on its own
    ///
    /// On failure, journal rows written before the error stay in place.
    pub fn branch<S: IdentitySource>(&self, ids: S) -> BranchResult<BranchStats> {
        let conn = self.get_conn()?;
        pass::run_pass(&conn, ids)
    }

    /// Run the expansion pass inside a single transaction
    ///
    /// On failure nothing is written.
    pub fn branch_atomic<S: IdentitySource>(&self, ids: S) -> BranchResult<BranchStats> {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(StorageError::step("begin"))?;
        let stats = pass::run_pass(&tx, ids)?;
        tx.commit().map_err(StorageError::step("commit"))?;
        Ok(stats)
    }

    // ========== Inspection ==========

    /// Journal entries in write order
    pub fn journal(&self) -> BranchResult<Vec<JournalEntry>> {
        let conn = self.get_conn()?;
        journal::read_journal(&conn)
    }

    /// Scopes in write order
    pub fn scopes(&self) -> BranchResult<Vec<ScopeRow>> {
        let conn = self.get_conn()?;
        scopes::read_scopes(&conn)
    }

    /// Get row counts of every table
    pub fn stats(&self) -> BranchResult<StoreStats> {
        let conn = self.get_conn()?;
        let count = |table: &str| -> BranchResult<u64> {
            let n: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                row.get(0)
            })?;
            Ok(n as u64)
        };
        Ok(StoreStats {
            module_count: count("modules")?,
            tree_row_count: count("trees")?,
            join_count: count("joins")?,
            journal_count: count("journals")?,
            scope_count: count("scopes")?,
        })
    }

    /// Get locked connection for internal operations
    pub(crate) fn get_conn(&self) -> BranchResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| {
            BranchError::Storage(StorageError::ConnectionFailed("lock poisoned".into()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SqliteStore {
        let store = SqliteStore::in_memory().expect("Failed to create in-memory store");
        store.initialize().expect("Failed to initialize store");
        store
    }

    #[test]
    fn test_initialize_creates_tables() {
        let store = SqliteStore::in_memory().unwrap();
        assert!(!store.is_initialized());
        store.initialize().unwrap();
        assert!(store.is_initialized());
        assert_eq!(store.stats().unwrap(), StoreStats::default());
    }

    #[test]
    fn test_open_missing_database_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = SqliteStore::open(dir.path().join("missing.db"));
        assert!(matches!(
            result,
            Err(BranchError::Storage(StorageError::ConnectionFailed(_)))
        ));
    }

    #[test]
    fn test_population_counts() {
        let store = store();
        let a = Uuid::from_u128(1);
        let b = Uuid::from_u128(2);

        store.insert_module(a, false).unwrap();
        store.insert_module(b, true).unwrap();
        store.append_tree_row(a, 0).unwrap();
        store.append_tree_row(b, 1).unwrap();
        store.insert_join(Some(b), Uuid::from_u128(3), Some("x")).unwrap();

        let stats = store.stats().unwrap();
        assert_eq!(stats.module_count, 2);
        assert_eq!(stats.tree_row_count, 2);
        assert_eq!(stats.join_count, 1);
        assert_eq!(stats.journal_count, 0);
    }

    #[test]
    fn test_duplicate_module_is_a_step_error() {
        let store = store();
        let a = Uuid::from_u128(1);
        store.insert_module(a, false).unwrap();

        let err = store.insert_module(a, true).unwrap_err();
        assert!(matches!(
            err,
            BranchError::Storage(StorageError::Step {
                statement: "modules",
                ..
            })
        ));
    }

    #[test]
    fn test_branch_on_uninitialized_store_fails_to_prepare() {
        let store = SqliteStore::in_memory().unwrap();
        let err = store
            .branch(crate::traits::SequentialIdentities::starting_at(0))
            .unwrap_err();
        assert!(matches!(
            err,
            BranchError::Storage(StorageError::Prepare {
                statement: "joins",
                ..
            })
        ));
    }
}
