// File: src/storage/sqlite/config.rs

/// SQLite store configuration
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    /// Path to database file (or ":memory:" for in-memory)
    pub path: String,

    /// Enable WAL journal mode
    pub wal_mode: bool,

    /// Busy timeout in milliseconds
    pub busy_timeout_ms: u32,

    /// Enable foreign key enforcement
    pub foreign_keys: bool,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            path: "model.db".to_string(),
            wal_mode: true,
            busy_timeout_ms: 5000,
            foreign_keys: true,
        }
    }
}

/// Row counts of the tables touched by the pass
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct StoreStats {
    /// Rows in `modules`
    pub module_count: u64,

    /// Rows in `trees` (forest rows)
    pub tree_row_count: u64,

    /// Rows in `joins` (instance descriptors)
    pub join_count: u64,

    /// Rows in `journals`
    pub journal_count: u64,

    /// Rows in `scopes`
    pub scope_count: u64,
}
