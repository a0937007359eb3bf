// File: src/storage/sqlite/schema.rs

use rusqlite::{Connection, OptionalExtension};

use crate::error::{BranchResult, StorageError};

/// Current schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Create all tables (idempotent) and record the schema version
pub fn create_tables(conn: &Connection) -> BranchResult<()> {
    conn.execute_batch(SCHEMA_SQL)?;

    let now = chrono::Utc::now().timestamp_nanos_opt().unwrap_or(0);
    conn.execute(
        "INSERT OR REPLACE INTO branch_config (key, value, updated_at) VALUES ('schema_version', ?1, ?2)",
        rusqlite::params![SCHEMA_VERSION.to_string(), now],
    )
    .map_err(StorageError::step("schema version"))?;
    Ok(())
}

/// Read the recorded schema version, `None` if the schema was never created
pub fn schema_version(conn: &Connection) -> BranchResult<Option<u32>> {
    let table_exists = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type='table' AND name='branch_config'",
            [],
            |row| row.get::<_, String>(0),
        )
        .optional()?;
    if table_exists.is_none() {
        return Ok(None);
    }

    let value = conn
        .query_row(
            "SELECT value FROM branch_config WHERE key = 'schema_version'",
            [],
            |row| row.get::<_, String>(0),
        )
        .optional()?;

    match value {
        None => Ok(None),
        Some(v) => v.parse().map(Some).map_err(|_| {
            StorageError::Corruption(format!("invalid schema version: {v}")).into()
        }),
    }
}

const SCHEMA_SQL: &str = r#"
-- Store configuration
CREATE TABLE IF NOT EXISTS branch_config (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL
);

-- Module metadata, written by the format readers
CREATE TABLE IF NOT EXISTS modules (
    module_id BLOB PRIMARY KEY,             -- 16-byte UUID
    template_state TEXT                     -- exactly 'true' marks a template
);

-- Module forest in preorder (rowid order), written by the format readers
CREATE TABLE IF NOT EXISTS trees (
    module_id BLOB NOT NULL,                -- 16-byte UUID
    level INTEGER NOT NULL                  -- nesting depth, 0 = root
);

-- Template instances
CREATE TABLE IF NOT EXISTS joins (
    module_id BLOB,                         -- template UUID, NULL = unknown template
    uuid BLOB NOT NULL,                     -- instance UUID
    label TEXT
);

-- Provenance journal (append-only)
CREATE TABLE IF NOT EXISTS journals (
    code INTEGER NOT NULL,                  -- 0..3, see JournalCode
    uuid BLOB NOT NULL
);

-- Expanded flat hierarchy
CREATE TABLE IF NOT EXISTS scopes (
    uuid BLOB PRIMARY KEY,                  -- occurrence identity
    module_id BLOB NOT NULL,                -- origin module
    label TEXT
);
"#;
