// File: src/storage/sqlite/scopes.rs

use rusqlite::{Connection, Statement, params};
use uuid::Uuid;

use super::convert;
use crate::branch::ResultRecord;
use crate::error::{BranchResult, StorageError};
use crate::traits::ScopeSink;

/// A persisted scope: one concrete module occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeRow {
    pub identity: Uuid,
    pub origin_module: Uuid,
    pub label: Option<String>,
}

/// Appends scope records through one prepared statement
pub struct ScopeWriter<'conn> {
    stmt: Statement<'conn>,
}

impl<'conn> ScopeWriter<'conn> {
    pub fn new(conn: &'conn Connection) -> BranchResult<Self> {
        let stmt = conn
            .prepare("INSERT INTO scopes (uuid, module_id, label) VALUES (?1, ?2, ?3)")
            .map_err(StorageError::prepare("scopes"))?;
        Ok(Self { stmt })
    }
}

impl ScopeSink for ScopeWriter<'_> {
    fn write(&mut self, record: &ResultRecord) -> BranchResult<()> {
        // An empty label is stored as NULL
        let label = record.label.as_deref().filter(|l| !l.is_empty());
        self.stmt
            .execute(params![
                record.identity.as_bytes().as_slice(),
                record.origin_module.as_bytes().as_slice(),
                label,
            ])
            .map_err(StorageError::step("scopes"))?;
        Ok(())
    }
}

/// Read the scopes in write order
pub fn read_scopes(conn: &Connection) -> BranchResult<Vec<ScopeRow>> {
    let mut stmt = conn
        .prepare("SELECT uuid, module_id, label FROM scopes ORDER BY rowid")
        .map_err(StorageError::prepare("scopes read"))?;
    let rows = stmt
        .query_map([], convert::row_to_scope)
        .map_err(StorageError::step("scopes read"))?;

    let mut scopes = Vec::new();
    for row in rows {
        scopes.push(row.map_err(convert::row_error("scopes read"))?);
    }
    Ok(scopes)
}
