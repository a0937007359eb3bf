// File: src/storage/sqlite/journal.rs

use rusqlite::{Connection, Statement, params};

use super::convert;
use crate::branch::JournalEntry;
use crate::error::{BranchResult, StorageError};
use crate::traits::JournalSink;

/// Appends journal entries through one prepared statement
pub struct JournalWriter<'conn> {
    stmt: Statement<'conn>,
}

impl<'conn> JournalWriter<'conn> {
    pub fn new(conn: &'conn Connection) -> BranchResult<Self> {
        let stmt = conn
            .prepare("INSERT INTO journals (code, uuid) VALUES (?1, ?2)")
            .map_err(StorageError::prepare("journal"))?;
        Ok(Self { stmt })
    }
}

impl JournalSink for JournalWriter<'_> {
    fn record(&mut self, entry: JournalEntry) -> BranchResult<()> {
        self.stmt
            .execute(params![entry.code.as_i64(), entry.identity.as_bytes().as_slice()])
            .map_err(StorageError::step("journal"))?;
        Ok(())
    }
}

/// Read the journal in write order
pub fn read_journal(conn: &Connection) -> BranchResult<Vec<JournalEntry>> {
    let mut stmt = conn
        .prepare("SELECT code, uuid FROM journals ORDER BY rowid")
        .map_err(StorageError::prepare("journal read"))?;
    let rows = stmt
        .query_map([], convert::row_to_journal)
        .map_err(StorageError::step("journal read"))?;

    let mut entries = Vec::new();
    for row in rows {
        entries.push(row.map_err(convert::row_error("journal read"))?);
    }
    Ok(entries)
}
