// File: src/storage/sqlite/convert.rs

use rusqlite::Row;
use rusqlite::types::Type;
use uuid::Uuid;

use super::scopes::ScopeRow;
use crate::branch::{JournalCode, JournalEntry, ModuleRow};
use crate::error::StorageError;

/// Decode a 16-byte UUID blob
pub fn uuid_from_blob(blob: &[u8], idx: usize, name: &str) -> rusqlite::Result<Uuid> {
    Uuid::from_slice(blob)
        .map_err(|_| rusqlite::Error::InvalidColumnType(idx, name.into(), Type::Blob))
}

fn uuid_column(row: &Row, idx: usize, name: &str) -> rusqlite::Result<Uuid> {
    let blob: Vec<u8> = row.get(idx)?;
    uuid_from_blob(&blob, idx, name)
}

fn optional_uuid_column(row: &Row, idx: usize, name: &str) -> rusqlite::Result<Option<Uuid>> {
    let blob: Option<Vec<u8>> = row.get(idx)?;
    blob.map(|b| uuid_from_blob(&b, idx, name)).transpose()
}

/// Convert a forest row: `(module_id, level, template_state)`
pub fn row_to_module(row: &Row) -> rusqlite::Result<ModuleRow> {
    let id = uuid_column(row, 0, "module_id")?;
    let level: i64 = row.get(1)?;
    let template_state: Option<String> = row.get(2)?;

    let depth =
        u32::try_from(level).map_err(|_| rusqlite::Error::IntegralValueOutOfRange(1, level))?;
    Ok(ModuleRow::from_marker(id, depth, template_state.as_deref()))
}

/// Convert a join row: `(module_id, uuid, label)`
///
/// The template reference stays optional; a NULL one is rejected by the caller.
pub fn row_to_join(row: &Row) -> rusqlite::Result<(Option<Uuid>, Uuid, Option<String>)> {
    let template_id = optional_uuid_column(row, 0, "module_id")?;
    let instance_id = uuid_column(row, 1, "uuid")?;
    let label: Option<String> = row.get(2)?;
    Ok((template_id, instance_id, label))
}

/// Convert a journal row: `(code, uuid)`
pub fn row_to_journal(row: &Row) -> rusqlite::Result<JournalEntry> {
    let code: i64 = row.get(0)?;
    let code =
        JournalCode::from_i64(code).ok_or(rusqlite::Error::IntegralValueOutOfRange(0, code))?;
    let identity = uuid_column(row, 1, "uuid")?;
    Ok(JournalEntry::new(code, identity))
}

/// Convert a scope row: `(uuid, module_id, label)`
pub fn row_to_scope(row: &Row) -> rusqlite::Result<ScopeRow> {
    Ok(ScopeRow {
        identity: uuid_column(row, 0, "uuid")?,
        origin_module: uuid_column(row, 1, "module_id")?,
        label: row.get(2)?,
    })
}

/// Classify a row-level failure of the named statement
///
/// Values of the wrong shape are corruption; anything else is a step failure.
pub fn row_error(statement: &'static str) -> impl FnOnce(rusqlite::Error) -> StorageError {
    move |e| match e {
        rusqlite::Error::InvalidColumnType(..)
        | rusqlite::Error::IntegralValueOutOfRange(..)
        | rusqlite::Error::FromSqlConversionFailure(..) => {
            StorageError::Corruption(format!("{statement}: {e}"))
        }
        other => StorageError::Step {
            statement,
            source: other,
        },
    }
}
