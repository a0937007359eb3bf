// File: src/storage/sqlite/forest.rs

use rusqlite::Connection;

use super::convert;
use crate::branch::ModuleRow;
use crate::error::{BranchResult, StorageError};

/// Forest rows in preorder, template flag left-joined from module metadata
pub const FOREST_SQL: &str = "SELECT t.module_id, t.level, m.template_state \
     FROM trees AS t LEFT JOIN modules AS m ON t.module_id = m.module_id \
     ORDER BY t.rowid";

/// Stream the forest through `visit`, one row at a time
///
/// Stops at the first error, whether from the store or from `visit`.
/// Returns the number of rows visited.
pub fn scan_forest<F>(conn: &Connection, mut visit: F) -> BranchResult<u64>
where
    F: FnMut(ModuleRow) -> BranchResult<()>,
{
    let mut stmt = conn
        .prepare(FOREST_SQL)
        .map_err(StorageError::prepare("forest"))?;
    let mut rows = stmt.query([]).map_err(StorageError::step("forest"))?;

    let mut count = 0;
    while let Some(row) = rows.next().map_err(StorageError::step("forest"))? {
        let module = convert::row_to_module(row).map_err(convert::row_error("forest"))?;
        visit(module)?;
        count += 1;
    }
    Ok(count)
}

/// Read the whole forest into memory
pub fn read_forest(conn: &Connection) -> BranchResult<Vec<ModuleRow>> {
    let mut forest = Vec::new();
    scan_forest(conn, |row| {
        forest.push(row);
        Ok(())
    })?;
    Ok(forest)
}
