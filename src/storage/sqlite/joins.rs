// File: src/storage/sqlite/joins.rs

use rusqlite::Connection;

use super::convert;
use crate::branch::{InstanceDescriptor, InstanceIndex};
use crate::error::{BranchError, BranchResult, StorageError};

const JOINS_SQL: &str = "SELECT module_id, uuid, label FROM joins ORDER BY rowid";

/// Read every instance descriptor in table order
///
/// A join whose template reference is NULL is rejected right away.
pub fn read_instances(conn: &Connection) -> BranchResult<Vec<InstanceDescriptor>> {
    let mut stmt = conn
        .prepare(JOINS_SQL)
        .map_err(StorageError::prepare("joins"))?;
    let mut rows = stmt.query([]).map_err(StorageError::step("joins"))?;

    let mut descriptors = Vec::new();
    while let Some(row) = rows.next().map_err(StorageError::step("joins"))? {
        let (template_id, instance_id, label) =
            convert::row_to_join(row).map_err(convert::row_error("joins"))?;
        let template_id = template_id.ok_or(BranchError::UnknownTemplate { instance_id })?;
        descriptors.push(InstanceDescriptor {
            template_id,
            instance_id,
            label,
        });
    }
    Ok(descriptors)
}

/// Build the instance index from the join table
pub fn load_instance_index(conn: &Connection) -> BranchResult<InstanceIndex> {
    InstanceIndex::from_descriptors(read_instances(conn)?)
}
