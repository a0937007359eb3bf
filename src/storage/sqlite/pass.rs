// File: src/storage/sqlite/pass.rs

use rusqlite::Connection;
use tracing::info;

use super::forest;
use super::joins;
use super::journal::JournalWriter;
use super::scopes::ScopeWriter;
use crate::branch::{BranchStats, Expander, Expansion};
use crate::error::BranchResult;
use crate::traits::{IdentitySource, ScopeSink};

/// Run the template-expansion pass against one model database
///
/// Loads the instance index, scans the forest while journaling provenance,
/// checks that every instance was bound and finally writes the scopes.
/// Each statement commits on its own unless `conn` is inside a transaction.
pub fn run_pass<S: IdentitySource>(conn: &Connection, ids: S) -> BranchResult<BranchStats> {
    let index = joins::load_instance_index(conn)?;
    info!(instances = index.len(), "loaded instance index");

    let journal = JournalWriter::new(conn)?;
    let mut expander = Expander::new(index, ids, journal);
    forest::scan_forest(conn, |row| expander.scan_row(row))?;
    let Expansion { records, mut stats } = expander.finish()?;

    let mut scopes = ScopeWriter::new(conn)?;
    for record in &records {
        scopes.write(record)?;
    }
    stats.scopes_written = records.len() as u64;

    info!(
        rows = stats.rows_scanned,
        templates = stats.templates_resolved,
        instances = stats.instances_bound,
        clones = stats.descendants_cloned,
        scopes = stats.scopes_written,
        "branch pass complete"
    );
    Ok(stats)
}
