//! Expansion engine: one linear scan over the module forest
//!
//! Each row is classified as plain, deferred, or resolving:
//!
//! - plain rows are emitted as-is;
//! - template rows without a known instance are deferred onto the pending
//!   frontier;
//! - template rows with instances pull their deferred descendants off the
//!   frontier and clone them once per instance, followed by the instance
//!   root.
//!
//! Plain rows nested under a deferred template are emitted immediately and
//! never cloned; only deferred templates multiply.

use tracing::{debug, trace, warn};

use super::frontier::PendingFrontier;
use super::index::{InstanceIndex, PendingInstance};
use super::types::{
    BranchStats, JournalCode, JournalEntry, ModuleRow, PendingNode, ResultRecord,
};
use crate::error::BranchResult;
use crate::traits::{IdentitySource, JournalSink};

/// How a forest row is handled by the scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Non-template module, emitted unchanged
    Plain,
    /// Template with no remaining instance, pushed onto the frontier
    Deferred,
    /// Template with at least one remaining instance
    Resolving,
}

/// Output of a successful scan
#[derive(Debug, Clone)]
pub struct Expansion {
    /// Expanded scope records in emission order
    pub records: Vec<ResultRecord>,

    pub stats: BranchStats,
}

/// State machine driven row by row over the preorder forest
pub struct Expander<S, J> {
    index: InstanceIndex,
    ids: S,
    journal: J,
    pending: PendingFrontier,
    result: Vec<ResultRecord>,
    stats: BranchStats,
}

impl<S: IdentitySource, J: JournalSink> Expander<S, J> {
    pub fn new(index: InstanceIndex, ids: S, journal: J) -> Self {
        Self {
            index,
            ids,
            journal,
            pending: PendingFrontier::new(),
            result: Vec::new(),
            stats: BranchStats::default(),
        }
    }

    /// Classify a row against the instances still unbound
    pub fn classify(&self, row: &ModuleRow) -> RowKind {
        if !row.is_template {
            RowKind::Plain
        } else if self.index.has_instances(&row.id) {
            RowKind::Resolving
        } else {
            RowKind::Deferred
        }
    }

    /// Feed the next row of the forest
    pub fn scan_row(&mut self, row: ModuleRow) -> BranchResult<()> {
        self.stats.rows_scanned += 1;
        let kind = self.classify(&row);
        trace!(module = %row.id, depth = row.depth, ?kind, "scan");

        match kind {
            RowKind::Plain => {
                self.stats.plain_rows += 1;
                self.result.push(ResultRecord::plain(&row));
            }
            RowKind::Deferred => {
                self.stats.templates_deferred += 1;
                self.pending.push(PendingNode::from_row(&row));
            }
            RowKind::Resolving => self.resolve(&row)?,
        }
        Ok(())
    }

    /// Clone the pending subtree of `template` once per matching instance
    fn resolve(&mut self, template: &ModuleRow) -> BranchResult<()> {
        let descendants = self.pending.collect_descendants(template.depth);
        let mut bound = 0u64;

        while let Some(instance) = self.index.take_next(&template.id) {
            self.bind(template, &descendants, instance)?;
            bound += 1;
        }

        for node in &descendants {
            self.record(JournalCode::RetiredDescendant, node.identity)?;
        }
        self.record(JournalCode::RetiredTemplate, template.id)?;

        self.stats.templates_resolved += 1;
        debug!(
            template = %template.id,
            instances = bound,
            descendants = descendants.len(),
            "resolved template"
        );
        Ok(())
    }

    /// Emit one instance: clones of every descendant, then the instance root
    fn bind(
        &mut self,
        template: &ModuleRow,
        descendants: &[PendingNode],
        instance: PendingInstance,
    ) -> BranchResult<()> {
        for node in descendants {
            let identity = self.ids.next_identity();
            self.result.push(ResultRecord {
                identity,
                origin_module: node.origin_module,
                depth: node.depth,
                label: instance.label.clone(),
            });
            self.record(JournalCode::ClonedDescendant, identity)?;
            self.stats.descendants_cloned += 1;
        }

        self.result.push(ResultRecord {
            identity: instance.instance_id,
            origin_module: template.id,
            depth: template.depth,
            label: instance.label,
        });
        self.record(JournalCode::InstanceRoot, instance.instance_id)?;
        self.stats.instances_bound += 1;
        Ok(())
    }

    fn record(&mut self, code: JournalCode, identity: uuid::Uuid) -> BranchResult<()> {
        self.journal.record(JournalEntry::new(code, identity))?;
        self.stats.journal_entries += 1;
        Ok(())
    }

    /// End the scan and validate that every instance was bound
    ///
    /// Templates still deferred are dropped without error.
    pub fn finish(mut self) -> BranchResult<Expansion> {
        let unresolved = self.pending.into_unresolved();
        if !unresolved.is_empty() {
            warn!(
                count = unresolved.len(),
                "dropping templates that no instance refers to"
            );
            for node in &unresolved {
                debug!(template = %node.identity, depth = node.depth, "unresolved template");
            }
        }
        self.stats.unresolved_templates = unresolved.len() as u64;

        self.index.ensure_consumed()?;

        Ok(Expansion {
            records: self.result,
            stats: self.stats,
        })
    }
}

/// Run the whole scan over an in-memory forest
pub fn expand<R, S, J>(
    rows: R,
    index: InstanceIndex,
    ids: S,
    journal: J,
) -> BranchResult<Expansion>
where
    R: IntoIterator<Item = ModuleRow>,
    S: IdentitySource,
    J: JournalSink,
{
    let mut expander = Expander::new(index, ids, journal);
    for row in rows {
        expander.scan_row(row)?;
    }
    expander.finish()
}
