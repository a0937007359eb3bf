//! Module template expansion
//!
//! Resolves every template instance of a model's module hierarchy into a
//! concrete copy of the template's pending subtree. The scan is independent
//! of storage: rows come in through [`Expander::scan_row`], provenance goes
//! out through a [`JournalSink`](crate::traits::JournalSink).

pub mod engine;
pub mod frontier;
pub mod index;
pub mod types;

pub use engine::{Expander, Expansion, RowKind, expand};
pub use frontier::PendingFrontier;
pub use index::{InstanceIndex, PendingInstance};
pub use types::{
    BranchStats, InstanceDescriptor, JournalCode, JournalEntry, ModuleRow, PendingNode,
    ResultRecord, TEMPLATE_MARKER,
};
