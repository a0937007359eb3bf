//! Records flowing through the template-expansion pass

use serde::Serialize;
use uuid::Uuid;

/// Marker value of `modules.template_state` that flags a template
pub const TEMPLATE_MARKER: &str = "true";

/// One row of the preorder-encoded module forest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleRow {
    /// Module identifier (unique per row)
    pub id: Uuid,

    /// Preorder nesting level, 0 for forest roots
    pub depth: u32,

    /// Whether the module is a template
    pub is_template: bool,
}

impl ModuleRow {
    /// Build a row from the raw nullable template marker
    ///
    /// Only the exact string `"true"` marks a template.
    pub fn from_marker(id: Uuid, depth: u32, template_state: Option<&str>) -> Self {
        Self {
            id,
            depth,
            is_template: template_state == Some(TEMPLATE_MARKER),
        }
    }
}

/// One row of the instance join table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceDescriptor {
    /// Template the instance binds to
    pub template_id: Uuid,

    /// Identity the instance root keeps in the expanded output
    pub instance_id: Uuid,

    /// Optional display label
    pub label: Option<String>,
}

/// A template occurrence deferred until one of its instances shows up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingNode {
    pub identity: Uuid,
    pub origin_module: Uuid,
    pub depth: u32,
}

impl PendingNode {
    /// A non-expanded template occurrence: identity and origin are the row itself
    pub fn from_row(row: &ModuleRow) -> Self {
        Self {
            identity: row.id,
            origin_module: row.id,
            depth: row.depth,
        }
    }
}

/// One concrete module occurrence of the expanded hierarchy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    /// Identity the occurrence is known by downstream
    pub identity: Uuid,

    /// Template or plain module the occurrence derives from
    pub origin_module: Uuid,

    /// Depth inherited from the source row
    pub depth: u32,

    /// Label of the resolving instance, `None` for plain rows
    pub label: Option<String>,
}

impl ResultRecord {
    /// A plain module passed through unchanged
    pub fn plain(row: &ModuleRow) -> Self {
        Self {
            identity: row.id,
            origin_module: row.id,
            depth: row.depth,
            label: None,
        }
    }
}

/// Provenance classification of a journal entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JournalCode {
    /// Template occurrence retired after all its instances were bound
    RetiredTemplate = 0,
    /// Pending descendant retired, superseded by its clones
    RetiredDescendant = 1,
    /// Instance root committed under its own supplied identity
    InstanceRoot = 2,
    /// Cloned descendant committed under a freshly minted identity
    ClonedDescendant = 3,
}

impl JournalCode {
    /// Numeric code as stored in the `journals` table
    pub fn as_i64(self) -> i64 {
        self as i64
    }

    pub fn from_i64(code: i64) -> Option<Self> {
        match code {
            0 => Some(JournalCode::RetiredTemplate),
            1 => Some(JournalCode::RetiredDescendant),
            2 => Some(JournalCode::InstanceRoot),
            3 => Some(JournalCode::ClonedDescendant),
            _ => None,
        }
    }
}

/// One provenance journal row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JournalEntry {
    pub code: JournalCode,
    pub identity: Uuid,
}

impl JournalEntry {
    pub fn new(code: JournalCode, identity: Uuid) -> Self {
        Self { code, identity }
    }
}

/// Counters collected over one run of the pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BranchStats {
    /// Forest rows scanned
    pub rows_scanned: u64,

    /// Non-template rows passed through
    pub plain_rows: u64,

    /// Template rows deferred onto the pending frontier
    pub templates_deferred: u64,

    /// Template rows that had at least one instance
    pub templates_resolved: u64,

    /// Instances bound to a template occurrence
    pub instances_bound: u64,

    /// Clones minted for pending descendants
    pub descendants_cloned: u64,

    /// Deferred templates never resolved and dropped at scan end
    pub unresolved_templates: u64,

    /// Journal entries written
    pub journal_entries: u64,

    /// Scope rows written
    pub scopes_written: u64,
}
