//! Branch pass error types

use thiserror::Error;
use uuid::Uuid;

/// Main error type of the template-expansion pass
#[derive(Debug, Error)]
pub enum BranchError {
    // ========== Storage Errors ==========
    /// Store access failed (prepare/step/bind)
    #[error("storage error: {0}")]
    Storage(StorageError),

    // ========== Instance Errors ==========
    /// A join row references a template that is not a known module
    #[error(
        "template for instance {instance_id} is unknown: its template id matches no module"
    )]
    UnknownTemplate { instance_id: Uuid },

    /// Two join rows supply the same instance identity
    #[error("duplicate instance: {instance_id}")]
    DuplicateInstance { instance_id: Uuid },

    /// Instances left unconsumed after the forest scan
    #[error("the following instances miss their templates: {}", format_orphans(.0))]
    OrphanedInstances(Vec<OrphanedInstance>),

    // ========== Configuration Errors ==========
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// A `(template, instance)` pair whose template never showed up in the forest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrphanedInstance {
    pub template_id: Uuid,
    pub instance_id: Uuid,
}

fn format_orphans(orphans: &[OrphanedInstance]) -> String {
    orphans
        .iter()
        .map(|o| format!("{} {}", o.template_id, o.instance_id))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Storage-specific errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database connection failed
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Preparing a statement failed
    #[error("failed to prepare {statement} statement: {source}")]
    Prepare {
        statement: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    /// Stepping or executing a statement failed
    #[error("failed to step {statement} statement: {source}")]
    Step {
        statement: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    /// Stored data does not have the expected shape
    #[error("data corruption: {0}")]
    Corruption(String),

    /// Schema has not been created yet
    #[error("storage not initialized")]
    NotInitialized,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// SQLite database error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl StorageError {
    /// Wrap a prepare failure of the named statement
    pub fn prepare(statement: &'static str) -> impl FnOnce(rusqlite::Error) -> StorageError {
        move |source| StorageError::Prepare { statement, source }
    }

    /// Wrap a step/execute failure of the named statement
    pub fn step(statement: &'static str) -> impl FnOnce(rusqlite::Error) -> StorageError {
        move |source| StorageError::Step { statement, source }
    }
}

/// Branch result type alias
pub type BranchResult<T> = Result<T, BranchError>;

impl BranchError {
    /// Get a stable error code for reporting
    pub fn error_code(&self) -> &'static str {
        match self {
            BranchError::Storage(_) => "STORAGE_ERROR",
            BranchError::UnknownTemplate { .. } => "UNKNOWN_TEMPLATE",
            BranchError::DuplicateInstance { .. } => "DUPLICATE_INSTANCE",
            BranchError::OrphanedInstances(_) => "ORPHANED_INSTANCES",
            BranchError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Check if re-running the pass unchanged could succeed
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            BranchError::Storage(StorageError::ConnectionFailed(_))
        )
    }
}

// Conversions from external errors

impl From<rusqlite::Error> for BranchError {
    fn from(e: rusqlite::Error) -> Self {
        BranchError::Storage(StorageError::Sqlite(e))
    }
}

impl From<StorageError> for BranchError {
    fn from(e: StorageError) -> Self {
        BranchError::Storage(e)
    }
}

impl From<std::io::Error> for BranchError {
    fn from(e: std::io::Error) -> Self {
        BranchError::Storage(StorageError::Io(e))
    }
}
