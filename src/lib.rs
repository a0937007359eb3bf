//! flint-branch library exports
//!
//! Expands module templates of a compiled model into concrete, uniquely
//! identified scopes, recording the provenance of every identifier.

pub mod branch;
pub mod config;
pub mod error;
pub mod storage;
pub mod traits;

// Re-exports
pub use branch::{BranchStats, Expansion, InstanceIndex, expand};
pub use config::BranchConfig;
pub use error::{BranchError, BranchResult};
pub use storage::SqliteStore;
pub use traits::{IdentitySource, ModelIdentities, SequentialIdentities};

/// Open the configured model database and run the expansion pass on it
pub fn run(config: &BranchConfig) -> BranchResult<BranchStats> {
    let store = SqliteStore::open(&config.database_path)?;
    if !store.is_initialized() {
        return Err(error::StorageError::NotInitialized.into());
    }

    let ids = ModelIdentities::for_model(&config.model_path);
    tracing::info!(
        database = %config.database_path.display(),
        model = %config.model_path.display(),
        atomic = config.atomic,
        "expanding module templates"
    );
    if config.atomic {
        store.branch_atomic(ids)
    } else {
        store.branch(ids)
    }
}
