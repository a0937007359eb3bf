//! Pass configuration

use std::path::PathBuf;

use crate::error::{BranchError, BranchResult};

/// Configuration of one run of the expansion pass
#[derive(Debug, Clone)]
pub struct BranchConfig {
    /// Model database holding the module forest
    pub database_path: PathBuf,

    /// Model file the database was compiled from; scopes minted identifiers
    pub model_path: PathBuf,

    pub log_level: String,

    /// Run the whole pass in one transaction
    pub atomic: bool,
}

impl Default for BranchConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("./model.db"),
            model_path: PathBuf::from("."),
            log_level: "info".to_string(),
            atomic: false,
        }
    }
}

impl BranchConfig {
    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let database_path = std::env::var("FLINT_DATABASE_PATH")
            .ok()
            .map(PathBuf::from)
            .unwrap_or(defaults.database_path);

        let model_path = std::env::var("FLINT_MODEL_PATH")
            .ok()
            .map(PathBuf::from)
            .unwrap_or(defaults.model_path);

        let log_level = std::env::var("FLINT_LOG_LEVEL").unwrap_or(defaults.log_level);

        let atomic = std::env::var("FLINT_ATOMIC")
            .ok()
            .map(|s| s == "true" || s == "1")
            .unwrap_or(defaults.atomic);

        Self {
            database_path,
            model_path,
            log_level,
            atomic,
        }
    }

    /// Reject configurations the pass cannot run with
    pub fn validate(&self) -> BranchResult<()> {
        if self.database_path.as_os_str().is_empty() {
            return Err(BranchError::Config("database path is empty".into()));
        }
        if self.log_level.trim().is_empty() {
            return Err(BranchError::Config("log level is empty".into()));
        }
        Ok(())
    }
}
