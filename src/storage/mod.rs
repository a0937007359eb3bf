//! Storage module
//!
//! The model database: forest and instance tables written by the format
//! readers, journal and scope tables written by the expansion pass.

pub mod sqlite;

// Re-export main storage types
pub use sqlite::{ScopeRow, SqliteConfig, SqliteStore, StoreStats};
