// File: src/storage/sqlite/mod.rs

mod config;
mod convert;
mod forest;
mod joins;
mod journal;
mod pass;
mod schema;
mod scopes;
mod store;

// Public exports
pub use config::{SqliteConfig, StoreStats};
pub use forest::{FOREST_SQL, read_forest, scan_forest};
pub use joins::{load_instance_index, read_instances};
pub use journal::{JournalWriter, read_journal};
pub use pass::run_pass;
pub use schema::{SCHEMA_VERSION, create_tables, schema_version};
pub use scopes::{ScopeRow, ScopeWriter, read_scopes};
pub use store::SqliteStore;
