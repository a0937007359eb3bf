//! Test fixtures: model databases and forest builders

use std::collections::HashSet;
use std::path::PathBuf;

use flint_branch::SqliteStore;
use tempfile::TempDir;
use uuid::Uuid;

/// Base of identities minted by `SequentialIdentities` in tests
pub const MINT_BASE: u128 = 0xff00;

/// Shorthand for a readable test identity
pub fn id(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

/// Create an initialized in-memory model database
pub fn test_store() -> SqliteStore {
    let store = SqliteStore::in_memory().expect("Failed to create in-memory store");
    store.initialize().expect("Failed to initialize store");
    store
}

/// Create an initialized model database on disk
pub fn test_store_on_disk() -> (TempDir, PathBuf, SqliteStore) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("model.db");
    let store = SqliteStore::new(&path).expect("Failed to create store");
    store.initialize().expect("Failed to initialize store");
    (dir, path, store)
}

/// Writes forest rows, module metadata and joins the way a format reader does
pub struct ForestBuilder<'a> {
    store: &'a SqliteStore,
    known: HashSet<Uuid>,
}

impl<'a> ForestBuilder<'a> {
    pub fn new(store: &'a SqliteStore) -> Self {
        Self {
            store,
            known: HashSet::new(),
        }
    }

    fn row(&mut self, n: u128, depth: u32, state: Option<&str>) -> &mut Self {
        let module = id(n);
        if self.known.insert(module) {
            self.store
                .insert_module_state(module, state)
                .expect("Failed to insert module");
        }
        self.store
            .append_tree_row(module, depth)
            .expect("Failed to append tree row");
        self
    }

    /// Append a non-template row
    pub fn plain(&mut self, n: u128, depth: u32) -> &mut Self {
        self.row(n, depth, None)
    }

    /// Append a template row
    pub fn template(&mut self, n: u128, depth: u32) -> &mut Self {
        self.row(n, depth, Some("true"))
    }

    /// Append a row with an arbitrary template marker
    pub fn marked(&mut self, n: u128, depth: u32, marker: &str) -> &mut Self {
        self.row(n, depth, Some(marker))
    }

    /// Append a forest row whose module has no metadata at all
    pub fn bare(&mut self, n: u128, depth: u32) -> &mut Self {
        self.store
            .append_tree_row(id(n), depth)
            .expect("Failed to append tree row");
        self
    }

    /// Add an instance of template `template`
    pub fn instance(&mut self, template: u128, instance: u128, label: Option<&str>) -> &mut Self {
        self.store
            .insert_join(Some(id(template)), id(instance), label)
            .expect("Failed to insert join");
        self
    }

    /// Add an instance whose template could not be resolved
    pub fn dangling(&mut self, instance: u128) -> &mut Self {
        self.store
            .insert_join(None, id(instance), None)
            .expect("Failed to insert join");
        self
    }
}
