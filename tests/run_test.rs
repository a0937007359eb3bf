//! Running the pass from configuration against databases on disk

mod common;

use common::*;
use flint_branch::error::StorageError;
use flint_branch::{BranchConfig, BranchError, SqliteStore};

fn config_for(path: &std::path::Path, atomic: bool) -> BranchConfig {
    BranchConfig {
        database_path: path.to_path_buf(),
        model_path: "heart.phml".into(),
        atomic,
        ..Default::default()
    }
}

#[test]
fn test_run_expands_model_on_disk() {
    let (_dir, path, store) = test_store_on_disk();
    ForestBuilder::new(&store)
        .plain(0x1, 0)
        .template(0xd1, 1)
        .template(0xd2, 2)
        .template(0x7, 0)
        .instance(0x7, 0x71, Some("left"))
        .instance(0x7, 0x72, Some("right"));
    drop(store);

    let stats = flint_branch::run(&config_for(&path, false)).expect("run failed");

    assert_eq!(stats.rows_scanned, 4);
    assert_eq!(stats.descendants_cloned, 4);
    assert_eq!(stats.scopes_written, 7);

    let store = SqliteStore::open(&path).unwrap();
    let scopes = store.scopes().unwrap();
    assert_eq!(scopes.len(), 7);
    assert_unique_identities(&scopes);

    let counts = store.stats().unwrap();
    assert_eq!(counts.scope_count, 7);
    assert_eq!(counts.journal_count, stats.journal_entries);
}

#[test]
fn test_run_atomic_on_disk_leaves_no_rows_on_failure() {
    let (_dir, path, store) = test_store_on_disk();
    ForestBuilder::new(&store)
        .template(0x7, 0)
        .instance(0x7, 0x71, None)
        .instance(0x8, 0x81, None);
    drop(store);

    let err = flint_branch::run(&config_for(&path, true)).unwrap_err();
    assert!(matches!(err, BranchError::OrphanedInstances(_)));

    let store = SqliteStore::open(&path).unwrap();
    assert_eq!(store.stats().unwrap().journal_count, 0);
}

#[test]
fn test_run_requires_existing_database() {
    let dir = tempfile::tempdir().unwrap();
    let err = flint_branch::run(&config_for(&dir.path().join("none.db"), false)).unwrap_err();
    assert!(matches!(
        err,
        BranchError::Storage(StorageError::ConnectionFailed(_))
    ));
}

#[test]
fn test_run_requires_initialized_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.db");
    drop(SqliteStore::new(&path).unwrap());

    let err = flint_branch::run(&config_for(&path, false)).unwrap_err();
    assert!(matches!(
        err,
        BranchError::Storage(StorageError::NotInitialized)
    ));
}

#[test]
fn test_rerun_on_expanded_database_fails_on_scope_keys() {
    // The pass runs once per compilation; a second run collides with the
    // scopes written by the first.
    let (_dir, path, store) = test_store_on_disk();
    ForestBuilder::new(&store).plain(0x1, 0);
    drop(store);

    flint_branch::run(&config_for(&path, false)).unwrap();
    let err = flint_branch::run(&config_for(&path, false)).unwrap_err();
    assert!(matches!(
        err,
        BranchError::Storage(StorageError::Step {
            statement: "scopes",
            ..
        })
    ));
}
