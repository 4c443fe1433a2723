#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use pocket_ledger::{
    config::ConfigManager,
    engine::FixedClock,
    storage::{JsonProfileStorage, StoragePaths},
    LedgerSession,
};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 20).expect("valid date")
}

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, d).expect("valid date")
}

/// Creates a unique directory that outlives the calling test.
pub fn test_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn storage_at(base: &Path) -> JsonProfileStorage {
    JsonProfileStorage::with_retention(StoragePaths::under(base), 3)
        .expect("create json storage backend")
}

pub fn open_session(base: &Path) -> LedgerSession {
    LedgerSession::open_with_clock(Box::new(storage_at(base)), Box::new(FixedClock(today())))
        .expect("open session")
}

/// Creates an isolated session and config manager backed by a unique directory.
pub fn setup_test_env() -> (LedgerSession, ConfigManager, PathBuf) {
    let base = test_dir();
    let session = open_session(&base);
    let config_manager =
        ConfigManager::with_base_dir(base.clone()).expect("create config manager for temp dir");
    (session, config_manager, base)
}
