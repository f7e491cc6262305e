#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use aether_ledger::{
    core::{FixedClock, LedgerManager},
    domain::{window::DAY_MILLIS, DisplayStamp, Transaction, TransactionKind},
    storage::{JsonStorage, MemoryStorage},
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// 2026-01-01T00:00:00Z, the frozen "now" shared by the suites.
pub const NOW: i64 = 1_767_225_600_000;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// A fresh directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub struct MemoryHarness {
    pub manager: LedgerManager,
    pub storage: Arc<MemoryStorage>,
    pub clock: Arc<FixedClock>,
}

/// Manager over in-memory storage with a frozen clock at [`NOW`].
pub fn memory_harness() -> MemoryHarness {
    memory_harness_with(MemoryStorage::new())
}

pub fn memory_harness_with(storage: MemoryStorage) -> MemoryHarness {
    let storage = Arc::new(storage);
    let clock = Arc::new(FixedClock::at_millis(NOW));
    let manager = LedgerManager::open(Box::new(storage.clone()), clock.clone());
    MemoryHarness {
        manager,
        storage,
        clock,
    }
}

/// Manager persisting to `finance_data.json` inside `base`.
pub fn json_manager(base: &Path) -> LedgerManager {
    LedgerManager::open(
        Box::new(JsonStorage::in_dir(base)),
        Arc::new(FixedClock::at_millis(NOW)),
    )
}

/// A transaction aged `age_days` before [`NOW`].
pub fn aged_txn(id: i64, age_days: i64, kind: TransactionKind, amount: f64, category: &str) -> Transaction {
    Transaction::new(
        id,
        NOW - age_days * DAY_MILLIS,
        DisplayStamp {
            date: format!("{age_days} days ago"),
            time: "12:00 PM".into(),
        },
        "entry",
        amount,
        kind,
        category,
    )
    .expect("valid transaction")
}
