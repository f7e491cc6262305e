use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex,
};

use crate::{
    domain::Ledger,
    errors::{LedgerError, Result},
};

use super::{parse_ledger, StorageBackend};

/// In-process backend that keeps the serialized blob in memory, the way a
/// browser keeps it under one storage key.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blob: Mutex<Option<String>>,
    fail_writes: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with a raw stored blob, which need not be valid JSON.
    pub fn with_blob(raw: impl Into<String>) -> Self {
        Self {
            blob: Mutex::new(Some(raw.into())),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Makes subsequent saves fail, to exercise write-failure paths.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn raw(&self) -> Option<String> {
        self.blob.lock().ok().and_then(|guard| guard.clone())
    }
}

impl StorageBackend for MemoryStorage {
    fn load(&self) -> Result<Option<Ledger>> {
        match self.raw() {
            Some(data) => parse_ledger(&data).map(Some),
            None => Ok(None),
        }
    }

    fn save(&self, ledger: &Ledger) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(LedgerError::Persistence("storage is not writable".into()));
        }
        let json = serde_json::to_string(ledger)?;
        let mut guard = self
            .blob
            .lock()
            .map_err(|_| LedgerError::Persistence("storage lock poisoned".into()))?;
        *guard = Some(json);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
