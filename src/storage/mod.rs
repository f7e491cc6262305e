pub mod json_backend;
pub mod memory;

use std::sync::Arc;

use crate::{domain::Ledger, errors::Result};

/// Abstraction over the single durable slot that holds the ledger blob.
pub trait StorageBackend: Send + Sync {
    /// Returns `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> Result<Option<Ledger>>;
    /// Replaces the stored blob with `ledger` in full.
    fn save(&self, ledger: &Ledger) -> Result<()>;
    /// Human-readable description of where the blob lives.
    fn location(&self) -> String;
}

/// Lets callers keep a handle on a backend after handing it to a manager.
impl<T: StorageBackend + ?Sized> StorageBackend for Arc<T> {
    fn load(&self) -> Result<Option<Ledger>> {
        (**self).load()
    }

    fn save(&self, ledger: &Ledger) -> Result<()> {
        (**self).save(ledger)
    }

    fn location(&self) -> String {
        (**self).location()
    }
}

pub use json_backend::JsonStorage;
pub use memory::MemoryStorage;

pub(crate) fn parse_ledger(data: &str) -> Result<Ledger> {
    let ledger: Ledger = serde_json::from_str(data)?;
    if ledger.schema_version > crate::domain::CURRENT_SCHEMA_VERSION {
        return Err(crate::errors::LedgerError::Persistence(format!(
            "ledger schema v{} is newer than supported v{}",
            ledger.schema_version,
            crate::domain::CURRENT_SCHEMA_VERSION
        )));
    }
    Ok(ledger)
}
