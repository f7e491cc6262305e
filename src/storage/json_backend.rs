use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    domain::Ledger,
    errors::Result,
    utils::paths::{app_data_dir, ledger_file_in, tmp_path},
};

use super::{parse_ledger, StorageBackend};

/// Stores the ledger as one pretty-printed JSON file, rewritten atomically.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage rooted at `base`, using the standard ledger file name.
    pub fn in_dir(base: &Path) -> Self {
        Self::new(ledger_file_in(base))
    }

    pub fn new_default() -> Self {
        Self::in_dir(&app_data_dir())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for JsonStorage {
    fn load(&self) -> Result<Option<Ledger>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no stored ledger");
            return Ok(None);
        }
        load_ledger_from_path(&self.path).map(Some)
    }

    fn save(&self, ledger: &Ledger) -> Result<()> {
        save_ledger_to_path(ledger, &self.path)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Writes `ledger` to `path` by staging to a sibling temp file and renaming over the target.
pub fn save_ledger_to_path(ledger: &Ledger, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(ledger)?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub fn load_ledger_from_path(path: &Path) -> Result<Ledger> {
    let data = fs::read_to_string(path)?;
    parse_ledger(&data)
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
