use dirs::home_dir;
use std::{
    env,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".aether_ledger";
const LEDGER_FILE: &str = "finance_data.json";
const CONFIG_FILE: &str = "config.json";
const HOME_ENV: &str = "AETHER_LEDGER_HOME";

/// Returns the application data directory, defaulting to `~/.aether_ledger`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Path of the persisted ledger blob inside `base`.
pub fn ledger_file_in(base: &Path) -> PathBuf {
    base.join(LEDGER_FILE)
}

pub fn config_file_in(base: &Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

/// Staging path used for atomic writes: `ledger.json` -> `ledger.json.tmp`.
pub fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.tmp"),
        None => "tmp".to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tmp_path_appends_suffix_to_existing_extension() {
        let tmp = tmp_path(Path::new("/data/finance_data.json"));
        assert_eq!(tmp, PathBuf::from("/data/finance_data.json.tmp"));
    }

    #[test]
    fn tmp_path_handles_missing_extension() {
        let tmp = tmp_path(Path::new("/data/ledger"));
        assert_eq!(tmp, PathBuf::from("/data/ledger.tmp"));
    }
}
