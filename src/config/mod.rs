use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    currency::LocaleConfig,
    domain::TimeWindow,
    errors::{LedgerError, Result},
    utils::paths::{app_data_dir, config_file_in, ledger_file_in, tmp_path},
};

const DEFAULT_RECENT_LIMIT: usize = 6;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub currency: String,
    pub locale: LocaleConfig,
    /// How many entries the dashboard feed shows.
    pub recent_limit: usize,
    pub default_window: TimeWindow,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: "INR".into(),
            locale: LocaleConfig::default(),
            recent_limit: DEFAULT_RECENT_LIMIT,
            default_window: TimeWindow::All,
            ledger_file: None,
        }
    }
}

impl Config {
    /// Applies a `key=value` style setting coming from the CLI.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key.to_ascii_lowercase().as_str() {
            "currency" => self.currency = value.trim().to_uppercase(),
            "recent_limit" => {
                self.recent_limit = value.trim().parse().map_err(|_| {
                    LedgerError::validation(format!("`{value}` is not a valid count"))
                })?
            }
            "default_window" => self.default_window = value.parse()?,
            "ledger_file" => {
                let trimmed = value.trim();
                self.ledger_file = (!trimmed.is_empty()).then(|| PathBuf::from(trimmed));
            }
            other => {
                return Err(LedgerError::validation(format!(
                    "unknown setting `{other}`"
                )))
            }
        }
        Ok(())
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: config_file_in(&base),
            base,
        })
    }

    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        let mut file = File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.flush()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Where the ledger blob lives: the configured override, or the default file in the base dir.
    pub fn ledger_path(&self, config: &Config) -> PathBuf {
        match &config.ledger_file {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => self.base.join(path),
            None => ledger_file_in(&self.base),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.recent_limit, 6);
    }

    #[test]
    fn save_then_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let mut config = Config::default();
        config.set_value("currency", "usd").unwrap();
        config.set_value("default_window", "7days").unwrap();
        manager.save(&config).unwrap();
        let loaded = manager.load().unwrap();
        assert_eq!(loaded.currency, "USD");
        assert_eq!(loaded.default_window, TimeWindow::Last7Days);
    }

    #[test]
    fn relative_ledger_file_resolves_against_base() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let mut config = Config::default();
        assert_eq!(manager.ledger_path(&config), ledger_file_in(temp.path()));
        config.set_value("ledger_file", "alt.json").unwrap();
        assert_eq!(manager.ledger_path(&config), temp.path().join("alt.json"));
    }

    #[test]
    fn unknown_setting_is_rejected() {
        let mut config = Config::default();
        assert!(config.set_value("theme", "dark").unwrap_err().is_validation());
    }
}
