use std::path::PathBuf;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TallyError};
use crate::series::Granularity;

pub const CONFIG_DIR_ENV: &str = "TALLY_CONFIG_DIR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_data_file_string")]
    pub data_file: String,
    #[serde(default)]
    pub granularity: Granularity,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: default_data_file_string(),
            granularity: Granularity::default(),
        }
    }
}

fn config_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("tally")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

fn default_data_file() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Documents")
        .join("tally")
        .join("finance_data.csv")
}

fn default_data_file_string() -> String {
    default_data_file().to_string_lossy().to_string()
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    if !path.exists() {
        return Settings::default();
    }
    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            warn!("cannot read {}: {e}; using defaults", path.display());
            return Settings::default();
        }
    };
    parse_settings(&content).unwrap_or_else(|e| {
        warn!("ignoring {}: {e}", path.display());
        Settings::default()
    })
}

fn parse_settings(content: &str) -> Result<Settings> {
    serde_json::from_str(content).map_err(|e| TallyError::Settings(e.to_string()))
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| TallyError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    debug!("saved settings to {}", settings_path().display());
    Ok(())
}

pub fn get_data_file() -> PathBuf {
    PathBuf::from(&load_settings().data_file)
}

pub fn shellexpand_path(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    std::path::absolute(path)
        .unwrap_or_else(|_| PathBuf::from(path))
        .to_string_lossy()
        .to_string()
}
