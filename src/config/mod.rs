pub mod schema;

pub use schema::OsintConfig;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Default home directory (~/.osint-dispatch).
pub fn default_home_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|d| d.home_dir().join(".osint-dispatch"))
        .unwrap_or_else(|| PathBuf::from(".osint-dispatch"))
}

/// Default config file location.
pub fn default_config_path() -> PathBuf {
    default_home_dir().join("config.toml")
}

/// Load config from the given path, or return defaults.
pub fn load_config(path: &Path) -> Result<OsintConfig> {
    if path.exists() {
        let contents = std::fs::read_to_string(path).context("Failed to read config file")?;
        let config: OsintConfig =
            toml::from_str(&contents).context("Failed to parse config (TOML)")?;
        Ok(config)
    } else {
        Ok(OsintConfig::default())
    }
}
