//! Shell configuration.
//!
//! Read once at startup from the environment:
//!
//! - `AIBROWSER_DATA_DIR`: where browser data lives (default: platform data dir)
//! - `AIBROWSER_STORE`: `json` (default) or `sqlite`
//! - `AIBROWSER_PRIVATE`: `1`/`true` starts a private session (no history)

use std::path::PathBuf;

use tracing::info;

use crate::platform;
use crate::store::{JsonFileStore, PersistenceStore, SqliteStore, StoreBackend};
use crate::types::errors::{ConfigError, StoreError};

pub const ENV_DATA_DIR: &str = "AIBROWSER_DATA_DIR";
pub const ENV_STORE: &str = "AIBROWSER_STORE";
pub const ENV_PRIVATE: &str = "AIBROWSER_PRIVATE";

#[derive(Debug, Clone, PartialEq)]
pub struct ShellConfig {
    pub data_dir: PathBuf,
    pub backend: StoreBackend,
    pub private_mode: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            data_dir: platform::get_data_dir(),
            backend: StoreBackend::Json,
            private_mode: false,
        }
    }
}

impl ShellConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|d| !d.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(name) = lookup(ENV_STORE).filter(|n| !n.trim().is_empty()) {
            config.backend =
                StoreBackend::parse(&name).ok_or_else(|| ConfigError::UnknownBackend(name.clone()))?;
        }

        if let Some(value) = lookup(ENV_PRIVATE) {
            config.private_mode = parse_flag(&value).ok_or_else(|| ConfigError::InvalidValue {
                key: ENV_PRIVATE.to_string(),
                value: value.clone(),
            })?;
        }

        Ok(config)
    }

    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(self.backend.file_name())
    }

    /// Opens the configured store backend.
    pub fn open_store(&self) -> Result<Box<dyn PersistenceStore>, StoreError> {
        let path = self.store_path();
        info!(backend = ?self.backend, path = %path.display(), "opening browser data store");
        match self.backend {
            StoreBackend::Json => Ok(Box::new(JsonFileStore::open(path))),
            StoreBackend::Sqlite => {
                std::fs::create_dir_all(&self.data_dir).map_err(|e| {
                    StoreError::Io(format!("Failed to create data directory: {}", e))
                })?;
                Ok(Box::new(SqliteStore::open(path)?))
            }
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
