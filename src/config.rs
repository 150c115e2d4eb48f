use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{db::Database, utils::logging::init_logging};

const DB_PATH_ENV: &str = "BOOKMARK_FOLDERS_DB";
const LOG_FILTER_ENV: &str = "BOOKMARK_FOLDERS_LOG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub database_path: PathBuf,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("bookmark-folders.db"),
            log_filter: "info".into(),
        }
    }
}

impl Config {
    /// Reads a JSON config file. A missing file yields the defaults; a file
    /// that exists but does not parse is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Defaults overridden by `BOOKMARK_FOLDERS_DB` and `BOOKMARK_FOLDERS_LOG`.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    pub fn with_env_overrides(mut self) -> Self {
        if let Some(path) = std::env::var_os(DB_PATH_ENV) {
            self.database_path = PathBuf::from(path);
        }
        if let Ok(filter) = std::env::var(LOG_FILTER_ENV) {
            if !filter.trim().is_empty() {
                self.log_filter = filter;
            }
        }
        self
    }

    pub fn init_logging(&self) {
        init_logging(&self.log_filter);
    }

    pub fn open_database(&self) -> Result<Database> {
        Database::new(self.database_path.clone())
    }
}
