//! Configuration loading and management
//!
//! Handles parsing of `config.toml`. A missing file means defaults; a file
//! that exists but does not parse or validate is a user error, never a
//! silent fallback.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::task::Priority;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Board configuration
    #[serde(default)]
    pub board: BoardConfig,
}

/// Board-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Workflow columns, in display order
    #[serde(default = "default_columns")]
    pub columns: Vec<String>,

    /// Board file override (defaults to the platform data directory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,

    /// Priority assigned when a new task does not specify one
    #[serde(default)]
    pub default_priority: Priority,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            file: None,
            default_priority: Priority::default(),
        }
    }
}

fn default_columns() -> Vec<String> {
    ["Backlog", "To Do", "In Progress", "Done"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

impl Config {
    /// Load configuration from the given path.
    ///
    /// A missing file yields the defaults. Anything else that fails (read,
    /// parse, validation) is surfaced to the caller.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate column names: at least one, none blank, no duplicates.
    pub fn validate(&self) -> Result<()> {
        if self.board.columns.is_empty() {
            return Err(Error::InvalidConfig(
                "board.columns must list at least one column".to_string(),
            ));
        }

        let mut seen = std::collections::HashSet::new();
        for column in &self.board.columns {
            if column.trim().is_empty() {
                return Err(Error::InvalidConfig(
                    "board.columns must not contain blank names".to_string(),
                ));
            }
            if !seen.insert(column.as_str()) {
                return Err(Error::InvalidConfig(format!(
                    "duplicate column name: {column}"
                )));
            }
        }

        Ok(())
    }

    /// Default configuration rendered as TOML, used by `kanbo init`.
    pub fn default_toml() -> Result<String> {
        Ok(toml::to_string_pretty(&Config::default())?)
    }
}
