//! Storage layer for kanbo
//!
//! Owns the on-disk locations and the file I/O primitives:
//! - `config.toml` in the platform config directory
//! - `board.json` in the platform data directory
//!
//! Both locations can be overridden per invocation; the board file is also
//! the constructor argument of [`crate::board::Board`], so tests and the CLI
//! point it anywhere. Writes go through `write_atomic` (temp file + rename)
//! so a reader never observes a partial board file.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::task::Task;

/// Name of the board file inside the data directory
pub const BOARD_FILE: &str = "board.json";

/// Name of the config file inside the config directory
pub const CONFIG_FILE: &str = "config.toml";

const BOARD_SCHEMA_VERSION: &str = "kanbo.board.v1";

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "kanbo").ok_or_else(|| {
        Error::OperationFailed("could not determine a home directory for kanbo".to_string())
    })
}

/// Default board file location: `<data dir>/board.json`
pub fn default_board_file() -> Result<PathBuf> {
    Ok(project_dirs()?.data_dir().join(BOARD_FILE))
}

/// Default config file location: `<config dir>/config.toml`
pub fn default_config_file() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join(CONFIG_FILE))
}

/// Write data atomically using temp file + rename
///
/// The board file is rewritten in full on every mutation; this keeps a
/// subsequent load from ever seeing a half-written document.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    // Create temp file in same directory (for atomic rename)
    let temp_path = path.with_extension("tmp");

    let mut file = File::create(&temp_path)?;
    file.write_all(data)?;
    file.sync_all()?;

    // Atomic rename
    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Write JSON data atomically (write to temp, then rename)
pub fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    write_atomic(path, json.as_bytes())
}

/// Read JSON data from a file
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    let data: T = serde_json::from_str(&content)?;
    Ok(data)
}

/// On-disk board document: one root container holding the task records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardDocument {
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl BoardDocument {
    pub fn empty() -> Self {
        Self {
            schema_version: BOARD_SCHEMA_VERSION.to_string(),
            tasks: Vec::new(),
        }
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            schema_version: BOARD_SCHEMA_VERSION.to_string(),
            tasks,
        }
    }
}

fn default_schema_version() -> String {
    BOARD_SCHEMA_VERSION.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn atomic_write_leaves_no_temp_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("board.json");

        write_atomic(&path, b"{}").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn json_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("doc.json");

        #[derive(Serialize, Deserialize, PartialEq, Debug)]
        struct Probe {
            name: String,
            value: i32,
        }

        let data = Probe {
            name: "test".to_string(),
            value: 42,
        };

        write_json(&path, &data).unwrap();
        let back: Probe = read_json(&path).unwrap();
        assert_eq!(data, back);
    }

    #[test]
    fn board_document_tolerates_missing_fields() {
        let doc: BoardDocument = serde_json::from_str("{}").unwrap();
        assert_eq!(doc.schema_version, BOARD_SCHEMA_VERSION);
        assert!(doc.tasks.is_empty());
    }

    #[test]
    fn empty_document_carries_schema_version() {
        let doc = BoardDocument::empty();
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["schema_version"], BOARD_SCHEMA_VERSION);
    }
}
