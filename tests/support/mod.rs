#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// One isolated board per test: its own tempdir, config, and board file,
/// wired into the binary through the KANBO_* environment fallbacks.
pub struct TestBoard {
    dir: TempDir,
}

impl TestBoard {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create tempdir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    pub fn board_path(&self) -> PathBuf {
        self.dir.path().join("board.json")
    }

    pub fn write_config(&self, contents: &str) -> std::io::Result<()> {
        fs::write(self.config_path(), contents)
    }

    pub fn write_board(&self, contents: &str) -> std::io::Result<()> {
        fs::write(self.board_path(), contents)
    }

    pub fn read_board_json(&self) -> serde_json::Value {
        let raw = fs::read_to_string(self.board_path()).expect("board file");
        serde_json::from_str(&raw).expect("board file is valid JSON")
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("kanbo").expect("binary");
        cmd.env("KANBO_CONFIG", self.config_path());
        cmd.env("KANBO_FILE", self.board_path());
        cmd
    }
}
