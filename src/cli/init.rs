//! kanbo init command implementation
//!
//! Writes a default config file and an empty board file. Both steps are
//! idempotent; existing files are left alone.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::{emit, Report};
use crate::storage::{self, BoardDocument};

use super::CliContext;

#[derive(serde::Serialize)]
struct InitOutcome {
    config: PathBuf,
    board: PathBuf,
    created_config: bool,
    created_board: bool,
}

pub fn run(ctx: &CliContext) -> Result<()> {
    let config_path = ctx.config_path()?;
    let created_config = ensure_config(&config_path)?;

    let config = Config::load(&config_path)?;
    let board_path = ctx.board_file(&config)?;
    let created_board = ensure_board(&board_path)?;

    let header = if created_config || created_board {
        "kanbo init: board initialized"
    } else {
        "kanbo init: nothing to do"
    };

    let mut created_items = Vec::new();
    if created_config {
        created_items.push("config.toml");
    }
    if created_board {
        created_items.push("board.json");
    }

    let mut report = Report::new(header);
    report
        .field("config", config_path.display().to_string())
        .field("board", board_path.display().to_string())
        .field(
            "created",
            if created_items.is_empty() {
                "none".to_string()
            } else {
                created_items.join(", ")
            },
        );

    let outcome = InitOutcome {
        config: config_path,
        board: board_path,
        created_config,
        created_board,
    };

    emit(ctx.output(), "init", &outcome, &report)
}

fn ensure_config(path: &Path) -> Result<bool> {
    if path.exists() {
        if !path.is_file() {
            return Err(Error::OperationFailed(format!(
                "config path exists but is not a file: {}",
                path.display()
            )));
        }
        return Ok(false);
    }

    storage::write_atomic(path, Config::default_toml()?.as_bytes())?;
    Ok(true)
}

fn ensure_board(path: &Path) -> Result<bool> {
    if path.exists() {
        if !path.is_file() {
            return Err(Error::OperationFailed(format!(
                "board path exists but is not a file: {}",
                path.display()
            )));
        }
        return Ok(false);
    }

    storage::write_json(path, &BoardDocument::empty())?;
    Ok(true)
}
