//! Command-line interface for kanbo
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand is implemented in its own submodule.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::board::Board;
use crate::config::Config;
use crate::error::Result;
use crate::storage;

mod board;
mod init;
mod task;

/// kanbo - Kanban task board
///
/// Tasks persist to a flat file and move between fixed workflow columns.
/// Use the subcommands for scripting, or `kanbo board` for the interactive
/// terminal view.
#[derive(Parser, Debug)]
#[command(name = "kanbo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file (defaults to the platform config directory)
    #[arg(long, global = true, env = "KANBO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to the board file (overrides config and the platform default)
    #[arg(long, global = true, env = "KANBO_FILE")]
    pub file: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default config file and an empty board file
    Init,

    /// Add a task to the board
    Add {
        /// Task title
        title: String,

        /// Task description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Target column (defaults to the first configured column)
        #[arg(long)]
        column: Option<String>,

        /// Due date, YYYY-MM-DD
        #[arg(long)]
        due: Option<String>,

        /// Priority: low, medium, high
        #[arg(long)]
        priority: Option<String>,
    },

    /// List tasks, grouped by column
    List {
        /// Only this column
        #[arg(long)]
        column: Option<String>,
    },

    /// Show a single task
    Show {
        /// Task id
        id: String,
    },

    /// Edit fields of a task
    Edit {
        /// Task id
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// New column
        #[arg(long)]
        column: Option<String>,

        /// New due date, YYYY-MM-DD
        #[arg(long)]
        due: Option<String>,

        /// Clear the due date
        #[arg(long, conflicts_with = "due")]
        no_due: bool,

        /// New priority: low, medium, high
        #[arg(long)]
        priority: Option<String>,
    },

    /// Move a task to another column
    Move {
        /// Task id
        id: String,

        /// Target column
        column: String,
    },

    /// Delete a task (no-op if the id is unknown)
    Delete {
        /// Task id
        id: String,
    },

    /// Print the configured column sequence
    Columns,

    /// Open the interactive terminal board
    Board,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let ctx = CliContext {
            config: self.config,
            file: self.file,
            json: self.json,
            quiet: self.quiet,
        };

        match self.command {
            Commands::Init => init::run(&ctx),
            Commands::Add {
                title,
                description,
                column,
                due,
                priority,
            } => task::add(
                &ctx,
                task::AddOptions {
                    title,
                    description,
                    column,
                    due,
                    priority,
                },
            ),
            Commands::List { column } => task::list(&ctx, task::ListOptions { column }),
            Commands::Show { id } => task::show(&ctx, task::ShowOptions { id }),
            Commands::Edit {
                id,
                title,
                description,
                column,
                due,
                no_due,
                priority,
            } => task::edit(
                &ctx,
                task::EditOptions {
                    id,
                    title,
                    description,
                    column,
                    due,
                    no_due,
                    priority,
                },
            ),
            Commands::Move { id, column } => task::move_task(&ctx, task::MoveOptions { id, column }),
            Commands::Delete { id } => task::delete(&ctx, task::DeleteOptions { id }),
            Commands::Columns => task::columns(&ctx),
            Commands::Board => board::run(&ctx),
        }
    }
}

/// Resolved global flags shared by every subcommand handler.
pub(crate) struct CliContext {
    pub config: Option<PathBuf>,
    pub file: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

impl CliContext {
    pub fn output(&self) -> crate::output::OutputOptions {
        crate::output::OutputOptions {
            json: self.json,
            quiet: self.quiet,
        }
    }

    /// Path of the config file: `--config` / `KANBO_CONFIG`, else platform default.
    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => storage::default_config_file(),
        }
    }

    pub fn load_config(&self) -> Result<Config> {
        Config::load(&self.config_path()?)
    }

    /// Path of the board file: `--file` / `KANBO_FILE`, else the config
    /// override, else the platform default.
    pub fn board_file(&self, config: &Config) -> Result<PathBuf> {
        if let Some(path) = &self.file {
            return Ok(path.clone());
        }
        if let Some(path) = &config.board.file {
            return Ok(path.clone());
        }
        storage::default_board_file()
    }

    /// Load config and open the board it points at.
    pub fn open_board(&self) -> Result<Board> {
        let config = self.load_config()?;
        let file = self.board_file(&config)?;
        Ok(Board::open(file, config.board.columns))
    }
}
