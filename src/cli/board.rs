//! kanbo board command: launch the terminal board UI.

use crate::error::Result;
use crate::ui;

use super::CliContext;

pub fn run(ctx: &CliContext) -> Result<()> {
    let config = ctx.load_config()?;
    let file = ctx.board_file(&config)?;
    let board = crate::board::Board::open(file, config.board.columns.clone());
    ui::board::run(board, config.board.default_priority)
}
