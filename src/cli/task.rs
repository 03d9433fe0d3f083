//! kanbo task command implementations.

use serde::Serialize;

use crate::board::{Board, NewTask};
use crate::error::{Error, Result};
use crate::output::{emit, OutputOptions, Report};
use crate::task::{parse_due_date, Task, TaskPatch};

use super::CliContext;

pub struct AddOptions {
    pub title: String,
    pub description: String,
    pub column: Option<String>,
    pub due: Option<String>,
    pub priority: Option<String>,
}

pub struct ListOptions {
    pub column: Option<String>,
}

pub struct ShowOptions {
    pub id: String,
}

pub struct EditOptions {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub column: Option<String>,
    pub due: Option<String>,
    pub no_due: bool,
    pub priority: Option<String>,
}

pub struct MoveOptions {
    pub id: String,
    pub column: String,
}

pub struct DeleteOptions {
    pub id: String,
}

#[derive(Serialize)]
struct ColumnListing {
    column: String,
    tasks: Vec<Task>,
}

#[derive(Serialize)]
struct DeleteOutcome {
    id: String,
    deleted: bool,
}

pub fn add(ctx: &CliContext, options: AddOptions) -> Result<()> {
    let config = ctx.load_config()?;
    let file = ctx.board_file(&config)?;
    let default_priority = config.board.default_priority;
    let mut board = Board::open(file, config.board.columns);

    let due_date = options.due.as_deref().map(parse_due_date).transpose()?;
    let priority = options
        .priority
        .as_deref()
        .map(str::parse)
        .transpose()?
        .or(Some(default_priority));

    let task = board.add(NewTask {
        title: options.title,
        description: options.description,
        column: options.column,
        due_date,
        priority,
    })?;

    let mut report = Report::new(format!("Created task {}", task.id));
    report
        .field("title", &task.title)
        .field("column", &task.column)
        .field("priority", task.priority.as_str());
    if let Some(due) = task.due_date {
        report.field("due", due.to_string());
    }

    emit(ctx.output(), "add", &task, &report)
}

pub fn list(ctx: &CliContext, options: ListOptions) -> Result<()> {
    let board = ctx.open_board()?;

    let selected: Vec<String> = match options.column {
        Some(column) => {
            ensure_known_column(&board, &column)?;
            vec![column]
        }
        None => board.columns().to_vec(),
    };

    let listings: Vec<ColumnListing> = selected
        .iter()
        .map(|column| ColumnListing {
            column: column.clone(),
            tasks: board
                .tasks_in_column(column)
                .into_iter()
                .cloned()
                .collect(),
        })
        .collect();

    let total: usize = listings.iter().map(|listing| listing.tasks.len()).sum();
    let mut report = Report::new(format!("Tasks: {total}"));
    for listing in &listings {
        report.line(format!("{} ({})", listing.column, listing.tasks.len()));
        for task in &listing.tasks {
            report.line(format!("  {}", task_line(task)));
        }
    }

    emit(ctx.output(), "list", &listings, &report)
}

pub fn show(ctx: &CliContext, options: ShowOptions) -> Result<()> {
    let board = ctx.open_board()?;
    let task = board
        .get(&options.id)
        .ok_or_else(|| Error::TaskNotFound(options.id.clone()))?;

    let mut report = Report::new(format!("Task {}: {}", task.id, task.title));
    report
        .field("column", &task.column)
        .field("priority", task.priority.as_str())
        .field("created", task.created.format("%Y-%m-%d %H:%M:%S").to_string())
        .field(
            "due",
            task.due_date
                .map(|due| due.to_string())
                .unwrap_or_else(|| "none".to_string()),
        );
    if !task.description.is_empty() {
        report.line(task.description.clone());
    }

    emit(ctx.output(), "show", task, &report)
}

pub fn edit(ctx: &CliContext, options: EditOptions) -> Result<()> {
    let mut board = ctx.open_board()?;

    let due_date = if options.no_due {
        Some(None)
    } else {
        options
            .due
            .as_deref()
            .map(parse_due_date)
            .transpose()?
            .map(Some)
    };

    let patch = TaskPatch {
        title: options.title,
        description: options.description,
        column: options.column,
        due_date,
        priority: options.priority.as_deref().map(str::parse).transpose()?,
    };

    if patch.is_empty() {
        return Err(Error::InvalidArgument(
            "nothing to update; pass at least one field flag".to_string(),
        ));
    }

    let task = board
        .update(&options.id, patch)?
        .ok_or_else(|| Error::TaskNotFound(options.id.clone()))?;

    let mut report = Report::new(format!("Updated task {}", task.id));
    report
        .field("title", &task.title)
        .field("column", &task.column)
        .field("priority", task.priority.as_str());

    emit(ctx.output(), "edit", &task, &report)
}

pub fn move_task(ctx: &CliContext, options: MoveOptions) -> Result<()> {
    let mut board = ctx.open_board()?;

    let task = board
        .move_task(&options.id, &options.column)?
        .ok_or_else(|| Error::TaskNotFound(options.id.clone()))?;

    let mut report = Report::new(format!("Moved task {} to {}", task.id, task.column));
    report.field("title", &task.title);

    emit(ctx.output(), "move", &task, &report)
}

pub fn delete(ctx: &CliContext, options: DeleteOptions) -> Result<()> {
    let mut board = ctx.open_board()?;

    let existing = board.get(&options.id).map(|task| task.title.clone());
    board.delete(&options.id)?;

    let outcome = DeleteOutcome {
        id: options.id.clone(),
        deleted: existing.is_some(),
    };

    let mut report = match &existing {
        Some(title) => {
            let mut report = Report::new(format!("Deleted task {}", options.id));
            report.field("title", title);
            report
        }
        None => Report::new(format!("Task {} not on the board", options.id)),
    };
    if existing.is_none() {
        report.warning("nothing to delete");
    }

    emit(ctx.output(), "delete", &outcome, &report)
}

pub fn columns(ctx: &CliContext) -> Result<()> {
    let config = ctx.load_config()?;
    let columns = config.board.columns;

    let mut report = Report::new(format!("Columns: {}", columns.len()));
    for column in &columns {
        report.line(column);
    }

    emit(ctx.output(), "columns", &columns, &report)
}

fn ensure_known_column(board: &Board, column: &str) -> Result<()> {
    if board.columns().iter().any(|candidate| candidate == column) {
        Ok(())
    } else {
        Err(Error::UnknownColumn(column.to_string()))
    }
}

fn task_line(task: &Task) -> String {
    let mut line = format!("#{} {} [{}]", task.id, task.title, task.priority);
    if let Some(due) = task.due_date {
        line.push_str(&format!(" due {due}"));
    }
    line
}
