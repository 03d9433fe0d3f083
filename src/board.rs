//! The board: kanbo's task store.
//!
//! A [`Board`] owns the in-memory task list, the configured column sequence,
//! and the backing file path. All mutation goes through it, and every
//! mutating operation rewrites the whole board file before returning, so the
//! disk never lags a completed call. There is no dirty tracking.
//!
//! # Load policy
//!
//! A backing file that is missing, unreadable, or malformed resets the board
//! to an empty task list. This is a deliberate fresh-start policy: corrupt or
//! missing input is treated identically to "no tasks yet". A file that exists
//! but fails to parse is logged at warn level, but the failure is never
//! surfaced as an error to the caller.
//!
//! # Save failures
//!
//! A failed save is returned to the caller as the failure of the mutating
//! operation. The in-memory list is left ahead of disk (no rollback); the
//! next successful mutation persists the full list again.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};
use tracing::warn;

use crate::error::{Error, Result};
use crate::storage::{self, BoardDocument};
use crate::task::{Priority, Task, TaskPatch};

/// Input for [`Board::add`]. Unset fields take the documented defaults:
/// first configured column, medium priority, no deadline.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub column: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<Priority>,
}

/// The task store backing one board file.
#[derive(Debug, Clone)]
pub struct Board {
    tasks: Vec<Task>,
    columns: Vec<String>,
    file: PathBuf,
}

impl Board {
    /// Create a board over `file` with the given column sequence, without
    /// touching the filesystem. Columns come from a validated [`crate::config::Config`].
    pub fn new(file: PathBuf, columns: Vec<String>) -> Self {
        Self {
            tasks: Vec::new(),
            columns,
            file,
        }
    }

    /// Create a board and load whatever the backing file holds.
    pub fn open(file: PathBuf, columns: Vec<String>) -> Self {
        let mut board = Self::new(file, columns);
        board.load();
        board
    }

    /// Reload the task list from the backing file (fresh-start on failure,
    /// see the module docs).
    pub fn load(&mut self) {
        if !self.file.exists() {
            self.tasks = Vec::new();
            return;
        }

        match storage::read_json::<BoardDocument>(&self.file) {
            Ok(document) => self.tasks = document.tasks,
            Err(err) => {
                warn!(
                    file = %self.file.display(),
                    error = %err,
                    "board file is unreadable or malformed; starting fresh"
                );
                self.tasks = Vec::new();
            }
        }
    }

    /// Persist the full task list to the backing file (atomic rewrite).
    pub fn save(&self) -> Result<()> {
        storage::write_json(&self.file, &BoardDocument::with_tasks(self.tasks.clone()))
    }

    /// Create a task, append it to the sequence, and persist.
    ///
    /// Rejects empty titles and unknown columns. The id is the decimal form
    /// of one past the highest numeric id present, so deleting tasks never
    /// frees an id for reuse.
    pub fn add(&mut self, new: NewTask) -> Result<Task> {
        if new.title.trim().is_empty() {
            return Err(Error::EmptyTitle);
        }

        let column = match new.column {
            Some(column) => {
                self.ensure_column(&column)?;
                column
            }
            None => self.first_column().to_string(),
        };

        let task = Task {
            id: self.next_id(),
            title: new.title,
            description: new.description,
            column,
            created: now_second_precision(),
            due_date: new.due_date,
            priority: new.priority.unwrap_or_default(),
        };

        self.tasks.push(task.clone());
        self.save()?;
        Ok(task)
    }

    /// Apply a partial update to the task with the given id.
    ///
    /// Returns `Ok(None)` when no task has that id; callers decide whether
    /// that is an error. `id` and `created` are not representable in
    /// [`TaskPatch`] and therefore never change.
    pub fn update(&mut self, id: &str, patch: TaskPatch) -> Result<Option<Task>> {
        let Some(index) = self.tasks.iter().position(|task| task.id == id) else {
            return Ok(None);
        };

        if let Some(title) = patch.title.as_deref() {
            if title.trim().is_empty() {
                return Err(Error::EmptyTitle);
            }
        }
        if let Some(column) = patch.column.as_deref() {
            self.ensure_column(column)?;
        }

        let task = &mut self.tasks[index];
        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(description) = patch.description {
            task.description = description;
        }
        if let Some(column) = patch.column {
            task.column = column;
        }
        if let Some(due_date) = patch.due_date {
            task.due_date = due_date;
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }

        let updated = task.clone();
        self.save()?;
        Ok(Some(updated))
    }

    /// Remove the task with the given id, if present. Unknown ids are a
    /// silent no-op; the board file is rewritten either way.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        self.tasks.retain(|task| task.id != id);
        self.save()
    }

    /// Move a task to another column. Equivalent to a column-only update.
    pub fn move_task(&mut self, id: &str, column: &str) -> Result<Option<Task>> {
        self.update(id, TaskPatch::move_to(column))
    }

    /// All tasks in the given column, in sequence order. Read-only.
    pub fn tasks_in_column(&self, column: &str) -> Vec<&Task> {
        self.tasks.iter().filter(|task| task.column == column).collect()
    }

    /// Point lookup by id.
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// The configured column sequence, in display order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Every task, in sequence order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Path of the backing file.
    pub fn file(&self) -> &Path {
        &self.file
    }

    fn first_column(&self) -> &str {
        // Config validation guarantees at least one column.
        self.columns.first().map(String::as_str).unwrap_or("Backlog")
    }

    fn ensure_column(&self, column: &str) -> Result<()> {
        if self.columns.iter().any(|candidate| candidate == column) {
            Ok(())
        } else {
            Err(Error::UnknownColumn(column.to_string()))
        }
    }

    fn next_id(&self) -> String {
        let highest = self
            .tasks
            .iter()
            .filter_map(|task| task.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        (highest + 1).to_string()
    }
}

fn now_second_precision() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn columns() -> Vec<String> {
        ["Backlog", "To Do", "In Progress", "Done"]
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    fn board_at(temp: &TempDir) -> Board {
        Board::open(temp.path().join("board.json"), columns())
    }

    fn titled(title: &str) -> NewTask {
        NewTask {
            title: title.to_string(),
            ..NewTask::default()
        }
    }

    #[test]
    fn add_assigns_id_defaults_and_creation_stamp() {
        let temp = TempDir::new().unwrap();
        let mut board = board_at(&temp);

        let before = now_second_precision();
        let task = board.add(titled("Buy milk")).unwrap();
        let after = now_second_precision();

        assert_eq!(task.id, "1");
        assert_eq!(task.column, "Backlog");
        assert_eq!(task.priority, Priority::Medium);
        assert!(task.due_date.is_none());
        assert!(task.created >= before && task.created <= after);
        assert_eq!(board.get("1"), Some(&task));
    }

    #[test]
    fn add_preserves_explicit_fields() {
        let temp = TempDir::new().unwrap();
        let mut board = board_at(&temp);

        let due = chrono::NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
        let task = board
            .add(NewTask {
                title: "Ship release".to_string(),
                description: "tag and publish".to_string(),
                column: Some("In Progress".to_string()),
                due_date: Some(due),
                priority: Some(Priority::High),
            })
            .unwrap();

        let found = board.get(&task.id).unwrap();
        assert_eq!(found.description, "tag and publish");
        assert_eq!(found.column, "In Progress");
        assert_eq!(found.due_date, Some(due));
        assert_eq!(found.priority, Priority::High);
    }

    #[test]
    fn add_rejects_blank_title() {
        let temp = TempDir::new().unwrap();
        let mut board = board_at(&temp);

        assert!(matches!(board.add(titled("")), Err(Error::EmptyTitle)));
        assert!(matches!(board.add(titled("   ")), Err(Error::EmptyTitle)));
        assert!(board.tasks().is_empty());
    }

    #[test]
    fn add_rejects_unknown_column() {
        let temp = TempDir::new().unwrap();
        let mut board = board_at(&temp);

        let result = board.add(NewTask {
            title: "Lost".to_string(),
            column: Some("Limbo".to_string()),
            ..NewTask::default()
        });
        assert!(matches!(result, Err(Error::UnknownColumn(_))));
    }

    #[test]
    fn missing_file_loads_as_empty() {
        let temp = TempDir::new().unwrap();
        let board = board_at(&temp);
        assert!(board.tasks().is_empty());
    }

    #[test]
    fn malformed_file_loads_as_empty_fresh_start() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("board.json");
        fs::write(&path, "this is not a board").unwrap();

        let mut board = Board::open(path.clone(), columns());
        assert!(board.tasks().is_empty());

        // The fresh board is fully usable and overwrites the corrupt file.
        board.add(titled("Recover")).unwrap();
        let reread = Board::open(path, columns());
        assert_eq!(reread.tasks().len(), 1);
    }

    #[test]
    fn save_then_fresh_load_round_trips() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("board.json");
        let mut board = Board::open(path.clone(), columns());

        board.add(titled("First")).unwrap();
        board
            .add(NewTask {
                title: "Second".to_string(),
                description: "with body".to_string(),
                column: Some("Done".to_string()),
                due_date: chrono::NaiveDate::from_ymd_opt(2026, 12, 24),
                priority: Some(Priority::Low),
            })
            .unwrap();
        board
            .update(
                "1",
                TaskPatch {
                    priority: Some(Priority::High),
                    ..TaskPatch::default()
                },
            )
            .unwrap();

        let reloaded = Board::open(path, columns());
        assert_eq!(reloaded.tasks(), board.tasks());
    }

    #[test]
    fn every_mutation_is_durable_before_returning() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("board.json");
        let mut board = Board::open(path.clone(), columns());

        board.add(titled("Persisted")).unwrap();

        let on_disk = Board::open(path, columns());
        assert_eq!(on_disk.tasks().len(), 1);
        assert_eq!(on_disk.tasks()[0].title, "Persisted");
    }

    #[test]
    fn tasks_in_column_is_ordered_and_idempotent() {
        let temp = TempDir::new().unwrap();
        let mut board = board_at(&temp);

        board.add(titled("a")).unwrap();
        board.add(titled("b")).unwrap();
        board.move_task("2", "Done").unwrap();
        board.add(titled("c")).unwrap();

        let backlog: Vec<&str> = board
            .tasks_in_column("Backlog")
            .iter()
            .map(|task| task.title.as_str())
            .collect();
        assert_eq!(backlog, vec!["a", "c"]);
        assert_eq!(
            board.tasks_in_column("Backlog"),
            board.tasks_in_column("Backlog")
        );
        assert!(board.tasks_in_column("In Progress").is_empty());
    }

    #[test]
    fn update_column_touches_nothing_else() {
        let temp = TempDir::new().unwrap();
        let mut board = board_at(&temp);

        let original = board.add(titled("Stable")).unwrap();
        let updated = board
            .update("1", TaskPatch::move_to("To Do"))
            .unwrap()
            .unwrap();

        assert_eq!(updated.column, "To Do");
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created, original.created);
        assert_eq!(updated.title, original.title);
        assert_eq!(updated.description, original.description);
        assert_eq!(updated.due_date, original.due_date);
        assert_eq!(updated.priority, original.priority);
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let temp = TempDir::new().unwrap();
        let mut board = board_at(&temp);
        assert!(board.update("9", TaskPatch::move_to("Done")).unwrap().is_none());
    }

    #[test]
    fn update_rejects_blank_title_and_unknown_column() {
        let temp = TempDir::new().unwrap();
        let mut board = board_at(&temp);
        board.add(titled("Valid")).unwrap();

        let blank = TaskPatch {
            title: Some("  ".to_string()),
            ..TaskPatch::default()
        };
        assert!(matches!(board.update("1", blank), Err(Error::EmptyTitle)));
        assert!(matches!(
            board.update("1", TaskPatch::move_to("Limbo")),
            Err(Error::UnknownColumn(_))
        ));
        assert_eq!(board.get("1").unwrap().title, "Valid");
    }

    #[test]
    fn update_can_clear_a_due_date() {
        let temp = TempDir::new().unwrap();
        let mut board = board_at(&temp);
        board
            .add(NewTask {
                title: "Dated".to_string(),
                due_date: chrono::NaiveDate::from_ymd_opt(2026, 10, 1),
                ..NewTask::default()
            })
            .unwrap();

        let cleared = board
            .update(
                "1",
                TaskPatch {
                    due_date: Some(None),
                    ..TaskPatch::default()
                },
            )
            .unwrap()
            .unwrap();
        assert!(cleared.due_date.is_none());

        // No due_date in the patch leaves an existing one alone.
        let unchanged = board
            .update("1", TaskPatch::move_to("Done"))
            .unwrap()
            .unwrap();
        assert!(unchanged.due_date.is_none());
    }

    #[test]
    fn delete_then_get_is_none_and_unknown_delete_is_noop() {
        let temp = TempDir::new().unwrap();
        let mut board = board_at(&temp);
        board.add(titled("Doomed")).unwrap();
        board.add(titled("Survivor")).unwrap();

        board.delete("1").unwrap();
        assert!(board.get("1").is_none());
        assert_eq!(board.tasks().len(), 1);

        board.delete("404").unwrap();
        assert_eq!(board.tasks().len(), 1);
        assert_eq!(board.tasks()[0].title, "Survivor");
    }

    #[test]
    fn ids_do_not_collide_after_delete_then_add() {
        let temp = TempDir::new().unwrap();
        let mut board = board_at(&temp);

        board.add(titled("one")).unwrap();
        board.add(titled("two")).unwrap();
        board.delete("1").unwrap();
        let third = board.add(titled("three")).unwrap();

        assert_eq!(third.id, "3");
        let mut ids: Vec<&str> = board.tasks().iter().map(|task| task.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), board.tasks().len());
    }

    #[test]
    fn move_task_validates_the_target_column() {
        let temp = TempDir::new().unwrap();
        let mut board = board_at(&temp);
        board.add(titled("Mover")).unwrap();

        let moved = board.move_task("1", "In Progress").unwrap().unwrap();
        assert_eq!(moved.column, "In Progress");

        assert!(matches!(
            board.move_task("1", "Nowhere"),
            Err(Error::UnknownColumn(_))
        ));
        assert!(board.move_task("404", "Done").unwrap().is_none());
    }
}
