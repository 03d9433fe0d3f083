//! Event loop for the interactive board.
//!
//! The view is a thin binding over [`Board`]: every mutation goes through a
//! board operation and is followed by a full re-query of every column.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::board::{Board, NewTask};
use crate::error::Result;
use crate::task::{Priority, Task, TaskPatch};

use super::form::{FormAction, TaskForm};
use super::model::{self, Selection};
use super::view;

const EVENT_POLL_MS: u64 = 120;

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatusKind {
    Error,
    Info,
}

pub(crate) struct DeleteConfirmState {
    pub(crate) task_id: String,
    pub(crate) title: String,
}

pub struct AppState {
    board: Board,
    default_priority: Priority,
    pub(crate) columns: Vec<Vec<Task>>,
    pub(crate) selection: Selection,
    pub(crate) form: Option<TaskForm>,
    pub(crate) delete_confirm: Option<DeleteConfirmState>,
    pub(crate) status: Option<(StatusKind, String)>,
    pub(crate) show_help: bool,
    should_quit: bool,
}

impl AppState {
    fn new(board: Board, default_priority: Priority) -> Self {
        let mut app = Self {
            board,
            default_priority,
            columns: Vec::new(),
            selection: Selection::default(),
            form: None,
            delete_confirm: None,
            status: None,
            show_help: false,
            should_quit: false,
        };
        app.refresh();
        app
    }

    pub(crate) fn column_names(&self) -> &[String] {
        self.board.columns()
    }

    /// Re-query every column and keep the cursor inside the grid.
    fn refresh(&mut self) {
        self.columns = model::snapshot(&self.board);
        let counts = self.counts();
        self.selection.clamp(&counts);
    }

    fn counts(&self) -> Vec<usize> {
        self.columns.iter().map(Vec::len).collect()
    }

    fn selected_task(&self) -> Option<&Task> {
        model::selected_task(&self.columns, self.selection)
    }

    fn set_status(&mut self, kind: StatusKind, message: impl Into<String>) {
        self.status = Some((kind, message.into()));
    }

    fn handle_key(&mut self, key: KeyEvent) {
        self.status = None;

        if self.show_help {
            self.show_help = false;
            return;
        }

        if self.delete_confirm.is_some() {
            self.handle_delete_confirm_key(key);
            return;
        }

        if self.form.is_some() {
            self.handle_form_key(key);
            return;
        }

        let counts = self.counts();
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Left | KeyCode::Char('h') => self.selection.move_column(-1, &counts),
            KeyCode::Right | KeyCode::Char('l') => self.selection.move_column(1, &counts),
            KeyCode::Up | KeyCode::Char('k') => self.selection.move_row(-1, &counts),
            KeyCode::Down | KeyCode::Char('j') => self.selection.move_row(1, &counts),
            KeyCode::Char('n') => {
                self.form = Some(TaskForm::new_task(self.default_priority));
            }
            KeyCode::Char('e') => {
                if let Some(task) = self.selected_task() {
                    self.form = Some(TaskForm::edit_task(task));
                }
            }
            KeyCode::Char('d') => {
                if let Some(task) = self.selected_task() {
                    self.delete_confirm = Some(DeleteConfirmState {
                        task_id: task.id.clone(),
                        title: task.title.clone(),
                    });
                }
            }
            KeyCode::Char('H') | KeyCode::Char('[') => self.move_selected(-1),
            KeyCode::Char('L') | KeyCode::Char(']') => self.move_selected(1),
            KeyCode::Char('?') => self.show_help = true,
            _ => {}
        }
    }

    fn handle_delete_confirm_key(&mut self, key: KeyEvent) {
        let Some(confirm) = self.delete_confirm.take() else {
            return;
        };

        if matches!(key.code, KeyCode::Char('y') | KeyCode::Enter) {
            match self.board.delete(&confirm.task_id) {
                Ok(()) => self.set_status(
                    StatusKind::Info,
                    format!("Deleted task {} ({})", confirm.task_id, confirm.title),
                ),
                Err(err) => self.set_status(StatusKind::Error, err.to_string()),
            }
            self.refresh();
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        let Some(form) = self.form.as_mut() else {
            return;
        };

        match form.handle_key(key) {
            FormAction::None => {}
            FormAction::Cancel => self.form = None,
            FormAction::Submit => self.apply_form_submit(),
        }
    }

    fn apply_form_submit(&mut self) {
        let Some(form) = self.form.as_ref() else {
            return;
        };

        let submit = match form.submit() {
            Ok(submit) => submit,
            Err(message) => {
                if let Some(form) = self.form.as_mut() {
                    form.set_error(message);
                }
                return;
            }
        };

        let outcome = match form.task_id() {
            None => {
                // New tasks land in the selected column.
                let column = self.column_names().get(self.selection.column).cloned();
                self.board
                    .add(NewTask {
                        title: submit.title,
                        description: submit.description,
                        column,
                        due_date: submit.due_date,
                        priority: Some(submit.priority),
                    })
                    .map(|task| format!("Created task {}", task.id))
            }
            Some(id) => {
                let id = id.to_string();
                let patch = TaskPatch {
                    title: Some(submit.title),
                    description: Some(submit.description),
                    column: None,
                    due_date: Some(submit.due_date),
                    priority: Some(submit.priority),
                };
                self.board.update(&id, patch).map(|updated| match updated {
                    Some(task) => format!("Updated task {}", task.id),
                    None => format!("Task {id} vanished; nothing updated"),
                })
            }
        };

        match outcome {
            Ok(message) => {
                self.form = None;
                self.refresh();
                self.set_status(StatusKind::Info, message);
            }
            Err(err) => {
                if let Some(form) = self.form.as_mut() {
                    form.set_error(err.to_string());
                }
            }
        }
    }

    /// Move the selected task one column left or right. At the edges there
    /// is no target column and the request is a no-op.
    fn move_selected(&mut self, delta: isize) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let task_id = task.id.clone();

        let Some(target) =
            model::target_column(self.selection.column, delta, self.column_names().len())
        else {
            let edge = if delta < 0 { "first" } else { "last" };
            self.set_status(StatusKind::Info, format!("Already in the {edge} column"));
            return;
        };

        let target_name = self.column_names()[target].clone();
        match self.board.move_task(&task_id, &target_name) {
            Ok(Some(_)) => {
                self.refresh();
                self.selection.column = target;
                self.selection.row = self.columns[target]
                    .iter()
                    .position(|task| task.id == task_id)
                    .unwrap_or(0);
                self.set_status(StatusKind::Info, format!("Moved to {target_name}"));
            }
            Ok(None) => {
                self.refresh();
                self.set_status(StatusKind::Error, format!("Task {task_id} not found"));
            }
            Err(err) => self.set_status(StatusKind::Error, err.to_string()),
        }
    }
}

/// Run the board view until the user quits.
///
/// The board is owned by the view for its whole lifetime; it is handed in
/// here and never reachable through any ambient state.
pub fn run(board: Board, default_priority: Priority) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = AppState::new(board, default_priority);
    let result = run_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        terminal.draw(|frame| view::render(frame, app))?;

        if app.should_quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
    }
}
