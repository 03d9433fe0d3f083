//! Task form for the board view.
//!
//! One form backs both "new task" and "edit task". It validates the way the
//! board does (title required, `YYYY-MM-DD` due dates, named priorities), so
//! nothing invalid ever reaches the store, and it asks for confirmation
//! before submitting.

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::task::{parse_due_date, Priority, Task};

pub const FIELD_COUNT: usize = 4;
pub const FIELD_LABELS: [&str; FIELD_COUNT] = ["Title", "Description", "Due (YYYY-MM-DD)", "Priority"];

const TITLE: usize = 0;
const DESCRIPTION: usize = 1;
const DUE: usize = 2;
const PRIORITY: usize = 3;

/// Validated form values, ready to hand to the board.
#[derive(Debug, Clone)]
pub struct FormSubmit {
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Cancel,
    Submit,
}

#[derive(Debug, Clone)]
pub struct TaskForm {
    values: [String; FIELD_COUNT],
    focus: usize,
    confirming: bool,
    error: Option<String>,
    task_id: Option<String>,
}

impl TaskForm {
    pub fn new_task(default_priority: Priority) -> Self {
        Self {
            values: [
                String::new(),
                String::new(),
                String::new(),
                default_priority.as_str().to_string(),
            ],
            focus: TITLE,
            confirming: false,
            error: None,
            task_id: None,
        }
    }

    pub fn edit_task(task: &Task) -> Self {
        Self {
            values: [
                task.title.clone(),
                task.description.clone(),
                task.due_date.map(|due| due.to_string()).unwrap_or_default(),
                task.priority.as_str().to_string(),
            ],
            focus: TITLE,
            confirming: false,
            error: None,
            task_id: Some(task.id.clone()),
        }
    }

    /// Id of the task being edited; `None` for a new task.
    pub fn task_id(&self) -> Option<&str> {
        self.task_id.as_deref()
    }

    pub fn values(&self) -> &[String; FIELD_COUNT] {
        &self.values
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn confirming(&self) -> bool {
        self.confirming
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, message: String) {
        self.error = Some(message);
        self.confirming = false;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        if self.confirming {
            return match key.code {
                KeyCode::Char('y') | KeyCode::Enter => FormAction::Submit,
                KeyCode::Esc => FormAction::Cancel,
                KeyCode::Char('e') | KeyCode::Backspace => {
                    self.confirming = false;
                    FormAction::None
                }
                _ => FormAction::None,
            };
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return FormAction::Cancel,
            KeyCode::Char('u') if ctrl => self.values[self.focus].clear(),
            KeyCode::Tab | KeyCode::Down => self.focus = (self.focus + 1) % FIELD_COUNT,
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = (self.focus + FIELD_COUNT - 1) % FIELD_COUNT;
            }
            KeyCode::Enter if self.focus + 1 == FIELD_COUNT => match self.validate() {
                Ok(()) => {
                    self.confirming = true;
                    return FormAction::None;
                }
                Err(message) => {
                    self.error = Some(message);
                    return FormAction::None;
                }
            },
            KeyCode::Enter => self.focus += 1,
            KeyCode::Backspace => {
                self.values[self.focus].pop();
            }
            KeyCode::Char(ch) if !ctrl && !ch.is_control() => self.values[self.focus].push(ch),
            _ => {}
        }

        self.error = None;
        FormAction::None
    }

    pub fn submit(&self) -> Result<FormSubmit, String> {
        self.validate()?;

        let due = self.values[DUE].trim();
        let due_date = if due.is_empty() {
            None
        } else {
            Some(parse_due_date(due).map_err(|err| err.to_string())?)
        };

        let priority = self.values[PRIORITY].trim();
        let priority = if priority.is_empty() {
            Priority::default()
        } else {
            priority.parse().map_err(|err: crate::Error| err.to_string())?
        };

        Ok(FormSubmit {
            title: self.values[TITLE].trim().to_string(),
            description: self.values[DESCRIPTION].clone(),
            due_date,
            priority,
        })
    }

    fn validate(&self) -> Result<(), String> {
        if self.values[TITLE].trim().is_empty() {
            return Err("title is required".to_string());
        }

        let due = self.values[DUE].trim();
        if !due.is_empty() && parse_due_date(due).is_err() {
            return Err("due date must be YYYY-MM-DD".to_string());
        }

        let priority = self.values[PRIORITY].trim();
        if !priority.is_empty() && priority.parse::<Priority>().is_err() {
            return Err("priority must be low, medium, or high".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(form: &mut TaskForm, code: KeyCode) -> FormAction {
        form.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(form: &mut TaskForm, text: &str) {
        for ch in text.chars() {
            press(form, KeyCode::Char(ch));
        }
    }

    #[test]
    fn title_is_required() {
        let mut form = TaskForm::new_task(Priority::Medium);
        for _ in 0..FIELD_COUNT {
            assert_eq!(press(&mut form, KeyCode::Enter), FormAction::None);
        }
        assert_eq!(form.error(), Some("title is required"));
        assert!(!form.confirming());
    }

    #[test]
    fn bad_due_date_is_rejected() {
        let mut form = TaskForm::new_task(Priority::Medium);
        type_text(&mut form, "Title");
        press(&mut form, KeyCode::Tab);
        press(&mut form, KeyCode::Tab);
        type_text(&mut form, "next week");
        for _ in 0..FIELD_COUNT {
            press(&mut form, KeyCode::Enter);
        }
        assert_eq!(form.error(), Some("due date must be YYYY-MM-DD"));
    }

    #[test]
    fn submit_parses_every_field() {
        let mut form = TaskForm::new_task(Priority::Medium);
        type_text(&mut form, "Ship it");
        press(&mut form, KeyCode::Tab);
        type_text(&mut form, "final pass");
        press(&mut form, KeyCode::Tab);
        type_text(&mut form, "2026-09-01");
        press(&mut form, KeyCode::Tab);
        form.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        type_text(&mut form, "high");

        let submit = form.submit().unwrap();
        assert_eq!(submit.title, "Ship it");
        assert_eq!(submit.description, "final pass");
        assert_eq!(submit.due_date, NaiveDate::from_ymd_opt(2026, 9, 1));
        assert_eq!(submit.priority, Priority::High);
    }

    #[test]
    fn edit_prefills_from_the_task() {
        let task = Task {
            id: "4".to_string(),
            title: "Water plants".to_string(),
            description: "the ferns too".to_string(),
            column: "To Do".to_string(),
            created: NaiveDate::from_ymd_opt(2026, 8, 7)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
            due_date: NaiveDate::from_ymd_opt(2026, 8, 9),
            priority: Priority::Low,
        };

        let form = TaskForm::edit_task(&task);
        assert_eq!(form.task_id(), Some("4"));

        let submit = form.submit().unwrap();
        assert_eq!(submit.title, "Water plants");
        assert_eq!(submit.description, "the ferns too");
        assert_eq!(submit.due_date, NaiveDate::from_ymd_opt(2026, 8, 9));
        assert_eq!(submit.priority, Priority::Low);
    }

    #[test]
    fn confirmation_precedes_submit() {
        let mut form = TaskForm::new_task(Priority::Medium);
        type_text(&mut form, "Quick one");
        for _ in 0..FIELD_COUNT - 1 {
            press(&mut form, KeyCode::Enter);
        }
        assert!(!form.confirming());
        press(&mut form, KeyCode::Enter);
        assert!(form.confirming());
        assert_eq!(press(&mut form, KeyCode::Char('y')), FormAction::Submit);
    }

    #[test]
    fn backing_out_of_confirmation_keeps_the_values() {
        let mut form = TaskForm::new_task(Priority::Medium);
        type_text(&mut form, "Keep me");
        for _ in 0..FIELD_COUNT {
            press(&mut form, KeyCode::Enter);
        }
        assert!(form.confirming());
        press(&mut form, KeyCode::Char('e'));
        assert!(!form.confirming());
        assert_eq!(form.values()[0], "Keep me");
    }

    #[test]
    fn escape_cancels() {
        let mut form = TaskForm::new_task(Priority::Medium);
        assert_eq!(press(&mut form, KeyCode::Esc), FormAction::Cancel);
    }
}
