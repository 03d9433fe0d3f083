use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::task::{Priority, Task};

use super::app::{AppState, DeleteConfirmState, StatusKind};
use super::form::{TaskForm, FIELD_LABELS};

const COLOR_TEXT: Color = Color::Rgb(234, 236, 239);
const COLOR_MUTED: Color = Color::Rgb(160, 165, 172);
const COLOR_MUTED_DARK: Color = Color::Rgb(118, 124, 130);
const COLOR_BG_SELECTED: Color = Color::Rgb(52, 56, 60);
const COLOR_INFO: Color = Color::Rgb(116, 198, 219);
const COLOR_ERROR: Color = Color::Rgb(255, 107, 107);
const COLOR_ACCENT: Color = Color::Rgb(122, 170, 255);
const COLOR_HIGH: Color = Color::Rgb(255, 107, 107);
const COLOR_LOW: Color = Color::Rgb(126, 210, 146);

pub fn render(frame: &mut Frame, app: &mut AppState) {
    let area = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(area);
    let header = chunks[0];
    let main = chunks[1];
    let footer = chunks[2];

    render_header(frame, app, header);
    render_columns(frame, app, main);
    render_footer(frame, app, footer);

    if let Some(form) = app.form.as_ref() {
        render_form_modal(frame, area, form);
    }
    if let Some(state) = app.delete_confirm.as_ref() {
        render_delete_confirm_modal(frame, area, state);
    }
    if app.show_help {
        render_help_modal(frame, area);
    }
}

fn render_header(frame: &mut Frame, app: &AppState, area: Rect) {
    let total: usize = app.columns.iter().map(Vec::len).sum();
    let line = Line::from(vec![
        Span::styled(
            " kanbo",
            Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {total} task{}", if total == 1 { "" } else { "s" }),
            Style::default().fg(COLOR_MUTED),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_columns(frame: &mut Frame, app: &AppState, area: Rect) {
    let names = app.column_names();
    if names.is_empty() {
        return;
    }

    let constraints: Vec<Constraint> = names
        .iter()
        .map(|_| Constraint::Ratio(1, names.len() as u32))
        .collect();
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (index, name) in names.iter().enumerate() {
        let tasks = app.columns.get(index).map(Vec::as_slice).unwrap_or(&[]);
        let selected_column = index == app.selection.column;
        render_column(frame, panes[index], name, tasks, selected_column, app);
    }
}

fn render_column(
    frame: &mut Frame,
    area: Rect,
    name: &str,
    tasks: &[Task],
    selected_column: bool,
    app: &AppState,
) {
    let border_style = if selected_column {
        Style::default().fg(COLOR_ACCENT)
    } else {
        Style::default().fg(COLOR_MUTED_DARK)
    };
    let title_style = if selected_column {
        Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(COLOR_MUTED)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(format!(" {name} ({}) ", tasks.len()), title_style));

    let mut lines = Vec::with_capacity(tasks.len());
    for (row, task) in tasks.iter().enumerate() {
        let selected = selected_column && row == app.selection.row;
        lines.push(task_line(task, selected));
    }
    if tasks.is_empty() {
        lines.push(Line::from(Span::styled(
            " (empty)",
            Style::default().fg(COLOR_MUTED_DARK),
        )));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn task_line(task: &Task, selected: bool) -> Line<'static> {
    let (marker, marker_color) = match task.priority {
        Priority::High => ("▲ ", COLOR_HIGH),
        Priority::Medium => ("• ", COLOR_MUTED),
        Priority::Low => ("▽ ", COLOR_LOW),
    };

    let base = if selected {
        Style::default().bg(COLOR_BG_SELECTED)
    } else {
        Style::default()
    };
    let title_style = if selected {
        base.fg(COLOR_TEXT).add_modifier(Modifier::BOLD)
    } else {
        base.fg(COLOR_TEXT)
    };

    let mut spans = vec![
        Span::styled(marker, base.fg(marker_color)),
        Span::styled(task.title.clone(), title_style),
    ];
    if let Some(due) = task.due_date {
        spans.push(Span::styled(
            format!("  {due}"),
            base.fg(COLOR_MUTED_DARK),
        ));
    }

    Line::from(spans)
}

fn render_footer(frame: &mut Frame, app: &AppState, area: Rect) {
    let line = match &app.status {
        Some((StatusKind::Error, message)) => Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(COLOR_ERROR),
        )),
        Some((StatusKind::Info, message)) => Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(COLOR_INFO),
        )),
        None => Line::from(Span::styled(
            " ←/→ column  ↑/↓ task  n new  e edit  d delete  H/L move task  ? help  q quit",
            Style::default().fg(COLOR_MUTED_DARK),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_form_modal(frame: &mut Frame, area: Rect, form: &TaskForm) {
    let height = FIELD_LABELS.len() as u16 + 4;
    let modal = modal_rect(area, 52, height);
    frame.render_widget(Clear, modal);

    let title = if form.task_id().is_some() {
        " Edit task "
    } else {
        " New task "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_ACCENT))
        .title(Span::styled(
            title,
            Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD),
        ));

    let mut lines = Vec::new();
    for (index, (label, value)) in FIELD_LABELS.iter().zip(form.values()).enumerate() {
        let active = index == form.focus() && !form.confirming();
        let label_style = if active {
            Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(COLOR_MUTED)
        };
        let marker = if index == 0 { "*" } else { " " };
        let mut spans = vec![
            Span::styled(format!("{marker}{label:<18}"), label_style),
            Span::styled(value.clone(), Style::default().fg(COLOR_TEXT)),
        ];
        if active {
            spans.push(Span::styled("\u{258f}", Style::default().fg(COLOR_ACCENT)));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    if form.confirming() {
        lines.push(Line::from(Span::styled(
            "Save? y = save, e = keep editing, Esc = discard",
            Style::default().fg(COLOR_INFO),
        )));
    } else if let Some(error) = form.error() {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(COLOR_ERROR),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "Tab next field, Enter to finish, Esc to cancel",
            Style::default().fg(COLOR_MUTED_DARK),
        )));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }).block(block), modal);
}

fn render_delete_confirm_modal(frame: &mut Frame, area: Rect, state: &DeleteConfirmState) {
    let modal = modal_rect(area, 46, 5);
    frame.render_widget(Clear, modal);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_ERROR))
        .title(Span::styled(
            " Delete task ",
            Style::default().fg(COLOR_ERROR).add_modifier(Modifier::BOLD),
        ));

    let lines = vec![
        Line::from(Span::styled(
            format!("Delete \"{}\"?", state.title),
            Style::default().fg(COLOR_TEXT),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "y = delete, any other key cancels",
            Style::default().fg(COLOR_MUTED),
        )),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .alignment(Alignment::Center)
            .block(block),
        modal,
    );
}

fn render_help_modal(frame: &mut Frame, area: Rect) {
    let entries: [(&str, &str); 9] = [
        ("←/→ h/l", "switch column"),
        ("↑/↓ k/j", "select task"),
        ("n", "new task in the selected column"),
        ("e", "edit the selected task"),
        ("d", "delete the selected task"),
        ("H or [", "move task one column left"),
        ("L or ]", "move task one column right"),
        ("?", "toggle this help"),
        ("q", "quit"),
    ];

    let modal = modal_rect(area, 48, entries.len() as u16 + 2);
    frame.render_widget(Clear, modal);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_ACCENT))
        .title(Span::styled(
            " Keys ",
            Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD),
        ));

    let lines: Vec<Line> = entries
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!(" {key:<10}"), Style::default().fg(COLOR_ACCENT)),
                Span::styled(action.to_string(), Style::default().fg(COLOR_TEXT)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), modal);
}

fn modal_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}
