use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, ConfirmAction, Mode};
use crate::tui::input::{routine_category_at, task_category_at};
use crate::tui::render::centered_rect;

/// Render the active modal form (add task, add/edit routine, edit profile)
pub fn render_form_popup(frame: &mut Frame, app: &App, container: Rect) {
    let (title, fields): (&str, Vec<(&str, String, bool)>) = match &app.mode {
        Mode::TaskForm(form) => (
            " Add Task ",
            vec![
                ("Title", form.title.clone(), form.field == 0),
                (
                    "Category",
                    format!("‹ {} ›", task_category_at(form.category_idx).label()),
                    form.field == 1,
                ),
                ("Start", form.start.clone(), form.field == 2),
                ("End", form.end.clone(), form.field == 3),
            ],
        ),
        Mode::RoutineForm(form) => (
            if form.editing_id.is_some() {
                " Edit Habit "
            } else {
                " Add Habit "
            },
            vec![
                ("Activity", form.activity.clone(), form.field == 0),
                (
                    "Category",
                    format!("‹ {} ›", routine_category_at(form.category_idx).label()),
                    form.field == 1,
                ),
                ("Start", form.start.clone(), form.field == 2),
                ("End", form.end.clone(), form.field == 3),
            ],
        ),
        Mode::ProfileForm(form) => (
            " Edit Profile ",
            vec![
                ("Name", form.name.clone(), form.field == 0),
                ("Age", form.age.clone(), form.field == 1),
                ("Profession", form.profession.clone(), form.field == 2),
                ("Goal", form.goal.clone(), form.field == 3),
                ("Bio", form.bio.clone(), form.field == 4),
            ],
        ),
        _ => return,
    };

    let height = fields.len() as u16 + 4;
    let area = centered_rect(48, height, container);
    frame.render_widget(Clear, area);

    let mut lines = Vec::new();
    for (label, value, active) in &fields {
        let marker = if *active { "▌" } else { " " };
        let value_style = if *active {
            Style::default().fg(app.theme.text_bright)
        } else {
            Style::default().fg(app.theme.text)
        };
        let cursor = if *active { "▏" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(app.theme.highlight)),
            Span::styled(format!("{:<11}", label), Style::default().fg(app.theme.dim)),
            Span::styled(format!("{}{}", value, cursor), value_style),
        ]));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        " Enter next/save  Tab next  Esc cancel",
        Style::default().fg(app.theme.dim),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight))
        .title(Span::styled(
            title,
            Style::default()
                .fg(app.theme.text_bright)
                .add_modifier(Modifier::BOLD),
        ));
    frame.render_widget(
        Paragraph::new(lines)
            .style(Style::default().bg(app.theme.background))
            .block(block),
        area,
    );
}

/// Render the y/n confirmation popup for destructive actions
pub fn render_confirm_popup(frame: &mut Frame, app: &App, container: Rect) {
    let Mode::Confirm(action) = &app.mode else {
        return;
    };
    let question = match action {
        ConfirmAction::DeleteTask { id, title } => {
            format!("Delete task {} \"{}\"?", id, title)
        }
        ConfirmAction::DeleteRoutineItem { id, activity } => {
            format!("Delete habit {} \"{}\"? History is kept.", id, activity)
        }
    };

    let width = (question.chars().count() as u16 + 4).clamp(30, container.width);
    let area = centered_rect(width, 5, container);
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled(
            question,
            Style::default().fg(app.theme.text_bright),
        )),
        Line::default(),
        Line::from(Span::styled(
            "y delete  n cancel",
            Style::default().fg(app.theme.dim),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.red));
    frame.render_widget(
        Paragraph::new(lines)
            .style(Style::default().bg(app.theme.background))
            .block(block),
        area,
    );
}
