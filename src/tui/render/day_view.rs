use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode::truncate_to_width;

/// Render the day view: tasks for the selected date with a cursor
pub fn render_day_view(frame: &mut Frame, app: &App, area: Rect) {
    let tasks = app.day_tasks();
    let header = format!(
        " {}  ({} tasks)",
        app.selected_date.format("%A, %Y-%m-%d"),
        tasks.len()
    );

    let mut lines = vec![
        Line::from(Span::styled(
            header,
            Style::default()
                .fg(app.theme.text_bright)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];

    if tasks.is_empty() {
        lines.push(Line::from(Span::styled(
            " No tasks for this day. Press a to add one.",
            Style::default().fg(app.theme.dim),
        )));
    }

    let max_title = area.width.saturating_sub(30) as usize;
    for (i, task) in tasks.iter().enumerate() {
        let selected = i == app.day_cursor;
        let row_bg = if selected {
            app.theme.selection_bg
        } else {
            app.theme.background
        };
        let check = if task.completed { "[x]" } else { "[ ]" };
        let check_color = if task.completed {
            app.theme.green
        } else {
            app.theme.dim
        };
        let title_style = if task.completed {
            Style::default()
                .fg(app.theme.dim)
                .bg(row_bg)
                .add_modifier(Modifier::CROSSED_OUT)
        } else {
            Style::default().fg(app.theme.text_bright).bg(row_bg)
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", check), Style::default().fg(check_color).bg(row_bg)),
            Span::styled(
                format!("{}-{} ", task.start_time, task.end_time),
                Style::default().fg(app.theme.text).bg(row_bg),
            ),
            Span::styled(truncate_to_width(&task.title, max_title), title_style),
            Span::styled(
                format!("  {}", task.category.label()),
                Style::default()
                    .fg(app.theme.category_color(task.category))
                    .bg(row_bg),
            ),
        ]));
    }

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(app.theme.background)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::{Category, TaskType};
    use crate::store::store::Mutation;
    use crate::tui::render::test_helpers::{TERM_H, TERM_W, render_to_string, test_app};

    #[test]
    fn empty_day_shows_hint() {
        let (app, _tmp) = test_app();
        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_day_view(frame, &app, area)
        });
        assert!(out.contains("No tasks for this day"));
    }

    #[test]
    fn tasks_render_with_checkbox_times_and_category() {
        let (mut app, _tmp) = test_app();
        let applied = app.apply(Mutation::AddTask {
            title: "Write report".into(),
            category: Category::Work,
            date: app.selected_date,
            start_time: "09:00".into(),
            end_time: "10:00".into(),
            kind: TaskType::OneOff,
        });
        assert!(applied.is_some());

        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_day_view(frame, &app, area)
        });
        assert!(out.contains("[ ]"));
        assert!(out.contains("09:00-10:00"));
        assert!(out.contains("Write report"));
        assert!(out.contains("Work"));
    }

    #[test]
    fn completed_task_shows_checked_box() {
        let (mut app, _tmp) = test_app();
        let _ = app.apply(Mutation::AddTask {
            title: "Done thing".into(),
            category: Category::Health,
            date: app.selected_date,
            start_time: "07:00".into(),
            end_time: "08:00".into(),
            kind: TaskType::OneOff,
        });
        let _ = app.apply(Mutation::ToggleTask { id: "T-001".into() });

        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_day_view(frame, &app, area)
        });
        assert!(out.contains("[x]"));
    }
}
