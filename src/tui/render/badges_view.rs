use chrono::Local;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::badge_ops;
use crate::tui::app::App;

/// Render the badges view: unlocked first, catalog order within each group
pub fn render_badges_view(frame: &mut Frame, app: &App, area: Rect) {
    let statuses = badge_ops::evaluate(app.store.aggregate(), Local::now().date_naive());
    let unlocked = statuses.iter().filter(|s| s.unlocked).count();

    let mut lines = vec![
        Line::from(Span::styled(
            format!(" Badges  ({}/{} unlocked)", unlocked, statuses.len()),
            Style::default()
                .fg(app.theme.text_bright)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];

    for status in &statuses {
        let (dot, name_style, desc_style) = if status.unlocked {
            (
                Span::styled("●", Style::default().fg(app.theme.yellow)),
                Style::default()
                    .fg(app.theme.text_bright)
                    .add_modifier(Modifier::BOLD),
                Style::default().fg(app.theme.text),
            )
        } else {
            (
                Span::styled("○", Style::default().fg(app.theme.dim)),
                Style::default().fg(app.theme.dim),
                Style::default().fg(app.theme.dim),
            )
        };
        lines.push(Line::from(vec![
            Span::styled(" ", Style::default()),
            dot,
            Span::styled(format!(" {} ", status.spec.icon), Style::default().fg(app.theme.text)),
            Span::styled(format!("{:<14}", status.spec.name), name_style),
            Span::styled(status.spec.description, desc_style),
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
    use crate::model::badge::BADGE_CATALOG;
    use crate::tui::render::test_helpers::{TERM_H, TERM_W, render_to_string, test_app};

    #[test]
    fn fresh_workspace_shows_all_badges_locked() {
        let (app, _tmp) = test_app();
        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_badges_view(frame, &app, area)
        });
        assert!(out.contains(&format!("0/{} unlocked", BADGE_CATALOG.len())));
        assert!(out.contains("The Machine"));
        assert!(out.contains("○"));
        assert!(!out.contains("●"));
    }
}
