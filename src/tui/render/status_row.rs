use chrono::Local;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::stats;
use crate::tui::app::App;

/// Render the status row: sync state and messages on the left, streak and
/// timer on the right.
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans: Vec<Span> = Vec::new();

    if let Some(error) = &app.status_error {
        spans.push(Span::styled(
            format!(" {}", error),
            Style::default().fg(app.theme.red).bg(bg),
        ));
    } else if let Some(flash) = &app.level_flash {
        spans.push(Span::styled(
            format!(" ★ {}", flash),
            Style::default()
                .fg(app.theme.yellow)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ));
    } else if app.store.write_failed {
        spans.push(Span::styled(
            " sync failed (kept locally, see journal)",
            Style::default().fg(app.theme.red).bg(bg),
        ));
    } else if let Some(notice) = app.notices.first() {
        spans.push(Span::styled(
            format!(" {} ({})", notice.message, notice.at.format("%H:%M")),
            Style::default().fg(app.theme.cyan).bg(bg),
        ));
        if app.notices.len() > 1 {
            spans.push(Span::styled(
                format!(" +{}", app.notices.len() - 1),
                Style::default().fg(app.theme.dim).bg(bg),
            ));
        }
    }

    // Right side: streak, timer
    let summary = stats::streaks(&app.store.aggregate().tasks, Local::now().date_naive());
    let mut right = format!("⚡{}d", summary.current_streak);
    if let Some(remaining) = app.timer.format_remaining() {
        right.push_str(&format!("  ⏱ {}", remaining));
    }
    right.push(' ');

    let left_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let right_width = right.chars().count();
    if left_width + right_width < width {
        spans.push(Span::styled(
            " ".repeat(width - left_width - right_width),
            Style::default().bg(bg),
        ));
        spans.push(Span::styled(
            right,
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
