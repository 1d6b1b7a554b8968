use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::stats;
use crate::tui::app::App;
use crate::util::unicode::truncate_to_width;

/// Render the routine view: the habit checklist for the selected date
pub fn render_routine_view(frame: &mut Frame, app: &App, area: Rect) {
    let agg = app.store.aggregate();
    let checked = agg.routine_completed_on(app.selected_date);
    let dc = stats::routine_day_completion(&agg.custom_routine, &agg.routine_history, app.selected_date);

    let mut lines = vec![
        Line::from(Span::styled(
            format!(
                " Habits for {}  ({}/{} done, {}%)",
                app.selected_date.format("%A, %Y-%m-%d"),
                dc.completed,
                dc.total,
                dc.percent()
            ),
            Style::default()
                .fg(app.theme.text_bright)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];

    if agg.custom_routine.is_empty() {
        lines.push(Line::from(Span::styled(
            " No routine items. Press a to add one.",
            Style::default().fg(app.theme.dim),
        )));
    }

    let max_activity = area.width.saturating_sub(32) as usize;
    for (i, item) in agg.custom_routine.iter().enumerate() {
        let selected = i == app.routine_cursor;
        let is_checked = checked.contains(&item.id);
        let row_bg = if selected {
            app.theme.selection_bg
        } else {
            app.theme.background
        };
        let check = if is_checked { "[x]" } else { "[ ]" };
        let check_color = if is_checked {
            app.theme.green
        } else {
            app.theme.dim
        };
        let activity_style = if is_checked {
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
                format!("{}-{} ", item.start_time, item.end_time),
                Style::default().fg(app.theme.text).bg(row_bg),
            ),
            Span::styled(truncate_to_width(&item.activity, max_activity), activity_style),
            Span::styled(
                format!("  {}", item.category.label()),
                Style::default()
                    .fg(app.theme.routine_color(item.category))
                    .bg(row_bg),
            ),
        ]));
    }

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(app.theme.background)),
        area,
    );
}
