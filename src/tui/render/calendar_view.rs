use chrono::NaiveDate;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::calendar::{DayCell, month_grid};
use crate::tui::app::App;

/// Render the calendar view: monthly heatmap of completed tasks
pub fn render_calendar_view(frame: &mut Frame, app: &App, area: Rect) {
    let (year, month) = app.calendar_month;
    let Some(grid) = month_grid(&app.store.aggregate().tasks, year, month) else {
        return;
    };

    let title = NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_default();

    let mut lines = vec![
        Line::from(Span::styled(
            format!(" {}   (h/l to change month, g for today)", title),
            Style::default()
                .fg(app.theme.text_bright)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(
            ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"]
                .iter()
                .map(|d| Span::styled(format!("{:>4}", d), Style::default().fg(app.theme.dim)))
                .collect::<Vec<_>>(),
        ),
    ];

    let today = app.today();
    for week in grid.cells.chunks(7) {
        let mut spans = Vec::new();
        for cell in week {
            match cell {
                DayCell::Blank => spans.push(Span::styled(
                    "    ",
                    Style::default().bg(app.theme.background),
                )),
                DayCell::Day { day, completed } => {
                    let date = NaiveDate::from_ymd_opt(year, month, *day);
                    let mut style = Style::default()
                        .fg(if *completed > 0 {
                            app.theme.text_bright
                        } else {
                            app.theme.text
                        })
                        .bg(app.theme.heat_color(*completed));
                    if date == Some(today) {
                        style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
                    }
                    spans.push(Span::styled(format!(" {:>2} ", day), style));
                }
            }
        }
        lines.push(Line::from(spans));
        lines.push(Line::default());
    }

    lines.push(Line::from(vec![
        Span::styled(" less ", Style::default().fg(app.theme.dim)),
        Span::styled("  ", Style::default().bg(app.theme.heat_color(0))),
        Span::styled("  ", Style::default().bg(app.theme.heat_color(1))),
        Span::styled("  ", Style::default().bg(app.theme.heat_color(2))),
        Span::styled("  ", Style::default().bg(app.theme.heat_color(3))),
        Span::styled(" more", Style::default().fg(app.theme.dim)),
    ]));

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(app.theme.background)),
        area,
    );
}
