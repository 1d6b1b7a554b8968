use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};

use crate::ops::stats;
use crate::tui::app::App;

/// Render the dashboard: stat tiles, XP gauge, category bars
pub fn render_dashboard(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(area);

    render_tiles(frame, app, chunks[0]);
    render_xp_gauge(frame, app, chunks[1]);
    render_category_bars(frame, app, chunks[2]);
}

fn render_tiles(frame: &mut Frame, app: &App, area: Rect) {
    let agg = app.store.aggregate();
    let today = Local::now().date_naive();
    let summary = stats::streaks(&agg.tasks, today);
    let dc = stats::routine_day_completion(&agg.custom_routine, &agg.routine_history, today);

    let tiles = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let tile = |title: &'static str, value: String, color| {
        Paragraph::new(Line::from(vec![
            Span::styled(format!("{}: ", title), Style::default().fg(app.theme.dim)),
            Span::styled(
                value,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL).border_style(
            Style::default().fg(app.theme.selection_bg),
        ))
    };

    frame.render_widget(
        tile(
            "Tasks",
            format!("{}/{}", agg.completed_count(), agg.tasks.len()),
            app.theme.green,
        ),
        tiles[0],
    );
    frame.render_widget(
        tile("Habits", format!("{}%", dc.percent()), app.theme.yellow),
        tiles[1],
    );
    frame.render_widget(
        tile(
            "Streak",
            format!("{}d (best {}d)", summary.current_streak, summary.longest_streak),
            app.theme.cyan,
        ),
        tiles[2],
    );
    frame.render_widget(
        tile(
            "Level",
            format!("{}", agg.progress.level),
            app.theme.purple,
        ),
        tiles[3],
    );
}

fn render_xp_gauge(frame: &mut Frame, app: &App, area: Rect) {
    let progress = app.store.aggregate().progress;
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.selection_bg))
                .title(Span::styled(
                    format!(" level {} ", progress.level),
                    Style::default().fg(app.theme.text),
                )),
        )
        .gauge_style(Style::default().fg(app.theme.blue).bg(app.theme.selection_bg))
        .ratio(f64::from(progress.xp) / 100.0)
        .label(format!("{} / 100 xp", progress.xp));
    frame.render_widget(gauge, area);
}

fn render_category_bars(frame: &mut Frame, app: &App, area: Rect) {
    let by_cat = stats::by_category(&app.store.aggregate().tasks);

    let mut lines = vec![Line::from(Span::styled(
        "Focus Areas",
        Style::default()
            .fg(app.theme.text_bright)
            .add_modifier(Modifier::BOLD),
    ))];

    if by_cat.is_empty() {
        lines.push(Line::from(Span::styled(
            "No tasks yet. Press a to add one.",
            Style::default().fg(app.theme.dim),
        )));
    }

    const BAR_WIDTH: u32 = 24;
    for stat in &by_cat {
        let filled = if stat.total == 0 {
            0
        } else {
            (stat.completed * BAR_WIDTH) / stat.total
        };
        let bar: String = "█".repeat(filled as usize) + &"░".repeat((BAR_WIDTH - filled) as usize);
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<10}", stat.category.label()),
                Style::default().fg(app.theme.category_color(stat.category)),
            ),
            Span::styled(bar, Style::default().fg(app.theme.category_color(stat.category))),
            Span::styled(
                format!(" {}/{}", stat.completed, stat.total),
                Style::default().fg(app.theme.text),
            ),
        ]));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.selection_bg)),
    );
    frame.render_widget(paragraph, area);
}
