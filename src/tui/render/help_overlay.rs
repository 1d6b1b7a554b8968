use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::tui::render::centered_rect;

const KEYS: &[(&str, &str)] = &[
    ("1-6 / Tab", "switch view"),
    ("j/k or ↑/↓", "move cursor"),
    ("h/l or ←/→", "previous/next day (or month)"),
    ("g", "jump to today"),
    ("space/Enter", "toggle task or habit"),
    ("a", "add task (habit in Routine view)"),
    ("e", "edit habit / profile"),
    ("x", "delete under cursor"),
    ("t", "start/stop focus timer"),
    ("n", "clear notifications"),
    ("?", "this help"),
    ("q", "quit"),
];

/// Render the help overlay on top of everything
pub fn render_help_overlay(frame: &mut Frame, app: &App, container: Rect) {
    let height = KEYS.len() as u16 + 2;
    let area = centered_rect(44, height, container);
    frame.render_widget(Clear, area);

    let lines: Vec<Line> = KEYS
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(
                    format!(" {:<12}", key),
                    Style::default()
                        .fg(app.theme.text_bright)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(*action, Style::default().fg(app.theme.text)),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight))
        .title(" Keys ");
    frame.render_widget(
        Paragraph::new(lines)
            .style(Style::default().bg(app.theme.background))
            .block(block),
        area,
    );
}
