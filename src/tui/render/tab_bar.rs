use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, View};

/// Render the tab bar: numbered views plus a separator rule
pub fn render_tab_bar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let mut spans = vec![Span::styled(" ", Style::default().bg(bg))];

    for (i, view) in View::ALL.iter().enumerate() {
        let label = format!(" {} {} ", i + 1, view.title());
        let style = if *view == app.view {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.dim).bg(bg)
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::styled(" ", Style::default().bg(bg)));
    }

    let tabs = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    let rule = Paragraph::new(Line::from(Span::styled(
        "─".repeat(area.width as usize),
        Style::default().fg(app.theme.selection_bg).bg(bg),
    )));

    let tab_area = Rect { height: 1, ..area };
    let rule_area = Rect {
        y: area.y + 1,
        height: 1,
        ..area
    };
    frame.render_widget(tabs, tab_area);
    if area.height > 1 {
        frame.render_widget(rule, rule_area);
    }
}
