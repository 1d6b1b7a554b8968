use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;

/// Render the profile view
pub fn render_profile_view(frame: &mut Frame, app: &App, area: Rect) {
    let profile = &app.store.aggregate().profile;

    let field = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(format!(" {:<12}", label), Style::default().fg(app.theme.dim)),
            Span::styled(value, Style::default().fg(app.theme.text_bright)),
        ])
    };

    let mut lines = vec![
        Line::from(Span::styled(
            " Profile  (e to edit)",
            Style::default()
                .fg(app.theme.text_bright)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        field("name", profile.name.clone()),
        field("age", profile.age.to_string()),
    ];
    if !profile.profession.is_empty() {
        lines.push(field("profession", profile.profession.clone()));
    }
    if !profile.goal.is_empty() {
        lines.push(field("goal", profile.goal.clone()));
    }
    if !profile.bio.is_empty() {
        lines.push(field("bio", profile.bio.clone()));
    }
    lines.push(field("joined", profile.joined.to_string()));

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(app.theme.background)),
        area,
    );
}
