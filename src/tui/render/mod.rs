pub mod badges_view;
pub mod calendar_view;
pub mod dashboard;
pub mod day_view;
pub mod form_popup;
pub mod help_overlay;
pub mod profile_view;
pub mod routine_view;
pub mod status_row;
pub mod tab_bar;
#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::{App, Mode, View};

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: tab bar (2 rows) | content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    tab_bar::render_tab_bar(frame, app, chunks[0]);

    match app.view {
        View::Dashboard => dashboard::render_dashboard(frame, app, chunks[1]),
        View::Day => day_view::render_day_view(frame, app, chunks[1]),
        View::Routine => routine_view::render_routine_view(frame, app, chunks[1]),
        View::Calendar => calendar_view::render_calendar_view(frame, app, chunks[1]),
        View::Badges => badges_view::render_badges_view(frame, app, chunks[1]),
        View::Profile => profile_view::render_profile_view(frame, app, chunks[1]),
    }

    // Modal layers on top of the content
    match &app.mode {
        Mode::TaskForm(_) | Mode::RoutineForm(_) | Mode::ProfileForm(_) => {
            form_popup::render_form_popup(frame, app, area);
        }
        Mode::Confirm(_) => form_popup::render_confirm_popup(frame, app, area),
        Mode::Navigate => {}
    }

    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }

    status_row::render_status_row(frame, app, chunks[2]);
}

/// A centered rect of the given size, clamped to the container
pub(super) fn centered_rect(width: u16, height: u16, container: Rect) -> Rect {
    let w = width.min(container.width);
    let h = height.min(container.height);
    Rect {
        x: container.x + (container.width - w) / 2,
        y: container.y + (container.height - h) / 2,
        width: w,
        height: h,
    }
}
