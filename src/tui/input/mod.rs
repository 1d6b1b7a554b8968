mod confirm;
mod form;
mod navigate;

pub use navigate::{routine_category_at, task_category_at};

use crossterm::event::KeyEvent;

use crate::tui::app::{App, Mode};

/// Route a key press to the handler for the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Help overlay swallows every key
    if app.show_help {
        app.show_help = false;
        return;
    }

    match app.mode {
        Mode::Navigate => navigate::handle_key(app, key),
        Mode::TaskForm(_) | Mode::RoutineForm(_) | Mode::ProfileForm(_) => {
            form::handle_key(app, key)
        }
        Mode::Confirm(_) => confirm::handle_key(app, key),
    }
}
