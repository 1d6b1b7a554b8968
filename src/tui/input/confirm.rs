use crossterm::event::{KeyCode, KeyEvent};

use crate::store::store::Mutation;
use crate::tui::app::{App, ConfirmAction, Mode};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            let mode = std::mem::replace(&mut app.mode, Mode::Navigate);
            if let Mode::Confirm(action) = mode {
                match action {
                    ConfirmAction::DeleteTask { id, .. } => {
                        let _ = app.apply(Mutation::DeleteTask { id });
                    }
                    ConfirmAction::DeleteRoutineItem { id, .. } => {
                        let _ = app.apply(Mutation::DeleteRoutineItem { id });
                    }
                }
                app.clamp_cursors();
            }
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.mode = Mode::Navigate;
        }
        _ => {}
    }
}
