use chrono::Datelike;
use crossterm::event::{KeyCode, KeyEvent};

use crate::model::profile::UserProfile;
use crate::model::routine::RoutineCategory;
use crate::model::task::Category;
use crate::store::store::Mutation;
use crate::tui::app::{App, ConfirmAction, Mode, ProfileForm, RoutineForm, TaskForm, View};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Any navigation key clears the one-shot toast and inline error
    app.level_flash = None;
    app.status_error = None;

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,

        // View switching
        KeyCode::Char(c @ '1'..='6') => {
            let idx = (c as usize) - ('1' as usize);
            app.view = View::ALL[idx];
        }
        KeyCode::Tab => {
            let idx = View::ALL.iter().position(|v| *v == app.view).unwrap_or(0);
            app.view = View::ALL[(idx + 1) % View::ALL.len()];
        }
        KeyCode::BackTab => {
            let idx = View::ALL.iter().position(|v| *v == app.view).unwrap_or(0);
            app.view = View::ALL[(idx + View::ALL.len() - 1) % View::ALL.len()];
        }

        // Cursor movement
        KeyCode::Up | KeyCode::Char('k') => move_cursor(app, -1),
        KeyCode::Down | KeyCode::Char('j') => move_cursor(app, 1),

        // Date / month navigation
        KeyCode::Left | KeyCode::Char('h') => step_left(app),
        KeyCode::Right | KeyCode::Char('l') => step_right(app),
        KeyCode::Char('g') => {
            let today = app.today();
            app.selected_date = today;
            app.calendar_month = (today.year(), today.month());
            app.clamp_cursors();
        }

        // Toggling
        KeyCode::Char(' ') | KeyCode::Enter => toggle_under_cursor(app),

        // Create / edit / delete
        KeyCode::Char('a') => open_add_form(app),
        KeyCode::Char('e') => open_edit_form(app),
        KeyCode::Char('x') | KeyCode::Delete => open_delete_confirm(app),

        // Timer and notices
        KeyCode::Char('t') => {
            if app.timer.running() {
                app.timer.stop();
            } else {
                app.timer.start();
            }
        }
        KeyCode::Char('n') => app.notices.clear(),

        _ => {}
    }
}

fn move_cursor(app: &mut App, delta: i32) {
    let len = match app.view {
        View::Day => app.day_tasks().len(),
        View::Routine => app.routine_items().len(),
        _ => return,
    };
    if len == 0 {
        return;
    }
    let cursor = match app.view {
        View::Day => &mut app.day_cursor,
        View::Routine => &mut app.routine_cursor,
        _ => return,
    };
    if delta < 0 {
        *cursor = cursor.saturating_sub(1);
    } else {
        *cursor = (*cursor + 1).min(len - 1);
    }
}

fn step_left(app: &mut App) {
    match app.view {
        View::Day | View::Routine => {
            if let Some(prev) = app.selected_date.pred_opt() {
                app.selected_date = prev;
                app.clamp_cursors();
            }
        }
        View::Calendar => {
            let (year, month) = app.calendar_month;
            app.calendar_month = if month == 1 {
                (year - 1, 12)
            } else {
                (year, month - 1)
            };
        }
        _ => {}
    }
}

fn step_right(app: &mut App) {
    match app.view {
        View::Day | View::Routine => {
            if let Some(next) = app.selected_date.succ_opt() {
                app.selected_date = next;
                app.clamp_cursors();
            }
        }
        View::Calendar => {
            let (year, month) = app.calendar_month;
            app.calendar_month = if month == 12 {
                (year + 1, 1)
            } else {
                (year, month + 1)
            };
        }
        _ => {}
    }
}

fn toggle_under_cursor(app: &mut App) {
    match app.view {
        View::Day => {
            let id = app.day_tasks().get(app.day_cursor).map(|t| t.id.clone());
            if let Some(id) = id {
                let _ = app.apply(Mutation::ToggleTask { id });
            }
        }
        View::Routine => {
            let id = app
                .routine_items()
                .get(app.routine_cursor)
                .map(|r| r.id.clone());
            if let Some(id) = id {
                let date = app.selected_date;
                let _ = app.apply(Mutation::ToggleRoutineItem { id, date });
            }
        }
        _ => {}
    }
}

fn open_add_form(app: &mut App) {
    match app.view {
        View::Routine => {
            app.mode = Mode::RoutineForm(RoutineForm {
                editing_id: None,
                activity: String::new(),
                category_idx: 0,
                start: "06:00".to_string(),
                end: "07:00".to_string(),
                field: 0,
            });
        }
        _ => {
            app.mode = Mode::TaskForm(TaskForm {
                title: String::new(),
                category_idx: 0,
                start: "09:00".to_string(),
                end: "10:00".to_string(),
                field: 0,
            });
        }
    }
}

fn open_edit_form(app: &mut App) {
    match app.view {
        View::Routine => {
            let item = app.routine_items().get(app.routine_cursor).cloned();
            if let Some(item) = item {
                let category_idx = RoutineCategory::ALL
                    .iter()
                    .position(|c| *c == item.category)
                    .unwrap_or(0);
                app.mode = Mode::RoutineForm(RoutineForm {
                    editing_id: Some(item.id),
                    activity: item.activity,
                    category_idx,
                    start: item.start_time,
                    end: item.end_time,
                    field: 0,
                });
            }
        }
        View::Profile => {
            let profile: UserProfile = app.store.aggregate().profile.clone();
            app.mode = Mode::ProfileForm(ProfileForm {
                name: profile.name,
                age: profile.age.to_string(),
                profession: profile.profession,
                goal: profile.goal,
                bio: profile.bio,
                field: 0,
            });
        }
        _ => {}
    }
}

fn open_delete_confirm(app: &mut App) {
    match app.view {
        View::Day => {
            let task = app
                .day_tasks()
                .get(app.day_cursor)
                .map(|t| (t.id.clone(), t.title.clone()));
            if let Some((id, title)) = task {
                app.mode = Mode::Confirm(ConfirmAction::DeleteTask { id, title });
            }
        }
        View::Routine => {
            let item = app
                .routine_items()
                .get(app.routine_cursor)
                .map(|r| (r.id.clone(), r.activity.clone()));
            if let Some((id, activity)) = item {
                app.mode = Mode::Confirm(ConfirmAction::DeleteRoutineItem { id, activity });
            }
        }
        _ => {}
    }
}

/// Category under a form's category_idx
pub fn task_category_at(idx: usize) -> Category {
    Category::ALL[idx % Category::ALL.len()]
}

pub fn routine_category_at(idx: usize) -> RoutineCategory {
    RoutineCategory::ALL[idx % RoutineCategory::ALL.len()]
}
