use crossterm::event::{KeyCode, KeyEvent};

use crate::model::profile::UserProfile;
use crate::store::store::Mutation;
use crate::model::task::TaskType;
use crate::tui::app::{App, Mode, ProfileForm, RoutineForm, TaskForm};

use super::navigate::{routine_category_at, task_category_at};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.mode = Mode::Navigate;
            app.status_error = None;
            return;
        }
        KeyCode::Enter => {
            if on_last_field(app) {
                submit(app);
                return;
            }
            step_field(app, 1);
            return;
        }
        KeyCode::Tab | KeyCode::Down => {
            step_field(app, 1);
            return;
        }
        KeyCode::BackTab | KeyCode::Up => {
            step_field(app, -1);
            return;
        }
        _ => {}
    }

    match &mut app.mode {
        Mode::TaskForm(form) => edit_task_field(form, key.code),
        Mode::RoutineForm(form) => edit_routine_field(form, key.code),
        Mode::ProfileForm(form) => edit_profile_field(form, key.code),
        _ => {}
    }
}

fn field_count(mode: &Mode) -> usize {
    match mode {
        Mode::TaskForm(_) | Mode::RoutineForm(_) => 4,
        Mode::ProfileForm(_) => 5,
        _ => 0,
    }
}

fn on_last_field(app: &App) -> bool {
    let count = field_count(&app.mode);
    let field = match &app.mode {
        Mode::TaskForm(f) => f.field,
        Mode::RoutineForm(f) => f.field,
        Mode::ProfileForm(f) => f.field,
        _ => return false,
    };
    count > 0 && field + 1 == count
}

fn step_field(app: &mut App, delta: i32) {
    let count = field_count(&app.mode);
    if count == 0 {
        return;
    }
    let field = match &mut app.mode {
        Mode::TaskForm(f) => &mut f.field,
        Mode::RoutineForm(f) => &mut f.field,
        Mode::ProfileForm(f) => &mut f.field,
        _ => return,
    };
    if delta < 0 {
        *field = (*field + count - 1) % count;
    } else {
        *field = (*field + 1) % count;
    }
}

// ---------------------------------------------------------------------------
// Field editing
// ---------------------------------------------------------------------------

fn edit_text(text: &mut String, code: KeyCode) {
    match code {
        KeyCode::Char(c) => text.push(c),
        KeyCode::Backspace => {
            text.pop();
        }
        _ => {}
    }
}

fn edit_task_field(form: &mut TaskForm, code: KeyCode) {
    match form.field {
        0 => edit_text(&mut form.title, code),
        // Category cycles with left/right
        1 => match code {
            KeyCode::Left => form.category_idx = (form.category_idx + 4) % 5,
            KeyCode::Right | KeyCode::Char(' ') => form.category_idx = (form.category_idx + 1) % 5,
            _ => {}
        },
        2 => edit_text(&mut form.start, code),
        _ => edit_text(&mut form.end, code),
    }
}

fn edit_routine_field(form: &mut RoutineForm, code: KeyCode) {
    match form.field {
        0 => edit_text(&mut form.activity, code),
        1 => match code {
            KeyCode::Left => form.category_idx = (form.category_idx + 4) % 5,
            KeyCode::Right | KeyCode::Char(' ') => form.category_idx = (form.category_idx + 1) % 5,
            _ => {}
        },
        2 => edit_text(&mut form.start, code),
        _ => edit_text(&mut form.end, code),
    }
}

fn edit_profile_field(form: &mut ProfileForm, code: KeyCode) {
    let text = match form.field {
        0 => &mut form.name,
        1 => &mut form.age,
        2 => &mut form.profession,
        3 => &mut form.goal,
        _ => &mut form.bio,
    };
    edit_text(text, code);
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

fn submit(app: &mut App) {
    // Take the form out of the mode so the store can be borrowed mutably
    let mode = std::mem::replace(&mut app.mode, Mode::Navigate);
    match mode {
        Mode::TaskForm(form) => {
            let mutation = Mutation::AddTask {
                title: form.title.clone(),
                category: task_category_at(form.category_idx),
                date: app.selected_date,
                start_time: form.start.clone(),
                end_time: form.end.clone(),
                kind: TaskType::OneOff,
            };
            if app.apply(mutation).is_none() {
                // Validation failed: reopen the form so input is not lost
                app.mode = Mode::TaskForm(form);
            }
        }
        Mode::RoutineForm(form) => {
            let mutation = match &form.editing_id {
                Some(id) => Mutation::UpdateRoutineItem {
                    id: id.clone(),
                    activity: form.activity.clone(),
                    category: routine_category_at(form.category_idx),
                    start_time: form.start.clone(),
                    end_time: form.end.clone(),
                },
                None => Mutation::AddRoutineItem {
                    activity: form.activity.clone(),
                    category: routine_category_at(form.category_idx),
                    start_time: form.start.clone(),
                    end_time: form.end.clone(),
                },
            };
            if app.apply(mutation).is_none() {
                app.mode = Mode::RoutineForm(form);
            }
        }
        Mode::ProfileForm(form) => {
            let age = match form.age.trim().parse::<u32>() {
                Ok(age) => age,
                Err(_) => {
                    app.status_error = Some(format!("invalid age '{}'", form.age));
                    app.mode = Mode::ProfileForm(form);
                    return;
                }
            };
            let current = app.store.aggregate().profile.clone();
            let profile = UserProfile {
                name: form.name.trim().to_string(),
                age,
                profession: form.profession.trim().to_string(),
                goal: form.goal.trim().to_string(),
                bio: form.bio.trim().to_string(),
                joined: current.joined,
            };
            if app.apply(Mutation::SetProfile(profile)).is_none() {
                app.mode = Mode::ProfileForm(form);
            }
        }
        other => app.mode = other,
    }
}
