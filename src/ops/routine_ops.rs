use chrono::NaiveDate;

use crate::model::aggregate::Aggregate;
use crate::model::progress::{LevelChange, ROUTINE_XP};
use crate::model::routine::{RoutineCategory, RoutineItem};
use crate::ops::task_ops::is_valid_time;

/// Error type for routine operations
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RoutineError {
    #[error("routine item not found: {0}")]
    NotFound(String),
    #[error("activity name cannot be empty")]
    EmptyActivity,
    #[error("invalid time '{0}' (expected HH:MM)")]
    BadTime(String),
}

fn validate_time(s: &str) -> Result<(), RoutineError> {
    if is_valid_time(s) {
        Ok(())
    } else {
        Err(RoutineError::BadTime(s.to_string()))
    }
}

/// Add a routine item and re-sort the checklist by start time.
/// Returns the assigned ID.
pub fn add_routine_item(
    agg: &mut Aggregate,
    activity: String,
    category: RoutineCategory,
    start_time: String,
    end_time: String,
) -> Result<String, RoutineError> {
    let activity = activity.trim().to_string();
    if activity.is_empty() {
        return Err(RoutineError::EmptyActivity);
    }
    validate_time(&start_time)?;
    validate_time(&end_time)?;

    let id = agg.next_routine_id();
    agg.custom_routine.push(RoutineItem {
        id: id.clone(),
        start_time,
        end_time,
        activity,
        category,
    });
    sort_routine(agg);
    Ok(id)
}

/// Update an existing routine item in place, then re-sort.
pub fn update_routine_item(
    agg: &mut Aggregate,
    id: &str,
    activity: String,
    category: RoutineCategory,
    start_time: String,
    end_time: String,
) -> Result<(), RoutineError> {
    let activity = activity.trim().to_string();
    if activity.is_empty() {
        return Err(RoutineError::EmptyActivity);
    }
    validate_time(&start_time)?;
    validate_time(&end_time)?;

    let item = agg
        .custom_routine
        .iter_mut()
        .find(|r| r.id == id)
        .ok_or_else(|| RoutineError::NotFound(id.to_string()))?;
    item.activity = activity;
    item.category = category;
    item.start_time = start_time;
    item.end_time = end_time;
    sort_routine(agg);
    Ok(())
}

/// Remove a routine item from the checklist.
///
/// History entries referencing the removed ID are deliberately kept so the
/// historical completion record survives; day-level statistics skip IDs
/// that no longer resolve.
pub fn delete_routine_item(agg: &mut Aggregate, id: &str) -> Result<RoutineItem, RoutineError> {
    let idx = agg
        .custom_routine
        .iter()
        .position(|r| r.id == id)
        .ok_or_else(|| RoutineError::NotFound(id.to_string()))?;
    Ok(agg.custom_routine.remove(idx))
}

/// Toggle a routine item's completion for a date, applying the XP delta.
/// Returns the new checked state and any level boundary crossing.
pub fn toggle_routine_item(
    agg: &mut Aggregate,
    id: &str,
    date: NaiveDate,
) -> Result<(bool, LevelChange), RoutineError> {
    if agg.find_routine_item(id).is_none() {
        return Err(RoutineError::NotFound(id.to_string()));
    }

    let checked = agg.routine_history.entry(date).or_default();
    let now_checked = if let Some(pos) = checked.iter().position(|c| c == id) {
        checked.remove(pos);
        false
    } else {
        checked.push(id.to_string());
        true
    };

    let delta = if now_checked { ROUTINE_XP } else { -ROUTINE_XP };
    let change = agg.progress.apply(delta);
    Ok((now_checked, change))
}

fn sort_routine(agg: &mut Aggregate) {
    agg.custom_routine
        .sort_by(|a, b| a.start_time.cmp(&b.start_time));
}
