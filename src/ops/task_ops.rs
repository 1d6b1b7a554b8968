use chrono::NaiveDate;
use regex::Regex;

use crate::model::aggregate::Aggregate;
use crate::model::progress::{LevelChange, TASK_XP};
use crate::model::task::{Category, Task, TaskType};

/// Error type for task operations
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TaskError {
    #[error("task not found: {0}")]
    NotFound(String),
    #[error("task title cannot be empty")]
    EmptyTitle,
    #[error("invalid time '{0}' (expected HH:MM)")]
    BadTime(String),
    #[error("a task on {date} already starts at {start}")]
    DuplicateStart { date: NaiveDate, start: String },
}

/// Check a time-of-day string ("HH:MM", 24-hour, zero-padded)
pub fn is_valid_time(s: &str) -> bool {
    let re = Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").unwrap();
    re.is_match(s)
}

fn validate_time(s: &str) -> Result<(), TaskError> {
    if is_valid_time(s) {
        Ok(())
    } else {
        Err(TaskError::BadTime(s.to_string()))
    }
}

/// Add a task. Returns the assigned ID.
///
/// Duplicate start times on the same date are rejected here, client-side;
/// the storage layer does not enforce this.
pub fn add_task(
    agg: &mut Aggregate,
    title: String,
    category: Category,
    date: NaiveDate,
    start_time: String,
    end_time: String,
    kind: TaskType,
) -> Result<String, TaskError> {
    let title = title.trim().to_string();
    if title.is_empty() {
        return Err(TaskError::EmptyTitle);
    }
    validate_time(&start_time)?;
    validate_time(&end_time)?;
    if agg
        .tasks
        .iter()
        .any(|t| t.date == date && t.start_time == start_time)
    {
        return Err(TaskError::DuplicateStart {
            date,
            start: start_time,
        });
    }

    let id = agg.next_task_id();
    let mut task = Task::new(id.clone(), title, category, date, start_time, end_time);
    task.kind = kind;
    agg.tasks.push(task);
    Ok(id)
}

/// Toggle a task's completed flag, applying the XP delta.
/// Returns the new completed state and any level boundary crossing.
pub fn toggle_task(agg: &mut Aggregate, id: &str) -> Result<(bool, LevelChange), TaskError> {
    let task = agg
        .find_task_mut(id)
        .ok_or_else(|| TaskError::NotFound(id.to_string()))?;
    task.completed = !task.completed;
    let delta = if task.completed { TASK_XP } else { -TASK_XP };
    let completed = task.completed;
    let change = agg.progress.apply(delta);
    Ok((completed, change))
}

/// Remove a task permanently. Completed-task XP is not clawed back.
pub fn delete_task(agg: &mut Aggregate, id: &str) -> Result<Task, TaskError> {
    let idx = agg
        .tasks
        .iter()
        .position(|t| t.id == id)
        .ok_or_else(|| TaskError::NotFound(id.to_string()))?;
    Ok(agg.tasks.remove(idx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::progress::Progress;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn add(agg: &mut Aggregate, title: &str, d: NaiveDate, start: &str) -> Result<String, TaskError> {
        add_task(
            agg,
            title.into(),
            Category::Work,
            d,
            start.into(),
            "23:00".into(),
            TaskType::OneOff,
        )
    }

    #[test]
    fn add_assigns_sequential_ids() {
        let mut agg = Aggregate::default();
        let d = date(2026, 8, 7);
        assert_eq!(add(&mut agg, "one", d, "09:00").unwrap(), "T-001");
        assert_eq!(add(&mut agg, "two", d, "10:00").unwrap(), "T-002");
    }

    #[test]
    fn add_rejects_empty_title() {
        let mut agg = Aggregate::default();
        let err = add(&mut agg, "   ", date(2026, 8, 7), "09:00");
        assert_eq!(err, Err(TaskError::EmptyTitle));
    }

    #[test]
    fn add_rejects_malformed_times() {
        let mut agg = Aggregate::default();
        let d = date(2026, 8, 7);
        for bad in ["9:00", "24:00", "09:60", "0900", "morning"] {
            let err = add_task(
                &mut agg,
                "x".into(),
                Category::Work,
                d,
                bad.into(),
                "10:00".into(),
                TaskType::OneOff,
            );
            assert_eq!(err, Err(TaskError::BadTime(bad.into())), "time: {}", bad);
        }
    }

    #[test]
    fn add_rejects_duplicate_start_on_same_date() {
        let mut agg = Aggregate::default();
        let d = date(2026, 8, 7);
        add(&mut agg, "one", d, "09:00").unwrap();
        let err = add(&mut agg, "two", d, "09:00");
        assert_eq!(
            err,
            Err(TaskError::DuplicateStart {
                date: d,
                start: "09:00".into()
            })
        );
        // Same start on a different date is fine
        assert!(add(&mut agg, "three", date(2026, 8, 8), "09:00").is_ok());
    }

    #[test]
    fn toggle_awards_and_revokes_xp() {
        let mut agg = Aggregate::default();
        let d = date(2026, 8, 7);
        let id = add(&mut agg, "one", d, "09:00").unwrap();

        let (completed, change) = toggle_task(&mut agg, &id).unwrap();
        assert!(completed);
        assert_eq!(change, LevelChange::None);
        assert_eq!(agg.progress, Progress { xp: 20, level: 1 });

        let (completed, _) = toggle_task(&mut agg, &id).unwrap();
        assert!(!completed);
        assert_eq!(agg.progress, Progress { xp: 0, level: 1 });
    }

    #[test]
    fn toggle_crossing_threshold_signals_level_up() {
        let mut agg = Aggregate::default();
        agg.progress = Progress { xp: 90, level: 1 };
        let id = add(&mut agg, "one", date(2026, 8, 7), "09:00").unwrap();
        let (_, change) = toggle_task(&mut agg, &id).unwrap();
        assert_eq!(change, LevelChange::LevelUp);
        assert_eq!(agg.progress, Progress { xp: 10, level: 2 });
    }

    #[test]
    fn toggle_unknown_id_errors() {
        let mut agg = Aggregate::default();
        assert_eq!(
            toggle_task(&mut agg, "T-999"),
            Err(TaskError::NotFound("T-999".into()))
        );
    }

    #[test]
    fn delete_removes_without_touching_progress() {
        let mut agg = Aggregate::default();
        let id = add(&mut agg, "one", date(2026, 8, 7), "09:00").unwrap();
        toggle_task(&mut agg, &id).unwrap();
        let removed = delete_task(&mut agg, &id).unwrap();
        assert_eq!(removed.id, id);
        assert!(agg.tasks.is_empty());
        assert_eq!(agg.progress, Progress { xp: 20, level: 1 });
    }
}
