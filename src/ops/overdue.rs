use chrono::NaiveDate;

use crate::model::task::Task;

/// Tasks scheduled today whose end time has passed without completion.
/// `now` is a "HH:MM" time of day; zero-padded times compare lexically.
pub fn overdue_tasks<'a>(tasks: &'a [Task], today: NaiveDate, now: &str) -> Vec<&'a Task> {
    let mut overdue: Vec<&Task> = tasks
        .iter()
        .filter(|t| !t.completed && t.date == today && t.end_time.as_str() < now)
        .collect();
    overdue.sort_by(|a, b| a.end_time.cmp(&b.end_time));
    overdue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::Category;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task(id: &str, d: NaiveDate, end: &str, completed: bool) -> Task {
        let mut t = Task::new(
            id.into(),
            format!("task {}", id),
            Category::Work,
            d,
            "08:00".into(),
            end.into(),
        );
        t.completed = completed;
        t
    }

    #[test]
    fn finds_incomplete_past_end_time_today() {
        let today = date(2026, 8, 7);
        let tasks = vec![
            task("T-001", today, "09:00", false),
            task("T-002", today, "14:00", false),
            task("T-003", today, "09:30", true),
            task("T-004", date(2026, 8, 6), "09:00", false),
        ];
        let overdue: Vec<&str> = overdue_tasks(&tasks, today, "12:00")
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(overdue, vec!["T-001"]);
    }

    #[test]
    fn end_time_equal_to_now_is_not_overdue() {
        let today = date(2026, 8, 7);
        let tasks = vec![task("T-001", today, "12:00", false)];
        assert!(overdue_tasks(&tasks, today, "12:00").is_empty());
    }

    #[test]
    fn sorted_by_end_time() {
        let today = date(2026, 8, 7);
        let tasks = vec![
            task("T-001", today, "11:00", false),
            task("T-002", today, "09:00", false),
        ];
        let overdue: Vec<&str> = overdue_tasks(&tasks, today, "12:00")
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(overdue, vec!["T-002", "T-001"]);
    }
}
