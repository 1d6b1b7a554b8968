use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Task category (fixed set, shown as chart groups and list labels)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Work,
    Personal,
    Health,
    Learning,
    Urgent,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 5] = [
        Category::Work,
        Category::Personal,
        Category::Health,
        Category::Learning,
        Category::Urgent,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Work => "Work",
            Category::Personal => "Personal",
            Category::Health => "Health",
            Category::Learning => "Learning",
            Category::Urgent => "Urgent",
        }
    }

    /// Parse a category name (case-insensitive)
    pub fn parse(s: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Scheduling flavor of a task. Only one-off tasks occur in practice; the
/// tag is kept in the document for forward compatibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskType {
    #[default]
    OneOff,
    Daily,
    Weekly,
}

/// A dated, time-boxed to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub category: Category,
    /// Time of day, "HH:MM"
    pub start_time: String,
    /// Time of day, "HH:MM"
    pub end_time: String,
    pub completed: bool,
    pub date: NaiveDate,
    #[serde(rename = "type", default)]
    pub kind: TaskType,
}

impl Task {
    /// Create a new, incomplete one-off task
    pub fn new(
        id: String,
        title: String,
        category: Category,
        date: NaiveDate,
        start_time: String,
        end_time: String,
    ) -> Self {
        Task {
            id,
            title,
            category,
            start_time,
            end_time,
            completed: false,
            date,
            kind: TaskType::OneOff,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parse_is_case_insensitive() {
        assert_eq!(Category::parse("work"), Some(Category::Work));
        assert_eq!(Category::parse("URGENT"), Some(Category::Urgent));
        assert_eq!(Category::parse("chores"), None);
    }

    #[test]
    fn task_serializes_with_document_field_names() {
        let task = Task::new(
            "T-001".into(),
            "Write report".into(),
            Category::Work,
            NaiveDate::from_ymd_opt(2026, 8, 7).unwrap(),
            "09:00".into(),
            "10:00".into(),
        );
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["startTime"], "09:00");
        assert_eq!(json["endTime"], "10:00");
        assert_eq!(json["category"], "Work");
        assert_eq!(json["type"], "one-off");
        assert_eq!(json["date"], "2026-08-07");
    }

    #[test]
    fn task_type_defaults_to_one_off_when_absent() {
        let json = r#"{
            "id": "T-001",
            "title": "x",
            "category": "Health",
            "startTime": "07:00",
            "endTime": "07:30",
            "completed": true,
            "date": "2026-01-02"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.kind, TaskType::OneOff);
        assert!(task.completed);
    }
}
