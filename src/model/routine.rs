use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Routine category (separate fixed set from task categories)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoutineCategory {
    Focus,
    Health,
    Break,
    Sleep,
    Work,
}

impl RoutineCategory {
    pub const ALL: [RoutineCategory; 5] = [
        RoutineCategory::Focus,
        RoutineCategory::Health,
        RoutineCategory::Break,
        RoutineCategory::Sleep,
        RoutineCategory::Work,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RoutineCategory::Focus => "Focus",
            RoutineCategory::Health => "Health",
            RoutineCategory::Break => "Break",
            RoutineCategory::Sleep => "Sleep",
            RoutineCategory::Work => "Work",
        }
    }

    pub fn parse(s: &str) -> Option<RoutineCategory> {
        RoutineCategory::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s))
    }
}

impl std::fmt::Display for RoutineCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A recurring daily habit checklist entry (not date-scoped)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineItem {
    pub id: String,
    /// Time of day, "HH:MM"
    pub start_time: String,
    /// Time of day, "HH:MM"
    pub end_time: String,
    pub activity: String,
    pub category: RoutineCategory,
}

/// Per-date completion record: date → routine item IDs checked that day.
/// Insertion order is preserved so the document stays diff-friendly.
pub type RoutineHistory = IndexMap<NaiveDate, Vec<String>>;

/// The routine a fresh workspace starts with
pub fn default_routine() -> Vec<RoutineItem> {
    let item = |id: &str, start: &str, end: &str, activity: &str, category| RoutineItem {
        id: id.into(),
        start_time: start.into(),
        end_time: end.into(),
        activity: activity.into(),
        category,
    };
    vec![
        item("r1", "07:00", "07:30", "Morning Routine", RoutineCategory::Health),
        item("r2", "09:00", "12:00", "Deep Work Block", RoutineCategory::Work),
        item("r3", "12:00", "13:00", "Lunch Break", RoutineCategory::Break),
        item("r4", "13:00", "17:00", "Afternoon Focus", RoutineCategory::Focus),
        item("r5", "18:00", "19:00", "Exercise", RoutineCategory::Health),
        item("r6", "22:00", "23:00", "Wind Down", RoutineCategory::Sleep),
    ]
}
