use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::profile::UserProfile;
use super::progress::Progress;
use super::routine::{RoutineHistory, RoutineItem, default_routine};
use super::task::Task;

/// The single per-workspace persisted record holding all application state.
/// Replaced whole on every mutation; there is no partial-update path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregate {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub routine_history: RoutineHistory,
    #[serde(default = "default_routine")]
    pub custom_routine: Vec<RoutineItem>,
    #[serde(flatten)]
    pub progress: Progress,
    #[serde(default)]
    pub profile: UserProfile,
}

impl Aggregate {
    /// The document a fresh workspace is seeded with
    pub fn seeded(today: NaiveDate) -> Self {
        Aggregate {
            tasks: Vec::new(),
            routine_history: RoutineHistory::default(),
            custom_routine: default_routine(),
            progress: Progress::default(),
            profile: UserProfile::seeded(today),
        }
    }

    pub fn find_task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn find_task_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    pub fn find_routine_item(&self, id: &str) -> Option<&RoutineItem> {
        self.custom_routine.iter().find(|r| r.id == id)
    }

    /// Next free task ID: highest numeric `T-` suffix plus one
    pub fn next_task_id(&self) -> String {
        format!("T-{:03}", next_id_number(self.tasks.iter().map(|t| t.id.as_str()), "T-"))
    }

    /// Next free routine item ID (the seeded defaults use `r1`..`r6`)
    pub fn next_routine_id(&self) -> String {
        format!(
            "r{}",
            next_id_number(self.custom_routine.iter().map(|r| r.id.as_str()), "r")
        )
    }

    pub fn completed_count(&self) -> u32 {
        self.tasks.iter().filter(|t| t.completed).count() as u32
    }

    /// Routine item IDs checked on a date (empty slice if none recorded)
    pub fn routine_completed_on(&self, date: NaiveDate) -> &[String] {
        self.routine_history
            .get(&date)
            .map(|ids| ids.as_slice())
            .unwrap_or(&[])
    }

    /// Tasks scheduled on a date, sorted by start time
    pub fn tasks_on(&self, date: NaiveDate) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self.tasks.iter().filter(|t| t.date == date).collect();
        tasks.sort_by(|a, b| a.start_time.cmp(&b.start_time));
        tasks
    }
}

impl Default for Aggregate {
    fn default() -> Self {
        Aggregate {
            tasks: Vec::new(),
            routine_history: RoutineHistory::default(),
            custom_routine: default_routine(),
            progress: Progress::default(),
            profile: UserProfile::default(),
        }
    }
}

/// Scan IDs for the highest numeric suffix after `prefix`, returning max + 1
fn next_id_number<'a>(ids: impl Iterator<Item = &'a str>, prefix: &str) -> usize {
    let mut max = 0usize;
    for id in ids {
        if let Some(num) = id.strip_prefix(prefix)
            && let Ok(n) = num.parse::<usize>()
            && n > max
        {
            max = n;
        }
    }
    max + 1
}
