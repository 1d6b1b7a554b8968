use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::model::aggregate::Aggregate;
use crate::model::profile::{ProfileError, UserProfile};
use crate::model::progress::LevelChange;
use crate::model::routine::RoutineCategory;
use crate::model::task::{Category, TaskType};
use crate::ops::routine_ops::{self, RoutineError};
use crate::ops::task_ops::{self, TaskError};
use crate::store::document::{self, DocumentError};
use crate::store::journal;

/// A local state change. Every variant maps to one whole-document persist.
#[derive(Debug, Clone)]
pub enum Mutation {
    AddTask {
        title: String,
        category: Category,
        date: NaiveDate,
        start_time: String,
        end_time: String,
        kind: TaskType,
    },
    ToggleTask {
        id: String,
    },
    DeleteTask {
        id: String,
    },
    AddRoutineItem {
        activity: String,
        category: RoutineCategory,
        start_time: String,
        end_time: String,
    },
    UpdateRoutineItem {
        id: String,
        activity: String,
        category: RoutineCategory,
        start_time: String,
        end_time: String,
    },
    DeleteRoutineItem {
        id: String,
    },
    ToggleRoutineItem {
        id: String,
        date: NaiveDate,
    },
    SetProfile(UserProfile),
}

/// What a successfully applied mutation produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    TaskAdded { id: String },
    TaskToggled { completed: bool, change: LevelChange },
    TaskDeleted,
    RoutineAdded { id: String },
    RoutineUpdated,
    RoutineDeleted,
    RoutineToggled { checked: bool, change: LevelChange },
    ProfileSet,
}

impl Applied {
    /// Level boundary crossing, if this mutation produced one
    pub fn level_change(&self) -> LevelChange {
        match self {
            Applied::TaskToggled { change, .. } | Applied::RoutineToggled { change, .. } => *change,
            _ => LevelChange::None,
        }
    }
}

/// Error type for rejected mutations (validation, unknown IDs)
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MutationError {
    #[error(transparent)]
    Task(#[from] TaskError),
    #[error(transparent)]
    Routine(#[from] RoutineError),
    #[error(transparent)]
    Profile(#[from] ProfileError),
}

/// Unidirectional state store over the aggregate document.
///
/// Exactly two transitions exist: `apply_remote` adopts a snapshot pushed
/// from disk wholesale, and `apply_local` validates a mutation, applies it
/// optimistically in memory, then best-effort persists the whole document.
/// A failed persist is journaled and swallowed; in-memory state is kept.
/// Last write wins at whole-document granularity.
pub struct Store {
    workspace_dir: PathBuf,
    aggregate: Aggregate,
    /// Set when the most recent persist failed (cleared by the next success)
    pub write_failed: bool,
}

impl Store {
    /// Open the store for a workspace, seeding the document if absent.
    /// Returns the store and whether a seed write happened.
    pub fn open(workspace_dir: &Path, today: NaiveDate) -> Result<(Self, bool), DocumentError> {
        let (aggregate, seeded) = document::load_or_seed(workspace_dir, today)?;
        Ok((
            Store {
                workspace_dir: workspace_dir.to_path_buf(),
                aggregate,
                write_failed: false,
            },
            seeded,
        ))
    }

    pub fn workspace_dir(&self) -> &Path {
        &self.workspace_dir
    }

    pub fn aggregate(&self) -> &Aggregate {
        &self.aggregate
    }

    /// Adopt a remote snapshot wholesale (the subscription push path)
    pub fn apply_remote(&mut self, snapshot: Aggregate) {
        self.aggregate = snapshot;
    }

    /// Re-read the document from disk and adopt it if it parses.
    /// Returns whether a snapshot was applied.
    pub fn reload(&mut self) -> bool {
        match document::load(&self.workspace_dir) {
            Ok(Some(snapshot)) => {
                self.apply_remote(snapshot);
                true
            }
            Ok(None) => false,
            Err(e) => {
                journal::log_event(
                    &self.workspace_dir,
                    journal::JournalEntry {
                        timestamp: chrono::Utc::now(),
                        category: journal::JournalCategory::Sync,
                        description: "could not reload document".to_string(),
                        fields: vec![("Error".to_string(), e.to_string())],
                        body: String::new(),
                    },
                );
                false
            }
        }
    }

    /// Validate and apply a local mutation, then persist best-effort.
    pub fn apply_local(&mut self, mutation: Mutation) -> Result<Applied, MutationError> {
        let applied = self.reduce(mutation)?;
        self.persist();
        Ok(applied)
    }

    fn reduce(&mut self, mutation: Mutation) -> Result<Applied, MutationError> {
        let agg = &mut self.aggregate;
        match mutation {
            Mutation::AddTask {
                title,
                category,
                date,
                start_time,
                end_time,
                kind,
            } => {
                let id = task_ops::add_task(agg, title, category, date, start_time, end_time, kind)?;
                Ok(Applied::TaskAdded { id })
            }
            Mutation::ToggleTask { id } => {
                let (completed, change) = task_ops::toggle_task(agg, &id)?;
                Ok(Applied::TaskToggled { completed, change })
            }
            Mutation::DeleteTask { id } => {
                task_ops::delete_task(agg, &id)?;
                Ok(Applied::TaskDeleted)
            }
            Mutation::AddRoutineItem {
                activity,
                category,
                start_time,
                end_time,
            } => {
                let id =
                    routine_ops::add_routine_item(agg, activity, category, start_time, end_time)?;
                Ok(Applied::RoutineAdded { id })
            }
            Mutation::UpdateRoutineItem {
                id,
                activity,
                category,
                start_time,
                end_time,
            } => {
                routine_ops::update_routine_item(agg, &id, activity, category, start_time, end_time)?;
                Ok(Applied::RoutineUpdated)
            }
            Mutation::DeleteRoutineItem { id } => {
                routine_ops::delete_routine_item(agg, &id)?;
                Ok(Applied::RoutineDeleted)
            }
            Mutation::ToggleRoutineItem { id, date } => {
                let (checked, change) = routine_ops::toggle_routine_item(agg, &id, date)?;
                Ok(Applied::RoutineToggled { checked, change })
            }
            Mutation::SetProfile(profile) => {
                profile.validate()?;
                agg.profile = profile;
                Ok(Applied::ProfileSet)
            }
        }
    }

    /// Persist the whole document. On failure, journal and keep going;
    /// the optimistic in-memory state is not rolled back.
    fn persist(&mut self) {
        match document::save(&self.workspace_dir, &self.aggregate) {
            Ok(()) => {
                self.write_failed = false;
            }
            Err(e) => {
                self.write_failed = true;
                let body = serde_json::to_string_pretty(&self.aggregate).unwrap_or_default();
                journal::log_write_failure(&self.workspace_dir, &e, &body);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::progress::Progress;
    use crate::store::document::load;
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
    }

    fn add_task_mutation(title: &str, start: &str) -> Mutation {
        Mutation::AddTask {
            title: title.into(),
            category: Category::Work,
            date: today(),
            start_time: start.into(),
            end_time: "23:00".into(),
            kind: TaskType::OneOff,
        }
    }

    #[test]
    fn open_seeds_a_fresh_workspace_once() {
        let tmp = TempDir::new().unwrap();
        let (_store, seeded) = Store::open(tmp.path(), today()).unwrap();
        assert!(seeded);
        let (_store, seeded) = Store::open(tmp.path(), today()).unwrap();
        assert!(!seeded);
    }

    #[test]
    fn local_mutation_is_applied_and_persisted() {
        let tmp = TempDir::new().unwrap();
        let (mut store, _) = Store::open(tmp.path(), today()).unwrap();

        let applied = store.apply_local(add_task_mutation("Write report", "09:00")).unwrap();
        assert_eq!(applied, Applied::TaskAdded { id: "T-001".into() });
        assert!(!store.write_failed);

        // The document on disk already has the task
        let on_disk = load(tmp.path()).unwrap().unwrap();
        assert_eq!(on_disk.tasks.len(), 1);
        assert_eq!(on_disk.tasks[0].title, "Write report");
    }

    #[test]
    fn rejected_mutation_leaves_state_and_disk_untouched() {
        let tmp = TempDir::new().unwrap();
        let (mut store, _) = Store::open(tmp.path(), today()).unwrap();
        store.apply_local(add_task_mutation("one", "09:00")).unwrap();

        let err = store.apply_local(add_task_mutation("two", "09:00"));
        assert!(matches!(
            err,
            Err(MutationError::Task(TaskError::DuplicateStart { .. }))
        ));
        assert_eq!(store.aggregate().tasks.len(), 1);
        assert_eq!(load(tmp.path()).unwrap().unwrap().tasks.len(), 1);
    }

    #[test]
    fn toggle_carries_level_change_signal() {
        let tmp = TempDir::new().unwrap();
        let (mut store, _) = Store::open(tmp.path(), today()).unwrap();
        store.apply_local(add_task_mutation("one", "09:00")).unwrap();

        // Pre-load XP so the toggle crosses the boundary
        let mut snapshot = store.aggregate().clone();
        snapshot.progress = Progress { xp: 90, level: 1 };
        store.apply_remote(snapshot);

        let applied = store
            .apply_local(Mutation::ToggleTask { id: "T-001".into() })
            .unwrap();
        assert_eq!(applied.level_change(), LevelChange::LevelUp);
        assert_eq!(store.aggregate().progress, Progress { xp: 10, level: 2 });
    }

    #[test]
    fn apply_remote_replaces_wholesale_and_last_write_wins() {
        let tmp = TempDir::new().unwrap();
        let (mut store, _) = Store::open(tmp.path(), today()).unwrap();
        store.apply_local(add_task_mutation("mine", "09:00")).unwrap();

        // A remote snapshot without the task wins in memory...
        store.apply_remote(Aggregate::seeded(today()));
        assert!(store.aggregate().tasks.is_empty());

        // ...and the next local mutation persists the remote-derived state
        store.apply_local(add_task_mutation("theirs", "10:00")).unwrap();
        let on_disk = load(tmp.path()).unwrap().unwrap();
        assert_eq!(on_disk.tasks.len(), 1);
        assert_eq!(on_disk.tasks[0].title, "theirs");
    }

    #[test]
    fn reload_picks_up_external_edits() {
        let tmp = TempDir::new().unwrap();
        let (mut store, _) = Store::open(tmp.path(), today()).unwrap();

        // Simulate another process replacing the document
        let mut external = Aggregate::seeded(today());
        external.progress = Progress { xp: 55, level: 4 };
        document::save(tmp.path(), &external).unwrap();

        assert!(store.reload());
        assert_eq!(store.aggregate().progress, Progress { xp: 55, level: 4 });
    }

    #[test]
    fn reload_with_corrupt_document_keeps_state_and_journals() {
        let tmp = TempDir::new().unwrap();
        let (mut store, _) = Store::open(tmp.path(), today()).unwrap();
        store.apply_local(add_task_mutation("keep me", "09:00")).unwrap();

        std::fs::write(document::document_path(tmp.path()), "garbage").unwrap();
        assert!(!store.reload());
        assert_eq!(store.aggregate().tasks.len(), 1);

        let entries = journal::read_entries(tmp.path(), None);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].category, journal::JournalCategory::Sync);
    }

    #[test]
    fn invalid_profile_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let (mut store, _) = Store::open(tmp.path(), today()).unwrap();
        let mut profile = UserProfile::default();
        profile.age = 12;
        let err = store.apply_local(Mutation::SetProfile(profile));
        assert!(matches!(err, Err(MutationError::Profile(ProfileError::AgeRange(12)))));
    }
}
