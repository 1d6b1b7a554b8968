use std::collections::HashSet;

use chrono::NaiveDate;

use crate::model::routine::{RoutineHistory, RoutineItem};
use crate::model::task::{Category, Task};

/// Engagement statistics derived from the task collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreakSummary {
    /// Consecutive days ending today (or yesterday) with a completion
    pub current_streak: u32,
    /// Longest run of calendar-consecutive completion dates ever
    pub longest_streak: u32,
    /// Total completed task count
    pub total_contributions: u32,
}

/// Compute streaks over the task collection. Pure and total.
///
/// A run continues only across a gap of exactly one day. The current streak
/// anchors at `today` if it has a completion, else at yesterday, else it is 0.
pub fn streaks(tasks: &[Task], today: NaiveDate) -> StreakSummary {
    let completed: Vec<&Task> = tasks.iter().filter(|t| t.completed).collect();
    let total_contributions = completed.len() as u32;

    let mut dates: Vec<NaiveDate> = completed.iter().map(|t| t.date).collect();
    dates.sort();
    dates.dedup();

    if dates.is_empty() {
        return StreakSummary::default();
    }

    // Longest: walk the sorted distinct dates, resetting on any gap != 1 day
    let mut longest = 1u32;
    let mut run = 1u32;
    for pair in dates.windows(2) {
        if Some(pair[1]) == pair[0].succ_opt() {
            run += 1;
        } else {
            run = 1;
        }
        longest = longest.max(run);
    }

    // Current: count backward from the anchor day
    let date_set: HashSet<NaiveDate> = dates.iter().copied().collect();
    let anchor = if date_set.contains(&today) {
        Some(today)
    } else {
        today.pred_opt().filter(|y| date_set.contains(y))
    };

    let mut current = 0u32;
    let mut day = anchor;
    while let Some(d) = day {
        if !date_set.contains(&d) {
            break;
        }
        current += 1;
        day = d.pred_opt();
    }

    StreakSummary {
        current_streak: current,
        longest_streak: longest,
        total_contributions,
    }
}

/// Per-category task totals (categories with no tasks are omitted)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryStat {
    pub category: Category,
    pub total: u32,
    pub completed: u32,
}

pub fn by_category(tasks: &[Task]) -> Vec<CategoryStat> {
    Category::ALL
        .into_iter()
        .map(|category| {
            let in_cat = tasks.iter().filter(|t| t.category == category);
            let (mut total, mut completed) = (0u32, 0u32);
            for t in in_cat {
                total += 1;
                if t.completed {
                    completed += 1;
                }
            }
            CategoryStat {
                category,
                total,
                completed,
            }
        })
        .filter(|s| s.total > 0)
        .collect()
}

/// Routine completion for one day. Orphaned history IDs (items since
/// deleted) stay in the document but do not count here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayCompletion {
    pub completed: u32,
    pub total: u32,
}

impl DayCompletion {
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            0
        } else {
            (self.completed * 100 + self.total / 2) / self.total
        }
    }
}

pub fn routine_day_completion(
    routine: &[RoutineItem],
    history: &RoutineHistory,
    date: NaiveDate,
) -> DayCompletion {
    let checked = history.get(&date);
    let completed = routine
        .iter()
        .filter(|item| checked.is_some_and(|ids| ids.contains(&item.id)))
        .count() as u32;
    DayCompletion {
        completed,
        total: routine.len() as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::routine::default_routine;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn completed_on(dates: &[NaiveDate]) -> Vec<Task> {
        dates
            .iter()
            .enumerate()
            .map(|(i, d)| {
                let mut t = Task::new(
                    format!("T-{:03}", i + 1),
                    "x".into(),
                    Category::Work,
                    *d,
                    "09:00".into(),
                    "10:00".into(),
                );
                t.completed = true;
                t
            })
            .collect()
    }

    #[test]
    fn empty_input_yields_all_zero() {
        let today = date(2026, 8, 7);
        assert_eq!(streaks(&[], today), StreakSummary::default());
    }

    #[test]
    fn incomplete_tasks_do_not_contribute() {
        let today = date(2026, 8, 7);
        let mut tasks = completed_on(&[today]);
        tasks[0].completed = false;
        assert_eq!(streaks(&tasks, today), StreakSummary::default());
    }

    #[test]
    fn single_completion_date_yields_longest_one() {
        let today = date(2026, 8, 7);
        let tasks = completed_on(&[date(2024, 3, 15)]);
        let s = streaks(&tasks, today);
        assert_eq!(s.longest_streak, 1);
        assert_eq!(s.current_streak, 0);
        assert_eq!(s.total_contributions, 1);
    }

    #[test]
    fn historical_run_counts_for_longest_not_current() {
        // Non-today run of three consecutive days
        let today = date(2026, 8, 7);
        let tasks = completed_on(&[date(2024, 1, 1), date(2024, 1, 2), date(2024, 1, 3)]);
        let s = streaks(&tasks, today);
        assert_eq!(s.longest_streak, 3);
        assert_eq!(s.current_streak, 0);
        assert_eq!(s.total_contributions, 3);
    }

    #[test]
    fn gaps_reset_the_running_counter_independently() {
        let today = date(2026, 8, 7);
        let tasks = completed_on(&[
            date(2024, 1, 1),
            date(2024, 1, 2),
            date(2024, 1, 10),
            date(2024, 1, 11),
            date(2024, 1, 12),
            date(2024, 1, 13),
            date(2024, 2, 1),
        ]);
        assert_eq!(streaks(&tasks, today).longest_streak, 4);
    }

    #[test]
    fn current_streak_anchors_at_today() {
        let today = date(2026, 8, 7);
        let tasks = completed_on(&[date(2026, 8, 5), date(2026, 8, 6), today]);
        let s = streaks(&tasks, today);
        assert_eq!(s.current_streak, 3);
        assert_eq!(s.longest_streak, 3);
    }

    #[test]
    fn current_streak_anchors_at_yesterday_without_today() {
        let today = date(2026, 8, 7);
        let tasks = completed_on(&[date(2026, 8, 4), date(2026, 8, 5), date(2026, 8, 6)]);
        assert_eq!(streaks(&tasks, today).current_streak, 3);
    }

    #[test]
    fn two_days_ago_does_not_anchor() {
        let today = date(2026, 8, 7);
        let tasks = completed_on(&[date(2026, 8, 5)]);
        assert_eq!(streaks(&tasks, today).current_streak, 0);
    }

    #[test]
    fn duplicate_dates_count_once_for_streaks_but_all_for_total() {
        let today = date(2026, 8, 7);
        let tasks = completed_on(&[today, today, today]);
        let s = streaks(&tasks, today);
        assert_eq!(s.current_streak, 1);
        assert_eq!(s.longest_streak, 1);
        assert_eq!(s.total_contributions, 3);
    }

    #[test]
    fn by_category_omits_empty_categories() {
        let today = date(2026, 8, 7);
        let mut tasks = completed_on(&[today]);
        tasks.push(Task::new(
            "T-100".into(),
            "read".into(),
            Category::Learning,
            today,
            "20:00".into(),
            "21:00".into(),
        ));
        let stats = by_category(&tasks);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].category, Category::Work);
        assert_eq!(stats[0].completed, 1);
        assert_eq!(stats[1].category, Category::Learning);
        assert_eq!(stats[1].completed, 0);
    }

    #[test]
    fn day_completion_ignores_orphaned_history_ids() {
        let routine = default_routine();
        let mut history = RoutineHistory::default();
        let d = date(2026, 8, 7);
        history.insert(d, vec!["r1".into(), "deleted-item".into()]);
        let dc = routine_day_completion(&routine, &history, d);
        assert_eq!(dc.completed, 1);
        assert_eq!(dc.total, 6);
        assert_eq!(dc.percent(), 17);
    }

    #[test]
    fn day_completion_empty_routine_is_zero_percent() {
        let dc = routine_day_completion(&[], &RoutineHistory::default(), date(2026, 8, 7));
        assert_eq!(dc.percent(), 0);
    }
}
