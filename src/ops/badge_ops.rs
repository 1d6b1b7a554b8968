use chrono::NaiveDate;

use crate::model::aggregate::Aggregate;
use crate::model::badge::{BADGE_CATALOG, BadgeSpec, MetricSet};
use crate::ops::stats;

/// A catalog badge with its recomputed unlock state
#[derive(Debug, Clone, Copy)]
pub struct BadgeStatus {
    pub spec: &'static BadgeSpec,
    pub unlocked: bool,
}

/// Compute the derived metrics the badge conditions read
pub fn metrics(agg: &Aggregate, today: NaiveDate) -> MetricSet {
    let summary = stats::streaks(&agg.tasks, today);
    MetricSet {
        completed_tasks: agg.completed_count(),
        level: agg.progress.level,
        lifetime_xp: agg.progress.lifetime_xp(),
        current_streak: summary.current_streak,
        longest_streak: summary.longest_streak,
    }
}

/// Evaluate every catalog badge, sorted unlocked-first with catalog order
/// preserved within each group.
pub fn evaluate(agg: &Aggregate, today: NaiveDate) -> Vec<BadgeStatus> {
    let metrics = metrics(agg, today);
    let mut statuses: Vec<BadgeStatus> = BADGE_CATALOG
        .iter()
        .map(|spec| BadgeStatus {
            spec,
            unlocked: spec.unlocked(&metrics),
        })
        .collect();
    statuses.sort_by_key(|s| !s.unlocked);
    statuses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::progress::Progress;
    use crate::model::task::{Category, Task};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn agg_with_completed(n: usize, today: NaiveDate) -> Aggregate {
        let mut agg = Aggregate::default();
        for i in 0..n {
            let mut t = Task::new(
                format!("T-{:03}", i + 1),
                "x".into(),
                Category::Work,
                today,
                format!("{:02}:00", i % 24),
                "23:00".into(),
            );
            t.completed = true;
            agg.tasks.push(t);
        }
        agg
    }

    #[test]
    fn machine_locked_at_nine_unlocked_at_ten() {
        let today = date(2026, 8, 7);
        let find = |agg: &Aggregate| {
            evaluate(agg, today)
                .into_iter()
                .find(|s| s.spec.slug == "machine")
                .unwrap()
                .unlocked
        };
        assert!(!find(&agg_with_completed(9, today)));
        assert!(find(&agg_with_completed(10, today)));
    }

    #[test]
    fn unlocked_sort_before_locked_preserving_catalog_order() {
        let today = date(2026, 8, 7);
        let mut agg = agg_with_completed(1, today);
        agg.progress = Progress { xp: 0, level: 5 };

        let statuses = evaluate(&agg, today);
        let unlocked: Vec<&str> = statuses
            .iter()
            .take_while(|s| s.unlocked)
            .map(|s| s.spec.slug)
            .collect();
        // first-step (1 completion), warming-up is locked, climber (level 5)
        // keep their relative catalog order
        assert_eq!(unlocked, vec!["first-step", "climber"]);
        assert!(statuses[unlocked.len()..].iter().all(|s| !s.unlocked));
    }

    #[test]
    fn empty_aggregate_unlocks_nothing() {
        let agg = Aggregate::default();
        assert!(evaluate(&agg, date(2026, 8, 7)).iter().all(|s| !s.unlocked));
    }

    #[test]
    fn metrics_pull_streaks_from_tasks() {
        let today = date(2026, 8, 7);
        let mut agg = agg_with_completed(1, today);
        agg.tasks[0].date = today;
        let m = metrics(&agg, today);
        assert_eq!(m.current_streak, 1);
        assert_eq!(m.completed_tasks, 1);
    }
}
