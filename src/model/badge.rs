/// Derived metric a badge condition compares against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    CompletedTasks,
    Level,
    LifetimeXp,
    CurrentStreak,
    LongestStreak,
}

/// Snapshot of all derived metrics, computed once per evaluation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricSet {
    pub completed_tasks: u32,
    pub level: u32,
    pub lifetime_xp: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
}

impl MetricSet {
    pub fn get(&self, metric: Metric) -> u32 {
        match metric {
            Metric::CompletedTasks => self.completed_tasks,
            Metric::Level => self.level,
            Metric::LifetimeXp => self.lifetime_xp,
            Metric::CurrentStreak => self.current_streak,
            Metric::LongestStreak => self.longest_streak,
        }
    }
}

/// A catalog badge: cosmetic achievement with a declarative unlock condition.
/// Unlock state is never persisted; it is recomputed on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeSpec {
    pub slug: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub metric: Metric,
    pub threshold: u32,
}

impl BadgeSpec {
    /// A badge unlocks when its metric reaches the threshold
    pub fn unlocked(&self, metrics: &MetricSet) -> bool {
        metrics.get(self.metric) >= self.threshold
    }
}

/// The static badge catalog, in display order
pub const BADGE_CATALOG: &[BadgeSpec] = &[
    BadgeSpec {
        slug: "first-step",
        name: "First Step",
        description: "Complete your first task",
        icon: "✔",
        metric: Metric::CompletedTasks,
        threshold: 1,
    },
    BadgeSpec {
        slug: "machine",
        name: "The Machine",
        description: "Complete 10 tasks",
        icon: "⚙",
        metric: Metric::CompletedTasks,
        threshold: 10,
    },
    BadgeSpec {
        slug: "centurion",
        name: "Centurion",
        description: "Complete 100 tasks",
        icon: "✪",
        metric: Metric::CompletedTasks,
        threshold: 100,
    },
    BadgeSpec {
        slug: "warming-up",
        name: "Warming Up",
        description: "Hold a 3-day streak",
        icon: "◉",
        metric: Metric::CurrentStreak,
        threshold: 3,
    },
    BadgeSpec {
        slug: "on-fire",
        name: "On Fire",
        description: "Hold a 7-day streak",
        icon: "✹",
        metric: Metric::CurrentStreak,
        threshold: 7,
    },
    BadgeSpec {
        slug: "habit-master",
        name: "Habit Master",
        description: "Reach a 30-day best streak",
        icon: "♛",
        metric: Metric::LongestStreak,
        threshold: 30,
    },
    BadgeSpec {
        slug: "climber",
        name: "Climber",
        description: "Reach level 5",
        icon: "▲",
        metric: Metric::Level,
        threshold: 5,
    },
    BadgeSpec {
        slug: "high-achiever",
        name: "High Achiever",
        description: "Reach level 10",
        icon: "★",
        metric: Metric::Level,
        threshold: 10,
    },
    BadgeSpec {
        slug: "grinder",
        name: "Grinder",
        description: "Earn 1000 lifetime XP",
        icon: "⚒",
        metric: Metric::LifetimeXp,
        threshold: 1000,
    },
];

/// Look up a badge by slug
pub fn badge_by_slug(slug: &str) -> Option<&'static BadgeSpec> {
    BADGE_CATALOG.iter().find(|b| b.slug == slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn machine_boundary_at_ten_completions() {
        let machine = badge_by_slug("machine").unwrap();
        let mut metrics = MetricSet {
            completed_tasks: 9,
            ..MetricSet::default()
        };
        assert!(!machine.unlocked(&metrics));
        metrics.completed_tasks = 10;
        assert!(machine.unlocked(&metrics));
    }

    #[test]
    fn slugs_are_unique() {
        for (i, a) in BADGE_CATALOG.iter().enumerate() {
            for b in &BADGE_CATALOG[i + 1..] {
                assert_ne!(a.slug, b.slug);
            }
        }
    }

    #[test]
    fn streak_badges_read_the_right_metric() {
        let metrics = MetricSet {
            current_streak: 2,
            longest_streak: 30,
            ..MetricSet::default()
        };
        assert!(!badge_by_slug("warming-up").unwrap().unlocked(&metrics));
        assert!(badge_by_slug("habit-master").unwrap().unlocked(&metrics));
    }
}
