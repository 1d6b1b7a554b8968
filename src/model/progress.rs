use serde::{Deserialize, Serialize};

/// XP required to advance one level
pub const LEVEL_THRESHOLD: i32 = 100;
/// XP awarded for completing a task (negated on un-completion)
pub const TASK_XP: i32 = 20;
/// XP awarded for checking a routine item (negated on un-checking)
pub const ROUTINE_XP: i32 = 10;

/// Signal emitted when an XP delta crosses a level boundary.
/// `LevelUp` drives the one-shot celebration notice in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelChange {
    None,
    LevelUp,
    LevelDown,
}

/// Persisted XP and level counters.
///
/// Invariants: `level >= 1` and `0 <= xp < LEVEL_THRESHOLD`. The fixed
/// per-toggle deltas can only cross one boundary at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    #[serde(default)]
    pub xp: u32,
    #[serde(default = "default_level")]
    pub level: u32,
}

fn default_level() -> u32 {
    1
}

impl Default for Progress {
    fn default() -> Self {
        Progress { xp: 0, level: 1 }
    }
}

impl Progress {
    /// Apply a signed XP delta with carry-through leveling.
    pub fn apply(&mut self, delta: i32) -> LevelChange {
        let mut xp = self.xp as i32 + delta;
        let change = if xp >= LEVEL_THRESHOLD {
            xp -= LEVEL_THRESHOLD;
            self.level += 1;
            LevelChange::LevelUp
        } else if xp < 0 {
            if self.level > 1 {
                self.level -= 1;
                xp += LEVEL_THRESHOLD;
                LevelChange::LevelDown
            } else {
                // Floor at level 1 / 0 XP
                xp = 0;
                LevelChange::None
            }
        } else {
            LevelChange::None
        };
        self.xp = xp as u32;
        change
    }

    /// Total XP earned across all levels
    pub fn lifetime_xp(&self) -> u32 {
        (self.level - 1) * LEVEL_THRESHOLD as u32 + self.xp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_gain_stays_within_level() {
        let mut p = Progress { xp: 40, level: 2 };
        assert_eq!(p.apply(TASK_XP), LevelChange::None);
        assert_eq!(p, Progress { xp: 60, level: 2 });
    }

    #[test]
    fn gain_crossing_threshold_levels_up_with_carry() {
        let mut p = Progress { xp: 90, level: 1 };
        assert_eq!(p.apply(TASK_XP), LevelChange::LevelUp);
        assert_eq!(p, Progress { xp: 10, level: 2 });
    }

    #[test]
    fn gain_landing_exactly_on_threshold_levels_up() {
        let mut p = Progress { xp: 80, level: 3 };
        assert_eq!(p.apply(TASK_XP), LevelChange::LevelUp);
        assert_eq!(p, Progress { xp: 0, level: 4 });
    }

    #[test]
    fn loss_below_zero_borrows_from_level() {
        let mut p = Progress { xp: 5, level: 2 };
        assert_eq!(p.apply(-TASK_XP), LevelChange::LevelDown);
        assert_eq!(p, Progress { xp: 85, level: 1 });
    }

    #[test]
    fn loss_at_level_one_clamps_to_zero() {
        let mut p = Progress { xp: 5, level: 1 };
        assert_eq!(p.apply(-TASK_XP), LevelChange::None);
        assert_eq!(p, Progress { xp: 0, level: 1 });
    }

    #[test]
    fn routine_delta_round_trips() {
        let mut p = Progress { xp: 95, level: 1 };
        assert_eq!(p.apply(ROUTINE_XP), LevelChange::LevelUp);
        assert_eq!(p, Progress { xp: 5, level: 2 });
        assert_eq!(p.apply(-ROUTINE_XP), LevelChange::LevelDown);
        assert_eq!(p, Progress { xp: 95, level: 1 });
    }

    #[test]
    fn lifetime_xp_sums_completed_levels() {
        assert_eq!(Progress { xp: 0, level: 1 }.lifetime_xp(), 0);
        assert_eq!(Progress { xp: 30, level: 3 }.lifetime_xp(), 230);
    }

    #[test]
    fn missing_fields_deserialize_to_floor() {
        let p: Progress = serde_json::from_str("{}").unwrap();
        assert_eq!(p, Progress { xp: 0, level: 1 });
    }
}
