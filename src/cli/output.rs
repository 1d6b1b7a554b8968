use chrono::NaiveDate;
use serde::Serialize;

use crate::model::profile::UserProfile;
use crate::model::progress::Progress;
use crate::model::routine::RoutineItem;
use crate::model::task::Task;
use crate::ops::badge_ops::BadgeStatus;
use crate::ops::calendar::{DayCell, MonthGrid};
use crate::ops::stats::{CategoryStat, StreakSummary};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskJson<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub category: &'a str,
    pub start_time: &'a str,
    pub end_time: &'a str,
    pub date: NaiveDate,
    pub completed: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineItemJson<'a> {
    pub id: &'a str,
    pub activity: &'a str,
    pub category: &'a str,
    pub start_time: &'a str,
    pub end_time: &'a str,
    pub checked: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleJson<'a> {
    pub id: &'a str,
    pub completed: bool,
    pub xp: u32,
    pub level: u32,
    pub level_up: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakJson {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_contributions: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsJson<'a> {
    pub total: u32,
    pub completed: u32,
    pub xp: u32,
    pub level: u32,
    pub by_category: Vec<CategoryStatJson<'a>>,
}

#[derive(Serialize)]
pub struct CategoryStatJson<'a> {
    pub category: &'a str,
    pub total: u32,
    pub completed: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeJson<'a> {
    pub slug: &'a str,
    pub name: &'a str,
    pub description: &'a str,
    pub unlocked: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarJson {
    pub year: i32,
    pub month: u32,
    /// One count per day of the month, in order
    pub completed_by_day: Vec<u32>,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn task_to_json(task: &Task) -> TaskJson<'_> {
    TaskJson {
        id: &task.id,
        title: &task.title,
        category: task.category.label(),
        start_time: &task.start_time,
        end_time: &task.end_time,
        date: task.date,
        completed: task.completed,
    }
}

pub fn routine_to_json<'a>(item: &'a RoutineItem, checked: bool) -> RoutineItemJson<'a> {
    RoutineItemJson {
        id: &item.id,
        activity: &item.activity,
        category: item.category.label(),
        start_time: &item.start_time,
        end_time: &item.end_time,
        checked,
    }
}

pub fn streak_to_json(summary: &StreakSummary) -> StreakJson {
    StreakJson {
        current_streak: summary.current_streak,
        longest_streak: summary.longest_streak,
        total_contributions: summary.total_contributions,
    }
}

pub fn category_stat_to_json(stat: &CategoryStat) -> CategoryStatJson<'static> {
    CategoryStatJson {
        category: stat.category.label(),
        total: stat.total,
        completed: stat.completed,
    }
}

pub fn badge_to_json(status: &BadgeStatus) -> BadgeJson<'static> {
    BadgeJson {
        slug: status.spec.slug,
        name: status.spec.name,
        description: status.spec.description,
        unlocked: status.unlocked,
    }
}

pub fn calendar_to_json(grid: &MonthGrid) -> CalendarJson {
    CalendarJson {
        year: grid.year,
        month: grid.month,
        completed_by_day: grid
            .cells
            .iter()
            .filter_map(|c| match c {
                DayCell::Day { completed, .. } => Some(*completed),
                DayCell::Blank => None,
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

fn checkbox(done: bool) -> char {
    if done { 'x' } else { ' ' }
}

/// Format a single task as a one-line summary
pub fn format_task_line(task: &Task) -> String {
    format!(
        "[{}] {} {}-{} {} ({})",
        checkbox(task.completed),
        task.id,
        task.start_time,
        task.end_time,
        task.title,
        task.category.label()
    )
}

/// Format a routine item with its checked state for a date
pub fn format_routine_line(item: &RoutineItem, checked: bool) -> String {
    format!(
        "[{}] {} {}-{} {} ({})",
        checkbox(checked),
        item.id,
        item.start_time,
        item.end_time,
        item.activity,
        item.category.label()
    )
}

/// Format a badge status line: filled dot for unlocked, open dot for locked
pub fn format_badge_line(status: &BadgeStatus) -> String {
    let dot = if status.unlocked { '●' } else { '○' };
    format!(
        "{} {} {:<14} {}",
        dot, status.spec.icon, status.spec.name, status.spec.description
    )
}

pub fn format_streak(summary: &StreakSummary) -> Vec<String> {
    vec![
        format!("current streak:  {} days", summary.current_streak),
        format!("longest streak:  {} days", summary.longest_streak),
        format!("contributions:   {}", summary.total_contributions),
    ]
}

pub fn format_progress(progress: &Progress) -> String {
    format!("level {}  {} / 100 xp", progress.level, progress.xp)
}

/// Format category totals as aligned "Category  done/total" rows
pub fn format_category_stats(stats: &[CategoryStat]) -> Vec<String> {
    stats
        .iter()
        .map(|s| format!("{:<10} {}/{}", s.category.label(), s.completed, s.total))
        .collect()
}

pub fn format_profile(profile: &UserProfile) -> Vec<String> {
    let mut lines = vec![
        format!("name:       {}", profile.name),
        format!("age:        {}", profile.age),
    ];
    if !profile.profession.is_empty() {
        lines.push(format!("profession: {}", profile.profession));
    }
    if !profile.goal.is_empty() {
        lines.push(format!("goal:       {}", profile.goal));
    }
    if !profile.bio.is_empty() {
        lines.push(format!("bio:        {}", profile.bio));
    }
    lines.push(format!("joined:     {}", profile.joined));
    lines
}

/// Heat marker for a day's completed count
fn heat_marker(completed: u32) -> char {
    match completed {
        0 => ' ',
        1 => '.',
        2 => ':',
        _ => '*',
    }
}

/// Format the month grid as a Sunday-first text calendar. Each cell is four
/// columns: right-aligned day number plus a heat marker.
pub fn format_month_grid(grid: &MonthGrid) -> Vec<String> {
    let first = NaiveDate::from_ymd_opt(grid.year, grid.month, 1)
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_default();

    let mut lines = vec![format!("{:^28}", first)];
    let header: String = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"]
        .iter()
        .map(|d| format!("{:>4}", d))
        .collect();
    lines.push(header);

    for week in grid.cells.chunks(7) {
        let row: String = week
            .iter()
            .map(|cell| match cell {
                DayCell::Blank => "    ".to_string(),
                DayCell::Day { day, completed } => {
                    format!("{:>3}{}", day, heat_marker(*completed))
                }
            })
            .collect();
        lines.push(row.trim_end().to_string());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::badge::badge_by_slug;
    use crate::model::routine::default_routine;
    use crate::model::task::Category;
    use crate::ops::calendar::month_grid;
    use insta::assert_snapshot;

    fn sample_task(completed: bool) -> Task {
        let mut t = Task::new(
            "T-001".into(),
            "Write report".into(),
            Category::Work,
            NaiveDate::from_ymd_opt(2026, 8, 7).unwrap(),
            "09:00".into(),
            "10:00".into(),
        );
        t.completed = completed;
        t
    }

    #[test]
    fn task_line_open() {
        assert_snapshot!(format_task_line(&sample_task(false)), @"[ ] T-001 09:00-10:00 Write report (Work)");
    }

    #[test]
    fn task_line_completed() {
        assert_snapshot!(format_task_line(&sample_task(true)), @"[x] T-001 09:00-10:00 Write report (Work)");
    }

    #[test]
    fn routine_line() {
        let item = &default_routine()[0];
        assert_snapshot!(format_routine_line(item, true), @"[x] r1 07:00-07:30 Morning Routine (Health)");
    }

    #[test]
    fn badge_line_locked() {
        let status = BadgeStatus {
            spec: badge_by_slug("machine").unwrap(),
            unlocked: false,
        };
        assert_snapshot!(format_badge_line(&status), @"○ ⚙ The Machine    Complete 10 tasks");
    }

    #[test]
    fn month_grid_has_weekday_header_and_offset() {
        // July 2026 starts on a Wednesday: three blank cells
        let grid = month_grid(&[], 2026, 7).unwrap();
        let lines = format_month_grid(&grid);
        assert_eq!(lines[1], "  Su  Mo  Tu  We  Th  Fr  Sa");
        assert_eq!(lines[2], "              1   2   3   4");
        assert!(lines[0].contains("July 2026"));
    }

    #[test]
    fn month_grid_marks_heat() {
        let d = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        let mut task = sample_task(true);
        task.date = d;
        let grid = month_grid(&[task], 2026, 7).unwrap();
        let lines = format_month_grid(&grid);
        assert_eq!(lines[2], "              1.  2   3   4");
    }

    #[test]
    fn task_json_uses_document_field_names() {
        let json = serde_json::to_value(task_to_json(&sample_task(true))).unwrap();
        assert_eq!(json["startTime"], "09:00");
        assert_eq!(json["completed"], true);
    }
}
