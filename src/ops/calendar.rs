use chrono::{Datelike, NaiveDate};

use crate::model::task::Task;

/// One cell of the monthly heatmap grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayCell {
    /// Leading padding before day 1 (the month's starting weekday offset)
    Blank,
    Day { day: u32, completed: u32 },
}

/// A month of cells, ready for a Sunday-first 7-column layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<DayCell>,
}

impl MonthGrid {
    /// Highest completed-count in the month (for heat scaling)
    pub fn max_completed(&self) -> u32 {
        self.cells
            .iter()
            .map(|c| match c {
                DayCell::Day { completed, .. } => *completed,
                DayCell::Blank => 0,
            })
            .max()
            .unwrap_or(0)
    }
}

/// Build the heatmap grid for a month: leading blanks for the starting
/// weekday (Sunday-first), then one cell per day carrying that day's
/// completed-task count. Pure function of (tasks, year, month).
pub fn month_grid(tasks: &[Task], year: i32, month: u32) -> Option<MonthGrid> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let offset = first.weekday().num_days_from_sunday();
    let days = days_in_month(year, month)?;

    let mut cells = Vec::with_capacity((offset + days) as usize);
    cells.extend(std::iter::repeat_n(DayCell::Blank, offset as usize));
    for day in 1..=days {
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        let completed = tasks
            .iter()
            .filter(|t| t.completed && t.date == date)
            .count() as u32;
        cells.push(DayCell::Day { day, completed });
    }

    Some(MonthGrid { year, month, cells })
}

fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some(next.signed_duration_since(first).num_days() as u32)
}
