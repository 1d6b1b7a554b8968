pub mod badge_ops;
pub mod calendar;
pub mod export;
pub mod overdue;
pub mod routine_ops;
pub mod stats;
pub mod task_ops;
