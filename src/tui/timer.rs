use std::time::{Duration, Instant};

/// Focus countdown timer driven from the event-loop tick.
/// Completion fires exactly once per run.
pub struct FocusTimer {
    minutes: u32,
    deadline: Option<Instant>,
}

impl FocusTimer {
    pub fn new(minutes: u32) -> Self {
        FocusTimer {
            minutes,
            deadline: None,
        }
    }

    pub fn running(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn start(&mut self) {
        self.deadline = Some(Instant::now() + Duration::from_secs(u64::from(self.minutes) * 60));
    }

    pub fn stop(&mut self) {
        self.deadline = None;
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    /// Poll for completion. Returns true once when the countdown hits zero,
    /// then clears itself.
    pub fn poll(&mut self) -> bool {
        match self.remaining() {
            Some(left) if left.is_zero() => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Remaining time as "MM:SS" (None when idle)
    pub fn format_remaining(&self) -> Option<String> {
        let left = self.remaining()?;
        let secs = left.as_secs();
        Some(format!("{:02}:{:02}", secs / 60, secs % 60))
    }
}
