use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub workspace: WorkspaceConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub timer: TimerConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Name of the active workspace (the signed-in identity)
    #[serde(default)]
    pub active: Option<String>,
    /// Override for the data root (default: XDG data dir)
    #[serde(default)]
    pub data_root: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// Theme color overrides, hex strings keyed by slot name
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// In-app notices for overdue tasks and timer completion
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        NotificationConfig { enabled: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Focus timer length in minutes
    #[serde(default = "default_timer_minutes")]
    pub minutes: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        TimerConfig {
            minutes: default_timer_minutes(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_timer_minutes() -> u32 {
    25
}
