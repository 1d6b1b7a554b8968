use std::collections::HashSet;
use std::io;
use std::time::Duration;

use chrono::{DateTime, Datelike, Local, NaiveDate};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::model::config::AppConfig;
use crate::model::progress::LevelChange;
use crate::model::routine::RoutineItem;
use crate::model::task::Task;
use crate::ops::overdue;
use crate::store::config_io;
use crate::store::journal;
use crate::store::paths::{self, Caller};
use crate::store::store::{Applied, Mutation, Store};
use crate::store::watcher::DocWatcher;

use super::input;
use super::render;
use super::theme::Theme;
use super::timer::FocusTimer;

/// Which view is currently displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Day,
    Routine,
    Calendar,
    Badges,
    Profile,
}

impl View {
    pub const ALL: [View; 6] = [
        View::Dashboard,
        View::Day,
        View::Routine,
        View::Calendar,
        View::Badges,
        View::Profile,
    ];

    pub fn title(self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Day => "Day",
            View::Routine => "Routine",
            View::Calendar => "Calendar",
            View::Badges => "Badges",
            View::Profile => "Profile",
        }
    }
}

/// Current interaction mode
pub enum Mode {
    Navigate,
    TaskForm(TaskForm),
    RoutineForm(RoutineForm),
    ProfileForm(ProfileForm),
    Confirm(ConfirmAction),
}

/// Modal form state for adding a task
#[derive(Debug, Clone, Default)]
pub struct TaskForm {
    pub title: String,
    pub category_idx: usize,
    pub start: String,
    pub end: String,
    /// 0 title, 1 category, 2 start, 3 end
    pub field: usize,
}

/// Modal form state for adding or editing a routine item
#[derive(Debug, Clone, Default)]
pub struct RoutineForm {
    pub editing_id: Option<String>,
    pub activity: String,
    pub category_idx: usize,
    pub start: String,
    pub end: String,
    /// 0 activity, 1 category, 2 start, 3 end
    pub field: usize,
}

/// Modal form state for editing the profile
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub name: String,
    pub age: String,
    pub profession: String,
    pub goal: String,
    pub bio: String,
    /// 0 name, 1 age, 2 profession, 3 goal, 4 bio
    pub field: usize,
}

/// Pending destructive action awaiting y/n
pub enum ConfirmAction {
    DeleteTask { id: String, title: String },
    DeleteRoutineItem { id: String, activity: String },
}

/// An in-app notification (the degraded notification path)
pub struct Notice {
    pub at: DateTime<Local>,
    pub message: String,
}

const MAX_NOTICES: usize = 50;
/// Event-loop ticks between overdue scans (ticks are ~250ms)
const OVERDUE_SCAN_TICKS: u64 = 240;

/// Main application state
pub struct App {
    pub store: Store,
    pub config: AppConfig,
    pub theme: Theme,
    pub view: View,
    pub mode: Mode,
    pub should_quit: bool,
    /// Date shown in the day/routine views
    pub selected_date: NaiveDate,
    pub day_cursor: usize,
    pub routine_cursor: usize,
    /// Month shown in the calendar view
    pub calendar_month: (i32, u32),
    pub show_help: bool,
    pub notices: Vec<Notice>,
    /// Task IDs already announced as overdue this session
    pub notified_overdue: HashSet<String>,
    pub timer: FocusTimer,
    /// One-shot level-up toast for the status row
    pub level_flash: Option<String>,
    /// Inline validation error for the status row
    pub status_error: Option<String>,
    watcher: Option<DocWatcher>,
}

impl App {
    pub fn new(store: Store, config: AppConfig, watcher: Option<DocWatcher>) -> Self {
        let theme = Theme::from_config(&config.ui);
        let timer = FocusTimer::new(config.timer.minutes);
        let today = Local::now().date_naive();

        App {
            store,
            config,
            theme,
            view: View::Dashboard,
            mode: Mode::Navigate,
            should_quit: false,
            selected_date: today,
            day_cursor: 0,
            routine_cursor: 0,
            calendar_month: (today.year(), today.month()),
            show_help: false,
            notices: Vec::new(),
            notified_overdue: HashSet::new(),
            timer,
            level_flash: None,
            status_error: None,
            watcher,
        }
    }

    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    /// Tasks for the selected date, sorted by start time
    pub fn day_tasks(&self) -> Vec<&Task> {
        self.store.aggregate().tasks_on(self.selected_date)
    }

    pub fn routine_items(&self) -> &[RoutineItem] {
        &self.store.aggregate().custom_routine
    }

    /// Apply a local mutation, surfacing level-ups and validation errors.
    pub fn apply(&mut self, mutation: Mutation) -> Option<Applied> {
        match self.store.apply_local(mutation) {
            Ok(applied) => {
                self.status_error = None;
                if applied.level_change() == LevelChange::LevelUp {
                    let level = self.store.aggregate().progress.level;
                    let message = format!("Level up! You reached level {}", level);
                    self.level_flash = Some(message.clone());
                    self.push_notice(message);
                }
                Some(applied)
            }
            Err(e) => {
                let message = e.to_string();
                journal::log_event(
                    self.store.workspace_dir(),
                    journal::JournalEntry {
                        timestamp: chrono::Utc::now(),
                        category: journal::JournalCategory::Validation,
                        description: message.clone(),
                        fields: Vec::new(),
                        body: String::new(),
                    },
                );
                self.status_error = Some(message);
                None
            }
        }
    }

    /// Add an in-app notice (silently dropped when notifications are off)
    pub fn push_notice(&mut self, message: String) {
        if !self.config.notifications.enabled {
            return;
        }
        self.notices.insert(
            0,
            Notice {
                at: Local::now(),
                message,
            },
        );
        self.notices.truncate(MAX_NOTICES);
    }

    /// Clamp cursors after the underlying collections changed
    pub fn clamp_cursors(&mut self) {
        let day_len = self.day_tasks().len();
        if self.day_cursor >= day_len {
            self.day_cursor = day_len.saturating_sub(1);
        }
        let routine_len = self.routine_items().len();
        if self.routine_cursor >= routine_len {
            self.routine_cursor = routine_len.saturating_sub(1);
        }
    }

    /// Periodic work: watcher events, timer completion, overdue scan
    pub fn on_tick(&mut self, tick: u64) {
        let doc_changed = self
            .watcher
            .as_ref()
            .is_some_and(|w| !w.poll().is_empty());
        if doc_changed && self.store.reload() {
            self.clamp_cursors();
        }

        if self.timer.poll() {
            self.push_notice("Focus timer finished".to_string());
        }

        if tick % OVERDUE_SCAN_TICKS == 1 {
            self.scan_overdue();
        }
    }

    fn scan_overdue(&mut self) {
        let now = Local::now().format("%H:%M").to_string();
        let today = self.today();
        let pending: Vec<(String, String)> = overdue::overdue_tasks(
            &self.store.aggregate().tasks,
            today,
            &now,
        )
        .iter()
        .filter(|t| !self.notified_overdue.contains(&t.id))
        .map(|t| (t.id.clone(), t.title.clone()))
        .collect();

        for (id, title) in pending {
            self.push_notice(format!("Overdue: {}", title));
            self.notified_overdue.insert(id);
        }
    }
}

// ---------------------------------------------------------------------------
// UI state persistence
// ---------------------------------------------------------------------------

/// Restore UI state from .state.json
pub fn restore_ui_state(app: &mut App) {
    use crate::store::state::read_ui_state;

    let ui_state = match read_ui_state(app.store.workspace_dir()) {
        Some(s) => s,
        None => return,
    };

    app.view = match ui_state.view.as_str() {
        "day" => View::Day,
        "routine" => View::Routine,
        "calendar" => View::Calendar,
        "badges" => View::Badges,
        "profile" => View::Profile,
        _ => View::Dashboard,
    };
    if let Some(date) = ui_state.selected_date {
        app.selected_date = date;
    }
    app.day_cursor = ui_state.day_cursor;
    app.routine_cursor = ui_state.routine_cursor;
    if let Some(month) = ui_state.calendar_month.as_deref()
        && let Some((y, m)) = month.split_once('-')
        && let (Ok(year), Ok(month)) = (y.parse::<i32>(), m.parse::<u32>())
        && (1..=12).contains(&month)
    {
        app.calendar_month = (year, month);
    }
    app.clamp_cursors();
}

/// Save UI state to .state.json
pub fn save_ui_state(app: &App) {
    use crate::store::state::{UiState, write_ui_state};

    let view = match app.view {
        View::Dashboard => "dashboard",
        View::Day => "day",
        View::Routine => "routine",
        View::Calendar => "calendar",
        View::Badges => "badges",
        View::Profile => "profile",
    };
    let ui_state = UiState {
        view: view.to_string(),
        selected_date: Some(app.selected_date),
        day_cursor: app.day_cursor,
        routine_cursor: app.routine_cursor,
        calendar_month: Some(format!("{}-{:02}", app.calendar_month.0, app.calendar_month.1)),
    };
    let _ = write_ui_state(app.store.workspace_dir(), &ui_state);
}

// ---------------------------------------------------------------------------
// Entry point and event loop
// ---------------------------------------------------------------------------

/// Run the TUI application
pub fn run(data_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let dir = paths::resolve_workspace_dir(data_dir, Caller::Tui)?;
    let (config, _) = config_io::read_config()?;
    let (store, _) = Store::open(&dir, Local::now().date_naive())?;

    // The subscription push path; without it edits still land on save
    let watcher = DocWatcher::start(&dir).ok();

    let mut app = App::new(store, config, watcher);
    restore_ui_state(&mut app);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore the terminal on any rendering panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    save_ui_state(&app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut tick: u64 = 0;
    let mut save_counter = 0u32;
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
            // Debounced state save: every ~5 key presses
            save_counter += 1;
            if save_counter >= 5 {
                save_ui_state(app);
                save_counter = 0;
            }
        }

        tick += 1;
        app.on_tick(tick);

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
