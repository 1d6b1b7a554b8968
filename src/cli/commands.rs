use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "lo", about = concat!("[◉] lifeos v", env!("CARGO_PKG_VERSION"), " - your day in one place"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against an explicit workspace directory (bypasses the registry)
    #[arg(short = 'C', long = "data-dir", global = true)]
    pub data_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a workspace and make it active
    Init(InitArgs),
    /// Add a task
    Add(AddArgs),
    /// Toggle a task's completed state
    Toggle(IdArg),
    /// Delete a task permanently
    Rm(RmArgs),
    /// List tasks for a date (or all)
    List(ListArgs),
    /// Show or manage the daily routine checklist
    Routine(RoutineCmd),
    /// Show task totals by category
    Stats,
    /// Show streaks and contributions
    Streak,
    /// Show the badge catalog with unlock state
    Badges,
    /// Show the monthly completion heatmap
    Calendar(CalendarArgs),
    /// Show or edit the user profile
    Profile(ProfileCmd),
    /// Export a JSON backup of the whole workspace
    Export(ExportArgs),
    /// Manage workspaces (the signed-in identity)
    Workspace(WorkspaceCmd),
    /// View or manage the journal
    Journal(JournalCmd),
}

// ---------------------------------------------------------------------------
// Init args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct InitArgs {
    /// Workspace name
    pub name: String,
    /// Directory for the workspace data (default: the lifeos data dir)
    #[arg(long)]
    pub path: Option<String>,
}

// ---------------------------------------------------------------------------
// Task command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub title: String,
    /// Category (Work, Personal, Health, Learning, Urgent)
    #[arg(long, default_value = "Work")]
    pub category: String,
    /// Calendar date, YYYY-MM-DD (default: today)
    #[arg(long)]
    pub date: Option<String>,
    /// Start time, HH:MM
    #[arg(long, default_value = "09:00")]
    pub start: String,
    /// End time, HH:MM
    #[arg(long, default_value = "10:00")]
    pub end: String,
}

#[derive(Args)]
pub struct IdArg {
    /// Task ID
    pub id: String,
}

#[derive(Args)]
pub struct RmArgs {
    /// Task ID
    pub id: String,
    /// Skip confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct ListArgs {
    /// Calendar date, YYYY-MM-DD (default: today)
    #[arg(long)]
    pub date: Option<String>,
    /// List every task regardless of date
    #[arg(long)]
    pub all: bool,
    /// Filter by category
    #[arg(long)]
    pub category: Option<String>,
}

// ---------------------------------------------------------------------------
// Routine command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct RoutineCmd {
    #[command(subcommand)]
    pub action: Option<RoutineAction>,
    /// Calendar date for the checklist, YYYY-MM-DD (default: today)
    #[arg(long)]
    pub date: Option<String>,
}

#[derive(Subcommand)]
pub enum RoutineAction {
    /// Add a routine item
    Add(RoutineAddArgs),
    /// Edit a routine item
    Edit(RoutineEditArgs),
    /// Delete a routine item (history is kept)
    Rm(RoutineIdArg),
    /// Toggle a routine item for a date
    Check(RoutineCheckArgs),
}

#[derive(Args)]
pub struct RoutineAddArgs {
    /// Activity name
    pub activity: String,
    /// Category (Focus, Health, Break, Sleep, Work)
    #[arg(long, default_value = "Focus")]
    pub category: String,
    /// Start time, HH:MM
    #[arg(long, default_value = "06:00")]
    pub start: String,
    /// End time, HH:MM
    #[arg(long, default_value = "07:00")]
    pub end: String,
}

#[derive(Args)]
pub struct RoutineEditArgs {
    /// Routine item ID
    pub id: String,
    /// New activity name
    #[arg(long)]
    pub activity: Option<String>,
    /// New category
    #[arg(long)]
    pub category: Option<String>,
    /// New start time, HH:MM
    #[arg(long)]
    pub start: Option<String>,
    /// New end time, HH:MM
    #[arg(long)]
    pub end: Option<String>,
}

#[derive(Args)]
pub struct RoutineIdArg {
    /// Routine item ID
    pub id: String,
}

#[derive(Args)]
pub struct RoutineCheckArgs {
    /// Routine item ID
    pub id: String,
    /// Calendar date, YYYY-MM-DD (default: today)
    #[arg(long)]
    pub date: Option<String>,
}

// ---------------------------------------------------------------------------
// Calendar / profile / export args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct CalendarArgs {
    /// Month to show, YYYY-MM (default: current month)
    #[arg(long)]
    pub month: Option<String>,
}

#[derive(Args)]
pub struct ProfileCmd {
    #[command(subcommand)]
    pub action: Option<ProfileAction>,
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the profile (default)
    Show,
    /// Update profile fields
    Set(ProfileSetArgs),
}

#[derive(Args)]
pub struct ProfileSetArgs {
    /// Display name (1-12 characters)
    #[arg(long)]
    pub name: Option<String>,
    /// Age (15-80)
    #[arg(long)]
    pub age: Option<u32>,
    #[arg(long)]
    pub profession: Option<String>,
    #[arg(long)]
    pub goal: Option<String>,
    #[arg(long)]
    pub bio: Option<String>,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Output file (default: lifeos-backup-<date>.json in the current dir)
    #[arg(long)]
    pub out: Option<String>,
}

// ---------------------------------------------------------------------------
// Workspace management
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct WorkspaceCmd {
    #[command(subcommand)]
    pub action: Option<WorkspaceAction>,
}

#[derive(Subcommand)]
pub enum WorkspaceAction {
    /// List registered workspaces (default)
    List,
    /// Make a workspace active
    Use(WorkspaceNameArg),
    /// Register an existing workspace directory
    Add(WorkspaceAddArgs),
    /// Remove a workspace from the registry (data stays on disk)
    Rm(WorkspaceNameArg),
    /// Clear the active workspace
    Logout,
}

#[derive(Args)]
pub struct WorkspaceNameArg {
    /// Workspace name
    pub name: String,
}

#[derive(Args)]
pub struct WorkspaceAddArgs {
    /// Workspace name
    pub name: String,
    /// Path to the workspace directory
    pub path: String,
}

// ---------------------------------------------------------------------------
// Journal
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct JournalCmd {
    #[command(subcommand)]
    pub action: Option<JournalAction>,
    /// Maximum number of entries to show (default: 10)
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Subcommand)]
pub enum JournalAction {
    /// Remove old entries
    Prune(JournalPruneArgs),
    /// Print the absolute path to the journal
    Path,
}

#[derive(Args)]
pub struct JournalPruneArgs {
    /// Remove entries older than this timestamp (default: 30 days ago)
    #[arg(long)]
    pub before: Option<String>,
    /// Remove all entries
    #[arg(long)]
    pub all: bool,
}
