mod init;
pub use init::cmd_init;

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Datelike, Local, NaiveDate, Utc};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::model::routine::RoutineCategory;
use crate::model::task::{Category, TaskType};
use crate::ops::{badge_ops, calendar, export, stats};
use crate::store::config_io;
use crate::store::journal;
use crate::store::lock::FileLock;
use crate::store::paths;
use crate::store::registry;
use crate::store::store::{Applied, Mutation, Store};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let data_dir = cli.data_dir.clone();

    match cli.command {
        None => {
            eprintln!("No subcommand given (try `lo --help`).");
            Ok(())
        }
        Some(cmd) => match cmd {
            // Init is handled in main.rs before workspace resolution
            Commands::Init(args) => cmd_init(args),

            // Workspace management does not require an open workspace
            Commands::Workspace(args) => cmd_workspace(args, json),

            // Task commands
            Commands::Add(args) => cmd_add(args, data_dir.as_deref(), json),
            Commands::Toggle(args) => cmd_toggle(args, data_dir.as_deref(), json),
            Commands::Rm(args) => cmd_rm(args, data_dir.as_deref()),
            Commands::List(args) => cmd_list(args, data_dir.as_deref(), json),

            // Routine
            Commands::Routine(args) => cmd_routine(args, data_dir.as_deref(), json),

            // Derived views
            Commands::Stats => cmd_stats(data_dir.as_deref(), json),
            Commands::Streak => cmd_streak(data_dir.as_deref(), json),
            Commands::Badges => cmd_badges(data_dir.as_deref(), json),
            Commands::Calendar(args) => cmd_calendar(args, data_dir.as_deref(), json),

            // Profile / export / journal
            Commands::Profile(args) => cmd_profile(args, data_dir.as_deref(), json),
            Commands::Export(args) => cmd_export(args, data_dir.as_deref(), json),
            Commands::Journal(args) => cmd_journal(args, data_dir.as_deref(), json),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn resolve_workspace_dir(data_dir: Option<&str>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    paths::resolve_workspace_dir(data_dir, paths::Caller::Cli)
}

fn open_store(dir: &Path) -> Result<Store, Box<dyn std::error::Error>> {
    let (store, _) = Store::open(dir, Local::now().date_naive())?;
    Ok(store)
}

fn parse_date_arg(s: Option<&str>) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    match s {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| format!("invalid date '{}' (expected YYYY-MM-DD)", s).into()),
        None => Ok(Local::now().date_naive()),
    }
}

fn parse_category_arg(s: &str) -> Result<Category, Box<dyn std::error::Error>> {
    Category::parse(s).ok_or_else(|| {
        format!(
            "unknown category '{}' (expected: Work, Personal, Health, Learning, Urgent)",
            s
        )
        .into()
    })
}

fn parse_routine_category_arg(s: &str) -> Result<RoutineCategory, Box<dyn std::error::Error>> {
    RoutineCategory::parse(s).ok_or_else(|| {
        format!(
            "unknown routine category '{}' (expected: Focus, Health, Break, Sleep, Work)",
            s
        )
        .into()
    })
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Announce a level boundary crossing (the one-shot level-up signal)
fn print_level_change(applied: &Applied, level: u32) {
    use crate::model::progress::LevelChange;
    match applied.level_change() {
        LevelChange::LevelUp => println!("★ level up! you are now level {}", level),
        LevelChange::LevelDown => println!("level down to {}", level),
        LevelChange::None => {}
    }
}

/// Ask a y/N question on stdout, reading the answer from stdin
fn confirm(prompt: &str) -> Result<bool, Box<dyn std::error::Error>> {
    print!("{} [y/N] ", prompt);
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y"))
}

// ---------------------------------------------------------------------------
// Task commands
// ---------------------------------------------------------------------------

fn cmd_add(
    args: AddArgs,
    data_dir: Option<&str>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = resolve_workspace_dir(data_dir)?;
    let _lock = FileLock::acquire_default(&dir)?;
    let mut store = open_store(&dir)?;

    let applied = store.apply_local(Mutation::AddTask {
        title: args.title,
        category: parse_category_arg(&args.category)?,
        date: parse_date_arg(args.date.as_deref())?,
        start_time: args.start,
        end_time: args.end,
        kind: TaskType::OneOff,
    })?;

    let Applied::TaskAdded { id } = &applied else {
        unreachable!("AddTask produces TaskAdded");
    };
    if json {
        print_json(&serde_json::json!({ "id": id }))?;
    } else {
        let task = store.aggregate().find_task(id).expect("task just added");
        println!("added {}", format_task_line(task));
    }
    Ok(())
}

fn cmd_toggle(
    args: IdArg,
    data_dir: Option<&str>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = resolve_workspace_dir(data_dir)?;
    let _lock = FileLock::acquire_default(&dir)?;
    let mut store = open_store(&dir)?;

    let applied = store.apply_local(Mutation::ToggleTask {
        id: args.id.clone(),
    })?;
    let Applied::TaskToggled { completed, .. } = &applied else {
        unreachable!("ToggleTask produces TaskToggled");
    };
    let completed = *completed;
    let progress = store.aggregate().progress;

    if json {
        use crate::model::progress::LevelChange;
        print_json(&ToggleJson {
            id: &args.id,
            completed,
            xp: progress.xp,
            level: progress.level,
            level_up: applied.level_change() == LevelChange::LevelUp,
        })?;
    } else {
        if completed {
            println!("completed {} (+20 xp)", args.id);
        } else {
            println!("reopened {} (-20 xp)", args.id);
        }
        print_level_change(&applied, progress.level);
    }
    Ok(())
}

fn cmd_rm(args: RmArgs, data_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let dir = resolve_workspace_dir(data_dir)?;
    let _lock = FileLock::acquire_default(&dir)?;
    let mut store = open_store(&dir)?;

    let title = store
        .aggregate()
        .find_task(&args.id)
        .map(|t| t.title.clone())
        .ok_or_else(|| format!("task not found: {}", args.id))?;

    if !args.yes && !confirm(&format!("delete task {} \"{}\"?", args.id, title))? {
        println!("cancelled");
        return Ok(());
    }

    store.apply_local(Mutation::DeleteTask { id: args.id.clone() })?;
    println!("deleted {}", args.id);
    Ok(())
}

fn cmd_list(
    args: ListArgs,
    data_dir: Option<&str>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = resolve_workspace_dir(data_dir)?;
    let store = open_store(&dir)?;
    let agg = store.aggregate();

    let category = args
        .category
        .as_deref()
        .map(parse_category_arg)
        .transpose()?;

    let tasks: Vec<&crate::model::task::Task> = if args.all {
        let mut all: Vec<_> = agg.tasks.iter().collect();
        all.sort_by(|a, b| (a.date, &a.start_time).cmp(&(b.date, &b.start_time)));
        all
    } else {
        agg.tasks_on(parse_date_arg(args.date.as_deref())?)
    };
    let tasks: Vec<_> = tasks
        .into_iter()
        .filter(|t| category.is_none_or(|c| t.category == c))
        .collect();

    if json {
        let out: Vec<TaskJson> = tasks.iter().map(|t| task_to_json(t)).collect();
        return print_json(&out);
    }

    if tasks.is_empty() {
        println!("no tasks");
        return Ok(());
    }
    let mut last_date: Option<NaiveDate> = None;
    for task in tasks {
        if args.all && last_date != Some(task.date) {
            println!("{}", task.date.format("%Y-%m-%d (%A)"));
            last_date = Some(task.date);
        }
        println!("{}", format_task_line(task));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Routine commands
// ---------------------------------------------------------------------------

fn cmd_routine(
    args: RoutineCmd,
    data_dir: Option<&str>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = resolve_workspace_dir(data_dir)?;
    let date = parse_date_arg(args.date.as_deref())?;

    match args.action {
        None => {
            let store = open_store(&dir)?;
            let agg = store.aggregate();
            let checked = agg.routine_completed_on(date);

            if json {
                let out: Vec<RoutineItemJson> = agg
                    .custom_routine
                    .iter()
                    .map(|item| routine_to_json(item, checked.contains(&item.id)))
                    .collect();
                return print_json(&out);
            }

            for item in &agg.custom_routine {
                println!("{}", format_routine_line(item, checked.contains(&item.id)));
            }
            let dc = stats::routine_day_completion(&agg.custom_routine, &agg.routine_history, date);
            println!("{}/{} done ({}%)", dc.completed, dc.total, dc.percent());
            Ok(())
        }
        Some(RoutineAction::Add(add)) => {
            let _lock = FileLock::acquire_default(&dir)?;
            let mut store = open_store(&dir)?;
            let applied = store.apply_local(Mutation::AddRoutineItem {
                activity: add.activity,
                category: parse_routine_category_arg(&add.category)?,
                start_time: add.start,
                end_time: add.end,
            })?;
            let Applied::RoutineAdded { id } = &applied else {
                unreachable!("AddRoutineItem produces RoutineAdded");
            };
            if json {
                print_json(&serde_json::json!({ "id": id }))?;
            } else {
                println!("added routine item {}", id);
            }
            Ok(())
        }
        Some(RoutineAction::Edit(edit)) => {
            let _lock = FileLock::acquire_default(&dir)?;
            let mut store = open_store(&dir)?;
            let current = store
                .aggregate()
                .find_routine_item(&edit.id)
                .cloned()
                .ok_or_else(|| format!("routine item not found: {}", edit.id))?;
            store.apply_local(Mutation::UpdateRoutineItem {
                id: edit.id.clone(),
                activity: edit.activity.unwrap_or(current.activity),
                category: edit
                    .category
                    .as_deref()
                    .map(parse_routine_category_arg)
                    .transpose()?
                    .unwrap_or(current.category),
                start_time: edit.start.unwrap_or(current.start_time),
                end_time: edit.end.unwrap_or(current.end_time),
            })?;
            println!("updated {}", edit.id);
            Ok(())
        }
        Some(RoutineAction::Rm(rm)) => {
            let _lock = FileLock::acquire_default(&dir)?;
            let mut store = open_store(&dir)?;
            store.apply_local(Mutation::DeleteRoutineItem { id: rm.id.clone() })?;
            println!("deleted routine item {} (history kept)", rm.id);
            Ok(())
        }
        Some(RoutineAction::Check(check)) => {
            let date = parse_date_arg(check.date.as_deref())?;
            let _lock = FileLock::acquire_default(&dir)?;
            let mut store = open_store(&dir)?;
            let applied = store.apply_local(Mutation::ToggleRoutineItem {
                id: check.id.clone(),
                date,
            })?;
            let Applied::RoutineToggled { checked, .. } = &applied else {
                unreachable!("ToggleRoutineItem produces RoutineToggled");
            };
            if *checked {
                println!("checked {} for {} (+10 xp)", check.id, date);
            } else {
                println!("unchecked {} for {} (-10 xp)", check.id, date);
            }
            print_level_change(&applied, store.aggregate().progress.level);
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Derived views
// ---------------------------------------------------------------------------

fn cmd_stats(data_dir: Option<&str>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let dir = resolve_workspace_dir(data_dir)?;
    let store = open_store(&dir)?;
    let agg = store.aggregate();
    let by_cat = stats::by_category(&agg.tasks);

    if json {
        return print_json(&StatsJson {
            total: agg.tasks.len() as u32,
            completed: agg.completed_count(),
            xp: agg.progress.xp,
            level: agg.progress.level,
            by_category: by_cat.iter().map(category_stat_to_json).collect(),
        });
    }

    println!(
        "tasks:     {} / {}",
        agg.completed_count(),
        agg.tasks.len()
    );
    println!("progress:  {}", format_progress(&agg.progress));
    for line in format_category_stats(&by_cat) {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_streak(data_dir: Option<&str>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let dir = resolve_workspace_dir(data_dir)?;
    let store = open_store(&dir)?;
    let summary = stats::streaks(&store.aggregate().tasks, Local::now().date_naive());

    if json {
        return print_json(&streak_to_json(&summary));
    }
    for line in format_streak(&summary) {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_badges(data_dir: Option<&str>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let dir = resolve_workspace_dir(data_dir)?;
    let store = open_store(&dir)?;
    let statuses = badge_ops::evaluate(store.aggregate(), Local::now().date_naive());

    if json {
        let out: Vec<BadgeJson> = statuses.iter().map(badge_to_json).collect();
        return print_json(&out);
    }
    for status in &statuses {
        println!("{}", format_badge_line(status));
    }
    Ok(())
}

fn cmd_calendar(
    args: CalendarArgs,
    data_dir: Option<&str>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = resolve_workspace_dir(data_dir)?;
    let store = open_store(&dir)?;

    let (year, month) = match args.month.as_deref() {
        Some(s) => parse_month(s)?,
        None => {
            let today = Local::now().date_naive();
            (today.year(), today.month())
        }
    };
    let grid = calendar::month_grid(&store.aggregate().tasks, year, month)
        .ok_or_else(|| format!("invalid month: {}-{:02}", year, month))?;

    if json {
        return print_json(&calendar_to_json(&grid));
    }
    for line in format_month_grid(&grid) {
        println!("{}", line);
    }
    Ok(())
}

fn parse_month(s: &str) -> Result<(i32, u32), Box<dyn std::error::Error>> {
    let err = || format!("invalid month '{}' (expected YYYY-MM)", s);
    let (y, m) = s.split_once('-').ok_or_else(err)?;
    let year: i32 = y.parse().map_err(|_| err())?;
    let month: u32 = m.parse().map_err(|_| err())?;
    if !(1..=12).contains(&month) {
        return Err(err().into());
    }
    Ok((year, month))
}

// ---------------------------------------------------------------------------
// Profile / export / journal
// ---------------------------------------------------------------------------

fn cmd_profile(
    args: ProfileCmd,
    data_dir: Option<&str>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = resolve_workspace_dir(data_dir)?;

    match args.action {
        None | Some(ProfileAction::Show) => {
            let store = open_store(&dir)?;
            let profile = &store.aggregate().profile;
            if json {
                return print_json(profile);
            }
            for line in format_profile(profile) {
                println!("{}", line);
            }
            Ok(())
        }
        Some(ProfileAction::Set(set)) => {
            let _lock = FileLock::acquire_default(&dir)?;
            let mut store = open_store(&dir)?;
            let mut profile = store.aggregate().profile.clone();
            if let Some(name) = set.name {
                profile.name = name;
            }
            if let Some(age) = set.age {
                profile.age = age;
            }
            if let Some(profession) = set.profession {
                profile.profession = profession;
            }
            if let Some(goal) = set.goal {
                profile.goal = goal;
            }
            if let Some(bio) = set.bio {
                profile.bio = bio;
            }
            store.apply_local(Mutation::SetProfile(profile))?;
            println!("profile updated");
            Ok(())
        }
    }
}

fn cmd_export(
    args: ExportArgs,
    data_dir: Option<&str>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = resolve_workspace_dir(data_dir)?;
    let store = open_store(&dir)?;

    let now = Local::now();
    let out = match args.out {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir()?.join(export::default_backup_name(now.date_naive())),
    };
    let path = export::export_backup(store.aggregate(), &out, now)?;

    if json {
        print_json(&serde_json::json!({ "path": path }))?;
    } else {
        println!("exported to {}", path.display());
    }
    Ok(())
}

fn cmd_journal(
    args: JournalCmd,
    data_dir: Option<&str>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = resolve_workspace_dir(data_dir)?;

    match args.action {
        None => {
            let limit = args.limit.unwrap_or(10);
            let entries = journal::read_entries(&dir, Some(limit));
            if json {
                let out: Vec<serde_json::Value> = entries
                    .iter()
                    .map(|e| {
                        serde_json::json!({
                            "timestamp": e.timestamp.to_rfc3339(),
                            "category": e.category.to_string(),
                            "description": e.description,
                        })
                    })
                    .collect();
                return print_json(&out);
            }
            if entries.is_empty() {
                println!("journal is empty");
                return Ok(());
            }
            for entry in entries {
                println!(
                    "{} [{}] {}",
                    entry
                        .timestamp
                        .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
                    entry.category,
                    entry.description
                );
                for (key, value) in &entry.fields {
                    println!("  {}: {}", key, value);
                }
            }
            Ok(())
        }
        Some(JournalAction::Prune(prune)) => {
            let removed = if prune.all {
                journal::prune_all(&dir)?
            } else {
                let cutoff = match prune.before.as_deref() {
                    Some(s) => chrono::DateTime::parse_from_rfc3339(s)
                        .map_err(|_| format!("invalid timestamp '{}' (expected RFC 3339)", s))?
                        .with_timezone(&Utc),
                    None => Utc::now() - chrono::Duration::days(journal::PRUNE_AGE_DAYS),
                };
                journal::prune_before(&dir, cutoff)?
            };
            println!("pruned {} entries", removed);
            Ok(())
        }
        Some(JournalAction::Path) => {
            println!("{}", journal::journal_path(&dir).display());
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Workspace management
// ---------------------------------------------------------------------------

fn cmd_workspace(args: WorkspaceCmd, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    match args.action {
        None | Some(WorkspaceAction::List) => {
            let (config, _) = config_io::read_config()?;
            let registry_file = registry::read_registry();
            if json {
                let out: Vec<serde_json::Value> = registry_file
                    .workspaces
                    .iter()
                    .map(|w| {
                        serde_json::json!({
                            "name": w.name,
                            "path": w.path,
                            "active": config.workspace.active.as_deref() == Some(w.name.as_str()),
                        })
                    })
                    .collect();
                return print_json(&out);
            }
            if registry_file.workspaces.is_empty() {
                println!("no workspaces (run `lo init <name>`)");
                return Ok(());
            }
            for w in &registry_file.workspaces {
                let marker = if config.workspace.active.as_deref() == Some(w.name.as_str()) {
                    "*"
                } else {
                    " "
                };
                println!("{} {}  {}", marker, w.name, w.path);
            }
            Ok(())
        }
        Some(WorkspaceAction::Use(use_args)) => {
            let (config, mut doc) = config_io::read_config()?;
            let registry_file = registry::read_registry();
            if registry_file.find(&use_args.name).is_none() {
                // Accept an unregistered workspace if its data already exists
                let dir = paths::data_root_from(&config).join(&use_args.name);
                if !crate::store::document::document_path(&dir).exists() {
                    return Err(format!(
                        "unknown workspace \"{}\" (run `lo init {}` or `lo workspace add`)",
                        use_args.name, use_args.name
                    )
                    .into());
                }
                registry::register_workspace(&use_args.name, &dir);
            }
            config_io::set_active_workspace(&mut doc, &use_args.name);
            config_io::write_config(&doc)?;
            println!("active workspace: {}", use_args.name);
            Ok(())
        }
        Some(WorkspaceAction::Add(add)) => {
            let dir = PathBuf::from(&add.path);
            registry::register_workspace(&add.name, &dir);
            println!("registered {}  {}", add.name, dir.display());
            Ok(())
        }
        Some(WorkspaceAction::Rm(rm)) => {
            if !registry::remove_workspace(&rm.name) {
                return Err(format!("unknown workspace \"{}\"", rm.name).into());
            }
            // Signing out of a removed identity
            let (config, mut doc) = config_io::read_config()?;
            if config.workspace.active.as_deref() == Some(rm.name.as_str()) {
                config_io::clear_active_workspace(&mut doc);
                config_io::write_config(&doc)?;
            }
            println!("removed {} from the registry (data kept on disk)", rm.name);
            Ok(())
        }
        Some(WorkspaceAction::Logout) => {
            let (_, mut doc) = config_io::read_config()?;
            config_io::clear_active_workspace(&mut doc);
            config_io::write_config(&doc)?;
            println!("signed out");
            Ok(())
        }
    }
}
