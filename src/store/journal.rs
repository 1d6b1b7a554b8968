use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;

/// Default number of days before entries are prunable.
pub const PRUNE_AGE_DAYS: i64 = 30;

/// Self-documenting header written at the top of a new journal.
const FILE_HEADER: &str = "\
<!-- lifeos journal: append-only record of write failures and sync events.
     If a save went missing, the document body is preserved here.
     View with: lo journal
     Prune old entries: lo journal prune
     Safe to delete if empty or stale. -->

---
";

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// Category of a journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalCategory {
    Write,
    Sync,
    Validation,
}

impl fmt::Display for JournalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JournalCategory::Write => write!(f, "write"),
            JournalCategory::Sync => write!(f, "sync"),
            JournalCategory::Validation => write!(f, "validation"),
        }
    }
}

impl JournalCategory {
    pub fn parse_category(s: &str) -> Option<Self> {
        match s {
            "write" => Some(JournalCategory::Write),
            "sync" => Some(JournalCategory::Sync),
            "validation" => Some(JournalCategory::Validation),
            _ => None,
        }
    }
}

/// A single entry in the journal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntry {
    pub timestamp: DateTime<Utc>,
    pub category: JournalCategory,
    pub description: String,
    pub fields: Vec<(String, String)>,
    pub body: String,
}

/// Return the path to the journal file inside a workspace directory.
pub fn journal_path(workspace_dir: &Path) -> PathBuf {
    workspace_dir.join("journal.log")
}

// ---------------------------------------------------------------------------
// Atomic file write
// ---------------------------------------------------------------------------

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

impl JournalEntry {
    fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "## {} [{}] {}\n",
            self.timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            self.category,
            self.description,
        ));
        out.push('\n');
        for (key, value) in &self.fields {
            out.push_str(&format!("{}: {}\n", key, value));
        }
        if !self.body.is_empty() {
            out.push('\n');
            out.push_str("```text\n");
            out.push_str(&self.body);
            if !self.body.ends_with('\n') {
                out.push('\n');
            }
            out.push_str("```\n");
        }
        out.push('\n');
        out.push_str("---\n");
        out
    }
}

/// Append an entry to the journal. Errors are swallowed and printed to
/// stderr; journaling must never take the application down.
pub fn log_event(workspace_dir: &Path, entry: JournalEntry) {
    if let Err(e) = log_event_inner(workspace_dir, entry) {
        eprintln!("warning: could not write to journal: {}", e);
    }
}

fn log_event_inner(workspace_dir: &Path, entry: JournalEntry) -> io::Result<()> {
    let path = journal_path(workspace_dir);
    let needs_header = !path.exists() || std::fs::metadata(&path).map_or(true, |m| m.len() == 0);

    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
    if needs_header {
        file.write_all(FILE_HEADER.as_bytes())?;
    }
    file.write_all(entry.to_markdown().as_bytes())?;
    Ok(())
}

/// Journal a failed document write, preserving the serialized body.
pub fn log_write_failure(workspace_dir: &Path, error: &dyn fmt::Display, document_json: &str) {
    log_event(
        workspace_dir,
        JournalEntry {
            timestamp: Utc::now(),
            category: JournalCategory::Write,
            description: "document write failed".to_string(),
            fields: vec![("Error".to_string(), error.to_string())],
            body: document_json.to_string(),
        },
    );
}

// ---------------------------------------------------------------------------
// Reading entries
// ---------------------------------------------------------------------------

/// Read journal entries, most recent first.
pub fn read_entries(workspace_dir: &Path, limit: Option<usize>) -> Vec<JournalEntry> {
    let path = journal_path(workspace_dir);
    let content = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(_) => return Vec::new(),
    };

    let mut entries = parse_entries(&content);
    if let Some(n) = limit {
        let skip = entries.len().saturating_sub(n);
        entries = entries.into_iter().skip(skip).collect();
    }
    entries.reverse();
    entries
}

fn parse_entries(content: &str) -> Vec<JournalEntry> {
    let mut entries = Vec::new();
    let mut lines = content.lines().peekable();

    while let Some(line) = lines.next() {
        if !line.starts_with("## ") {
            continue;
        }
        let Some(mut entry) = parse_entry_header(&line[3..]) else {
            continue;
        };

        let mut in_code_block = false;
        for line in lines.by_ref() {
            if line == "---" && !in_code_block {
                break;
            }
            if in_code_block {
                if line == "```" {
                    in_code_block = false;
                } else {
                    if !entry.body.is_empty() {
                        entry.body.push('\n');
                    }
                    entry.body.push_str(line);
                }
                continue;
            }
            if line == "```text" {
                in_code_block = true;
                continue;
            }
            if let Some((key, value)) = line.split_once(": ") {
                entry.fields.push((key.to_string(), value.to_string()));
            }
        }
        entries.push(entry);
    }
    entries
}

/// Parse `<timestamp> [<category>] <description>`
fn parse_entry_header(header: &str) -> Option<JournalEntry> {
    let (ts_str, rest) = header.split_once(" [")?;
    let (cat_str, description) = rest.split_once("] ")?;
    let timestamp = DateTime::parse_from_rfc3339(ts_str).ok()?.with_timezone(&Utc);
    let category = JournalCategory::parse_category(cat_str)?;
    Some(JournalEntry {
        timestamp,
        category,
        description: description.to_string(),
        fields: Vec::new(),
        body: String::new(),
    })
}

// ---------------------------------------------------------------------------
// Pruning
// ---------------------------------------------------------------------------

/// Remove entries older than `cutoff`. Returns the number removed.
pub fn prune_before(workspace_dir: &Path, cutoff: DateTime<Utc>) -> io::Result<usize> {
    let path = journal_path(workspace_dir);
    if !path.exists() {
        return Ok(0);
    }
    let content = std::fs::read_to_string(&path)?;
    let entries = parse_entries(&content);
    let kept: Vec<&JournalEntry> = entries.iter().filter(|e| e.timestamp >= cutoff).collect();
    let removed = entries.len() - kept.len();
    if removed == 0 {
        return Ok(0);
    }

    let mut out = String::from(FILE_HEADER);
    for entry in kept {
        out.push_str(&entry.to_markdown());
    }
    atomic_write(&path, out.as_bytes())?;
    Ok(removed)
}

/// Remove the journal entirely.
pub fn prune_all(workspace_dir: &Path) -> io::Result<usize> {
    let path = journal_path(workspace_dir);
    if !path.exists() {
        return Ok(0);
    }
    let content = std::fs::read_to_string(&path)?;
    let count = parse_entries(&content).len();
    std::fs::remove_file(&path)?;
    Ok(count)
}
