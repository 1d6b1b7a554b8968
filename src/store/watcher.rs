use std::path::Path;
use std::sync::mpsc;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::store::document::DOC_FILE;

/// Events sent from the document watcher to the TUI event loop.
#[derive(Debug)]
pub enum DocEvent {
    /// The aggregate document changed on disk (external writer)
    Changed,
}

/// Filesystem watcher over a workspace directory, filtered to the aggregate
/// document. This is the "realtime subscription" push path: an external
/// write surfaces here and is adopted via `Store::reload`.
pub struct DocWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<DocEvent>,
}

impl DocWatcher {
    /// Start watching the given workspace directory.
    /// `poll()` should be called from each event-loop tick.
    pub fn start(workspace_dir: &Path) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                let event = match result {
                    Ok(e) => e,
                    Err(_) => return,
                };
                match event.kind {
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {}
                    _ => return,
                }
                // Only the document itself matters; skip .state.json,
                // journal.log, .lock, and temp files from atomic writes
                let relevant = event
                    .paths
                    .iter()
                    .any(|p| p.file_name().and_then(|n| n.to_str()) == Some(DOC_FILE));
                if relevant {
                    let _ = tx.send(DocEvent::Changed);
                }
            },
            Config::default(),
        )?;

        watcher.watch(workspace_dir, RecursiveMode::NonRecursive)?;
        Ok(DocWatcher { _watcher: watcher, rx })
    }

    /// Non-blocking poll for pending document events.
    pub fn poll(&self) -> Vec<DocEvent> {
        let mut events = Vec::new();
        while let Ok(evt) = self.rx.try_recv() {
            events.push(evt);
        }
        events
    }
}
