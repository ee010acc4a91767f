//! Watches a schema file and reports debounced changes.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::time::Duration;

use notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{new_debouncer, DebouncedEvent, Debouncer};

use crate::error::{CliResult, WatchError};

/// Event types for schema changes.
#[derive(Debug, Clone, PartialEq)]
pub enum WatchEvent {
    /// The schema was written.
    Modified(PathBuf),
    /// The schema was removed or renamed away.
    Deleted(PathBuf),
    /// The watcher reported an error.
    Error(String),
}

/// Watches one schema file.
///
/// Editors often replace files instead of writing in place, so the parent
/// directory is watched and events are filtered down to the schema path.
pub struct FileWatcher {
    schema: PathBuf,
    debounce_ms: u64,
}

impl FileWatcher {
    pub fn new(schema: impl Into<PathBuf>) -> Self {
        Self {
            schema: schema.into(),
            debounce_ms: 500,
        }
    }

    /// Set the debounce duration in milliseconds.
    pub fn with_debounce(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    /// Start watching.
    ///
    /// The returned debouncer must be kept alive for events to arrive.
    pub fn watch(&self) -> CliResult<(Debouncer<RecommendedWatcher>, Receiver<WatchEvent>)> {
        let (tx, rx) = channel::<WatchEvent>();
        let schema = absolute(&self.schema);
        let directory = match schema.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let target = schema.clone();
        let mut debouncer = new_debouncer(
            Duration::from_millis(self.debounce_ms),
            move |result: Result<Vec<DebouncedEvent>, notify::Error>| match result {
                Ok(events) => {
                    if let Some(event) = classify(&target, &events) {
                        let _ = tx.send(event);
                    }
                }
                Err(e) => {
                    let _ = tx.send(WatchEvent::Error(e.to_string()));
                }
            },
        )
        .map_err(|e| WatchError::Init(e.to_string()))?;

        debouncer
            .watcher()
            .watch(&directory, RecursiveMode::NonRecursive)
            .map_err(|e| WatchError::Init(e.to_string()))?;

        tracing::debug!(path = %schema.display(), "watching schema");
        Ok((debouncer, rx))
    }

    pub fn schema(&self) -> &Path {
        &self.schema
    }
}

/// Collapse one debounced batch into at most one event for `schema`.
fn classify(schema: &Path, events: &[DebouncedEvent]) -> Option<WatchEvent> {
    events
        .iter()
        .any(|event| absolute(&event.path) == schema)
        .then(|| {
            if schema.exists() {
                WatchEvent::Modified(schema.to_path_buf())
            } else {
                WatchEvent::Deleted(schema.to_path_buf())
            }
        })
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

impl WatchEvent {
    pub fn path(&self) -> Option<&Path> {
        match self {
            WatchEvent::Modified(p) | WatchEvent::Deleted(p) => Some(p),
            WatchEvent::Error(_) => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, WatchEvent::Error(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            WatchEvent::Error(msg) => Some(msg),
            _ => None,
        }
    }
}
