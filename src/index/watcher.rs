//! Debounced filesystem subscription feeding the change queue.

use std::path::Path;
use std::sync::Arc;

use notify::event::ModifyKind;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use notify_debouncer_full::{
    new_debouncer, DebounceEventResult, DebouncedEvent, Debouncer, FileIdMap,
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::events::FileEvent;
use super::indexer::{IndexSummary, Indexer};
use super::queue::ChangeWorker;
use crate::config::Config;
use crate::error::WatchError;
use crate::identity::rel_path_key;
use crate::scan::{is_indexable, is_rule_file, IgnoreRules};
use crate::Result;

/// Bound on buffered, not-yet-processed change events.
const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Owns the filesystem subscription and the change queue worker.
pub struct WatcherHandle {
    debouncer: Debouncer<RecommendedWatcher, FileIdMap>,
    worker: JoinHandle<()>,
}

impl WatcherHandle {
    /// Subscribe to the tree, run the initial rebuild, start the worker.
    ///
    /// The subscription is established before the rebuild, so changes
    /// made while the rebuild runs buffer in the channel and are
    /// processed by the worker afterwards; nothing between scan and
    /// watch start is lost.
    ///
    /// # Errors
    ///
    /// Returns an error if the ignore rules cannot be loaded, the
    /// filesystem subscription cannot be established, or the initial
    /// rebuild fails outside the per-file scope.
    pub async fn start(config: &Config, indexer: Arc<Indexer>) -> Result<(Self, IndexSummary)> {
        let root = config.root.clone();
        let rules = IgnoreRules::load(&root)?;
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

        let callback_root = root.clone();
        let mut debouncer = new_debouncer(
            config.debounce(),
            None,
            move |result: DebounceEventResult| match result {
                Ok(events) => {
                    for event in events {
                        for file_event in classify_event(&callback_root, &event) {
                            // blocking_send: the notify callback runs on
                            // its own thread, not the tokio runtime
                            if event_tx.blocking_send(file_event).is_err() {
                                tracing::warn!("Event channel closed, dropping filesystem event");
                                return;
                            }
                        }
                    }
                }
                Err(errors) => {
                    for error in errors {
                        tracing::error!(error = %error, "Watch error");
                    }
                }
            },
        )
        .map_err(|e| WatchError::WatchFailed {
            path: root.display().to_string(),
            reason: e.to_string(),
        })?;

        debouncer
            .watcher()
            .watch(&root, RecursiveMode::Recursive)
            .map_err(|e| WatchError::WatchFailed {
                path: root.display().to_string(),
                reason: e.to_string(),
            })?;
        debouncer.cache().add_root(&root, RecursiveMode::Recursive);
        tracing::info!(path = %root.display(), "Watching tree");

        let summary = indexer.rebuild(&rules).await?;

        let worker = tokio::spawn(ChangeWorker::new(indexer, rules, root, event_rx).run());

        Ok((Self { debouncer, worker }, summary))
    }

    /// Stop accepting filesystem events and wait for the worker.
    ///
    /// Dropping the subscription closes the event channel; the worker
    /// drains already-queued tasks and finishes the in-flight one, so
    /// no delete/insert pair is cut in half.
    pub async fn close(self) {
        let Self { debouncer, worker } = self;
        drop(debouncer);
        if let Err(err) = worker.await {
            tracing::error!(error = %err, "Change worker panicked");
        }
    }
}

/// Map one debounced notify event to typed change events.
///
/// Rule-file changes of any kind become [`FileEvent::IgnoreRulesChanged`].
/// Added/Modified carry only extension-eligible files; Removed is
/// unconditional. Paths outside the root and bare directory events are
/// dropped.
fn classify_event(root: &Path, event: &DebouncedEvent) -> Vec<FileEvent> {
    let mut out = Vec::new();

    for path in &event.paths {
        let Some(rel) = rel_path_key(root, path) else {
            continue;
        };

        if is_rule_file(&rel) {
            out.push(FileEvent::IgnoreRulesChanged);
            continue;
        }

        match event.kind {
            EventKind::Create(_) => {
                if path.is_file() && is_indexable(path) {
                    out.push(FileEvent::Added(rel));
                }
            }
            EventKind::Remove(_) => {
                out.push(FileEvent::Removed(rel));
            }
            EventKind::Modify(ModifyKind::Name(_)) => {
                // Renames surface as name changes on each side; fall
                // back on what exists now
                if path.is_file() {
                    if is_indexable(path) {
                        out.push(FileEvent::Added(rel));
                    }
                } else if !path.exists() {
                    out.push(FileEvent::Removed(rel));
                }
            }
            EventKind::Modify(_) | EventKind::Any | EventKind::Other => {
                if path.is_file() {
                    if is_indexable(path) {
                        out.push(FileEvent::Modified(rel));
                    }
                } else if !path.exists() {
                    out.push(FileEvent::Removed(rel));
                }
            }
            EventKind::Access(_) => {}
        }
    }

    out
}
