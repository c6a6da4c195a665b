//! Single-consumer change queue worker.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;

use super::events::FileEvent;
use super::indexer::Indexer;
use crate::scan::IgnoreRules;
use crate::Result;

/// FIFO worker over the change event channel.
///
/// Processes one task at a time, so per-path and cross-path races at
/// the store cannot happen. A failed task is logged and the worker
/// moves on; nothing is retried automatically. The worker owns the
/// indexer and the reloadable ignore rules for its lifetime.
pub struct ChangeWorker {
    indexer: Arc<Indexer>,
    rules: IgnoreRules,
    root: PathBuf,
    events: mpsc::Receiver<FileEvent>,
}

impl ChangeWorker {
    /// Create a worker consuming `events`.
    #[must_use]
    pub fn new(
        indexer: Arc<Indexer>,
        rules: IgnoreRules,
        root: PathBuf,
        events: mpsc::Receiver<FileEvent>,
    ) -> Self {
        Self {
            indexer,
            rules,
            root,
            events,
        }
    }

    /// Consume events until the channel closes.
    pub async fn run(mut self) {
        tracing::info!("Change worker started");

        while let Some(event) = self.events.recv().await {
            if let Err(err) = self.handle(&event).await {
                tracing::error!(?event, error = %err, "Task failed, continuing with later events");
            }
        }

        tracing::info!("Event channel closed, change worker stopping");
    }

    async fn handle(&mut self, event: &FileEvent) -> Result<()> {
        match event {
            FileEvent::Added(path) | FileEvent::Modified(path) => {
                if self.rules.is_ignored(path, false) {
                    tracing::debug!(path = %path, "Change to ignored path, skipping");
                    return Ok(());
                }
                let abs = self.root.join(path);
                self.indexer.reindex_file(path, &abs).await?;
            }
            FileEvent::Removed(path) => {
                self.indexer.remove_file(path).await?;
            }
            FileEvent::IgnoreRulesChanged => {
                // A failed reload keeps the previous rules in place
                self.rules = IgnoreRules::load(&self.root)?;
                let summary = self.indexer.rebuild(&self.rules).await?;
                tracing::info!(
                    files = summary.files_indexed,
                    chunks = summary.chunks_indexed,
                    "Rebuilt index after ignore rule change"
                );
            }
        }
        Ok(())
    }
}
