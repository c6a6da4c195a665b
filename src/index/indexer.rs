//! File-to-documents indexing pipeline.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::chunker::chunk_lines;
use crate::config::Config;
use crate::embeddings::Embedder;
use crate::identity::file_hash;
use crate::scan::{IgnoreRules, TreeScan};
use crate::store::{Document, IndexStore};
use crate::Result;

/// Counters for one rebuild or incremental pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexSummary {
    /// Files whose documents were written.
    pub files_indexed: usize,
    /// Documents written across those files.
    pub chunks_indexed: usize,
}

/// Indexing pipeline: read, hash, chunk, embed, delete-then-insert.
///
/// Every pass over a file replaces its documents wholesale. Unchanged
/// content converges because its content-addressed ids are identical,
/// making the re-insert an upsert no-op at the store; there is no
/// previous-vs-new hash comparison.
pub struct Indexer {
    root: PathBuf,
    chunk_lines: usize,
    chunk_overlap: usize,
    max_file_bytes: u64,
    batch_size: usize,
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn IndexStore>,
    // Paths this process has written, used to sweep stale documents on
    // rebuild. Process-local: concurrent indexers are unsupported.
    written: Mutex<HashSet<String>>,
}

impl Indexer {
    /// Create an indexer over `config.root`.
    #[must_use]
    pub fn new(config: &Config, embedder: Arc<dyn Embedder>, store: Arc<dyn IndexStore>) -> Self {
        Self {
            root: config.root.clone(),
            chunk_lines: config.chunk_lines,
            chunk_overlap: config.chunk_overlap,
            max_file_bytes: config.max_file_bytes,
            batch_size: config.batch_size,
            embedder,
            store,
            written: Mutex::new(HashSet::new()),
        }
    }

    /// Discover the vector dimension and configure the collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimension probe or collection setup
    /// fails; an indexer that cannot configure its collection must not
    /// start writing.
    pub async fn prepare(&self) -> Result<()> {
        let dimension = self.embedder.dimension().await?;
        self.store.ensure_index(dimension).await?;
        tracing::info!(dimension, "Index collection ready");
        Ok(())
    }

    /// Rescan the whole tree and reindex every eligible file.
    ///
    /// One file's failure is logged and does not abort the rebuild.
    /// Afterwards, documents for previously written paths the scan no
    /// longer yielded are deleted.
    ///
    /// # Errors
    ///
    /// Returns an error only for failures outside the per-file scope.
    pub async fn rebuild(&self, rules: &IgnoreRules) -> Result<IndexSummary> {
        let previous: HashSet<String> = self.written.lock().clone();

        let files: Vec<_> = TreeScan::new(&self.root, rules).collect();
        tracing::info!(files = files.len(), "Rebuilding index");

        let mut summary = IndexSummary::default();
        let mut seen = HashSet::new();

        for file in files {
            seen.insert(file.rel_path.clone());
            match self.reindex_file(&file.rel_path, &file.abs_path).await {
                Ok(0) => {}
                Ok(chunks) => {
                    summary.files_indexed += 1;
                    summary.chunks_indexed += chunks;
                }
                Err(err) => {
                    tracing::error!(path = %file.rel_path, error = %err, "Failed to index file");
                }
            }
        }

        // Previously written paths the scan no longer yields are stale.
        // Paths that merely failed above were yielded, so they are kept
        // for the next touch or rebuild.
        for path in previous {
            if !seen.contains(&path) {
                if let Err(err) = self.remove_file(&path).await {
                    tracing::error!(path = %path, error = %err, "Failed to remove stale documents");
                }
            }
        }

        tracing::info!(
            files = summary.files_indexed,
            chunks = summary.chunks_indexed,
            "Rebuild complete"
        );
        Ok(summary)
    }

    /// Reindex one file: delete its documents, then insert fresh ones.
    ///
    /// A vanished, unreadable, or non-UTF-8 file is skipped with a
    /// warning and `Ok(0)`. A file over the size ceiling has its
    /// documents deleted and is skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if chunking, embedding, or the store write
    /// fails.
    pub async fn reindex_file(&self, rel_path: &str, abs_path: &Path) -> Result<usize> {
        let metadata = match tokio::fs::metadata(abs_path).await {
            Ok(metadata) => metadata,
            Err(err) => {
                tracing::warn!(path = %rel_path, error = %err, "Skipping unreadable file");
                return Ok(0);
            }
        };

        if metadata.len() > self.max_file_bytes {
            tracing::info!(
                path = %rel_path,
                size = metadata.len(),
                limit = self.max_file_bytes,
                "File exceeds size ceiling, removing from index"
            );
            self.remove_file(rel_path).await?;
            return Ok(0);
        }

        let bytes = match tokio::fs::read(abs_path).await {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(path = %rel_path, error = %err, "Skipping unreadable file");
                return Ok(0);
            }
        };
        let Ok(text) = String::from_utf8(bytes) else {
            tracing::warn!(path = %rel_path, "Skipping non-UTF-8 file");
            return Ok(0);
        };

        let hash = file_hash(text.as_bytes());
        let chunks = chunk_lines(&text, self.chunk_lines, self.chunk_overlap)?;

        let texts: Vec<String> = chunks.iter().map(|chunk| chunk.content.clone()).collect();
        let vectors = self.embedder.embed_batch(&texts).await?;

        let docs: Vec<Document> = chunks
            .iter()
            .zip(vectors)
            .map(|(chunk, vector)| Document::from_chunk(rel_path, chunk, &hash, vector))
            .collect();

        self.store
            .reindex_file(rel_path, &docs, self.batch_size)
            .await?;
        self.written.lock().insert(rel_path.to_string());

        tracing::info!(path = %rel_path, chunks = docs.len(), "Indexed file");
        Ok(docs.len())
    }

    /// Delete all documents for a path.
    ///
    /// # Errors
    ///
    /// Returns an error if the store delete fails.
    pub async fn remove_file(&self, rel_path: &str) -> Result<()> {
        self.store.delete_by_file_path(rel_path).await?;
        if self.written.lock().remove(rel_path) {
            tracing::info!(path = %rel_path, "Removed file from index");
        }
        Ok(())
    }
}
