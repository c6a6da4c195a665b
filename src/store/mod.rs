//! Index store adapter.
//!
//! The store keeps one document per chunk, addressed by its
//! content-derived id, with `filePath` declared filterable so a whole
//! file can be removed with one equality-filter delete.

mod memory;
mod models;
mod rest;

use async_trait::async_trait;

use crate::Result;

pub use memory::MemoryStore;
pub use models::{Document, StoreStats, TaskRecord};
pub use rest::RestStore;

/// Write surface of the search index.
///
/// `batch_size` arguments are validated at the configuration boundary
/// and are always nonzero here.
#[async_trait]
pub trait IndexStore: Send + Sync {
    /// Create the collection if absent and configure its vector field
    /// dimension and filterable attributes. Idempotent; a concurrent
    /// "already exists" on creation is success.
    async fn ensure_index(&self, dimension: usize) -> Result<()>;

    /// Upsert documents in fixed-size sequential batches.
    ///
    /// A no-op for empty input. A failed batch aborts the call with the
    /// batch offset and backend status.
    async fn add_documents(&self, docs: &[Document], batch_size: usize) -> Result<()>;

    /// Delete every document whose `filePath` equals `file_path`.
    /// A "not found" response is success.
    async fn delete_by_file_path(&self, file_path: &str) -> Result<()>;

    /// Replace a file's documents: delete, then insert.
    ///
    /// Not transactional. Between the two steps a concurrent reader
    /// observes the file's documents as absent; this is an accepted
    /// availability trade-off.
    async fn reindex_file(
        &self,
        file_path: &str,
        docs: &[Document],
        batch_size: usize,
    ) -> Result<()> {
        self.delete_by_file_path(file_path).await?;
        self.add_documents(docs, batch_size).await
    }

    /// Collection statistics.
    async fn stats(&self) -> Result<StoreStats>;

    /// Most recent task records, newest first. Best-effort: callers
    /// treat a failure here as non-fatal.
    async fn recent_tasks(&self, limit: usize) -> Result<Vec<TaskRecord>>;
}
