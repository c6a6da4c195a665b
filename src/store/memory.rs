//! In-memory index store for tests.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::models::{Document, StoreStats, TaskRecord};
use super::IndexStore;
use crate::error::StoreError;
use crate::Result;

#[derive(Default)]
struct Inner {
    documents: HashMap<String, Document>,
    delete_calls: Vec<String>,
    ensured_dimension: Option<usize>,
    fail_upserts: bool,
}

/// Index store backed by a process-local map.
///
/// Records every delete call and the ensured dimension so tests can
/// assert on the adapter's traffic, and can inject upsert failures to
/// exercise error paths.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent upsert fail with a store error.
    pub fn set_fail_upserts(&self, fail: bool) {
        self.inner.lock().fail_upserts = fail;
    }

    /// All stored document ids, sorted.
    #[must_use]
    pub fn document_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.inner.lock().documents.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Number of stored documents for one file path.
    #[must_use]
    pub fn documents_for(&self, file_path: &str) -> usize {
        self.inner
            .lock()
            .documents
            .values()
            .filter(|doc| doc.file_path == file_path)
            .count()
    }

    /// Every `delete_by_file_path` argument seen so far, in call order.
    #[must_use]
    pub fn delete_calls(&self) -> Vec<String> {
        self.inner.lock().delete_calls.clone()
    }

    /// Dimension passed to the last `ensure_index` call.
    #[must_use]
    pub fn ensured_dimension(&self) -> Option<usize> {
        self.inner.lock().ensured_dimension
    }

    /// Total number of stored documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().documents.len()
    }

    /// Whether the store holds no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().documents.is_empty()
    }
}

#[async_trait]
impl IndexStore for MemoryStore {
    async fn ensure_index(&self, dimension: usize) -> Result<()> {
        self.inner.lock().ensured_dimension = Some(dimension);
        Ok(())
    }

    async fn add_documents(&self, docs: &[Document], _batch_size: usize) -> Result<()> {
        let mut inner = self.inner.lock();
        if inner.fail_upserts {
            return Err(StoreError::Api {
                status: 503,
                detail: "store unavailable".to_string(),
            }
            .into());
        }
        for doc in docs {
            inner.documents.insert(doc.id.clone(), doc.clone());
        }
        Ok(())
    }

    async fn delete_by_file_path(&self, file_path: &str) -> Result<()> {
        let mut inner = self.inner.lock();
        inner.delete_calls.push(file_path.to_string());
        inner.documents.retain(|_, doc| doc.file_path != file_path);
        Ok(())
    }

    async fn stats(&self) -> Result<StoreStats> {
        Ok(StoreStats {
            number_of_documents: self.inner.lock().documents.len() as u64,
            is_indexing: false,
        })
    }

    async fn recent_tasks(&self, _limit: usize) -> Result<Vec<TaskRecord>> {
        Ok(Vec::new())
    }
}
