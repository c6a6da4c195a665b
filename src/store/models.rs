//! Store data types and wire shapes.

use serde::Deserialize;
use serde_json::Value;

use crate::chunker::Chunk;
use crate::identity::document_id;

/// One chunk of one file, ready for upsert.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Content-addressed id: hash of path, bounds, and file hash.
    pub id: String,
    /// Root-relative forward-slash path of the source file.
    pub file_path: String,
    /// Starting line (1-based).
    pub start_line: usize,
    /// Ending line (1-based, inclusive).
    pub end_line: usize,
    /// Chunk content.
    pub content: String,
    /// Embedding vector.
    pub vector: Vec<f32>,
}

impl Document {
    /// Build a document for one chunk of a file.
    #[must_use]
    pub fn from_chunk(file_path: &str, chunk: &Chunk, file_hash: &str, vector: Vec<f32>) -> Self {
        Self {
            id: document_id(file_path, chunk.start_line, chunk.end_line, file_hash),
            file_path: file_path.to_string(),
            start_line: chunk.start_line,
            end_line: chunk.end_line,
            content: chunk.content.clone(),
            vector,
        }
    }

    /// Serialize into the persisted wire shape, with the vector stored
    /// under `vector_field` (the embedder's name).
    #[must_use]
    pub fn to_wire(&self, vector_field: &str) -> Value {
        let mut map = serde_json::Map::new();
        map.insert("id".to_string(), Value::from(self.id.clone()));
        map.insert("filePath".to_string(), Value::from(self.file_path.clone()));
        map.insert("startLine".to_string(), Value::from(self.start_line));
        map.insert("endLine".to_string(), Value::from(self.end_line));
        map.insert("content".to_string(), Value::from(self.content.clone()));
        map.insert(
            vector_field.to_string(),
            serde_json::json!(self.vector),
        );
        Value::Object(map)
    }
}

/// Collection statistics reported by the store.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreStats {
    /// Number of documents in the collection.
    pub number_of_documents: u64,
    /// Whether the store is still applying queued writes.
    pub is_indexing: bool,
}

/// One asynchronous task record reported by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskRecord {
    /// Task identifier.
    pub uid: u64,
    /// Task status string as reported by the store.
    pub status: String,
    /// Error payload for failed tasks, if any.
    #[serde(default)]
    pub error: Option<Value>,
}

impl TaskRecord {
    /// Whether the store reported this task as failed.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.status == "failed"
    }
}
