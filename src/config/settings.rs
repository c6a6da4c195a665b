//! Configuration settings and validation.

use crate::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Which embedding backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum EmbedderKind {
    /// Batched HTTP backend, one request per batch of chunks.
    Batch,
    /// Serial HTTP backend, one request per chunk.
    Serial,
}

/// Main configuration for the trawl indexer.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory of the source tree to index.
    pub root: PathBuf,

    /// Name of the index (collection) in the search engine.
    pub collection: String,

    /// Base URL of the search engine.
    pub store_url: String,

    /// Optional API key sent as a bearer token to the search engine.
    pub store_api_key: Option<String>,

    /// Embedding backend variant.
    pub embedder: EmbedderKind,

    /// Base URL of the embedding backend.
    pub embed_url: String,

    /// Embedding model name.
    pub embed_model: String,

    /// Maximum lines per chunk.
    pub chunk_lines: usize,

    /// Lines of overlap between consecutive chunks.
    pub chunk_overlap: usize,

    /// Files larger than this many bytes are not indexed.
    pub max_file_bytes: u64,

    /// Documents per upsert request to the search engine.
    pub batch_size: usize,

    /// Quiet period before filesystem events are processed, in milliseconds.
    pub debounce_ms: u64,

    /// Keep watching the tree after the initial rebuild.
    pub watch: bool,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON instead of human-readable text.
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            collection: "trawl".to_string(),
            store_url: "http://127.0.0.1:7700".to_string(),
            store_api_key: None,
            embedder: EmbedderKind::Batch,
            embed_url: "http://127.0.0.1:11434".to_string(),
            embed_model: "nomic-embed-text".to_string(),
            chunk_lines: 50,
            chunk_overlap: 5,
            max_file_bytes: 1_048_576,
            batch_size: 64,
            debounce_ms: 500,
            watch: false,
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl Config {
    /// Create a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<()> {
        // Validate chunking parameters
        if self.chunk_lines == 0 {
            return Err(Error::config("chunk_lines cannot be 0"));
        }

        if self.chunk_overlap >= self.chunk_lines {
            return Err(Error::config(format!(
                "chunk_overlap ({}) must be smaller than chunk_lines ({})",
                self.chunk_overlap, self.chunk_lines
            )));
        }

        // Validate batching
        if self.batch_size == 0 {
            return Err(Error::config("batch_size cannot be 0"));
        }

        if self.max_file_bytes == 0 {
            return Err(Error::config("max_file_bytes cannot be 0"));
        }

        if self.debounce_ms == 0 {
            return Err(Error::config("debounce_ms cannot be 0"));
        }

        // Validate names and endpoints
        if self.collection.is_empty() {
            return Err(Error::config("collection cannot be empty"));
        }

        if self.store_url.is_empty() {
            return Err(Error::config("store_url cannot be empty"));
        }

        if self.embed_url.is_empty() {
            return Err(Error::config("embed_url cannot be empty"));
        }

        if self.embed_model.is_empty() {
            return Err(Error::config("embed_model cannot be empty"));
        }

        // Validate log level
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(Error::config(format!(
                "invalid log level '{}', must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            )));
        }

        Ok(())
    }

    /// Get the debounce quiet period as a `Duration`.
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
