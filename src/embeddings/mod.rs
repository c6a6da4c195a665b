//! Pluggable text embedding backends.
//!
//! This module provides:
//! - The [`Embedder`] trait consumed by the indexing pipeline
//! - A batched HTTP backend (one request per batch of chunks)
//! - A serial HTTP backend (one request per chunk)
//! - A deterministic dummy backend for tests and offline tooling
//!
//! The backend variant is chosen once at startup from the configuration;
//! it never changes per call.

mod batch;
mod dummy;
mod serial;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{Config, EmbedderKind};
use crate::Result;

pub use batch::BatchEmbedder;
pub use dummy::DummyEmbedder;
pub use serial::SerialEmbedder;

/// Fixed text embedded once to discover the vector dimension.
pub const PROBE_TEXT: &str = "dimension probe";

/// A text-to-vector embedding backend.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Name of the vector field this backend writes on documents.
    fn name(&self) -> &str;

    /// Embed a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed many texts, returning one vector per input in the same order.
    ///
    /// An empty input returns an empty output without touching the
    /// backend. A single unreachable or malformed response fails the
    /// whole call; no input is ever silently given an empty vector.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Vector dimension of this backend.
    ///
    /// Discovered lazily by embedding [`PROBE_TEXT`] once, then cached
    /// for the process lifetime.
    async fn dimension(&self) -> Result<usize>;
}

/// Build the embedding backend selected by the configuration.
#[must_use]
pub fn from_config(config: &Config) -> Arc<dyn Embedder> {
    match config.embedder {
        EmbedderKind::Batch => Arc::new(BatchEmbedder::new(&config.embed_url, &config.embed_model)),
        EmbedderKind::Serial => {
            Arc::new(SerialEmbedder::new(&config.embed_url, &config.embed_model))
        }
    }
}
