//! trawl — keeps a vector + keyword search index of a source tree
//! synchronized with the filesystem.
//!
//! Files are discovered under ignore rules, split into overlapping
//! line windows, embedded, and upserted under deterministic
//! content-addressed ids, so re-indexing unchanged content is a no-op
//! and any edit replaces exactly one file's documents. A single-consumer
//! change queue serializes filesystem events into ordered reindex
//! tasks.

#![allow(clippy::module_name_repetitions)]

pub mod chunker;
pub mod config;
pub mod embeddings;
pub mod error;
pub mod identity;
pub mod index;
pub mod observability;
pub mod scan;
pub mod store;

pub use config::{Config, EmbedderKind};
pub use error::{EmbedError, Error, Result, StoreError, WatchError};
