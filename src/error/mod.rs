//! Error types and Result alias for trawl.
//!
//! This module defines the error hierarchy used throughout the crate.
//! All public functions return `Result<T, Error>` or `Result<T>`.

use thiserror::Error;

/// Result type alias using trawl's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for trawl operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Index store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Embedding backend error.
    #[error("embedding error: {0}")]
    Embedding(#[from] EmbedError),

    /// File watching error.
    #[error("watch error: {0}")]
    Watch(#[from] WatchError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Index store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Transport-level failure talking to the store.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success response outside the idempotency exceptions.
    #[error("store returned status {status}: {detail}")]
    Api { status: u16, detail: String },

    /// An upsert batch failed partway through.
    #[error("batch upsert failed at offset {offset} (status {status}): {detail}")]
    Batch {
        offset: usize,
        status: u16,
        detail: String,
    },

    /// Response body did not match the expected shape.
    #[error("malformed store response: {0}")]
    Malformed(String),
}

/// Embedding backend errors.
#[derive(Error, Debug)]
pub enum EmbedError {
    /// Transport-level failure reaching the backend.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Backend answered with a non-success status.
    #[error("backend returned status {status}: {detail}")]
    Backend { status: u16, detail: String },

    /// Response carried a missing, empty, or non-numeric vector.
    #[error("malformed embedding response: {0}")]
    Malformed(String),
}

/// File watcher errors.
#[derive(Error, Debug)]
pub enum WatchError {
    /// Failed to establish a filesystem subscription.
    #[error("failed to watch path '{path}': {reason}")]
    WatchFailed { path: String, reason: String },
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests;
