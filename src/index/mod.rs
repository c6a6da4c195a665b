//! Indexing pipeline and change-driven synchronization.
//!
//! The [`Indexer`] turns files into embedded documents; the
//! [`ChangeWorker`] serializes filesystem events into ordered reindex
//! tasks; the [`WatcherHandle`] owns the debounced subscription wiring
//! them together.

mod events;
mod indexer;
mod queue;
mod watcher;

pub use events::FileEvent;
pub use indexer::{IndexSummary, Indexer};
pub use queue::ChangeWorker;
pub use watcher::WatcherHandle;
