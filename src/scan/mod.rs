//! Source tree scanning.
//!
//! Walks a directory tree depth-first, applying ignore rules before
//! descending and yielding only files eligible for indexing.

mod filter;
mod rules;
mod scanner;

pub use filter::{is_indexable, INDEXED_EXTENSIONS};
pub use rules::{is_rule_file, IgnoreRules, RULE_FILE_NAMES};
pub use scanner::{ScannedFile, TreeScan};
