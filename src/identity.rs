//! Content identity for indexed files and documents.
//!
//! Document ids are derived from the chunk position and the hash of the
//! file content, so unchanged content always maps to the same ids.

use std::path::Path;

/// Hash file content.
#[must_use]
pub fn file_hash(content: &[u8]) -> String {
    blake3::hash(content).to_hex().to_string()
}

/// Derive the stable document id for one chunk of a file.
///
/// The id is a pure function of its inputs: the blake3 hash of the
/// canonical `path:start:end:hash` string.
#[must_use]
pub fn document_id(file_path: &str, start_line: usize, end_line: usize, file_hash: &str) -> String {
    let canonical = format!("{file_path}:{start_line}:{end_line}:{file_hash}");
    blake3::hash(canonical.as_bytes()).to_hex().to_string()
}

/// Normalize an absolute path into the relative key stored in `filePath`.
///
/// Keys use forward slashes on every platform. Returns `None` when
/// `abs` is not under `root` or is not valid UTF-8.
#[must_use]
pub fn rel_path_key(root: &Path, abs: &Path) -> Option<String> {
    let rel = abs.strip_prefix(root).ok()?;
    let rel = rel.to_str()?;
    let mut key = rel.replace('\\', "/");
    if let Some(stripped) = key.strip_prefix("./") {
        key = stripped.to_string();
    }
    if key.is_empty() {
        None
    } else {
        Some(key)
    }
}
