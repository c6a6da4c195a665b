//! Fixed-window line chunking for indexing.

use crate::{Error, Result};

/// Contiguous run of lines from a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Starting line (1-based).
    pub start_line: usize,
    /// Ending line (1-based, inclusive).
    pub end_line: usize,
    /// Chunk content.
    pub content: String,
}

/// Split `text` into overlapping windows of at most `max_lines` lines.
///
/// Consecutive chunks share `overlap` lines, so a match near a window
/// boundary is still retrievable with its context. Empty input yields a
/// single empty chunk covering line 1, so empty files remain visible in
/// the index. Output is fully determined by the inputs.
///
/// # Errors
///
/// Returns a configuration error if `overlap` is not smaller than
/// `max_lines`.
pub fn chunk_lines(text: &str, max_lines: usize, overlap: usize) -> Result<Vec<Chunk>> {
    if overlap >= max_lines {
        return Err(Error::config(format!(
            "chunk overlap ({overlap}) must be smaller than chunk size ({max_lines})"
        )));
    }

    let lines: Vec<&str> = text.lines().collect();

    if lines.is_empty() {
        return Ok(vec![Chunk {
            start_line: 1,
            end_line: 1,
            content: String::new(),
        }]);
    }

    let mut chunks = Vec::new();
    let mut start = 0;

    loop {
        let end = (start + max_lines).min(lines.len());
        chunks.push(Chunk {
            start_line: start + 1,
            end_line: end,
            content: lines[start..end].join("\n"),
        });

        if end == lines.len() {
            break;
        }
        // overlap < max_lines, so the window always advances
        start = end - overlap;
    }

    Ok(chunks)
}
