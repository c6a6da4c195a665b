//! Depth-first tree scanner.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use super::filter::is_indexable;
use super::rules::IgnoreRules;
use crate::identity::rel_path_key;

/// File discovered by a scan, eligible for indexing.
#[derive(Debug, Clone)]
pub struct ScannedFile {
    /// Path key relative to the scan root.
    pub rel_path: String,
    /// Absolute path on disk.
    pub abs_path: PathBuf,
}

/// Lazy depth-first iterator over indexable files under a root.
///
/// Directories are checked against the ignore rules before they are
/// read, so ignored subtrees are never visited. Entries within a
/// directory are visited in name order, making the scan order
/// deterministic for a given tree. The iterator reads the filesystem as
/// it is consumed and cannot be restarted.
pub struct TreeScan<'a> {
    root: PathBuf,
    rules: &'a IgnoreRules,
    stack: Vec<PathBuf>,
    pending: VecDeque<ScannedFile>,
}

impl<'a> TreeScan<'a> {
    /// Start a scan rooted at `root`.
    #[must_use]
    pub fn new(root: &Path, rules: &'a IgnoreRules) -> Self {
        Self {
            root: root.to_path_buf(),
            rules,
            stack: vec![root.to_path_buf()],
            pending: VecDeque::new(),
        }
    }

    /// Read one directory, queueing its eligible files and pushing
    /// non-ignored subdirectories onto the work stack.
    fn visit_dir(&mut self, dir: &Path) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(path = %dir.display(), error = %err, "Skipping unreadable directory");
                return;
            }
        };

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry.path()),
                Err(err) => {
                    tracing::warn!(path = %dir.display(), error = %err, "Skipping unreadable entry");
                    None
                }
            })
            .collect();
        paths.sort();

        let mut subdirs = Vec::new();
        for path in paths {
            let Some(rel) = rel_path_key(&self.root, &path) else {
                continue;
            };

            // Symlinks are never followed
            let file_type = match path.symlink_metadata() {
                Ok(meta) => meta.file_type(),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "Skipping unreadable entry");
                    continue;
                }
            };
            if file_type.is_symlink() {
                continue;
            }

            if file_type.is_dir() {
                if !self.rules.is_ignored(&rel, true) {
                    subdirs.push(path);
                }
            } else if file_type.is_file()
                && is_indexable(&path)
                && !self.rules.is_ignored(&rel, false)
            {
                self.pending.push_back(ScannedFile {
                    rel_path: rel,
                    abs_path: path,
                });
            }
        }

        // Reversed so popping the stack visits subdirectories in name order
        for dir in subdirs.into_iter().rev() {
            self.stack.push(dir);
        }
    }
}

impl Iterator for TreeScan<'_> {
    type Item = ScannedFile;

    fn next(&mut self) -> Option<ScannedFile> {
        loop {
            if let Some(file) = self.pending.pop_front() {
                return Some(file);
            }
            let dir = self.stack.pop()?;
            self.visit_dir(&dir);
        }
    }
}
