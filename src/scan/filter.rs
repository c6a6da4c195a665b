//! Extension allow-list for indexable files.

use std::path::Path;

/// File extensions eligible for indexing.
pub const INDEXED_EXTENSIONS: &[&str] = &[
    "rs", "py", "js", "ts", "jsx", "tsx", "go", "java", "c", "cpp", "cc", "h", "hpp", "cs", "rb",
    "php", "swift", "kt", "scala", "sh", "bash", "zsh", "sql", "md", "yaml", "yml", "json", "toml",
    "xml", "html", "css", "scss", "vue", "svelte",
];

/// Check whether a path has an extension eligible for indexing.
#[must_use]
pub fn is_indexable(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| INDEXED_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indexable_extensions() {
        assert!(is_indexable(Path::new("main.rs")));
        assert!(is_indexable(Path::new("app.py")));
        assert!(is_indexable(Path::new("index.tsx")));
        assert!(is_indexable(Path::new("README.md")));
        assert!(is_indexable(Path::new("config.toml")));
    }

    #[test]
    fn test_extension_match_is_case_insensitive() {
        assert!(is_indexable(Path::new("Types.TS")));
        assert!(is_indexable(Path::new("Main.RS")));
    }

    #[test]
    fn test_non_indexable_files() {
        assert!(!is_indexable(Path::new("image.png")));
        assert!(!is_indexable(Path::new("archive.tar.gz")));
        assert!(!is_indexable(Path::new("binary.exe")));
        assert!(!is_indexable(Path::new("Makefile")));
        assert!(!is_indexable(Path::new(".gitignore")));
    }
}
