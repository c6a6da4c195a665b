//! Ignore rules for filtering files during scanning and watching.

use std::path::{Path, PathBuf};

use ignore::gitignore::{Gitignore, GitignoreBuilder};

use crate::{Error, Result};

/// Built-in patterns that are always ignored. These are matched before
/// any user rules and cannot be negated by them.
const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    ".git/",
    ".hg/",
    ".svn/",
    "node_modules/",
    "target/",
    "dist/",
    "build/",
    "out/",
    "__pycache__/",
    ".venv/",
    "venv/",
    "coverage/",
    ".pytest_cache/",
    "vendor/",
    ".idea/",
    ".vscode/",
    ".DS_Store",
    "*.lock",
    "*.min.js",
    "*.min.css",
    "*.map",
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
];

/// Rule files read from the scan root, in load order.
pub const RULE_FILE_NAMES: &[&str] = &[".gitignore", ".trawlignore"];

/// Check whether a relative path key names a rule file at the root.
///
/// Rule files in subdirectories are not consulted, so only the exact
/// root-level names match.
#[must_use]
pub fn is_rule_file(rel_path: &str) -> bool {
    RULE_FILE_NAMES.iter().any(|name| *name == rel_path)
}

/// Ignore rules for one scan root.
///
/// Built-in defaults live in their own matcher and are consulted first,
/// so a user rule file cannot whitelist them back in.
pub struct IgnoreRules {
    defaults: Gitignore,
    user: Option<Gitignore>,
}

impl IgnoreRules {
    /// Load ignore rules for `root`.
    ///
    /// Reads every rule file in [`RULE_FILE_NAMES`] that exists at the
    /// root. Nested rule files are not read.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a rule file exists but cannot
    /// be read or contains invalid patterns.
    pub fn load(root: &Path) -> Result<Self> {
        let mut defaults = GitignoreBuilder::new(root);
        for pattern in DEFAULT_IGNORE_PATTERNS {
            defaults.add_line(None, pattern).map_err(|e| {
                Error::config(format!("invalid built-in ignore pattern '{pattern}': {e}"))
            })?;
        }
        let defaults = defaults
            .build()
            .map_err(|e| Error::config(format!("failed to build ignore rules: {e}")))?;

        let mut builder = GitignoreBuilder::new(root);
        let mut found = false;
        for name in RULE_FILE_NAMES {
            let path = root.join(name);
            if !path.exists() {
                continue;
            }
            if let Some(err) = builder.add(&path) {
                return Err(Error::config(format!(
                    "invalid ignore rule file '{}': {err}",
                    path.display()
                )));
            }
            found = true;
        }

        let user = if found {
            Some(builder.build().map_err(|e| {
                Error::config(format!("failed to build ignore rules: {e}"))
            })?)
        } else {
            None
        };

        Ok(Self { defaults, user })
    }

    /// Check whether a relative path key is ignored.
    ///
    /// A path inside an ignored directory is ignored regardless of its
    /// own name, matching how the scanner prunes whole subtrees.
    #[must_use]
    pub fn is_ignored(&self, rel_path: &str, is_dir: bool) -> bool {
        let path = Path::new(rel_path);

        let mut prefix = PathBuf::new();
        if let Some(parent) = path.parent() {
            for component in parent.components() {
                prefix.push(component);
                if self.matches(&prefix, true) {
                    return true;
                }
            }
        }

        self.matches(path, is_dir)
    }

    fn matches(&self, rel: &Path, is_dir: bool) -> bool {
        if self.defaults.matched(rel, is_dir).is_ignore() {
            return true;
        }
        self.user
            .as_ref()
            .is_some_and(|gi| gi.matched(rel, is_dir).is_ignore())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_rules_ignore_common_directories() {
        let tmp = TempDir::new().unwrap();
        let rules = IgnoreRules::load(tmp.path()).unwrap();

        assert!(rules.is_ignored("node_modules", true));
        assert!(rules.is_ignored("node_modules/pkg/index.js", false));
        assert!(rules.is_ignored(".git/config", false));
        assert!(rules.is_ignored("target/debug/main.rs", false));
        assert!(rules.is_ignored("sub/node_modules/pkg.js", false));
        assert!(!rules.is_ignored("src/main.rs", false));
    }

    #[test]
    fn test_default_rules_ignore_lock_files() {
        let tmp = TempDir::new().unwrap();
        let rules = IgnoreRules::load(tmp.path()).unwrap();

        assert!(rules.is_ignored("Cargo.lock", false));
        assert!(rules.is_ignored("package-lock.json", false));
        assert!(rules.is_ignored("app.min.js", false));
        assert!(!rules.is_ignored("Cargo.toml", false));
    }

    #[test]
    fn test_gitignore_patterns_respected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".gitignore"), "*.log\ngenerated/\n").unwrap();

        let rules = IgnoreRules::load(tmp.path()).unwrap();

        assert!(rules.is_ignored("debug.log", false));
        assert!(rules.is_ignored("generated", true));
        assert!(rules.is_ignored("generated/code.rs", false));
        assert!(!rules.is_ignored("src/main.rs", false));
    }

    #[test]
    fn test_trawlignore_patterns_respected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".trawlignore"), "fixtures/\n").unwrap();

        let rules = IgnoreRules::load(tmp.path()).unwrap();

        assert!(rules.is_ignored("fixtures/data.json", false));
        assert!(!rules.is_ignored("src/main.rs", false));
    }

    #[test]
    fn test_negation_within_user_rules() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".gitignore"), "*.log\n!important.log\n").unwrap();

        let rules = IgnoreRules::load(tmp.path()).unwrap();

        assert!(rules.is_ignored("debug.log", false));
        assert!(!rules.is_ignored("important.log", false));
    }

    #[test]
    fn test_defaults_cannot_be_negated() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".gitignore"), "!node_modules/\n!*.lock\n").unwrap();

        let rules = IgnoreRules::load(tmp.path()).unwrap();

        assert!(rules.is_ignored("node_modules/pkg/index.js", false));
        assert!(rules.is_ignored("Cargo.lock", false));
    }

    #[test]
    fn test_no_rule_files_present() {
        let tmp = TempDir::new().unwrap();
        let rules = IgnoreRules::load(tmp.path()).unwrap();

        assert!(rules.is_ignored("node_modules/pkg.js", false));
        assert!(!rules.is_ignored("src/main.rs", false));
    }

    #[test]
    fn test_is_rule_file_root_only() {
        assert!(is_rule_file(".gitignore"));
        assert!(is_rule_file(".trawlignore"));
        assert!(!is_rule_file("src/.gitignore"));
        assert!(!is_rule_file("main.rs"));
    }
}
