//! File filtering with gitignore support.

use std::path::Path;

use ignore::gitignore::{Gitignore, GitignoreBuilder};

/// Filter deciding which changed paths are worth offering to the pipeline.
///
/// Honors the watch root's `.gitignore` when present, skips well-known
/// generated directories, and applies the configured extension allow-list
/// (an empty list allows every extension through).
#[derive(Debug)]
pub struct FileFilter {
    gitignore: Option<Gitignore>,
    extensions: Vec<String>,
}

impl FileFilter {
    /// Create a new file filter rooted at `base_path`.
    ///
    /// If a `.gitignore` exists in `base_path`, it will be used for
    /// filtering.
    pub fn new(base_path: impl AsRef<Path>, extensions: &[String]) -> Self {
        let base_path = base_path.as_ref();
        let gitignore_path = base_path.join(".gitignore");

        let gitignore = if gitignore_path.exists() {
            let mut builder = GitignoreBuilder::new(base_path);
            if builder.add(&gitignore_path).is_none() {
                builder.build().ok()
            } else {
                None
            }
        } else {
            None
        };

        Self {
            gitignore,
            extensions: extensions.iter().map(|e| e.to_lowercase()).collect(),
        }
    }

    /// Check if a changed path should be handed to the pipeline.
    ///
    /// The path may not exist at check time (rename window, deletions), so
    /// only directories are rejected on existence grounds.
    #[must_use]
    pub fn should_consider(&self, path: &Path) -> bool {
        if path.is_dir() {
            return false;
        }

        if !self.extension_allowed(path) {
            return false;
        }

        if let Some(ref gi) = self.gitignore {
            if gi.matched(path, false).is_ignore() {
                return false;
            }
        }

        if Self::is_default_ignored(path) {
            return false;
        }

        true
    }

    /// Check a path against the extension allow-list.
    #[must_use]
    pub fn extension_allowed(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }

        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| {
                let ext = ext.to_lowercase();
                self.extensions.iter().any(|e| *e == ext)
            })
    }

    /// Check if a path matches default ignore patterns.
    fn is_default_ignored(path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        // Generated trees a formatter must never touch
        let ignored_dirs = [
            "/node_modules/",
            "/.git/",
            "/vendor/",
            "/target/",
            "/build/",
            "/dist/",
            "/.idea/",
            "/.vscode/",
        ];

        for dir in ignored_dirs {
            if path_str.contains(dir) {
                return true;
            }
        }

        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            // Hidden files, including editor lock/swap files
            if name.starts_with('.') {
                return true;
            }

            if name.to_lowercase().ends_with(".lock") || name.to_lowercase().ends_with("-lock.json")
            {
                return true;
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_empty_allow_list_accepts_any_extension() {
        let tmp = TempDir::new().unwrap();
        let filter = FileFilter::new(tmp.path(), &[]);

        assert!(filter.extension_allowed(Path::new("a.php")));
        assert!(filter.extension_allowed(Path::new("a.txt")));
        assert!(filter.extension_allowed(Path::new("Makefile")));
    }

    #[test]
    fn test_allow_list_is_case_insensitive() {
        let tmp = TempDir::new().unwrap();
        let filter = FileFilter::new(tmp.path(), &["php".to_string(), "JS".to_string()]);

        assert!(filter.extension_allowed(Path::new("a.php")));
        assert!(filter.extension_allowed(Path::new("a.PHP")));
        assert!(filter.extension_allowed(Path::new("a.js")));
        assert!(!filter.extension_allowed(Path::new("a.txt")));
        assert!(!filter.extension_allowed(Path::new("noext")));
    }

    #[test]
    fn test_default_ignored() {
        assert!(FileFilter::is_default_ignored(Path::new(
            "/project/node_modules/pkg/index.js"
        )));
        assert!(FileFilter::is_default_ignored(Path::new(
            "/project/vendor/autoload.php"
        )));
        assert!(FileFilter::is_default_ignored(Path::new(
            "/project/.git/config"
        )));
        assert!(FileFilter::is_default_ignored(Path::new(
            "/project/.a.php.swp"
        )));
        assert!(FileFilter::is_default_ignored(Path::new(
            "/project/package-lock.json"
        )));
        assert!(!FileFilter::is_default_ignored(Path::new(
            "/project/src/index.php"
        )));
    }

    #[test]
    fn test_filter_with_gitignore() {
        let tmp = TempDir::new().unwrap();

        fs::write(tmp.path().join(".gitignore"), "generated/\n*.min.js\n").unwrap();
        fs::write(tmp.path().join("app.js"), "console.log(1)\n").unwrap();
        fs::write(tmp.path().join("app.min.js"), "console.log(1)\n").unwrap();

        let filter = FileFilter::new(tmp.path(), &[]);

        assert!(filter.should_consider(&tmp.path().join("app.js")));
        assert!(!filter.should_consider(&tmp.path().join("app.min.js")));
    }

    #[test]
    fn test_filter_rejects_directories() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("src")).unwrap();

        let filter = FileFilter::new(tmp.path(), &[]);

        assert!(!filter.should_consider(&tmp.path().join("src")));
    }

    #[test]
    fn test_filter_accepts_missing_path() {
        let tmp = TempDir::new().unwrap();
        let filter = FileFilter::new(tmp.path(), &[]);

        // Rename-window targets may not exist yet.
        assert!(filter.should_consider(&tmp.path().join("soon.php")));
    }
}
