//! Formatter selection and child process execution.

use std::path::{Path, PathBuf};

use tokio::process::Command;

use crate::error::FormatterError;
use crate::Result;

/// Extensions handed to the PHP fixer. Covers Drupal-style module files.
const PHP_EXTENSIONS: &[&str] = &["php", "phtml", "inc", "module", "install"];

/// Extension handed to eslint.
const JS_EXTENSION: &str = "js";

/// Which external formatter a file routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatterKind {
    /// PHP fixer, `<tool> -s <path>`.
    Php,
    /// eslint, `<tool> --fix <path>`.
    JavaScript,
}

impl FormatterKind {
    /// Classify a path by its lowercase extension.
    ///
    /// Returns `None` for unsupported files; that is not an error.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();

        if PHP_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Php)
        } else if ext == JS_EXTENSION {
            Some(Self::JavaScript)
        } else {
            None
        }
    }
}

/// Runs external formatters synchronously against changed files.
#[derive(Debug, Clone)]
pub struct FormatterDispatcher {
    php_fixer: String,
    js_fixer: String,
}

impl FormatterDispatcher {
    /// Create a dispatcher with the given tool binaries.
    ///
    /// `js_fixer` is the global fallback; a project-local
    /// `node_modules/.bin/eslint` near the target file is always preferred.
    #[must_use]
    pub fn new(php_fixer: impl Into<String>, js_fixer: impl Into<String>) -> Self {
        Self {
            php_fixer: php_fixer.into(),
            js_fixer: js_fixer.into(),
        }
    }

    /// Classify `path` and run the matching formatter.
    ///
    /// Returns `Ok(false)` for unsupported files, `Ok(true)` after a
    /// successful run.
    ///
    /// # Errors
    ///
    /// Returns an error if the tool cannot be launched or exits non-zero.
    /// Both are recoverable per event.
    pub async fn dispatch(&self, path: &Path) -> Result<bool> {
        match FormatterKind::from_path(path) {
            None => Ok(false),
            Some(kind) => {
                self.run(kind, path).await?;
                Ok(true)
            }
        }
    }

    /// Run the selected formatter against `path`, waiting for it to exit.
    ///
    /// # Errors
    ///
    /// Returns an error if the tool cannot be launched or exits non-zero.
    pub async fn run(&self, kind: FormatterKind, path: &Path) -> Result<()> {
        match kind {
            FormatterKind::Php => {
                let mut cmd = Command::new(&self.php_fixer);
                cmd.arg("-s").arg(path);
                Self::await_exit(cmd, &self.php_fixer, path).await
            }
            FormatterKind::JavaScript => {
                let dir = path.parent().unwrap_or_else(|| Path::new("."));
                let tool = resolve_eslint(dir)
                    .map_or_else(|| self.js_fixer.clone(), |p| p.display().to_string());

                let mut cmd = Command::new(&tool);
                cmd.arg("--fix").arg(path).current_dir(dir);
                Self::await_exit(cmd, &tool, path).await
            }
        }
    }

    /// Spawn the command with inherited stdio and block until it exits.
    async fn await_exit(mut cmd: Command, tool: &str, path: &Path) -> Result<()> {
        tracing::debug!(tool, path = %path.display(), "Running formatter");

        let status = cmd.status().await.map_err(|e| FormatterError::Launch {
            tool: tool.to_string(),
            reason: e.to_string(),
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(FormatterError::NonZeroExit {
                tool: tool.to_string(),
                path: path.display().to_string(),
                status: status.to_string(),
            }
            .into())
        }
    }
}

/// Walk up from `start` looking for a project-local eslint install.
#[must_use]
pub fn resolve_eslint(start: &Path) -> Option<PathBuf> {
    for dir in start.ancestors() {
        let candidate = dir.join("node_modules").join(".bin").join("eslint");
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    None
}
