//! Configuration settings and validation.

use crate::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Default debounce window between accepted events for one path.
const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1000);

/// Default cooldown after a formatter run, absorbing its own write-back.
const DEFAULT_COOLDOWN: Duration = Duration::from_millis(1000);

/// Default quiet period a file must hold still before it counts as stable.
const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Default interval between stability samples.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Main configuration for fmtwatch.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory to watch.
    pub root: PathBuf,

    /// Watch subdirectories recursively.
    pub recursive: bool,

    /// Extension allow-list (lowercase, no dot). Empty means all files are
    /// offered to the formatter router.
    pub extensions: Vec<String>,

    /// Debounce window between accepted events for one path.
    pub debounce: Duration,

    /// Cooldown after a formatter run for one path.
    pub cooldown: Duration,

    /// Quiet period for the stability detector.
    pub quiet_period: Duration,

    /// Poll interval for the stability detector.
    pub poll_interval: Duration,

    /// Upper bound on one stability wait. `None` waits indefinitely.
    pub stability_timeout: Option<Duration>,

    /// PHP fixer binary, invoked as `<tool> -s <path>`.
    pub php_fixer: String,

    /// Global eslint binary, used when no project-local install is found.
    pub js_fixer: String,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            recursive: true,
            extensions: Vec::new(),
            debounce: DEFAULT_DEBOUNCE,
            cooldown: DEFAULT_COOLDOWN,
            quiet_period: DEFAULT_QUIET_PERIOD,
            poll_interval: DEFAULT_POLL_INTERVAL,
            stability_timeout: None,
            php_fixer: "phpfmt".to_string(),
            js_fixer: "eslint".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Create a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<()> {
        if self.root.as_os_str().is_empty() {
            return Err(Error::config("root path cannot be empty"));
        }

        if self.debounce.is_zero() {
            return Err(Error::config("debounce window cannot be zero"));
        }

        if self.cooldown.is_zero() {
            return Err(Error::config("cooldown duration cannot be zero"));
        }

        if self.quiet_period.is_zero() {
            return Err(Error::config("quiet period cannot be zero"));
        }

        if self.poll_interval.is_zero() {
            return Err(Error::config("poll interval cannot be zero"));
        }

        if self.poll_interval > self.quiet_period {
            return Err(Error::config(
                "poll interval cannot exceed the quiet period",
            ));
        }

        if self.php_fixer.is_empty() {
            return Err(Error::config("php fixer binary cannot be empty"));
        }

        if self.js_fixer.is_empty() {
            return Err(Error::config("js fixer binary cannot be empty"));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(Error::config(format!(
                "invalid log level '{}', must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            )));
        }

        Ok(())
    }
}
