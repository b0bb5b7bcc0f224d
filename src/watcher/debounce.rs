//! Per-path debounce and cooldown ledgers.
//!
//! The debounce ledger is a soft throttle collapsing a burst of raw
//! notifications for one logical edit into a single formatter run. The
//! cooldown ledger is a hard gate set after a formatter run, absorbing the
//! formatter's own write-back event so it cannot re-trigger itself.
//!
//! Both take `now` explicitly so tests need no clock mocking. Entries are
//! never pruned; the key space is bounded by the set of watched files.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Last-accepted-processing timestamps per path.
#[derive(Debug)]
pub struct DebounceLedger {
    window: Duration,
    last_processed: HashMap<PathBuf, Instant>,
}

impl DebounceLedger {
    /// Create a ledger with the given debounce window.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_processed: HashMap::new(),
        }
    }

    /// Whether an event for `path` observed at `now` should be processed.
    ///
    /// Returns `false` iff the path was marked processed less than one
    /// window before `now`.
    #[must_use]
    pub fn should_process(&self, path: &Path, now: Instant) -> bool {
        self.last_processed
            .get(path)
            .map_or(true, |last| now.saturating_duration_since(*last) >= self.window)
    }

    /// Record that an event for `path` was accepted at `now`.
    pub fn mark_processed(&mut self, path: &Path, now: Instant) {
        self.last_processed.insert(path.to_path_buf(), now);
    }
}

/// Ignore-until timestamps per path.
#[derive(Debug, Default)]
pub struct CooldownLedger {
    ignore_until: HashMap<PathBuf, Instant>,
}

impl CooldownLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether events for `path` are still suppressed at `now`.
    #[must_use]
    pub fn is_cooling_down(&self, path: &Path, now: Instant) -> bool {
        self.ignore_until
            .get(path)
            .is_some_and(|until| now < *until)
    }

    /// Suppress events for `path` until the given instant.
    pub fn set_cooldown(&mut self, path: &Path, until: Instant) {
        self.ignore_until.insert(path.to_path_buf(), until);
    }
}
