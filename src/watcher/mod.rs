//! File system watching and the formatting dispatch pipeline.
//!
//! This module provides:
//! - Directory watching using notify-rs
//! - Gitignore-aware file filtering
//! - Per-path debounce and cooldown ledgers
//! - File stability detection
//! - The per-event pipeline driving the formatter dispatcher

mod debounce;
mod events;
mod filter;
mod pipeline;
mod stability;
mod watch;

pub use debounce::{CooldownLedger, DebounceLedger};
pub use events::{ChangeEvent, ChangeKind};
pub use filter::FileFilter;
pub use pipeline::{Pipeline, PipelineStats, PipelineStatsSnapshot};
pub use stability::{wait_stable, StabilityOptions};
pub use watch::FileWatcher;
