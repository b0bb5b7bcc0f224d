//! The per-event dispatch pipeline.
//!
//! One event flows: cooldown gate → debounce throttle → extension routing →
//! stability wait → formatter run → cooldown update. A single consumer owns
//! the pipeline, so handling is sequential and a second event for a path
//! still being processed queues behind it, never alongside it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::debounce::{CooldownLedger, DebounceLedger};
use super::events::{ChangeEvent, ChangeKind};
use super::stability::{wait_stable, StabilityOptions};
use crate::config::Config;
use crate::formatter::{FormatterDispatcher, FormatterKind};

/// Counters for pipeline decisions.
#[derive(Debug, Default)]
pub struct PipelineStats {
    pub events_seen: AtomicU64,
    pub cooled_down: AtomicU64,
    pub debounced: AtomicU64,
    pub unsupported: AtomicU64,
    pub formatted: AtomicU64,
    pub failures: AtomicU64,
}

impl PipelineStats {
    /// Create new stats tracker.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Get snapshot of current stats.
    #[must_use]
    pub fn snapshot(&self) -> PipelineStatsSnapshot {
        PipelineStatsSnapshot {
            events_seen: self.events_seen.load(Ordering::Relaxed),
            cooled_down: self.cooled_down.load(Ordering::Relaxed),
            debounced: self.debounced.load(Ordering::Relaxed),
            unsupported: self.unsupported.load(Ordering::Relaxed),
            formatted: self.formatted.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of pipeline stats.
#[derive(Debug, Clone, Copy)]
pub struct PipelineStatsSnapshot {
    pub events_seen: u64,
    pub cooled_down: u64,
    pub debounced: u64,
    pub unsupported: u64,
    pub formatted: u64,
    pub failures: u64,
}

/// Owns the two ledgers and applies the full pipeline to each event.
pub struct Pipeline {
    debounce: DebounceLedger,
    cooldown: CooldownLedger,
    cooldown_duration: Duration,
    stability: StabilityOptions,
    stability_timeout: Option<Duration>,
    dispatcher: FormatterDispatcher,
    stats: Arc<PipelineStats>,
}

impl Pipeline {
    /// Create a pipeline from the process configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            debounce: DebounceLedger::new(config.debounce),
            cooldown: CooldownLedger::new(),
            cooldown_duration: config.cooldown,
            stability: StabilityOptions {
                quiet_period: config.quiet_period,
                poll_interval: config.poll_interval,
            },
            stability_timeout: config.stability_timeout,
            dispatcher: FormatterDispatcher::new(
                config.php_fixer.clone(),
                config.js_fixer.clone(),
            ),
            stats: PipelineStats::new(),
        }
    }

    /// Apply the pipeline to one change event.
    ///
    /// Per-event failures are logged and contained; this never returns an
    /// error and never panics, so the watch loop cannot die here.
    pub async fn handle(&mut self, event: ChangeEvent) {
        self.stats.events_seen.fetch_add(1, Ordering::Relaxed);

        if event.kind == ChangeKind::Deleted {
            return;
        }

        // Hard gate first: the formatter's own write-back must never
        // re-enter the pipeline.
        if self.cooldown.is_cooling_down(&event.path, event.at) {
            self.stats.cooled_down.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(path = %event.path.display(), "Suppressed by cooldown");
            return;
        }

        if !self.debounce.should_process(&event.path, event.at) {
            self.stats.debounced.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(path = %event.path.display(), "Suppressed by debounce");
            return;
        }

        let Some(kind) = FormatterKind::from_path(&event.path) else {
            self.stats.unsupported.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(path = %event.path.display(), "No formatter for extension");
            return;
        };

        self.debounce.mark_processed(&event.path, event.at);

        if !self.wait_for_stability(&event).await {
            return;
        }

        match self.dispatcher.run(kind, &event.path).await {
            Ok(()) => {
                self.stats.formatted.fetch_add(1, Ordering::Relaxed);
                tracing::info!(path = %event.path.display(), ?kind, "Formatted");
            }
            Err(e) => {
                self.stats.failures.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(path = %event.path.display(), error = %e, "Formatter failed");
            }
        }

        // Set after the run lands, success or failure, so a broken formatter
        // is not re-invoked on every keystroke-driven save.
        self.cooldown
            .set_cooldown(&event.path, Instant::now() + self.cooldown_duration);

        let snapshot = self.stats.snapshot();
        tracing::debug!(
            seen = snapshot.events_seen,
            formatted = snapshot.formatted,
            cooled_down = snapshot.cooled_down,
            debounced = snapshot.debounced,
            failures = snapshot.failures,
            "Processed event"
        );
    }

    /// Wait for the file to stop changing, bounded by the configured
    /// timeout when one is set. Returns `false` if the wait was abandoned.
    async fn wait_for_stability(&self, event: &ChangeEvent) -> bool {
        match self.stability_timeout {
            None => {
                wait_stable(&event.path, &self.stability).await;
                true
            }
            Some(limit) => {
                let bounded =
                    tokio::time::timeout(limit, wait_stable(&event.path, &self.stability)).await;
                if bounded.is_err() {
                    self.stats.failures.fetch_add(1, Ordering::Relaxed);
                    tracing::warn!(
                        path = %event.path.display(),
                        timeout_ms = limit.as_millis(),
                        "File never stabilized, skipping"
                    );
                    return false;
                }
                true
            }
        }
    }

    /// Get current stats.
    #[must_use]
    pub fn stats(&self) -> Arc<PipelineStats> {
        Arc::clone(&self.stats)
    }
}
