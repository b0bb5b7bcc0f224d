//! File system watcher using notify-rs.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use parking_lot::Mutex;
use tokio::sync::mpsc;

use super::events::{ChangeEvent, ChangeKind};
use super::filter::FileFilter;
use crate::config::Config;
use crate::error::WatcherError;
use crate::Result;

/// Capacity of the raw event channel. The notify callback blocks briefly
/// when the pipeline falls behind, which is preferable to dropping events.
const EVENT_CHANNEL_CAPACITY: usize = 100;

/// File system watcher feeding `ChangeEvent`s to a single consumer.
pub struct FileWatcher {
    watcher: RecommendedWatcher,
    event_rx: mpsc::Receiver<ChangeEvent>,
    watched_dirs: Arc<Mutex<Vec<PathBuf>>>,
    recursive: bool,
}

impl FileWatcher {
    /// Create a watcher for the configured root.
    ///
    /// # Errors
    ///
    /// Returns an error if the notify backend cannot be created or the root
    /// cannot be watched.
    pub fn new(config: &Config) -> Result<Self> {
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let watched_dirs = Arc::new(Mutex::new(Vec::new()));
        let watched_dirs_clone = Arc::clone(&watched_dirs);
        let filter = FileFilter::new(&config.root, &config.extensions);

        let watcher = notify::recommended_watcher(
            move |result: notify::Result<notify::Event>| match result {
                Ok(event) => {
                    let Some(kind) = ChangeKind::from_notify(&event.kind) else {
                        return;
                    };

                    let dirs = watched_dirs_clone.lock();
                    for path in event.paths {
                        if is_under_watched(&dirs, &path) && filter.should_consider(&path) {
                            let _ = event_tx.blocking_send(ChangeEvent::new(path, kind));
                        }
                    }
                }
                Err(e) => {
                    tracing::error!("Watch error: {:?}", e);
                }
            },
        )
        .map_err(|e| WatcherError::WatchFailed {
            path: config.root.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut watcher = Self {
            watcher,
            event_rx,
            watched_dirs,
            recursive: config.recursive,
        };

        watcher.watch(&config.root)?;

        Ok(watcher)
    }

    /// Add a directory to watch.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be watched.
    pub fn watch(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            return Err(WatcherError::WatchFailed {
                path: path.display().to_string(),
                reason: "directory does not exist".to_string(),
            }
            .into());
        }

        let mode = if self.recursive {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };

        self.watcher
            .watch(&path, mode)
            .map_err(|e| WatcherError::WatchFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        self.watched_dirs.lock().push(path.clone());
        tracing::info!(path = %path.display(), "Watching directory");

        Ok(())
    }

    /// Stop watching a directory.
    ///
    /// # Errors
    ///
    /// Returns an error if unwatching fails.
    pub fn unwatch(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        self.watcher
            .unwatch(path)
            .map_err(|e| WatcherError::WatchFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        self.watched_dirs.lock().retain(|p| p != path);

        tracing::info!(path = %path.display(), "Stopped watching directory");
        Ok(())
    }

    /// Receive the next change event.
    ///
    /// Returns `None` if the watcher has been dropped.
    pub async fn recv(&mut self) -> Option<ChangeEvent> {
        self.event_rx.recv().await
    }

    /// Get list of watched directories.
    #[must_use]
    pub fn watched_dirs(&self) -> Vec<PathBuf> {
        self.watched_dirs.lock().clone()
    }
}

/// Check if a path is under any watched directory.
fn is_under_watched(watched: &[PathBuf], path: &Path) -> bool {
    watched.iter().any(|dir| path.starts_with(dir))
}
