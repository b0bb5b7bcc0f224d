//! File stability detection.
//!
//! Editors commit a save as several OS-level operations (truncate then
//! write, or write-to-temp then rename), so reacting to the first raw event
//! risks handing a half-written file to the formatter. [`wait_stable`] polls
//! a path's `(size, mtime)` pair and returns only once it has held still for
//! a full quiet period.

use std::path::Path;
use std::time::{Duration, SystemTime};

/// Tunables for the stability detector.
#[derive(Debug, Clone, Copy)]
pub struct StabilityOptions {
    /// How long the `(size, mtime)` pair must hold still.
    pub quiet_period: Duration,
    /// Interval between samples.
    pub poll_interval: Duration,
}

impl Default for StabilityOptions {
    fn default() -> Self {
        Self {
            quiet_period: Duration::from_millis(500),
            poll_interval: Duration::from_millis(100),
        }
    }
}

/// One `(size, mtime)` observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Sample {
    len: u64,
    modified: Option<SystemTime>,
}

fn sample(path: &Path) -> Option<Sample> {
    std::fs::metadata(path).ok().map(|meta| Sample {
        len: meta.len(),
        modified: meta.modified().ok(),
    })
}

/// Block until `path`'s size and mtime have been unchanged for the quiet
/// period.
///
/// A momentarily missing path is tolerated and polled again; a rename-based
/// save makes the target briefly absent. There is no internal timeout: an
/// endlessly changing or absent path blocks forever, and callers that need a
/// bound wrap this in `tokio::time::timeout`.
pub async fn wait_stable(path: &Path, opts: &StabilityOptions) {
    let mut previous: Option<Sample> = None;

    loop {
        let current = sample(path);

        if current.is_some() && current == previous {
            // Two equal consecutive samples: hold the quiet period and
            // confirm nothing moved underneath it.
            tokio::time::sleep(opts.quiet_period).await;
            let confirmed = sample(path);
            if confirmed == current {
                return;
            }
            previous = confirmed;
            continue;
        }

        previous = current;
        tokio::time::sleep(opts.poll_interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Instant;
    use tempfile::TempDir;

    fn fast_opts() -> StabilityOptions {
        StabilityOptions {
            quiet_period: Duration::from_millis(50),
            poll_interval: Duration::from_millis(10),
        }
    }

    #[tokio::test]
    async fn test_stable_file_waits_at_least_quiet_period() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("a.php");
        fs::write(&file, "<?php echo 1;\n").unwrap();

        let opts = fast_opts();
        let started = Instant::now();
        wait_stable(&file, &opts).await;

        assert!(started.elapsed() >= opts.quiet_period);
    }

    #[tokio::test]
    async fn test_waits_out_an_active_writer() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("a.php");
        fs::write(&file, "<?php\n").unwrap();

        let writer_path = file.clone();
        let writer = tokio::spawn(async move {
            for i in 0..6 {
                tokio::time::sleep(Duration::from_millis(25)).await;
                fs::write(&writer_path, format!("<?php echo {i};\n")).unwrap();
            }
        });

        let started = Instant::now();
        wait_stable(&file, &fast_opts()).await;
        let elapsed = started.elapsed();
        writer.await.unwrap();

        // Writer kept the file moving for ~150ms; stability must not be
        // declared before the writes stopped.
        assert!(elapsed >= Duration::from_millis(150), "returned at {elapsed:?}");
    }

    #[tokio::test]
    async fn test_tolerates_missing_path() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("a.php");

        let create_path = file.clone();
        let creator = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(60)).await;
            fs::write(&create_path, "<?php echo 1;\n").unwrap();
        });

        // Path does not exist yet; the detector keeps polling instead of
        // giving up.
        wait_stable(&file, &fast_opts()).await;
        creator.await.unwrap();

        assert!(file.exists());
    }

    #[tokio::test]
    async fn test_caller_timeout_bounds_the_wait() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("never-created.php");

        let result =
            tokio::time::timeout(Duration::from_millis(100), wait_stable(&file, &fast_opts()))
                .await;

        assert!(result.is_err());
    }
}
