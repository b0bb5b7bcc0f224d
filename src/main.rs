//! fmtwatch - auto-formatting file watcher
//!
//! Entry point for the fmtwatch binary.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use std::time::Duration;

use clap::Parser;
use fmtwatch::logging::init_tracing;
use fmtwatch::watcher::{FileWatcher, Pipeline};
use fmtwatch::{Config, Result, WatcherError};

/// fmtwatch - runs code formatters on files as they change
#[derive(Parser, Debug)]
#[command(name = "fmtwatch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Root directory to watch
    #[arg(env = "FMTWATCH_ROOT", default_value = ".")]
    root: std::path::PathBuf,

    /// Only consider files with these extensions (comma separated, no dot;
    /// empty means all files)
    #[arg(short, long, env = "FMTWATCH_EXTENSIONS", value_delimiter = ',')]
    ext: Vec<String>,

    /// Do not watch subdirectories
    #[arg(long, env = "FMTWATCH_NO_RECURSIVE")]
    no_recursive: bool,

    /// Debounce window in milliseconds
    #[arg(long, env = "FMTWATCH_DEBOUNCE_MS", default_value = "1000")]
    debounce_ms: u64,

    /// Cooldown after a formatter run, in milliseconds
    #[arg(long, env = "FMTWATCH_COOLDOWN_MS", default_value = "1000")]
    cooldown_ms: u64,

    /// Stability quiet period in milliseconds
    #[arg(long, env = "FMTWATCH_QUIET_MS", default_value = "500")]
    quiet_ms: u64,

    /// Stability poll interval in milliseconds
    #[arg(long, env = "FMTWATCH_POLL_MS", default_value = "100")]
    poll_ms: u64,

    /// Abandon one stability wait after this many milliseconds (0 = no limit)
    #[arg(long, env = "FMTWATCH_STABILITY_TIMEOUT_MS", default_value = "0")]
    stability_timeout_ms: u64,

    /// PHP fixer binary
    #[arg(long, env = "FMTWATCH_PHP_FIXER", default_value = "phpfmt")]
    php_fixer: String,

    /// Global eslint binary (project-local installs are preferred)
    #[arg(long, env = "FMTWATCH_JS_FIXER", default_value = "eslint")]
    js_fixer: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "FMTWATCH_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Enable JSON logging output
    #[arg(long, env = "FMTWATCH_LOG_JSON")]
    log_json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.log_json);

    tracing::info!("fmtwatch v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config {
        root: cli.root,
        recursive: !cli.no_recursive,
        extensions: cli
            .ext
            .iter()
            .map(|e| e.trim_start_matches('.').to_lowercase())
            .collect(),
        debounce: Duration::from_millis(cli.debounce_ms),
        cooldown: Duration::from_millis(cli.cooldown_ms),
        quiet_period: Duration::from_millis(cli.quiet_ms),
        poll_interval: Duration::from_millis(cli.poll_ms),
        stability_timeout: (cli.stability_timeout_ms > 0)
            .then(|| Duration::from_millis(cli.stability_timeout_ms)),
        php_fixer: cli.php_fixer,
        js_fixer: cli.js_fixer,
        log_level: cli.log_level,
    };

    tracing::debug!(?config, "Configuration loaded");

    config.validate()?;

    let mut watcher = FileWatcher::new(&config)?;
    let mut pipeline = Pipeline::new(&config);

    tracing::info!(
        root = %config.root.display(),
        recursive = config.recursive,
        "Watching for changes"
    );

    loop {
        tokio::select! {
            event = watcher.recv() => {
                match event {
                    Some(event) => pipeline.handle(event).await,
                    None => return Err(WatcherError::ChannelClosed.into()),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupt received, shutting down");
                break;
            }
        }
    }

    Ok(())
}
