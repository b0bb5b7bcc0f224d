//! fmtwatch library
//!
//! Watches a source tree for changes and runs the appropriate external
//! formatter (a PHP fixer or eslint) once a changed file has stabilized.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod formatter;
pub mod logging;
pub mod watcher;

pub use config::Config;
pub use error::{Error, FormatterError, Result, WatcherError};
