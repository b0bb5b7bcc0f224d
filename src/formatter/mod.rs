//! Extension routing and external formatter invocation.
//!
//! Maps a changed file's extension onto the right external tool (a PHP
//! fixer or eslint) and runs it to completion against the file.

mod dispatch;

pub use dispatch::{resolve_eslint, FormatterDispatcher, FormatterKind};
