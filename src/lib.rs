#![warn(missing_docs)]

//! `textsearch_lib` powers the `textsearch` command-line tool.
//!
//! It walks a directory tree, restricts the scan to files with allowed
//! name suffixes and reports every line containing a literal search text,
//! case-insensitively and optionally as a whole word only.
//!
//! ## Overview
//!
//! - [`search::TextSearcher`] performs the walk and streams events to a
//!   [`search::SearchSink`].
//! - [`search::LiteralMatcher`] does the per-line matching.
//! - [`cli::formatters`] turns events into coloured text or JSON.
//! - [`config`] loads the optional `config.toml`.
//!
//! ```no_run
//! use textsearch_lib::{search_directory, ExtensionFilter, SearchRequest};
//! use textsearch_lib::cli::{ConsoleSink, Palette};
//!
//! let request = SearchRequest::new(".", "Camera")
//!     .with_extensions(ExtensionFilter::new([".hpp", ".cpp"]));
//! let mut sink = ConsoleSink::new(std::io::stdout(), Palette::default(), false);
//! let summary = search_directory(request, &mut sink)?;
//! println!("{} matching lines", summary.lines_matched);
//! # Ok::<(), textsearch_lib::SearchError>(())
//! ```

/// Command-line arguments, command handling and output formatting.
#[allow(missing_docs)]
pub mod cli;
/// Configuration management for the application.
#[allow(missing_docs)]
pub mod config;
/// Shared constants used across the crate.
pub mod constants;
/// Defines the error type and Result alias.
#[allow(missing_docs)]
pub mod error;
/// Filesystem helpers: extension filtering and tree walking.
#[allow(missing_docs)]
pub mod fs_utils;
/// The recursive text search itself.
#[allow(missing_docs)]
pub mod search;

pub use config::{load_config, AppConfig, ColorMode};
pub use error::{Result, SearchError};
pub use fs_utils::ExtensionFilter;
pub use search::{search_directory, LineMatch, LiteralMatcher, SearchRequest, SearchSink, SearchSummary, TextSearcher};
