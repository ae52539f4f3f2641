use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for search operations
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur while searching a directory tree
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Search path does not exist: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("Search path is not a directory: {}", .0.display())]
    RootNotDirectory(PathBuf),

    #[error("Failed to build matcher: {0}")]
    Pattern(#[from] regex::Error),

    /// Per-file failure. Reported through the sink, never fatal to a search.
    #[error("{source}")]
    FileRead {
        path: PathBuf,
        source: io::Error,
    },

    #[error("Failed to write search output: {0}")]
    Output(#[source] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SearchError {
    /// True for errors that only affect a single file.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SearchError::FileRead { .. })
    }
}
