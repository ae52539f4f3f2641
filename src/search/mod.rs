//! Recursive literal text search over a directory tree.
//!
//! [`TextSearcher`] walks the tree top-down, scans every allowed file line by
//! line and streams what it finds to a [`SearchSink`]. Nothing is collected:
//! each directory, match and per-file failure is reported the moment it is
//! seen, and only a [`SearchSummary`] of counters is returned.

pub mod lines;
pub mod matcher;

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::ops::Range;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Result, SearchError};
use crate::fs_utils::{is_scannable_file, top_down_walker, validate_search_root, ExtensionFilter};

pub use lines::UniversalLines;
pub use matcher::LiteralMatcher;

/// Parameters of a single search invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Directory the traversal starts from.
    pub root: PathBuf,
    /// Literal text to look for.
    pub text: String,
    /// Files whose names do not pass this filter are never opened.
    pub extensions: ExtensionFilter,
    /// Require the text to stand as a whole word.
    pub whole_word: bool,
}

impl SearchRequest {
    pub fn new(root: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            text: text.into(),
            extensions: ExtensionFilter::any(),
            whole_word: false,
        }
    }

    pub fn with_extensions(mut self, extensions: ExtensionFilter) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn whole_word(mut self, whole_word: bool) -> Self {
        self.whole_word = whole_word;
        self
    }
}

/// A matching line, borrowed from the scanner for the duration of one
/// [`SearchSink::on_match`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMatch<'a> {
    pub path: &'a Path,
    /// 1-based.
    pub line_number: usize,
    /// Full line without its terminator.
    pub line: &'a str,
    /// Byte offsets of the first match within `line`.
    pub span: Range<usize>,
}

impl LineMatch<'_> {
    pub fn matched_text(&self) -> &str {
        &self.line[self.span.clone()]
    }

    pub fn before(&self) -> &str {
        &self.line[..self.span.start]
    }

    pub fn after(&self) -> &str {
        &self.line[self.span.end..]
    }
}

/// Counters describing a finished search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchSummary {
    pub directories_visited: usize,
    pub files_scanned: usize,
    pub files_skipped: usize,
    pub lines_matched: usize,
}

/// Receives search events as they happen.
///
/// An `Err` from any method aborts the search with [`SearchError::Output`].
pub trait SearchSink {
    fn on_start(&mut self, _request: &SearchRequest) -> io::Result<()> {
        Ok(())
    }

    /// Called once per visited directory that can be listed, before any of
    /// its files.
    fn on_directory(&mut self, path: &Path) -> io::Result<()>;

    fn on_match(&mut self, found: &LineMatch<'_>) -> io::Result<()>;

    /// Called when a file could not be opened or decoded. The search continues.
    fn on_file_error(&mut self, path: &Path, error: &SearchError) -> io::Result<()>;

    fn on_finish(&mut self, _summary: &SearchSummary) -> io::Result<()> {
        Ok(())
    }
}

enum FileOutcome {
    Scanned,
    Skipped,
}

/// Sequential, single-threaded searcher for one [`SearchRequest`].
#[derive(Debug, Clone)]
pub struct TextSearcher {
    request: SearchRequest,
    matcher: LiteralMatcher,
}

impl TextSearcher {
    /// Validates the request and compiles its matcher.
    pub fn new(request: SearchRequest) -> Result<Self> {
        validate_search_root(&request.root)?;
        let matcher = LiteralMatcher::new(&request.text, request.whole_word)?;
        Ok(Self { request, matcher })
    }

    pub fn request(&self) -> &SearchRequest {
        &self.request
    }

    /// Walks the tree and reports every event to `sink`.
    pub fn run(&self, sink: &mut dyn SearchSink) -> Result<SearchSummary> {
        let root = &self.request.root;
        log::debug!(
            "Searching {} for '{}' (whole_word: {}, extensions: {:?})",
            root.display(),
            self.request.text,
            self.request.whole_word,
            self.request.extensions.suffixes()
        );
        sink.on_start(&self.request).map_err(SearchError::Output)?;

        let mut summary = SearchSummary::default();
        for entry_result in top_down_walker(root) {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(err) => {
                    log::warn!(
                        "Error walking directory entry near '{}': {}",
                        err.path().unwrap_or(root).display(),
                        err
                    );
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                // Unlistable directories are not announced; the walker
                // reports the read failure right after.
                if let Err(err) = fs::read_dir(entry.path()) {
                    log::debug!("Not announcing unlistable directory {}: {}", entry.path().display(), err);
                    continue;
                }
                summary.directories_visited += 1;
                sink.on_directory(entry.path()).map_err(SearchError::Output)?;
                continue;
            }
            if !is_scannable_file(&entry) || !self.request.extensions.allows_path(entry.path()) {
                continue;
            }

            match self.scan_file(entry.path(), sink, &mut summary)? {
                FileOutcome::Scanned => summary.files_scanned += 1,
                FileOutcome::Skipped => summary.files_skipped += 1,
            }
        }

        log::debug!("Search finished: {:?}", summary);
        sink.on_finish(&summary).map_err(SearchError::Output)?;
        Ok(summary)
    }

    /// Scans one file. Read failures are reported to the sink and turned
    /// into [`FileOutcome::Skipped`]; only sink failures propagate.
    fn scan_file(
        &self,
        path: &Path,
        sink: &mut dyn SearchSink,
        summary: &mut SearchSummary,
    ) -> Result<FileOutcome> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(source) => return report_unreadable(path, source, sink),
        };

        let reader = UniversalLines::new(BufReader::new(file));
        for (index, line_result) in reader.enumerate() {
            let line = match line_result {
                Ok(line) => line,
                Err(source) => return report_unreadable(path, source, sink),
            };
            if let Some(span) = self.matcher.find(&line) {
                summary.lines_matched += 1;
                let found = LineMatch {
                    path,
                    line_number: index + 1,
                    line: &line,
                    span,
                };
                sink.on_match(&found).map_err(SearchError::Output)?;
            }
        }
        Ok(FileOutcome::Scanned)
    }
}

fn report_unreadable(
    path: &Path,
    source: io::Error,
    sink: &mut dyn SearchSink,
) -> Result<FileOutcome> {
    log::debug!("Skipping unreadable file {}: {}", path.display(), source);
    let error = SearchError::FileRead {
        path: path.to_path_buf(),
        source,
    };
    sink.on_file_error(path, &error).map_err(SearchError::Output)?;
    Ok(FileOutcome::Skipped)
}

/// Convenience wrapper: build a [`TextSearcher`] for `request` and run it.
pub fn search_directory(request: SearchRequest, sink: &mut dyn SearchSink) -> Result<SearchSummary> {
    TextSearcher::new(request)?.run(sink)
}
