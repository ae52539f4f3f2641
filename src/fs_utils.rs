use std::cmp::Ordering;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

use crate::error::{Result, SearchError};

/// Immutable set of file-name suffixes a search is restricted to.
///
/// Matching is a plain, case-sensitive suffix test on the file name, so
/// `".cpp"` admits `main.cpp` but not `main.CPP` or `main.cppm`.
/// An empty filter admits every file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionFilter {
    suffixes: Vec<String>,
}

impl ExtensionFilter {
    /// A filter that admits every file.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for suffix in suffixes {
            let suffix = suffix.into();
            if !suffix.is_empty() && !out.contains(&suffix) {
                out.push(suffix);
            }
        }
        Self { suffixes: out }
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }

    pub fn allows_any(&self) -> bool {
        self.suffixes.is_empty()
    }

    /// Checks a file name (not a full path) against the filter.
    pub fn allows(&self, file_name: &str) -> bool {
        self.allows_any() || self.suffixes.iter().any(|s| file_name.ends_with(s.as_str()))
    }

    pub fn allows_path(&self, path: &Path) -> bool {
        match path.file_name() {
            Some(name) => self.allows(&name.to_string_lossy()),
            None => false,
        }
    }
}

/// Fails unless `root` exists and is a directory.
pub fn validate_search_root(root: &Path) -> Result<()> {
    if !root.exists() {
        return Err(SearchError::RootNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(SearchError::RootNotDirectory(root.to_path_buf()));
    }
    Ok(())
}

/// Directories sort after everything else; entries of the same kind keep
/// the order the filesystem returned them in.
fn files_before_dirs(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type().is_dir().cmp(&b.file_type().is_dir())
}

/// Builds a top-down walker over `root`.
///
/// Each directory is yielded before its contents, its files before its
/// subdirectories. Symlinked directories are not descended into.
pub fn top_down_walker(root: &Path) -> walkdir::IntoIter {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by(files_before_dirs)
        .into_iter()
}

/// True for entries that should be scanned as files: regular files and
/// symlinks that resolve to regular files.
pub fn is_scannable_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    if file_type.is_file() {
        return true;
    }
    file_type.is_symlink() && entry.path().is_file()
}
