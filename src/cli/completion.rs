//! Completion Module
//!
//! Filename and executable completion candidates. Every lookup scans the
//! filesystem afresh: executables from each search-path directory plus
//! every entry of the working directory. Unreadable directories are
//! skipped.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

/// Where the scan roots come from
#[derive(Debug, Clone)]
enum ScanRoots {
    /// `PATH` and the working directory, read at every lookup
    Process,
    Fixed {
        search_path: Vec<PathBuf>,
        working_dir: PathBuf,
    },
}

/// Completion candidate lookup
#[derive(Debug, Clone)]
pub struct CompletionProvider {
    roots: ScanRoots,
}

impl CompletionProvider {
    /// Provider that follows the process environment
    pub fn from_env() -> Self {
        Self {
            roots: ScanRoots::Process,
        }
    }

    /// Provider with explicit roots
    pub fn with_roots(search_path: Vec<PathBuf>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            roots: ScanRoots::Fixed {
                search_path,
                working_dir: working_dir.into(),
            },
        }
    }

    /// Sorted, duplicate-free names starting with `prefix`
    pub fn find_completions(&self, prefix: &str) -> Vec<String> {
        let (search_path, working_dir) = match &self.roots {
            ScanRoots::Process => (process_search_path(), std::env::current_dir().ok()),
            ScanRoots::Fixed {
                search_path,
                working_dir,
            } => (search_path.clone(), Some(working_dir.clone())),
        };

        let mut matches = BTreeSet::new();
        for dir in &search_path {
            matches.extend(
                scan_directory(dir, prefix)
                    .filter(|(_, path)| is_executable(path))
                    .map(|(name, _)| name),
            );
        }
        if let Some(dir) = &working_dir {
            matches.extend(scan_directory(dir, prefix).map(|(name, _)| name));
        }

        debug!(prefix, count = matches.len(), "completion scan finished");
        matches.into_iter().collect()
    }
}

impl Default for CompletionProvider {
    fn default() -> Self {
        Self::from_env()
    }
}

fn process_search_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|paths| {
            std::env::split_paths(&paths)
                .filter(|p| !p.as_os_str().is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Direct children of `dir` whose name starts with `prefix`.
/// Errors (missing directory, unreadable entries, non-UTF-8 names) are
/// skipped.
fn scan_directory<'a>(
    dir: &Path,
    prefix: &'a str,
) -> impl Iterator<Item = (String, PathBuf)> + 'a {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter_map(move |entry| {
            let name = entry.file_name().to_str()?.to_string();
            if !name.starts_with(prefix) {
                return None;
            }
            Some((name, entry.into_path()))
        })
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    // fs::metadata follows symlinks, which is how most of /usr/bin is laid out.
    fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    fs::metadata(path).map(|meta| meta.is_file()).unwrap_or(false)
}
