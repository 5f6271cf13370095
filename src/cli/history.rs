//! Command History Module
//!
//! Bounded, persisted list of committed command lines with Up/Down
//! browsing. Entries are kept oldest first; the browse cursor ranges over
//! `0..=len`, where `len` means "not browsing".
//!
//! The history file is plain UTF-8, one command per line, and is rewritten
//! in full after every append. Persistence is best-effort: a missing or
//! unwritable file never blocks command entry.

use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{ConsoleError, Result};

/// Command history manager with optional file persistence
#[derive(Debug, Clone)]
pub struct HistoryStore {
    entries: VecDeque<String>,
    max_size: usize,
    cursor: usize,
    path: Option<PathBuf>,
}

impl HistoryStore {
    /// Create an empty history that is never written to disk
    pub fn in_memory(max_size: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_size: max_size.max(1),
            cursor: 0,
            path: None,
        }
    }

    /// Load history from `path`.
    ///
    /// A missing or unreadable file gives an empty history; the file is
    /// created on the first save. A relative path is fixed against the
    /// current directory now, so later `cd`s do not move the file.
    pub fn load(path: impl AsRef<Path>, max_size: usize) -> Self {
        let path = absolute_path(path.as_ref());
        let mut store = Self::in_memory(max_size);

        match fs::read_to_string(&path) {
            Ok(contents) => {
                store.entries = contents
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(str::to_string)
                    .collect();
                store.trim_to_bound();
                debug!(path = %path.display(), entries = store.entries.len(), "history loaded");
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no history file yet");
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "history file unreadable, starting empty");
            }
        }

        store.cursor = store.entries.len();
        store.path = Some(path);
        store
    }

    /// Add a command and persist the bounded list.
    ///
    /// Blank commands are ignored. Resets browsing to the bottom. A failed
    /// save is logged and otherwise ignored; memory stays authoritative.
    pub fn append(&mut self, command: &str) {
        if command.trim().is_empty() {
            return;
        }

        self.entries.push_back(command.to_string());
        self.trim_to_bound();
        self.reset_navigation();

        if let Err(e) = self.save() {
            warn!(error = %e, "failed to persist history");
        }
    }

    /// Write all entries to the history file, overwriting it
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ConsoleError::io(parent, e))?;
        }

        let mut contents = String::new();
        for entry in &self.entries {
            contents.push_str(entry);
            contents.push('\n');
        }
        fs::write(path, contents).map_err(|e| ConsoleError::io(path, e))
    }

    /// Step toward older entries (Up).
    ///
    /// `None` means there is nothing older and the current line must be left
    /// alone.
    pub fn navigate_previous(&mut self) -> Option<&str> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor).map(String::as_str)
    }

    /// Step toward newer entries (Down).
    ///
    /// Stepping past the newest entry yields an empty string so the line is
    /// cleared. `None` when not browsing at all.
    pub fn navigate_next(&mut self) -> Option<&str> {
        let len = self.entries.len();
        if self.cursor >= len {
            return None;
        }

        self.cursor += 1;
        if self.cursor == len {
            Some("")
        } else {
            self.entries.get(self.cursor).map(String::as_str)
        }
    }

    /// Return to the bottom of the history
    pub fn reset_navigation(&mut self) {
        self.cursor = self.entries.len();
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_browsing(&self) -> bool {
        self.cursor < self.entries.len()
    }

    /// Entries, oldest first
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn last_command(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Numbered listing, oldest first
    pub fn get_summary(&self) -> Vec<String> {
        let width = self.entries.len().to_string().len();
        self.entries
            .iter()
            .enumerate()
            .map(|(i, cmd)| format!("{:>width$}  {}", i + 1, cmd, width = width))
            .collect()
    }

    fn trim_to_bound(&mut self) {
        while self.entries.len() > self.max_size {
            self.entries.pop_front();
        }
    }
}

fn absolute_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::in_memory(crate::cli::config::DEFAULT_MAX_HISTORY_SIZE)
    }
}
