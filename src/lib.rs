//! scrollterm - a scrollback-preserving command console line editor
//!
//! This library provides the editing engine behind an interactive console:
//! a single document where output history stays immutable and only the
//! line after the current prompt can be edited.
//!
//! # Features
//!
//! - **Protected input region**: edits, deletions and typing never reach
//!   into scrollback, even after the cursor drifts there
//! - **Command recall**: Up/Down browsing over a bounded history
//! - **Persistent history**: one command per line in a plain text file
//! - **Tab completion**: executables on `PATH` plus working-directory entries
//! - **Interrupt signaling**: Ctrl+C is passed through to the interpreter
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use scrollterm::cli::{
//!     CompletionProvider, Document, EditorSignal, HistoryStore, InputEvent, LineEditor,
//! };
//!
//! let mut editor = LineEditor::new(
//!     Document::new(">>> "),
//!     HistoryStore::load("history.txt", 100),
//!     CompletionProvider::from_env(),
//! );
//!
//! for ch in "pwd".chars() {
//!     editor.handle_event(InputEvent::Insert(ch));
//! }
//! if let Some(EditorSignal::CommandEntered(cmd)) = editor.handle_event(InputEvent::Enter) {
//!     editor.append_output(&format!("ran {}", cmd));
//! }
//! ```

pub mod cli;
pub mod error;
pub mod logging;

// Re-export commonly used types for convenience
pub use cli::{ConsoleConfig, Document, EditorSignal, HistoryStore, InputEvent, LineEditor};
pub use error::{ConsoleError, Result};
