//! Console Line Editing Module
//!
//! An editable console document that mixes immutable output history with
//! one live input line, plus command recall, persisted history and
//! filename/executable completion.
//!
//! ## Module Structure
//!
//! - `config` - Configuration and theme management
//! - `document` - Scrollback buffer with the protected input boundary
//! - `history` - Bounded, persisted command history
//! - `completion` - Executable and working-directory completion
//! - `keys` - Input events and crossterm translation
//! - `line_editor` - Event state machine tying the above together
//! - `commands` - Builtin command interpreter for the console binary
//! - `console` - Full-screen terminal host

pub mod config;
pub mod document;
pub mod history;
pub mod completion;
pub mod keys;
pub mod line_editor;
pub mod commands;
pub mod console;

// Re-export main types for convenience
pub use config::{ConsoleConfig, LoggingConfig};
pub use document::{CursorDirection, Document};
pub use history::HistoryStore;
pub use completion::CompletionProvider;
pub use keys::InputEvent;
pub use line_editor::{CompletionOutcome, EditorSignal, LineEditor};
pub use commands::{CommandParser, CommandResult, ShellCommand, ShellInterpreter};
pub use console::{ConsoleApp, ConsoleSession};
