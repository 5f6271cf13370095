//! Line Editor
//!
//! The input state machine. Each [`InputEvent`] is processed to completion
//! against the [`Document`], [`HistoryStore`] and [`CompletionProvider`];
//! at most one [`EditorSignal`] comes out, after every state change for
//! that event has been applied.

use tracing::{debug, info};

use super::completion::CompletionProvider;
use super::document::{CursorDirection, Document};
use super::history::HistoryStore;
use super::keys::InputEvent;

/// Outbound notifications for the command interpreter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorSignal {
    /// A non-empty line was committed; history already holds it
    CommandEntered(String),
    InterruptRequested,
}

/// What Tab did to the current line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    NoMatch,
    Completed(String),
    Listed(Vec<String>),
}

/// Line editor driving a console document
#[derive(Debug, Clone)]
pub struct LineEditor {
    document: Document,
    history: HistoryStore,
    completion: CompletionProvider,
}

impl LineEditor {
    pub fn new(document: Document, history: HistoryStore, completion: CompletionProvider) -> Self {
        Self {
            document,
            history,
            completion,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Add command output or messages to the scrollback
    pub fn append_output(&mut self, text: &str) {
        self.document.append_output(text);
    }

    /// Reset the document to a single prompt
    pub fn clear(&mut self) {
        self.document.clear();
    }

    /// Process one input event
    pub fn handle_event(&mut self, event: InputEvent) -> Option<EditorSignal> {
        debug!(?event, "input event");

        match event {
            InputEvent::Insert(ch) => {
                self.document.insert_char(ch);
            }
            InputEvent::Enter => return self.commit(),
            InputEvent::HistoryPrevious => {
                if let Some(entry) = self.history.navigate_previous() {
                    self.document.replace_current_input(entry);
                }
            }
            InputEvent::HistoryNext => {
                if let Some(entry) = self.history.navigate_next() {
                    self.document.replace_current_input(entry);
                }
            }
            InputEvent::Backspace => {
                self.document.try_delete_one_back();
            }
            InputEvent::Delete => {
                self.document.try_delete_one_forward();
            }
            InputEvent::Tab => {
                self.complete();
            }
            InputEvent::Interrupt => {
                info!("interrupt requested");
                return Some(EditorSignal::InterruptRequested);
            }
            InputEvent::CursorLeft => self.document.move_cursor(CursorDirection::Left),
            InputEvent::CursorRight => self.document.move_cursor(CursorDirection::Right),
            InputEvent::Home => self.document.move_cursor(CursorDirection::Home),
            InputEvent::End => self.document.move_cursor(CursorDirection::End),
            InputEvent::PlaceCursor(offset) => self.document.place_cursor(offset),
            InputEvent::SelectionStarted => self.document.set_selecting(true),
            InputEvent::SelectionEnded => self.document.set_selecting(false),
            InputEvent::Ignored => {}
        }
        None
    }

    fn commit(&mut self) -> Option<EditorSignal> {
        let captured = self.document.commit_line();
        let command = captured.trim();
        if command.is_empty() {
            return None;
        }

        self.history.append(command);
        info!(command, "command entered");
        Some(EditorSignal::CommandEntered(command.to_string()))
    }

    /// Tab completion on the last space-separated token of the input
    pub fn complete(&mut self) -> CompletionOutcome {
        let input = self.document.current_input_text().to_string();
        let mut tokens: Vec<&str> = input.split(' ').filter(|t| !t.is_empty()).collect();
        let prefix = tokens.last().copied().unwrap_or("");

        let mut matches = self.completion.find_completions(prefix);
        match matches.len() {
            0 => CompletionOutcome::NoMatch,
            1 => {
                let choice = matches.remove(0);
                match tokens.last_mut() {
                    Some(last) => *last = choice.as_str(),
                    None => tokens.push(choice.as_str()),
                }
                self.document.replace_current_input(&tokens.join(" "));
                // The document drops control characters; record what it shows.
                let line = self.document.current_input_text().to_string();

                if line != input {
                    // Kept as a recall aid; the line is not executed.
                    // Appending also resets history navigation.
                    self.history.append(&line);
                }
                info!(line = %line, "completed");
                CompletionOutcome::Completed(line)
            }
            _ => {
                self.document.append_output(&matches.join(" "));
                CompletionOutcome::Listed(matches)
            }
        }
    }
}
