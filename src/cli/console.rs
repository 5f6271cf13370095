//! Terminal Console
//!
//! Hosts the line editor in a full-screen terminal: reads crossterm events,
//! feeds them to the editor, runs committed commands through the builtin
//! interpreter and redraws the document after every event.

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute, terminal,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Terminal,
};
use tokio::time::Duration;
use tracing::{debug, info, warn};

use super::{
    commands::{CommandResult, ShellInterpreter},
    completion::CompletionProvider,
    config::ConsoleConfig,
    document::Document,
    history::HistoryStore,
    keys::InputEvent,
    line_editor::{EditorSignal, LineEditor},
};
use crate::error::Result;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Editor plus interpreter, without any terminal attached
#[derive(Debug)]
pub struct ConsoleSession {
    editor: LineEditor,
    interpreter: ShellInterpreter,
    should_exit: bool,
}

impl ConsoleSession {
    pub fn new(editor: LineEditor) -> Self {
        Self {
            editor,
            interpreter: ShellInterpreter::new(),
            should_exit: false,
        }
    }

    /// Session wired to the configured prompt, history file and the
    /// process environment for completion
    pub fn from_config(config: &ConsoleConfig) -> Self {
        let history = HistoryStore::load(&config.history_file, config.max_history_size);
        let editor = LineEditor::new(
            Document::new(config.prompt_marker.clone()),
            history,
            CompletionProvider::from_env(),
        );
        Self::new(editor)
    }

    pub fn editor(&self) -> &LineEditor {
        &self.editor
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    /// Feed one event and act on whatever the editor signals
    pub fn handle_input(&mut self, event: InputEvent) {
        if let Some(signal) = self.editor.handle_event(event) {
            self.dispatch(signal);
        }
    }

    fn dispatch(&mut self, signal: EditorSignal) {
        match signal {
            EditorSignal::CommandEntered(command) => {
                let result = self.interpreter.execute(&command, self.editor.history());
                if result.is_error() {
                    debug!(command = %command, "builtin failed");
                }
                if let Some(text) = result.message() {
                    self.editor.append_output(text);
                }
                match result {
                    CommandResult::Clear => self.editor.clear(),
                    CommandResult::Exit => self.should_exit = true,
                    CommandResult::Output(_) | CommandResult::Error(_) | CommandResult::NoOp => {}
                }
            }
            EditorSignal::InterruptRequested => {
                // Builtins finish synchronously, so there is never anything
                // to cancel; Ctrl+C leaves the console.
                info!("interrupt with no running command, exiting");
                self.should_exit = true;
            }
        }
    }
}

/// Full-screen terminal console
pub struct ConsoleApp {
    config: ConsoleConfig,
    session: ConsoleSession,
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl ConsoleApp {
    /// Set up the terminal and load history
    pub fn new(config: ConsoleConfig) -> Result<Self> {
        let session = ConsoleSession::from_config(&config);

        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;
        terminal::enable_raw_mode()?;
        enter_screen(terminal.backend_mut())?;

        Ok(Self {
            config,
            session,
            terminal,
        })
    }

    /// Run until `exit` or Ctrl+C
    pub async fn run(&mut self) -> Result<()> {
        let history = self.session.editor().history();
        info!(
            entries = history.len(),
            max = history.max_size(),
            file = ?history.path(),
            "console session started"
        );

        while !self.session.should_exit() {
            self.render()?;
            if event::poll(POLL_INTERVAL)? {
                // Resizes need no handling; the next draw picks up the new size.
                let event: Event = event::read()?;
                if let Some(input) = InputEvent::from_terminal_event(&event) {
                    self.session.handle_input(input);
                }
            }
        }

        self.cleanup()?;
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        let document = self.session.editor().document();
        let frame_color = self.config.get_frame_color();
        let text_color = self.config.get_text_color();
        let title = self.config.title.clone();

        let all_lines: Vec<&str> = document.lines().collect();
        let (cursor_line, cursor_col) = document.cursor_line_col();

        self.terminal.draw(|f| {
            let area = f.size();
            let block = Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(frame_color));
            let inner = block.inner(area);

            // Hand over only the visible tail; scrollback may exceed u16 lines.
            let scroll = all_lines.len().saturating_sub(inner.height as usize);
            let lines: Vec<Line> = all_lines[scroll..].iter().map(|l| Line::from(*l)).collect();
            let paragraph = Paragraph::new(lines)
                .block(block)
                .style(Style::default().fg(text_color));
            f.render_widget(paragraph, area);

            if let Some((x, y)) = cursor_cell(inner, scroll, cursor_line, cursor_col) {
                f.set_cursor(x, y);
            }
        })?;
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }
}

impl Drop for ConsoleApp {
    fn drop(&mut self) {
        if let Err(e) = self.cleanup() {
            warn!(error = %e, "terminal restore failed");
        }
    }
}

/// Switch to the console screen; raw mode is undone if that fails, since no
/// `ConsoleApp` exists yet to restore it on drop.
fn enter_screen<W: Write>(out: &mut W) -> io::Result<()> {
    let entered = execute!(
        out,
        terminal::EnterAlternateScreen,
        EnableMouseCapture,
        cursor::Show
    );
    if let Err(e) = entered {
        if let Err(restore) = terminal::disable_raw_mode() {
            warn!(error = %restore, "could not leave raw mode");
        }
        return Err(e);
    }
    Ok(())
}

/// Screen cell for a document cursor, if it is inside the visible area
fn cursor_cell(inner: Rect, scroll: usize, line: usize, col: usize) -> Option<(u16, u16)> {
    let row = line.checked_sub(scroll)?;
    if row >= inner.height as usize || inner.width == 0 {
        return None;
    }
    let col = col.min(inner.width as usize - 1);
    Some((inner.x + col as u16, inner.y + row as u16))
}
