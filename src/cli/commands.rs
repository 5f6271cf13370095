//! Builtin Commands Module
//!
//! A small command interpreter for the bundled console binary. The line
//! editor only hands over finished command lines; this module decides what
//! they mean and produces text for the scrollback.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::history::HistoryStore;

/// Builtin commands understood by the console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand {
    Ls,
    Pwd,
    Echo,
    Cd,
    Clear,
    History,
    Help,
    Exit,
}

impl ShellCommand {
    /// Parse a command name
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "ls" => Some(Self::Ls),
            "pwd" => Some(Self::Pwd),
            "echo" => Some(Self::Echo),
            "cd" => Some(Self::Cd),
            "clear" => Some(Self::Clear),
            "history" => Some(Self::History),
            "help" => Some(Self::Help),
            "exit" | "quit" => Some(Self::Exit),
            _ => None,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Ls => "List directory entries",
            Self::Pwd => "Print the working directory",
            Self::Echo => "Print the arguments",
            Self::Cd => "Change the working directory",
            Self::Clear => "Clear the console",
            Self::History => "Show command history",
            Self::Help => "Show available commands",
            Self::Exit => "Leave the console",
        }
    }

    pub fn usage(&self) -> &'static str {
        match self {
            Self::Ls => "ls [-a] [path]",
            Self::Pwd => "pwd",
            Self::Echo => "echo [text]",
            Self::Cd => "cd [path|~]",
            Self::Clear => "clear",
            Self::History => "history",
            Self::Help => "help",
            Self::Exit => "exit",
        }
    }

    pub fn all_commands() -> Vec<Self> {
        vec![
            Self::Ls,
            Self::Pwd,
            Self::Echo,
            Self::Cd,
            Self::Clear,
            Self::History,
            Self::Help,
            Self::Exit,
        ]
    }
}

impl fmt::Display for ShellCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ls => "ls",
            Self::Pwd => "pwd",
            Self::Echo => "echo",
            Self::Cd => "cd",
            Self::Clear => "clear",
            Self::History => "history",
            Self::Help => "help",
            Self::Exit => "exit",
        };
        write!(f, "{}", name)
    }
}

/// Command execution result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    Output(String),
    Error(String),
    Clear,
    Exit,
    NoOp,
}

impl CommandResult {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Get the message content if any
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Output(msg) | Self::Error(msg) => Some(msg),
            Self::Clear | Self::Exit | Self::NoOp => None,
        }
    }
}

/// Command parser
pub struct CommandParser;

impl CommandParser {
    /// Split a command line into command and arguments
    pub fn parse_command_line(input: &str) -> Option<(ShellCommand, Vec<String>)> {
        let parts: Vec<&str> = input.split_whitespace().collect();
        let (name, args) = parts.split_first()?;
        let command = ShellCommand::from_str(name)?;
        Some((command, args.iter().map(|s| s.to_string()).collect()))
    }
}

/// Runs builtin commands against the process environment
#[derive(Debug, Default)]
pub struct ShellInterpreter;

impl ShellInterpreter {
    pub fn new() -> Self {
        Self
    }

    /// Execute one committed command line
    pub fn execute(&mut self, line: &str, history: &HistoryStore) -> CommandResult {
        let Some((command, args)) = CommandParser::parse_command_line(line) else {
            return CommandResult::Error(format!("Unknown command: {}", line));
        };
        debug!(%command, ?args, "executing builtin");

        match command {
            ShellCommand::Ls => list_directory(&args),
            ShellCommand::Pwd => print_working_directory(&args),
            ShellCommand::Echo => {
                // Everything after the first space, spacing preserved.
                let text = line.trim_start().split_once(' ').map_or("", |(_, rest)| rest);
                CommandResult::Output(text.to_string())
            }
            ShellCommand::Cd => change_directory(&args),
            ShellCommand::Clear => CommandResult::Clear,
            ShellCommand::History => {
                let summary = history.get_summary();
                if summary.is_empty() {
                    CommandResult::NoOp
                } else {
                    CommandResult::Output(summary.join("\n"))
                }
            }
            ShellCommand::Help => CommandResult::Output(help_text()),
            ShellCommand::Exit => CommandResult::Exit,
        }
    }
}

fn list_directory(args: &[String]) -> CommandResult {
    let mut path: &str = ".";
    let mut show_hidden = false;
    for arg in args {
        if arg == "-a" {
            show_hidden = true;
        } else {
            path = arg.as_str();
        }
    }

    let entries = match fs::read_dir(path) {
        Ok(entries) => entries,
        Err(_) => {
            return CommandResult::Error(format!(
                "ls: cannot access '{}': No such directory",
                path
            ))
        }
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| show_hidden || !name.starts_with('.'))
        .collect();
    names.sort();

    if names.is_empty() {
        CommandResult::NoOp
    } else {
        CommandResult::Output(names.join("\n"))
    }
}

fn print_working_directory(args: &[String]) -> CommandResult {
    if !args.is_empty() {
        return CommandResult::Error("pwd: too many arguments".to_string());
    }
    match std::env::current_dir() {
        Ok(dir) => CommandResult::Output(dir.display().to_string()),
        Err(e) => CommandResult::Error(format!("pwd: {}", e)),
    }
}

fn change_directory(args: &[String]) -> CommandResult {
    let target = match args.first().map(String::as_str) {
        None | Some("~") => match dirs::home_dir() {
            Some(home) => home,
            None => return CommandResult::Error("cd: no home directory".to_string()),
        },
        Some(path) => PathBuf::from(path),
    };

    match std::env::set_current_dir(&target) {
        Ok(()) => {
            let now = std::env::current_dir().unwrap_or_else(|_| absolute(&target));
            CommandResult::Output(format!("Changed directory to: {}", now.display()))
        }
        Err(_) => CommandResult::Error(format!("cd: no such directory: {}", target.display())),
    }
}

fn absolute(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

fn help_text() -> String {
    ShellCommand::all_commands()
        .iter()
        .map(|cmd| format!("{:<16} {}", cmd.usage(), cmd.description()))
        .collect::<Vec<_>>()
        .join("\n")
}
