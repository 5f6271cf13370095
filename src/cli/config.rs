//! Console Configuration and Theme Management
//!
//! This module handles the settings of the console: the prompt marker,
//! history bound and location, log output, and the colors used by the
//! terminal renderer. Configuration is stored as JSON and every field
//! falls back to its default when absent.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::error::{ConsoleError, Result};

/// Environment variable pointing at an alternative config file
pub const CONFIG_ENV_VAR: &str = "SCROLLTERM_CONFIG";

pub const DEFAULT_PROMPT_MARKER: &str = ">>> ";
pub const DEFAULT_MAX_HISTORY_SIZE: usize = 100;

const HISTORY_FILE_NAME: &str = ".scrollterm_history";

/// Log output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log file. No file means logging stays disabled, since stdout
    /// belongs to the terminal UI.
    pub file: Option<PathBuf>,
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: None,
            level: "info".to_string(),
        }
    }
}

/// Configuration for the console
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub prompt_marker: String,
    pub max_history_size: usize,
    pub history_file: PathBuf,
    pub title: String,
    pub frame_color: String,
    pub text_color: String,
    pub logging: LoggingConfig,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            prompt_marker: DEFAULT_PROMPT_MARKER.to_string(),
            max_history_size: DEFAULT_MAX_HISTORY_SIZE,
            history_file: default_history_file(),
            title: "scrollterm".to_string(),
            frame_color: "DarkBlue".to_string(),
            text_color: "White".to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ConsoleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a JSON file.
    ///
    /// A missing file yields the defaults; a file that exists but cannot be
    /// read or parsed is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(ConsoleError::io(path, e)),
        };

        let config: Self =
            serde_json::from_str(&contents).map_err(|source| ConsoleError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(config.normalized())
    }

    /// Load from `$SCROLLTERM_CONFIG`, or `<config_dir>/scrollterm/config.json`
    pub fn load_default() -> Result<Self> {
        match default_config_path() {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Write configuration as pretty JSON, creating parent directories
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConsoleError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| {
            ConsoleError::ConfigParse {
                path: path.to_path_buf(),
                source,
            }
        })?;
        fs::write(path, json).map_err(|e| ConsoleError::io(path, e))
    }

    fn normalized(mut self) -> Self {
        // A zero bound would make every append drop the entry it just stored.
        self.max_history_size = self.max_history_size.max(1);
        if self.prompt_marker.is_empty() {
            self.prompt_marker = DEFAULT_PROMPT_MARKER.to_string();
        }
        self
    }

    /// Get frame color as Color
    pub fn get_frame_color(&self) -> Color {
        match self.frame_color.as_str() {
            "Black" => Color::Black,
            "DarkBlue" | "Blue" => Color::Blue,
            "Cyan" => Color::Cyan,
            "Gray" => Color::Gray,
            "Magenta" => Color::Magenta,
            "Green" => Color::Green,
            "Red" => Color::Red,
            "Yellow" => Color::Yellow,
            _ => Color::Blue,
        }
    }

    /// Get text color as Color
    pub fn get_text_color(&self) -> Color {
        match self.text_color.as_str() {
            "Black" => Color::Black,
            "White" => Color::White,
            "Green" => Color::Green,
            "Yellow" => Color::Yellow,
            "Red" => Color::Red,
            "Blue" => Color::Blue,
            "Cyan" => Color::Cyan,
            "Magenta" => Color::Magenta,
            _ => Color::White,
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("scrollterm").join("config.json"))
}

fn default_history_file() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(HISTORY_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = ConsoleConfig::default();
        assert_eq!(config.prompt_marker, ">>> ");
        assert_eq!(config.max_history_size, 100);
        assert!(config.history_file.ends_with(".scrollterm_history"));
        assert_eq!(config.logging.file, None);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = tempdir().unwrap();
        let config = ConsoleConfig::load(temp_dir.path().join("nope.json")).unwrap();
        assert_eq!(config, ConsoleConfig::default());
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{ "prompt_marker": "$ ", "max_history_size": 5 }"#).unwrap();

        let config = ConsoleConfig::load(&path).unwrap();
        assert_eq!(config.prompt_marker, "$ ");
        assert_eq!(config.max_history_size, 5);
        assert_eq!(config.frame_color, "DarkBlue");
    }

    #[test]
    fn test_zero_history_size_is_clamped() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{ "max_history_size": 0, "prompt_marker": "" }"#).unwrap();

        let config = ConsoleConfig::load(&path).unwrap();
        assert_eq!(config.max_history_size, 1);
        assert_eq!(config.prompt_marker, DEFAULT_PROMPT_MARKER);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let err = ConsoleConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConsoleError::ConfigParse { .. }));
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.json");
        let mut config = ConsoleConfig::new();
        config.title = "console".to_string();
        config.logging.file = Some(temp_dir.path().join("console.log"));

        config.save(&path).unwrap();
        assert_eq!(ConsoleConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_color_conversion() {
        let mut config = ConsoleConfig::default();
        assert!(matches!(config.get_frame_color(), Color::Blue));
        assert!(matches!(config.get_text_color(), Color::White));

        config.frame_color = "Magenta".to_string();
        config.text_color = "no-such-color".to_string();
        assert!(matches!(config.get_frame_color(), Color::Magenta));
        assert!(matches!(config.get_text_color(), Color::White));
    }
}
