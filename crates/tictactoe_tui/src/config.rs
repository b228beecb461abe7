//! TUI configuration, loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Configuration for the terminal front end.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TuiConfig {
    /// Title drawn on the outer frame.
    title: String,

    /// How long to wait for input before checking for redraws.
    tick_rate_ms: u64,

    /// File receiving tracing output.
    log_file: PathBuf,

    /// Whether to capture mouse clicks.
    mouse: bool,

    /// Cell colours.
    palette: PaletteConfig,
}

/// Colour names as written in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaletteConfig {
    /// Cells marked by X.
    x: String,
    /// Cells marked by O.
    o: String,
    /// Empty cells.
    empty: String,
    /// Keyboard cursor outline.
    cursor: String,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            title: "Tic-Tac-Toe".to_string(),
            tick_rate_ms: 100,
            log_file: PathBuf::from("tictactoe_tui.log"),
            mouse: true,
            palette: PaletteConfig::default(),
        }
    }
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            x: "blue".to_string(),
            o: "red".to_string(),
            empty: "gray".to_string(),
            cursor: "yellow".to_string(),
        }
    }
}

/// Resolved cell colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Cells marked by X.
    pub x: Color,
    /// Cells marked by O.
    pub o: Color,
    /// Empty cells.
    pub empty: Color,
    /// Keyboard cursor outline.
    pub cursor: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            x: Color::Blue,
            o: Color::Red,
            empty: Color::Gray,
            cursor: Color::Yellow,
        }
    }
}

impl TuiConfig {
    /// Loads the config at `path`, falling back to defaults if the file does
    /// not exist.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(title = %config.title, "Config loaded successfully");
        Ok(config)
    }

    /// Parses and validates a TOML document.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Renders the config as TOML.
    #[instrument(skip(self))]
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::new(format!("Failed to serialize config: {}", e)))
    }

    /// Checks values serde cannot.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::new("tick_rate_ms must be at least 1".to_string()));
        }
        self.resolve_palette().map(|_| ())
    }

    /// Parses the palette's colour names.
    #[instrument(skip(self))]
    pub fn resolve_palette(&self) -> Result<Palette, ConfigError> {
        Ok(Palette {
            x: parse_color("x", &self.palette.x)?,
            o: parse_color("o", &self.palette.o)?,
            empty: parse_color("empty", &self.palette.empty)?,
            cursor: parse_color("cursor", &self.palette.cursor)?,
        })
    }

    /// Input poll interval.
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    /// Replaces the log file path.
    pub fn with_log_file(mut self, log_file: PathBuf) -> Self {
        self.log_file = log_file;
        self
    }

    /// Enables or disables mouse capture.
    pub fn with_mouse(mut self, mouse: bool) -> Self {
        self.mouse = mouse;
        self
    }
}

fn parse_color(field: &str, value: &str) -> Result<Color, ConfigError> {
    Color::from_str(value).map_err(|e| {
        ConfigError::new(format!("Invalid colour {:?} for palette.{}: {}", value, field, e))
    })
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_document_is_default() {
        let config = TuiConfig::from_toml("").expect("Empty config parses");
        assert_eq!(config, TuiConfig::default());
        assert_eq!(config.resolve_palette().expect("Default palette"), Palette::default());
    }

    #[test]
    fn test_partial_palette_keeps_other_defaults() {
        let config = TuiConfig::from_toml(
            r##"
            tick_rate_ms = 50

            [palette]
            x = "#ff8800"
            "##,
        )
        .expect("Valid config");

        let palette = config.resolve_palette().expect("Valid palette");
        assert_eq!(palette.x, Color::Rgb(0xff, 0x88, 0x00));
        assert_eq!(palette.o, Color::Red);
        assert_eq!(config.tick_rate(), Duration::from_millis(50));
    }

    #[test]
    fn test_bad_colour_rejected() {
        let err = TuiConfig::from_toml("[palette]\no = \"not-a-colour\"").unwrap_err();
        assert!(err.message.contains("palette.o"), "{}", err.message);
    }

    #[test]
    fn test_zero_tick_rate_rejected() {
        assert!(TuiConfig::from_toml("tick_rate_ms = 0").is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(TuiConfig::from_toml("colour = \"blue\"").is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = TuiConfig::load(dir.path().join("absent.toml")).expect("Defaults");
        assert_eq!(config, TuiConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "title = \"Noughts\"\nmouse = false").expect("write config");

        let config = TuiConfig::load(file.path()).expect("Valid file");

        assert_eq!(config.title(), "Noughts");
        assert!(!*config.mouse());
    }

    #[test]
    fn test_toml_output_parses_back() {
        let config = TuiConfig::default().with_mouse(false);
        let text = config.to_toml().expect("Serializable");
        assert_eq!(TuiConfig::from_toml(&text).expect("Parses"), config);
    }
}
