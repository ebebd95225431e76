use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Config {
    /// In-note search behavior (case sensitivity, debounce, scroll context)
    #[serde(default)]
    pub search: SearchConfig,

    /// Editing surface metrics used to align overlays and scroll targets
    #[serde(default)]
    pub editor: EditorConfig,
}

/// Search behavior configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SearchConfig {
    /// Match case when searching (default: false)
    #[serde(default = "default_false")]
    pub case_sensitive: bool,

    /// Delay in milliseconds after the last keystroke before the query is applied.
    /// Explicitly submitted searches never wait for this.
    /// Default: 300ms
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Delay in milliseconds after a change before the rendered preview is
    /// highlighted, giving the markdown renderer time to commit its output.
    /// Default: 100ms
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Lines kept visible above a match when scrolling to it
    #[serde(default = "default_context_lines")]
    pub context_lines: usize,
}

/// Editing surface configuration
///
/// The surface is a monospace plain-text area; every value here must match
/// how it is actually styled or the overlay will drift from the text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EditorConfig {
    /// Height of one text line in pixels
    #[serde(default = "default_line_height")]
    pub line_height: f32,

    /// Advance width of one monospace cell in pixels
    #[serde(default = "default_char_width")]
    pub char_width: f32,

    /// Padding between the surface's top edge and the first line, in pixels
    #[serde(default)]
    pub padding_top: f32,

    /// Padding between the surface's left edge and the first column, in pixels
    #[serde(default)]
    pub padding_left: f32,

    /// Number of cells per tab stop
    #[serde(default = "default_tab_size")]
    pub tab_size: usize,
}

fn default_false() -> bool {
    false
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_settle_delay_ms() -> u64 {
    100
}

fn default_context_lines() -> usize {
    5
}

fn default_line_height() -> f32 {
    20.0
}

fn default_char_width() -> f32 {
    8.0
}

fn default_tab_size() -> usize {
    4
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            debounce_ms: default_debounce_ms(),
            settle_delay_ms: default_settle_delay_ms(),
            context_lines: default_context_lines(),
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            line_height: default_line_height(),
            char_width: default_char_width(),
            padding_top: 0.0,
            padding_left: 0.0,
            tab_size: default_tab_size(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("notesift").join("config.json"))
    }

    /// Load configuration from the default location, falling back to defaults if not found
    pub fn load_or_default() -> Self {
        if let Some(config_path) = Self::default_config_path() {
            if config_path.exists() {
                match Self::load_from_file(&config_path) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!(
                            "Failed to load config from {}: {}, using defaults",
                            config_path.display(),
                            e
                        );
                    }
                }
            }
        }
        Self::default()
    }

    /// Load configuration from a JSON file. Missing fields take their defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config: Config = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(path.as_ref(), contents)?;
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let editor = &self.editor;
        if !editor.line_height.is_finite() || editor.line_height <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "editor.line_height must be positive, got {}",
                editor.line_height
            )));
        }
        if !editor.char_width.is_finite() || editor.char_width <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "editor.char_width must be positive, got {}",
                editor.char_width
            )));
        }
        if editor.tab_size == 0 {
            return Err(ConfigError::Validation(
                "editor.tab_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Errors from loading or saving configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Serialize error: {0}")]
    Serialize(serde_json::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}
