//! Configuration management for the computer tool
//!
//! Layers, lowest first: config file, `.env` and process environment, CLI
//! flags. The resulting value is immutable once handed to the tool.
//!
//! Config file location: ~/.config/computer-use/config.toml

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::core::error::{ComputerError, Result};
use crate::core::types::Resolution;

/// Widest API-space screen the agent is told about
pub const MAX_API_WIDTH: u32 = 1200;

/// Pause between an action and its follow-up screenshot
pub const SCREENSHOT_DELAY_MS: u64 = 2000;

/// Pause between characters when typing
pub const TYPING_DELAY_MS: u64 = 10;

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Physical display; usually supplied by WIDTH/HEIGHT rather than the file
    #[serde(default)]
    pub display: DisplayConfig,
    /// Tool behavior
    #[serde(default)]
    pub tool: ToolConfig,
}

/// The screen being controlled
///
/// Zero dimensions mean "not set yet" and are rejected by [`Config::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Screen width in pixels (WIDTH)
    pub width: u32,
    /// Screen height in pixels (HEIGHT)
    pub height: u32,
    /// X display number (DISPLAY_NUM)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_num: Option<u32>,
}

/// Tool behavior configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Directory screenshots are written to (COMPUTER_USE_OUTPUT_DIR)
    pub output_dir: PathBuf,
    /// Whether coordinates and screenshots are scaled to API space (COMPUTER_USE_SCALING)
    pub scaling_enabled: bool,
    /// Width cap of API space
    pub max_api_width: u32,
    /// Delay before the post-action screenshot, in ms
    pub screenshot_delay_ms: u64,
    /// Delay between typed characters, in ms
    pub typing_delay_ms: u64,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./outputs"),
            scaling_enabled: true,
            max_api_width: MAX_API_WIDTH,
            screenshot_delay_ms: SCREENSHOT_DELAY_MS,
            typing_delay_ms: TYPING_DELAY_MS,
        }
    }
}

impl ToolConfig {
    pub fn screenshot_delay(&self) -> Duration {
        Duration::from_millis(self.screenshot_delay_ms)
    }

    pub fn typing_delay(&self) -> Duration {
        Duration::from_millis(self.typing_delay_ms)
    }
}

impl DisplayConfig {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            display_num: None,
        }
    }

    pub fn resolution(&self) -> Resolution {
        Resolution::new(self.width, self.height)
    }
}

/// Parse an optional value out of a lookup function
fn lookup_parse<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| ComputerError::config(format!("Invalid {}={:?}: {}", key, raw, e))),
        _ => Ok(None),
    }
}

/// Parse an optional on/off flag
fn lookup_flag<F>(lookup: &F, key: &str) -> Result<Option<bool>>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key).filter(|v| !v.trim().is_empty()) else {
        return Ok(None);
    };
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(Some(true)),
        "false" | "0" | "no" | "off" => Ok(Some(false)),
        _ => Err(ComputerError::config(format!(
            "Invalid {}={:?}: expected true or false",
            key, raw
        ))),
    }
}

impl Config {
    /// Create a configuration for a display with default tool settings
    pub fn new(display: DisplayConfig) -> Self {
        Self {
            display,
            tool: ToolConfig::default(),
        }
    }

    /// Get the config directory path
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("computer-use")
    }

    /// Get the config file path
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Check if a config file exists
    pub fn config_exists() -> bool {
        Self::config_file().exists()
    }

    /// Load and validate configuration from file and environment
    pub fn load() -> Result<Self> {
        let config = Self::load_layered()?;
        config.validate()?;
        Ok(config)
    }

    /// Merge the config file (if any) with the environment, without
    /// validating, so callers can apply further overrides first
    pub fn load_layered() -> Result<Self> {
        // Try to load .env file if it exists
        let _ = dotenvy::dotenv();

        let content = if Self::config_exists() {
            Some(Self::read_config_file()?)
        } else {
            None
        };

        Self::layered(content.as_deref(), |key: &str| env::var(key).ok())
    }

    fn read_config_file() -> Result<String> {
        fs::read_to_string(Self::config_file())
            .map_err(|e| ComputerError::config(format!("Failed to read config: {}", e)))
    }

    /// Apply variables over an optional TOML document
    pub fn layered<F>(file: Option<&str>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match file {
            Some(content) => Self::from_toml(content)?,
            None => Self::new(DisplayConfig::default()),
        };
        config.apply_overrides(lookup)?;
        Ok(config)
    }

    /// Parse a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| ComputerError::config(format!("Failed to parse config: {}", e)))
    }

    /// Build a validated configuration purely from variables
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self::layered(None, lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields from variables that are present
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(width) = lookup_parse(&lookup, "WIDTH")? {
            self.display.width = width;
        }
        if let Some(height) = lookup_parse(&lookup, "HEIGHT")? {
            self.display.height = height;
        }
        if let Some(display_num) = lookup_parse(&lookup, "DISPLAY_NUM")? {
            self.display.display_num = Some(display_num);
        }
        if let Some(dir) = lookup("COMPUTER_USE_OUTPUT_DIR").filter(|d| !d.is_empty()) {
            self.tool.output_dir = PathBuf::from(dir);
        }
        if let Some(enabled) = lookup_flag(&lookup, "COMPUTER_USE_SCALING")? {
            self.tool.scaling_enabled = enabled;
        }
        Ok(())
    }

    /// Reject configurations the tool cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.display.width == 0 || self.display.height == 0 {
            return Err(ComputerError::config(
                "WIDTH, HEIGHT must be set and non-zero",
            ));
        }
        if self.tool.max_api_width == 0 {
            return Err(ComputerError::config("max_api_width must be non-zero"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_from_lookup() {
        let config = Config::from_lookup(vars(&[
            ("WIDTH", "1920"),
            ("HEIGHT", "1080"),
            ("DISPLAY_NUM", "1"),
            ("COMPUTER_USE_OUTPUT_DIR", "/tmp/shots"),
            ("COMPUTER_USE_SCALING", "0"),
        ]))
        .unwrap();

        assert_eq!(config.display.resolution(), Resolution::new(1920, 1080));
        assert_eq!(config.display.display_num, Some(1));
        assert_eq!(config.tool.output_dir, PathBuf::from("/tmp/shots"));
        assert!(!config.tool.scaling_enabled);
        assert_eq!(config.tool.max_api_width, MAX_API_WIDTH);
    }

    #[test]
    fn test_missing_dimensions() {
        let err = Config::from_lookup(vars(&[("WIDTH", "1920")])).unwrap_err();
        assert!(err.to_string().contains("WIDTH, HEIGHT must be set"));
    }

    #[test]
    fn test_unparseable_dimension() {
        let err = Config::from_lookup(vars(&[("WIDTH", "wide"), ("HEIGHT", "1080")]));
        assert!(matches!(err, Err(ComputerError::Config(_))));
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let config = Config::new(DisplayConfig::new(0, 1080));
        assert!(config.validate().is_err());
        assert!(Config::new(DisplayConfig::new(1280, 800)).validate().is_ok());
    }

    #[test]
    fn test_toml_with_overrides() {
        let mut config = Config::from_toml(
            r#"
            [display]
            width = 1024
            height = 768

            [tool]
            screenshot_delay_ms = 500
            "#,
        )
        .unwrap();
        assert_eq!(config.tool.screenshot_delay(), Duration::from_millis(500));
        assert_eq!(config.tool.typing_delay(), Duration::from_millis(TYPING_DELAY_MS));

        config.apply_overrides(vars(&[("WIDTH", "2560")])).unwrap();
        assert_eq!(config.display.width, 2560);
        assert_eq!(config.display.height, 768);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::new(DisplayConfig::new(1920, 1080));
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("width = 1920"));
        assert!(!toml_str.contains("display_num"));
        assert_eq!(Config::from_toml(&toml_str).unwrap(), config);
    }

    #[test]
    fn test_config_dir() {
        let dir = Config::config_dir();
        assert!(dir.to_string_lossy().contains("computer-use"));
    }

    #[test]
    fn test_tool_only_file_takes_dimensions_from_env() {
        let config = Config::layered(
            Some("[tool]\nscreenshot_delay_ms = 500\n"),
            vars(&[("WIDTH", "1920"), ("HEIGHT", "1080")]),
        )
        .unwrap();

        config.validate().unwrap();
        assert_eq!(config.display.resolution(), Resolution::new(1920, 1080));
        assert_eq!(config.tool.screenshot_delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_tool_only_file_without_env_fails_validation() {
        let config = Config::layered(Some("[tool]\nscaling_enabled = false\n"), vars(&[])).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("WIDTH, HEIGHT must be set"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let err = Config::layered(
            Some("[tool\nscreenshot_delay_ms = "),
            vars(&[("WIDTH", "1920"), ("HEIGHT", "1080")]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn test_scaling_flag_parsing() {
        let parse = |raw: &str| {
            Config::from_lookup(vars(&[
                ("WIDTH", "1920"),
                ("HEIGHT", "1080"),
                ("COMPUTER_USE_SCALING", raw),
            ]))
        };
        assert!(parse("TRUE").unwrap().tool.scaling_enabled);
        assert!(parse("yes").unwrap().tool.scaling_enabled);
        assert!(!parse("0").unwrap().tool.scaling_enabled);
        assert!(!parse("Off").unwrap().tool.scaling_enabled);
        assert!(matches!(parse("ture"), Err(ComputerError::Config(_))));
    }
}
