//! Settings file support
//!
//! Loads settings from ~/.bionic-reading.toml (or %USERPROFILE%\.bionic-reading.toml
//! on Windows). All keys live in the `[bionic-reading]` table.
//!
//! Example:
//! ```text
//! [bionic-reading]
//! percentage-of-word = 0.4
//! enabled = true
//! excluded-keywords = ["fn", "let", "struct", "impl"]
//! ```
//!
//! Values of the wrong type fall back to their defaults and the fraction is
//! clamped to `[0, 1]`, so any readable file yields a usable configuration.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::emphasis::{clamp_fraction, Configuration, KeywordFilter, DEFAULT_EMPHASIS_FRACTION};
use crate::error::Result;

/// Settings namespace; also the table name in the settings file
pub const NAMESPACE: &str = "bionic-reading";

const SETTINGS_FILE: &str = ".bionic-reading.toml";

/// Configuration settings
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Leading fraction of each word to emphasize
    pub percentage_of_word: f64,
    /// Whether emphasis is shown at all
    pub enabled: bool,
    /// Replacement keyword list (None = built-in list)
    pub excluded_keywords: Option<Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            percentage_of_word: DEFAULT_EMPHASIS_FRACTION,
            enabled: true,
            excluded_keywords: None,
        }
    }
}

impl Config {
    /// Get the settings file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(SETTINGS_FILE))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(SETTINGS_FILE))
        }
    }

    /// Load settings from the default path, falling back to defaults
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_or_default(&path),
            None => Config::default(),
        }
    }

    /// Load settings from `path`; a missing or invalid file yields defaults
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Config::default();
        }
        match Self::load_from(path) {
            Ok(config) => {
                info!(path = %path.display(), "loaded settings");
                config
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring settings file");
                Config::default()
            }
        }
    }

    /// Load settings from a file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse settings file contents
    ///
    /// Only TOML syntax errors are reported; a missing table or bad values
    /// just leave the defaults in place.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let table: toml::Table = contents.parse()?;
        let mut config = Config::default();
        if let Some(toml::Value::Table(section)) = table.get(NAMESPACE) {
            config.apply(section);
        }
        Ok(config)
    }

    /// Apply settings from the namespace table
    fn apply(&mut self, section: &toml::Table) {
        if let Some(value) = section.get("percentage-of-word") {
            match parse_fraction(value) {
                Some(fraction) => self.percentage_of_word = fraction,
                None => warn!(value = %value, "percentage-of-word is not a number"),
            }
        }

        if let Some(value) = section.get("enabled") {
            match value.as_bool() {
                Some(enabled) => self.enabled = enabled,
                None => warn!(value = %value, "enabled is not a boolean"),
            }
        }

        if let Some(toml::Value::Array(items)) = section.get("excluded-keywords") {
            self.excluded_keywords = Some(
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect(),
            );
        }
    }

    /// Engine configuration for the current settings
    pub fn configuration(&self) -> Configuration {
        Configuration::new(self.percentage_of_word, self.enabled)
    }

    /// Keyword filter for the current settings
    pub fn keyword_filter(&self) -> KeywordFilter {
        match &self.excluded_keywords {
            Some(keywords) => KeywordFilter::new(keywords.iter().cloned()),
            None => KeywordFilter::default(),
        }
    }

    /// Change the fraction by `delta`, clamped to `[0, 1]`
    pub fn adjust_fraction(&mut self, delta: f64) {
        let stepped = clamp_fraction(self.percentage_of_word + delta);
        // Snap to two decimals so repeated steps don't drift
        self.percentage_of_word = (stepped * 100.0).round() / 100.0;
    }

    /// Toggle emphasis on/off
    pub fn toggle_enabled(&mut self) {
        self.enabled = !self.enabled;
    }
}

/// Read a fraction from an integer or float, clamped to `[0, 1]`
fn parse_fraction(value: &toml::Value) -> Option<f64> {
    let raw = match value {
        toml::Value::Float(f) => *f,
        toml::Value::Integer(n) => *n as f64,
        _ => return None,
    };
    Some(clamp_fraction(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let contents = r#"
# Settings
[bionic-reading]
percentage-of-word = 0.3
enabled = false
excluded-keywords = ["fn", "impl"]
        "#;

        let config = Config::from_toml_str(contents).unwrap();
        assert_eq!(config.percentage_of_word, 0.3);
        assert!(!config.enabled);
        assert_eq!(
            config.excluded_keywords,
            Some(vec!["fn".to_string(), "impl".to_string()])
        );
    }

    #[test]
    fn test_missing_table_uses_defaults() {
        let config = Config::from_toml_str("[other]\nenabled = false\n").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_bad_values_fall_back() {
        let contents = r#"
[bionic-reading]
percentage-of-word = "lots"
enabled = "yes"
        "#;
        let config = Config::from_toml_str(contents).unwrap();
        assert_eq!(config.percentage_of_word, DEFAULT_EMPHASIS_FRACTION);
        assert!(config.enabled);
    }

    #[test]
    fn test_fraction_is_clamped() {
        let high = Config::from_toml_str("[bionic-reading]\npercentage-of-word = 2.5\n").unwrap();
        assert_eq!(high.percentage_of_word, 1.0);
        let int = Config::from_toml_str("[bionic-reading]\npercentage-of-word = 0\n").unwrap();
        assert_eq!(int.percentage_of_word, 0.0);
        let low = Config::from_toml_str("[bionic-reading]\npercentage-of-word = -0.2\n").unwrap();
        assert_eq!(low.percentage_of_word, 0.0);
    }

    #[test]
    fn test_syntax_error_is_reported() {
        assert!(Config::from_toml_str("[bionic-reading\nenabled = ").is_err());
    }

    #[test]
    fn test_non_string_keywords_ignored() {
        let config =
            Config::from_toml_str("[bionic-reading]\nexcluded-keywords = [\"let\", 3, true]\n")
                .unwrap();
        assert_eq!(config.keyword_filter().len(), 1);
        assert!(config.keyword_filter().is_keyword("let"));
    }

    #[test]
    fn test_default_keyword_filter() {
        let config = Config::default();
        assert!(config.keyword_filter().is_keyword("function"));
    }

    #[test]
    fn test_adjust_fraction() {
        let mut config = Config::default();
        config.adjust_fraction(0.1);
        assert_eq!(config.percentage_of_word, 0.6);
        for _ in 0..10 {
            config.adjust_fraction(0.1);
        }
        assert_eq!(config.percentage_of_word, 1.0);
        config.adjust_fraction(-0.3);
        assert_eq!(config.percentage_of_word, 0.7);
    }

    #[test]
    fn test_configuration() {
        let mut config = Config::default();
        config.toggle_enabled();
        let engine_config = config.configuration();
        assert!(!engine_config.enabled);
        assert_eq!(engine_config.emphasis_fraction, 0.5);
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("bionic-reading-does-not-exist.toml");
        assert_eq!(Config::load_or_default(&path), Config::default());
    }
}
