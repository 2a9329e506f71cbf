//! User settings
//!
//! Stored as TOML in the platform config directory. A missing or unreadable
//! file means defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

/// Default file recording the last displayed slide
const DEFAULT_PROGRESS_FILE: &str = ".current_slide";

/// Presenter settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Show the title bar
    pub show_header: bool,
    /// Show the key hint bar
    pub show_footer: bool,
    /// Editor used when `$EDITOR` is not set
    pub editor: Option<String>,
    /// File the current slide index is written to, relative to the working directory
    pub progress_file: PathBuf,
    /// Write logs to this file
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_header: true,
            show_footer: true,
            editor: None,
            progress_file: PathBuf::from(DEFAULT_PROGRESS_FILE),
            log_file: None,
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("termdeck").join("settings.toml"))
    }

    /// Load settings from disk
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| std::fs::read_to_string(path).ok())
            .map(|content| Self::parse(&content))
            .unwrap_or_default()
    }

    /// Parse settings, falling back to defaults on invalid TOML
    pub fn parse(content: &str) -> Self {
        toml::from_str(content).unwrap_or_else(|e| {
            warn!(error = %e, "ignoring invalid settings file");
            Self::default()
        })
    }

    /// Editor command: `$EDITOR`, then the configured editor, then `vi`
    pub fn editor_command(&self) -> String {
        std::env::var("EDITOR")
            .ok()
            .filter(|e| !e.trim().is_empty())
            .or_else(|| self.editor.clone())
            .unwrap_or_else(|| "vi".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(settings.show_header);
        assert!(settings.show_footer);
        assert_eq!(settings.progress_file, PathBuf::from(".current_slide"));
    }

    #[test]
    fn test_partial_settings_keep_defaults() {
        let settings = Settings::parse("show_footer = false\neditor = \"nano\"\n");
        assert!(!settings.show_footer);
        assert!(settings.show_header);
        assert_eq!(settings.editor.as_deref(), Some("nano"));
    }

    #[test]
    fn test_invalid_settings_fall_back() {
        assert_eq!(Settings::parse("show_footer = \"maybe\""), Settings::default());
    }

    #[test]
    fn test_settings_serialization() {
        let settings = Settings {
            log_file: Some(PathBuf::from("/tmp/termdeck.log")),
            ..Settings::default()
        };
        let toml_str = toml::to_string_pretty(&settings).expect("Failed to serialize");
        let parsed: Settings = toml::from_str(&toml_str).expect("Failed to deserialize");
        assert_eq!(settings, parsed);
    }
}
