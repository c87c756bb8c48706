//! Editor configuration persistence
//!
//! Stores user preferences in `~/.config/codeblock/config.yaml`

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::update::NewlineOptions;

/// Code-block editing preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Language for blocks created without one (e.g., "rust", "js")
    #[serde(default = "default_language")]
    pub default_language: Option<String>,

    /// New lines start with the previous line's indentation
    #[serde(default = "default_true")]
    pub preserve_indent_on_newline: bool,

    /// Two newlines on empty trailing lines leave the block
    #[serde(default = "default_true")]
    pub exit_on_double_newline: bool,

    /// Number shown for the first line in the gutter
    #[serde(default = "default_gutter_start")]
    pub gutter_start: usize,
}

fn default_language() -> Option<String> {
    Some("javascript".to_string())
}

fn default_true() -> bool {
    true
}

fn default_gutter_start() -> usize {
    1
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            preserve_indent_on_newline: default_true(),
            exit_on_double_newline: default_true(),
            gutter_start: default_gutter_start(),
        }
    }
}

impl EditorConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> anyhow::Result<()> {
        let path = crate::config_paths::config_file().context("No config directory available")?;
        self.save_to(&path)
    }

    /// Save config to `path`, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory {}", parent.display())
            })?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn newline_options(&self) -> NewlineOptions {
        NewlineOptions {
            preserve_indent: self.preserve_indent_on_newline,
            exit_on_double_blank: self.exit_on_double_newline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: EditorConfig = serde_yaml::from_str("gutter_start: 0\n").unwrap();
        assert_eq!(config.gutter_start, 0);
        assert_eq!(config.default_language.as_deref(), Some("javascript"));
        assert!(config.preserve_indent_on_newline);
        assert!(config.exit_on_double_newline);
    }

    #[test]
    fn test_newline_options() {
        let config = EditorConfig {
            exit_on_double_newline: false,
            ..EditorConfig::default()
        };
        let options = config.newline_options();
        assert!(options.preserve_indent);
        assert!(!options.exit_on_double_blank);
    }
}
