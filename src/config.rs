//! Editor configuration
//!
//! Read from `~/.config/lilac/config.yaml`. Every field is optional in the
//! file; missing fields take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::format::{default_tools, ToolbarTool};
use crate::history::DEFAULT_MAX_HISTORY_SIZE;

pub const DEFAULT_PLACEHOLDER: &str = "Start writing...";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    /// Follow the host's color scheme
    Auto,
}

impl Theme {
    pub fn name(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Auto => "auto",
        }
    }
}

/// How `content` is interpreted when rendered into the editable root
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentMode {
    /// Content is the text content of the root
    #[default]
    PlainText,
    /// Content is the inner markup of the root
    Markup,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolbarPosition {
    #[default]
    Top,
    Bottom,
    Floating,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolbarConfig {
    pub show: bool,
    pub tools: Vec<ToolbarTool>,
    pub position: ToolbarPosition,
}

impl Default for ToolbarConfig {
    fn default() -> Self {
        Self {
            show: true,
            tools: default_tools(),
            position: ToolbarPosition::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub placeholder: String,
    pub read_only: bool,
    pub auto_focus: bool,
    /// Maximum content length in characters; input past it is reverted
    pub max_length: Option<usize>,
    pub theme: Theme,
    /// Extra CSS class on the editor container
    pub class_name: Option<String>,
    pub content_mode: ContentMode,
    pub max_history_size: usize,
    pub toolbar: ToolbarConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            read_only: false,
            auto_focus: false,
            max_length: None,
            theme: Theme::default(),
            class_name: None,
            content_mode: ContentMode::default(),
            max_history_size: DEFAULT_MAX_HISTORY_SIZE,
            toolbar: ToolbarConfig::default(),
        }
    }
}

impl EditorConfig {
    /// Load config from the user config directory, or defaults if absent
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`; missing or invalid files give defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!("Config file not found at {}, using defaults", path.display());
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
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

    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Save to the user config directory
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.placeholder, "Start writing...");
        assert_eq!(config.max_history_size, 50);
        assert!(config.toolbar.show);
        assert_eq!(config.toolbar.tools, default_tools());
        assert_eq!(config.theme, Theme::Light);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config = EditorConfig::from_yaml(
            "theme: dark\nmax_length: 140\ncontent_mode: markup\ntoolbar:\n  tools: [bold, separator, link]\n  position: floating\n",
        )
        .unwrap();

        assert_eq!(config.theme, Theme::Dark);
        assert_eq!(config.max_length, Some(140));
        assert_eq!(config.content_mode, ContentMode::Markup);
        assert_eq!(
            config.toolbar.tools,
            vec![ToolbarTool::Bold, ToolbarTool::Separator, ToolbarTool::Link]
        );
        assert_eq!(config.toolbar.position, ToolbarPosition::Floating);
        assert!(config.toolbar.show);
        assert_eq!(config.placeholder, DEFAULT_PLACEHOLDER);
    }

    #[test]
    fn test_unknown_tool_is_an_error() {
        assert!(EditorConfig::from_yaml("toolbar:\n  tools: [sparkles]\n").is_err());
    }
}
