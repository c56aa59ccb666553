//! Error types reported through the editor's error channel
//!
//! Every failure in the editor is recoverable. Operations return these as
//! `Result`s (or collect them, for hook broadcasts) and the [`Editor`]
//! forwards them to the host's `on_error` callback in addition to logging.
//!
//! [`Editor`]: crate::editor::Editor

use std::fmt;

use crate::dom::HtmlError;
use crate::format::ToolbarTool;

/// A format tool could not be applied
#[derive(Debug)]
pub enum FormatError {
    /// The tool has no rich-text command (link, image, separator)
    NoCommand(ToolbarTool),
    /// The tool needs a selection range and there is none
    NoSelection(ToolbarTool),
    /// The backend rejected or failed the command
    Backend {
        tool: ToolbarTool,
        source: anyhow::Error,
    },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::NoCommand(tool) => write!(f, "Tool '{}' has no format command", tool),
            FormatError::NoSelection(tool) => write!(f, "Tool '{}' needs a selection", tool),
            FormatError::Backend { tool, source } => {
                write!(f, "Failed to execute format command for {}: {}", tool, source)
            }
        }
    }
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FormatError::Backend { source, .. } => Some(&**source),
            _ => None,
        }
    }
}

/// One plugin hook that returned an error or panicked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookFailure {
    pub plugin_id: String,
    pub hook: &'static str,
    pub message: String,
}

impl fmt::Display for HookFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Error executing hook {} for plugin {}: {}",
            self.hook, self.plugin_id, self.message
        )
    }
}

impl std::error::Error for HookFailure {}

/// Plugin registration failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginError {
    AlreadyInstalled(String),
    NotInstalled(String),
    /// The install or uninstall hook failed; registration still changed
    Hook(HookFailure),
}

impl fmt::Display for PluginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginError::AlreadyInstalled(id) => write!(f, "Plugin {} is already installed", id),
            PluginError::NotInstalled(id) => write!(f, "Plugin {} is not installed", id),
            PluginError::Hook(failure) => write!(f, "{}", failure),
        }
    }
}

impl std::error::Error for PluginError {}

impl From<HookFailure> for PluginError {
    fn from(failure: HookFailure) -> Self {
        PluginError::Hook(failure)
    }
}

/// Anything the editor reports through its error callback
#[derive(Debug)]
pub enum EditorError {
    Format(FormatError),
    /// A raw rich-text command requested by a plugin failed
    Command {
        command: String,
        source: anyhow::Error,
    },
    Plugin(PluginError),
    Hook(HookFailure),
    /// Imported markup could not be parsed; content was set as plain text
    Markup(HtmlError),
    /// Input was reverted because it exceeded the maximum length
    LengthExceeded { length: usize, max: usize },
    /// Input arrived while the editor is read-only and was reverted
    ReadOnly,
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorError::Format(e) => write!(f, "{}", e),
            EditorError::Command { command, source } => {
                write!(f, "Failed to execute command {}: {}", command, source)
            }
            EditorError::Plugin(e) => write!(f, "{}", e),
            EditorError::Hook(e) => write!(f, "{}", e),
            EditorError::Markup(e) => write!(f, "Invalid markup: {}", e),
            EditorError::LengthExceeded { length, max } => {
                write!(f, "Content length {} exceeds maximum of {}", length, max)
            }
            EditorError::ReadOnly => write!(f, "Editor is read-only"),
        }
    }
}

impl std::error::Error for EditorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EditorError::Format(e) => Some(e),
            EditorError::Command { source, .. } => Some(&**source),
            EditorError::Plugin(e) => Some(e),
            EditorError::Hook(e) => Some(e),
            EditorError::Markup(e) => Some(e),
            EditorError::LengthExceeded { .. } | EditorError::ReadOnly => None,
        }
    }
}

impl From<FormatError> for EditorError {
    fn from(e: FormatError) -> Self {
        EditorError::Format(e)
    }
}

impl From<PluginError> for EditorError {
    fn from(e: PluginError) -> Self {
        EditorError::Plugin(e)
    }
}

impl From<HookFailure> for EditorError {
    fn from(e: HookFailure) -> Self {
        EditorError::Hook(e)
    }
}

impl From<HtmlError> for EditorError {
    fn from(e: HtmlError) -> Self {
        EditorError::Markup(e)
    }
}
