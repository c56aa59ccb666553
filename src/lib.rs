//! Lilac - headless rich-text editor core
//!
//! A contenteditable-style editor without a browser: an arena document
//! ([`dom`]), an undoable state controller ([`state`]), a toolbar command
//! layer over a pluggable rich-text backend ([`format`]), a plugin system
//! with isolated hooks ([`plugin`]) and a configurable keymap ([`keymap`]).
//! [`Editor`] ties them together.

pub mod config;
pub mod config_paths;
pub mod dom;
pub mod editor;
pub mod error;
pub mod format;
pub mod history;
pub mod keymap;
pub mod offset;
pub mod plugin;
pub mod state;
pub mod tracing;
pub mod util;

// Re-export commonly used types
pub use config::{ContentMode, EditorConfig, Theme};
pub use editor::Editor;
pub use error::{EditorError, FormatError, HookFailure, PluginError};
pub use format::ToolbarTool;
pub use history::HistoryStore;
pub use plugin::{EditorContext, EditorPlugin, PluginManager};
pub use state::{EditorState, EditorStateController, SelectionRange};
