//! Keyboard shortcuts
//!
//! A data-driven keymap for the editor's fixed keyboard surface:
//! - Maps keystrokes to [`Command`]s
//! - Uses Cmd on macOS and Ctrl elsewhere for `cmd` bindings
//! - Supports conditional bindings (`when: [toolbar_enabled]`)
//! - Loads and merges YAML keymaps
//!
//! ```text
//! KeyEvent → Keystroke → Keymap::lookup_with_context() → Command
//! ```
//!
//! Plugin shortcuts are matched against the raw [`KeyEvent`] by the editor
//! before the keymap is consulted.

mod binding;
mod command;
mod config;
mod context;
mod defaults;
mod event;
#[allow(clippy::module_inception)]
mod keymap;
mod types;

pub use binding::Keybinding;
pub use command::Command;
pub use config::{load_keymap_file, parse_key_string, parse_keymap_yaml, KeymapError};
pub use context::{Condition, KeyContext};
pub use defaults::{
    default_bindings, get_default_keymap_yaml, load_default_keymap, load_keymap_with,
    merge_bindings,
};
pub use event::KeyEvent;
pub use keymap::Keymap;
pub use types::{KeyCode, Keystroke, Modifiers};
