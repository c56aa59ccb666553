//! Default keybindings and keymap layering

use std::path::Path;

use super::binding::Keybinding;
use super::command::Command;
use super::config::{load_keymap_file, parse_keymap_yaml};
use super::context::Condition;
use super::types::{Keystroke, Modifiers};

const DEFAULT_KEYMAP_YAML: &str = include_str!("../../keymap.yaml");

/// The embedded default keymap source
pub fn get_default_keymap_yaml() -> &'static str {
    DEFAULT_KEYMAP_YAML
}

/// Load and merge keymaps, each layer overriding the previous:
///
/// 1. Embedded default keymap
/// 2. `keymap.yaml` in the current directory
/// 3. `~/.config/lilac/keymap.yaml`
///
/// A binding with `command: Unbound` removes matching bindings below it.
pub fn load_default_keymap() -> Vec<Keybinding> {
    let mut bindings = match parse_keymap_yaml(DEFAULT_KEYMAP_YAML) {
        Ok(b) => {
            tracing::debug!("Loaded embedded default keymap ({} bindings)", b.len());
            b
        }
        Err(e) => {
            tracing::warn!("Failed to parse embedded keymap: {}, using hardcoded defaults", e);
            default_bindings()
        }
    };

    let local = Path::new("keymap.yaml");
    if local.exists() {
        bindings = merge_layer(bindings, local);
    }

    if let Some(user_path) = crate::config_paths::keymap_file() {
        if user_path.exists() {
            bindings = merge_layer(bindings, &user_path);
        }
    }

    bindings
}

/// Defaults plus an explicit keymap file on top
pub fn load_keymap_with(path: &Path) -> Vec<Keybinding> {
    merge_layer(load_default_keymap(), path)
}

fn merge_layer(base: Vec<Keybinding>, path: &Path) -> Vec<Keybinding> {
    match load_keymap_file(path) {
        Ok(layer) => {
            tracing::info!("Merging keymap from {} ({} bindings)", path.display(), layer.len());
            merge_bindings(base, layer)
        }
        Err(e) => {
            tracing::warn!("Failed to load keymap from {}: {}", path.display(), e);
            base
        }
    }
}

/// Merge `user` into `base`:
/// - `Unbound` removes every base binding on that keystroke
/// - same keystroke and conditions replaces the base binding
/// - anything else is appended
pub fn merge_bindings(base: Vec<Keybinding>, user: Vec<Keybinding>) -> Vec<Keybinding> {
    let mut result = base;

    for user_binding in user {
        if user_binding.command == Command::Unbound {
            result.retain(|b| b.keystroke != user_binding.keystroke);
            continue;
        }

        match result
            .iter()
            .position(|b| b.keystroke == user_binding.keystroke && b.when == user_binding.when)
        {
            Some(idx) => result[idx] = user_binding,
            None => result.push(user_binding),
        }
    }

    result
}

/// Hardcoded copy of the embedded keymap, used if it fails to parse
pub fn default_bindings() -> Vec<Keybinding> {
    let toolbar = |c: char, command: Command| {
        Keybinding::new(Keystroke::cmd(c), command).when_single(Condition::ToolbarEnabled)
    };

    vec![
        Keybinding::new(Keystroke::cmd('z'), Command::Undo),
        Keybinding::new(Keystroke::cmd('y'), Command::Redo),
        Keybinding::new(
            Keystroke::char_with_mods('z', Modifiers::cmd() | Modifiers::SHIFT),
            Command::Redo,
        ),
        toolbar('b', Command::Bold),
        toolbar('i', Command::Italic),
        toolbar('u', Command::Underline),
        toolbar('k', Command::InsertLink),
    ]
}
