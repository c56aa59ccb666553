//! YAML keymap files
//!
//! ```yaml
//! bindings:
//!   - key: cmd+b
//!     command: Bold
//!     when: [toolbar_enabled]
//!   - key: ctrl+y
//!     command: Redo
//!     platform: windows
//! ```

use std::path::Path;

use serde::Deserialize;

use super::binding::Keybinding;
use super::command::Command;
use super::context::Condition;
use super::types::{KeyCode, Keystroke, Modifiers};

#[derive(Debug, Deserialize)]
pub struct KeymapConfig {
    pub bindings: Vec<BindingConfig>,
}

#[derive(Debug, Deserialize)]
pub struct BindingConfig {
    pub key: String,
    pub command: String,
    /// Only load on this platform (`macos`, `windows`, `linux`)
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub when: Option<Vec<String>>,
}

pub fn load_keymap_file(path: &Path) -> Result<Vec<Keybinding>, KeymapError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| KeymapError::IoError(format!("{}: {}", path.display(), e)))?;
    parse_keymap_yaml(&content)
}

pub fn parse_keymap_yaml(yaml: &str) -> Result<Vec<Keybinding>, KeymapError> {
    let config: KeymapConfig =
        serde_yaml::from_str(yaml).map_err(|e| KeymapError::ParseError(e.to_string()))?;

    let platform = current_platform();
    let mut bindings = Vec::with_capacity(config.bindings.len());

    for entry in config.bindings {
        if entry.platform.as_deref().is_some_and(|p| p != platform) {
            continue;
        }

        let keystroke = parse_key_string(&entry.key)?;
        let command: Command = entry
            .command
            .parse()
            .map_err(|_| KeymapError::InvalidCommand(entry.command.clone()))?;

        let mut binding = Keybinding::new(keystroke, command);
        if let Some(when) = &entry.when {
            let conditions = when
                .iter()
                .map(|c| parse_condition(c))
                .collect::<Result<Vec<_>, _>>()?;
            binding = binding.when(conditions);
        }
        bindings.push(binding);
    }

    Ok(bindings)
}

/// Parse `cmd+shift+z` style key strings. `cmd` is the platform command
/// modifier (Cmd on macOS, Ctrl elsewhere).
pub fn parse_key_string(key_str: &str) -> Result<Keystroke, KeymapError> {
    let mut mods = Modifiers::NONE;
    let mut key = None;

    for part in key_str.split('+') {
        let part = part.trim().to_lowercase();
        match part.as_str() {
            "cmd" | "command" => mods = mods | Modifiers::cmd(),
            "ctrl" | "control" => mods = mods | Modifiers::CTRL,
            "shift" => mods = mods | Modifiers::SHIFT,
            "alt" | "option" | "opt" => mods = mods | Modifiers::ALT,
            "meta" | "super" | "win" => mods = mods | Modifiers::META,
            _ => {
                if key.is_some() {
                    return Err(KeymapError::InvalidKey(format!(
                        "Multiple keys in binding: {}",
                        key_str
                    )));
                }
                key = Some(parse_key_code(&part)?);
            }
        }
    }

    let key = key
        .ok_or_else(|| KeymapError::InvalidKey(format!("No key found in binding: {}", key_str)))?;
    Ok(Keystroke::new(key, mods))
}

fn parse_key_code(key: &str) -> Result<KeyCode, KeymapError> {
    match key {
        "" => Err(KeymapError::InvalidKey("Empty key".to_string())),
        "pgup" => Ok(KeyCode::PageUp),
        "pgdn" | "pgdown" => Ok(KeyCode::PageDown),
        "back" => Ok(KeyCode::Backspace),
        _ => KeyCode::from_key_name(key)
            .ok_or_else(|| KeymapError::InvalidKey(format!("Unknown key: {}", key))),
    }
}

fn parse_condition(cond: &str) -> Result<Condition, KeymapError> {
    match cond.to_lowercase().as_str() {
        "toolbar_enabled" | "toolbar" => Ok(Condition::ToolbarEnabled),
        "editable" => Ok(Condition::Editable),
        "read_only" | "readonly" => Ok(Condition::ReadOnly),
        "has_selection" | "selection" => Ok(Condition::HasSelection),
        "no_selection" => Ok(Condition::NoSelection),
        _ => Err(KeymapError::InvalidCondition(cond.to_string())),
    }
}

fn current_platform() -> &'static str {
    if cfg!(target_os = "macos") {
        "macos"
    } else if cfg!(target_os = "windows") {
        "windows"
    } else {
        "linux"
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeymapError {
    IoError(String),
    ParseError(String),
    InvalidKey(String),
    InvalidCommand(String),
    InvalidCondition(String),
}

impl std::fmt::Display for KeymapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeymapError::IoError(e) => write!(f, "IO error: {}", e),
            KeymapError::ParseError(e) => write!(f, "Parse error: {}", e),
            KeymapError::InvalidKey(k) => write!(f, "Invalid key: {}", k),
            KeymapError::InvalidCommand(c) => write!(f, "Invalid command: {}", c),
            KeymapError::InvalidCondition(c) => write!(f, "Invalid condition: {}", c),
        }
    }
}

impl std::error::Error for KeymapError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_string() {
        let stroke = parse_key_string("ctrl+shift+z").unwrap();
        assert_eq!(stroke.key, KeyCode::Char('z'));
        assert!(stroke.mods.ctrl() && stroke.mods.shift());

        let stroke = parse_key_string("cmd+K").unwrap();
        assert_eq!(stroke, Keystroke::cmd('k'));

        assert_eq!(parse_key_string("alt+pgdn").unwrap().key, KeyCode::PageDown);
    }

    #[test]
    fn test_parse_key_string_errors() {
        assert!(matches!(parse_key_string("ctrl+a+b"), Err(KeymapError::InvalidKey(_))));
        assert!(matches!(parse_key_string("ctrl+shift"), Err(KeymapError::InvalidKey(_))));
        assert!(matches!(parse_key_string("ctrl+"), Err(KeymapError::InvalidKey(_))));
        assert!(matches!(parse_key_string("hyper"), Err(KeymapError::InvalidKey(_))));
    }

    #[test]
    fn test_parse_yaml_with_conditions() {
        let yaml = r#"
bindings:
  - key: cmd+b
    command: Bold
    when: [toolbar_enabled, editable]
  - key: cmd+z
    command: Undo
"#;
        let bindings = parse_keymap_yaml(yaml).unwrap();
        assert_eq!(bindings.len(), 2);
        assert_eq!(
            bindings[0].when,
            Some(vec![Condition::ToolbarEnabled, Condition::Editable])
        );
        assert_eq!(bindings[1].command, Command::Undo);
        assert!(bindings[1].when.is_none());
    }

    #[test]
    fn test_platform_filter() {
        let yaml = r#"
bindings:
  - key: ctrl+y
    command: Redo
    platform: not-a-platform
"#;
        assert!(parse_keymap_yaml(yaml).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_entries() {
        let bad_command = "bindings:\n  - key: cmd+s\n    command: SaveFile\n";
        assert_eq!(
            parse_keymap_yaml(bad_command),
            Err(KeymapError::InvalidCommand("SaveFile".to_string()))
        );

        let bad_condition = "bindings:\n  - key: cmd+b\n    command: Bold\n    when: [modal]\n";
        assert_eq!(
            parse_keymap_yaml(bad_condition),
            Err(KeymapError::InvalidCondition("modal".to_string()))
        );

        assert!(matches!(
            parse_keymap_yaml("bindings: 3"),
            Err(KeymapError::ParseError(_))
        ));
    }
}
