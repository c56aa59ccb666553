//! Browser-style key events and their conversion to keystrokes

use std::fmt;
use std::str::FromStr;

use super::config::KeymapError;
use super::types::{KeyCode, Keystroke, Modifiers};

/// A key-down event as the host reports it: the logical key name plus
/// one flag per modifier
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    /// Platform command modifier plus `key`
    pub fn cmd(key: impl Into<String>) -> Self {
        let event = Self::new(key);
        if cfg!(target_os = "macos") {
            event.with_meta()
        } else {
            event.with_ctrl()
        }
    }

    pub fn modifiers(&self) -> Modifiers {
        Modifiers::new(self.ctrl, self.shift, self.alt, self.meta)
    }

    /// The event as a keymap keystroke; `None` for keys the keymap can't name
    pub fn keystroke(&self) -> Option<Keystroke> {
        KeyCode::from_key_name(&self.key).map(|key| Keystroke::new(key, self.modifiers()))
    }

    /// Lowercase shortcut string such as `ctrl+b` or `cmd+shift+z`.
    ///
    /// Only events holding Ctrl or Meta form a shortcut.
    pub fn shortcut_string(&self) -> Option<String> {
        if !self.ctrl && !self.meta {
            return None;
        }
        let mut out = String::new();
        if self.meta {
            out.push_str("cmd+");
        }
        if self.ctrl {
            out.push_str("ctrl+");
        }
        if self.alt {
            out.push_str("alt+");
        }
        if self.shift {
            out.push_str("shift+");
        }
        out.push_str(&self.key.to_lowercase());
        Some(out)
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.keystroke() {
            Some(stroke) => write!(f, "{}", stroke),
            None => write!(f, "{}", self.key),
        }
    }
}

/// Parses `ctrl+shift+t`, `cmd+z` or a bare key name. `cmd` means the
/// platform command modifier.
impl FromStr for KeyEvent {
    type Err = KeymapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('+').map(str::trim).collect();
        let Some((key, mods)) = parts.split_last() else {
            return Err(KeymapError::InvalidKey(s.to_string()));
        };
        if key.is_empty() {
            return Err(KeymapError::InvalidKey(s.to_string()));
        }

        let mut event = KeyEvent::new(*key);
        for m in mods {
            event = match m.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => event.with_ctrl(),
                "shift" => event.with_shift(),
                "alt" | "option" => event.with_alt(),
                "meta" | "super" | "win" => event.with_meta(),
                "cmd" | "command" => {
                    let cmd = Modifiers::cmd();
                    if cmd.meta() {
                        event.with_meta()
                    } else {
                        event.with_ctrl()
                    }
                }
                _ => return Err(KeymapError::InvalidKey(format!("Unknown modifier: {}", m))),
            };
        }
        Ok(event)
    }
}
