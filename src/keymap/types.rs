//! Keystrokes: a key plus the modifiers held with it

use std::fmt;

/// Held modifier keys, packed into one byte
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

const CTRL_BIT: u8 = 1;
const SHIFT_BIT: u8 = 1 << 1;
const ALT_BIT: u8 = 1 << 2;
const META_BIT: u8 = 1 << 3;

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CTRL: Modifiers = Modifiers(CTRL_BIT);
    pub const SHIFT: Modifiers = Modifiers(SHIFT_BIT);
    pub const ALT: Modifiers = Modifiers(ALT_BIT);
    /// Cmd on macOS, the Windows/Super key elsewhere
    pub const META: Modifiers = Modifiers(META_BIT);

    pub const fn new(ctrl: bool, shift: bool, alt: bool, meta: bool) -> Self {
        Modifiers(
            (ctrl as u8) * CTRL_BIT
                | (shift as u8) * SHIFT_BIT
                | (alt as u8) * ALT_BIT
                | (meta as u8) * META_BIT,
        )
    }

    #[inline]
    pub const fn ctrl(self) -> bool {
        self.0 & CTRL_BIT != 0
    }

    #[inline]
    pub const fn shift(self) -> bool {
        self.0 & SHIFT_BIT != 0
    }

    #[inline]
    pub const fn alt(self) -> bool {
        self.0 & ALT_BIT != 0
    }

    #[inline]
    pub const fn meta(self) -> bool {
        self.0 & META_BIT != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn union(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }

    #[inline]
    pub const fn contains(self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0
    }

    /// The same modifiers with Ctrl and Meta exchanged, when exactly one
    /// of the two is held
    pub const fn swap_ctrl_meta(self) -> Option<Modifiers> {
        if self.ctrl() == self.meta() {
            return None;
        }
        Some(Modifiers(self.0 ^ (CTRL_BIT | META_BIT)))
    }

    /// The platform "command" modifier: Cmd on macOS, Ctrl elsewhere
    pub fn cmd() -> Modifiers {
        if cfg!(target_os = "macos") {
            Modifiers::META
        } else {
            Modifiers::CTRL
        }
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (self.ctrl(), "Ctrl"),
            (self.shift(), "Shift"),
            (self.alt(), if cfg!(target_os = "macos") { "Option" } else { "Alt" }),
            (self.meta(), if cfg!(target_os = "macos") { "Cmd" } else { "Win" }),
        ];
        let held: Vec<&str> = names
            .iter()
            .filter(|(on, _)| *on)
            .map(|(_, name)| *name)
            .collect();
        write!(f, "{}", held.join("+"))
    }
}

/// Logical key, independent of modifiers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Printable key, stored lowercase
    Char(char),
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Space,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    /// F1-F24
    F(u8),
}

impl KeyCode {
    /// Parse a key name as produced by a browser `KeyboardEvent.key`
    /// (`"b"`, `"Enter"`, `"ArrowUp"`, `"F5"`, `" "`), case-insensitively
    pub fn from_key_name(name: &str) -> Option<KeyCode> {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Some(if c == ' ' {
                KeyCode::Space
            } else {
                KeyCode::Char(c.to_ascii_lowercase())
            });
        }

        let lower = name.to_ascii_lowercase();
        let key = match lower.as_str() {
            "enter" | "return" => KeyCode::Enter,
            "escape" | "esc" => KeyCode::Escape,
            "tab" => KeyCode::Tab,
            "backspace" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "space" | "spacebar" => KeyCode::Space,
            "up" | "arrowup" => KeyCode::Up,
            "down" | "arrowdown" => KeyCode::Down,
            "left" | "arrowleft" => KeyCode::Left,
            "right" | "arrowright" => KeyCode::Right,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" => KeyCode::PageUp,
            "pagedown" => KeyCode::PageDown,
            f if f.starts_with('f') => {
                let n: u8 = f[1..].parse().ok()?;
                if !(1..=24).contains(&n) {
                    return None;
                }
                KeyCode::F(n)
            }
            _ => return None,
        };
        Some(key)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCode::Char(c) => write!(f, "{}", c.to_uppercase()),
            KeyCode::Up => write!(f, "↑"),
            KeyCode::Down => write!(f, "↓"),
            KeyCode::Left => write!(f, "←"),
            KeyCode::Right => write!(f, "→"),
            KeyCode::F(n) => write!(f, "F{}", n),
            other => write!(f, "{:?}", other),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Keystroke {
    pub key: KeyCode,
    pub mods: Modifiers,
}

impl Keystroke {
    pub const fn new(key: KeyCode, mods: Modifiers) -> Self {
        Self { key, mods }
    }

    /// A character key with modifiers; the character is lowercased
    pub fn char_with_mods(c: char, mods: Modifiers) -> Self {
        Self {
            key: KeyCode::Char(c.to_ascii_lowercase()),
            mods,
        }
    }

    /// The platform command modifier plus `c` (Cmd+B on macOS, Ctrl+B elsewhere)
    pub fn cmd(c: char) -> Self {
        Self::char_with_mods(c, Modifiers::cmd())
    }

    /// Human-readable form for tooltips, e.g. `Ctrl+Shift+Z` or `⇧⌘Z`
    pub fn display_string(&self) -> String {
        let mac = cfg!(target_os = "macos");
        let mut out = String::new();
        if self.mods.ctrl() {
            out.push_str(if mac { "⌃" } else { "Ctrl+" });
        }
        if self.mods.alt() {
            out.push_str(if mac { "⌥" } else { "Alt+" });
        }
        if self.mods.shift() {
            out.push_str(if mac { "⇧" } else { "Shift+" });
        }
        if self.mods.meta() {
            out.push_str(if mac { "⌘" } else { "Win+" });
        }
        out.push_str(&self.key.to_string());
        out
    }
}

impl fmt::Display for Keystroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mods.is_empty() {
            write!(f, "{}", self.key)
        } else {
            write!(f, "{}+{}", self.mods, self.key)
        }
    }
}
