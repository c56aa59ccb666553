//! Commands reachable from the built-in keymap

use std::fmt;
use std::str::FromStr;

use crate::format::ToolbarTool;

/// Every action the fixed keyboard surface can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Undo,
    Redo,
    Bold,
    Italic,
    Underline,
    /// Ask the host for a URL and insert a link
    InsertLink,
    /// Removes an inherited binding when merging keymaps
    Unbound,
}

impl Command {
    /// The toolbar tool this command applies, for formatting commands
    pub fn tool(self) -> Option<ToolbarTool> {
        match self {
            Command::Bold => Some(ToolbarTool::Bold),
            Command::Italic => Some(ToolbarTool::Italic),
            Command::Underline => Some(ToolbarTool::Underline),
            Command::InsertLink => Some(ToolbarTool::Link),
            Command::Undo | Command::Redo | Command::Unbound => None,
        }
    }

    /// Whether running the command changes the document
    pub fn is_edit(self) -> bool {
        !matches!(self, Command::Unbound)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Command::Undo => "Undo",
            Command::Redo => "Redo",
            Command::Bold => "Bold",
            Command::Italic => "Italic",
            Command::Underline => "Underline",
            Command::InsertLink => "Insert Link",
            Command::Unbound => "Unbound",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Undo" => Ok(Command::Undo),
            "Redo" => Ok(Command::Redo),
            "Bold" => Ok(Command::Bold),
            "Italic" => Ok(Command::Italic),
            "Underline" => Ok(Command::Underline),
            "InsertLink" => Ok(Command::InsertLink),
            "Unbound" => Ok(Command::Unbound),
            _ => Err(format!("Unknown command: {}", s)),
        }
    }
}
