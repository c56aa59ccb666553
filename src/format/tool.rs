//! Toolbar tools and their declarative command mapping

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named formatting action invocable from the toolbar or a shortcut
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ToolbarTool {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Heading1,
    Heading2,
    Heading3,
    Paragraph,
    BulletList,
    OrderedList,
    Blockquote,
    CodeBlock,
    Link,
    Image,
    Separator,
}

/// A rich-text mutation request: command name plus optional fixed value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatCommand {
    pub command: &'static str,
    pub value: Option<&'static str>,
}

impl FormatCommand {
    const fn toggle(command: &'static str) -> Self {
        Self {
            command,
            value: None,
        }
    }

    const fn block(value: &'static str) -> Self {
        Self {
            command: FORMAT_BLOCK,
            value: Some(value),
        }
    }

    /// Block-style commands are queried by value, toggles by state
    pub fn is_block(&self) -> bool {
        self.command == FORMAT_BLOCK
    }
}

/// Command name for block-level formatting
pub const FORMAT_BLOCK: &str = "formatBlock";

/// What a tool maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolAction {
    /// Issue this command
    Command(FormatCommand),
    /// No direct command; link and image are inserted by custom code
    Custom,
    /// Not a command at all
    None,
}

impl ToolbarTool {
    pub const ALL: [ToolbarTool; 15] = [
        ToolbarTool::Bold,
        ToolbarTool::Italic,
        ToolbarTool::Underline,
        ToolbarTool::Strikethrough,
        ToolbarTool::Heading1,
        ToolbarTool::Heading2,
        ToolbarTool::Heading3,
        ToolbarTool::Paragraph,
        ToolbarTool::BulletList,
        ToolbarTool::OrderedList,
        ToolbarTool::Blockquote,
        ToolbarTool::CodeBlock,
        ToolbarTool::Link,
        ToolbarTool::Image,
        ToolbarTool::Separator,
    ];

    pub fn action(self) -> ToolAction {
        use ToolbarTool::*;
        match self {
            Bold => ToolAction::Command(FormatCommand::toggle("bold")),
            Italic => ToolAction::Command(FormatCommand::toggle("italic")),
            Underline => ToolAction::Command(FormatCommand::toggle("underline")),
            Strikethrough => ToolAction::Command(FormatCommand::toggle("strikeThrough")),
            Heading1 => ToolAction::Command(FormatCommand::block("h1")),
            Heading2 => ToolAction::Command(FormatCommand::block("h2")),
            Heading3 => ToolAction::Command(FormatCommand::block("h3")),
            Paragraph => ToolAction::Command(FormatCommand::block("p")),
            BulletList => ToolAction::Command(FormatCommand::toggle("insertUnorderedList")),
            OrderedList => ToolAction::Command(FormatCommand::toggle("insertOrderedList")),
            Blockquote => ToolAction::Command(FormatCommand::block("blockquote")),
            CodeBlock => ToolAction::Command(FormatCommand::block("pre")),
            Link | Image => ToolAction::Custom,
            Separator => ToolAction::None,
        }
    }

    /// The mapped command, if the tool has one
    pub fn command(self) -> Option<FormatCommand> {
        match self.action() {
            ToolAction::Command(command) => Some(command),
            ToolAction::Custom | ToolAction::None => None,
        }
    }

    /// Name used in config files and the toolbar (`bulletList`, `heading1`, ...)
    pub fn name(self) -> &'static str {
        use ToolbarTool::*;
        match self {
            Bold => "bold",
            Italic => "italic",
            Underline => "underline",
            Strikethrough => "strikethrough",
            Heading1 => "heading1",
            Heading2 => "heading2",
            Heading3 => "heading3",
            Paragraph => "paragraph",
            BulletList => "bulletList",
            OrderedList => "orderedList",
            Blockquote => "blockquote",
            CodeBlock => "codeBlock",
            Link => "link",
            Image => "image",
            Separator => "separator",
        }
    }

    /// Button label / tooltip
    pub fn label(self) -> &'static str {
        use ToolbarTool::*;
        match self {
            Bold => "Bold (Ctrl+B)",
            Italic => "Italic (Ctrl+I)",
            Underline => "Underline (Ctrl+U)",
            Strikethrough => "Strikethrough",
            Heading1 => "Heading 1",
            Heading2 => "Heading 2",
            Heading3 => "Heading 3",
            Paragraph => "Paragraph",
            BulletList => "Bullet List",
            OrderedList => "Numbered List",
            Blockquote => "Quote",
            CodeBlock => "Code Block",
            Link => "Link (Ctrl+K)",
            Image => "Image",
            Separator => "Separator",
        }
    }

    /// Icon identifier for the host's icon set
    pub fn icon(self) -> &'static str {
        use ToolbarTool::*;
        match self {
            Bold => "bold",
            Italic => "italic",
            Underline => "underline",
            Strikethrough => "strikethrough",
            Heading1 => "heading-1",
            Heading2 => "heading-2",
            Heading3 => "heading-3",
            Paragraph => "type",
            BulletList => "list",
            OrderedList => "list-ordered",
            Blockquote => "quote",
            CodeBlock => "code",
            Link => "link",
            Image => "image",
            Separator => "minus",
        }
    }

    pub fn is_separator(self) -> bool {
        self == ToolbarTool::Separator
    }
}

impl fmt::Display for ToolbarTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToolbarTool {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolbarTool::ALL
            .into_iter()
            .find(|tool| tool.name().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

/// Toolbar layout used when the config does not list tools
pub fn default_tools() -> Vec<ToolbarTool> {
    use ToolbarTool::*;
    vec![
        Bold,
        Italic,
        Underline,
        Separator,
        Heading1,
        Heading2,
        Heading3,
        Paragraph,
        Separator,
        BulletList,
        OrderedList,
        Blockquote,
        Separator,
        Link,
        CodeBlock,
    ]
}

/// Tool bound to a shortcut string such as `ctrl+b` or `cmd+k`
pub fn tool_for_shortcut(shortcut: &str) -> Option<ToolbarTool> {
    match shortcut.to_ascii_lowercase().as_str() {
        "ctrl+b" | "cmd+b" => Some(ToolbarTool::Bold),
        "ctrl+i" | "cmd+i" => Some(ToolbarTool::Italic),
        "ctrl+u" | "cmd+u" => Some(ToolbarTool::Underline),
        "ctrl+k" | "cmd+k" => Some(ToolbarTool::Link),
        _ => None,
    }
}
