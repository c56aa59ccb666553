//! Command-line interface for the headless editor
//!
//! The binary replays an edit script against an [`Editor`]:
//! - one command per line, `#` starts a comment
//! - script read from a file, or stdin when no path is given
//!
//! Script commands:
//!
//! ```text
//! type <text>            type at the selection (end of content if none)
//! load <text>            replace the content and clear undo history
//! select <start> <end>   select char offsets
//! deselect               clear the selection
//! key <keys>             key press, e.g. `cmd+b`, `ctrl+shift+t`
//! tool <name> [value]    apply a toolbar tool, e.g. `tool link https://x.y`
//! button <id>            click a plugin toolbar button
//! menu <id>              click a plugin context-menu item
//! undo | redo
//! readonly on|off
//! flush                  run deferred tasks
//! print                  current content
//! export                 content through plugin transformers
//! html                   markup of the editable root
//! stats                  state summary as JSON
//! toolbar                toolbar view model as JSON
//! panels                 rendered plugin panels as JSON
//! ```

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context as _};
use clap::Parser;
use serde::Serialize;

use lilac::format::ToolbarTool;
use lilac::keymap::{load_default_keymap, load_keymap_with, KeyEvent, Keybinding};
use lilac::plugin::builtin::{builtin_plugin, BUILTIN_PLUGINS};
use lilac::plugin::EditorPlugin;
use lilac::{ContentMode, Editor, EditorConfig, SelectionRange};

/// Replay edit scripts against the Lilac editor core
#[derive(Parser, Debug)]
#[command(name = "lilac", version, about = "Headless rich-text editor core")]
pub struct CliArgs {
    /// Script to replay; reads stdin when omitted
    #[arg(value_name = "SCRIPT")]
    pub script: Option<PathBuf>,

    /// Config file instead of ~/.config/lilac/config.yaml
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Keymap file layered over the defaults
    #[arg(short, long, value_name = "FILE")]
    pub keymap: Option<PathBuf>,

    /// Treat content as markup instead of plain text
    #[arg(long)]
    pub markup: bool,

    /// Start read-only
    #[arg(long)]
    pub read_only: bool,

    /// Built-in plugins to install (word-count, table-inserter, emoji-picker)
    #[arg(short, long = "plugin", value_name = "NAME")]
    pub plugins: Vec<String>,

    /// Initial content
    #[arg(long, value_name = "TEXT", default_value = "")]
    pub initial: String,
}

/// Everything needed to build the editor, resolved from CLI arguments
pub struct StartupConfig {
    pub editor: EditorConfig,
    pub keymap: Vec<Keybinding>,
    pub plugins: Vec<EditorPlugin>,
    pub initial_content: String,
    pub script: Option<PathBuf>,
}

impl CliArgs {
    /// Load config and keymap files and resolve plugin names
    pub fn into_config(self) -> Result<StartupConfig, String> {
        let mut editor = match &self.config {
            Some(path) => EditorConfig::load_from(path),
            None => EditorConfig::load(),
        };
        if self.markup {
            editor.content_mode = ContentMode::Markup;
        }
        if self.read_only {
            editor.read_only = true;
        }

        let keymap = match &self.keymap {
            Some(path) => load_keymap_with(path),
            None => load_default_keymap(),
        };

        let plugins = self
            .plugins
            .iter()
            .map(|name| {
                builtin_plugin(name).ok_or_else(|| {
                    format!(
                        "Unknown plugin '{}' (available: {})",
                        name,
                        BUILTIN_PLUGINS.join(", ")
                    )
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(StartupConfig {
            editor,
            keymap,
            plugins,
            initial_content: self.initial,
            script: self.script,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    Type(String),
    Load(String),
    Select(usize, usize),
    Deselect,
    Key(KeyEvent),
    Tool(ToolbarTool, Option<String>),
    Button(String),
    Menu(String),
    Undo,
    Redo,
    ReadOnly(bool),
    Flush,
    Print,
    Export,
    Html,
    Stats,
    Toolbar,
    Panels,
}

/// Parse one script line; blank lines and comments give `None`
pub fn parse_line(line: &str) -> anyhow::Result<Option<ScriptCommand>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };

    let command = match name {
        "type" => ScriptCommand::Type(unescape(rest)),
        "load" => ScriptCommand::Load(unescape(rest)),
        "select" => {
            let mut parts = rest.split_whitespace();
            let (Some(a), Some(b), None) = (parts.next(), parts.next(), parts.next()) else {
                bail!("select takes two offsets");
            };
            ScriptCommand::Select(
                a.parse().with_context(|| format!("Bad offset '{}'", a))?,
                b.parse().with_context(|| format!("Bad offset '{}'", b))?,
            )
        }
        "deselect" => ScriptCommand::Deselect,
        "key" => ScriptCommand::Key(rest.parse()?),
        "tool" => {
            let (tool, value) = match rest.split_once(char::is_whitespace) {
                Some((tool, value)) => (tool, Some(value.trim().to_string())),
                None => (rest, None),
            };
            let tool: ToolbarTool = tool
                .parse()
                .map_err(|_| anyhow::anyhow!("Unknown tool '{}'", tool))?;
            ScriptCommand::Tool(tool, value)
        }
        "button" if !rest.is_empty() => ScriptCommand::Button(rest.to_string()),
        "menu" if !rest.is_empty() => ScriptCommand::Menu(rest.to_string()),
        "undo" => ScriptCommand::Undo,
        "redo" => ScriptCommand::Redo,
        "readonly" => match rest {
            "on" | "true" => ScriptCommand::ReadOnly(true),
            "off" | "false" => ScriptCommand::ReadOnly(false),
            other => bail!("readonly takes on|off, got '{}'", other),
        },
        "flush" => ScriptCommand::Flush,
        "print" => ScriptCommand::Print,
        "export" => ScriptCommand::Export,
        "html" => ScriptCommand::Html,
        "stats" => ScriptCommand::Stats,
        "toolbar" => ScriptCommand::Toolbar,
        "panels" => ScriptCommand::Panels,
        other => bail!("Unknown command '{}'", other),
    };
    Ok(Some(command))
}

/// Parse a whole script, reporting the first bad line by number
pub fn parse_script(source: &str) -> anyhow::Result<Vec<ScriptCommand>> {
    let mut commands = Vec::new();
    for (idx, line) in source.lines().enumerate() {
        let parsed = parse_line(line).with_context(|| format!("line {}", idx + 1))?;
        commands.extend(parsed);
    }
    Ok(commands)
}

/// `\n` and `\t` escapes, so typed text can span lines
fn unescape(text: &str) -> String {
    text.replace("\\n", "\n").replace("\\t", "\t")
}

#[derive(Serialize)]
struct Stats<'a> {
    content: &'a str,
    selection: Option<SelectionRange>,
    chars: usize,
    counter: Option<String>,
    is_empty: bool,
    read_only: bool,
    can_undo: bool,
    can_redo: bool,
    active: Vec<&'static str>,
    classes: Vec<String>,
    plugins: Vec<&'a str>,
}

/// Run one command, writing any output to `out`.
///
/// Editor-level failures are reported through the editor's error callback
/// and do not stop the script; only output errors are returned.
pub fn run_command(
    editor: &mut Editor,
    command: &ScriptCommand,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    tracing::debug!(?command, "script");
    match command {
        ScriptCommand::Type(text) => {
            let _ = editor.type_text(text);
        }
        ScriptCommand::Load(text) => editor.load_content(text),
        ScriptCommand::Select(start, end) => {
            editor.set_selection(Some(SelectionRange::new(*start, *end)));
        }
        ScriptCommand::Deselect => editor.set_selection(None),
        ScriptCommand::Key(event) => {
            if !editor.handle_key_down(event) {
                tracing::debug!(key = %event, "key not handled");
            }
        }
        ScriptCommand::Tool(tool, value) => {
            let _ = editor.apply_tool(*tool, value.as_deref());
        }
        ScriptCommand::Button(id) => {
            editor.click_toolbar_button(id);
        }
        ScriptCommand::Menu(id) => {
            editor.click_context_menu_item(id);
        }
        ScriptCommand::Undo => {
            editor.undo();
        }
        ScriptCommand::Redo => {
            editor.redo();
        }
        ScriptCommand::ReadOnly(on) => editor.set_read_only(*on),
        ScriptCommand::Flush => {
            editor.flush_deferred();
        }
        ScriptCommand::Print => writeln!(out, "{}", editor.content())?,
        ScriptCommand::Export => {
            let exported = editor.export_content();
            writeln!(out, "{}", exported)?;
        }
        ScriptCommand::Html => {
            let html = editor
                .root()
                .map(|root| editor.dom().inner_html(root))
                .unwrap_or_default();
            writeln!(out, "{}", html)?;
        }
        ScriptCommand::Stats => {
            let stats = Stats {
                content: editor.content(),
                selection: editor.selection(),
                chars: editor.char_count(),
                counter: editor.char_counter(),
                is_empty: editor.is_empty(),
                read_only: editor.is_read_only(),
                can_undo: editor.can_undo(),
                can_redo: editor.can_redo(),
                active: editor.active_formats().iter().map(|t| t.name()).collect(),
                classes: editor.class_names(),
                plugins: editor
                    .plugins()
                    .all_plugins()
                    .iter()
                    .map(|p| p.id.as_str())
                    .collect(),
            };
            writeln!(out, "{}", serde_json::to_string(&stats)?)?;
        }
        ScriptCommand::Toolbar => {
            writeln!(out, "{}", serde_json::to_string(&editor.toolbar())?)?;
        }
        ScriptCommand::Panels => {
            writeln!(out, "{}", serde_json::to_string(&editor.panels())?)?;
        }
    }
    Ok(())
}
