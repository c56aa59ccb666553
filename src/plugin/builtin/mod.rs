//! Plugins that ship with the editor

mod emoji;
mod table;
mod word_count;

pub use emoji::{emoji_plugin, EmojiCategory, EmojiPicker, EMOJI_CATEGORIES};
pub use table::{table_html, table_plugin, TableOptions};
pub use word_count::{word_count_plugin, DocumentStats};

use super::EditorPlugin;

/// Names accepted by [`builtin_plugin`]
pub const BUILTIN_PLUGINS: &[&str] = &["word-count", "table-inserter", "emoji-picker"];

/// Look up a built-in plugin by id, with default options
pub fn builtin_plugin(name: &str) -> Option<EditorPlugin> {
    match name {
        "word-count" => Some(word_count_plugin()),
        "table-inserter" => Some(table_plugin(TableOptions::default())),
        "emoji-picker" => Some(emoji_plugin(EmojiPicker::default())),
        _ => None,
    }
}
