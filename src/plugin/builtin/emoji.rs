//! `emoji-picker`: category grid panel, toolbar button and Ctrl+Shift+E
//!
//! The picker itself is host UI. The host moves the shared [`EmojiPicker`]
//! (active category, picked emoji) and the button or shortcut inserts the
//! picked emoji at the caret.

use std::cell::RefCell;
use std::rc::Rc;

use crate::plugin::{
    ActionFn, EditorPanel, EditorPlugin, KeyboardShortcut, PanelPosition, ToolbarButton,
};
use crate::util::escape_html;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmojiCategory {
    pub key: &'static str,
    pub name: &'static str,
    pub emojis: &'static [&'static str],
}

pub static EMOJI_CATEGORIES: [EmojiCategory; 5] = [
    EmojiCategory {
        key: "smileys",
        name: "Smileys & People",
        emojis: SMILEYS,
    },
    EmojiCategory {
        key: "nature",
        name: "Animals & Nature",
        emojis: NATURE,
    },
    EmojiCategory {
        key: "food",
        name: "Food & Drink",
        emojis: FOOD,
    },
    EmojiCategory {
        key: "travel",
        name: "Travel & Places",
        emojis: TRAVEL,
    },
    EmojiCategory {
        key: "objects",
        name: "Objects",
        emojis: OBJECTS,
    },
];

const SMILEYS: &[&str] = &[
    "😀", "😃", "😄", "😁", "😆", "😅", "😂", "🤣", "😊", "😇", "🙂", "🙃",
    "😉", "😌", "😍", "🥰", "😘", "😗", "😙", "😚", "😋", "😛", "😝", "😜",
    "🤪", "🤨", "🧐", "🤓", "😎", "🤩", "🥳", "😏", "😒", "😞", "😔", "😟",
    "😕", "🙁", "☹️", "😣", "😖", "😫", "😩", "🥺", "😢", "😭", "😤", "😠",
    "😡", "🤬", "🤯", "😳", "🥵", "🥶", "😱", "😨", "😰", "😥", "😓",
];

const NATURE: &[&str] = &[
    "🐶", "🐱", "🐭", "🐹", "🐰", "🦊", "🐻", "🐼", "🐨", "🐯", "🦁", "🐮",
    "🐷", "🐽", "🐸", "🐵", "🙈", "🙉", "🙊", "🐒", "🐔", "🐧", "🐦", "🐤",
    "🐣", "🐥", "🦆", "🦅", "🦉", "🦇", "🐺", "🐗", "🐴", "🦄", "🐝", "🐛",
    "🦋", "🐌", "🐞", "🐜", "🦟", "🦗", "🕷️", "🕸️", "🦂", "🐢", "🐍", "🦎",
    "🦖", "🦕", "🐙", "🦑", "🦐", "🦞", "🦀", "🐡", "🐠", "🐟", "🐬", "🐳",
    "🐋", "🦈", "🐊", "🐅", "🐆", "🦓", "🦍", "🦧", "🐘", "🦛", "🦏", "🐪",
    "🐫", "🦒", "🦘", "🐃", "🐂", "🐄", "🐎", "🐖", "🐏", "🐑", "🦙", "🐐",
    "🦌", "🐕", "🐩", "🦮", "🐕‍🦺", "🐈", "🐓", "🦃", "🦚", "🦜", "🦢", "🦩",
    "🕊️", "🐇", "🦝", "🦨", "🦡", "🦦", "🦥", "🐁", "🐀", "🐿️",
];

const FOOD: &[&str] = &[
    "🍎", "🍐", "🍊", "🍋", "🍌", "🍉", "🍇", "🍓", "🫐", "🍈", "🍒", "🍑",
    "🥭", "🍍", "🥥", "🥝", "🍅", "🍆", "🥑", "🥦", "🥬", "🥒", "🌶️", "🫑",
    "🌽", "🥕", "🫒", "🧄", "🧅", "🥔", "🍠", "🥐", "🥯", "🍞", "🥖", "🥨",
    "🧀", "🥚", "🍳", "🧈", "🥞", "🧇", "🥓", "🥩", "🍗", "🍖", "🦴", "🌭",
    "🍔", "🍟", "🍕", "🫓", "🥪", "🥙", "🧆", "🌮", "🌯", "🫔", "🥗", "🥘",
    "🫕", "🥫", "🍝", "🍜", "🍲", "🍛", "🍣", "🍱", "🥟", "🦪", "🍤", "🍙",
    "🍚", "🍘", "🍥", "🥠", "🥮", "🍢", "🍡", "🍧", "🍨", "🍦", "🥧", "🧁",
    "🍰", "🎂", "🍮", "🍭", "🍬", "🍫", "🍿", "🍩", "🍪", "🌰", "🥜", "🍯",
];

const TRAVEL: &[&str] = &[
    "🚗", "🚕", "🚙", "🚌", "🚎", "🏎️", "🚓", "🚑", "🚒", "🚐", "🛻", "🚚",
    "🚛", "🚜", "🏍️", "🛵", "🚲", "🛴", "🛹", "🛼", "🚁", "🛸", "✈️", "🛩️",
    "🛫", "🛬", "🪂", "💺", "🚀", "🛰️", "🚢", "⛵", "🚤", "🛥️", "🛳️", "⛴️",
    "🚂", "🚃", "🚄", "🚅", "🚆", "🚇", "🚈", "🚉", "🚊", "🚝", "🚞", "🚋",
    "🚌", "🚍", "🚎", "🚐", "🚑", "🚒", "🚓", "🚔", "🚕", "🚖", "🚗", "🚘",
    "🚙", "🚚", "🚛", "🚜",
];

const OBJECTS: &[&str] = &[
    "⌚", "📱", "📲", "💻", "⌨️", "🖥️", "🖨️", "🖱️", "🖽️", "💽", "💾", "💿",
    "📀", "📼", "📷", "📸", "📹", "🎥", "📽️", "🎞️", "📞", "☎️", "📟", "📠",
    "📺", "📻", "🎙️", "🎚️", "🎛️", "🧭", "⏱️", "⏲️", "⏰", "🕰️", "⌛", "⏳",
    "📡", "🔋", "🔌", "💡", "🔦", "🕯️", "🪔", "🧯", "🛢️", "💸", "💵", "💴",
    "💶", "💷", "💰", "💳", "💎", "⚖️", "🧰", "🔧", "🔨", "⚒️", "🛠️", "⛏️",
    "🔩", "⚙️", "🧱", "⛓️", "🧲", "🔫", "💣", "🧨", "🪓", "🔪", "🗡️", "⚔️",
    "🛡️", "🚬", "⚰️", "⚱️", "🏺", "🔮", "📿", "🧿", "💈", "⚗️", "🔭", "🔬",
    "🕳️", "🩹", "🩺", "💊", "💉", "🩸", "🧬", "🦠", "🧫", "🧪", "🌡️", "🧹",
    "🧺", "🧻", "🚽", "🚰", "🚿", "🛁", "🛀", "🧼", "🪒", "🧽", "🧴", "🛎️",
    "🔑", "🗝️", "🚪", "🪑", "🛋️", "🛏️", "🛌", "🧸", "🖼️", "🛍️", "🛒", "🎁",
    "🎈", "🎏", "🎀", "🎊", "🎉", "🎎", "🏮", "🎐", "🧧", "✉️", "📩", "📨",
    "📧", "💌", "📥", "📤", "📦", "🏷️", "📪", "📫", "📬", "📭", "📮", "📯",
    "📜", "📃", "📄", "📑", "🧾", "📊", "📈", "📉", "🗒️", "🗓️", "📆", "📅",
    "🗑️", "📇", "🗃️", "🗳️", "🗄️", "📋", "📁", "📂", "🗂️", "🗞️", "📰", "📓",
    "📔", "📒", "📕", "📗", "📘", "📙", "📚", "📖", "🔖", "🧷", "🔗", "📎",
    "🖇️", "📐", "📏", "🧮", "📌", "📍", "✂️", "🖊️", "🖋️", "✒️", "🖌️", "🖍️",
    "📝", "✏️", "🔍", "🔎", "🔏", "🔐", "🔒", "🔓",
];

const STYLES: &str = r#"
.lilac-emoji-picker {
  padding: 16px;
}
.lilac-emoji-categories {
  display: flex;
  gap: 4px;
  margin-bottom: 16px;
  padding-bottom: 16px;
  border-bottom: 1px solid var(--lilac-color-border);
}
.lilac-emoji-category {
  background: none;
  border: none;
  padding: 8px;
  border-radius: 6px;
  cursor: pointer;
  font-size: 18px;
  line-height: 1;
  opacity: 0.6;
}
.lilac-emoji-category.active {
  background: var(--lilac-color-primary);
  opacity: 1;
}
.lilac-emoji-grid {
  display: grid;
  grid-template-columns: repeat(8, 1fr);
  gap: 4px;
  max-height: 300px;
  overflow-y: auto;
}
.lilac-emoji-button {
  background: none;
  border: none;
  padding: 8px;
  border-radius: 4px;
  cursor: pointer;
  font-size: 20px;
  line-height: 1;
  aspect-ratio: 1;
}
.lilac-emoji-button:hover {
  background: var(--lilac-color-hover);
}
"#;

#[derive(Debug)]
struct PickerState {
    category: usize,
    picked: String,
}

/// Picker state shared between the host and the plugin
#[derive(Debug, Clone)]
pub struct EmojiPicker {
    state: Rc<RefCell<PickerState>>,
}

impl Default for EmojiPicker {
    fn default() -> Self {
        Self {
            state: Rc::new(RefCell::new(PickerState {
                category: 0,
                picked: EMOJI_CATEGORIES[0].emojis[0].to_string(),
            })),
        }
    }
}

impl EmojiPicker {
    pub fn category(&self) -> &'static EmojiCategory {
        &EMOJI_CATEGORIES[self.state.borrow().category]
    }

    /// Switch the grid to the category with `key`; false if there is none
    pub fn select_category(&self, key: &str) -> bool {
        match EMOJI_CATEGORIES.iter().position(|c| c.key == key) {
            Some(index) => {
                self.state.borrow_mut().category = index;
                true
            }
            None => false,
        }
    }

    /// Choose the emoji the next insert uses; only emojis from the
    /// categories are accepted
    pub fn pick(&self, emoji: &str) -> bool {
        let known = EMOJI_CATEGORIES
            .iter()
            .any(|c| c.emojis.iter().any(|e| *e == emoji));
        if known {
            self.state.borrow_mut().picked = emoji.to_string();
        } else {
            tracing::debug!(emoji, "Not in any emoji category");
        }
        known
    }

    pub fn picked(&self) -> String {
        self.state.borrow().picked.clone()
    }

    /// Category tabs followed by the active category's grid
    pub fn render(&self) -> String {
        let active = self.state.borrow().category;
        let mut html = String::from(
            "<div class=\"lilac-emoji-picker\"><div class=\"lilac-emoji-categories\">",
        );
        for (index, category) in EMOJI_CATEGORIES.iter().enumerate() {
            html.push_str(&format!(
                "<button class=\"lilac-emoji-category{}\" data-category=\"{}\" title=\"{}\">{}</button>",
                if index == active { " active" } else { "" },
                category.key,
                escape_html(category.name),
                category.emojis[0]
            ));
        }
        html.push_str("</div><div class=\"lilac-emoji-grid\">");
        for emoji in EMOJI_CATEGORIES[active].emojis {
            html.push_str(&format!(
                "<button class=\"lilac-emoji-button\" data-emoji=\"{0}\" title=\"{0}\">{0}</button>",
                emoji
            ));
        }
        html.push_str("</div></div>");
        html
    }
}

pub fn emoji_plugin(picker: EmojiPicker) -> EditorPlugin {
    let insert: ActionFn = {
        let picker = picker.clone();
        Rc::new(move |ctx| {
            ctx.insert_content(picker.picked());
            Ok(())
        })
    };

    let mut button = ToolbarButton::new("emoji-picker", "Insert Emoji", |_| Ok(()));
    button.on_click = ActionFn::clone(&insert);
    button.icon = "smile".to_string();
    button.tooltip = Some("Insert emoji (Ctrl+Shift+E)".to_string());
    button.shortcut = Some("Ctrl+Shift+E".to_string());
    button.group = Some("insert".to_string());

    let mut shortcut = KeyboardShortcut::new("e", |_| Ok(())).ctrl().shift();
    shortcut.action = insert;

    let panel = EditorPanel {
        id: "emoji-picker-panel".to_string(),
        title: "Emoji".to_string(),
        icon: Some("smile".to_string()),
        position: PanelPosition::Right,
        default_open: false,
        render: Rc::new(move |_| picker.render()),
    };

    EditorPlugin::new("emoji-picker", "Emoji Picker", "1.0.0")
        .with_description("Add emojis to your content with an easy-to-use picker")
        .with_author("Lilac Editor")
        .with_toolbar_button(button)
        .with_shortcut(shortcut)
        .with_panel(panel)
        .with_styles(STYLES)
        .on_install(|_| {
            tracing::info!("Emoji Picker plugin installed");
            Ok(())
        })
        .on_uninstall(|_| {
            tracing::info!("Emoji Picker plugin uninstalled");
            Ok(())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::KeyEvent;
    use crate::plugin::{ContextRequest, EditorContext};

    #[test]
    fn test_categories() {
        let keys: Vec<_> = EMOJI_CATEGORIES.iter().map(|c| c.key).collect();
        assert_eq!(keys, vec!["smileys", "nature", "food", "travel", "objects"]);
        assert!(EMOJI_CATEGORIES.iter().all(|c| !c.emojis.is_empty()));
        assert_eq!(EMOJI_CATEGORIES[0].emojis[0], "😀");
    }

    #[test]
    fn test_picker_selection() {
        let picker = EmojiPicker::default();
        assert_eq!(picker.category().key, "smileys");
        assert_eq!(picker.picked(), "😀");

        assert!(picker.select_category("food"));
        assert!(!picker.select_category("weather"));
        assert_eq!(picker.category().name, "Food & Drink");

        assert!(picker.pick("🍕"));
        assert!(!picker.pick("x"));
        assert_eq!(picker.picked(), "🍕");
    }

    #[test]
    fn test_render_marks_active_category() {
        let picker = EmojiPicker::default();
        picker.select_category("travel");
        let html = picker.render();
        assert!(html.contains(
            "<button class=\"lilac-emoji-category active\" data-category=\"travel\" title=\"Travel &amp; Places\">🚗</button>"
        ));
        assert!(html.contains("data-category=\"smileys\" title=\"Smileys &amp; People\""));
        assert_eq!(html.matches("lilac-emoji-button").count(), EMOJI_CATEGORIES[3].emojis.len());
    }

    #[test]
    fn test_button_and_shortcut_insert_picked() {
        let picker = EmojiPicker::default();
        let plugin = emoji_plugin(picker.clone());
        let shortcut = &plugin.keyboard_shortcuts[0];
        assert!(shortcut.matches(&KeyEvent::new("E").with_ctrl().with_shift()));

        let context = EditorContext::default();
        (plugin.toolbar_buttons[0].on_click)(&context).unwrap();
        picker.pick("🐶");
        (shortcut.action)(&context).unwrap();
        assert_eq!(
            context.take_requests(),
            vec![
                ContextRequest::InsertContent("😀".to_string()),
                ContextRequest::InsertContent("🐶".to_string()),
            ]
        );
    }
}
