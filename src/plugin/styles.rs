//! Plugin stylesheet injection area

use std::cell::RefCell;
use std::rc::Rc;

/// Registry shared between plugin managers on the same page
pub type SharedStyles = Rc<RefCell<StyleRegistry>>;

/// Style element id for a plugin
pub fn style_id(plugin_id: &str) -> String {
    format!("lilac-plugin-{}", plugin_id)
}

/// Keyed stylesheet store standing in for the document head.
///
/// Entries keep injection order; re-injecting a key moves it to the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleRegistry {
    entries: Vec<(String, String)>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedStyles {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Inject `css` for a plugin, replacing its previous stylesheet
    pub fn inject(&mut self, plugin_id: &str, css: &str) {
        let id = style_id(plugin_id);
        self.entries.retain(|(key, _)| *key != id);
        self.entries.push((id, css.to_string()));
    }

    /// Remove a plugin's stylesheet; returns whether one existed
    pub fn remove(&mut self, plugin_id: &str) -> bool {
        let id = style_id(plugin_id);
        let before = self.entries.len();
        self.entries.retain(|(key, _)| *key != id);
        self.entries.len() != before
    }

    /// Stylesheet by style element id (`lilac-plugin-<id>`)
    pub fn get(&self, style_id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == style_id)
            .map(|(_, css)| css.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All stylesheets concatenated in injection order
    pub fn stylesheet(&self) -> String {
        self.entries
            .iter()
            .map(|(_, css)| css.trim())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
