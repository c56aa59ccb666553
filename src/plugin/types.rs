//! The plugin record and the UI extensions it can contribute

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::context::EditorContext;
use crate::keymap::KeyEvent;
use crate::state::SelectionRange;

/// Lifecycle hook: install, uninstall, mount, unmount
pub type HookFn = Rc<dyn Fn(&EditorContext) -> anyhow::Result<()>>;
/// Called with the new content after every change
pub type ContentHookFn = Rc<dyn Fn(&str, &EditorContext) -> anyhow::Result<()>>;
/// Called with the new selection after every selection change
pub type SelectionHookFn = Rc<dyn Fn(Option<SelectionRange>, &EditorContext) -> anyhow::Result<()>>;
/// Button, menu item and shortcut actions
pub type ActionFn = Rc<dyn Fn(&EditorContext) -> anyhow::Result<()>>;
pub type PredicateFn = Rc<dyn Fn(&EditorContext) -> bool>;
pub type TransformFn = Rc<dyn Fn(&str, &EditorContext) -> String>;
/// Renders a panel body as markup
pub type RenderFn = Rc<dyn Fn(&EditorContext) -> String>;

/// Hook invocation, carrying the hook's own arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hook<'a> {
    Install,
    Uninstall,
    EditorMount,
    EditorUnmount,
    ContentChange(&'a str),
    SelectionChange(Option<SelectionRange>),
}

impl Hook<'_> {
    /// Hook name as it appears in logs and failure reports
    pub fn name(&self) -> &'static str {
        match self {
            Hook::Install => "onInstall",
            Hook::Uninstall => "onUninstall",
            Hook::EditorMount => "onEditorMount",
            Hook::EditorUnmount => "onEditorUnmount",
            Hook::ContentChange(_) => "onContentChange",
            Hook::SelectionChange(_) => "onSelectionChange",
        }
    }
}

#[derive(Clone)]
pub struct ToolbarButton {
    pub id: String,
    pub icon: String,
    pub label: String,
    pub tooltip: Option<String>,
    pub on_click: ActionFn,
    pub is_active: Option<PredicateFn>,
    pub shortcut: Option<String>,
    pub group: Option<String>,
}

impl ToolbarButton {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        on_click: impl Fn(&EditorContext) -> anyhow::Result<()> + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            icon: String::new(),
            label: label.into(),
            tooltip: None,
            on_click: Rc::new(on_click),
            is_active: None,
            shortcut: None,
            group: None,
        }
    }

    /// Tooltip if set, else the label
    pub fn title(&self) -> &str {
        self.tooltip.as_deref().unwrap_or(&self.label)
    }
}

impl fmt::Debug for ToolbarButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolbarButton")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("tooltip", &self.tooltip)
            .field("shortcut", &self.shortcut)
            .field("group", &self.group)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct ContextMenuItem {
    pub id: String,
    pub label: String,
    pub icon: Option<String>,
    pub on_click: ActionFn,
    /// Render a separator before this item
    pub separator: bool,
    pub visible: Option<PredicateFn>,
}

impl ContextMenuItem {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        on_click: impl Fn(&EditorContext) -> anyhow::Result<()> + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: None,
            on_click: Rc::new(on_click),
            separator: false,
            visible: None,
        }
    }

    pub fn is_visible(&self, context: &EditorContext) -> bool {
        self.visible.as_ref().map_or(true, |visible| visible(context))
    }
}

impl fmt::Debug for ContextMenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextMenuItem")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("separator", &self.separator)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelPosition {
    Left,
    #[default]
    Right,
    Bottom,
}

#[derive(Clone)]
pub struct EditorPanel {
    pub id: String,
    pub title: String,
    pub icon: Option<String>,
    pub position: PanelPosition,
    pub default_open: bool,
    pub render: RenderFn,
}

impl fmt::Debug for EditorPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorPanel")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("position", &self.position)
            .field("default_open", &self.default_open)
            .finish_non_exhaustive()
    }
}

/// A plugin keyboard shortcut; consulted before the built-in keymap
#[derive(Clone)]
pub struct KeyboardShortcut {
    pub key: String,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
    pub action: ActionFn,
    pub prevent_default: bool,
}

impl KeyboardShortcut {
    pub fn new(
        key: impl Into<String>,
        action: impl Fn(&EditorContext) -> anyhow::Result<()> + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            ctrl: false,
            alt: false,
            shift: false,
            meta: false,
            action: Rc::new(action),
            prevent_default: true,
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    /// Key compares case-insensitively; every modifier must match exactly
    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.key.eq_ignore_ascii_case(&event.key)
            && self.ctrl == event.ctrl
            && self.alt == event.alt
            && self.shift == event.shift
            && self.meta == event.meta
    }
}

impl fmt::Debug for KeyboardShortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyboardShortcut")
            .field("key", &self.key)
            .field("ctrl", &self.ctrl)
            .field("alt", &self.alt)
            .field("shift", &self.shift)
            .field("meta", &self.meta)
            .field("prevent_default", &self.prevent_default)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct ContentTransformer {
    pub id: String,
    pub name: String,
    pub transform: TransformFn,
    pub reverse: Option<TransformFn>,
}

impl ContentTransformer {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        transform: impl Fn(&str, &EditorContext) -> String + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            transform: Rc::new(transform),
            reverse: None,
        }
    }

    pub fn with_reverse(mut self, reverse: impl Fn(&str, &EditorContext) -> String + 'static) -> Self {
        self.reverse = Some(Rc::new(reverse));
        self
    }
}

impl fmt::Debug for ContentTransformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentTransformer")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("reversible", &self.reverse.is_some())
            .finish()
    }
}

/// An installable extension: metadata plus any subset of hooks and UI
/// contributions. Absent hooks are simply skipped.
#[derive(Clone, Default)]
pub struct EditorPlugin {
    pub id: String,
    pub name: String,
    pub version: String,
    pub description: Option<String>,
    pub author: Option<String>,

    pub on_install: Option<HookFn>,
    pub on_uninstall: Option<HookFn>,
    pub on_editor_mount: Option<HookFn>,
    pub on_editor_unmount: Option<HookFn>,
    pub on_content_change: Option<ContentHookFn>,
    pub on_selection_change: Option<SelectionHookFn>,

    pub toolbar_buttons: Vec<ToolbarButton>,
    pub context_menu_items: Vec<ContextMenuItem>,
    pub panels: Vec<EditorPanel>,
    pub keyboard_shortcuts: Vec<KeyboardShortcut>,
    pub content_transformers: Vec<ContentTransformer>,

    /// Stylesheet injected while the plugin is installed
    pub styles: Option<String>,
    /// Free-form plugin configuration
    pub config: Option<serde_json::Value>,
}

impl EditorPlugin {
    pub fn new(id: impl Into<String>, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            version: version.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn on_install(mut self, hook: impl Fn(&EditorContext) -> anyhow::Result<()> + 'static) -> Self {
        self.on_install = Some(Rc::new(hook));
        self
    }

    pub fn on_uninstall(mut self, hook: impl Fn(&EditorContext) -> anyhow::Result<()> + 'static) -> Self {
        self.on_uninstall = Some(Rc::new(hook));
        self
    }

    pub fn on_editor_mount(
        mut self,
        hook: impl Fn(&EditorContext) -> anyhow::Result<()> + 'static,
    ) -> Self {
        self.on_editor_mount = Some(Rc::new(hook));
        self
    }

    pub fn on_editor_unmount(
        mut self,
        hook: impl Fn(&EditorContext) -> anyhow::Result<()> + 'static,
    ) -> Self {
        self.on_editor_unmount = Some(Rc::new(hook));
        self
    }

    pub fn on_content_change(
        mut self,
        hook: impl Fn(&str, &EditorContext) -> anyhow::Result<()> + 'static,
    ) -> Self {
        self.on_content_change = Some(Rc::new(hook));
        self
    }

    pub fn on_selection_change(
        mut self,
        hook: impl Fn(Option<SelectionRange>, &EditorContext) -> anyhow::Result<()> + 'static,
    ) -> Self {
        self.on_selection_change = Some(Rc::new(hook));
        self
    }

    pub fn with_toolbar_button(mut self, button: ToolbarButton) -> Self {
        self.toolbar_buttons.push(button);
        self
    }

    pub fn with_context_menu_item(mut self, item: ContextMenuItem) -> Self {
        self.context_menu_items.push(item);
        self
    }

    pub fn with_panel(mut self, panel: EditorPanel) -> Self {
        self.panels.push(panel);
        self
    }

    pub fn with_shortcut(mut self, shortcut: KeyboardShortcut) -> Self {
        self.keyboard_shortcuts.push(shortcut);
        self
    }

    pub fn with_transformer(mut self, transformer: ContentTransformer) -> Self {
        self.content_transformers.push(transformer);
        self
    }

    pub fn with_styles(mut self, styles: impl Into<String>) -> Self {
        self.styles = Some(styles.into());
        self
    }

    pub fn with_config(mut self, config: serde_json::Value) -> Self {
        self.config = Some(config);
        self
    }
}

impl fmt::Debug for EditorPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorPlugin")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("version", &self.version)
            .field("toolbar_buttons", &self.toolbar_buttons.len())
            .field("context_menu_items", &self.context_menu_items.len())
            .field("panels", &self.panels.len())
            .field("keyboard_shortcuts", &self.keyboard_shortcuts.len())
            .field("content_transformers", &self.content_transformers.len())
            .field("styles", &self.styles.is_some())
            .finish_non_exhaustive()
    }
}
