//! Headless editor surface
//!
//! [`Editor`] wires the pieces together the way a browser component would:
//! it owns the document, the editable root, the state controller, the
//! plugin manager and the keymap, and turns host events (input, selection
//! changes, key presses, toolbar clicks) into state transitions.
//!
//! The host drives it:
//! - mutate the tree through [`Editor::dom_mut`] (or use [`Editor::type_text`])
//!   and call [`Editor::handle_input`]
//! - call [`Editor::handle_selection_change`] when the document selection moves
//! - call [`Editor::flush_deferred`] once the current event has settled
//!
//! Failures are returned where an operation has a return value and are
//! always forwarded to the `on_error` callback as well.

use std::collections::{BTreeSet, VecDeque};
use std::fmt;

use serde::Serialize;

use crate::config::{ContentMode, EditorConfig};
use crate::dom::{Dom, DomCommands, DomPosition, DomRange, NodeId};
use crate::error::{EditorError, FormatError, PluginError};
use crate::format::{self, RichTextBackend, ToolbarTool};
use crate::keymap::{default_bindings, Command, KeyContext, KeyEvent, Keymap};
use crate::offset;
use crate::plugin::{
    run_guarded, ActionFn, ContextRequest, EditorContext, EditorPlugin, Hook, PanelPosition,
    PluginManager, StatePatch, StateView,
};
use crate::state::{EditorState, EditorStateController, SelectionRange};
use crate::util::text::{char_len, strip_tags};

/// Class of the editable root element
pub const ROOT_CLASS: &str = "lilac-editor__content";

/// Plugin requests may trigger hooks that queue more requests; past this
/// nesting depth further requests are dropped
const MAX_REQUEST_DEPTH: usize = 8;

pub type UrlPrompt = Box<dyn FnMut(ToolbarTool) -> Option<String>>;
pub type ErrorCallback = Box<dyn FnMut(&EditorError)>;
pub type FocusCallback = Box<dyn FnMut()>;

/// Work scheduled to run after the current event settles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredTask {
    RefreshActiveFormats,
    SyncSelection,
}

enum Backend {
    /// [`DomCommands`] bound to the current root; rebound on mount
    Reference(DomCommands),
    Custom(Box<dyn RichTextBackend>),
}

impl Backend {
    fn get(&self) -> &dyn RichTextBackend {
        match self {
            Backend::Reference(commands) => commands,
            Backend::Custom(backend) => backend.as_ref(),
        }
    }

    fn get_mut(&mut self) -> &mut dyn RichTextBackend {
        match self {
            Backend::Reference(commands) => commands,
            Backend::Custom(backend) => backend.as_mut(),
        }
    }
}

/// One toolbar entry as the host should render it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ToolbarItem {
    Tool {
        tool: ToolbarTool,
        label: &'static str,
        icon: &'static str,
        active: bool,
        disabled: bool,
    },
    Separator,
    Plugin {
        id: String,
        label: String,
        icon: String,
        title: String,
        active: bool,
        disabled: bool,
    },
}

/// A visible context-menu item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuEntry {
    pub id: String,
    pub label: String,
    pub icon: Option<String>,
    pub separator: bool,
}

/// A plugin panel with its body rendered for the current state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedPanel {
    pub id: String,
    pub title: String,
    pub icon: Option<String>,
    pub position: PanelPosition,
    pub default_open: bool,
    pub html: String,
}

pub struct Editor {
    config: EditorConfig,
    dom: Dom,
    root: Option<NodeId>,
    controller: EditorStateController,
    plugins: PluginManager,
    backend: Backend,
    keymap: Keymap,
    is_focused: bool,
    active_formats: BTreeSet<ToolbarTool>,
    deferred: VecDeque<DeferredTask>,
    request_depth: usize,
    /// Set while undo/redo broadcasts the restored content
    restoring_history: bool,
    prompt_url: Option<UrlPrompt>,
    on_error: Option<ErrorCallback>,
    on_focus: Option<FocusCallback>,
    on_blur: Option<FocusCallback>,
}

impl fmt::Debug for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Editor")
            .field("root", &self.root)
            .field("state", self.controller.state())
            .field("plugins", &self.plugins.len())
            .field("is_focused", &self.is_focused)
            .field("active_formats", &self.active_formats)
            .field("deferred", &self.deferred)
            .finish_non_exhaustive()
    }
}

impl Editor {
    pub fn new(config: EditorConfig, initial_content: &str) -> Self {
        let mut controller = EditorStateController::new(initial_content, config.max_history_size);
        controller.set_read_only(config.read_only);

        let mut dom = Dom::new();
        // Placeholder until mount creates the real root
        let detached = dom.create_element("div");

        Self {
            config,
            dom,
            root: None,
            controller,
            plugins: PluginManager::new(),
            backend: Backend::Reference(DomCommands::new(detached)),
            keymap: Keymap::with_bindings(default_bindings()),
            is_focused: false,
            active_formats: BTreeSet::new(),
            deferred: VecDeque::new(),
            request_depth: 0,
            restoring_history: false,
            prompt_url: None,
            on_error: None,
            on_focus: None,
            on_blur: None,
        }
    }

    // =========================================================================
    // Builders
    // =========================================================================

    pub fn with_plugin_manager(mut self, plugins: PluginManager) -> Self {
        self.plugins = plugins;
        self
    }

    /// Use a custom rich-text backend instead of [`DomCommands`]
    pub fn with_backend(mut self, backend: impl RichTextBackend + 'static) -> Self {
        self.backend = Backend::Custom(Box::new(backend));
        self
    }

    pub fn with_keymap(mut self, keymap: Keymap) -> Self {
        self.keymap = keymap;
        self
    }

    /// Called with the new content after every content change
    pub fn on_change(mut self, callback: impl FnMut(&str) + 'static) -> Self {
        self.controller.set_on_change(Some(Box::new(callback)));
        self
    }

    pub fn on_selection_change(
        mut self,
        callback: impl FnMut(Option<SelectionRange>) + 'static,
    ) -> Self {
        self.controller.set_on_selection_change(Some(Box::new(callback)));
        self
    }

    pub fn on_focus(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_focus = Some(Box::new(callback));
        self
    }

    pub fn on_blur(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_blur = Some(Box::new(callback));
        self
    }

    pub fn on_error(mut self, callback: impl FnMut(&EditorError) + 'static) -> Self {
        self.on_error = Some(Box::new(callback));
        self
    }

    /// Asks the host for a link or image URL; `None` cancels
    pub fn with_url_prompt(
        mut self,
        prompt: impl FnMut(ToolbarTool) -> Option<String> + 'static,
    ) -> Self {
        self.prompt_url = Some(Box::new(prompt));
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    /// Direct access to the document, for simulating user edits
    pub fn dom_mut(&mut self) -> &mut Dom {
        &mut self.dom
    }

    /// The editable root; `None` while unmounted
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn is_mounted(&self) -> bool {
        self.root.is_some()
    }

    pub fn state(&self) -> &EditorState {
        self.controller.state()
    }

    pub fn content(&self) -> &str {
        self.controller.content()
    }

    pub fn selection(&self) -> Option<SelectionRange> {
        self.controller.selection()
    }

    pub fn is_read_only(&self) -> bool {
        self.controller.is_read_only()
    }

    pub fn can_undo(&self) -> bool {
        self.controller.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.controller.can_redo()
    }

    pub fn is_focused(&self) -> bool {
        self.is_focused
    }

    pub fn plugins(&self) -> &PluginManager {
        &self.plugins
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    /// Tools active at the selection, as of the last refresh
    pub fn active_formats(&self) -> &BTreeSet<ToolbarTool> {
        &self.active_formats
    }

    /// Text currently selected inside the editor
    pub fn selected_text(&self) -> String {
        self.selection_in_root()
            .map(|range| self.dom.range_text(&range))
            .unwrap_or_default()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Create the editable root, render the content and run mount hooks.
    ///
    /// Mounting twice returns the existing root.
    pub fn mount(&mut self) -> NodeId {
        if let Some(root) = self.root {
            return root;
        }

        let root = self.dom.create_element("div");
        self.dom.set_attribute(root, "class", ROOT_CLASS);
        self.dom
            .set_attribute(root, "contenteditable", editable_attr(self.is_read_only()));
        if !self.config.placeholder.is_empty() {
            self.dom
                .set_attribute(root, "data-placeholder", &self.config.placeholder);
        }
        let body = self.dom.body();
        self.dom.append_child(body, root);
        self.root = Some(root);

        if let Backend::Reference(commands) = &mut self.backend {
            *commands = DomCommands::new(root);
        }

        self.render_content();
        tracing::debug!(plugins = self.plugins.len(), "editor mounted");
        self.broadcast(Hook::EditorMount);

        if self.config.auto_focus {
            self.focus();
        }
        root
    }

    /// Run unmount hooks and detach the root. Deferred tasks still queued
    /// are dropped at the next flush.
    pub fn unmount(&mut self) {
        let Some(root) = self.root else {
            return;
        };

        self.broadcast(Hook::EditorUnmount);
        self.dom.detach(root);
        self.root = None;
        self.is_focused = false;
        self.active_formats.clear();
        self.plugins.clear_context();
        tracing::debug!("editor unmounted");
    }

    // =========================================================================
    // Plugins
    // =========================================================================

    /// Install a plugin. Its install hook runs only while mounted.
    pub fn install_plugin(&mut self, plugin: EditorPlugin) -> Result<(), PluginError> {
        self.refresh_context();
        let result = self.plugins.install(plugin);
        self.finish_plugin_change(result)
    }

    pub fn uninstall_plugin(&mut self, plugin_id: &str) -> Result<(), PluginError> {
        self.refresh_context();
        let result = self.plugins.uninstall(plugin_id);
        self.finish_plugin_change(result)
    }

    fn finish_plugin_change(
        &mut self,
        result: Result<(), PluginError>,
    ) -> Result<(), PluginError> {
        if let Err(e) = &result {
            self.report(&EditorError::Plugin(e.clone()));
        }
        self.drain_requests();
        result
    }

    /// Run a plugin toolbar button. Returns false for unknown ids or when
    /// the action failed.
    pub fn click_toolbar_button(&mut self, button_id: &str) -> bool {
        let found = self.plugins.all_plugins().iter().find_map(|plugin| {
            plugin
                .toolbar_buttons
                .iter()
                .find(|b| b.id == button_id)
                .map(|b| (plugin.id.clone(), ActionFn::clone(&b.on_click)))
        });
        match found {
            Some((plugin_id, action)) => self.run_action(&plugin_id, "onClick", action),
            None => {
                tracing::warn!("No toolbar button {}", button_id);
                false
            }
        }
    }

    pub fn click_context_menu_item(&mut self, item_id: &str) -> bool {
        let found = self.plugins.all_plugins().iter().find_map(|plugin| {
            plugin
                .context_menu_items
                .iter()
                .find(|item| item.id == item_id)
                .map(|item| (plugin.id.clone(), ActionFn::clone(&item.on_click)))
        });
        match found {
            Some((plugin_id, action)) => self.run_action(&plugin_id, "onClick", action),
            None => {
                tracing::warn!("No context menu item {}", item_id);
                false
            }
        }
    }

    fn run_action(&mut self, plugin_id: &str, hook: &'static str, action: ActionFn) -> bool {
        if self.root.is_none() {
            return false;
        }
        self.refresh_context();
        let Some(context) = self.plugins.context() else {
            return false;
        };
        let result = run_guarded(plugin_id, hook, || action(context));

        let ok = match result {
            Ok(()) => true,
            Err(failure) => {
                self.report(&EditorError::Hook(failure));
                false
            }
        };
        self.drain_requests();
        ok
    }

    /// Content passed through every plugin transformer, for saving
    pub fn export_content(&mut self) -> String {
        self.refresh_context();
        self.plugins.transform_content(self.controller.content())
    }

    /// Set content produced by [`export_content`](Self::export_content),
    /// undoing the transformers that can be reversed
    pub fn import_content(&mut self, content: &str) {
        self.refresh_context();
        let restored = self.plugins.reverse_transform_content(content);
        self.set_content(&restored);
    }

    // =========================================================================
    // Host contract
    // =========================================================================

    /// Replace the content as a single undoable change
    pub fn set_content(&mut self, content: &str) {
        self.controller.update_content(content, true);
        self.render_content();
        self.content_changed();
    }

    /// Replace the content as a new document: nothing to undo or redo
    /// afterwards. Plugins see the new content through their change hook.
    pub fn load_content(&mut self, content: &str) {
        self.controller.reset(content);
        self.render_content();
        self.content_changed();
    }

    pub fn undo(&mut self) -> bool {
        if !self.controller.undo() {
            return false;
        }
        self.history_restored();
        true
    }

    pub fn redo(&mut self) -> bool {
        if !self.controller.redo() {
            return false;
        }
        self.history_restored();
        true
    }

    pub fn focus(&mut self) {
        if self.root.is_none() || self.is_focused {
            return;
        }
        self.is_focused = true;
        if let Some(callback) = self.on_focus.as_mut() {
            callback();
        }
    }

    pub fn blur(&mut self) {
        if !self.is_focused {
            return;
        }
        self.is_focused = false;
        if let Some(callback) = self.on_blur.as_mut() {
            callback();
        }
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.controller.set_read_only(read_only);
        if let Some(root) = self.root {
            self.dom
                .set_attribute(root, "contenteditable", editable_attr(read_only));
        }
        self.refresh_context();
    }

    /// Move the selection to linear offsets, or clear it with `None`
    pub fn set_selection(&mut self, selection: Option<SelectionRange>) {
        let Some(root) = self.root else {
            self.controller.update_selection(selection);
            return;
        };
        match selection {
            Some(range) => offset::select_offsets(&mut self.dom, root, range),
            None => self.dom.remove_all_ranges(),
        }
        self.handle_selection_change();
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Read the root back after a user edit and record it.
    ///
    /// Input while read-only, or input that takes the text past
    /// `max_length`, is reverted by re-rendering the last accepted content.
    pub fn handle_input(&mut self) -> Result<(), EditorError> {
        let Some(root) = self.root else {
            return Ok(());
        };

        if self.is_read_only() {
            tracing::debug!("Input rejected: editor is read-only");
            self.render_content();
            return self.fail(EditorError::ReadOnly);
        }

        if let Some(max) = self.config.max_length {
            let length = char_len(&self.dom.text_content(root));
            if length > max {
                tracing::debug!(length, max, "Input rejected: content too long");
                self.render_content();
                return self.fail(EditorError::LengthExceeded { length, max });
            }
        }

        let new_content = self.read_content(root);
        self.controller.update_content(new_content.clone(), true);
        self.broadcast(Hook::ContentChange(&new_content));
        Ok(())
    }

    /// Type `text` at the selection (replacing selected text), like a
    /// keypress followed by an input event
    pub fn type_text(&mut self, text: &str) -> Result<(), EditorError> {
        let Some(root) = self.root else {
            return Ok(());
        };

        let range = self
            .selection_in_root()
            .unwrap_or_else(|| self.end_caret(root));
        let at = if range.is_collapsed() {
            range.start
        } else {
            self.dom.delete_range_contents(&range)
        };

        let node = self.dom.create_text(text);
        self.dom.insert_at(at, node);
        self.dom
            .set_selection(DomRange::caret(DomPosition::new(node, char_len(text))));

        let result = self.handle_input();
        self.handle_selection_change();
        result
    }

    /// Sync the controller with the document selection and notify plugins
    pub fn handle_selection_change(&mut self) -> Option<SelectionRange> {
        let root = self.root?;
        let selection = self.controller.sync_selection(&self.dom, root);
        self.broadcast(Hook::SelectionChange(selection));
        self.refresh_active_formats();
        selection
    }

    /// Handle a key press; returns whether the default action should be
    /// prevented. Plugin shortcuts are consulted before the keymap.
    pub fn handle_key_down(&mut self, event: &KeyEvent) -> bool {
        if self.root.is_none() {
            return false;
        }

        let shortcut = self.plugins.all_plugins().iter().find_map(|plugin| {
            plugin
                .keyboard_shortcuts
                .iter()
                .find(|s| s.matches(event))
                .map(|s| (plugin.id.clone(), ActionFn::clone(&s.action), s.prevent_default))
        });
        if let Some((plugin_id, action, prevent_default)) = shortcut {
            self.run_action(&plugin_id, "onShortcut", action);
            return prevent_default;
        }

        let context = KeyContext {
            toolbar_enabled: self.config.toolbar.show,
            read_only: self.is_read_only(),
            has_selection: self.selection().is_some_and(|s| !s.is_empty()),
        };
        let Some(command) = self.keymap.lookup_event(event, &context) else {
            return false;
        };
        if command.is_edit() && self.is_read_only() {
            tracing::debug!(%command, "Shortcut ignored: editor is read-only");
            return false;
        }

        tracing::debug!(%command, key = %event, "shortcut");
        match command {
            Command::Undo => {
                self.undo();
            }
            Command::Redo => {
                self.redo();
            }
            other => {
                let Some(tool) = other.tool() else {
                    return false;
                };
                // Failures are already reported through on_error
                let _ = self.apply_tool(tool, None);
            }
        }
        true
    }

    /// Apply a toolbar tool to the selection.
    ///
    /// `value` overrides the tool's fixed command value; for link and image
    /// it is the URL, and when absent the URL prompt is asked.
    pub fn apply_tool(
        &mut self,
        tool: ToolbarTool,
        value: Option<&str>,
    ) -> Result<bool, EditorError> {
        if self.root.is_none() || tool.is_separator() {
            return Ok(false);
        }
        if self.is_read_only() {
            return self.fail(EditorError::ReadOnly);
        }

        let changed = match tool {
            ToolbarTool::Link | ToolbarTool::Image => {
                let url = match value {
                    Some(v) => Some(v.to_string()),
                    None => self.prompt_url.as_mut().and_then(|prompt| prompt(tool)),
                };
                let Some(url) = url.filter(|u| !u.trim().is_empty()) else {
                    tracing::debug!(tool = %tool, "No URL given");
                    return Ok(false);
                };
                if self.selection_in_root().is_none() {
                    return self.fail(FormatError::NoSelection(tool).into());
                }
                if tool == ToolbarTool::Link {
                    format::insert_link(&mut self.dom, &url, None)
                } else {
                    format::insert_image(&mut self.dom, &url, None)
                }
            }
            _ => match format::try_execute(self.backend.get_mut(), &mut self.dom, tool, value) {
                Ok(changed) => changed,
                Err(e) => {
                    tracing::warn!(tool = %tool, "{}", e);
                    return self.fail(e.into());
                }
            },
        };

        if changed {
            // Reported through on_error; the format itself was applied
            let _ = self.handle_input();
            self.defer(DeferredTask::SyncSelection);
            self.defer(DeferredTask::RefreshActiveFormats);
        }
        Ok(changed)
    }

    /// Issue a raw rich-text command, as plugins do through their context
    pub fn format_selection(
        &mut self,
        command: &str,
        value: Option<&str>,
    ) -> Result<bool, EditorError> {
        if self.root.is_none() {
            return Ok(false);
        }
        if self.is_read_only() {
            return self.fail(EditorError::ReadOnly);
        }

        match self.backend.get_mut().exec_command(&mut self.dom, command, value) {
            Ok(changed) => {
                if changed {
                    let _ = self.handle_input();
                    self.defer(DeferredTask::RefreshActiveFormats);
                }
                Ok(changed)
            }
            Err(source) => {
                tracing::warn!(command, "Failed to execute command: {:#}", source);
                self.fail(EditorError::Command {
                    command: command.to_string(),
                    source,
                })
            }
        }
    }

    /// Insert markup at the selection, replacing selected content, and
    /// leave the caret after it
    pub fn insert_content(&mut self, markup: &str) -> Result<(), EditorError> {
        let Some(root) = self.root else {
            return Ok(());
        };
        if self.is_read_only() {
            return self.fail(EditorError::ReadOnly);
        }

        let holder = self.dom.create_element("div");
        if let Err(e) = self.dom.set_inner_html(holder, markup) {
            return self.fail(EditorError::Markup(e));
        }

        // Without a selection the fragment goes after the last child
        let at = match self.selection_in_root() {
            Some(range) if range.is_collapsed() => range.start,
            Some(range) => self.dom.delete_range_contents(&range),
            None => DomPosition::new(root, self.dom.children(root).len()),
        };

        let caret = offset::text_offset(&self.dom, root, at)
            + char_len(&self.dom.text_content(holder));

        let nodes = self.dom.children(holder).to_vec();
        let mut previous: Option<NodeId> = None;
        for node in nodes {
            self.dom.detach(node);
            match previous {
                Some(prev) => self.dom.insert_after(prev, node),
                None => self.dom.insert_at(at, node),
            }
            previous = Some(node);
        }
        offset::select_offsets(&mut self.dom, root, SelectionRange::caret(caret));

        let result = self.handle_input();
        self.handle_selection_change();
        result
    }

    // =========================================================================
    // Deferred work
    // =========================================================================

    pub fn pending_tasks(&self) -> usize {
        self.deferred.len()
    }

    /// Run queued tasks; returns how many ran. After unmount the queue is
    /// discarded instead.
    pub fn flush_deferred(&mut self) -> usize {
        let tasks: Vec<DeferredTask> = self.deferred.drain(..).collect();
        if self.root.is_none() {
            if !tasks.is_empty() {
                tracing::debug!("Dropping {} deferred tasks after unmount", tasks.len());
            }
            return 0;
        }

        for task in &tasks {
            match task {
                DeferredTask::RefreshActiveFormats => self.refresh_active_formats(),
                DeferredTask::SyncSelection => {
                    self.handle_selection_change();
                }
            }
        }
        tasks.len()
    }

    fn defer(&mut self, task: DeferredTask) {
        if !self.deferred.contains(&task) {
            self.deferred.push_back(task);
        }
    }

    // =========================================================================
    // View model
    // =========================================================================

    /// Toolbar entries: configured tools, then plugin buttons
    pub fn toolbar(&self) -> Vec<ToolbarItem> {
        if !self.config.toolbar.show {
            return Vec::new();
        }
        let disabled = self.is_read_only();

        let mut items: Vec<ToolbarItem> = self
            .config
            .toolbar
            .tools
            .iter()
            .map(|&tool| {
                if tool.is_separator() {
                    ToolbarItem::Separator
                } else {
                    ToolbarItem::Tool {
                        tool,
                        label: tool.label(),
                        icon: tool.icon(),
                        active: self.active_formats.contains(&tool),
                        disabled,
                    }
                }
            })
            .collect();

        let buttons = self.plugins.toolbar_buttons();
        if !buttons.is_empty() {
            let context = self.snapshot_context();
            items.push(ToolbarItem::Separator);
            items.extend(buttons.iter().map(|button| ToolbarItem::Plugin {
                id: button.id.clone(),
                label: button.label.clone(),
                icon: button.icon.clone(),
                title: button.title().to_string(),
                active: button.is_active.as_ref().is_some_and(|f| f(&context)),
                disabled,
            }));
        }
        items
    }

    /// Context-menu items whose visibility predicate holds
    pub fn context_menu(&self) -> Vec<MenuEntry> {
        let context = self.snapshot_context();
        self.plugins
            .context_menu_items()
            .into_iter()
            .filter(|item| item.is_visible(&context))
            .map(|item| MenuEntry {
                id: item.id,
                label: item.label,
                icon: item.icon,
                separator: item.separator,
            })
            .collect()
    }

    pub fn panels(&self) -> Vec<RenderedPanel> {
        let context = self.snapshot_context();
        self.plugins
            .panels()
            .into_iter()
            .map(|panel| RenderedPanel {
                html: (panel.render)(&context),
                id: panel.id,
                title: panel.title,
                icon: panel.icon,
                position: panel.position,
                default_open: panel.default_open,
            })
            .collect()
    }

    /// Whitespace-only content counts as empty
    pub fn is_empty(&self) -> bool {
        self.plain_text().trim().is_empty()
    }

    /// Placeholder to show, if the editor is empty and one is configured
    pub fn placeholder(&self) -> Option<&str> {
        (self.is_empty() && !self.config.placeholder.is_empty())
            .then_some(self.config.placeholder.as_str())
    }

    /// CSS classes for the editor container
    pub fn class_names(&self) -> Vec<String> {
        let mut classes = vec![
            "lilac-editor".to_string(),
            format!("lilac-editor--{}", self.config.theme.name()),
        ];
        if self.is_read_only() {
            classes.push("lilac-editor--readonly".to_string());
        }
        if self.is_empty() {
            classes.push("lilac-editor--empty".to_string());
        }
        if let Some(extra) = self.config.class_name.as_deref().filter(|c| !c.is_empty()) {
            classes.push(extra.to_string());
        }
        classes
    }

    /// Length of the text, in characters
    pub fn char_count(&self) -> usize {
        char_len(&self.plain_text())
    }

    /// `count/max`, shown only when a maximum length is configured
    pub fn char_counter(&self) -> Option<String> {
        self.config
            .max_length
            .map(|max| format!("{}/{}", self.char_count(), max))
    }

    /// Plugin stylesheets, in injection order
    pub fn stylesheet(&self) -> String {
        self.plugins.styles().borrow().stylesheet()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn plain_text(&self) -> String {
        match self.config.content_mode {
            ContentMode::PlainText => self.content().to_string(),
            ContentMode::Markup => strip_tags(self.content()),
        }
    }

    fn read_content(&self, root: NodeId) -> String {
        match self.config.content_mode {
            ContentMode::PlainText => self.dom.text_content(root),
            ContentMode::Markup => self.dom.inner_html(root),
        }
    }

    /// Write the controller's content into the root, keeping the caret at
    /// the same linear offset if it was inside the editor
    fn render_content(&mut self) {
        let Some(root) = self.root else {
            return;
        };
        let had_selection = self.selection_in_root().is_some();
        let content = self.controller.content().to_string();

        match self.config.content_mode {
            ContentMode::PlainText => self.dom.set_text_content(root, &content),
            ContentMode::Markup => {
                if let Err(e) = self.dom.set_inner_html(root, &content) {
                    tracing::warn!("Invalid markup, rendering as text: {}", e);
                    self.dom.set_text_content(root, &content);
                    self.report(&EditorError::Markup(e));
                }
            }
        }

        if had_selection {
            match self.controller.selection() {
                Some(selection) => offset::select_offsets(&mut self.dom, root, selection),
                None => self.dom.remove_all_ranges(),
            }
        }
    }

    /// Plugins see the restored content, but cannot rewrite it from their
    /// change hook: that would push a new entry and clear the redo stack.
    fn history_restored(&mut self) {
        self.render_content();
        self.restoring_history = true;
        self.content_changed();
        self.restoring_history = false;
    }

    fn content_changed(&mut self) {
        let content = self.controller.content().to_string();
        self.broadcast(Hook::ContentChange(&content));
    }

    fn refresh_active_formats(&mut self) {
        self.active_formats = if self.selection_in_root().is_some() {
            format::active_formats(self.backend.get(), &self.dom, &self.config.toolbar.tools)
        } else {
            BTreeSet::new()
        };
    }

    fn selection_in_root(&self) -> Option<DomRange> {
        let root = self.root?;
        let range = *self.dom.selection()?;
        self.dom
            .contains(root, self.dom.common_ancestor(&range))
            .then_some(range)
    }

    fn end_caret(&self, root: NodeId) -> DomRange {
        DomRange::caret(offset::position_at_offset(&self.dom, root, usize::MAX))
    }

    fn snapshot_context(&self) -> EditorContext {
        EditorContext::new(
            StateView::from(self.controller.state()),
            self.root,
            self.selected_text(),
        )
    }

    /// Hand plugins a fresh context; only while mounted
    fn refresh_context(&mut self) {
        if self.root.is_some() {
            let context = self.snapshot_context();
            self.plugins.set_context(context);
        }
    }

    fn broadcast(&mut self, hook: Hook<'_>) {
        if self.root.is_none() {
            return;
        }
        self.refresh_context();
        for failure in self.plugins.execute_hook(hook) {
            self.report(&EditorError::Hook(failure));
        }
        self.drain_requests();
    }

    /// Apply whatever plugins queued on the current context
    fn drain_requests(&mut self) {
        let requests = match self.plugins.context() {
            Some(context) if context.has_requests() => context.take_requests(),
            _ => return,
        };
        if self.request_depth >= MAX_REQUEST_DEPTH {
            tracing::warn!(
                dropped = requests.len(),
                "Plugin requests nested too deeply, dropping"
            );
            return;
        }

        self.request_depth += 1;
        for request in requests {
            self.apply_request(request);
        }
        self.request_depth -= 1;
    }

    fn apply_request(&mut self, request: ContextRequest) {
        tracing::trace!(?request, "applying plugin request");
        match request {
            ContextRequest::SetState(patch) => self.apply_patch(patch),
            ContextRequest::Focus => self.focus(),
            ContextRequest::Blur => self.blur(),
            // Errors from requests go to on_error only
            ContextRequest::InsertContent(_) if self.restoring_history => {
                tracing::debug!("Ignoring plugin insertion during undo/redo");
            }
            ContextRequest::InsertContent(markup) => {
                let _ = self.insert_content(&markup);
            }
            ContextRequest::FormatSelection { command, value } => {
                let _ = self.format_selection(&command, value.as_deref());
            }
        }
    }

    fn apply_patch(&mut self, patch: StatePatch) {
        if let Some(read_only) = patch.is_read_only {
            self.set_read_only(read_only);
        }
        match patch.content {
            Some(_) if self.restoring_history => {
                tracing::debug!("Ignoring plugin content patch during undo/redo");
            }
            Some(content) => self.set_content(&content),
            None => {}
        }
        if let Some(selection) = patch.selection {
            self.set_selection(selection);
        }
    }

    fn report(&mut self, error: &EditorError) {
        if let Some(callback) = self.on_error.as_mut() {
            callback(error);
        }
    }

    fn fail<T>(&mut self, error: EditorError) -> Result<T, EditorError> {
        self.report(&error);
        Err(error)
    }
}

fn editable_attr(read_only: bool) -> &'static str {
    if read_only {
        "false"
    } else {
        "true"
    }
}
