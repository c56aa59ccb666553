//! Plugin registry and hook dispatcher
//!
//! The manager is owned by whoever hosts the editor; there is no global
//! instance. Plugins are kept in installation order, and every broadcast,
//! aggregation and transform walks them in that order.

use std::panic::{self, AssertUnwindSafe};

use super::context::EditorContext;
use super::styles::{SharedStyles, StyleRegistry};
use super::types::{
    ContextMenuItem, ContentTransformer, EditorPanel, EditorPlugin, Hook, KeyboardShortcut,
    ToolbarButton,
};
use crate::error::{HookFailure, PluginError};

#[derive(Debug)]
pub struct PluginManager {
    plugins: Vec<EditorPlugin>,
    context: Option<EditorContext>,
    styles: SharedStyles,
}

impl Default for PluginManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginManager {
    pub fn new() -> Self {
        Self::with_styles(StyleRegistry::shared())
    }

    /// Create a manager injecting into an existing (possibly shared) style registry
    pub fn with_styles(styles: SharedStyles) -> Self {
        Self {
            plugins: Vec::new(),
            context: None,
            styles,
        }
    }

    pub fn styles(&self) -> SharedStyles {
        SharedStyles::clone(&self.styles)
    }

    /// Replace the context handed to hooks, transformers and actions
    pub fn set_context(&mut self, context: EditorContext) {
        self.context = Some(context);
    }

    pub fn clear_context(&mut self) {
        self.context = None;
    }

    pub fn context(&self) -> Option<&EditorContext> {
        self.context.as_ref()
    }

    /// Register a plugin, inject its styles and run its install hook.
    ///
    /// A duplicate id is rejected and leaves the registry untouched. An
    /// install hook failure is reported, but the plugin stays installed.
    pub fn install(&mut self, plugin: EditorPlugin) -> Result<(), PluginError> {
        if self.is_installed(&plugin.id) {
            tracing::warn!("Plugin {} is already installed", plugin.id);
            return Err(PluginError::AlreadyInstalled(plugin.id));
        }

        if let Some(styles) = plugin.styles.as_deref() {
            self.styles.borrow_mut().inject(&plugin.id, styles);
        }

        let failure = match (&plugin.on_install, &self.context) {
            (Some(hook), Some(context)) => {
                run_guarded(&plugin.id, Hook::Install.name(), || hook(context)).err()
            }
            _ => None,
        };

        tracing::info!("Plugin {} ({}) installed successfully", plugin.id, plugin.name);
        self.plugins.push(plugin);

        match failure {
            Some(failure) => Err(PluginError::Hook(failure)),
            None => Ok(()),
        }
    }

    /// Run the uninstall hook, remove styles and drop the plugin.
    ///
    /// The plugin is removed even when its uninstall hook fails.
    pub fn uninstall(&mut self, plugin_id: &str) -> Result<(), PluginError> {
        let Some(index) = self.plugins.iter().position(|p| p.id == plugin_id) else {
            tracing::warn!("Plugin {} is not installed", plugin_id);
            return Err(PluginError::NotInstalled(plugin_id.to_string()));
        };

        let failure = match (&self.plugins[index].on_uninstall, &self.context) {
            (Some(hook), Some(context)) => {
                run_guarded(plugin_id, Hook::Uninstall.name(), || hook(context)).err()
            }
            _ => None,
        };

        self.styles.borrow_mut().remove(plugin_id);
        self.plugins.remove(index);
        tracing::info!("Plugin {} uninstalled successfully", plugin_id);

        match failure {
            Some(failure) => Err(PluginError::Hook(failure)),
            None => Ok(()),
        }
    }

    pub fn get_plugin(&self, plugin_id: &str) -> Option<&EditorPlugin> {
        self.plugins.iter().find(|p| p.id == plugin_id)
    }

    /// All plugins in installation order
    pub fn all_plugins(&self) -> &[EditorPlugin] {
        &self.plugins
    }

    pub fn is_installed(&self, plugin_id: &str) -> bool {
        self.get_plugin(plugin_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Invoke `hook` on every plugin that defines it.
    ///
    /// Does nothing without a context. Each plugin runs in isolation: an
    /// error or panic is logged and collected, and the broadcast continues.
    pub fn execute_hook(&self, hook: Hook<'_>) -> Vec<HookFailure> {
        let Some(context) = self.context.as_ref() else {
            return Vec::new();
        };

        let name = hook.name();
        let mut failures = Vec::new();
        for plugin in &self.plugins {
            let result = match hook {
                Hook::Install => plugin
                    .on_install
                    .as_ref()
                    .map(|f| run_guarded(&plugin.id, name, || f(context))),
                Hook::Uninstall => plugin
                    .on_uninstall
                    .as_ref()
                    .map(|f| run_guarded(&plugin.id, name, || f(context))),
                Hook::EditorMount => plugin
                    .on_editor_mount
                    .as_ref()
                    .map(|f| run_guarded(&plugin.id, name, || f(context))),
                Hook::EditorUnmount => plugin
                    .on_editor_unmount
                    .as_ref()
                    .map(|f| run_guarded(&plugin.id, name, || f(context))),
                Hook::ContentChange(content) => plugin
                    .on_content_change
                    .as_ref()
                    .map(|f| run_guarded(&plugin.id, name, || f(content, context))),
                Hook::SelectionChange(selection) => plugin
                    .on_selection_change
                    .as_ref()
                    .map(|f| run_guarded(&plugin.id, name, || f(selection, context))),
            };

            if let Some(Err(failure)) = result {
                failures.push(failure);
            }
        }
        failures
    }

    /// Toolbar buttons of all plugins, in installation then declaration order
    pub fn toolbar_buttons(&self) -> Vec<ToolbarButton> {
        self.plugins
            .iter()
            .flat_map(|p| p.toolbar_buttons.iter().cloned())
            .collect()
    }

    pub fn context_menu_items(&self) -> Vec<ContextMenuItem> {
        self.plugins
            .iter()
            .flat_map(|p| p.context_menu_items.iter().cloned())
            .collect()
    }

    pub fn keyboard_shortcuts(&self) -> Vec<KeyboardShortcut> {
        self.plugins
            .iter()
            .flat_map(|p| p.keyboard_shortcuts.iter().cloned())
            .collect()
    }

    pub fn panels(&self) -> Vec<EditorPanel> {
        self.plugins
            .iter()
            .flat_map(|p| p.panels.iter().cloned())
            .collect()
    }

    fn transformers(&self) -> impl DoubleEndedIterator<Item = &ContentTransformer> {
        self.plugins.iter().flat_map(|p| p.content_transformers.iter())
    }

    /// Fold every transformer over `content`, left to right.
    ///
    /// Without a context the content is returned unchanged.
    pub fn transform_content(&self, content: &str) -> String {
        let Some(context) = self.context.as_ref() else {
            return content.to_string();
        };
        self.transformers()
            .fold(content.to_string(), |acc, t| (t.transform)(&acc, context))
    }

    /// Undo [`transform_content`](Self::transform_content): apply each
    /// transformer's `reverse` in reverse order, skipping those without one.
    pub fn reverse_transform_content(&self, content: &str) -> String {
        let Some(context) = self.context.as_ref() else {
            return content.to_string();
        };
        self.transformers()
            .rev()
            .filter_map(|t| t.reverse.as_ref())
            .fold(content.to_string(), |acc, reverse| reverse(&acc, context))
    }
}

/// Run plugin code, turning both `Err` and panics into a logged [`HookFailure`]
pub(crate) fn run_guarded(
    plugin_id: &str,
    hook: &'static str,
    f: impl FnOnce() -> anyhow::Result<()>,
) -> Result<(), HookFailure> {
    let message = match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(())) => return Ok(()),
        Ok(Err(err)) => format!("{:#}", err),
        Err(payload) => panic_message(payload.as_ref()),
    };

    tracing::error!(plugin = plugin_id, hook, "Error executing hook: {}", message);
    Err(HookFailure {
        plugin_id: plugin_id.to_string(),
        hook,
        message,
    })
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {}", s)
    } else {
        "panicked".to_string()
    }
}
