//! Plugin system: the plugin record, the context plugins act through, the
//! style injection area, and the manager that dispatches hooks.

pub mod builtin;
mod context;
mod manager;
mod styles;
mod types;

pub use context::{ContextRequest, EditorContext, StatePatch, StateView};
pub use manager::PluginManager;
pub(crate) use manager::run_guarded;
pub use styles::{style_id, SharedStyles, StyleRegistry};
pub use types::{
    ActionFn, ContentHookFn, ContentTransformer, ContextMenuItem, EditorPanel, EditorPlugin, Hook,
    HookFn, KeyboardShortcut, PanelPosition, PredicateFn, RenderFn, SelectionHookFn,
    ToolbarButton, TransformFn,
};
