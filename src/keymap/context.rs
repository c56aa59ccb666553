//! Conditions attached to keybindings
//!
//! Formatting shortcuts only apply while the toolbar is shown, which is
//! expressed as a `when: [toolbar_enabled]` condition rather than being
//! special-cased in the editor.

use serde::Deserialize;

/// Editor facts a binding's conditions are evaluated against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyContext {
    pub toolbar_enabled: bool,
    pub read_only: bool,
    pub has_selection: bool,
}

impl KeyContext {
    /// An editable editor with the toolbar shown and nothing selected
    pub fn editing() -> Self {
        Self {
            toolbar_enabled: true,
            read_only: false,
            has_selection: false,
        }
    }
}

/// Multiple conditions on one binding are ANDed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    ToolbarEnabled,
    Editable,
    ReadOnly,
    HasSelection,
    NoSelection,
}

impl Condition {
    pub fn evaluate(self, ctx: &KeyContext) -> bool {
        match self {
            Condition::ToolbarEnabled => ctx.toolbar_enabled,
            Condition::Editable => !ctx.read_only,
            Condition::ReadOnly => ctx.read_only,
            Condition::HasSelection => ctx.has_selection,
            Condition::NoSelection => !ctx.has_selection,
        }
    }

    pub fn evaluate_all(conditions: &[Condition], ctx: &KeyContext) -> bool {
        conditions.iter().all(|c| c.evaluate(ctx))
    }
}
