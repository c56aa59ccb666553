//! The rich-text mutation primitive the dispatcher drives

use crate::dom::Dom;

/// A command-style rich-text engine acting on the document selection.
///
/// Implementations return `Ok(false)` when a command applies but changes
/// nothing (no selection, selection outside the editable root) and `Err`
/// when the command itself is unsupported or fails.
pub trait RichTextBackend {
    /// Apply `command` to the current selection
    fn exec_command(
        &mut self,
        dom: &mut Dom,
        command: &str,
        value: Option<&str>,
    ) -> anyhow::Result<bool>;

    /// Whether a toggle-style command is in effect at the selection
    fn query_command_state(&self, dom: &Dom, command: &str) -> anyhow::Result<bool>;

    /// Current value of a value-style command (the block tag for `formatBlock`)
    fn query_command_value(&self, dom: &Dom, command: &str) -> anyhow::Result<String>;
}
