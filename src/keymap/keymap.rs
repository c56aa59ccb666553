//! Keymap lookup

use std::collections::HashMap;

use super::binding::Keybinding;
use super::command::Command;
use super::context::KeyContext;
use super::event::KeyEvent;
use super::types::Keystroke;

#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: Vec<Keybinding>,
    /// Indices into `bindings`; one keystroke may carry several bindings
    /// with different conditions
    by_keystroke: HashMap<Keystroke, Vec<usize>>,
}

impl Keymap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bindings(bindings: Vec<Keybinding>) -> Self {
        let mut keymap = Self::new();
        for binding in bindings {
            keymap.add_binding(binding);
        }
        keymap
    }

    pub fn add_binding(&mut self, binding: Keybinding) {
        let idx = self.bindings.len();
        self.by_keystroke
            .entry(binding.keystroke)
            .or_default()
            .push(idx);
        self.bindings.push(binding);
    }

    /// Look up a keystroke, ignoring conditional bindings
    pub fn lookup(&self, keystroke: &Keystroke) -> Option<Command> {
        self.lookup_with_context(keystroke, None)
    }

    /// Look up a keystroke. Conditional bindings whose conditions hold win
    /// over unconditional ones; within each group the first added wins.
    pub fn lookup_with_context(
        &self,
        keystroke: &Keystroke,
        context: Option<&KeyContext>,
    ) -> Option<Command> {
        let indices = self.by_keystroke.get(keystroke)?;
        let candidates = || indices.iter().map(|&idx| &self.bindings[idx]);

        candidates()
            .find(|b| b.is_conditional() && b.is_active(context))
            .or_else(|| candidates().find(|b| !b.is_conditional()))
            .map(|b| b.command)
            .filter(|command| *command != Command::Unbound)
    }

    /// Resolve a host key event. Ctrl and Meta stand in for each other
    /// when the exact keystroke is unbound, so Cmd+Z and Ctrl+Z both undo
    /// on every platform.
    pub fn lookup_event(&self, event: &KeyEvent, context: &KeyContext) -> Option<Command> {
        let keystroke = event.keystroke()?;
        self.lookup_with_context(&keystroke, Some(context))
            .or_else(|| {
                let mods = keystroke.mods.swap_ctrl_meta()?;
                self.lookup_with_context(&Keystroke::new(keystroke.key, mods), Some(context))
            })
    }

    pub fn bindings(&self) -> &[Keybinding] {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// First binding for a command
    pub fn binding_for(&self, command: Command) -> Option<&Keybinding> {
        self.bindings.iter().find(|b| b.command == command)
    }

    /// Display string for a command's first binding, for tooltips
    pub fn display_for(&self, command: Command) -> Option<String> {
        self.binding_for(command).map(|b| b.display_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::context::Condition;
    use crate::keymap::types::{KeyCode, Modifiers};

    fn ctrl(c: char) -> Keystroke {
        Keystroke::new(KeyCode::Char(c), Modifiers::CTRL)
    }

    #[test]
    fn test_lookup() {
        let keymap = Keymap::with_bindings(vec![Keybinding::new(ctrl('z'), Command::Undo)]);
        assert_eq!(keymap.lookup(&ctrl('z')), Some(Command::Undo));
        assert_eq!(keymap.lookup(&ctrl('y')), None);
    }

    #[test]
    fn test_conditional_preferred_over_unconditional() {
        let keymap = Keymap::with_bindings(vec![
            Keybinding::new(ctrl('b'), Command::Undo),
            Keybinding::new(ctrl('b'), Command::Bold).when_single(Condition::ToolbarEnabled),
        ]);

        let toolbar = KeyContext::editing();
        assert_eq!(keymap.lookup_with_context(&ctrl('b'), Some(&toolbar)), Some(Command::Bold));
        assert_eq!(
            keymap.lookup_with_context(&ctrl('b'), Some(&KeyContext::default())),
            Some(Command::Undo)
        );
        assert_eq!(keymap.lookup(&ctrl('b')), Some(Command::Undo));
    }

    #[test]
    fn test_conditional_only_binding_skipped_without_match() {
        let keymap = Keymap::with_bindings(vec![
            Keybinding::new(ctrl('k'), Command::InsertLink).when_single(Condition::ToolbarEnabled)
        ]);
        assert_eq!(keymap.lookup(&ctrl('k')), None);
        assert_eq!(
            keymap.lookup_with_context(&ctrl('k'), Some(&KeyContext::default())),
            None
        );
    }

    #[test]
    fn test_lookup_event() {
        let keymap = Keymap::with_bindings(vec![Keybinding::new(
            Keystroke::new(KeyCode::Char('z'), Modifiers::CTRL | Modifiers::SHIFT),
            Command::Redo,
        )]);
        let event = KeyEvent::new("Z").with_ctrl().with_shift();
        assert_eq!(keymap.lookup_event(&event, &KeyContext::editing()), Some(Command::Redo));
        assert_eq!(
            keymap.lookup_event(&KeyEvent::new("z").with_ctrl(), &KeyContext::editing()),
            None
        );
    }

    #[test]
    fn test_display_for_command() {
        let keymap = Keymap::with_bindings(vec![Keybinding::new(ctrl('y'), Command::Redo)]);
        let display = keymap.display_for(Command::Redo).unwrap();
        assert!(display.ends_with('Y'));
        assert!(keymap.display_for(Command::Bold).is_none());
    }
}
