//! A keystroke bound to a command

use super::command::Command;
use super::context::{Condition, KeyContext};
use super::types::Keystroke;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybinding {
    pub keystroke: Keystroke,
    pub command: Command,
    /// Conditions that must all hold for the binding to fire
    pub when: Option<Vec<Condition>>,
}

impl Keybinding {
    pub fn new(keystroke: Keystroke, command: Command) -> Self {
        Self {
            keystroke,
            command,
            when: None,
        }
    }

    pub fn when(mut self, conditions: Vec<Condition>) -> Self {
        self.when = Some(conditions);
        self
    }

    pub fn when_single(mut self, condition: Condition) -> Self {
        self.when = Some(vec![condition]);
        self
    }

    pub fn is_conditional(&self) -> bool {
        self.when.is_some()
    }

    /// Unconditional bindings are always active; conditional ones need a
    /// context satisfying every condition
    pub fn is_active(&self, context: Option<&KeyContext>) -> bool {
        match (&self.when, context) {
            (None, _) => true,
            (Some(conditions), Some(ctx)) => Condition::evaluate_all(conditions, ctx),
            (Some(_), None) => false,
        }
    }

    pub fn display_string(&self) -> String {
        self.keystroke.display_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::types::Modifiers;

    #[test]
    fn test_conditional_binding_needs_context() {
        let binding = Keybinding::new(Keystroke::char_with_mods('b', Modifiers::CTRL), Command::Bold)
            .when_single(Condition::ToolbarEnabled);

        assert!(binding.is_conditional());
        assert!(!binding.is_active(None));
        assert!(!binding.is_active(Some(&KeyContext::default())));
        assert!(binding.is_active(Some(&KeyContext::editing())));
    }

    #[test]
    fn test_unconditional_binding_always_active() {
        let binding = Keybinding::new(Keystroke::char_with_mods('z', Modifiers::CTRL), Command::Undo);
        assert!(binding.is_active(None));
    }
}
