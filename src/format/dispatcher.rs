//! Format Command Dispatcher
//!
//! Turns a [`ToolbarTool`] into a backend command, and answers "is this
//! tool active at the selection" for toolbar highlighting. Backend failures
//! never escape `execute`/`is_active`; `try_execute` exposes them.

use std::collections::BTreeSet;

use super::backend::RichTextBackend;
use super::tool::{ToolAction, ToolbarTool};
use crate::dom::Dom;
use crate::error::FormatError;

/// Apply `tool` to the selection, reporting backend failures as errors.
///
/// `value` overrides the tool's fixed command value when given.
pub fn try_execute(
    backend: &mut dyn RichTextBackend,
    dom: &mut Dom,
    tool: ToolbarTool,
    value: Option<&str>,
) -> Result<bool, FormatError> {
    let command = match tool.action() {
        ToolAction::Command(command) => command,
        ToolAction::Custom | ToolAction::None => return Err(FormatError::NoCommand(tool)),
    };

    let value = value.filter(|v| !v.is_empty()).or(command.value);
    backend
        .exec_command(dom, command.command, value)
        .map_err(|source| FormatError::Backend { tool, source })
}

/// Apply `tool` to the selection; any failure is logged and reported as `false`
pub fn execute(
    backend: &mut dyn RichTextBackend,
    dom: &mut Dom,
    tool: ToolbarTool,
    value: Option<&str>,
) -> bool {
    match try_execute(backend, dom, tool, value) {
        Ok(applied) => applied,
        Err(FormatError::NoCommand(_)) => false,
        Err(err) => {
            tracing::warn!(tool = %tool, "{}", err);
            false
        }
    }
}

/// Whether `tool`'s formatting is in effect at the selection.
///
/// Block tools compare the reported block format case-insensitively; toggle
/// tools ask the backend directly. Errors count as inactive.
pub fn is_active(backend: &dyn RichTextBackend, dom: &Dom, tool: ToolbarTool) -> bool {
    let Some(command) = tool.command() else {
        return false;
    };

    let result = if command.is_block() {
        backend
            .query_command_value(dom, command.command)
            .map(|current| {
                command
                    .value
                    .is_some_and(|expected| current.eq_ignore_ascii_case(expected))
            })
    } else {
        backend.query_command_state(dom, command.command)
    };

    result.unwrap_or_else(|err| {
        tracing::warn!(tool = %tool, "failed to query format state: {}", err);
        false
    })
}

/// The subset of `tools` active at the selection; separators never are
pub fn active_formats(
    backend: &dyn RichTextBackend,
    dom: &Dom,
    tools: &[ToolbarTool],
) -> BTreeSet<ToolbarTool> {
    tools
        .iter()
        .copied()
        .filter(|tool| !tool.is_separator() && is_active(backend, dom, *tool))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    /// Records calls and answers from fixed tables
    #[derive(Default)]
    struct FakeBackend {
        calls: RefCell<Vec<(String, Option<String>)>>,
        active: Vec<&'static str>,
        block: &'static str,
        fail: bool,
    }

    impl RichTextBackend for FakeBackend {
        fn exec_command(
            &mut self,
            _dom: &mut Dom,
            command: &str,
            value: Option<&str>,
        ) -> anyhow::Result<bool> {
            self.calls
                .borrow_mut()
                .push((command.to_string(), value.map(str::to_string)));
            if self.fail {
                anyhow::bail!("boom");
            }
            Ok(true)
        }

        fn query_command_state(&self, _dom: &Dom, command: &str) -> anyhow::Result<bool> {
            if self.fail {
                anyhow::bail!("boom");
            }
            Ok(self.active.contains(&command))
        }

        fn query_command_value(&self, _dom: &Dom, _command: &str) -> anyhow::Result<String> {
            Ok(self.block.to_string())
        }
    }

    #[test]
    fn test_execute_passes_fixed_value() {
        let mut backend = FakeBackend::default();
        let mut dom = Dom::new();
        assert!(execute(&mut backend, &mut dom, ToolbarTool::Heading1, None));
        assert!(execute(&mut backend, &mut dom, ToolbarTool::Heading1, Some("h4")));
        assert_eq!(
            *backend.calls.borrow(),
            vec![
                ("formatBlock".to_string(), Some("h1".to_string())),
                ("formatBlock".to_string(), Some("h4".to_string())),
            ]
        );
    }

    #[test]
    fn test_execute_without_command_is_false() {
        let mut backend = FakeBackend::default();
        let mut dom = Dom::new();
        assert!(!execute(&mut backend, &mut dom, ToolbarTool::Link, None));
        assert!(!execute(&mut backend, &mut dom, ToolbarTool::Separator, None));
        assert!(matches!(
            try_execute(&mut backend, &mut dom, ToolbarTool::Image, None),
            Err(FormatError::NoCommand(ToolbarTool::Image))
        ));
        assert!(backend.calls.borrow().is_empty());
    }

    #[test]
    fn test_backend_failure_becomes_false() {
        let mut backend = FakeBackend {
            fail: true,
            ..Default::default()
        };
        let mut dom = Dom::new();
        assert!(!execute(&mut backend, &mut dom, ToolbarTool::Bold, None));
        assert!(matches!(
            try_execute(&mut backend, &mut dom, ToolbarTool::Bold, None),
            Err(FormatError::Backend { tool: ToolbarTool::Bold, .. })
        ));
        assert!(!is_active(&backend, &dom, ToolbarTool::Bold));
    }

    #[test]
    fn test_block_query_is_case_insensitive() {
        let backend = FakeBackend {
            block: "H2",
            ..Default::default()
        };
        let dom = Dom::new();
        assert!(is_active(&backend, &dom, ToolbarTool::Heading2));
        assert!(!is_active(&backend, &dom, ToolbarTool::Heading1));
    }

    #[test]
    fn test_active_formats_excludes_separator() {
        let backend = FakeBackend {
            active: vec!["bold", "underline"],
            block: "p",
            ..Default::default()
        };
        let dom = Dom::new();
        let tools = [
            ToolbarTool::Bold,
            ToolbarTool::Separator,
            ToolbarTool::Italic,
            ToolbarTool::Paragraph,
            ToolbarTool::Underline,
        ];
        let active = active_formats(&backend, &dom, &tools);
        assert_eq!(
            active.into_iter().collect::<Vec<_>>(),
            vec![ToolbarTool::Bold, ToolbarTool::Underline, ToolbarTool::Paragraph]
        );
    }
}
