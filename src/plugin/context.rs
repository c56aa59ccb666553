//! What plugins see of the editor, and how they ask it to do things.
//!
//! A context is a snapshot taken by the editor before each hook broadcast or
//! plugin action. Plugins cannot mutate the editor directly; instead they
//! queue [`ContextRequest`]s which the editor drains and applies once the
//! plugin code has returned.

use std::cell::RefCell;

use serde::Serialize;

use crate::dom::NodeId;
use crate::state::{EditorState, SelectionRange};

/// Read-only view of the editor state at snapshot time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StateView {
    pub content: String,
    pub selection: Option<SelectionRange>,
    pub is_read_only: bool,
    pub can_undo: bool,
    pub can_redo: bool,
}

impl From<&EditorState> for StateView {
    fn from(state: &EditorState) -> Self {
        Self {
            content: state.content.clone(),
            selection: state.selection,
            is_read_only: state.is_read_only,
            can_undo: state.history.can_undo(),
            can_redo: state.history.can_redo(),
        }
    }
}

/// Partial state update; `None` fields are left alone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatePatch {
    pub content: Option<String>,
    pub selection: Option<Option<SelectionRange>>,
    pub is_read_only: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextRequest {
    SetState(StatePatch),
    Focus,
    Blur,
    InsertContent(String),
    FormatSelection {
        command: String,
        value: Option<String>,
    },
}

#[derive(Debug, Default)]
pub struct EditorContext {
    state: StateView,
    element: Option<NodeId>,
    selected_text: String,
    requests: RefCell<Vec<ContextRequest>>,
}

impl EditorContext {
    pub fn new(state: StateView, element: Option<NodeId>, selected_text: impl Into<String>) -> Self {
        Self {
            state,
            element,
            selected_text: selected_text.into(),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn state(&self) -> &StateView {
        &self.state
    }

    /// The editable root, `None` before mount or after unmount
    pub fn element(&self) -> Option<NodeId> {
        self.element
    }

    pub fn selected_text(&self) -> &str {
        &self.selected_text
    }

    pub fn set_state(&self, patch: StatePatch) {
        self.push(ContextRequest::SetState(patch));
    }

    pub fn focus(&self) {
        self.push(ContextRequest::Focus);
    }

    pub fn blur(&self) {
        self.push(ContextRequest::Blur);
    }

    /// Insert markup at the caret, replacing any selected content
    pub fn insert_content(&self, content: impl Into<String>) {
        self.push(ContextRequest::InsertContent(content.into()));
    }

    /// Issue a rich-text command against the current selection
    pub fn format_selection(&self, command: impl Into<String>, value: Option<&str>) {
        self.push(ContextRequest::FormatSelection {
            command: command.into(),
            value: value.map(str::to_string),
        });
    }

    pub fn has_requests(&self) -> bool {
        !self.requests.borrow().is_empty()
    }

    /// Remove and return queued requests in the order they were made
    pub fn take_requests(&self) -> Vec<ContextRequest> {
        std::mem::take(&mut *self.requests.borrow_mut())
    }

    fn push(&self, request: ContextRequest) {
        self.requests.borrow_mut().push(request);
    }
}
