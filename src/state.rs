//! Editor state and the controller that owns every mutation of it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dom::{Dom, NodeId};
use crate::history::HistoryStore;
use crate::offset;

/// Linear character offsets into the content, `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectionRange {
    pub start: usize,
    pub end: usize,
}

impl SelectionRange {
    /// Build a range from two offsets in either order
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// A collapsed range (caret)
    pub fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }
}

/// Complete editor state for one editing session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorState {
    pub content: String,
    /// `None` when the document selection is outside the editor
    pub selection: Option<SelectionRange>,
    #[serde(skip)]
    pub history: HistoryStore,
    pub is_read_only: bool,
}

impl EditorState {
    pub fn new(initial_content: impl Into<String>, max_history_size: usize) -> Self {
        Self {
            content: initial_content.into(),
            selection: None,
            history: HistoryStore::with_max_size(max_history_size),
            is_read_only: false,
        }
    }
}

pub type ChangeCallback = Box<dyn FnMut(&str)>;
pub type SelectionCallback = Box<dyn FnMut(Option<SelectionRange>)>;

/// Mediates all content, selection and read-only changes.
///
/// The change callback fires synchronously after every content update
/// (identical content included) and after every undo/redo that restored
/// something. Length validation is the caller's job.
pub struct EditorStateController {
    state: EditorState,
    on_change: Option<ChangeCallback>,
    on_selection_change: Option<SelectionCallback>,
}

impl fmt::Debug for EditorStateController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorStateController")
            .field("state", &self.state)
            .field("on_change", &self.on_change.is_some())
            .field("on_selection_change", &self.on_selection_change.is_some())
            .finish()
    }
}

impl EditorStateController {
    pub fn new(initial_content: impl Into<String>, max_history_size: usize) -> Self {
        Self {
            state: EditorState::new(initial_content, max_history_size),
            on_change: None,
            on_selection_change: None,
        }
    }

    /// Set the host's content change callback (builder pattern)
    pub fn with_on_change(mut self, callback: impl FnMut(&str) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Set the host's selection change callback (builder pattern)
    pub fn with_on_selection_change(
        mut self,
        callback: impl FnMut(Option<SelectionRange>) + 'static,
    ) -> Self {
        self.on_selection_change = Some(Box::new(callback));
        self
    }

    pub fn set_on_change(&mut self, callback: Option<ChangeCallback>) {
        self.on_change = callback;
    }

    pub fn set_on_selection_change(&mut self, callback: Option<SelectionCallback>) {
        self.on_selection_change = callback;
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn content(&self) -> &str {
        &self.state.content
    }

    pub fn selection(&self) -> Option<SelectionRange> {
        self.state.selection
    }

    pub fn is_read_only(&self) -> bool {
        self.state.is_read_only
    }

    pub fn history(&self) -> &HistoryStore {
        &self.state.history
    }

    pub fn can_undo(&self) -> bool {
        self.state.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.state.history.can_redo()
    }

    /// Replace the content, recording the current content first when
    /// `add_to_history` is set. Always notifies the change callback.
    pub fn update_content(&mut self, new_content: impl Into<String>, add_to_history: bool) {
        let new_content = new_content.into();
        if add_to_history {
            let previous = std::mem::replace(&mut self.state.content, new_content);
            self.state.history.push(previous);
        } else {
            self.state.content = new_content;
        }

        tracing::trace!(
            len = self.state.content.len(),
            undo = self.state.history.undo_count(),
            "content updated"
        );
        self.notify_change();
    }

    /// Restore the previous snapshot. Returns false (and stays silent) when
    /// there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.state.history.undo(&self.state.content) else {
            tracing::debug!("undo: history empty");
            return false;
        };
        self.state.content = previous;
        self.notify_change();
        true
    }

    /// Re-apply the last undone snapshot. Returns false when there is none.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.state.history.redo(&self.state.content) else {
            tracing::debug!("redo: nothing to redo");
            return false;
        };
        self.state.content = next;
        self.notify_change();
        true
    }

    pub fn update_selection(&mut self, selection: Option<SelectionRange>) {
        self.state.selection = selection;
        if let Some(callback) = self.on_selection_change.as_mut() {
            callback(selection);
        }
    }

    /// Start over with `content`: both history stacks are emptied and the
    /// selection is dropped. Notifies like any other content change.
    pub fn reset(&mut self, content: impl Into<String>) {
        self.state.content = content.into();
        self.state.history.clear();
        self.state.selection = None;
        tracing::debug!(len = self.state.content.len(), "history reset");
        self.notify_change();
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.state.is_read_only = read_only;
    }

    /// React to a document selection change.
    ///
    /// Clears the selection when the document has no range or the range's
    /// common ancestor lies outside `root`; otherwise stores the range as
    /// ordered linear offsets.
    pub fn sync_selection(&mut self, dom: &Dom, root: NodeId) -> Option<SelectionRange> {
        let selection = dom.selection().and_then(|range| {
            let ancestor = dom.common_ancestor(range);
            if !dom.contains(root, ancestor) {
                return None;
            }
            Some(offset::range_offsets(dom, root, range))
        });
        self.update_selection(selection);
        selection
    }

    fn notify_change(&mut self) {
        if let Some(callback) = self.on_change.as_mut() {
            callback(&self.state.content);
        }
    }
}
