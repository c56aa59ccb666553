//! Snapshot history (undo/redo) for editor content.
//!
//! Every entry is a full copy of the document content, not a diff.

/// Default bound on the undo stack
pub const DEFAULT_MAX_HISTORY_SIZE: usize = 50;

/// Linear undo/redo history over whole-content snapshots.
///
/// Only [`HistoryStore::push`] enforces `max_size`; moving entries between the
/// stacks through undo/redo never evicts anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryStore {
    undo_stack: Vec<String>,
    redo_stack: Vec<String>,
    max_size: usize,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryStore {
    /// Create a new history with the default max size
    pub fn new() -> Self {
        Self::with_max_size(DEFAULT_MAX_HISTORY_SIZE)
    }

    /// Create a new history with the specified max size
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_size,
        }
    }

    /// Record the content that is about to be replaced (clears redo stack)
    pub fn push(&mut self, previous_content: impl Into<String>) {
        self.redo_stack.clear();
        self.undo_stack.push(previous_content.into());

        // Oldest entries go first
        let excess = self.undo_stack.len().saturating_sub(self.max_size);
        if excess > 0 {
            self.undo_stack.drain(..excess);
        }
    }

    /// Step back one snapshot.
    ///
    /// Returns the restored content, or `None` (leaving both stacks untouched)
    /// when there is nothing to undo.
    pub fn undo(&mut self, current_content: &str) -> Option<String> {
        let previous = self.undo_stack.pop()?;
        self.redo_stack.push(current_content.to_owned());
        Some(previous)
    }

    /// Step forward one snapshot. Mirror image of [`HistoryStore::undo`].
    pub fn redo(&mut self, current_content: &str) -> Option<String> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(current_content.to_owned());
        Some(next)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Number of snapshots in the undo stack
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of snapshots in the redo stack
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Undo snapshots, oldest first
    pub fn undo_stack(&self) -> &[String] {
        &self.undo_stack
    }

    /// Redo snapshots, oldest first
    pub fn redo_stack(&self) -> &[String] {
        &self.redo_stack
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }
}
