//! In-memory document tree that the editor reads from and writes to.
//!
//! This stands in for the host page: an arena of element and text nodes,
//! the document-global selection, and HTML (de)serialization. Nodes are never
//! freed; detached nodes simply have no parent.
//!
//! All offsets inside text nodes are counted in `char`s.

mod commands;
mod html;
mod range;

pub use commands::DomCommands;
pub use html::HtmlError;
pub use range::{DomPosition, DomRange};

use crate::util::text::{byte_index, char_len};

/// Handle to a node in a [`Dom`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Element tag plus attributes in insertion order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element(ElementData),
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// The document: node arena, `<body>` root, and the current selection
#[derive(Debug, Clone)]
pub struct Dom {
    nodes: Vec<Node>,
    body: NodeId,
    selection: Option<DomRange>,
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

impl Dom {
    /// Create a document containing an empty `<body>`
    pub fn new() -> Self {
        let mut dom = Self {
            nodes: Vec::new(),
            body: NodeId(0),
            selection: None,
        };
        dom.body = dom.create_element("body");
        dom
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(NodeKind::Element(ElementData {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
        }))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.alloc(NodeKind::Text(text.to_string()))
    }

    // =========================================================================
    // Tree structure
    // =========================================================================

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Position of a node among its parent's children
    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&c| c == id)
    }

    /// Remove a node from its parent (no-op when already detached)
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.node(id).parent {
            self.node_mut(parent).children.retain(|&c| c != id);
            self.node_mut(id).parent = None;
        }
    }

    /// Append `child` as the last child of `parent`, moving it if attached elsewhere
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.node_mut(parent).children.push(child);
        self.node_mut(child).parent = Some(parent);
    }

    /// Insert `child` at `index` among `parent`'s children (clamped to the end)
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) {
        self.detach(child);
        let children = &mut self.node_mut(parent).children;
        let index = index.min(children.len());
        children.insert(index, child);
        self.node_mut(child).parent = Some(parent);
    }

    /// Insert `node` directly after `reference` in the same parent
    pub fn insert_after(&mut self, reference: NodeId, node: NodeId) {
        if let (Some(parent), Some(idx)) = (self.parent(reference), self.index_in_parent(reference))
        {
            self.insert_child(parent, idx + 1, node);
        }
    }

    /// Detach every child of `id`
    pub fn remove_children(&mut self, id: NodeId) {
        let children = std::mem::take(&mut self.node_mut(id).children);
        for child in children {
            self.node_mut(child).parent = None;
        }
    }

    /// Inclusive containment, like `Node.contains`
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Ancestors of `id`, nearest first, excluding `id` itself
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&n| self.parent(n))
    }

    /// All descendants of `root` in document (pre-)order, excluding `root`
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(root).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// Text nodes under `root` in document order
    pub fn text_nodes(&self, root: NodeId) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|&id| self.is_text(id))
            .collect()
    }

    // =========================================================================
    // Node data
    // =========================================================================

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    pub fn is_text(&self, id: NodeId) -> bool {
        matches!(self.node(id).kind, NodeKind::Text(_))
    }

    /// Text of a text node (`None` for elements)
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Text(text) => Some(text),
            NodeKind::Element(_) => None,
        }
    }

    /// Replace the data of a text node (ignored for elements)
    pub fn set_text(&mut self, id: NodeId, text: &str) {
        if let NodeKind::Text(data) = &mut self.node_mut(id).kind {
            *data = text.to_string();
        }
    }

    /// Length in chars of a text node, 0 for elements
    pub fn text_len(&self, id: NodeId) -> usize {
        self.text(id).map(char_len).unwrap_or(0)
    }

    /// Lowercase tag name (`None` for text nodes)
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Element(data) => Some(&data.tag),
            NodeKind::Text(_) => None,
        }
    }

    /// Rename an element, keeping its attributes and children
    pub fn set_tag(&mut self, id: NodeId, tag: &str) {
        if let NodeKind::Element(data) = &mut self.node_mut(id).kind {
            data.tag = tag.to_ascii_lowercase();
        }
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Element(data) => data
                .attrs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let NodeKind::Element(data) = &mut self.node_mut(id).kind {
            match data.attrs.iter_mut().find(|(k, _)| k == name) {
                Some((_, v)) => *v = value.to_string(),
                None => data.attrs.push((name.to_string(), value.to_string())),
            }
        }
    }

    /// First element with the given `id` attribute under `root`
    pub fn element_by_id(&self, root: NodeId, id_attr: &str) -> Option<NodeId> {
        self.descendants(root)
            .into_iter()
            .find(|&n| self.attribute(n, "id") == Some(id_attr))
    }

    /// Concatenated text of all text nodes under `root` (or the node itself)
    pub fn text_content(&self, root: NodeId) -> String {
        if let Some(text) = self.text(root) {
            return text.to_string();
        }
        self.text_nodes(root)
            .into_iter()
            .filter_map(|id| self.text(id))
            .collect()
    }

    /// Replace all children with a single text node (none for empty text)
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        if self.is_text(id) {
            self.set_text(id, text);
            return;
        }
        self.remove_children(id);
        if !text.is_empty() {
            let child = self.create_text(text);
            self.append_child(id, child);
        }
    }

    /// Split a text node at a char offset; the tail becomes a new sibling.
    ///
    /// Returns the tail node. The tail is created even when empty so callers
    /// can always insert between head and tail.
    pub fn split_text(&mut self, id: NodeId, offset: usize) -> NodeId {
        let text = self.text(id).unwrap_or_default().to_string();
        let at = byte_index(&text, offset);
        let (head, tail) = text.split_at(at);
        let tail = tail.to_string();
        self.set_text(id, head);
        let tail_node = self.create_text(&tail);
        self.insert_after(id, tail_node);
        tail_node
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// The document's current selection range, if any
    pub fn selection(&self) -> Option<&DomRange> {
        self.selection.as_ref()
    }

    pub fn set_selection(&mut self, range: DomRange) {
        self.selection = Some(range);
    }

    pub fn remove_all_ranges(&mut self) {
        self.selection = None;
    }
}
