//! Boundary points, ranges, and the range operations used for insertion.

use super::{Dom, NodeId};
use crate::util::text::{byte_index, char_len};

/// A boundary point: a node plus an offset into it.
///
/// For text nodes the offset counts chars; for elements it counts children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomPosition {
    pub node: NodeId,
    pub offset: usize,
}

impl DomPosition {
    pub fn new(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// A range between two boundary points.
///
/// `start` and `end` are kept as given; callers that need document order use
/// [`Dom::ordered_range`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomRange {
    pub start: DomPosition,
    pub end: DomPosition,
}

impl DomRange {
    pub fn new(start: DomPosition, end: DomPosition) -> Self {
        Self { start, end }
    }

    /// A collapsed range (caret)
    pub fn caret(position: DomPosition) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

impl Dom {
    /// Deepest node containing both ends of the range
    pub fn common_ancestor(&self, range: &DomRange) -> NodeId {
        let mut candidate = range.start.node;
        loop {
            if self.contains(candidate, range.end.node) {
                return candidate;
            }
            match self.parent(candidate) {
                Some(parent) => candidate = parent,
                None => return candidate,
            }
        }
    }

    /// Char offset of a boundary point within the flattened text of `root`.
    ///
    /// Unlike the selection offset translator, element boundary points are
    /// resolved to the text that precedes the given child index.
    pub(crate) fn boundary_offset(&self, root: NodeId, pos: DomPosition) -> usize {
        let mut acc = 0;
        if self.is_text(pos.node) {
            for id in self.text_nodes(root) {
                if id == pos.node {
                    return acc + pos.offset.min(self.text_len(id));
                }
                acc += self.text_len(id);
            }
            return acc;
        }

        // Element boundary: all text before child `offset`, or before the
        // element plus its own text when the offset is past the last child
        match self.children(pos.node).get(pos.offset).copied() {
            Some(child) => self.text_len_before(root, child),
            None => {
                self.text_len_before(root, pos.node) + char_len(&self.text_content(pos.node))
            }
        }
    }

    /// Chars of text that precede `target` in document order under `root`
    fn text_len_before(&self, root: NodeId, target: NodeId) -> usize {
        if target == root {
            return 0;
        }
        let mut acc = 0;
        for id in self.descendants(root) {
            if id == target {
                return acc;
            }
            acc += self.text_len(id);
        }
        acc
    }

    /// The range with its ends in document order, as linear offsets in `root`
    pub fn ordered_range(&self, root: NodeId, range: &DomRange) -> (usize, usize) {
        let a = self.boundary_offset(root, range.start);
        let b = self.boundary_offset(root, range.end);
        (a.min(b), a.max(b))
    }

    /// Text covered by the range, like `Range.toString()`
    pub fn range_text(&self, range: &DomRange) -> String {
        let root = self.body;
        let (start, end) = self.ordered_range(root, range);
        self.text_content(root)
            .chars()
            .skip(start)
            .take(end - start)
            .collect()
    }

    /// Delete the characters covered by the range and return the collapsed point.
    ///
    /// Text nodes emptied by the deletion stay in the tree.
    pub fn delete_range_contents(&mut self, range: &DomRange) -> DomPosition {
        let root = self.body;
        let (start, end) = self.ordered_range(root, range);
        if start == end {
            return self.position_in(root, start).unwrap_or(range.start);
        }

        let mut acc = 0;
        let mut caret = None;
        for id in self.text_nodes(root) {
            let len = self.text_len(id);
            let (node_start, node_end) = (acc, acc + len);
            acc = node_end;

            let cut_from = start.max(node_start);
            let cut_to = end.min(node_end);
            if cut_from >= cut_to {
                continue;
            }

            let text = self.text(id).unwrap_or_default();
            let from = byte_index(text, cut_from - node_start);
            let to = byte_index(text, cut_to - node_start);
            let updated = format!("{}{}", &text[..from], &text[to..]);
            self.set_text(id, &updated);

            if caret.is_none() {
                caret = Some(DomPosition::new(id, cut_from - node_start));
            }
        }

        caret.unwrap_or(range.start)
    }

    /// Insert `node` at a boundary point, splitting a text container
    pub fn insert_at(&mut self, pos: DomPosition, node: NodeId) {
        if self.is_text(pos.node) {
            let offset = pos.offset.min(self.text_len(pos.node));
            if offset == 0 {
                if let (Some(parent), Some(idx)) = (self.parent(pos.node), self.index_in_parent(pos.node)) {
                    self.insert_child(parent, idx, node);
                }
                return;
            }
            if offset < self.text_len(pos.node) {
                self.split_text(pos.node, offset);
            }
            self.insert_after(pos.node, node);
        } else {
            self.insert_child(pos.node, pos.offset, node);
        }
    }

    /// Text position for a linear offset under `root` (`None` when `root` has no text)
    fn position_in(&self, root: NodeId, offset: usize) -> Option<DomPosition> {
        let mut acc = 0;
        let mut last = None;
        for id in self.text_nodes(root) {
            let len = self.text_len(id);
            if offset <= acc + len {
                return Some(DomPosition::new(id, offset - acc));
            }
            acc += len;
            last = Some(DomPosition::new(id, len));
        }
        last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// body > div > ["Hello ", b > "big", " world"]
    fn sample() -> (Dom, NodeId, [NodeId; 3]) {
        let mut dom = Dom::new();
        let div = dom.create_element("div");
        let body = dom.body();
        dom.append_child(body, div);
        let t1 = dom.create_text("Hello ");
        let b = dom.create_element("b");
        let t2 = dom.create_text("big");
        let t3 = dom.create_text(" world");
        dom.append_child(div, t1);
        dom.append_child(div, b);
        dom.append_child(b, t2);
        dom.append_child(div, t3);
        (dom, div, [t1, t2, t3])
    }

    #[test]
    fn test_common_ancestor() {
        let (dom, div, [t1, t2, _]) = sample();
        let range = DomRange::new(DomPosition::new(t1, 1), DomPosition::new(t2, 2));
        assert_eq!(dom.common_ancestor(&range), div);

        let inner = DomRange::new(DomPosition::new(t2, 0), DomPosition::new(t2, 2));
        assert_eq!(dom.common_ancestor(&inner), t2);
    }

    #[test]
    fn test_range_text_across_nodes() {
        let (dom, _, [t1, _, t3]) = sample();
        let range = DomRange::new(DomPosition::new(t1, 4), DomPosition::new(t3, 3));
        assert_eq!(dom.range_text(&range), "o big wo");
    }

    #[test]
    fn test_range_text_reversed_ends() {
        let (dom, _, [t1, _, t3]) = sample();
        let range = DomRange::new(DomPosition::new(t3, 3), DomPosition::new(t1, 4));
        assert_eq!(dom.range_text(&range), "o big wo");
    }

    #[test]
    fn test_element_boundary_offset() {
        let (dom, div, _) = sample();
        let body = dom.body();
        assert_eq!(dom.boundary_offset(body, DomPosition::new(div, 0)), 0);
        assert_eq!(dom.boundary_offset(body, DomPosition::new(div, 1)), 6);
        assert_eq!(dom.boundary_offset(body, DomPosition::new(div, 2)), 9);
        assert_eq!(dom.boundary_offset(body, DomPosition::new(div, 3)), 15);
    }

    #[test]
    fn test_delete_range_contents() {
        let (mut dom, div, [t1, _, t3]) = sample();
        let range = DomRange::new(DomPosition::new(t1, 5), DomPosition::new(t3, 1));
        let caret = dom.delete_range_contents(&range);

        assert_eq!(dom.text_content(div), "Helloworld");
        assert_eq!(caret, DomPosition::new(t1, 5));
    }

    #[test]
    fn test_insert_at_splits_text() {
        let (mut dom, div, [t1, _, _]) = sample();
        let img = dom.create_element("img");
        dom.insert_at(DomPosition::new(t1, 2), img);

        assert_eq!(dom.children(div)[1], img);
        assert_eq!(dom.text(t1), Some("He"));
        assert_eq!(dom.text_content(div), "Hello big world");
    }

    #[test]
    fn test_insert_at_element_boundary() {
        let (mut dom, div, _) = sample();
        let hr = dom.create_element("hr");
        dom.insert_at(DomPosition::new(div, 3), hr);
        assert_eq!(dom.children(div).last(), Some(&hr));
    }
}
