//! Selection offset translation between DOM boundary points and linear
//! character offsets.
//!
//! Only text nodes count, visited depth-first in document order from the
//! editable root. Each query is a linear scan over the root's text nodes,
//! which is fine for selection-change events but not for per-keystroke use.

use crate::dom::{Dom, DomPosition, DomRange, NodeId};
use crate::state::SelectionRange;

/// Linear offset of `position` within the text under `root`.
///
/// When `position.node` is not one of the text nodes under `root` (an element
/// container, or a node elsewhere in the document) this returns the total
/// text length, i.e. the end of the content.
pub fn text_offset(dom: &Dom, root: NodeId, position: DomPosition) -> usize {
    let mut offset = 0;
    for node in dom.text_nodes(root) {
        if node == position.node {
            return offset + position.offset;
        }
        offset += dom.text_len(node);
    }
    offset
}

/// Boundary point for a linear offset under `root`.
///
/// Offsets that fall exactly between two text nodes resolve to the end of the
/// earlier node. Offsets past the end clamp to the end of the last text node;
/// a root without text yields `(root, 0)`.
pub fn position_at_offset(dom: &Dom, root: NodeId, offset: usize) -> DomPosition {
    let mut acc = 0;
    let mut last = None;
    for node in dom.text_nodes(root) {
        let len = dom.text_len(node);
        if offset <= acc + len {
            return DomPosition::new(node, offset - acc);
        }
        acc += len;
        last = Some(DomPosition::new(node, len));
    }
    last.unwrap_or(DomPosition::new(root, 0))
}

/// Linear start/end of a range, ordered regardless of selection direction
pub fn range_offsets(dom: &Dom, root: NodeId, range: &DomRange) -> SelectionRange {
    let start = text_offset(dom, root, range.start);
    let end = text_offset(dom, root, range.end);
    SelectionRange::new(start, end)
}

/// Replace the document selection with the text between two linear offsets
pub fn select_offsets(dom: &mut Dom, root: NodeId, selection: SelectionRange) {
    let start = position_at_offset(dom, root, selection.start);
    let end = position_at_offset(dom, root, selection.end);
    dom.set_selection(DomRange::new(start, end));
}
