//! Reference rich-text backend working directly on the node tree.
//!
//! Supports the inline toggles (`bold`, `italic`, `underline`,
//! `strikeThrough`) and `formatBlock`. List commands can be queried but not
//! applied; issuing one is an error.

use anyhow::{anyhow, bail};

use super::{Dom, DomPosition, DomRange, NodeId};
use crate::format::RichTextBackend;

/// Block elements `formatBlock` may produce or retag
const FORMAT_BLOCK_TAGS: &[&str] = &[
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "pre", "div",
];

/// Block elements that end an inline run
const BLOCK_TAGS: &[&str] = &[
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "pre", "div", "ul", "ol", "li",
    "table", "hr",
];

/// Tags that express an inline toggle; the first is the one created
fn inline_tags(command: &str) -> Option<&'static [&'static str]> {
    match command {
        "bold" => Some(&["b", "strong"]),
        "italic" => Some(&["i", "em"]),
        "underline" => Some(&["u"]),
        "strikeThrough" => Some(&["s", "strike", "del"]),
        _ => None,
    }
}

fn list_tag(command: &str) -> Option<&'static str> {
    match command {
        "insertUnorderedList" => Some("ul"),
        "insertOrderedList" => Some("ol"),
        _ => None,
    }
}

/// `RichTextBackend` scoped to one editable root element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomCommands {
    root: NodeId,
}

impl DomCommands {
    pub fn new(root: NodeId) -> Self {
        Self { root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The document selection, if it lies inside the root
    fn selection_in_root(&self, dom: &Dom) -> Option<DomRange> {
        let range = *dom.selection()?;
        dom.contains(self.root, dom.common_ancestor(&range))
            .then_some(range)
    }

    /// Text nodes overlapping the range with the covered char span of each
    fn covered_text(&self, dom: &Dom, range: &DomRange) -> Vec<(NodeId, usize, usize)> {
        let (start, end) = dom.ordered_range(self.root, range);
        let mut covered = Vec::new();
        let mut acc = 0;
        for id in dom.text_nodes(self.root) {
            let len = dom.text_len(id);
            let from = start.max(acc);
            let to = end.min(acc + len);
            if from < to {
                covered.push((id, from - acc, to - acc));
            }
            acc += len;
        }
        covered
    }

    /// Nearest element (the node itself included) below the root whose tag is in `tags`
    fn enclosing(&self, dom: &Dom, node: NodeId, tags: &[&str]) -> Option<NodeId> {
        std::iter::once(node)
            .chain(dom.ancestors(node))
            .take_while(|&n| n != self.root)
            .find(|&n| dom.tag(n).is_some_and(|tag| tags.contains(&tag)))
    }

    fn inline_state(&self, dom: &Dom, tags: &[&str]) -> bool {
        let Some(range) = self.selection_in_root(dom) else {
            return false;
        };
        let covered = self.covered_text(dom, &range);
        if covered.is_empty() {
            return self.enclosing(dom, range.start.node, tags).is_some();
        }
        covered
            .iter()
            .all(|&(id, _, _)| self.enclosing(dom, id, tags).is_some())
    }

    /// Wrap the covered text in `tags[0]`, or unwrap it when all of it is
    /// already formatted. The selection is reset to the affected text.
    fn toggle_inline(&self, dom: &mut Dom, tags: &[&str]) -> bool {
        let Some(range) = self.selection_in_root(dom) else {
            return false;
        };
        let covered = self.covered_text(dom, &range);
        if covered.is_empty() {
            return false;
        }

        let all_formatted = covered
            .iter()
            .all(|&(id, _, _)| self.enclosing(dom, id, tags).is_some());

        let mut affected = Vec::with_capacity(covered.len());
        for (id, from, to) in covered {
            if all_formatted {
                while let Some(element) = self.enclosing(dom, id, tags) {
                    unwrap_element(dom, element);
                }
                affected.push((id, from, to));
            } else if self.enclosing(dom, id, tags).is_some() {
                affected.push((id, from, to));
            } else {
                if to < dom.text_len(id) {
                    dom.split_text(id, to);
                }
                let target = if from > 0 { dom.split_text(id, from) } else { id };
                let wrapper = dom.create_element(tags[0]);
                wrap_node(dom, target, wrapper);
                affected.push((target, 0, to - from));
            }
        }

        if let (Some(&(first, start, _)), Some(&(last, _, end))) = (affected.first(), affected.last()) {
            dom.set_selection(DomRange::new(
                DomPosition::new(first, start),
                DomPosition::new(last, end),
            ));
        }
        true
    }

    fn format_block(&self, dom: &mut Dom, tag: &str) -> bool {
        let Some(range) = self.selection_in_root(dom) else {
            return false;
        };

        let mut targets: Vec<NodeId> = self
            .covered_text(dom, &range)
            .into_iter()
            .map(|(id, _, _)| id)
            .collect();
        if targets.is_empty() {
            targets.push(range.start.node);
        }

        for node in targets {
            if let Some(block) = self.enclosing(dom, node, FORMAT_BLOCK_TAGS) {
                dom.set_tag(block, tag);
                continue;
            }

            let top = if node == self.root {
                let children = dom.children(self.root);
                children.get(range.start.offset).or(children.last()).copied()
            } else {
                std::iter::once(node)
                    .chain(dom.ancestors(node))
                    .find(|&n| dom.parent(n) == Some(self.root))
            };

            match top {
                Some(top) => self.wrap_inline_run(dom, top, tag),
                None => {
                    let block = dom.create_element(tag);
                    dom.append_child(self.root, block);
                }
            }
        }
        true
    }

    /// Move the run of inline siblings around `top` into a new block element
    fn wrap_inline_run(&self, dom: &mut Dom, top: NodeId, tag: &str) {
        let is_inline = |dom: &Dom, n: NodeId| !dom.tag(n).is_some_and(|t| BLOCK_TAGS.contains(&t));
        if !is_inline(dom, top) {
            return;
        }

        let siblings = dom.children(self.root).to_vec();
        let Some(idx) = siblings.iter().position(|&n| n == top) else {
            return;
        };
        let mut first = idx;
        while first > 0 && is_inline(dom, siblings[first - 1]) {
            first -= 1;
        }
        let mut last = idx;
        while last + 1 < siblings.len() && is_inline(dom, siblings[last + 1]) {
            last += 1;
        }

        let block = dom.create_element(tag);
        dom.insert_child(self.root, first, block);
        for &node in &siblings[first..=last] {
            dom.append_child(block, node);
        }
    }
}

fn wrap_node(dom: &mut Dom, node: NodeId, wrapper: NodeId) {
    if let (Some(parent), Some(idx)) = (dom.parent(node), dom.index_in_parent(node)) {
        dom.insert_child(parent, idx, wrapper);
        dom.append_child(wrapper, node);
    }
}

fn unwrap_element(dom: &mut Dom, element: NodeId) {
    let (Some(parent), Some(idx)) = (dom.parent(element), dom.index_in_parent(element)) else {
        return;
    };
    let children = dom.children(element).to_vec();
    for (i, child) in children.into_iter().enumerate() {
        dom.insert_child(parent, idx + i, child);
    }
    dom.detach(element);
}

impl RichTextBackend for DomCommands {
    fn exec_command(
        &mut self,
        dom: &mut Dom,
        command: &str,
        value: Option<&str>,
    ) -> anyhow::Result<bool> {
        if let Some(tags) = inline_tags(command) {
            return Ok(self.toggle_inline(dom, tags));
        }

        match command {
            "formatBlock" => {
                let value = value.ok_or_else(|| anyhow!("formatBlock requires a value"))?;
                let tag = value
                    .trim_matches(|c| c == '<' || c == '>')
                    .to_ascii_lowercase();
                if !FORMAT_BLOCK_TAGS.contains(&tag.as_str()) {
                    bail!("unsupported block format '{}'", value);
                }
                Ok(self.format_block(dom, &tag))
            }
            _ if list_tag(command).is_some() => {
                bail!("'{}' is not supported by the DOM backend", command)
            }
            _ => bail!("unknown command '{}'", command),
        }
    }

    fn query_command_state(&self, dom: &Dom, command: &str) -> anyhow::Result<bool> {
        if let Some(tags) = inline_tags(command) {
            return Ok(self.inline_state(dom, tags));
        }
        if let Some(tag) = list_tag(command) {
            return Ok(self
                .selection_in_root(dom)
                .is_some_and(|range| self.enclosing(dom, range.start.node, &[tag]).is_some()));
        }
        bail!("unknown command '{}'", command)
    }

    fn query_command_value(&self, dom: &Dom, command: &str) -> anyhow::Result<String> {
        if command != "formatBlock" {
            bail!("command '{}' has no value", command);
        }
        Ok(self
            .selection_in_root(dom)
            .and_then(|range| self.enclosing(dom, range.start.node, FORMAT_BLOCK_TAGS))
            .and_then(|block| dom.tag(block))
            .unwrap_or_default()
            .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor_with(markup: &str) -> (Dom, DomCommands) {
        let mut dom = Dom::new();
        let body = dom.body();
        let root = dom.create_element("div");
        dom.append_child(body, root);
        dom.set_inner_html(root, markup).unwrap();
        (dom, DomCommands::new(root))
    }

    fn select_text(dom: &mut Dom, node: NodeId, start: usize, end: usize) {
        dom.set_selection(DomRange::new(
            DomPosition::new(node, start),
            DomPosition::new(node, end),
        ));
    }

    #[test]
    fn test_bold_wraps_selected_text() {
        let (mut dom, mut backend) = editor_with("Hello world");
        let text = dom.children(backend.root())[0];
        select_text(&mut dom, text, 6, 11);

        assert!(backend.exec_command(&mut dom, "bold", None).unwrap());
        assert_eq!(dom.inner_html(backend.root()), "Hello <b>world</b>");
        assert!(backend.query_command_state(&dom, "bold").unwrap());
        assert!(!backend.query_command_state(&dom, "italic").unwrap());
    }

    #[test]
    fn test_bold_toggles_off() {
        let (mut dom, mut backend) = editor_with("a<strong>bc</strong>d");
        let strong = dom.children(backend.root())[1];
        let text = dom.children(strong)[0];
        select_text(&mut dom, text, 0, 2);

        assert!(backend.query_command_state(&dom, "bold").unwrap());
        assert!(backend.exec_command(&mut dom, "bold", None).unwrap());
        assert_eq!(dom.inner_html(backend.root()), "abcd");
        assert!(!backend.query_command_state(&dom, "bold").unwrap());
    }

    #[test]
    fn test_inline_toggle_across_elements() {
        let (mut dom, mut backend) = editor_with("ab<em>cd</em>ef");
        let root = backend.root();
        let texts = dom.text_nodes(root);
        dom.set_selection(DomRange::new(
            DomPosition::new(texts[0], 1),
            DomPosition::new(texts[2], 1),
        ));

        assert!(backend.exec_command(&mut dom, "underline", None).unwrap());
        assert_eq!(
            dom.inner_html(root),
            "a<u>b</u><em><u>cd</u></em><u>e</u>f"
        );
        let range = *dom.selection().unwrap();
        assert_eq!(dom.range_text(&range), "bcde");
    }

    #[test]
    fn test_collapsed_toggle_changes_nothing() {
        let (mut dom, mut backend) = editor_with("abc");
        let text = dom.children(backend.root())[0];
        select_text(&mut dom, text, 1, 1);
        assert!(!backend.exec_command(&mut dom, "italic", None).unwrap());
        assert_eq!(dom.inner_html(backend.root()), "abc");
    }

    #[test]
    fn test_format_block_wraps_inline_run() {
        let (mut dom, mut backend) = editor_with("title<p>body</p>");
        let root = backend.root();
        let text = dom.children(root)[0];
        select_text(&mut dom, text, 2, 2);

        assert!(backend.exec_command(&mut dom, "formatBlock", Some("h1")).unwrap());
        assert_eq!(dom.inner_html(root), "<h1>title</h1><p>body</p>");
        assert_eq!(backend.query_command_value(&dom, "formatBlock").unwrap(), "h1");
    }

    #[test]
    fn test_format_block_retags_existing_block() {
        let (mut dom, mut backend) = editor_with("<p>one</p><p>two</p>");
        let root = backend.root();
        let second = dom.children(root)[1];
        let text = dom.children(second)[0];
        select_text(&mut dom, text, 0, 3);

        assert!(backend.exec_command(&mut dom, "formatBlock", Some("<BLOCKQUOTE>")).unwrap());
        assert_eq!(dom.inner_html(root), "<p>one</p><blockquote>two</blockquote>");
    }

    #[test]
    fn test_selection_outside_root_is_ignored() {
        let (mut dom, mut backend) = editor_with("inside");
        let body = dom.body();
        let outside = dom.create_text("outside");
        dom.append_child(body, outside);
        select_text(&mut dom, outside, 0, 3);

        assert!(!backend.exec_command(&mut dom, "bold", None).unwrap());
        assert_eq!(backend.query_command_value(&dom, "formatBlock").unwrap(), "");
    }

    #[test]
    fn test_list_commands_are_unsupported() {
        let (mut dom, mut backend) = editor_with("<ul><li>item</li></ul>");
        let root = backend.root();
        let text = dom.text_nodes(root)[0];
        select_text(&mut dom, text, 0, 1);

        assert!(backend.query_command_state(&dom, "insertUnorderedList").unwrap());
        assert!(!backend.query_command_state(&dom, "insertOrderedList").unwrap());
        assert!(backend
            .exec_command(&mut dom, "insertUnorderedList", None)
            .is_err());
        assert!(backend.exec_command(&mut dom, "explode", None).is_err());
    }
}
