//! Generic markup document tree consumed by the note extractor.
//!
//! # Responsibility
//! - Model the subset of markup structure the extractor cares about.
//! - Provide a callback-free pre-order traversal over an immutable tree.
//!
//! # Invariants
//! - Text leaves carry byte spans into the markup source, never copies.
//! - Traversal order is document order: a node, then its children left to right.

use std::ops::Range;

/// Node kind tag. Markup features outside headings/lists/checkboxes/text
/// collapse into `Container`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Tree root.
    Document,
    /// Heading with its nesting level (`1` for `#`, `2` for `##`, ...).
    Heading { level: u8 },
    /// Ordered or unordered list.
    List,
    /// One entry of a list.
    ListItem,
    /// GFM task marker (`[ ]` / `[x]`) owned by the enclosing list item.
    TaskCheckBox { checked: bool },
    /// Plain text leaf referencing `source[span]`.
    Text { span: Range<usize> },
    /// Inline formatting wrapper (emphasis, strong, strikethrough).
    Emphasis,
    /// Any other block or inline element.
    Container,
}

/// One node of the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(kind: NodeKind, children: Vec<Node>) -> Self {
        Self { kind, children }
    }

    pub fn document(children: Vec<Node>) -> Self {
        Self::new(NodeKind::Document, children)
    }

    pub fn heading(level: u8, children: Vec<Node>) -> Self {
        Self::new(NodeKind::Heading { level }, children)
    }

    pub fn list(items: Vec<Node>) -> Self {
        Self::new(NodeKind::List, items)
    }

    pub fn item(children: Vec<Node>) -> Self {
        Self::new(NodeKind::ListItem, children)
    }

    pub fn checkbox(checked: bool) -> Self {
        Self::new(NodeKind::TaskCheckBox { checked }, Vec::new())
    }

    pub fn text(span: Range<usize>) -> Self {
        Self::new(NodeKind::Text { span }, Vec::new())
    }

    pub fn emphasis(children: Vec<Node>) -> Self {
        Self::new(NodeKind::Emphasis, children)
    }

    pub fn container(children: Vec<Node>) -> Self {
        Self::new(NodeKind::Container, children)
    }

    /// Returns the literal source text of a `Text` node.
    ///
    /// Non-text nodes and spans that do not land on valid char boundaries
    /// inside `source` resolve to `""`.
    pub fn segment<'s>(&self, source: &'s str) -> &'s str {
        match &self.kind {
            NodeKind::Text { span } => source.get(span.clone()).unwrap_or_default(),
            _ => "",
        }
    }

    /// Pre-order iterator over this node and all of its descendants.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

/// Stack-driven pre-order walk, see [`Node::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Reverse push keeps the leftmost child on top.
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

impl Descendants<'_> {
    /// Drops the pending children of `node`, the node most recently yielded.
    pub fn skip_children(&mut self, node: &Node) {
        let keep = self.stack.len().saturating_sub(node.children.len());
        self.stack.truncate(keep);
    }
}

#[cfg(test)]
mod tests {
    use super::{Node, NodeKind};

    #[test]
    fn descendants_walks_in_document_order() {
        let tree = Node::document(vec![
            Node::heading(1, vec![Node::text(0..1)]),
            Node::list(vec![Node::item(vec![Node::checkbox(true), Node::text(2..3)])]),
        ]);

        let kinds: Vec<&NodeKind> = tree.descendants().map(|node| &node.kind).collect();
        assert_eq!(
            kinds,
            vec![
                &NodeKind::Document,
                &NodeKind::Heading { level: 1 },
                &NodeKind::Text { span: 0..1 },
                &NodeKind::List,
                &NodeKind::ListItem,
                &NodeKind::TaskCheckBox { checked: true },
                &NodeKind::Text { span: 2..3 },
            ]
        );
    }

    #[test]
    fn skip_children_resumes_at_next_sibling() {
        let tree = Node::document(vec![
            Node::list(vec![Node::item(Vec::new())]),
            Node::heading(2, Vec::new()),
        ]);

        let mut walk = tree.descendants();
        let mut kinds = Vec::new();
        while let Some(node) = walk.next() {
            if node.kind == NodeKind::List {
                walk.skip_children(node);
            }
            kinds.push(node.kind.clone());
        }

        assert_eq!(
            kinds,
            vec![
                NodeKind::Document,
                NodeKind::List,
                NodeKind::Heading { level: 2 }
            ]
        );
    }

    #[test]
    fn segment_resolves_text_span() {
        let source = "# Title";
        assert_eq!(Node::text(2..7).segment(source), "Title");
    }

    #[test]
    fn segment_tolerates_bad_spans_and_non_text_nodes() {
        let source = "héllo";
        assert_eq!(Node::text(0..99).segment(source), "");
        assert_eq!(Node::text(2..3).segment(source), "");
        assert_eq!(Node::container(Vec::new()).segment(source), "");
    }
}
