//! Markdown to document tree adapter.
//!
//! # Responsibility
//! - Run pulldown-cmark with GFM task lists enabled.
//! - Fold its flat event stream into an owned [`Node`] tree.
//!
//! # Invariants
//! - The returned tree always has a `Document` root.
//! - Text spans point at literal source bytes, never at decoded copies.

use crate::ast::{Node, NodeKind};
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use std::ops::Range;

fn options() -> Options {
    Options::ENABLE_TASKLISTS | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES
}

/// Parses markdown `source` into a document tree.
pub fn parse_markdown(source: &str) -> Node {
    let mut stack = vec![Node::document(Vec::new())];
    let mut in_code_block = false;
    let mut bare_marker: Option<Range<usize>> = None;

    for (event, range) in Parser::new_ext(source, options()).into_offset_iter() {
        match event {
            Event::Start(Tag::Item) => {
                stack.push(Node::item(Vec::new()));
                bare_marker = bare_task_marker(source, range).map(|(checked, span)| {
                    attach(&mut stack, Node::checkbox(checked));
                    span
                });
            }
            Event::Start(tag) => {
                in_code_block |= matches!(tag, Tag::CodeBlock(_));
                stack.push(Node::new(kind_of(&tag), Vec::new()));
            }
            Event::End(tag) => {
                if matches!(tag, TagEnd::CodeBlock) {
                    in_code_block = false;
                }
                close_current(&mut stack);
            }
            Event::Text(_) if in_code_block => attach(&mut stack, Node::container(Vec::new())),
            Event::Text(_) if within(bare_marker.as_ref(), &range) => {}
            Event::Text(text) | Event::Code(text) => {
                attach(&mut stack, Node::text(literal_span(source, range, &text)));
            }
            Event::TaskListMarker(checked) => attach(&mut stack, Node::checkbox(checked)),
            _ => attach(&mut stack, Node::container(Vec::new())),
        }
    }

    while stack.len() > 1 {
        close_current(&mut stack);
    }
    stack
        .pop()
        .unwrap_or_else(|| Node::document(Vec::new()))
}

/// Detects an item whose first line is only `[ ]`, `[x]` or `[X]`.
///
/// pulldown-cmark emits no task marker when nothing follows the brackets, so
/// such items would otherwise read as plain `[x]` text. Returns the checked
/// state and the byte span of the brackets.
fn bare_task_marker(source: &str, item: Range<usize>) -> Option<(bool, Range<usize>)> {
    let line = source.get(item.clone())?.lines().next()?;
    let marker = strip_bullet(line.trim_start()).trim();
    let checked = match marker {
        "[ ]" => false,
        "[x]" | "[X]" => true,
        _ => return None,
    };
    let start = item.start + line.find(marker)?;
    Some((checked, start..start + marker.len()))
}

fn strip_bullet(line: &str) -> &str {
    if let Some(rest) = line.strip_prefix(['-', '*', '+']) {
        return rest;
    }
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    match line.get(digits..) {
        Some(rest) if digits > 0 => rest.strip_prefix(['.', ')']).unwrap_or(line),
        _ => line,
    }
}

fn within(outer: Option<&Range<usize>>, inner: &Range<usize>) -> bool {
    outer.is_some_and(|outer| outer.start <= inner.start && inner.end <= outer.end)
}

fn kind_of(tag: &Tag<'_>) -> NodeKind {
    match tag {
        Tag::Heading { level, .. } => NodeKind::Heading {
            level: *level as u8,
        },
        Tag::List(_) => NodeKind::List,
        Tag::Item => NodeKind::ListItem,
        Tag::Emphasis | Tag::Strong | Tag::Strikethrough => NodeKind::Emphasis,
        _ => NodeKind::Container,
    }
}

fn attach(stack: &mut [Node], node: Node) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    }
}

// The root is never popped here.
fn close_current(stack: &mut Vec<Node>) {
    if stack.len() < 2 {
        return;
    }
    if let Some(node) = stack.pop() {
        attach(stack, node);
    }
}

/// Narrows `range` to where `text` literally occurs in it.
///
/// Escapes and entities make the decoded text differ from the source; in that
/// case the raw event range is kept.
fn literal_span(source: &str, range: Range<usize>, text: &str) -> Range<usize> {
    source
        .get(range.clone())
        .and_then(|raw| raw.find(text))
        .map(|offset| range.start + offset..range.start + offset + text.len())
        .unwrap_or(range)
}

#[cfg(test)]
mod tests {
    use super::{bare_task_marker, literal_span, parse_markdown};
    use crate::ast::NodeKind;
    use crate::extract::extract_text;

    #[test]
    fn builds_heading_and_checklist_nodes() {
        let source = "# Title\n## Task\n- [x] done\n- [ ] open";
        let tree = parse_markdown(source);

        assert_eq!(tree.kind, NodeKind::Document);
        let headings: Vec<u8> = tree
            .descendants()
            .filter_map(|node| match node.kind {
                NodeKind::Heading { level } => Some(level),
                _ => None,
            })
            .collect();
        assert_eq!(headings, vec![1, 2]);

        let markers: Vec<bool> = tree
            .descendants()
            .filter_map(|node| match node.kind {
                NodeKind::TaskCheckBox { checked } => Some(checked),
                _ => None,
            })
            .collect();
        assert_eq!(markers, vec![true, false]);
    }

    #[test]
    fn emphasis_text_is_kept_as_leaves() {
        let source = "# Some *bold* title";
        let tree = parse_markdown(source);
        let heading = tree
            .descendants()
            .find(|node| matches!(node.kind, NodeKind::Heading { .. }))
            .expect("heading node");

        assert_eq!(extract_text(heading, source), "Some bold title");
    }

    #[test]
    fn bare_marker_items_get_a_checkbox_without_text() {
        let source = "- [x]\n- [ ] open";
        let tree = parse_markdown(source);
        let items: Vec<_> = tree
            .descendants()
            .filter(|node| node.kind == NodeKind::ListItem)
            .collect();

        assert_eq!(items.len(), 2);
        assert!(matches!(
            items[0].children.first().map(|node| &node.kind),
            Some(NodeKind::TaskCheckBox { checked: true })
        ));
        assert_eq!(extract_text(items[0], source), "");
        assert_eq!(extract_text(items[1], source), "open");
    }

    #[test]
    fn bare_task_marker_accepts_bullets_and_ordinals() {
        assert_eq!(bare_task_marker("- [ ]", 0..5), Some((false, 2..5)));
        assert_eq!(bare_task_marker("1. [X]  ", 0..8), Some((true, 3..6)));
        assert_eq!(bare_task_marker("- [x] text", 0..10), None);
        assert_eq!(bare_task_marker("- plain", 0..7), None);
    }

    #[test]
    fn code_block_lines_contribute_no_text() {
        let source = "- [x] Task\n\n      code";
        let tree = parse_markdown(source);
        let item = tree
            .descendants()
            .find(|node| node.kind == NodeKind::ListItem)
            .expect("list item");

        assert_eq!(extract_text(item, source), "Task");
    }

    #[test]
    fn literal_span_narrows_to_text() {
        assert_eq!(literal_span("`code`", 0..6, "code"), 1..5);
        assert_eq!(literal_span("&amp;", 0..5, "&"), 0..1);
        assert_eq!(literal_span("a", 0..1, "zz"), 0..1);
    }
}
