//! Node-level extractors: text, headings and checklists.
//!
//! # Responsibility
//! - Turn individual tree nodes into model values.
//! - Enforce the "checkbox items only" rule for task lists.
//!
//! # Invariants
//! - Extracted text is the verbatim concatenation of text leaves.
//! - A checklist either yields every checkbox item or fails as a whole.
//!
//! # Known limitations
//! - The checkbox search scans the whole item subtree, so an item without its
//!   own marker but with a nested checklist takes the first nested marker.

use crate::ast::{Node, NodeKind};
use crate::model::note::{Header, Task};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Structural failure while converting a task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecklistError {
    /// A list item under the task section has no checkbox marker.
    NonCheckboxItem,
}

impl Display for ChecklistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonCheckboxItem => write!(
                f,
                "failed to process task list: task list expect contains only checkbox items"
            ),
        }
    }
}

impl Error for ChecklistError {}

/// Concatenates the literal content of every text leaf under `node`.
///
/// No trimming or normalization is applied. Wrapper nodes contribute only
/// through their descendants.
pub fn extract_text(node: &Node, source: &str) -> String {
    node.descendants()
        .filter(|child| matches!(child.kind, NodeKind::Text { .. }))
        .map(|child| child.segment(source))
        .collect()
}

/// Reads heading text and level. Non-heading nodes report level `0`.
pub fn classify_header(heading: &Node, source: &str) -> Header {
    let level = match heading.kind {
        NodeKind::Heading { level } => level,
        _ => 0,
    };
    Header::new(extract_text(heading, source), level)
}

/// Converts a task-section list into tasks.
///
/// Items whose text is blank are dropped. An empty result is not an error
/// here; the walker decides what an empty task list means.
///
/// # Errors
/// - [`ChecklistError::NonCheckboxItem`] when any list item (including items
///   of nested lists) has no checkbox anywhere in its subtree.
pub fn extract_checklist(list: &Node, source: &str) -> Result<Vec<Task>, ChecklistError> {
    let mut tasks = Vec::new();

    for item in list
        .descendants()
        .filter(|node| node.kind == NodeKind::ListItem)
    {
        let checked = find_checkbox(item).ok_or(ChecklistError::NonCheckboxItem)?;
        let text = extract_text(item, source);
        if text.trim().is_empty() {
            continue;
        }
        tasks.push(Task::new(text, checked));
    }

    Ok(tasks)
}

fn find_checkbox(item: &Node) -> Option<bool> {
    item.descendants().find_map(|node| match node.kind {
        NodeKind::TaskCheckBox { checked } => Some(checked),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::{classify_header, extract_checklist, extract_text, ChecklistError};
    use crate::ast::Node;

    #[test]
    fn extract_text_descends_into_emphasis() {
        let source = "a *b* c";
        let paragraph = Node::container(vec![
            Node::text(0..2),
            Node::emphasis(vec![Node::text(3..4)]),
            Node::text(5..7),
        ]);

        assert_eq!(extract_text(&paragraph, source), "a b c");
    }

    #[test]
    fn extract_text_without_leaves_is_empty() {
        let node = Node::list(vec![Node::item(vec![Node::checkbox(false)])]);
        assert_eq!(extract_text(&node, "anything"), "");
    }

    #[test]
    fn classify_header_reads_level_and_text() {
        let source = "### h3 header";
        let header = classify_header(&Node::heading(3, vec![Node::text(4..13)]), source);

        assert_eq!(header.text(), "h3 header");
        assert_eq!(header.level(), 3);
    }

    #[test]
    fn checklist_fails_fast_on_plain_item() {
        let source = "- [ ] Task 1\n- Task 2";
        let list = Node::list(vec![
            Node::item(vec![Node::checkbox(false), Node::text(6..12)]),
            Node::item(vec![Node::text(15..21)]),
        ]);

        let err = extract_checklist(&list, source).expect_err("plain item must fail");
        assert_eq!(err, ChecklistError::NonCheckboxItem);
        assert_eq!(
            err.to_string(),
            "failed to process task list: task list expect contains only checkbox items"
        );
    }

    #[test]
    fn checklist_uses_first_marker_in_item() {
        let source = "outer inner";
        let list = Node::list(vec![Node::item(vec![
            Node::text(0..5),
            Node::list(vec![Node::item(vec![
                Node::checkbox(true),
                Node::text(6..11),
            ])]),
        ])]);

        let tasks = extract_checklist(&list, source).expect("nested markers count");
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].text(), "outerinner");
        assert!(tasks[0].is_completed());
        assert_eq!(tasks[1].text(), "inner");
    }
}
