//! Single-pass document walker that assembles a [`Note`].
//!
//! # Responsibility
//! - Track the current section while visiting the tree in document order.
//! - Route the task section list to the checklist extractor.
//! - Validate the note-level invariants after the walk.
//!
//! # Invariants
//! - Later level-1 headings replace the title; later task lists replace tasks.
//! - Lists nested in a task list are never extracted on their own.
//! - A section lasts until the next level-2 heading.
//! - Validation order: task section, title, task list.

use crate::ast::{Node, NodeKind};
use crate::extract::{classify_header, extract_checklist, ChecklistError};
use crate::model::note::{Note, Task};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Section heading text that introduces the checklist.
pub const TASK_SECTION: &str = "Task";

const TITLE_LEVEL: u8 = 1;
const SECTION_LEVEL: u8 = 2;

/// Failure to turn a document into a note.
#[derive(Debug)]
pub enum NoteError {
    /// The task section list contains a non-checkbox item.
    Structure(ChecklistError),
    /// No level-2 heading named `Task` exists.
    MissingTaskSection,
    /// No level-1 heading exists.
    MissingTitle,
    /// The task section exists but produced no tasks.
    ///
    /// Reported with the same message as `MissingTaskSection`.
    EmptyTaskList,
    /// The source stream could not be read.
    Read(std::io::Error),
}

impl Display for NoteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Structure(err) => write!(f, "failed to parse markdown: {err}"),
            Self::MissingTaskSection | Self::EmptyTaskList => {
                write!(f, "task section is missing")
            }
            Self::MissingTitle => write!(f, "note title is missing"),
            Self::Read(err) => write!(f, "failed to read content: {err}"),
        }
    }
}

impl Error for NoteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Structure(err) => Some(err),
            Self::Read(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ChecklistError> for NoteError {
    fn from(value: ChecklistError) -> Self {
        Self::Structure(value)
    }
}

impl From<std::io::Error> for NoteError {
    fn from(value: std::io::Error) -> Self {
        Self::Read(value)
    }
}

/// Extracts a note from a parsed document tree.
///
/// `source` is the text the tree's spans point into.
///
/// # Errors
/// - [`NoteError::Structure`] as soon as the task list holds a plain item.
/// - [`NoteError::MissingTaskSection`], [`NoteError::MissingTitle`] or
///   [`NoteError::EmptyTaskList`] when the finished walk violates an invariant.
pub fn parse(document: &Node, source: &str) -> Result<Note, NoteError> {
    let mut title = String::new();
    let mut last_section = String::new();
    let mut task_section_seen = false;
    let mut tasks: Vec<Task> = Vec::new();

    let mut walk = document.descendants();
    while let Some(node) = walk.next() {
        match node.kind {
            NodeKind::Heading { level } => {
                let header = classify_header(node, source);
                match level {
                    TITLE_LEVEL => title = header.text().to_string(),
                    SECTION_LEVEL => {
                        if header.text() == TASK_SECTION {
                            task_section_seen = true;
                        }
                        last_section = header.text().to_string();
                    }
                    _ => {}
                }
            }
            NodeKind::List if last_section == TASK_SECTION => {
                tasks = extract_checklist(node, source)?;
                // Nested lists were already read as part of this one.
                walk.skip_children(node);
            }
            NodeKind::Document
            | NodeKind::List
            | NodeKind::ListItem
            | NodeKind::TaskCheckBox { .. }
            | NodeKind::Text { .. }
            | NodeKind::Emphasis
            | NodeKind::Container => {}
        }
    }

    if !task_section_seen {
        return Err(NoteError::MissingTaskSection);
    }
    if title.is_empty() {
        return Err(NoteError::MissingTitle);
    }
    if tasks.is_empty() {
        return Err(NoteError::EmptyTaskList);
    }

    Ok(Note::new(title, tasks))
}
