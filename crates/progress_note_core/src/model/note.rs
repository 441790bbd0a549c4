//! Note, task and header records.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// One checklist entry of the task section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    text: String,
    completed: bool,
}

impl Task {
    pub fn new(text: impl Into<String>, completed: bool) -> Self {
        Self {
            text: text.into(),
            completed,
        }
    }

    /// Literal item text as written in the source.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }
}

/// Extracted progress note.
///
/// Only the document walker constructs this type, so the title/tasks
/// invariants hold for every value a caller can observe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    title: String,
    tasks: Vec<Task>,
}

impl Note {
    pub(crate) fn new(title: String, tasks: Vec<Task>) -> Self {
        debug_assert!(!title.is_empty());
        debug_assert!(!tasks.is_empty());
        Self { title, tasks }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Tasks in document order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.is_completed()).count()
    }

    /// Share of completed tasks, in percent (`0.0..=100.0`).
    pub fn percent_of_completeness(&self) -> f64 {
        100.0 * self.completed_count() as f64 / self.tasks.len() as f64
    }
}

impl Serialize for Note {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Note", 3)?;
        state.serialize_field("title", &self.title)?;
        state.serialize_field("tasks", &self.tasks)?;
        state.serialize_field("percent_of_completeness", &self.percent_of_completeness())?;
        state.end()
    }
}

/// Heading text and level, used while walking a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    text: String,
    level: u8,
}

impl Header {
    pub fn new(text: impl Into<String>, level: u8) -> Self {
        Self {
            text: text.into(),
            level,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn level(&self) -> u8 {
        self.level
    }
}
