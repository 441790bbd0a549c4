//! Progress note extraction core.
//! Turns a markdown note (`# title`, `## Task` checklist) into a title plus
//! tasks with completion state.

pub mod ast;
pub mod extract;
pub mod logging;
pub mod markdown;
pub mod model;
pub mod parser;
pub mod walker;

pub use ast::{Node, NodeKind};
pub use extract::{classify_header, extract_checklist, extract_text, ChecklistError};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use markdown::parse_markdown;
pub use model::note::{Header, Note, Task};
pub use parser::{parse_note, NoteParser};
pub use walker::{parse, NoteError, TASK_SECTION};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
