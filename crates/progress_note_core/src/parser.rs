//! Source-level note parsing entry points.
//!
//! # Responsibility
//! - Read raw markdown from a stream or string.
//! - Wire the markdown adapter into the document walker.
//! - Emit metadata-only diagnostics for each parse.
//!
//! # Invariants
//! - Every call builds fresh walker state; nothing is shared across calls.
//! - Log lines never contain note text.

use crate::markdown::parse_markdown;
use crate::model::note::Note;
use crate::walker::{self, NoteError};
use log::{debug, warn};
use std::io::Read;

/// Parses one progress note from a reader.
pub struct NoteParser<R: Read> {
    reader: R,
}

impl<R: Read> NoteParser<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Consumes the reader and extracts the note.
    ///
    /// # Errors
    /// - [`NoteError::Read`] when the stream fails or is not valid UTF-8.
    /// - Any walker error, see [`walker::parse`].
    pub fn parse(mut self) -> Result<Note, NoteError> {
        let mut content = String::new();
        if let Err(err) = self.reader.read_to_string(&mut content) {
            warn!("event=note_read module=parser status=error error_kind={:?}", err.kind());
            return Err(NoteError::Read(err));
        }
        parse_note(&content)
    }
}

/// Parses one progress note from in-memory markdown.
pub fn parse_note(source: &str) -> Result<Note, NoteError> {
    let document = parse_markdown(source);
    match walker::parse(&document, source) {
        Ok(note) => {
            debug!(
                "event=note_parse module=parser status=ok bytes={} tasks={} completed={}",
                source.len(),
                note.tasks().len(),
                note.completed_count()
            );
            Ok(note)
        }
        Err(err) => {
            warn!(
                "event=note_parse module=parser status=error bytes={} error={}",
                source.len(),
                err
            );
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::NoteParser;
    use crate::walker::NoteError;
    use std::io::{self, Read};

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }
    }

    #[test]
    fn read_failure_is_wrapped() {
        let err = NoteParser::new(FailingReader)
            .parse()
            .expect_err("reader fails");

        assert!(matches!(err, NoteError::Read(_)));
        assert_eq!(err.to_string(), "failed to read content: pipe closed");
    }

    #[test]
    fn invalid_utf8_is_a_read_error() {
        let bytes: &[u8] = &[b'#', b' ', 0xff, 0xfe];
        let err = NoteParser::new(bytes).parse().expect_err("not utf-8");
        assert!(matches!(err, NoteError::Read(_)));
    }
}
