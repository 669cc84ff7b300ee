//! Instrumented immutable string

use statetrace_core::{
    ops, Content, Error, HighlightMark, Result, Snapshot, StructureId, StructureKind, Value,
};
use statetrace_engine::{RunContext, StateRecorder};
use std::ops::Range;
use std::sync::Arc;

/// A string that records character access, appends and substring
/// extraction
///
/// Shares the array structure kind: content is the ordered character
/// sequence. The string is immutable in place; growing happens only by
/// appending, and `substring` yields a new instrumented Text. Indices are
/// character positions, not byte offsets.
#[derive(Debug)]
pub struct Text {
    recorder: Arc<StateRecorder>,
    id: StructureId,
    body: String,
}

impl Text {
    /// Create a text from an initial body, bound to the run's recorder
    pub fn new(ctx: &RunContext, body: impl Into<String>) -> Result<Self> {
        let text = Self {
            recorder: ctx.recorder(),
            id: StructureId::new(),
            body: body.into(),
        };
        text.emit(ops::DECLARE, Vec::new(), None)?;
        Ok(text)
    }

    fn emit(
        &self,
        operation: &str,
        highlight: Vec<HighlightMark>,
        comment: Option<String>,
    ) -> Result<()> {
        let mut snapshot = Snapshot::new(
            self.id,
            StructureKind::Array,
            operation,
            Content::Linear(self.body.chars().map(Value::from).collect()),
        )
        .with_highlight(highlight);
        if let Some(comment) = comment {
            snapshot = snapshot.with_comment(comment);
        }
        self.recorder.append(snapshot)?;
        Ok(())
    }

    /// This container's stable identity within the trace
    pub fn structure_id(&self) -> StructureId {
        self.id
    }

    /// The current body; emits no snapshot
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Number of characters; emits no snapshot
    pub fn len(&self) -> usize {
        self.body.chars().count()
    }

    /// Check emptiness; emits no snapshot
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Read the character at `index`
    ///
    /// # Errors
    /// Fails with `StructureOperationError` when the index is out of range.
    pub fn access(&self, index: usize) -> Result<char> {
        let ch = match self.body.chars().nth(index) {
            Some(ch) => ch,
            None => {
                return Err(Error::invalid_operation(
                    ops::ACCESS,
                    StructureKind::Array,
                    format!("index {} out of range for length {}", index, self.len()),
                ))
            }
        };
        self.emit(ops::ACCESS, vec![HighlightMark::Position(index)], None)?;
        Ok(ch)
    }

    /// Append a string to the body
    ///
    /// Highlights the appended character range.
    pub fn append(&mut self, suffix: &str) -> Result<()> {
        let start = self.len();
        self.body.push_str(suffix);
        let highlight = (start..self.len()).map(HighlightMark::Position).collect();
        self.emit(ops::APPEND, highlight, None)
    }

    /// Extract a character range into a new instrumented text
    ///
    /// The parent records the extraction with the source range
    /// highlighted; the derived text records its own construction with an
    /// annotation naming the range.
    ///
    /// # Errors
    /// Fails with `StructureOperationError` when the range is out of
    /// bounds or reversed.
    pub fn substring(&self, range: Range<usize>) -> Result<Text> {
        let len = self.len();
        if range.start > range.end || range.end > len {
            return Err(Error::invalid_operation(
                ops::SUBSTRING,
                StructureKind::Array,
                format!("range {}..{} out of bounds for length {}", range.start, range.end, len),
            ));
        }
        let body: String = self
            .body
            .chars()
            .skip(range.start)
            .take(range.end - range.start)
            .collect();

        let highlight = range.clone().map(HighlightMark::Position).collect();
        self.emit(ops::SUBSTRING, highlight, None)?;

        let derived = Self {
            recorder: Arc::clone(&self.recorder),
            id: StructureId::new(),
            body,
        };
        derived.emit(
            ops::DECLARE,
            Vec::new(),
            Some(format!("substring {}..{} of {}", range.start, range.end, self.id)),
        )?;
        Ok(derived)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_records_characters() {
        let ctx = RunContext::begin_run();
        let recorder = ctx.recorder();
        let text = Text::new(&ctx, "hi").unwrap();

        assert_eq!(text.len(), 2);
        let declare = &recorder.snapshots()[0];
        assert_eq!(
            declare.content,
            Content::Linear(vec![Value::from('h'), Value::from('i')])
        );
    }

    #[test]
    fn test_access_returns_char() {
        let ctx = RunContext::begin_run();
        let recorder = ctx.recorder();
        let text = Text::new(&ctx, "abc").unwrap();

        assert_eq!(text.access(1).unwrap(), 'b');
        let last = recorder.snapshots().pop().unwrap();
        assert_eq!(last.operation, "access");
        assert_eq!(last.highlight, vec![HighlightMark::Position(1)]);
    }

    #[test]
    fn test_access_out_of_range_is_contained() {
        let ctx = RunContext::begin_run();
        let recorder = ctx.recorder();
        let text = Text::new(&ctx, "a").unwrap();
        let before = recorder.len();

        assert!(text.access(3).is_err());
        assert_eq!(recorder.len(), before);
    }

    #[test]
    fn test_append_highlights_new_range() {
        let ctx = RunContext::begin_run();
        let recorder = ctx.recorder();
        let mut text = Text::new(&ctx, "ab").unwrap();

        text.append("cd").unwrap();
        assert_eq!(text.body(), "abcd");
        let last = recorder.snapshots().pop().unwrap();
        assert_eq!(last.operation, "append");
        assert_eq!(
            last.highlight,
            vec![HighlightMark::Position(2), HighlightMark::Position(3)]
        );
    }

    #[test]
    fn test_substring_creates_derived_structure() {
        let ctx = RunContext::begin_run();
        let recorder = ctx.recorder();
        let text = Text::new(&ctx, "hello").unwrap();

        let sub = text.substring(1..4).unwrap();
        assert_eq!(sub.body(), "ell");
        assert_ne!(sub.structure_id(), text.structure_id());

        let snapshots = recorder.snapshots();
        // parent declare, parent substring, child declare
        assert_eq!(snapshots.len(), 3);
        assert_eq!(snapshots[1].operation, "substring");
        assert_eq!(snapshots[1].structure_id, text.structure_id());
        assert_eq!(snapshots[2].operation, "declare");
        assert_eq!(snapshots[2].structure_id, sub.structure_id());
        assert!(snapshots[2].comment.as_deref().unwrap().contains("substring 1..4"));
    }

    #[test]
    fn test_substring_bad_range_is_contained() {
        let ctx = RunContext::begin_run();
        let recorder = ctx.recorder();
        let text = Text::new(&ctx, "hi").unwrap();
        let before = recorder.len();

        assert!(text.substring(1..9).is_err());
        assert!(text.substring(2..1).is_err());
        assert_eq!(recorder.len(), before);
    }

    #[test]
    fn test_multibyte_characters_use_char_indices() {
        let ctx = RunContext::begin_run();
        let text = Text::new(&ctx, "héllo").unwrap();
        assert_eq!(text.len(), 5);
        assert_eq!(text.access(1).unwrap(), 'é');
        assert_eq!(text.substring(0..2).unwrap().body(), "hé");
    }

    #[test]
    fn test_trace_validates_end_to_end() {
        let ctx = RunContext::begin_run();
        let mut text = Text::new(&ctx, "ab").unwrap();
        text.append("c").unwrap();
        let _sub = text.substring(0..2).unwrap();

        let trace = ctx.end_run().unwrap();
        assert_eq!(trace.len(), 4);
    }
}
