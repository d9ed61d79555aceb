//! Transcript — the accumulated textual history of one run.
//!
//! An ordered, append-only sequence of typed segments (thought / action /
//! observation). The concatenated text is the context for every flow call.
//! Segments are never removed or reordered, with one exception: the
//! summarize tool *replaces* the whole transcript with its summary.
//!
//! The transcript is owned by a single session and has exactly one writer;
//! a new run starts from an empty transcript.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of a transcript segment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SegmentKind {
    Thought,
    Action,
    Observation,
}

/// One appended piece of transcript text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Append-only text log for a single run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    segments: Vec<Segment>,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a segment to the end of the transcript.
    pub fn append(&mut self, kind: SegmentKind, text: impl Into<String>) {
        self.segments.push(Segment {
            kind,
            text: text.into(),
            timestamp: Utc::now(),
        });
    }

    /// Discard all prior content and restart from `text`.
    ///
    /// Used only by the summarize tool: the summary stands in for
    /// everything it condensed, recorded as a single observation segment.
    pub fn replace(&mut self, text: impl Into<String>) {
        self.segments.clear();
        self.append(SegmentKind::Observation, text);
    }

    /// The full concatenated text, in emission order.
    ///
    /// This is what every subsequent flow call receives as context.
    pub fn snapshot(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&segment.text);
        }
        out
    }

    /// The recorded segments, in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments recorded so far.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Count of segments of a given kind.
    pub fn count_of(&self, kind: SegmentKind) -> usize {
        self.segments.iter().filter(|s| s.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_transcript_is_empty() {
        let t = Transcript::new();
        assert!(t.is_empty());
        assert_eq!(t.snapshot(), "");
    }

    #[test]
    fn append_preserves_order() {
        let mut t = Transcript::new();
        t.append(SegmentKind::Thought, "first");
        t.append(SegmentKind::Action, "second");
        t.append(SegmentKind::Observation, "third");

        assert_eq!(t.len(), 3);
        assert_eq!(t.snapshot(), "first\nsecond\nthird");
        assert_eq!(t.segments()[0].kind, SegmentKind::Thought);
        assert_eq!(t.segments()[2].kind, SegmentKind::Observation);
    }

    #[test]
    fn append_is_monotonic() {
        let mut t = Transcript::new();
        let mut prev_len = 0;
        for i in 0..10 {
            t.append(SegmentKind::Thought, format!("step {i}"));
            assert!(t.len() > prev_len);
            prev_len = t.len();
        }
        // All ten appended segments present, in order.
        for (i, segment) in t.segments().iter().enumerate() {
            assert_eq!(segment.text, format!("step {i}"));
        }
    }

    #[test]
    fn replace_discards_prior_content() {
        let mut t = Transcript::new();
        t.append(SegmentKind::Thought, "old thought");
        t.append(SegmentKind::Action, "summarize");
        t.replace("the summary");

        assert_eq!(t.len(), 1);
        assert_eq!(t.snapshot(), "the summary");
        assert!(!t.snapshot().contains("old thought"));
    }

    #[test]
    fn append_after_replace_continues_from_summary() {
        let mut t = Transcript::new();
        t.append(SegmentKind::Thought, "a");
        t.replace("summary");
        t.append(SegmentKind::Thought, "next thought");

        assert_eq!(t.snapshot(), "summary\nnext thought");
    }

    #[test]
    fn count_of_kind() {
        let mut t = Transcript::new();
        t.append(SegmentKind::Thought, "t1");
        t.append(SegmentKind::Thought, "t2");
        t.append(SegmentKind::Action, "research");

        assert_eq!(t.count_of(SegmentKind::Thought), 2);
        assert_eq!(t.count_of(SegmentKind::Action), 1);
        assert_eq!(t.count_of(SegmentKind::Observation), 0);
    }

    #[test]
    fn serialization_roundtrip() {
        let mut t = Transcript::new();
        t.append(SegmentKind::Thought, "a thought");
        t.append(SegmentKind::Observation, "a result");

        let json = serde_json::to_string(&t).unwrap();
        let back: Transcript = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 2);
        assert_eq!(back.snapshot(), t.snapshot());
    }
}
