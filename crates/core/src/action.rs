//! Action — the closed set of operations the actor can select.
//!
//! The actor flow returns free text. Rather than dispatching on raw strings,
//! the text is sanitized and validated into this enum so the dispatcher is
//! total and exhaustively checked at compile time. Anything outside the
//! known labels becomes [`Action::Unrecognized`], which carries the
//! sanitized text for logging.

use serde::{Deserialize, Serialize};

/// One step's selected operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Derive a search query and run it against the search backend.
    Research,

    /// Condense the transcript; the summary replaces it.
    Summarize,

    /// Draft the essay from the accumulated transcript.
    EssayWriter,

    /// Terminate the run.
    Done,

    /// Anything the actor emitted that is not a known label.
    Unrecognized(String),
}

/// Strip literal backticks and surrounding whitespace from raw actor output.
///
/// The actor tends to wrap its answer in a code-formatted token; stripping
/// is idempotent: `sanitize(sanitize(s)) == sanitize(s)`.
pub fn sanitize(raw: &str) -> String {
    raw.replace('`', "").trim().to_string()
}

impl Action {
    /// Sanitize and validate raw actor output into the closed action set.
    ///
    /// Accepts the canonical labels plus the British `summarise` spelling
    /// the actor sometimes emits.
    pub fn parse(raw: &str) -> Self {
        let cleaned = sanitize(raw);
        match cleaned.as_str() {
            "research" => Self::Research,
            "summarize" | "summarise" => Self::Summarize,
            "essay_writer" => Self::EssayWriter,
            "done" => Self::Done,
            _ => Self::Unrecognized(cleaned),
        }
    }

    /// The canonical label for this action (what the transcript records).
    pub fn label(&self) -> &str {
        match self {
            Self::Research => "research",
            Self::Summarize => "summarize",
            Self::EssayWriter => "essay_writer",
            Self::Done => "done",
            Self::Unrecognized(raw) => raw,
        }
    }

    /// Whether this action terminates the loop.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Whether this action maps to a known tool or terminator.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_backticks() {
        assert_eq!(sanitize("`research`"), "research");
        assert_eq!(sanitize("``done``"), "done");
        assert_eq!(sanitize("  summarize \n"), "summarize");
    }

    #[test]
    fn sanitize_is_idempotent() {
        for s in ["`research`", "plain", "a`b`c", "  `` spaced `` ", ""] {
            let once = sanitize(s);
            assert_eq!(sanitize(&once), once);
        }
    }

    #[test]
    fn parse_known_labels() {
        assert_eq!(Action::parse("research"), Action::Research);
        assert_eq!(Action::parse("summarize"), Action::Summarize);
        assert_eq!(Action::parse("essay_writer"), Action::EssayWriter);
        assert_eq!(Action::parse("done"), Action::Done);
    }

    #[test]
    fn parse_accepts_british_summarise() {
        assert_eq!(Action::parse("summarise"), Action::Summarize);
        assert_eq!(Action::parse("`summarise`"), Action::Summarize);
    }

    #[test]
    fn parse_strips_formatting_before_matching() {
        assert_eq!(Action::parse("`done`"), Action::Done);
        assert_eq!(Action::parse(" research\n"), Action::Research);
    }

    #[test]
    fn parse_unknown_is_unrecognized() {
        assert_eq!(
            Action::parse("mark"),
            Action::Unrecognized("mark".into())
        );
        assert_eq!(Action::parse(""), Action::Unrecognized(String::new()));
        match Action::parse("`word_count`") {
            Action::Unrecognized(raw) => assert_eq!(raw, "word_count"),
            other => panic!("Expected Unrecognized, got {other:?}"),
        }
    }

    #[test]
    fn terminal_and_recognized_flags() {
        assert!(Action::Done.is_terminal());
        assert!(!Action::Research.is_terminal());
        assert!(Action::Summarize.is_recognized());
        assert!(!Action::Unrecognized("x".into()).is_recognized());
    }

    #[test]
    fn display_uses_label() {
        assert_eq!(Action::EssayWriter.to_string(), "essay_writer");
        assert_eq!(Action::Unrecognized("huh".into()).to_string(), "huh");
    }
}
