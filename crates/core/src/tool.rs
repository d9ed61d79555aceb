//! Tool trait — the abstraction over the loop's invocable operations.
//!
//! Tools are what the loop dispatches to after the actor picks an action:
//! research, summarize, essay_writer. Each takes the accumulated run
//! context and produces a text observation plus an instruction for how
//! that observation lands in the transcript (appended, or replacing it).

use crate::error::ToolError;
use async_trait::async_trait;

/// The inputs available to a tool invocation.
///
/// Borrowed views into the session — tools never own or mutate run state;
/// the loop applies the returned [`TranscriptEffect`].
#[derive(Debug, Clone, Copy)]
pub struct ToolContext<'a> {
    /// Snapshot of the transcript at dispatch time.
    pub transcript: &'a str,

    /// The thought that led to this dispatch.
    pub thought: &'a str,

    /// The essay question chosen by the operator.
    pub question: &'a str,

    /// The point the essay should drive.
    pub essay_point: &'a str,
}

/// How a tool's observation lands in the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptEffect {
    /// Concatenate the observation onto the transcript.
    Append,

    /// Discard the transcript and restart from the observation.
    Replace,
}

/// The result of one tool invocation.
#[derive(Debug, Clone)]
pub struct ToolOutcome {
    /// The produced text, or `None` when the backing call failed and there
    /// is no usable observation.
    pub observation: Option<String>,

    /// How the observation (if any) is applied.
    pub effect: TranscriptEffect,
}

impl ToolOutcome {
    /// An appended observation.
    pub fn append(text: impl Into<String>) -> Self {
        Self {
            observation: Some(text.into()),
            effect: TranscriptEffect::Append,
        }
    }

    /// An observation that replaces the transcript.
    pub fn replace(text: impl Into<String>) -> Self {
        Self {
            observation: Some(text.into()),
            effect: TranscriptEffect::Replace,
        }
    }

    /// No usable observation; the loop proceeds without one.
    pub fn nothing() -> Self {
        Self {
            observation: None,
            effect: TranscriptEffect::Append,
        }
    }
}

/// The core Tool trait.
///
/// Backing-call transport failures are recovered inside the tool and
/// surfaced as [`ToolOutcome::nothing`] — a tool error is reserved for
/// conditions the loop cannot sensibly continue past.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The action label this tool serves.
    fn name(&self) -> &str;

    /// Execute the tool against the current run context.
    async fn invoke(&self, ctx: ToolContext<'_>) -> std::result::Result<ToolOutcome, ToolError>;
}
