//! Step events — what the loop surfaces to the human-facing display.
//!
//! The display surface is an external collaborator: anything that can
//! render a line of text satisfies the contract. The loop emits typed
//! events through a [`StepSink`] as each step's output materializes;
//! `Chunk` events additionally stream flow output fragments as they
//! arrive.

use serde::{Deserialize, Serialize};

/// Events emitted by the agent during a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentEvent {
    /// Partial text fragment from a streaming flow call.
    Chunk { content: String },

    /// A completed thought.
    Thought { content: String },

    /// The validated action for this step.
    Action { label: String, recognized: bool },

    /// A tool's observation.
    Observation { content: String },

    /// The thinker produced nothing; the iteration was skipped.
    Stalled { step: u32 },

    /// A recoverable failure, surfaced and then worked around.
    Error { message: String },

    /// The actor picked `done`.
    Done { steps: usize },

    /// The step budget ran out before `done`.
    BudgetExhausted { steps: usize },
}

impl AgentEvent {
    /// Wire name for this event type.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Chunk { .. } => "chunk",
            Self::Thought { .. } => "thought",
            Self::Action { .. } => "action",
            Self::Observation { .. } => "observation",
            Self::Stalled { .. } => "stalled",
            Self::Error { .. } => "error",
            Self::Done { .. } => "done",
            Self::BudgetExhausted { .. } => "budget_exhausted",
        }
    }
}

/// The display surface the loop reports to.
pub trait StepSink: Send + Sync {
    fn emit(&self, event: AgentEvent);
}

/// A sink that drops everything. Used when no display is attached.
pub struct NullSink;

impl StepSink for NullSink {
    fn emit(&self, _event: AgentEvent) {}
}
