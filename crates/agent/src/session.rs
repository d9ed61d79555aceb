//! Essay session — caller-owned state for a single run.
//!
//! Created when the operator supplies a question and an essay point,
//! discarded (or replaced) when the run ends. The session owns the
//! transcript and a structured per-step record; nothing about a run lives
//! in ambient global state.

use chrono::{DateTime, Utc};
use draftsmith_core::action::Action;
use draftsmith_core::transcript::Transcript;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One completed loop iteration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    pub thought: String,
    pub action: Action,
    pub observation: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// The state of one user-triggered run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EssaySession {
    /// Unique id for this run.
    pub id: Uuid,

    /// The essay question chosen by the operator.
    pub question: String,

    /// The point the essay should drive.
    pub essay_point: String,

    /// The accumulated textual history, context for every flow call.
    pub transcript: Transcript,

    /// Structured step records, in execution order.
    pub records: Vec<StepRecord>,

    /// Number of loop iterations started so far.
    pub steps: usize,
}

impl EssaySession {
    /// Start a fresh session for one run.
    pub fn new(question: impl Into<String>, essay_point: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            question: question.into(),
            essay_point: essay_point.into(),
            transcript: Transcript::new(),
            records: Vec::new(),
            steps: 0,
        }
    }

    /// Record a completed step.
    pub fn record_step(&mut self, thought: String, action: Action, observation: Option<String>) {
        self.records.push(StepRecord {
            thought,
            action,
            observation,
            timestamp: Utc::now(),
        });
    }

    /// Clear run state for reuse with the same question and point.
    pub fn reset(&mut self) {
        self.transcript = Transcript::new();
        self.records.clear();
        self.steps = 0;
    }
}
