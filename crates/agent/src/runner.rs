//! The agent loop controller.
//!
//! `EssayAgent` drives one session through THINKING → ACTING → DISPATCHING
//! until the actor picks `done` or the step budget runs out. Externally
//! caused failures are recovered at the call site — a failed flow call
//! becomes an empty text, a failed tool an empty observation — so nothing
//! short of a missing credential at startup aborts a run.

use draftsmith_core::action::Action;
use draftsmith_core::error::FlowError;
use draftsmith_core::flow::{FlowBackend, FlowRequest};
use draftsmith_core::tool::{ToolContext, TranscriptEffect};
use draftsmith_core::transcript::SegmentKind;
use draftsmith_tools::Toolbox;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::event::{AgentEvent, NullSink, StepSink};
use crate::session::EssaySession;

/// Default instructions handed to the thinker flow on every step.
const SYSTEM_INSTRUCTIONS: &str = "\
You are an agent that specialises in creating academic persuasive essays. \
You have additional tools in your arsenal and are not to ask the user to \
complete the task themselves. Ensure the quality of the output is top \
level, otherwise refine it. The essay must be between 900 and 1100 words, \
academic AND highly persuasive. Keep note of the structure of an essay and \
the general process of creating one from scratch. When you feel the essay \
is done, use the done action to finish the loop.
The tools available to you:
1. research
2. summarize
3. essay_writer
4. done
In your outputs use the following format:
Question: the input question you must answer
Thought: you should always think about what to do in one sentence
Action: the action to take, one of research, summarize, essay_writer or done
Input: the input to the action
Observation: the result of the action";

/// How a run ended.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// The actor picked `done`.
    Done,

    /// The step budget ran out first.
    BudgetExhausted,
}

/// The result of one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub outcome: RunOutcome,

    /// Loop iterations executed.
    pub steps: usize,

    /// Tool handlers actually invoked (done and unrecognized don't count).
    pub tool_dispatches: usize,
}

/// The loop controller.
pub struct EssayAgent {
    flows: Arc<dyn FlowBackend>,
    toolbox: Arc<Toolbox>,
    thinker_flow: String,
    actor_flow: String,
    system_instructions: String,
    max_steps: u32,
    sink: Arc<dyn StepSink>,
}

impl EssayAgent {
    /// Create a new agent with the default instructions and step budget.
    pub fn new(
        flows: Arc<dyn FlowBackend>,
        toolbox: Arc<Toolbox>,
        thinker_flow: impl Into<String>,
        actor_flow: impl Into<String>,
    ) -> Self {
        Self {
            flows,
            toolbox,
            thinker_flow: thinker_flow.into(),
            actor_flow: actor_flow.into(),
            system_instructions: SYSTEM_INSTRUCTIONS.into(),
            max_steps: 12,
            sink: Arc::new(NullSink),
        }
    }

    /// Set the maximum number of loop iterations.
    pub fn with_max_steps(mut self, max: u32) -> Self {
        self.max_steps = max;
        self
    }

    /// Override the thinker's system instructions.
    pub fn with_system_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.system_instructions = instructions.into();
        self
    }

    /// Attach a display surface.
    pub fn with_sink(mut self, sink: Arc<dyn StepSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Run a flow, forwarding fragments to the sink as they arrive.
    ///
    /// The text is fully materialized before this returns; the stream is
    /// only a display affordance, never a concurrency one.
    async fn streamed_text(&self, request: FlowRequest) -> Result<String, FlowError> {
        let mut rx = self.flows.stream(request).await?;
        let mut text = String::new();
        while let Some(fragment) = rx.recv().await {
            let fragment = fragment?;
            self.sink.emit(AgentEvent::Chunk {
                content: fragment.clone(),
            });
            text.push_str(&fragment);
        }
        Ok(text)
    }

    /// A flow call whose failure degrades to empty text for the step.
    async fn recovered_text(&self, request: FlowRequest, what: &str) -> String {
        match self.streamed_text(request).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "{what} flow call failed");
                self.sink.emit(AgentEvent::Error {
                    message: format!("{what} failed: {e}"),
                });
                String::new()
            }
        }
    }

    /// Drive one session to completion.
    ///
    /// Strictly sequential: each step's output is fully materialized
    /// before the next step begins.
    pub async fn run(&self, session: &mut EssaySession) -> RunReport {
        info!(
            session_id = %session.id,
            max_steps = self.max_steps,
            "Essay agent run starting"
        );

        let mut tool_dispatches = 0usize;

        for step in 1..=self.max_steps {
            session.steps = step as usize;
            debug!(step, "Agent loop iteration");

            // ── THINKING ──
            let request = FlowRequest::new(&self.thinker_flow)
                .with_input("system_instructions", self.system_instructions.as_str())
                .with_input("question_chosen", session.question.as_str())
                .with_input("essay_point", session.essay_point.as_str())
                .with_input("transcript", session.transcript.snapshot());

            let thought = self.recovered_text(request, "thinker").await;

            if thought.is_empty() {
                warn!(step, "Empty thought, skipping act and dispatch for this step");
                self.sink.emit(AgentEvent::Stalled { step });
                continue;
            }

            session.transcript.append(SegmentKind::Thought, &thought);
            self.sink.emit(AgentEvent::Thought {
                content: thought.clone(),
            });

            // ── ACTING ──
            let request =
                FlowRequest::new(&self.actor_flow).with_input("thought", thought.as_str());
            let raw_action = self.recovered_text(request, "actor").await;

            let action = Action::parse(&raw_action);
            session
                .transcript
                .append(SegmentKind::Action, action.label());
            self.sink.emit(AgentEvent::Action {
                label: action.label().to_string(),
                recognized: action.is_recognized(),
            });

            if action.is_terminal() {
                session.record_step(thought, action, None);
                info!(steps = step, tool_dispatches, "Essay agent run done");
                self.sink.emit(AgentEvent::Done {
                    steps: step as usize,
                });
                return RunReport {
                    outcome: RunOutcome::Done,
                    steps: step as usize,
                    tool_dispatches,
                };
            }

            // ── DISPATCHING ──
            let snapshot = session.transcript.snapshot();
            let ctx = ToolContext {
                transcript: &snapshot,
                thought: &thought,
                question: &session.question,
                essay_point: &session.essay_point,
            };

            let outcome = match self.toolbox.dispatch(&action, ctx).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(action = %action, error = %e, "Tool dispatch failed");
                    self.sink.emit(AgentEvent::Error {
                        message: format!("{action} failed: {e}"),
                    });
                    None
                }
            };

            let mut observation = None;
            if let Some(outcome) = outcome {
                tool_dispatches += 1;
                match outcome.observation {
                    Some(text) => {
                        match outcome.effect {
                            TranscriptEffect::Append => {
                                session.transcript.append(SegmentKind::Observation, &text);
                            }
                            TranscriptEffect::Replace => {
                                session.transcript.replace(&text);
                            }
                        }
                        self.sink.emit(AgentEvent::Observation {
                            content: text.clone(),
                        });
                        observation = Some(text);
                    }
                    None => {
                        warn!(action = %action, "No usable observation from tool");
                    }
                }
            }

            session.record_step(thought, action, observation);
        }

        warn!(max_steps = self.max_steps, "Step budget exhausted before done");
        self.sink.emit(AgentEvent::BudgetExhausted {
            steps: self.max_steps as usize,
        });
        RunReport {
            outcome: RunOutcome::BudgetExhausted,
            steps: self.max_steps as usize,
            tool_dispatches,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
