//! The Draftsmith agent loop — the heart of the system.
//!
//! One run drives a **Thought → Action → Observation** cycle:
//!
//! 1. **THINKING** — the thinker flow produces the next thought from the
//!    system instructions, the chosen question, the essay point, and the
//!    transcript so far
//! 2. **ACTING** — the actor flow maps that thought to an action label,
//!    which is sanitized and validated into the closed action set
//! 3. **DISPATCHING** — the matching tool runs and its observation lands
//!    in the transcript (appended, or replacing it for summarize)
//!
//! The loop ends when the actor picks `done`, or when the configured step
//! budget runs out — a distinct terminal outcome. Steps are strictly
//! sequential: every flow call and tool invocation is awaited to
//! completion before the next begins.

pub mod event;
pub mod runner;
pub mod session;

pub use event::{AgentEvent, NullSink, StepSink};
pub use runner::{EssayAgent, RunOutcome, RunReport};
pub use session::{EssaySession, StepRecord};

#[cfg(test)]
mod testing;
