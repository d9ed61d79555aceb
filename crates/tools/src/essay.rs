//! Essay-writer tool — draft prose from the accumulated context.
//!
//! One flow call over {transcript, essay_question, essay_point}. The flow
//! itself is prompted to hit the 900–1100 word target; the tool just
//! carries the draft back as an observation.

use async_trait::async_trait;
use draftsmith_core::error::ToolError;
use draftsmith_core::flow::{FlowBackend, FlowRequest};
use draftsmith_core::tool::{Tool, ToolContext, ToolOutcome};
use std::sync::Arc;
use tracing::warn;

pub struct EssayTool {
    flows: Arc<dyn FlowBackend>,
    essay_flow: String,
}

impl EssayTool {
    pub fn new(flows: Arc<dyn FlowBackend>, essay_flow: impl Into<String>) -> Self {
        Self {
            flows,
            essay_flow: essay_flow.into(),
        }
    }
}

#[async_trait]
impl Tool for EssayTool {
    fn name(&self) -> &str {
        "essay_writer"
    }

    async fn invoke(&self, ctx: ToolContext<'_>) -> Result<ToolOutcome, ToolError> {
        let request = FlowRequest::new(&self.essay_flow)
            .with_input("transcript", ctx.transcript)
            .with_input("essay_question", ctx.question)
            .with_input("essay_point", ctx.essay_point);

        match self.flows.run(request).await {
            Ok(essay) => Ok(ToolOutcome::append(essay)),
            Err(e) => {
                warn!(error = %e, "Essay-writer flow failed, no draft produced");
                Ok(ToolOutcome::nothing())
            }
        }
    }
}
