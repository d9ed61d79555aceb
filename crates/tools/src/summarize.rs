//! Summarize tool — condense the transcript.
//!
//! The summary *replaces* the running transcript instead of appending to
//! it; this is how long runs keep their context bounded. A failed or empty
//! summary must never wipe the transcript, so those cases yield no
//! observation and leave it untouched.

use async_trait::async_trait;
use draftsmith_core::error::ToolError;
use draftsmith_core::flow::{FlowBackend, FlowRequest};
use draftsmith_core::tool::{Tool, ToolContext, ToolOutcome};
use std::sync::Arc;
use tracing::warn;

pub struct SummarizeTool {
    flows: Arc<dyn FlowBackend>,
    summarizer_flow: String,
}

impl SummarizeTool {
    pub fn new(flows: Arc<dyn FlowBackend>, summarizer_flow: impl Into<String>) -> Self {
        Self {
            flows,
            summarizer_flow: summarizer_flow.into(),
        }
    }
}

#[async_trait]
impl Tool for SummarizeTool {
    fn name(&self) -> &str {
        "summarize"
    }

    async fn invoke(&self, ctx: ToolContext<'_>) -> Result<ToolOutcome, ToolError> {
        let request =
            FlowRequest::new(&self.summarizer_flow).with_input("transcript", ctx.transcript);

        let summary = match self.flows.run(request).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Summarizer flow failed, transcript left unchanged");
                return Ok(ToolOutcome::nothing());
            }
        };

        if summary.trim().is_empty() {
            warn!("Summarizer flow produced an empty summary, transcript left unchanged");
            return Ok(ToolOutcome::nothing());
        }

        Ok(ToolOutcome::replace(summary))
    }
}
