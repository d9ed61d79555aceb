//! Toolbox — the dispatch table keyed by action.
//!
//! Dispatch is total over [`Action`]: the three tool actions route to their
//! handlers, `done` is handled by the loop before dispatch ever runs, and
//! unrecognized labels no-op with a warning. There is no string matching
//! here; the enum makes missing branches a compile error.

use draftsmith_core::action::Action;
use draftsmith_core::error::ToolError;
use draftsmith_core::tool::{Tool, ToolContext, ToolOutcome};
use tracing::warn;

use crate::{EssayTool, ResearchTool, SummarizeTool};

pub struct Toolbox {
    research: ResearchTool,
    summarize: SummarizeTool,
    essay: EssayTool,
}

impl Toolbox {
    pub fn new(research: ResearchTool, summarize: SummarizeTool, essay: EssayTool) -> Self {
        Self {
            research,
            summarize,
            essay,
        }
    }

    /// Execute the handler for `action`, if it has one.
    ///
    /// Returns `None` for `done` (the loop terminates before dispatch) and
    /// for unrecognized labels (logged, never raised).
    pub async fn dispatch(
        &self,
        action: &Action,
        ctx: ToolContext<'_>,
    ) -> Result<Option<ToolOutcome>, ToolError> {
        match action {
            Action::Research => self.research.invoke(ctx).await.map(Some),
            Action::Summarize => self.summarize.invoke(ctx).await.map(Some),
            Action::EssayWriter => self.essay.invoke(ctx).await.map(Some),
            Action::Done => Ok(None),
            Action::Unrecognized(raw) => {
                warn!(action = %raw, "No tool for action, skipping dispatch");
                Ok(None)
            }
        }
    }
}
