//! Research tool — derive a search query, then run it.
//!
//! Two hops: the query-writer flow turns {transcript, thought} into a
//! search query, then the search backend executes it. A failed search
//! degrades to an empty result set; a failed query flow leaves the step
//! with no usable observation. Neither failure escapes the tool.

use async_trait::async_trait;
use draftsmith_core::error::ToolError;
use draftsmith_core::flow::{FlowBackend, FlowRequest};
use draftsmith_core::search::{SearchBackend, SearchQuery, SearchResults};
use draftsmith_core::tool::{Tool, ToolContext, ToolOutcome};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct ResearchTool {
    flows: Arc<dyn FlowBackend>,
    search: Arc<dyn SearchBackend>,
    query_flow: String,
    num_results: usize,
    category: String,
}

impl ResearchTool {
    pub fn new(
        flows: Arc<dyn FlowBackend>,
        search: Arc<dyn SearchBackend>,
        query_flow: impl Into<String>,
    ) -> Self {
        Self {
            flows,
            search,
            query_flow: query_flow.into(),
            num_results: 5,
            category: "research paper".into(),
        }
    }

    pub fn with_num_results(mut self, n: usize) -> Self {
        self.num_results = n;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}

#[async_trait]
impl Tool for ResearchTool {
    fn name(&self) -> &str {
        "research"
    }

    async fn invoke(&self, ctx: ToolContext<'_>) -> Result<ToolOutcome, ToolError> {
        let request = FlowRequest::new(&self.query_flow)
            .with_input("transcript", ctx.transcript)
            .with_input("thought", ctx.thought);

        let search_term = match self.flows.run(request).await {
            Ok(term) => term.trim().to_string(),
            Err(e) => {
                warn!(error = %e, "Query-writer flow failed, no research observation");
                return Ok(ToolOutcome::nothing());
            }
        };

        if search_term.is_empty() {
            warn!("Query-writer flow produced an empty search term");
            return Ok(ToolOutcome::nothing());
        }

        debug!(search_term = %search_term, "Running research search");

        let query = SearchQuery::new(&search_term)
            .with_num_results(self.num_results)
            .with_category(&self.category);

        let results = match self.search.search(query).await {
            Ok(results) => results,
            Err(e) => {
                warn!(error = %e, "Search failed, treating as empty result set");
                SearchResults::empty()
            }
        };

        Ok(ToolOutcome::append(format!(
            "Search query: {search_term}\n{}",
            results.render()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingFlow, FailingSearch, StaticFlow, StaticSearch};

    fn ctx<'a>() -> ToolContext<'a> {
        ToolContext {
            transcript: "prior context",
            thought: "I should look up symbol grounding",
            question: "q",
            essay_point: "p",
        }
    }

    #[tokio::test]
    async fn derives_query_and_renders_results() {
        let flows = Arc::new(StaticFlow::new("symbol grounding problem"));
        let search = Arc::new(StaticSearch::with_titles(&["Paper One", "Paper Two"]));
        let tool = ResearchTool::new(flows.clone(), search, "query-flow");

        let outcome = tool.invoke(ctx()).await.unwrap();
        let observation = outcome.observation.unwrap();
        assert!(observation.contains("Search query: symbol grounding problem"));
        assert!(observation.contains("Paper One"));
        assert!(observation.contains("Paper Two"));

        // The query flow received both inputs
        let requests = flows.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].flow_id, "query-flow");
        assert!(requests[0].inputs.contains_key("transcript"));
        assert!(requests[0].inputs.contains_key("thought"));
    }

    #[tokio::test]
    async fn query_flow_failure_yields_no_observation() {
        let tool = ResearchTool::new(
            Arc::new(FailingFlow),
            Arc::new(StaticSearch::with_titles(&["unused"])),
            "query-flow",
        );

        let outcome = tool.invoke(ctx()).await.unwrap();
        assert!(outcome.observation.is_none());
    }

    #[tokio::test]
    async fn empty_query_yields_no_observation() {
        let tool = ResearchTool::new(
            Arc::new(StaticFlow::new("  \n")),
            Arc::new(StaticSearch::with_titles(&["unused"])),
            "query-flow",
        );

        let outcome = tool.invoke(ctx()).await.unwrap();
        assert!(outcome.observation.is_none());
    }

    #[tokio::test]
    async fn search_failure_degrades_to_empty_results() {
        let tool = ResearchTool::new(
            Arc::new(StaticFlow::new("a query")),
            Arc::new(FailingSearch),
            "query-flow",
        );

        let outcome = tool.invoke(ctx()).await.unwrap();
        let observation = outcome.observation.unwrap();
        assert!(observation.contains("Search query: a query"));
        assert!(observation.contains("No search results."));
    }
}
