//! Shared test helpers for loop tests.

use crate::event::{AgentEvent, StepSink};
use async_trait::async_trait;
use draftsmith_core::error::{FlowError, SearchError};
use draftsmith_core::flow::{FlowBackend, FlowRequest};
use draftsmith_core::search::{SearchBackend, SearchHit, SearchQuery, SearchResults};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// A flow backend that returns scripted responses per flow id.
///
/// Each call pops the next response from that flow's queue. Panics if a
/// flow is called more times than it was scripted for.
pub struct ScriptedFlows {
    queues: Mutex<HashMap<String, VecDeque<Result<String, FlowError>>>>,
}

impl ScriptedFlows {
    pub fn new() -> Self {
        Self {
            queues: Mutex::new(HashMap::new()),
        }
    }

    /// Queue successful responses for a flow id.
    pub fn script(self, flow_id: &str, responses: &[&str]) -> Self {
        {
            let mut queues = self.queues.lock().unwrap();
            let queue = queues.entry(flow_id.to_string()).or_default();
            for r in responses {
                queue.push_back(Ok((*r).to_string()));
            }
        }
        self
    }

    /// Queue a transport failure for a flow id.
    pub fn script_failure(self, flow_id: &str) -> Self {
        {
            let mut queues = self.queues.lock().unwrap();
            queues
                .entry(flow_id.to_string())
                .or_default()
                .push_back(Err(FlowError::Network("scripted failure".into())));
        }
        self
    }
}

#[async_trait]
impl FlowBackend for ScriptedFlows {
    fn name(&self) -> &str {
        "scripted_flows"
    }

    async fn run(&self, request: FlowRequest) -> Result<String, FlowError> {
        let mut queues = self.queues.lock().unwrap();
        let queue = queues
            .get_mut(&request.flow_id)
            .unwrap_or_else(|| panic!("ScriptedFlows: no script for flow {:?}", request.flow_id));
        queue.pop_front().unwrap_or_else(|| {
            panic!("ScriptedFlows: script for flow {:?} exhausted", request.flow_id)
        })
    }
}

/// A search backend returning a fixed result set.
pub struct StaticSearch {
    pub results: SearchResults,
}

impl StaticSearch {
    pub fn with_titles(titles: &[&str]) -> Self {
        Self {
            results: SearchResults {
                hits: titles
                    .iter()
                    .map(|t| SearchHit {
                        title: (*t).into(),
                        url: format!("https://papers.example.org/{t}"),
                        ..Default::default()
                    })
                    .collect(),
            },
        }
    }
}

#[async_trait]
impl SearchBackend for StaticSearch {
    fn name(&self) -> &str {
        "static_search"
    }

    async fn search(&self, _query: SearchQuery) -> Result<SearchResults, SearchError> {
        Ok(self.results.clone())
    }
}

/// A search backend whose every call fails with a transport error.
pub struct FailingSearch;

#[async_trait]
impl SearchBackend for FailingSearch {
    fn name(&self) -> &str {
        "failing_search"
    }

    async fn search(&self, _query: SearchQuery) -> Result<SearchResults, SearchError> {
        Err(SearchError::Network("connection refused".into()))
    }
}

/// A sink that records everything it sees.
pub struct RecordingSink {
    pub events: Mutex<Vec<AgentEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn event_types(&self) -> Vec<&'static str> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.event_type())
            .collect()
    }
}

impl StepSink for RecordingSink {
    fn emit(&self, event: AgentEvent) {
        self.events.lock().unwrap().push(event);
    }
}
