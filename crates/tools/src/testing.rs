//! Shared mock backends for tool tests.

use async_trait::async_trait;
use draftsmith_core::error::{FlowError, SearchError};
use draftsmith_core::flow::{FlowBackend, FlowRequest};
use draftsmith_core::search::{SearchBackend, SearchHit, SearchQuery, SearchResults};
use std::sync::Mutex;

/// A flow backend that returns the same text for every request and records
/// the requests it saw.
pub struct StaticFlow {
    pub text: String,
    pub requests: Mutex<Vec<FlowRequest>>,
}

impl StaticFlow {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.into(),
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl FlowBackend for StaticFlow {
    fn name(&self) -> &str {
        "static_flow"
    }

    async fn run(&self, request: FlowRequest) -> Result<String, FlowError> {
        self.requests.lock().unwrap().push(request);
        Ok(self.text.clone())
    }
}

/// A flow backend whose every call fails with a transport error.
pub struct FailingFlow;

#[async_trait]
impl FlowBackend for FailingFlow {
    fn name(&self) -> &str {
        "failing_flow"
    }

    async fn run(&self, _request: FlowRequest) -> Result<String, FlowError> {
        Err(FlowError::Network("connection reset".into()))
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
