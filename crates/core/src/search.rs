//! SearchBackend trait — the abstraction over the neural search service.
//!
//! One query in, a structured result set out. The research tool renders the
//! results to flat text for the transcript; the backend itself stays
//! oblivious to how results are consumed.

use crate::error::SearchError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A single search query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    /// The query text.
    pub query: String,

    /// Maximum number of results to return.
    pub num_results: usize,

    /// Result category filter (e.g. "research paper").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            num_results: 5,
            category: None,
        }
    }

    pub fn with_num_results(mut self, n: usize) -> Self {
        self.num_results = n;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// One search result item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,

    /// Full text of the result, when requested.
    #[serde(default)]
    pub text: String,

    /// Highlighted passages.
    #[serde(default)]
    pub highlights: Vec<String>,

    /// Generated summary of the result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// The full result set for one query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResults {
    pub hits: Vec<SearchHit>,
}

impl SearchResults {
    /// An empty result set — the degraded form used when search fails.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Render the result set as transcript-ready text.
    pub fn render(&self) -> String {
        if self.hits.is_empty() {
            return "No search results.".into();
        }

        let mut out = String::new();
        for (i, hit) in self.hits.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&format!("{}. {} ({})", i + 1, hit.title, hit.url));
            if let Some(summary) = &hit.summary {
                out.push_str(&format!("\n   Summary: {summary}"));
            }
            for highlight in &hit.highlights {
                out.push_str(&format!("\n   > {highlight}"));
            }
        }
        out
    }
}

/// The core search-backend trait.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// A human-readable name for this backend.
    fn name(&self) -> &str;

    /// Execute a single query.
    async fn search(&self, query: SearchQuery) -> std::result::Result<SearchResults, SearchError>;
}
