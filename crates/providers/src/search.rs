//! Neural search client — one query, one structured result set.
//!
//! Wire contract: `POST {base}/search` with an `x-api-key` header and a
//! JSON body selecting neural search with autoprompt, a result count, a
//! category filter, and text/highlights/summary contents. The response
//! carries a `results` array mapped onto [`SearchHit`]s.

use async_trait::async_trait;
use draftsmith_core::error::SearchError;
use draftsmith_core::search::{SearchBackend, SearchHit, SearchQuery, SearchResults};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// HTTP client for the neural search endpoint.
pub struct NeuralSearchClient {
    name: String,
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl NeuralSearchClient {
    /// Create a new client with the default request timeout.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_timeout(base_url, api_key, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a new client with an explicit per-request timeout.
    pub fn with_timeout(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            name: "neural-search".into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        }
    }

    fn to_api_request(query: &SearchQuery) -> ApiSearchRequest {
        ApiSearchRequest {
            query: query.query.clone(),
            search_type: "neural".into(),
            use_autoprompt: true,
            num_results: query.num_results,
            category: query.category.clone(),
            contents: ApiContents {
                text: true,
                highlights: true,
                summary: true,
            },
        }
    }

    fn from_api_response(resp: ApiSearchResponse) -> SearchResults {
        SearchResults {
            hits: resp
                .results
                .into_iter()
                .map(|r| SearchHit {
                    title: r.title.unwrap_or_default(),
                    url: r.url,
                    text: r.text.unwrap_or_default(),
                    highlights: r.highlights,
                    summary: r.summary,
                })
                .collect(),
        }
    }
}

#[async_trait]
impl SearchBackend for NeuralSearchClient {
    fn name(&self) -> &str {
        &self.name
    }

    async fn search(&self, query: SearchQuery) -> Result<SearchResults, SearchError> {
        let url = format!("{}/search", self.base_url);
        let body = Self::to_api_request(&query);

        debug!(query = %query.query, num_results = query.num_results, "Sending search request");

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::Timeout(e.to_string())
                } else {
                    SearchError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();

        if status == 401 || status == 403 {
            return Err(SearchError::AuthenticationFailed(
                "Invalid search API key".into(),
            ));
        }
        if !(200..300).contains(&status) {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Search API error");
            return Err(SearchError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let api_resp: ApiSearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::MalformedResponse(e.to_string()))?;

        Ok(Self::from_api_response(api_resp))
    }
}

// --- Search API types ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiSearchRequest {
    query: String,
    #[serde(rename = "type")]
    search_type: String,
    use_autoprompt: bool,
    num_results: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    contents: ApiContents,
}

#[derive(Debug, Serialize)]
struct ApiContents {
    text: bool,
    highlights: bool,
    summary: bool,
}

#[derive(Debug, Deserialize)]
struct ApiSearchResponse {
    #[serde(default)]
    results: Vec<ApiSearchResult>,
}

#[derive(Debug, Deserialize)]
struct ApiSearchResult {
    #[serde(default)]
    title: Option<String>,
    url: String,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    highlights: Vec<String>,
    #[serde(default)]
    summary: Option<String>,
}
