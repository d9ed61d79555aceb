//! Hosted flow client — runs released prompt flows over HTTP.
//!
//! Wire contract:
//! - `POST {base}/{flow_id}/run` with `Authorization: Bearer <key>` and a
//!   JSON body `{"inputs": {...}, "version": "^1.0"}`
//! - the response is a newline-delimited stream of JSON records; each
//!   record's `value` object carries a `type` field, and when
//!   `type == "chunk"` the `value.value` string is a text fragment to
//!   concatenate in arrival order
//! - records of any other type (`generation`, `outputs`, `prompt`)
//!   contribute no text
//! - a non-2xx status is a hard failure for that call
//!
//! Every request carries a bounded timeout so a hung backend cannot block
//! a run indefinitely.

use async_trait::async_trait;
use draftsmith_core::error::FlowError;
use draftsmith_core::flow::{FlowBackend, FlowRequest};
use futures::StreamExt;
use std::time::Duration;
use tracing::{debug, trace, warn};

const FLOW_VERSION: &str = "^1.0";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// HTTP client for the hosted flow run endpoint.
pub struct HostedFlowClient {
    name: String,
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl HostedFlowClient {
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
            name: "hosted-flow".into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        }
    }

    fn run_url(&self, flow_id: &str) -> String {
        format!("{}/{}/run", self.base_url, flow_id)
    }

    async fn send(&self, request: &FlowRequest) -> Result<reqwest::Response, FlowError> {
        let url = self.run_url(&request.flow_id);
        let body = serde_json::json!({
            "inputs": request.inputs,
            "version": FLOW_VERSION,
        });

        debug!(flow_id = %request.flow_id, "Sending flow run request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FlowError::Timeout(e.to_string())
                } else {
                    FlowError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(FlowError::RateLimited { retry_after_secs: 5 });
        }
        if status == 401 || status == 403 {
            return Err(FlowError::AuthenticationFailed(
                "Invalid flow API key".into(),
            ));
        }
        if !(200..300).contains(&status) {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Flow API error");
            return Err(FlowError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        Ok(response)
    }
}

/// Extract the text fragment from one stream record, if it carries one.
///
/// Returns `Some(text)` only for `{"value":{"type":"chunk","value":text}}`
/// records; any other record type, and any unparseable line, contributes
/// nothing.
pub fn chunk_fragment(line: &str) -> Option<String> {
    let record: serde_json::Value = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(e) => {
            trace!(error = %e, line = %line, "Ignoring unparseable stream line");
            return None;
        }
    };

    let value = &record["value"];
    if value["type"].as_str() == Some("chunk") {
        value["value"].as_str().map(|s| s.to_string())
    } else {
        None
    }
}

#[async_trait]
impl FlowBackend for HostedFlowClient {
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, request: FlowRequest) -> Result<String, FlowError> {
        let mut rx = self.stream(request).await?;
        let mut text = String::new();
        while let Some(fragment) = rx.recv().await {
            text.push_str(&fragment?);
        }
        Ok(text)
    }

    async fn stream(
        &self,
        request: FlowRequest,
    ) -> Result<tokio::sync::mpsc::Receiver<Result<String, FlowError>>, FlowError> {
        let response = self.send(&request).await?;
        let (tx, rx) = tokio::sync::mpsc::channel(64);

        tokio::spawn(async move {
            let mut byte_stream = response.bytes_stream();
            let mut buffer = String::new();

            while let Some(chunk_result) = byte_stream.next().await {
                let bytes = match chunk_result {
                    Ok(b) => b,
                    Err(e) => {
                        let _ = tx
                            .send(Err(FlowError::StreamInterrupted(e.to_string())))
                            .await;
                        return;
                    }
                };

                buffer.push_str(&String::from_utf8_lossy(&bytes));

                while let Some(line_end) = buffer.find('\n') {
                    let line = buffer[..line_end].trim_end_matches('\r').to_string();
                    buffer = buffer[line_end + 1..].to_string();

                    if line.is_empty() {
                        continue;
                    }
                    if let Some(fragment) = chunk_fragment(&line)
                        && tx.send(Ok(fragment)).await.is_err()
                    {
                        return;
                    }
                }
            }

            // Trailing record without a final newline
            let line = buffer.trim();
            if !line.is_empty()
                && let Some(fragment) = chunk_fragment(line)
            {
                let _ = tx.send(Ok(fragment)).await;
            }
        });

        Ok(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_trims_trailing_slash() {
        let client = HostedFlowClient::new("https://flows.example.com/api/", "ww-test");
        assert_eq!(client.base_url, "https://flows.example.com/api");
        assert_eq!(client.name(), "hosted-flow");
    }

    #[test]
    fn run_url_includes_flow_id() {
        let client = HostedFlowClient::new("https://flows.example.com/api", "ww-test");
        assert_eq!(
            client.run_url("abc-123"),
            "https://flows.example.com/api/abc-123/run"
        );
    }

    #[test]
    fn chunk_fragment_extracts_chunk_text() {
        let line = r#"{"value":{"type":"chunk","value":"A"}}"#;
        assert_eq!(chunk_fragment(line).as_deref(), Some("A"));
    }

    #[test]
    fn chunk_fragment_ignores_other_record_types() {
        assert!(chunk_fragment(r#"{"value":{"type":"generation","state":"start","label":"x"}}"#).is_none());
        assert!(chunk_fragment(r#"{"value":{"type":"outputs","values":{}}}"#).is_none());
        assert!(chunk_fragment(r#"{"value":{"type":"prompt"}}"#).is_none());
    }

    #[test]
    fn chunk_fragment_ignores_garbage() {
        assert!(chunk_fragment("not json").is_none());
        assert!(chunk_fragment("{}").is_none());
        assert!(chunk_fragment(r#"{"value":{"type":"chunk"}}"#).is_none());
    }

    #[test]
    fn fragments_concatenate_in_arrival_order() {
        let lines = [
            r#"{"value":{"type":"generation","state":"start","label":"essay"}}"#,
            r#"{"value":{"type":"chunk","value":"A"}}"#,
            r#"{"value":{"type":"chunk","value":"B"}}"#,
            r#"{"value":{"type":"outputs","values":{}}}"#,
        ];

        let text: String = lines.iter().filter_map(|l| chunk_fragment(l)).collect();
        assert_eq!(text, "AB");
    }

    #[test]
    fn chunk_fragment_preserves_whitespace_in_text() {
        let line = r#"{"value":{"type":"chunk","value":" spaced \n"}}"#;
        assert_eq!(chunk_fragment(line).as_deref(), Some(" spaced \n"));
    }
}
