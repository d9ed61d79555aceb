//! FlowBackend trait — the abstraction over the hosted prompt-flow service.
//!
//! A flow backend knows how to run one released prompt flow with named
//! inputs and return the generated text, either fully materialized or as a
//! stream of text fragments. The agent loop calls `run()` or `stream()`
//! without knowing which implementation is behind it — the HTTP client in
//! the providers crate or a scripted stub in tests.

use crate::error::FlowError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A request to run one released flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowRequest {
    /// The released flow id (path segment of the run endpoint).
    pub flow_id: String,

    /// Named inputs, serialized as the request's `inputs` object.
    pub inputs: Map<String, Value>,
}

impl FlowRequest {
    /// Create a request with no inputs yet.
    pub fn new(flow_id: impl Into<String>) -> Self {
        Self {
            flow_id: flow_id.into(),
            inputs: Map::new(),
        }
    }

    /// Add a named text input.
    pub fn with_input(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.inputs.insert(name.into(), Value::String(value.into()));
        self
    }
}

/// The core flow-backend trait.
///
/// Implementations: the hosted HTTP client, scripted mocks in tests.
#[async_trait]
pub trait FlowBackend: Send + Sync {
    /// A human-readable name for this backend.
    fn name(&self) -> &str;

    /// Run a flow and return its fully materialized text output.
    async fn run(&self, request: FlowRequest) -> std::result::Result<String, FlowError>;

    /// Run a flow and get a stream of text fragments in arrival order.
    ///
    /// The concatenation of all fragments equals the `run()` result for the
    /// same request. Default implementation calls `run()` and yields the
    /// whole text as a single fragment.
    async fn stream(
        &self,
        request: FlowRequest,
    ) -> std::result::Result<
        tokio::sync::mpsc::Receiver<std::result::Result<String, FlowError>>,
        FlowError,
    > {
        let text = self.run(request).await?;
        let (tx, rx) = tokio::sync::mpsc::channel(1);
        let _ = tx.send(Ok(text)).await;
        Ok(rx)
    }
}
