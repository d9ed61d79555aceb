//! HTTP backend implementations for Draftsmith.
//!
//! All backends implement the traits from `draftsmith_core`:
//! - [`HostedFlowClient`] — the released-flow run endpoint (NDJSON stream)
//! - [`NeuralSearchClient`] — the neural search endpoint

pub mod flow;
pub mod search;

pub use flow::HostedFlowClient;
pub use search::NeuralSearchClient;
