//! The `run` command — drive one essay-drafting session.
//!
//! Wires the configured HTTP backends into the toolbox and the agent,
//! attaches a console sink so step output streams to stdout as it
//! arrives, and runs the session to its terminal outcome.

use std::io::Write as _;
use std::sync::Arc;
use std::time::Duration;

use draftsmith_agent::{AgentEvent, EssayAgent, EssaySession, RunOutcome, StepSink};
use draftsmith_config::AppConfig;
use draftsmith_core::flow::FlowBackend;
use draftsmith_core::search::SearchBackend;
use draftsmith_providers::{HostedFlowClient, NeuralSearchClient};
use draftsmith_tools::{EssayTool, ResearchTool, SummarizeTool, Toolbox};
use tracing::warn;

/// Prints step output as it is produced.
///
/// Chunks stream inline; completed thoughts are not reprinted since their
/// fragments already went out.
struct ConsoleSink;

impl StepSink for ConsoleSink {
    fn emit(&self, event: AgentEvent) {
        match event {
            AgentEvent::Chunk { content } => {
                print!("{content}");
                let _ = std::io::stdout().flush();
            }
            AgentEvent::Thought { .. } => println!(),
            AgentEvent::Action { label, recognized } => {
                if recognized {
                    println!("[action] {label}");
                } else {
                    println!("[action] {label} (unrecognized, skipping)");
                }
            }
            AgentEvent::Observation { content } => println!("[observation]\n{content}"),
            AgentEvent::Stalled { step } => {
                println!("[stalled] step {step} produced no thought");
            }
            AgentEvent::Error { message } => eprintln!("[error] {message}"),
            AgentEvent::Done { steps } => println!("\n[done] finished in {steps} steps"),
            AgentEvent::BudgetExhausted { steps } => {
                println!("\n[budget exhausted] stopped after {steps} steps without done");
            }
        }
    }
}

pub async fn run(
    question: String,
    point: String,
    max_steps: Option<u32>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    // No flow credential means no forward progress at all — fail now.
    let flow_key = config.require_flow_key()?.to_string();
    let timeout = Duration::from_secs(config.agent.request_timeout_secs);

    let flows: Arc<dyn FlowBackend> = Arc::new(HostedFlowClient::with_timeout(
        config.flow_base_url.as_str(),
        flow_key,
        timeout,
    ));

    let search_key = config.search_api_key.clone().unwrap_or_else(|| {
        warn!("No search API key configured; research steps will return no results");
        String::new()
    });
    let search: Arc<dyn SearchBackend> = Arc::new(NeuralSearchClient::with_timeout(
        config.search_base_url.as_str(),
        search_key,
        timeout,
    ));

    let toolbox = Arc::new(Toolbox::new(
        ResearchTool::new(flows.clone(), search, config.flows.query_writer.as_str())
            .with_num_results(config.agent.num_results)
            .with_category(config.agent.search_category.as_str()),
        SummarizeTool::new(flows.clone(), config.flows.summarizer.as_str()),
        EssayTool::new(flows.clone(), config.flows.essay_writer.as_str()),
    ));

    let agent = EssayAgent::new(
        flows,
        toolbox,
        config.flows.thinker.as_str(),
        config.flows.actor.as_str(),
    )
    .with_max_steps(max_steps.unwrap_or(config.agent.max_steps))
    .with_sink(Arc::new(ConsoleSink));

    let mut session = EssaySession::new(question, point);
    let report = agent.run(&mut session).await;

    match report.outcome {
        RunOutcome::Done => {
            // The last essay draft, if one was produced, is the deliverable.
            if let Some(essay) = session
                .records
                .iter()
                .rev()
                .find_map(|r| {
                    (r.action == draftsmith_core::Action::EssayWriter)
                        .then(|| r.observation.clone())
                        .flatten()
                })
            {
                println!("\n--- final draft ---\n{essay}");
            }
        }
        RunOutcome::BudgetExhausted => {
            warn!(
                steps = report.steps,
                "Run ended without done; transcript retained on the session"
            );
        }
    }

    Ok(())
}
