//! Draftsmith CLI — the main entry point.
//!
//! Commands:
//! - `run`    — Drive one essay-drafting session
//! - `config` — Show the resolved configuration

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "draftsmith",
    about = "Draftsmith — an agent that researches and drafts academic essays",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one essay-drafting session
    Run {
        /// The essay question you have chosen
        #[arg(short, long)]
        question: String,

        /// The point you want the essay to drive
        #[arg(short, long)]
        point: String,

        /// Override the configured step budget
        #[arg(long)]
        max_steps: Option<u32>,
    },

    /// Show the resolved configuration (secrets redacted)
    Config {
        /// Print a default config.toml instead
        #[arg(long)]
        default: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Run {
            question,
            point,
            max_steps,
        } => commands::run::run(question, point, max_steps).await?,
        Commands::Config { default } => commands::config_cmd::run(default).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_command_parses() {
        let cli = Cli::parse_from([
            "draftsmith",
            "run",
            "--question",
            "Is data enough?",
            "--point",
            "It is not",
            "--max-steps",
            "5",
        ]);
        match cli.command {
            Commands::Run {
                question,
                point,
                max_steps,
            } => {
                assert_eq!(question, "Is data enough?");
                assert_eq!(point, "It is not");
                assert_eq!(max_steps, Some(5));
            }
            _ => panic!("Expected run command"),
        }
    }
}
