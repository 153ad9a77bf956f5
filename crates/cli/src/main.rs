//! reagent CLI — the main entry point.
//!
//! Commands:
//! - `run`          — Execute one question through the control loop
//! - `capabilities` — List the built-in capabilities

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "reagent",
    about = "reagent — a minimal think-act-observe agent loop",
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
    /// Run one question through the loop with a scripted reasoning port
    Run {
        /// The question to answer
        question: String,

        /// Script file with reasoning responses, separated by `---` lines
        #[arg(short, long)]
        script: PathBuf,

        /// Config file path
        #[arg(short, long, default_value = "reagent.toml")]
        config: PathBuf,

        /// Print the transcript as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List the built-in capabilities
    Capabilities,
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
            script,
            config,
            json,
        } => commands::run::run(&question, &script, &config, json).await?,
        Commands::Capabilities => commands::capabilities::run()?,
    }

    Ok(())
}
