//! The `run` command — execute one question through the control loop.
//!
//! The reasoning port is scripted: the `--script` file holds one response
//! per section, separated by lines containing only `---`. This keeps runs
//! deterministic and offline; swapping in a live model provider means
//! implementing `ReasoningPort` against its API and passing that instead.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use reagent_capabilities::default_registry;
use reagent_config::AppConfig;
use reagent_runner::{RunResult, Runner, ScriptedPort};
use tracing::info;

pub async fn run(
    question: &str,
    script_path: &Path,
    config_path: &Path,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load(config_path)?;
    let registry = Arc::new(default_registry()?);

    let script = std::fs::read_to_string(script_path)?;
    let responses = parse_script(&script);
    info!(
        script = %script_path.display(),
        responses = responses.len(),
        max_iterations = config.run.max_iterations,
        "starting scripted run"
    );
    let port = Arc::new(ScriptedPort::new(responses));

    let runner = Runner::new(port, registry)
        .with_max_iterations(config.run.max_iterations)
        .with_reasoning_timeout(Duration::from_secs(config.run.reasoning_timeout_secs))
        .with_capability_timeout(Duration::from_secs(config.run.capability_timeout_secs));

    let result = runner.run(question).await;

    if json {
        println!("{}", serde_json::to_string_pretty(result.transcript())?);
    } else {
        print!("{}", result.transcript().render());
    }

    match &result {
        RunResult::Completed { answer, .. } => {
            println!("\n=> completed: {answer}");
        }
        RunResult::Exhausted { reason, .. } => {
            println!("\n=> exhausted: {reason:?}");
        }
        RunResult::Cancelled { .. } => {
            println!("\n=> cancelled");
        }
    }

    Ok(())
}

/// Split a script file into responses on `---` separator lines.
fn parse_script(content: &str) -> Vec<String> {
    content
        .split("\n---\n")
        .map(|section| section.trim().to_string())
        .filter(|section| !section.is_empty())
        .collect()
}
