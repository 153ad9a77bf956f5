//! The control loop implementation.
//!
//! State machine per run: awaiting a thought → awaiting an observation →
//! back, until a final answer, the iteration bound, a reasoning-port
//! failure, or cancellation ends the run. Each run owns its transcript and
//! iteration counter; concurrent runs share only the registry, read-only
//! behind an `Arc`.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use reagent_core::capability::CapabilityRegistry;
use reagent_core::error::{GenerationError, InvokeError};
use reagent_core::reasoning::ReasoningPort;
use reagent_core::transcript::{Transcript, TranscriptEntry};

use crate::parser::{Decision, parse, split_thought};

/// The observation recorded when a response matched neither directive.
pub const INCONCLUSIVE_OBSERVATION: &str = "no valid action or final answer found";

/// Why a run ended without a final answer.
#[derive(Debug, Clone)]
pub enum ExhaustReason {
    /// The configured iteration bound was reached.
    IterationBound,

    /// The reasoning port failed or timed out.
    Generation(GenerationError),
}

/// The outcome of one run. Produced exactly once per call to
/// [`Runner::run`]; a caller always gets one of these back, never an
/// unexplained failure.
#[derive(Debug, Clone)]
pub enum RunResult {
    /// The reasoning port produced a final answer.
    Completed {
        answer: String,
        transcript: Transcript,
    },

    /// The run ended without an answer. Normal return, not a fault.
    Exhausted {
        transcript: Transcript,
        reason: ExhaustReason,
    },

    /// The caller requested cancellation between iterations.
    Cancelled { transcript: Transcript },
}

impl RunResult {
    /// The final answer, if the run completed.
    pub fn answer(&self) -> Option<&str> {
        match self {
            RunResult::Completed { answer, .. } => Some(answer),
            _ => None,
        }
    }

    /// The transcript, whatever the outcome.
    pub fn transcript(&self) -> &Transcript {
        match self {
            RunResult::Completed { transcript, .. }
            | RunResult::Exhausted { transcript, .. }
            | RunResult::Cancelled { transcript } => transcript,
        }
    }
}

/// The control loop. Holds a read-only reference to the shared registry
/// and the reasoning port; both are injected at construction time — there
/// is no global state anywhere in the loop.
pub struct Runner {
    /// The text-generation dependency, consulted once per iteration.
    port: Arc<dyn ReasoningPort>,

    /// Shared, read-only capability registry.
    registry: Arc<CapabilityRegistry>,

    /// Maximum think/act/observe cycles before a run is abandoned.
    max_iterations: u32,

    /// Per-call timeout for the reasoning port.
    reasoning_timeout: Duration,

    /// Per-call timeout for capability invocations.
    capability_timeout: Duration,

    /// Cooperative cancellation, checked at the top of each iteration.
    cancel: CancellationToken,
}

impl Runner {
    /// Create a runner with default bounds (10 iterations, 60s reasoning
    /// timeout, 30s capability timeout).
    pub fn new(port: Arc<dyn ReasoningPort>, registry: Arc<CapabilityRegistry>) -> Self {
        Self {
            port,
            registry,
            max_iterations: 10,
            reasoning_timeout: Duration::from_secs(60),
            capability_timeout: Duration::from_secs(30),
            cancel: CancellationToken::new(),
        }
    }

    /// Set the iteration bound.
    pub fn with_max_iterations(mut self, max: u32) -> Self {
        self.max_iterations = max;
        self
    }

    /// Set the per-call reasoning-port timeout.
    pub fn with_reasoning_timeout(mut self, timeout: Duration) -> Self {
        self.reasoning_timeout = timeout;
        self
    }

    /// Set the per-call capability timeout.
    pub fn with_capability_timeout(mut self, timeout: Duration) -> Self {
        self.capability_timeout = timeout;
        self
    }

    /// Attach a cancellation token. Cancellation takes effect between
    /// iterations, never mid-invocation.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Build the prompt for the next reasoning step: a deterministic
    /// capability preamble (registration order) followed by the rendered
    /// transcript.
    fn build_prompt(&self, transcript: &Transcript) -> String {
        let mut prompt = String::from("You can take actions using these capabilities:\n");
        for (name, description) in self.registry.describe_all() {
            prompt.push_str("- ");
            prompt.push_str(name);
            prompt.push_str(": ");
            prompt.push_str(description);
            prompt.push('\n');
        }
        prompt.push_str(
            "\nRespond with either:\n\
             Action: <capability>(key=\"value\", ...)\n\
             or\n\
             Final Answer: <answer>\n\n",
        );
        prompt.push_str(&transcript.render());
        prompt
    }

    /// Execute one run.
    ///
    /// Appends the question, then cycles think → decide → invoke → observe
    /// until a final answer arrives or the iteration bound is spent. All
    /// run-time failures are folded into the transcript or the returned
    /// [`RunResult`]; nothing here returns an error.
    pub async fn run(&self, question: &str) -> RunResult {
        let mut transcript = Transcript::new();
        transcript.append(TranscriptEntry::Question {
            text: question.to_string(),
        });

        info!(
            port = self.port.name(),
            max_iterations = self.max_iterations,
            "run starting"
        );

        let mut iterations = 0u32;
        while iterations < self.max_iterations {
            if self.cancel.is_cancelled() {
                info!(iterations, "run cancelled");
                return RunResult::Cancelled { transcript };
            }

            debug!(iteration = iterations + 1, "reasoning step");

            let prompt = self.build_prompt(&transcript);
            let raw = match timeout(self.reasoning_timeout, self.port.generate(&prompt)).await {
                Ok(Ok(text)) => text,
                Ok(Err(e)) => {
                    warn!(error = %e, "reasoning port failed");
                    return RunResult::Exhausted {
                        transcript,
                        reason: ExhaustReason::Generation(e),
                    };
                }
                Err(_) => {
                    warn!("reasoning port timed out");
                    return RunResult::Exhausted {
                        transcript,
                        reason: ExhaustReason::Generation(GenerationError::Timeout {
                            timeout_secs: self.reasoning_timeout.as_secs(),
                        }),
                    };
                }
            };

            if let Some(thought) = split_thought(&raw) {
                transcript.append(TranscriptEntry::Thought { text: thought });
            }

            match parse(&raw) {
                Decision::Answer(answer) => {
                    transcript.append(TranscriptEntry::FinalAnswer {
                        text: answer.clone(),
                    });
                    info!(iterations, "run completed");
                    return RunResult::Completed { answer, transcript };
                }

                Decision::Act {
                    capability,
                    arguments,
                } => {
                    transcript.append(TranscriptEntry::Invocation {
                        capability: capability.clone(),
                        arguments: arguments.clone(),
                    });

                    let observation = match timeout(
                        self.capability_timeout,
                        self.registry.invoke(&capability, &arguments),
                    )
                    .await
                    {
                        Ok(Ok(output)) => output,
                        Ok(Err(e)) => {
                            debug!(capability = %capability, error = %e, "invocation failed");
                            e.to_string()
                        }
                        Err(_) => {
                            let e = InvokeError::Timeout {
                                capability: capability.clone(),
                                timeout_secs: self.capability_timeout.as_secs(),
                            };
                            warn!(capability = %capability, "invocation timed out");
                            e.to_string()
                        }
                    };

                    transcript.append(TranscriptEntry::Observation { text: observation });
                    iterations += 1;
                }

                Decision::Inconclusive => {
                    transcript.append(TranscriptEntry::Observation {
                        text: INCONCLUSIVE_OBSERVATION.to_string(),
                    });
                    iterations += 1;
                }
            }
        }

        warn!(max_iterations = self.max_iterations, "iteration bound reached");
        RunResult::Exhausted {
            transcript,
            reason: ExhaustReason::IterationBound,
        }
    }
}
