//! ScriptedPort — a reasoning port that replays canned responses.
//!
//! Used by the CLI for deterministic demo runs and throughout the test
//! suite. Each call to `generate` returns the next response in the script;
//! a port built with [`ScriptedPort::repeating`] keeps returning the last
//! response forever. Prompts are recorded so callers can inspect exactly
//! what the loop sent.

use std::sync::Mutex;

use async_trait::async_trait;

use reagent_core::error::GenerationError;
use reagent_core::reasoning::ReasoningPort;

pub struct ScriptedPort {
    responses: Vec<String>,
    repeat_last: bool,
    state: Mutex<ScriptState>,
}

#[derive(Default)]
struct ScriptState {
    calls: usize,
    prompts: Vec<String>,
}

impl ScriptedPort {
    /// Replay the given responses in order; fail once the script runs out.
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses,
            repeat_last: false,
            state: Mutex::new(ScriptState::default()),
        }
    }

    /// Return the same response on every call.
    pub fn repeating(response: impl Into<String>) -> Self {
        Self {
            responses: vec![response.into()],
            repeat_last: true,
            state: Mutex::new(ScriptState::default()),
        }
    }

    /// How many times `generate` has been called.
    pub fn calls(&self) -> usize {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).calls
    }

    /// The prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .prompts
            .clone()
    }
}

#[async_trait]
impl ReasoningPort for ScriptedPort {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.prompts.push(prompt.to_string());
        let index = state.calls;
        state.calls += 1;

        if let Some(response) = self.responses.get(index) {
            return Ok(response.clone());
        }
        if self.repeat_last {
            if let Some(last) = self.responses.last() {
                return Ok(last.clone());
            }
        }
        Err(GenerationError::Failed(format!(
            "script exhausted after {} responses",
            self.responses.len()
        )))
    }
}
