//! ReasoningPort trait — the abstraction over text generation.
//!
//! The control loop consults the port exactly once per iteration, handing
//! it the rendered transcript and getting free text back. What sits behind
//! it (an LLM API, a local model, a scripted replay) is opaque to the
//! loop — pure polymorphism.

use async_trait::async_trait;

use crate::error::GenerationError;

/// The opaque text-generation dependency consulted once per iteration.
#[async_trait]
pub trait ReasoningPort: Send + Sync {
    /// A human-readable name for this port (e.g., "scripted", "openai").
    fn name(&self) -> &str;

    /// Generate a continuation for the given prompt.
    ///
    /// Any failure here ends the run: the loop reports it as part of the
    /// run result rather than retrying.
    async fn generate(&self, prompt: &str) -> std::result::Result<String, GenerationError>;
}
