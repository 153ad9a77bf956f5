//! Shared test helpers for loop tests.

use async_trait::async_trait;

use reagent_core::capability::{Arguments, Capability, CapabilityRegistry};
use reagent_core::error::GenerationError;
use reagent_core::reasoning::ReasoningPort;

/// A registry with two canned capabilities: `search` (knows the capital of
/// France) and `echo`.
pub fn canned_registry() -> CapabilityRegistry {
    let mut registry = CapabilityRegistry::new();
    registry
        .register(Box::new(CannedSearch))
        .expect("fresh registry");
    registry
        .register(Box::new(EchoCapability))
        .expect("fresh registry");
    registry
}

pub struct CannedSearch;

#[async_trait]
impl Capability for CannedSearch {
    fn name(&self) -> &str {
        "search"
    }
    fn description(&self) -> &str {
        "Search for a fact by query"
    }
    async fn invoke(&self, arguments: &Arguments) -> Result<String, String> {
        match arguments.get("query").map(String::as_str) {
            Some("capital of France") => Ok("Paris".into()),
            Some(other) => Ok(format!("no result for '{other}'")),
            None => Err("missing 'query' argument".into()),
        }
    }
}

pub struct EchoCapability;

#[async_trait]
impl Capability for EchoCapability {
    fn name(&self) -> &str {
        "echo"
    }
    fn description(&self) -> &str {
        "Echo back the 'text' argument"
    }
    async fn invoke(&self, arguments: &Arguments) -> Result<String, String> {
        arguments
            .get("text")
            .cloned()
            .ok_or_else(|| "missing 'text' argument".into())
    }
}

/// A capability that panics on every call.
pub struct PanickyCapability;

#[async_trait]
impl Capability for PanickyCapability {
    fn name(&self) -> &str {
        "panicky"
    }
    fn description(&self) -> &str {
        "Always panics"
    }
    async fn invoke(&self, _arguments: &Arguments) -> Result<String, String> {
        panic!("handler exploded");
    }
}

/// A capability that sleeps well past any test timeout.
pub struct SlowCapability;

#[async_trait]
impl Capability for SlowCapability {
    fn name(&self) -> &str {
        "slow"
    }
    fn description(&self) -> &str {
        "Takes far too long"
    }
    async fn invoke(&self, _arguments: &Arguments) -> Result<String, String> {
        tokio::time::sleep(std::time::Duration::from_secs(60)).await;
        Ok("finally".into())
    }
}

/// A reasoning port that takes well past any test timeout to respond.
pub struct SlowPort;

#[async_trait]
impl ReasoningPort for SlowPort {
    fn name(&self) -> &str {
        "slow"
    }
    async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        tokio::time::sleep(std::time::Duration::from_secs(60)).await;
        Ok("Final Answer: too slow".into())
    }
}

/// A reasoning port that fails every call.
pub struct FailingPort;

#[async_trait]
impl ReasoningPort for FailingPort {
    fn name(&self) -> &str {
        "failing"
    }
    async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        Err(GenerationError::Failed("provider unavailable".into()))
    }
}
