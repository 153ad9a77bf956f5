//! Capability trait — the abstraction over agent actions.
//!
//! Capabilities are what give the loop the ability to act in the world:
//! evaluate an expression, look something up, read the clock. Each one is
//! registered in the [`CapabilityRegistry`] before a run starts and stays
//! immutable for the run's duration.

use async_trait::async_trait;
use futures::FutureExt;
use std::collections::{BTreeMap, HashMap};
use std::panic::AssertUnwindSafe;
use tracing::debug;

use crate::error::{InvokeError, RegistryError};

/// Named arguments passed to a capability invocation.
///
/// A `BTreeMap` rather than a `HashMap` so that rendered transcripts and
/// prompts are byte-for-byte reproducible across runs.
pub type Arguments = BTreeMap<String, String>;

/// The core Capability trait.
///
/// Each capability (calculator, search, clock, etc.) implements this trait.
/// Capabilities are registered in the registry and looked up by name when
/// the loop decides to act.
///
/// A handler reports its own failures through the `Err` side of the
/// returned result; panics are caught by the registry and converted into
/// an [`InvokeError`], so a misbehaving handler can never take the loop
/// down with it.
#[async_trait]
pub trait Capability: Send + Sync {
    /// The unique name of this capability (e.g., "search", "calculator").
    fn name(&self) -> &str;

    /// A description of what this capability does (used only for prompt
    /// construction, never for control flow).
    fn description(&self) -> &str;

    /// Invoke the capability with the given named arguments.
    async fn invoke(&self, arguments: &Arguments) -> std::result::Result<String, String>;
}

/// A registry of available capabilities.
///
/// The control loop uses this to:
/// 1. Render the capability preamble for the prompt (`describe_all`)
/// 2. Look up and invoke capabilities when the parser emits an action
///
/// The registry exclusively owns the name→capability mapping. Registration
/// happens before the registry is shared (it takes `&mut self`); after
/// that the registry is read-only and safe to share across concurrent runs
/// behind an `Arc`.
pub struct CapabilityRegistry {
    capabilities: HashMap<String, Box<dyn Capability>>,
    /// Registration order, for deterministic prompt construction.
    order: Vec<String>,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self {
            capabilities: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register a capability.
    ///
    /// Fails with [`RegistryError::Duplicate`] if the name is already
    /// taken; the first registration wins and is retained.
    pub fn register(
        &mut self,
        capability: Box<dyn Capability>,
    ) -> std::result::Result<(), RegistryError> {
        let name = capability.name().to_string();
        if self.capabilities.contains_key(&name) {
            return Err(RegistryError::Duplicate(name));
        }
        self.order.push(name.clone());
        self.capabilities.insert(name, capability);
        Ok(())
    }

    /// Get a capability by name.
    pub fn get(&self, name: &str) -> Option<&dyn Capability> {
        self.capabilities.get(name).map(|c| c.as_ref())
    }

    /// All `(name, description)` pairs in registration order.
    pub fn describe_all(&self) -> Vec<(&str, &str)> {
        self.order
            .iter()
            .filter_map(|name| self.capabilities.get(name))
            .map(|c| (c.name(), c.description()))
            .collect()
    }

    /// List all registered capability names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.order.iter().map(|s| s.as_str()).collect()
    }

    /// Invoke a capability by name.
    ///
    /// An unknown name, a handler error, and a handler panic all come back
    /// as an [`InvokeError`] value; nothing unwinds into the caller.
    pub async fn invoke(
        &self,
        name: &str,
        arguments: &Arguments,
    ) -> std::result::Result<String, InvokeError> {
        let capability = self
            .capabilities
            .get(name)
            .ok_or_else(|| InvokeError::UnknownCapability(name.to_string()))?;

        debug!(capability = name, args = arguments.len(), "invoking");

        match AssertUnwindSafe(capability.invoke(arguments))
            .catch_unwind()
            .await
        {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(reason)) => Err(InvokeError::Handler {
                capability: name.to_string(),
                reason,
            }),
            Err(panic) => Err(InvokeError::Panicked {
                capability: name.to_string(),
                reason: panic_message(panic),
            }),
        }
    }
}

impl Default for CapabilityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A simple test capability for unit tests.
    struct EchoCapability;

    #[async_trait]
    impl Capability for EchoCapability {
        fn name(&self) -> &str {
            "echo"
        }
        fn description(&self) -> &str {
            "Echoes back the 'text' argument"
        }
        async fn invoke(&self, arguments: &Arguments) -> std::result::Result<String, String> {
            match arguments.get("text") {
                Some(text) => Ok(text.clone()),
                None => Err("missing 'text' argument".into()),
            }
        }
    }

    struct PanickyCapability;

    #[async_trait]
    impl Capability for PanickyCapability {
        fn name(&self) -> &str {
            "panicky"
        }
        fn description(&self) -> &str {
            "Always panics"
        }
        async fn invoke(&self, _arguments: &Arguments) -> std::result::Result<String, String> {
            panic!("handler exploded");
        }
    }

    fn args(pairs: &[(&str, &str)]) -> Arguments {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn register_and_lookup() {
        let mut registry = CapabilityRegistry::new();
        registry.register(Box::new(EchoCapability)).unwrap();
        assert!(registry.get("echo").is_some());
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn duplicate_registration_fails_and_first_wins() {
        let mut registry = CapabilityRegistry::new();
        registry.register(Box::new(EchoCapability)).unwrap();
        let err = registry.register(Box::new(EchoCapability)).unwrap_err();
        assert!(matches!(err, RegistryError::Duplicate(name) if name == "echo"));
        assert_eq!(registry.names(), vec!["echo"]);
    }

    #[test]
    fn describe_all_preserves_registration_order() {
        let mut registry = CapabilityRegistry::new();
        registry.register(Box::new(PanickyCapability)).unwrap();
        registry.register(Box::new(EchoCapability)).unwrap();
        let described: Vec<&str> = registry.describe_all().iter().map(|(n, _)| *n).collect();
        assert_eq!(described, vec!["panicky", "echo"]);
    }

    #[tokio::test]
    async fn invoke_success() {
        let mut registry = CapabilityRegistry::new();
        registry.register(Box::new(EchoCapability)).unwrap();
        let out = registry
            .invoke("echo", &args(&[("text", "hello world")]))
            .await
            .unwrap();
        assert_eq!(out, "hello world");
    }

    #[tokio::test]
    async fn invoke_unknown_capability() {
        let registry = CapabilityRegistry::new();
        let err = registry.invoke("nonexistent", &args(&[])).await.unwrap_err();
        assert!(matches!(err, InvokeError::UnknownCapability(_)));
    }

    #[tokio::test]
    async fn invoke_handler_error() {
        let mut registry = CapabilityRegistry::new();
        registry.register(Box::new(EchoCapability)).unwrap();
        let err = registry.invoke("echo", &args(&[])).await.unwrap_err();
        assert!(matches!(err, InvokeError::Handler { .. }));
        assert!(err.to_string().contains("missing 'text'"));
    }

    #[tokio::test]
    async fn invoke_catches_panic() {
        let mut registry = CapabilityRegistry::new();
        registry.register(Box::new(PanickyCapability)).unwrap();
        let err = registry.invoke("panicky", &args(&[])).await.unwrap_err();
        match err {
            InvokeError::Panicked { capability, reason } => {
                assert_eq!(capability, "panicky");
                assert!(reason.contains("handler exploded"));
            }
            other => panic!("expected Panicked, got {other:?}"),
        }
    }
}
