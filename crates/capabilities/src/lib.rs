//! Built-in capability implementations for reagent.
//!
//! These give a demo loop something to act with: evaluate arithmetic,
//! look up facts in a canned corpus, read the clock, echo text. None of
//! them touch the network or the filesystem — they exist so runs are
//! deterministic and self-contained.

pub mod calculator;
pub mod clock;
pub mod echo;
pub mod search;

use reagent_core::capability::CapabilityRegistry;
use reagent_core::error::RegistryError;

/// Create a registry with all built-in capabilities.
pub fn default_registry() -> Result<CapabilityRegistry, RegistryError> {
    let mut registry = CapabilityRegistry::new();
    registry.register(Box::new(search::SearchCapability::default()))?;
    registry.register(Box::new(calculator::CalculatorCapability))?;
    registry.register(Box::new(clock::ClockCapability))?;
    registry.register(Box::new(echo::EchoCapability))?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_has_builtins_in_order() {
        let registry = default_registry().unwrap();
        assert_eq!(
            registry.names(),
            vec!["search", "calculator", "clock", "echo"]
        );
    }
}
