//! # Reagent Core
//!
//! Domain types, traits, and error definitions for the reagent control
//! loop. This crate has **zero framework dependencies** — it defines the
//! domain model that the runner and capability crates implement against.
//!
//! ## Design Philosophy
//!
//! The two external collaborators of the loop are defined as traits here:
//! [`Capability`] (an action the loop can take) and [`ReasoningPort`] (the
//! opaque text-generation dependency). Implementations live in their
//! respective crates. This enables:
//! - Swapping implementations via configuration
//! - Easy testing with scripted/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod capability;
pub mod error;
pub mod reasoning;
pub mod transcript;

// Re-export key types at crate root for ergonomics
pub use capability::{Arguments, Capability, CapabilityRegistry};
pub use error::{Error, GenerationError, InvokeError, RegistryError, Result};
pub use reasoning::ReasoningPort;
pub use transcript::{Transcript, TranscriptEntry};
