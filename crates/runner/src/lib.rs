//! The reagent control loop — the think → act → observe cycle.
//!
//! One iteration of the loop:
//!
//! 1. **Render** the transcript into a prompt (capability preamble + history)
//! 2. **Generate** a continuation via the reasoning port
//! 3. **Parse** the free text into a decision: act, answer, or inconclusive
//! 4. **If act**: invoke the capability, append the observation, loop
//! 5. **If answer**: append the final answer and return `Completed`
//!
//! The loop continues until a final answer arrives or the iteration bound
//! is reached. Every run-time failure (unknown capability, handler error,
//! unparseable response) lands in the transcript as an observation and the
//! loop keeps going; only a reasoning-port failure or the bound itself
//! ends a run early, and both are reported as a normal return value.

pub mod parser;
pub mod runner;
pub mod script;

pub use parser::{Decision, parse, split_thought};
pub use runner::{ExhaustReason, RunResult, Runner};
pub use script::ScriptedPort;

#[cfg(test)]
pub(crate) mod test_helpers;
