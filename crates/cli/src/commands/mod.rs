//! CLI command implementations.

pub mod capabilities;
pub mod run;
