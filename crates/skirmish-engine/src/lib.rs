//! Decision engine for the skirmish agent.
//!
//! `AgentEngine` owns the combat state machine, target selection criteria,
//! anti-detection scheduler and goal tracker, processes host commands, and
//! produces one `CycleOutcome` per world-state poll. Completely headless
//! and free of clocks and sleeps, enabling deterministic testing.

pub mod combat;
pub mod engine;
pub mod error;
pub mod runner;
pub mod session;

pub use skirmish_core as core;

pub use engine::{AgentEngine, CycleOutcome, EngineConfig};
pub use error::EngineError;

#[cfg(test)]
mod tests;
