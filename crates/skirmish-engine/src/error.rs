//! Engine error taxonomy.
//!
//! Most abnormal conditions are not errors here: an empty selection pool is
//! `None`, a vanished target is a `Disengaging` transition, a goal failure
//! carries an explicit reason. Only a snapshot the engine cannot safely
//! reason about surfaces as an `EngineError`, and the cycle entry point
//! converts it into a logged retry rather than a panic or a loop exit.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The world snapshot carried values no decision can be based on,
    /// e.g. a non-finite health percentage or position.
    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),
}
