//! Decision components for SKIRMISH.
//!
//! Target selection, the anti-detection scheduler, behavior-timing profiles,
//! and the goal tracker. Plain data in, plain data out — no runtime
//! framework, no I/O, randomness always injected by the caller.

pub mod antidetect;
pub mod goals;
pub mod profiles;
pub mod selector;

pub use skirmish_core as core;
