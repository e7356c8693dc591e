//! Core types and definitions for the SKIRMISH decision core.
//!
//! This crate defines the vocabulary shared across all other crates:
//! world-state snapshot views, action requests, commands, status views,
//! enums, and tuning constants. It has no dependency on any runtime
//! framework and never performs I/O.

pub mod actions;
pub mod commands;
pub mod constants;
pub mod enums;
pub mod goal;
pub mod snapshot;
pub mod status;
pub mod types;
