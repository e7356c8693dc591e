//! Host commands sent to the agent engine.
//!
//! Commands are queued and processed at the next cycle boundary; cancellation
//! is polling-based and takes effect when the next cycle observes it.

use serde::{Deserialize, Serialize};

use crate::enums::{ProfileKind, TargetPriority};
use crate::goal::GoalSpec;
use crate::types::Area;

/// All host-issued commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AgentCommand {
    // --- Run control ---
    /// Begin (or resume) executing cycles.
    Start,
    /// Stop at the next cycle boundary; the active goal is cancelled.
    Stop,

    // --- Goals ---
    /// Append a goal to the FIFO queue.
    QueueGoal { spec: GoalSpec },
    /// Drop all queued (not yet active) goals.
    ClearGoals,
    /// Fail the active goal with an explicit reason.
    FailCurrentGoal { reason: String },

    // --- Target selection ---
    SetPriority { priority: TargetPriority },
    SetMaxDistance { tiles: f64 },
    SetCombatLevelRange { min: u32, max: u32 },
    SetAvoidInCombat { avoid: bool },
    SetRequireLineOfSight { require: bool },
    /// Restrict targeting to an area, or clear the restriction.
    SetAllowedArea { area: Option<Area> },

    // --- Anti-detection ---
    SetBehaviorProfile { profile: ProfileKind },
    SetAntiDetectionEnabled { enabled: bool },
    ResetAntiDetection,
}
