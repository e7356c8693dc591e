//! Status snapshot — the agent's visible state reported after each cycle.

use serde::{Deserialize, Serialize};

use crate::enums::{CombatState, GoalStatus};

/// Progress view of the active goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalView {
    pub description: String,
    pub status: GoalStatus,
    /// Progress percentage, 0–100.
    pub progress_pct: f64,
    /// Estimated ms remaining, when a meaningful estimate exists.
    pub eta_ms: Option<u64>,
}

/// Complete agent status reported alongside each cycle's actions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentStatus {
    pub running: bool,
    pub combat_state: CombatState,
    /// Id of the current engagement target, if any.
    pub current_target: Option<u32>,
    pub kills: u32,
    pub kills_per_hour: f64,
    /// Elapsed ms since the engagement session started.
    pub session_ms: u64,
    /// Current fatigue level, 0–100.
    pub fatigue: u32,
    /// Behaviors triggered since the last break.
    pub recent_behavior_triggers: u32,
    pub current_goal: Option<GoalView>,
    pub queued_goals: usize,
    pub completed_goals: u32,
}
