//! Action requests dispatched to the external executor.
//!
//! Fire-and-forget from the core's perspective: no return value is consumed
//! beyond the next cycle's world-state read reflecting the effect.

use serde::{Deserialize, Serialize};

use crate::enums::{BehaviorKind, CombatStyle};

/// The interact action used to start an attack.
pub const ATTACK_ACTION: &str = "Attack";

/// A single request for the executor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ActionRequest {
    /// Interact with an entity using a named action (e.g. "Attack").
    Interact { target_id: u32, action: String },
    /// Consume a recovery item (food, potion) from the inventory.
    ConsumeRecoveryItem,
    /// Switch the combat style on the combat tab.
    ChangeCombatStyle { style: CombatStyle },
    /// Perform a named micro-behavior for roughly the given duration.
    PerformBehavior {
        behavior: BehaviorKind,
        duration_ms: u64,
    },
    /// Pause all activity for the given duration.
    TakeBreak { duration_ms: u64 },
}

impl ActionRequest {
    /// Convenience constructor for the common attack interaction.
    pub fn attack(target_id: u32) -> Self {
        ActionRequest::Interact {
            target_id,
            action: ATTACK_ACTION.to_string(),
        }
    }
}
