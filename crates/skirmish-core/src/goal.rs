//! Immutable goal specifications queued on the tracker.

use serde::{Deserialize, Serialize};

use crate::enums::{CombatStyle, Skill};

/// A queued, trackable objective: reach `target_level` in `skill` by fighting
/// the named targets, optionally with a specific combat style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalSpec {
    pub description: String,
    /// Entity names to target while this goal is active (replaces the
    /// selector's allow-list on activation).
    pub target_names: Vec<String>,
    /// Entity ids to target while this goal is active.
    pub target_ids: Vec<u32>,
    pub skill: Skill,
    pub target_level: u32,
    /// Style to request on activation, if any. An incompatible hint is
    /// logged and skipped.
    pub style_hint: Option<CombatStyle>,
    /// Host clock at creation (ms).
    pub created_ms: u64,
}

impl GoalSpec {
    /// A goal against a single named target, the common case.
    pub fn simple(
        description: impl Into<String>,
        target_name: impl Into<String>,
        skill: Skill,
        target_level: u32,
        style_hint: Option<CombatStyle>,
        created_ms: u64,
    ) -> Self {
        Self {
            description: description.into(),
            target_names: vec![target_name.into()],
            target_ids: Vec::new(),
            skill,
            target_level,
            style_hint,
            created_ms,
        }
    }
}
