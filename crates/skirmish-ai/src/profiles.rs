//! Behavior-timing profiles.
//!
//! Consolidates per-profile trigger chance and reaction-time bounds, plus
//! the base duration range of each micro-behavior.

use skirmish_core::enums::{BehaviorKind, ProfileKind};

/// Timing profile for the anti-detection scheduler.
#[derive(Debug, Clone, Copy)]
pub struct BehaviorProfile {
    /// Base trigger chance (percent) before adjustments.
    pub base_trigger_chance: u32,
    /// Lower reaction-time bound (ms).
    pub min_reaction_ms: u64,
    /// Upper reaction-time bound (ms).
    pub max_reaction_ms: u64,
}

/// Get the timing profile for a given profile kind.
pub fn get_profile(kind: ProfileKind) -> BehaviorProfile {
    match kind {
        ProfileKind::Conservative => BehaviorProfile {
            base_trigger_chance: 5,
            min_reaction_ms: 800,
            max_reaction_ms: 1_200,
        },
        ProfileKind::Normal => BehaviorProfile {
            base_trigger_chance: 10,
            min_reaction_ms: 600,
            max_reaction_ms: 1_000,
        },
        ProfileKind::Active => BehaviorProfile {
            base_trigger_chance: 15,
            min_reaction_ms: 400,
            max_reaction_ms: 800,
        },
        ProfileKind::Erratic => BehaviorProfile {
            base_trigger_chance: 8,
            min_reaction_ms: 500,
            max_reaction_ms: 1_100,
        },
    }
}

/// Base duration range (ms) drawn for a behavior before fatigue scaling
/// and profile clamping.
pub fn base_duration_ms(kind: BehaviorKind) -> (u64, u64) {
    match kind {
        BehaviorKind::CameraSweep => (200, 800),
        BehaviorKind::TabFlick => (500, 1_500),
        BehaviorKind::SkillHover => (500, 1_200),
        BehaviorKind::InventoryCheck => (400, 1_000),
        BehaviorKind::MinimapGlance => (200, 600),
        BehaviorKind::IdlePause => (1_000, 3_000),
    }
}
