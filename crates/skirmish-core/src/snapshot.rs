//! World-state snapshot views polled from the host each cycle.
//!
//! Read-only records owned by the world-state provider; the decision core
//! never mutates them and holds no references across cycles.

use serde::{Deserialize, Serialize};

use crate::enums::WeaponCategory;
use crate::types::{Position, SkillLevels};

/// One observable entity eligible for targeting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: u32,
    pub name: String,
    pub position: Position,
    /// Health percentage, 0–100.
    pub health_pct: f64,
    /// Combat level.
    pub level: u32,
    pub in_combat: bool,
    /// Visible on screen. Also stands in for line-of-sight, which the
    /// executor approximates the same way.
    pub on_screen: bool,
    pub attackable: bool,
}

impl Candidate {
    pub fn is_alive(&self) -> bool {
        self.health_pct > 0.0
    }
}

/// The local actor's observable state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalActor {
    pub position: Position,
    /// Health percentage, 0–100.
    pub health_pct: f64,
    pub in_combat: bool,
    pub weapon_category: WeaponCategory,
    pub skills: SkillLevels,
}

/// Everything the decision core reads in one cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    /// Host clock in milliseconds. Must be monotone across cycles.
    pub now_ms: u64,
    pub local: LocalActor,
    pub candidates: Vec<Candidate>,
}

impl WorldSnapshot {
    /// Look up a candidate by id.
    pub fn candidate(&self, id: u32) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.id == id)
    }
}
