//! Enumeration types used throughout the decision core.

use serde::{Deserialize, Serialize};

/// Rule used to pick the best candidate from a filtered pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetPriority {
    /// Minimum distance to the local actor.
    #[default]
    Nearest,
    /// Maximum combat level.
    HighestLevel,
    /// Minimum combat level.
    LowestLevel,
    /// Minimum health fraction.
    LowestHealth,
    /// Maximum health fraction.
    HighestHealth,
    /// Uniform pick over the filtered pool.
    Random,
}

/// Combat state machine states, evaluated in fixed priority order each cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatState {
    /// No target, no pending work.
    #[default]
    Idle,
    /// Health below threshold; consuming a recovery item.
    Recovering,
    /// No target; requesting one from the selector.
    Acquiring,
    /// Target chosen, attack issued, combat not yet confirmed.
    Engaging,
    /// Confirmed exchange in progress.
    Fighting,
    /// Ending the session (timeout, misses, or target died/vanished).
    Disengaging,
}

/// Goal lifecycle status. Transitions are forward-only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalStatus {
    #[default]
    Pending,
    Active,
    Completed,
    Failed,
    Cancelled,
}

impl GoalStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            GoalStatus::Completed | GoalStatus::Failed | GoalStatus::Cancelled
        )
    }
}

/// Trainable combat skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Skill {
    Attack,
    Strength,
    Defence,
    Hitpoints,
    Ranged,
    Magic,
}

/// Category of the currently wielded weapon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponCategory {
    Melee,
    Ranged,
    Magic,
    #[default]
    Unknown,
}

/// Combat style selectable on the in-game combat tab.
///
/// Each variant carries its widget index and compatible weapon category via
/// the accessor methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatStyle {
    Accurate,
    Aggressive,
    Defensive,
    Controlled,
    RangedAccurate,
    RangedRapid,
    RangedLongrange,
    MagicAccurate,
    MagicLongrange,
    MagicDefensive,
}

impl CombatStyle {
    /// Index of the style button within its weapon's combat tab layout.
    pub fn widget_index(&self) -> usize {
        match self {
            CombatStyle::Accurate | CombatStyle::RangedAccurate | CombatStyle::MagicAccurate => 0,
            CombatStyle::Aggressive | CombatStyle::RangedRapid | CombatStyle::MagicLongrange => 1,
            CombatStyle::Defensive | CombatStyle::RangedLongrange | CombatStyle::MagicDefensive => {
                2
            }
            CombatStyle::Controlled => 3,
        }
    }

    /// The weapon category this style belongs to.
    pub fn weapon_category(&self) -> WeaponCategory {
        match self {
            CombatStyle::Accurate
            | CombatStyle::Aggressive
            | CombatStyle::Defensive
            | CombatStyle::Controlled => WeaponCategory::Melee,
            CombatStyle::RangedAccurate | CombatStyle::RangedRapid | CombatStyle::RangedLongrange => {
                WeaponCategory::Ranged
            }
            CombatStyle::MagicAccurate | CombatStyle::MagicLongrange | CombatStyle::MagicDefensive => {
                WeaponCategory::Magic
            }
        }
    }

    pub fn is_compatible_with(&self, weapon: WeaponCategory) -> bool {
        self.weapon_category() == weapon
    }

    /// The style that trains `skill` with the given weapon, or `None` when
    /// the combination makes no sense (e.g. training Ranged with a melee
    /// weapon).
    pub fn for_skill(skill: Skill, weapon: WeaponCategory) -> Option<CombatStyle> {
        match (skill, weapon) {
            (Skill::Attack, WeaponCategory::Melee) => Some(CombatStyle::Accurate),
            (Skill::Strength, WeaponCategory::Melee) => Some(CombatStyle::Aggressive),
            (Skill::Defence, WeaponCategory::Melee) => Some(CombatStyle::Defensive),
            (Skill::Defence, WeaponCategory::Ranged) => Some(CombatStyle::RangedLongrange),
            (Skill::Defence, WeaponCategory::Magic) => Some(CombatStyle::MagicDefensive),
            (Skill::Ranged, WeaponCategory::Ranged) => Some(CombatStyle::RangedRapid),
            (Skill::Magic, WeaponCategory::Magic) => Some(CombatStyle::MagicAccurate),
            _ => None,
        }
    }
}

/// Randomized micro-behaviors injected between combat actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BehaviorKind {
    /// Rotate or pitch the camera a little.
    CameraSweep,
    /// Open another tab, then return.
    TabFlick,
    /// Hover the skills tab.
    SkillHover,
    /// Glance at the inventory.
    InventoryCheck,
    /// Glance at the minimap.
    MinimapGlance,
    /// Do nothing for a moment.
    IdlePause,
}

impl BehaviorKind {
    /// The full behavior catalog, in selection order.
    pub const CATALOG: [BehaviorKind; 6] = [
        BehaviorKind::CameraSweep,
        BehaviorKind::TabFlick,
        BehaviorKind::SkillHover,
        BehaviorKind::InventoryCheck,
        BehaviorKind::MinimapGlance,
        BehaviorKind::IdlePause,
    ];
}

/// Named behavior-timing profile for the anti-detection scheduler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProfileKind {
    /// Low activity, slower reactions.
    Conservative,
    /// Balanced behavior.
    #[default]
    Normal,
    /// Higher activity, faster reactions.
    Active,
    /// Randomized middle ground.
    Erratic,
}
