//! Target selection — pure function of the current snapshot and criteria.
//!
//! Selection never fails with an error: an empty filtered pool returns
//! `None` and the caller tries again next cycle.

use std::collections::HashSet;

use rand::Rng;
use tracing::debug;

use skirmish_core::constants::*;
use skirmish_core::enums::TargetPriority;
use skirmish_core::goal::GoalSpec;
use skirmish_core::snapshot::{Candidate, WorldSnapshot};
use skirmish_core::types::Area;

/// Mutable selection configuration. Names are stored lowercased and matched
/// case-insensitively.
#[derive(Debug, Clone)]
pub struct SelectionCriteria {
    target_names: HashSet<String>,
    target_ids: HashSet<u32>,
    denied_names: HashSet<String>,
    denied_ids: HashSet<u32>,
    priority: TargetPriority,
    max_distance: f64,
    min_level: u32,
    max_level: u32,
    avoid_in_combat: bool,
    require_line_of_sight: bool,
    allowed_area: Option<Area>,
}

impl Default for SelectionCriteria {
    fn default() -> Self {
        Self {
            target_names: HashSet::new(),
            target_ids: HashSet::new(),
            denied_names: HashSet::new(),
            denied_ids: HashSet::new(),
            priority: TargetPriority::Nearest,
            max_distance: DEFAULT_MAX_DISTANCE,
            min_level: DEFAULT_MIN_COMBAT_LEVEL,
            max_level: DEFAULT_MAX_COMBAT_LEVEL,
            avoid_in_combat: true,
            require_line_of_sight: true,
            allowed_area: None,
        }
    }
}

impl SelectionCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a name to the allow-list. Blank names are ignored.
    pub fn add_target_name(&mut self, name: &str) {
        let trimmed = name.trim();
        if !trimmed.is_empty() {
            self.target_names.insert(trimmed.to_ascii_lowercase());
        }
    }

    pub fn add_target_id(&mut self, id: u32) {
        self.target_ids.insert(id);
    }

    /// Add a name to the deny-list. Blank names are ignored.
    pub fn deny_name(&mut self, name: &str) {
        let trimmed = name.trim();
        if !trimmed.is_empty() {
            self.denied_names.insert(trimmed.to_ascii_lowercase());
        }
    }

    pub fn deny_id(&mut self, id: u32) {
        self.denied_ids.insert(id);
    }

    pub fn set_priority(&mut self, priority: TargetPriority) {
        self.priority = priority;
    }

    pub fn priority(&self) -> TargetPriority {
        self.priority
    }

    /// Maximum targeting distance, floored at one tile.
    pub fn set_max_distance(&mut self, tiles: f64) {
        self.max_distance = tiles.max(1.0);
    }

    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    /// Combat level range; min is floored at 1 and max at min.
    pub fn set_combat_level_range(&mut self, min: u32, max: u32) {
        self.min_level = min.max(1);
        self.max_level = max.max(self.min_level);
    }

    pub fn set_avoid_in_combat(&mut self, avoid: bool) {
        self.avoid_in_combat = avoid;
    }

    pub fn set_require_line_of_sight(&mut self, require: bool) {
        self.require_line_of_sight = require;
    }

    pub fn set_allowed_area(&mut self, area: Option<Area>) {
        self.allowed_area = area;
    }

    pub fn clear_targets(&mut self) {
        self.target_names.clear();
        self.target_ids.clear();
    }

    pub fn clear_denied(&mut self) {
        self.denied_names.clear();
        self.denied_ids.clear();
    }

    /// Replace the allow-lists with the targeting parameters of a goal.
    pub fn apply_goal(&mut self, spec: &GoalSpec) {
        self.clear_targets();
        for name in &spec.target_names {
            self.add_target_name(name);
        }
        for &id in &spec.target_ids {
            self.add_target_id(id);
        }
        debug!(
            names = self.target_names.len(),
            ids = self.target_ids.len(),
            "selection criteria retargeted for goal"
        );
    }

    /// Select the best candidate from the snapshot, or `None` when nothing
    /// passes the filter chain.
    pub fn select_best_target<'a>(
        &self,
        snapshot: &'a WorldSnapshot,
        rng: &mut impl Rng,
    ) -> Option<&'a Candidate> {
        let local = &snapshot.local;

        let filtered: Vec<&Candidate> = snapshot
            .candidates
            .iter()
            .filter(|c| self.in_allow_list(c))
            .filter(|c| c.is_alive() && c.attackable && c.on_screen)
            .filter(|c| !self.is_denied(c))
            .filter(|c| c.position.distance_to(&local.position) <= self.max_distance)
            .filter(|c| c.level >= self.min_level && c.level <= self.max_level)
            .filter(|c| !self.avoid_in_combat || !c.in_combat)
            .filter(|c| {
                self.allowed_area
                    .map_or(true, |area| area.contains(&c.position))
            })
            .filter(|c| !self.require_line_of_sight || c.on_screen)
            .collect();

        if filtered.is_empty() {
            return None;
        }

        let picked = match self.priority {
            TargetPriority::Nearest => best_by_key(&filtered, |c| {
                c.position.distance_to(&local.position)
            }, false),
            TargetPriority::HighestLevel => best_by_key(&filtered, |c| c.level as f64, true),
            TargetPriority::LowestLevel => best_by_key(&filtered, |c| c.level as f64, false),
            TargetPriority::LowestHealth => best_by_key(&filtered, |c| c.health_pct, false),
            TargetPriority::HighestHealth => best_by_key(&filtered, |c| c.health_pct, true),
            TargetPriority::Random => filtered[rng.gen_range(0..filtered.len())],
        };

        debug!(target_id = picked.id, name = %picked.name, "target selected");
        Some(picked)
    }

    /// With an empty allow-list every candidate qualifies for the raw pool;
    /// otherwise a name or id match is required.
    fn in_allow_list(&self, candidate: &Candidate) -> bool {
        if self.target_names.is_empty() && self.target_ids.is_empty() {
            return true;
        }
        self.target_ids.contains(&candidate.id)
            || self
                .target_names
                .contains(&candidate.name.to_ascii_lowercase())
    }

    fn is_denied(&self, candidate: &Candidate) -> bool {
        self.denied_ids.contains(&candidate.id)
            || self
                .denied_names
                .contains(&candidate.name.to_ascii_lowercase())
    }
}

/// Pick the extreme element by key, keeping the first seen on ties.
///
/// `Iterator::min_by`/`max_by` keep the last element on ties, which would
/// break the first-seen guarantee.
fn best_by_key<'a, F>(candidates: &[&'a Candidate], key: F, want_max: bool) -> &'a Candidate
where
    F: Fn(&Candidate) -> f64,
{
    let mut best = candidates[0];
    let mut best_key = key(best);
    for &c in &candidates[1..] {
        let k = key(c);
        let better = if want_max { k > best_key } else { k < best_key };
        if better {
            best = c;
            best_key = k;
        }
    }
    best
}
