//! Fundamental positional and skill-level types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::enums::Skill;

/// 2D position in tile coordinates (fractional tiles allowed).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position in tiles.
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Axis-aligned rectangular area used to restrict targeting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub min: Position,
    pub max: Position,
}

impl Area {
    pub fn new(min: Position, max: Position) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, pos: &Position) -> bool {
        pos.x >= self.min.x && pos.x <= self.max.x && pos.y >= self.min.y && pos.y <= self.max.y
    }
}

/// Per-skill level readings polled from the world-state provider.
///
/// Unlisted skills read as level 1 (the game's floor).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillLevels(HashMap<Skill, u32>);

impl SkillLevels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, skill: Skill, level: u32) -> Self {
        self.set(skill, level);
        self
    }

    pub fn set(&mut self, skill: Skill, level: u32) {
        self.0.insert(skill, level);
    }

    pub fn level(&self, skill: Skill) -> u32 {
        self.0.get(&skill).copied().unwrap_or(1)
    }
}
