//! Goal tracking — FIFO queue of skill-level objectives.
//!
//! At most one goal is Active; per-goal status moves strictly forward
//! (`Pending → Active → Completed | Failed | Cancelled`). Terminal goals are
//! dropped from tracking, surviving only in the aggregate counters.

use std::collections::VecDeque;

use tracing::{info, warn};

use skirmish_core::enums::{CombatStyle, GoalStatus, WeaponCategory};
use skirmish_core::goal::GoalSpec;
use skirmish_core::status::GoalView;
use skirmish_core::types::SkillLevels;

/// A queued goal: immutable spec plus mutable tracking status.
#[derive(Debug, Clone)]
pub struct Goal {
    spec: GoalSpec,
    status: GoalStatus,
    /// Skill level captured at activation.
    start_level: u32,
    started_ms: u64,
    finished_ms: u64,
    failure_reason: Option<String>,
}

impl Goal {
    fn new(spec: GoalSpec) -> Self {
        Self {
            spec,
            status: GoalStatus::Pending,
            start_level: 0,
            started_ms: 0,
            finished_ms: 0,
            failure_reason: None,
        }
    }

    pub fn spec(&self) -> &GoalSpec {
        &self.spec
    }

    pub fn status(&self) -> GoalStatus {
        self.status
    }

    pub fn start_level(&self) -> u32 {
        self.start_level
    }

    pub fn failure_reason(&self) -> Option<&str> {
        self.failure_reason.as_deref()
    }

    /// Progress percentage, clamped to [0, 100]. A degenerate goal whose
    /// target does not exceed the start level reads as complete.
    pub fn progress_pct(&self, current_level: u32) -> f64 {
        if current_level >= self.spec.target_level || self.spec.target_level <= self.start_level {
            return 100.0;
        }
        let gained = current_level.saturating_sub(self.start_level) as f64;
        let needed = (self.spec.target_level - self.start_level) as f64;
        (gained / needed * 100.0).clamp(0.0, 100.0)
    }

    /// Linear time-remaining estimate from elapsed time and progress.
    /// `None` while no meaningful estimate exists.
    pub fn eta_ms(&self, now_ms: u64, current_level: u32) -> Option<u64> {
        if self.status != GoalStatus::Active || self.started_ms == 0 {
            return None;
        }
        let progress = self.progress_pct(current_level);
        if progress <= 0.0 || progress >= 100.0 {
            return None;
        }
        let elapsed = now_ms.saturating_sub(self.started_ms) as f64;
        Some((elapsed / progress * (100.0 - progress)) as u64)
    }

    pub fn view(&self, now_ms: u64, current_level: u32) -> GoalView {
        GoalView {
            description: self.spec.description.clone(),
            status: self.status,
            progress_pct: self.progress_pct(current_level),
            eta_ms: self.eta_ms(now_ms, current_level),
        }
    }
}

/// Outcome of a tracker update the engine must react to.
#[derive(Debug, Clone, PartialEq)]
pub enum GoalEvent {
    /// A goal was dequeued and activated. The engine should retarget the
    /// selector from the active goal's spec and dispatch the style request.
    Activated { style_request: Option<CombatStyle> },
    /// The active goal reached its target level.
    Completed { description: String },
}

/// FIFO goal queue with aggregate statistics.
#[derive(Debug, Default)]
pub struct GoalTracker {
    queue: VecDeque<Goal>,
    current: Option<Goal>,
    running: bool,
    completed_count: u32,
    total_goal_time_ms: u64,
}

impl GoalTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, spec: GoalSpec) {
        info!(description = %spec.description, "goal queued");
        self.queue.push_back(Goal::new(spec));
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stop tracking; the active goal, if any, is cancelled.
    pub fn stop(&mut self, now_ms: u64) {
        self.running = false;
        if let Some(goal) = self.current.take() {
            if goal.status == GoalStatus::Active {
                let mut goal = goal;
                goal.status = GoalStatus::Cancelled;
                goal.finished_ms = now_ms;
                info!(description = %goal.spec.description, "active goal cancelled");
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn current(&self) -> Option<&Goal> {
        self.current.as_ref()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn completed_count(&self) -> u32 {
        self.completed_count
    }

    pub fn total_goal_time_ms(&self) -> u64 {
        self.total_goal_time_ms
    }

    pub fn average_goal_time_ms(&self) -> u64 {
        if self.completed_count == 0 {
            0
        } else {
            self.total_goal_time_ms / self.completed_count as u64
        }
    }

    /// Drop all queued (not yet active) goals.
    pub fn clear_queue(&mut self) {
        self.queue.clear();
        info!("goal queue cleared");
    }

    /// Fail the active goal with an explicit reason. Terminal but non-fatal:
    /// the next update activates the next queued goal.
    pub fn fail_current(&mut self, reason: &str, now_ms: u64) {
        if let Some(goal) = self.current.as_mut() {
            if goal.status == GoalStatus::Active {
                goal.status = GoalStatus::Failed;
                goal.failure_reason = Some(reason.to_string());
                goal.finished_ms = now_ms;
                warn!(description = %goal.spec.description, reason, "goal failed");
                self.current = None;
            }
        }
    }

    /// Per-cycle progression: completes the active goal when its target
    /// level is reached, otherwise activates the next queued goal when idle.
    pub fn update(
        &mut self,
        now_ms: u64,
        skills: &SkillLevels,
        weapon: WeaponCategory,
    ) -> Option<GoalEvent> {
        if !self.running {
            return None;
        }

        if let Some(goal) = self.current.as_mut() {
            let current_level = skills.level(goal.spec.skill);
            if current_level >= goal.spec.target_level {
                goal.status = GoalStatus::Completed;
                goal.finished_ms = now_ms;
                let duration = now_ms.saturating_sub(goal.started_ms);
                self.total_goal_time_ms += duration;
                self.completed_count += 1;
                let description = goal.spec.description.clone();
                info!(%description, duration_ms = duration, "goal completed");
                self.current = None;
                return Some(GoalEvent::Completed { description });
            }
            return None;
        }

        let mut goal = self.queue.pop_front()?;
        goal.status = GoalStatus::Active;
        goal.started_ms = now_ms;
        goal.start_level = skills.level(goal.spec.skill);

        let style_request = match goal.spec.style_hint {
            Some(style) if style.is_compatible_with(weapon) => Some(style),
            Some(style) => {
                warn!(?style, ?weapon, "style hint incompatible with weapon, skipped");
                None
            }
            None => None,
        };

        info!(
            description = %goal.spec.description,
            start_level = goal.start_level,
            target_level = goal.spec.target_level,
            "goal activated"
        );
        self.current = Some(goal);
        Some(GoalEvent::Activated { style_request })
    }
}
