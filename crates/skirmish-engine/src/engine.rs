//! The agent engine — the decision core's single entry point.
//!
//! `AgentEngine` processes queued host commands at cycle boundaries, runs
//! goal progression, the combat state machine and the anti-detection
//! scheduler, and produces a `CycleOutcome` with the requested actions, an
//! advisory sleep hint, and a serializable status snapshot.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{error, info};

use skirmish_core::actions::ActionRequest;
use skirmish_core::commands::AgentCommand;
use skirmish_core::constants::{FAULT_RETRY_MAX_MS, FAULT_RETRY_MIN_MS, IDLE_DELAY_MAX_MS};
use skirmish_core::snapshot::WorldSnapshot;
use skirmish_core::status::AgentStatus;

use skirmish_ai::antidetect::{AntiDetectConfig, AntiDetectScheduler, Interlude};
use skirmish_ai::goals::{GoalEvent, GoalTracker};
use skirmish_ai::selector::SelectionCriteria;

use crate::combat::{CombatConfig, CombatStateMachine};
use crate::error::EngineError;

/// Configuration for constructing an engine.
pub struct EngineConfig {
    /// RNG seed for determinism. Same seed + same snapshots = same outcomes.
    pub seed: u64,
    pub combat: CombatConfig,
    pub antidetect: AntiDetectConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            combat: CombatConfig::default(),
            antidetect: AntiDetectConfig::default(),
        }
    }
}

/// Everything one cycle produced.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleOutcome {
    /// Requests for the executor, in dispatch order.
    pub actions: Vec<ActionRequest>,
    /// Advisory sleep before the next cycle (ms).
    pub sleep_hint_ms: u64,
    pub status: AgentStatus,
}

/// The agent engine. Owns all decision state and the RNG.
pub struct AgentEngine {
    running: bool,
    combat: CombatStateMachine,
    criteria: SelectionCriteria,
    scheduler: AntiDetectScheduler,
    goals: GoalTracker,
    rng: ChaCha8Rng,
    command_queue: VecDeque<AgentCommand>,
}

impl AgentEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            running: false,
            combat: CombatStateMachine::new(config.combat),
            criteria: SelectionCriteria::new(),
            scheduler: AntiDetectScheduler::new(config.antidetect),
            goals: GoalTracker::new(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
        }
    }

    /// Queue a host command for processing at the next cycle boundary.
    pub fn queue_command(&mut self, command: AgentCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = AgentCommand>) {
        self.command_queue.extend(commands);
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Run one cycle against the snapshot. Never panics and never fails:
    /// a fault inside the cycle is logged and converted into a retry
    /// outcome with a fixed backoff hint.
    pub fn cycle(&mut self, snapshot: &WorldSnapshot) -> CycleOutcome {
        self.process_commands(snapshot.now_ms);

        match self.try_cycle(snapshot) {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(%err, "cycle fault, backing off");
                CycleOutcome {
                    actions: Vec::new(),
                    sleep_hint_ms: self.rng.gen_range(FAULT_RETRY_MIN_MS..=FAULT_RETRY_MAX_MS),
                    status: self.status(snapshot),
                }
            }
        }
    }

    fn try_cycle(&mut self, snapshot: &WorldSnapshot) -> Result<CycleOutcome, EngineError> {
        validate_snapshot(snapshot)?;

        if !self.running {
            return Ok(CycleOutcome {
                actions: Vec::new(),
                sleep_hint_ms: IDLE_DELAY_MAX_MS,
                status: self.status(snapshot),
            });
        }

        let now = snapshot.now_ms;
        let mut actions = Vec::new();

        match self.goals.update(now, &snapshot.local.skills, snapshot.local.weapon_category) {
            Some(GoalEvent::Activated { style_request }) => {
                if let Some(goal) = self.goals.current() {
                    self.criteria.apply_goal(goal.spec());
                }
                if let Some(style) = style_request {
                    actions.push(ActionRequest::ChangeCombatStyle { style });
                }
            }
            Some(GoalEvent::Completed { .. }) => {
                // Targeting from the finished goal no longer applies; fall
                // back to unrestricted selection until the next activation.
                self.criteria.clear_targets();
            }
            None => {}
        }

        let step = self.combat.step(snapshot, &self.criteria, &mut self.rng);
        for _ in &step.actions {
            self.scheduler.record_action();
        }
        actions.extend(step.actions);
        let mut sleep_hint_ms = step.delay_ms;

        if let Some(interlude) = self.scheduler.poll(now, &mut self.rng) {
            let (request, duration_ms) = match interlude {
                Interlude::Behavior { kind, duration_ms } => (
                    ActionRequest::PerformBehavior {
                        behavior: kind,
                        duration_ms,
                    },
                    duration_ms,
                ),
                Interlude::Break { duration_ms } => {
                    (ActionRequest::TakeBreak { duration_ms }, duration_ms)
                }
            };
            actions.push(request);
            // The interlude extends, never shortens, the combat delay.
            sleep_hint_ms = sleep_hint_ms.max(duration_ms);
        }

        Ok(CycleOutcome {
            actions,
            sleep_hint_ms,
            status: self.status(snapshot),
        })
    }

    /// Build the externally visible status for this cycle.
    fn status(&self, snapshot: &WorldSnapshot) -> AgentStatus {
        let now = snapshot.now_ms;
        let session = self.combat.session();
        AgentStatus {
            running: self.running,
            combat_state: self.combat.state(),
            current_target: session.target_id(),
            kills: session.kills(),
            kills_per_hour: session.kills_per_hour(now),
            session_ms: session.session_ms(now),
            fatigue: self.scheduler.fatigue(),
            recent_behavior_triggers: self.scheduler.recent_triggers(),
            current_goal: self.goals.current().map(|goal| {
                goal.view(now, snapshot.local.skills.level(goal.spec().skill))
            }),
            queued_goals: self.goals.queue_len(),
            completed_goals: self.goals.completed_count(),
        }
    }

    fn process_commands(&mut self, now_ms: u64) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command, now_ms);
        }
    }

    fn handle_command(&mut self, command: AgentCommand, now_ms: u64) {
        match command {
            AgentCommand::Start => {
                if !self.running {
                    self.running = true;
                    self.goals.start();
                    info!("agent started");
                }
            }
            AgentCommand::Stop => {
                if self.running {
                    self.running = false;
                    self.goals.stop(now_ms);
                    self.combat.reset();
                    info!("agent stopped");
                }
            }
            AgentCommand::QueueGoal { spec } => self.goals.push(spec),
            AgentCommand::ClearGoals => self.goals.clear_queue(),
            AgentCommand::FailCurrentGoal { reason } => {
                self.goals.fail_current(&reason, now_ms);
                self.criteria.clear_targets();
            }
            AgentCommand::SetPriority { priority } => self.criteria.set_priority(priority),
            AgentCommand::SetMaxDistance { tiles } => self.criteria.set_max_distance(tiles),
            AgentCommand::SetCombatLevelRange { min, max } => {
                self.criteria.set_combat_level_range(min, max)
            }
            AgentCommand::SetAvoidInCombat { avoid } => self.criteria.set_avoid_in_combat(avoid),
            AgentCommand::SetRequireLineOfSight { require } => {
                self.criteria.set_require_line_of_sight(require)
            }
            AgentCommand::SetAllowedArea { area } => self.criteria.set_allowed_area(area),
            AgentCommand::SetBehaviorProfile { profile } => self.scheduler.set_profile(profile),
            AgentCommand::SetAntiDetectionEnabled { enabled } => {
                self.scheduler.set_enabled(enabled)
            }
            AgentCommand::ResetAntiDetection => self.scheduler.reset(),
        }
    }
}

impl Default for AgentEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

/// Reject snapshots the engine cannot safely reason about.
fn validate_snapshot(snapshot: &WorldSnapshot) -> Result<(), EngineError> {
    let local = &snapshot.local;
    if !local.health_pct.is_finite() || !local.position.x.is_finite() || !local.position.y.is_finite()
    {
        return Err(EngineError::MalformedSnapshot(
            "non-finite local actor state".to_string(),
        ));
    }
    for candidate in &snapshot.candidates {
        if !candidate.health_pct.is_finite()
            || !candidate.position.x.is_finite()
            || !candidate.position.y.is_finite()
        {
            return Err(EngineError::MalformedSnapshot(format!(
                "non-finite state for candidate {}",
                candidate.id
            )));
        }
    }
    Ok(())
}
