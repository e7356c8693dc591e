//! Combat state machine.
//!
//! One `step` per cycle, driven entirely by the snapshot. Transition checks
//! run in a fixed priority order; the first one that fires decides the
//! cycle. All delays are advisory sleep hints for the host, the machine
//! itself never sleeps.

use rand::Rng;
use tracing::{debug, info};

use skirmish_core::actions::ActionRequest;
use skirmish_core::constants::*;
use skirmish_core::enums::CombatState;
use skirmish_core::snapshot::WorldSnapshot;

use skirmish_ai::selector::SelectionCriteria;

use crate::session::EngagementSession;

/// Combat tuning, overridable per engine instance.
#[derive(Debug, Clone, Copy)]
pub struct CombatConfig {
    /// Health percentage at or below which recovery pre-empts everything.
    pub recovery_threshold_pct: f64,
    /// Ms since the last attack before an engagement times out.
    pub timeout_ms: u64,
    /// Consecutive no-combat observations before disengaging.
    pub max_misses: u32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            recovery_threshold_pct: HEALTH_RECOVERY_THRESHOLD_PCT,
            timeout_ms: COMBAT_TIMEOUT_MS,
            max_misses: MAX_CONSECUTIVE_MISSES,
        }
    }
}

/// What one combat step produced.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    pub actions: Vec<ActionRequest>,
    /// Advisory delay hint (ms).
    pub delay_ms: u64,
}

/// The combat state machine. Owns the engagement session.
#[derive(Debug)]
pub struct CombatStateMachine {
    state: CombatState,
    config: CombatConfig,
    session: EngagementSession,
}

impl CombatStateMachine {
    pub fn new(config: CombatConfig) -> Self {
        Self {
            state: CombatState::Idle,
            config,
            session: EngagementSession::new(),
        }
    }

    pub fn state(&self) -> CombatState {
        self.state
    }

    pub fn session(&self) -> &EngagementSession {
        &self.session
    }

    /// Drop any engagement and return to `Idle`. Kill statistics survive.
    pub fn reset(&mut self) {
        self.session.clear_target();
        self.state = CombatState::Idle;
    }

    /// Run one cycle of combat decisions against the snapshot.
    pub fn step(
        &mut self,
        snapshot: &WorldSnapshot,
        criteria: &SelectionCriteria,
        rng: &mut impl Rng,
    ) -> StepOutcome {
        let now = snapshot.now_ms;
        self.session.begin(now);

        // Recovery pre-empts everything, engaged or not.
        if snapshot.local.health_pct <= self.config.recovery_threshold_pct {
            self.state = CombatState::Recovering;
            debug!(health_pct = snapshot.local.health_pct, "health low, recovering");
            return StepOutcome {
                actions: vec![ActionRequest::ConsumeRecoveryItem],
                delay_ms: rng.gen_range(RECOVERY_DELAY_MIN_MS..=RECOVERY_DELAY_MAX_MS),
            };
        }

        if let Some(target_id) = self.session.target_id() {
            return self.step_engaged(snapshot, target_id, rng);
        }

        self.state = CombatState::Acquiring;
        match criteria.select_best_target(snapshot, rng) {
            Some(target) => {
                info!(target_id = target.id, name = %target.name, "engaging target");
                self.session.engage(target.id, now);
                self.state = CombatState::Engaging;
                StepOutcome {
                    actions: vec![ActionRequest::attack(target.id)],
                    delay_ms: rng.gen_range(FIGHT_DELAY_MIN_MS..=FIGHT_DELAY_MAX_MS),
                }
            }
            None => {
                self.state = CombatState::Idle;
                StepOutcome {
                    actions: Vec::new(),
                    delay_ms: rng.gen_range(IDLE_DELAY_MIN_MS..=IDLE_DELAY_MAX_MS),
                }
            }
        }
    }

    /// Engaged-path checks: target validity, timeout, then miss counting.
    fn step_engaged(
        &mut self,
        snapshot: &WorldSnapshot,
        target_id: u32,
        rng: &mut impl Rng,
    ) -> StepOutcome {
        let now = snapshot.now_ms;

        let target = match snapshot.candidate(target_id) {
            // Kill credit requires an observed death. A target that merely
            // left the snapshot may have wandered off or despawned.
            Some(target) if !target.is_alive() => {
                self.session.record_kill();
                info!(target_id, kills = self.session.kills(), "target killed");
                return self.disengage(rng);
            }
            None => {
                debug!(target_id, "target vanished, no kill credit");
                return self.disengage(rng);
            }
            Some(target) => target,
        };

        if now.saturating_sub(self.session.last_action_ms()) > self.config.timeout_ms {
            debug!(target_id, "engagement timed out");
            return self.disengage(rng);
        }

        if !target.in_combat && !snapshot.local.in_combat {
            let misses = self.session.record_miss();
            debug!(target_id, misses, "no combat observed");
            if misses >= self.config.max_misses {
                return self.disengage(rng);
            }
        } else {
            self.session.reset_misses();
            self.state = CombatState::Fighting;
        }

        StepOutcome {
            actions: Vec::new(),
            delay_ms: rng.gen_range(FIGHT_DELAY_MIN_MS..=FIGHT_DELAY_MAX_MS),
        }
    }

    fn disengage(&mut self, rng: &mut impl Rng) -> StepOutcome {
        self.session.clear_target();
        self.state = CombatState::Disengaging;
        StepOutcome {
            actions: Vec::new(),
            delay_ms: rng.gen_range(DISENGAGE_DELAY_MIN_MS..=DISENGAGE_DELAY_MAX_MS),
        }
    }
}

impl Default for CombatStateMachine {
    fn default() -> Self {
        Self::new(CombatConfig::default())
    }
}
