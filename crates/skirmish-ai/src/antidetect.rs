//! Anti-detection scheduler — fatigue tracking and behavior interleaving.
//!
//! Injects variability so the agent's timing does not look mechanically
//! uniform. Purely advisory: the scheduler only emits requests and sleep
//! hints, it never sleeps and never blocks combat correctness.

use rand::Rng;
use tracing::{debug, info};

use skirmish_core::constants::*;
use skirmish_core::enums::{BehaviorKind, ProfileKind};

use crate::profiles::{base_duration_ms, get_profile};

/// Scheduler configuration with overridable tuning constants.
#[derive(Debug, Clone, Copy)]
pub struct AntiDetectConfig {
    pub profile: ProfileKind,
    pub enabled: bool,
    /// Scale the base chance up as the session ages.
    pub adaptive: bool,
    /// Interval between scheduled break offers (ms).
    pub break_interval_ms: u64,
}

impl Default for AntiDetectConfig {
    fn default() -> Self {
        Self {
            profile: ProfileKind::Normal,
            enabled: true,
            adaptive: true,
            break_interval_ms: BREAK_INTERVAL_MS,
        }
    }
}

/// What the scheduler wants interleaved with combat this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interlude {
    Behavior { kind: BehaviorKind, duration_ms: u64 },
    Break { duration_ms: u64 },
}

/// Session-scoped scheduler state.
///
/// Fatigue is recomputed every poll from session age and the action counter,
/// minus accumulated break relief, so it is non-decreasing between breaks
/// and always within [0, 100].
#[derive(Debug)]
pub struct AntiDetectScheduler {
    config: AntiDetectConfig,
    session_start_ms: Option<u64>,
    action_count: u64,
    fatigue: u32,
    fatigue_relief: u32,
    last_behavior_ms: Option<u64>,
    /// Behaviors triggered since the last break.
    recent_triggers: u32,
    total_triggers: u64,
    next_break_offer_ms: Option<u64>,
}

impl AntiDetectScheduler {
    pub fn new(config: AntiDetectConfig) -> Self {
        Self {
            config,
            session_start_ms: None,
            action_count: 0,
            fatigue: 0,
            fatigue_relief: 0,
            last_behavior_ms: None,
            recent_triggers: 0,
            total_triggers: 0,
            next_break_offer_ms: None,
        }
    }

    /// Record one agent action toward the fatigue model.
    pub fn record_action(&mut self) {
        self.action_count += 1;
    }

    pub fn fatigue(&self) -> u32 {
        self.fatigue
    }

    pub fn action_count(&self) -> u64 {
        self.action_count
    }

    pub fn recent_triggers(&self) -> u32 {
        self.recent_triggers
    }

    pub fn total_triggers(&self) -> u64 {
        self.total_triggers
    }

    pub fn set_profile(&mut self, profile: ProfileKind) {
        self.config.profile = profile;
        info!(?profile, "behavior profile changed");
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.enabled = enabled;
        info!(enabled, "anti-detection scheduler toggled");
    }

    /// Restore the initial state; the session restarts at the next poll.
    pub fn reset(&mut self) {
        let config = self.config;
        *self = Self::new(config);
        info!("anti-detection scheduler reset");
    }

    /// Poll once per cycle. May return a behavior or a break to interleave.
    ///
    /// A break takes precedence over a micro-behavior: it already covers
    /// the "do something non-mechanical" purpose and applies fatigue relief.
    pub fn poll(&mut self, now_ms: u64, rng: &mut impl Rng) -> Option<Interlude> {
        if !self.config.enabled {
            return None;
        }

        let start = *self.session_start_ms.get_or_insert(now_ms);
        self.fatigue = self.compute_fatigue(now_ms, start);

        if self.break_due(now_ms, start, rng) {
            return Some(self.take_break(rng));
        }

        if !self.should_trigger(now_ms, rng) {
            return None;
        }

        let kind = BehaviorKind::CATALOG[rng.gen_range(0..BehaviorKind::CATALOG.len())];
        let duration_ms = self.behavior_duration(kind, rng);

        self.last_behavior_ms = Some(now_ms);
        self.recent_triggers += 1;
        self.total_triggers += 1;
        debug!(?kind, duration_ms, fatigue = self.fatigue, "behavior triggered");

        Some(Interlude::Behavior { kind, duration_ms })
    }

    /// `min(100, 10 × whole session hours + actions/100)`, less break relief.
    fn compute_fatigue(&self, now_ms: u64, start_ms: u64) -> u32 {
        let session_hours = now_ms.saturating_sub(start_ms) / 3_600_000;
        let base = session_hours * FATIGUE_PER_SESSION_HOUR
            + self.action_count / ACTIONS_PER_FATIGUE_POINT;
        (base.min(FATIGUE_MAX as u64) as u32).saturating_sub(self.fatigue_relief)
    }

    /// The trigger decision: cooldown gate, then a clamped chance roll.
    fn should_trigger(&self, now_ms: u64, rng: &mut impl Rng) -> bool {
        if let Some(last) = self.last_behavior_ms {
            if now_ms.saturating_sub(last) < BEHAVIOR_COOLDOWN_MS {
                return false;
            }
        }
        let chance = self.trigger_chance(now_ms);
        rng.gen_range(1..=1000) <= chance * 10
    }

    /// Current trigger chance (percent), always within [1, 50].
    pub fn trigger_chance(&self, now_ms: u64) -> u32 {
        let mut chance = self.effective_base_chance(now_ms) + self.fatigue / 10;

        let idle_ms = self
            .last_behavior_ms
            .map_or(u64::MAX, |last| now_ms.saturating_sub(last));
        if idle_ms > IDLE_BONUS_AFTER_MS {
            chance += IDLE_CHANCE_BONUS;
        }

        if self.recent_triggers > RECENT_TRIGGER_LIMIT {
            chance = chance.saturating_sub(RECENT_TRIGGER_PENALTY);
        }

        chance.clamp(TRIGGER_CHANCE_MIN, TRIGGER_CHANCE_MAX)
    }

    /// Base chance, bumped as the session ages when adaptive mode is on.
    fn effective_base_chance(&self, now_ms: u64) -> u32 {
        let base = get_profile(self.config.profile).base_trigger_chance;
        if !self.config.adaptive {
            return base;
        }
        let session_minutes = self
            .session_start_ms
            .map_or(0, |start| now_ms.saturating_sub(start) / 60_000);
        if session_minutes > 120 {
            (base + ADAPTIVE_2H_BONUS).min(ADAPTIVE_2H_CAP)
        } else if session_minutes > 60 {
            (base + ADAPTIVE_1H_BONUS).min(ADAPTIVE_1H_CAP)
        } else {
            base
        }
    }

    /// Draw a behavior duration: base range, fatigue scaling, profile clamp.
    fn behavior_duration(&self, kind: BehaviorKind, rng: &mut impl Rng) -> u64 {
        let (min, max) = base_duration_ms(kind);
        let mut duration = rng.gen_range(min..=max);

        if self.fatigue > FATIGUE_SLOWDOWN_THRESHOLD {
            duration = (duration as f64 * (1.0 + self.fatigue as f64 / 200.0)) as u64;
        }

        let profile = get_profile(self.config.profile);
        if duration < profile.min_reaction_ms {
            duration = profile.min_reaction_ms + rng.gen_range(0..=REACTION_CLAMP_JITTER_MS);
        } else if duration > profile.max_reaction_ms {
            duration = profile
                .max_reaction_ms
                .saturating_sub(rng.gen_range(0..=REACTION_CLAMP_JITTER_MS));
        }

        duration.max(REACTION_FLOOR_MS)
    }

    /// One scheduled-break roll per interval, plus continuous micro-break
    /// rolls while heavily fatigued.
    fn break_due(&mut self, now_ms: u64, start_ms: u64, rng: &mut impl Rng) -> bool {
        let due = *self
            .next_break_offer_ms
            .get_or_insert(start_ms.saturating_add(self.config.break_interval_ms));
        if now_ms >= due {
            self.next_break_offer_ms = Some(now_ms.saturating_add(self.config.break_interval_ms));
            if rng.gen_range(1..=100) <= SCHEDULED_BREAK_CHANCE_PCT {
                return true;
            }
        }

        self.fatigue > MICRO_BREAK_FATIGUE_THRESHOLD
            && rng.gen_range(1..=1000) <= MICRO_BREAK_CHANCE_PER_MILLE
    }

    /// Compute the break and apply its after-effects: fatigue −20, recent
    /// trigger counter cleared. Session and action counters keep running.
    fn take_break(&mut self, rng: &mut impl Rng) -> Interlude {
        let duration_ms = BREAK_BASE_MS
            + self.fatigue as u64 * BREAK_MS_PER_FATIGUE_POINT
            + rng.gen_range(BREAK_RANDOM_MIN_MS..=BREAK_RANDOM_MAX_MS);

        self.fatigue_relief += FATIGUE_BREAK_RELIEF;
        self.fatigue = self.fatigue.saturating_sub(FATIGUE_BREAK_RELIEF);
        self.recent_triggers = 0;
        info!(duration_ms, fatigue = self.fatigue, "break scheduled");

        Interlude::Break { duration_ms }
    }
}
