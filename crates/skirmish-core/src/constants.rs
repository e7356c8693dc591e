//! Decision-core tuning constants.
//!
//! The anti-detection chance and fatigue constants are empirically chosen
//! tuning values; they are named here so hosts can reason about them, and
//! the scheduler exposes config overrides for the ones that matter.

// --- Combat state machine ---

/// Health percentage at or below which the recovery check fires.
pub const HEALTH_RECOVERY_THRESHOLD_PCT: f64 = 20.0;

/// Engagement timeout: elapsed ms since the last attack before disengaging.
pub const COMBAT_TIMEOUT_MS: u64 = 10_000;

/// Consecutive no-combat observations before disengaging.
pub const MAX_CONSECUTIVE_MISSES: u32 = 5;

/// Delay hint after a disengage (ms).
pub const DISENGAGE_DELAY_MIN_MS: u64 = 500;
pub const DISENGAGE_DELAY_MAX_MS: u64 = 800;

/// Delay hint while a fight is in progress or an attack was just issued (ms).
pub const FIGHT_DELAY_MIN_MS: u64 = 600;
pub const FIGHT_DELAY_MAX_MS: u64 = 1_000;

/// Delay hint when no target could be found (ms).
pub const IDLE_DELAY_MIN_MS: u64 = 1_000;
pub const IDLE_DELAY_MAX_MS: u64 = 2_000;

/// Delay hint while consuming a recovery item (ms).
pub const RECOVERY_DELAY_MIN_MS: u64 = 800;
pub const RECOVERY_DELAY_MAX_MS: u64 = 1_200;

/// Fixed retry delay after an unexpected cycle fault (ms).
pub const FAULT_RETRY_MIN_MS: u64 = 1_000;
pub const FAULT_RETRY_MAX_MS: u64 = 2_000;

// --- Target selection defaults ---

/// Default maximum targeting distance in tiles.
pub const DEFAULT_MAX_DISTANCE: f64 = 10.0;

/// Default combat level range.
pub const DEFAULT_MIN_COMBAT_LEVEL: u32 = 1;
pub const DEFAULT_MAX_COMBAT_LEVEL: u32 = 999;

// --- Anti-detection: fatigue ---

/// Fatigue points accrued per whole session hour.
pub const FATIGUE_PER_SESSION_HOUR: u64 = 10;

/// Recorded actions per fatigue point.
pub const ACTIONS_PER_FATIGUE_POINT: u64 = 100;

/// Fatigue ceiling.
pub const FATIGUE_MAX: u32 = 100;

/// Fatigue above which behavior durations start scaling up.
pub const FATIGUE_SLOWDOWN_THRESHOLD: u32 = 30;

/// Fatigue points removed by a taken break.
pub const FATIGUE_BREAK_RELIEF: u32 = 20;

// --- Anti-detection: trigger decision ---

/// Minimum ms between triggered behaviors.
pub const BEHAVIOR_COOLDOWN_MS: u64 = 10_000;

/// Idle ms since the last behavior after which the chance bonus applies.
pub const IDLE_BONUS_AFTER_MS: u64 = 60_000;

/// Chance bonus when idle past `IDLE_BONUS_AFTER_MS`.
pub const IDLE_CHANCE_BONUS: u32 = 5;

/// Recent-trigger count above which the chance penalty applies.
pub const RECENT_TRIGGER_LIMIT: u32 = 10;

/// Chance penalty when past `RECENT_TRIGGER_LIMIT`.
pub const RECENT_TRIGGER_PENALTY: u32 = 5;

/// Hard bounds on the per-cycle trigger chance (percent).
pub const TRIGGER_CHANCE_MIN: u32 = 1;
pub const TRIGGER_CHANCE_MAX: u32 = 50;

/// Adaptive base-chance bump after one session hour, and its cap.
pub const ADAPTIVE_1H_BONUS: u32 = 5;
pub const ADAPTIVE_1H_CAP: u32 = 20;

/// Adaptive base-chance bump after two session hours, and its cap.
pub const ADAPTIVE_2H_BONUS: u32 = 10;
pub const ADAPTIVE_2H_CAP: u32 = 25;

// --- Anti-detection: behavior timing ---

/// Absolute floor on any behavior duration (ms).
pub const REACTION_FLOOR_MS: u64 = 50;

/// Jitter applied when clamping a duration into profile bounds (ms).
pub const REACTION_CLAMP_JITTER_MS: u64 = 200;

// --- Anti-detection: breaks ---

/// Interval between scheduled break offers (ms). Default 30 minutes.
pub const BREAK_INTERVAL_MS: u64 = 30 * 60 * 1_000;

/// Probability (percent) that a scheduled break offer is taken.
pub const SCHEDULED_BREAK_CHANCE_PCT: u32 = 15;

/// Fatigue above which micro-breaks are offered.
pub const MICRO_BREAK_FATIGUE_THRESHOLD: u32 = 70;

/// Per-cycle micro-break probability in per-mille.
pub const MICRO_BREAK_CHANCE_PER_MILLE: u32 = 5;

/// Break duration: fixed base (ms).
pub const BREAK_BASE_MS: u64 = 30_000;

/// Break duration: ms added per fatigue point.
pub const BREAK_MS_PER_FATIGUE_POINT: u64 = 200;

/// Break duration: random component bounds (ms).
pub const BREAK_RANDOM_MIN_MS: u64 = 10_000;
pub const BREAK_RANDOM_MAX_MS: u64 = 60_000;
