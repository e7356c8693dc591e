//! Engagement session bookkeeping.
//!
//! Tracks the current target, the last-attack timestamp used by the combat
//! timeout, the consecutive-miss counter, and kill statistics. All times are
//! host-clock milliseconds carried in the snapshot; the session holds no
//! clock of its own.

/// Per-session combat tracking state.
#[derive(Debug, Default)]
pub struct EngagementSession {
    target_id: Option<u32>,
    /// Host clock at the last issued attack.
    last_action_ms: u64,
    consecutive_misses: u32,
    kills: u32,
    session_start_ms: Option<u64>,
}

impl EngagementSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the session as started at the first observed cycle.
    pub fn begin(&mut self, now_ms: u64) {
        self.session_start_ms.get_or_insert(now_ms);
    }

    /// Engage a target. The attack timestamp is stamped here and only here;
    /// non-attack actions never reset the combat timeout.
    pub fn engage(&mut self, target_id: u32, now_ms: u64) {
        self.target_id = Some(target_id);
        self.last_action_ms = now_ms;
        self.consecutive_misses = 0;
    }

    /// Drop the current target and reset the miss counter.
    pub fn clear_target(&mut self) {
        self.target_id = None;
        self.consecutive_misses = 0;
    }

    pub fn target_id(&self) -> Option<u32> {
        self.target_id
    }

    pub fn last_action_ms(&self) -> u64 {
        self.last_action_ms
    }

    /// Count one cycle where neither side showed a combat flag.
    pub fn record_miss(&mut self) -> u32 {
        self.consecutive_misses += 1;
        self.consecutive_misses
    }

    pub fn reset_misses(&mut self) {
        self.consecutive_misses = 0;
    }

    pub fn consecutive_misses(&self) -> u32 {
        self.consecutive_misses
    }

    pub fn record_kill(&mut self) {
        self.kills += 1;
    }

    pub fn kills(&self) -> u32 {
        self.kills
    }

    /// Elapsed session ms as of `now_ms`; zero before the first cycle.
    pub fn session_ms(&self, now_ms: u64) -> u64 {
        self.session_start_ms
            .map_or(0, |start| now_ms.saturating_sub(start))
    }

    /// Kill rate extrapolated to an hour. Zero until time has elapsed.
    pub fn kills_per_hour(&self, now_ms: u64) -> f64 {
        let elapsed = self.session_ms(now_ms);
        if elapsed == 0 {
            return 0.0;
        }
        self.kills as f64 * 3_600_000.0 / elapsed as f64
    }
}
