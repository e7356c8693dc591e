//! Host loop — the only place anything sleeps.
//!
//! The engine is headless and clock-free; the runner wires it to a world
//! provider and an action executor and drives it cooperatively. Cancellation
//! is polling-based: a queued Stop takes effect at the next cycle boundary.

use std::thread;
use std::time::Duration;

use tracing::debug;

use skirmish_core::actions::ActionRequest;
use skirmish_core::snapshot::WorldSnapshot;

use crate::engine::{AgentEngine, CycleOutcome};

/// Read-only world access, polled once per cycle.
pub trait WorldProvider {
    fn poll(&mut self) -> WorldSnapshot;
}

/// Fire-and-forget action dispatch. Effects are only ever observed through
/// the next snapshot.
pub trait ActionExecutor {
    fn dispatch(&mut self, request: &ActionRequest);
}

/// Drive the engine until it reports not-running, sleeping each cycle's
/// advisory hint.
pub fn run(
    engine: &mut AgentEngine,
    provider: &mut impl WorldProvider,
    executor: &mut impl ActionExecutor,
) {
    loop {
        let outcome = step(engine, provider, executor);
        if !outcome.status.running {
            debug!("engine stopped, leaving run loop");
            break;
        }
        thread::sleep(Duration::from_millis(outcome.sleep_hint_ms));
    }
}

/// One poll-decide-dispatch step, without the sleep.
pub fn step(
    engine: &mut AgentEngine,
    provider: &mut impl WorldProvider,
    executor: &mut impl ActionExecutor,
) -> CycleOutcome {
    let snapshot = provider.poll();
    let outcome = engine.cycle(&snapshot);
    for request in &outcome.actions {
        executor.dispatch(request);
    }
    outcome
}

/// Run a fixed number of steps without sleeping. Intended for hosts that
/// supply their own pacing, and for deterministic tests.
pub fn run_cycles(
    engine: &mut AgentEngine,
    provider: &mut impl WorldProvider,
    executor: &mut impl ActionExecutor,
    cycles: usize,
) -> Vec<CycleOutcome> {
    (0..cycles).map(|_| step(engine, provider, executor)).collect()
}
