//! Seams for the external simulation collaborators the testbench drives:
//! the propagation engine that settles the circuit, the clock controller
//! that owns free-running ticking, and the user-facing messenger.

use crate::scheduler::SchedulerError;
use crate::scope::CircuitScope;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PropagationError {
    #[error("event queue fault during propagation: {0}")]
    Scheduler(#[from] SchedulerError),
    #[error("propagation failed: {0}")]
    Failed(String),
}

/// Drives the circuit to quiescence under its current inputs, draining the
/// scheduler and mutating terminal values as a side effect. Synchronous and
/// run-to-completion.
pub trait Propagator {
    fn propagate(&mut self, scope: &mut CircuitScope) -> Result<(), PropagationError>;
}

/// Owns clock signals. The free-running clock and an automated test run
/// must never drive the circuit at the same time, so the executor suspends
/// auto ticking for the whole run and toggles edges itself.
pub trait ClockController {
    /// Toggles every clock element's state once (one edge).
    fn tick_once(&mut self, scope: &mut CircuitScope);

    /// Suspends or resumes free-running ticking.
    fn set_auto_clock_enabled(&mut self, enabled: bool);
}

/// Fire-and-forget user notification. De-duplication and display are the
/// collaborator's concern.
pub trait Messenger {
    fn notify(&self, text: &str);
}

/// Messenger that drops everything, for headless use.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullMessenger;

impl Messenger for NullMessenger {
    fn notify(&self, _text: &str) {}
}
