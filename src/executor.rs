//! # Testbench Executor
//!
//! Automated replay of a full test specification against a live circuit:
//! binds test labels to terminals, drives every case through the
//! propagation engine, clocks sequential circuits one period per case with
//! a reset pulse between groups, and records per-output results plus a
//! pass/fail summary.
//!
//! The free-running clock is suspended for the whole run and restored on
//! every exit path, including propagation failure.

use crate::binder::{bind, BindError, IoBinding};
use crate::engine::{ClockController, Messenger, PropagationError, Propagator};
use crate::navigator::TestbenchPosition;
use crate::scope::CircuitScope;
use crate::test_data::{format_value, parse_bitstring, TestData, TestGroup, TestType};
use crate::validator::validate;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RunError {
    #[error(transparent)]
    Bind(#[from] BindError),
    #[error(transparent)]
    Propagation(#[from] PropagationError),
    /// A group referenced a signal that group 0's schema does not bind.
    #[error("signal '{0}' is not part of the bound schema")]
    UnboundSignal(String),
}

/// Pass/fail tally of one automated run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub passed: usize,
    pub total: usize,
}

/// Re-enables the auto clock when dropped, so suspension cannot leak past
/// the run on any exit path.
struct AutoClockGuard<'a> {
    clock: &'a mut dyn ClockController,
}

impl<'a> AutoClockGuard<'a> {
    fn suspend(clock: &'a mut dyn ClockController) -> Self {
        clock.set_auto_clock_enabled(false);
        AutoClockGuard { clock }
    }
}

impl Drop for AutoClockGuard<'_> {
    fn drop(&mut self) {
        self.clock.set_auto_clock_enabled(true);
    }
}

/// Writes one case's input bitstrings into the bound terminals and settles
/// the circuit.
fn set_input_values(
    binding: &IoBinding,
    group: &TestGroup,
    case_index: usize,
    scope: &mut CircuitScope,
    propagator: &mut dyn Propagator,
) -> Result<(), RunError> {
    for input in &group.inputs {
        let id = binding
            .inputs
            .get(&input.label)
            .ok_or_else(|| RunError::UnboundSignal(input.label.clone()))?;
        scope.write(*id, parse_bitstring(&input.values[case_index]));
    }
    propagator.propagate(scope)?;
    Ok(())
}

/// One full clock cycle: two edges, each followed by a settling pass.
fn tick_clock(
    scope: &mut CircuitScope,
    propagator: &mut dyn Propagator,
    clock: &mut dyn ClockController,
) -> Result<(), RunError> {
    clock.tick_once(scope);
    propagator.propagate(scope)?;
    clock.tick_once(scope);
    propagator.propagate(scope)?;
    Ok(())
}

/// Asserts reset for one propagation pulse, then de-asserts for another,
/// re-initializing sequential state at a group boundary.
fn trigger_reset(
    binding: &IoBinding,
    scope: &mut CircuitScope,
    propagator: &mut dyn Propagator,
) -> Result<(), RunError> {
    let reset = binding
        .reset
        .ok_or_else(|| RunError::UnboundSignal(crate::validator::RESET_LABEL.to_string()))?;
    scope.write(reset, Some(1));
    propagator.propagate(scope)?;
    scope.write(reset, Some(0));
    propagator.propagate(scope)?;
    Ok(())
}

/// Runs every group and case of `data` against the circuit, appending each
/// output's formatted result strings into the test data and returning the
/// pass/total summary.
///
/// Deterministic single pass; validation is the caller's responsibility
/// and is not re-checked here. Groups are assumed to share group 0's
/// schema. Sequential tests get one clock period per case and a reset
/// pulse after each non-empty group.
pub fn run_all(
    data: &mut TestData,
    scope: &mut CircuitScope,
    propagator: &mut dyn Propagator,
    clock: &mut dyn ClockController,
) -> Result<RunSummary, RunError> {
    // The testbench takes over clock toggling for the whole run.
    let mut guard = AutoClockGuard::suspend(clock);

    let binding = bind(data, scope)?;
    let test_type = data.test_type;
    let mut passed = 0;
    let mut total = 0;

    for (group_index, group) in data.groups.iter_mut().enumerate() {
        for output in group.outputs.iter_mut() {
            output.results = Some(Vec::new());
        }

        for case_index in 0..group.n {
            total += 1;
            set_input_values(&binding, group, case_index, scope, propagator)?;
            if test_type == TestType::Seq {
                tick_clock(scope, propagator, &mut *guard.clock)?;
            }

            let mut case_passed = true;
            for output in group.outputs.iter_mut() {
                let id = binding
                    .outputs
                    .get(&output.label)
                    .ok_or_else(|| RunError::UnboundSignal(output.label.clone()))?;
                let bit_width = scope.terminal(*id).bit_width;
                let result = format_value(scope.read(*id), bit_width);
                if output.values[case_index] != result {
                    case_passed = false;
                }
                output.results.get_or_insert_with(Vec::new).push(result);
            }

            if case_passed {
                passed += 1;
            }
            tracing::debug!(group = group_index, case = case_index, case_passed, "case done");
        }

        // Empty groups perform no propagation at all, reset included.
        if test_type == TestType::Seq && group.n > 0 {
            trigger_reset(&binding, scope, propagator)?;
        }
    }

    tracing::debug!(passed, total, "test run complete");
    Ok(RunSummary { passed, total })
}

/// Interactive entry point: validates the pair, emits a single generic
/// advisory when findings exist (full detail stays available through
/// [`validate`]), and returns a navigator on the first valid case, or
/// `None` when the test has no cases at all.
pub fn begin_interactive(
    data: Arc<TestData>,
    scope: &CircuitScope,
    messenger: &dyn Messenger,
) -> Option<TestbenchPosition> {
    let outcome = validate(&data, scope);
    if !outcome.ok {
        messenger.notify(
            "Testbench: Some elements missing from circuit. Run validation to know more",
        );
    }

    let mut position = TestbenchPosition::new(data);
    if !position.first_valid_position() {
        messenger.notify("Testbench: The test is empty");
        return None;
    }
    Some(position)
}
