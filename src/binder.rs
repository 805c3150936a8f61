//! Resolves test-data labels to live circuit terminals ahead of a run, so
//! the executor works with stable handles instead of repeated lookups.

use crate::scope::{CircuitScope, TerminalId, TerminalKind};
use crate::test_data::{TestData, TestType};
use crate::validator::RESET_LABEL;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BindError {
    #[error("no circuit terminal matches test signal '{0}'")]
    Unbound(String),
}

/// Label-to-terminal resolution for one (test data, scope) pair. `reset` is
/// populated only for sequential tests.
#[derive(Debug, Clone)]
pub struct IoBinding {
    pub inputs: HashMap<String, TerminalId>,
    pub outputs: HashMap<String, TerminalId>,
    pub reset: Option<TerminalId>,
}

/// Binds group 0's schema against the scope. All groups are assumed to
/// share that schema; `validate` is the gate that should run first, and a
/// label that still fails to resolve is reported instead of deferred to an
/// out-of-range access later.
pub fn bind(data: &TestData, scope: &CircuitScope) -> Result<IoBinding, BindError> {
    let mut inputs = HashMap::new();
    let mut outputs = HashMap::new();

    if let Some(group) = data.groups.first() {
        for signal in &group.inputs {
            let id = scope
                .find(TerminalKind::Input, &signal.label)
                .ok_or_else(|| BindError::Unbound(signal.label.clone()))?;
            inputs.insert(signal.label.clone(), id);
        }
        for signal in &group.outputs {
            let id = scope
                .find(TerminalKind::Output, &signal.label)
                .ok_or_else(|| BindError::Unbound(signal.label.clone()))?;
            outputs.insert(signal.label.clone(), id);
        }
    }

    let reset = if data.test_type == TestType::Seq {
        Some(
            scope
                .find(TerminalKind::Input, RESET_LABEL)
                .ok_or_else(|| BindError::Unbound(RESET_LABEL.to_string()))?,
        )
    } else {
        None
    };

    Ok(IoBinding { inputs, outputs, reset })
}
