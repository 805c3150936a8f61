//! Circuit/test-data compatibility checks, run before interactive or
//! automated testing. Findings are data, not errors: callers decide what
//! still runs.

use crate::scope::{CircuitScope, TerminalKind};
use crate::test_data::{TestData, TestType};
use std::collections::HashSet;

/// Category of a single validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidKind {
    /// Test signal has no same-label terminal in the circuit.
    NotPresent,
    /// Terminal exists but its bit width differs from the test's.
    WrongBitWidth,
    /// Duplicate labels within the test data's schema.
    DuplicateInTestData,
    /// Duplicate non-empty labels among the scope's inputs and outputs.
    DuplicateInScope,
    /// Sequential test but the circuit has no 1-bit `RST` input.
    MissingReset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitWidthMismatch {
    pub expected: u32,
    pub actual: u32,
}

/// One validation finding, carrying the offending identifier and a
/// human-readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invalid {
    pub kind: InvalidKind,
    pub identifier: String,
    pub message: String,
    pub extra: Option<BitWidthMismatch>,
}

impl Invalid {
    fn new(kind: InvalidKind, identifier: &str, message: String) -> Self {
        Invalid {
            kind,
            identifier: identifier.to_string(),
            message,
            extra: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationOutcome {
    pub ok: bool,
    pub invalids: Vec<Invalid>,
}

impl ValidationOutcome {
    fn from_invalids(invalids: Vec<Invalid>) -> Self {
        ValidationOutcome {
            ok: invalids.is_empty(),
            invalids,
        }
    }
}

/// Label of the reset input a sequential circuit must expose.
pub const RESET_LABEL: &str = "RST";

fn distinct_identifiers_in_data(data: &TestData) -> bool {
    let group = match data.groups.first() {
        Some(group) => group,
        None => return true,
    };
    let labels: Vec<&str> = group
        .inputs
        .iter()
        .chain(group.outputs.iter())
        .map(|signal| signal.label.as_str())
        .collect();
    labels.iter().collect::<HashSet<_>>().len() == labels.len()
}

fn distinct_identifiers_in_scope(scope: &CircuitScope) -> bool {
    // Unlabeled terminals have not been named yet and do not collide.
    let labels: Vec<&str> = scope
        .terminals_of(TerminalKind::Input)
        .chain(scope.terminals_of(TerminalKind::Output))
        .map(|terminal| terminal.label.as_str())
        .filter(|label| !label.is_empty())
        .collect();
    labels.iter().collect::<HashSet<_>>().len() == labels.len()
}

/// Checks presence and bit width of each group-0 signal of `kind` against
/// the scope, accumulating every finding.
fn validate_signals(
    data: &TestData,
    scope: &CircuitScope,
    kind: TerminalKind,
    invalids: &mut Vec<Invalid>,
) {
    let group = match data.groups.first() {
        Some(group) => group,
        None => return,
    };
    let (signals, noun) = match kind {
        TerminalKind::Input => (&group.inputs, "Input"),
        _ => (&group.outputs, "Output"),
    };

    for signal in signals {
        let matched = scope
            .find(kind, &signal.label)
            .map(|id| scope.terminal(id));

        match matched {
            None => invalids.push(Invalid::new(
                InvalidKind::NotPresent,
                &signal.label,
                format!("{} is not present in the circuit", noun),
            )),
            Some(terminal) if terminal.bit_width != signal.bit_width => {
                invalids.push(Invalid {
                    kind: InvalidKind::WrongBitWidth,
                    identifier: signal.label.clone(),
                    message: format!(
                        "{} bitwidths don't match in circuit and test ({} vs {})",
                        noun, terminal.bit_width, signal.bit_width
                    ),
                    extra: Some(BitWidthMismatch {
                        expected: signal.bit_width,
                        actual: terminal.bit_width,
                    }),
                });
            }
            Some(_) => {}
        }
    }
}

/// Validates that every group-0 test signal has a matching circuit terminal
/// with the right bit width, and that a sequential test's circuit carries a
/// 1-bit `RST` input.
///
/// Duplicate-label checks run first and short-circuit the rest; the
/// remaining stages accumulate all findings before returning.
pub fn validate(data: &TestData, scope: &CircuitScope) -> ValidationOutcome {
    let mut invalids = Vec::new();

    if !distinct_identifiers_in_data(data) {
        invalids.push(Invalid::new(
            InvalidKind::DuplicateInTestData,
            "-",
            "Duplicate identifiers in test data".to_string(),
        ));
    }
    if !distinct_identifiers_in_scope(scope) {
        invalids.push(Invalid::new(
            InvalidKind::DuplicateInScope,
            "-",
            "Duplicate identifiers in circuit".to_string(),
        ));
    }
    // Presence checks are meaningless against ambiguous labels.
    if !invalids.is_empty() {
        return ValidationOutcome::from_invalids(invalids);
    }

    validate_signals(data, scope, TerminalKind::Input, &mut invalids);
    validate_signals(data, scope, TerminalKind::Output, &mut invalids);

    if data.test_type == TestType::Seq {
        let reset_present = scope
            .find(TerminalKind::Input, RESET_LABEL)
            .map(|id| scope.terminal(id).bit_width == 1)
            .unwrap_or(false);
        if !reset_present {
            invalids.push(Invalid::new(
                InvalidKind::MissingReset,
                RESET_LABEL,
                "Reset(RST) not present in circuit".to_string(),
            ));
        }
    }

    ValidationOutcome::from_invalids(invalids)
}
