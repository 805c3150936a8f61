//! Circuit scope: the wired set of labeled, bit-width-typed terminals a
//! testbench talks to. Construction of the underlying netlist is someone
//! else's job; this is only the interface surface the validator, binder,
//! and executor see.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a terminal within the scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminalKind {
    Input,
    Output,
    Flag,
}

/// Stable index handle to a terminal inside one [`CircuitScope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TerminalId(pub(crate) usize);

/// One labeled circuit endpoint. `state` is the current numeric value;
/// `None` is the undefined state, rendered as `"X"` at the test boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Terminal {
    pub label: String,
    #[serde(rename = "bitWidth")]
    pub bit_width: u32,
    pub kind: TerminalKind,
    #[serde(default)]
    pub state: Option<u64>,
}

impl Terminal {
    pub fn new(label: &str, bit_width: u32, kind: TerminalKind) -> Self {
        Terminal {
            label: label.to_string(),
            bit_width,
            kind,
            state: None,
        }
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.state {
            Some(v) => v.to_string(),
            None => "X".to_string(),
        };
        write!(f, "{} ({:?}, {} bit): {}", self.label, self.kind, self.bit_width, state)
    }
}

/// Aggregate of the circuit's terminals, exposed by label and by handle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CircuitScope {
    terminals: Vec<Terminal>,
}

impl CircuitScope {
    pub fn new() -> Self {
        CircuitScope::default()
    }

    pub fn add_terminal(&mut self, terminal: Terminal) -> TerminalId {
        let id = TerminalId(self.terminals.len());
        self.terminals.push(terminal);
        id
    }

    pub fn add_input(&mut self, label: &str, bit_width: u32) -> TerminalId {
        self.add_terminal(Terminal::new(label, bit_width, TerminalKind::Input))
    }

    pub fn add_output(&mut self, label: &str, bit_width: u32) -> TerminalId {
        self.add_terminal(Terminal::new(label, bit_width, TerminalKind::Output))
    }

    pub fn add_flag(&mut self, label: &str, bit_width: u32) -> TerminalId {
        self.add_terminal(Terminal::new(label, bit_width, TerminalKind::Flag))
    }

    pub fn terminal(&self, id: TerminalId) -> &Terminal {
        &self.terminals[id.0]
    }

    pub fn terminal_mut(&mut self, id: TerminalId) -> &mut Terminal {
        &mut self.terminals[id.0]
    }

    /// All terminals of one kind, in declaration order.
    pub fn terminals_of(&self, kind: TerminalKind) -> impl Iterator<Item = &Terminal> {
        self.terminals.iter().filter(move |t| t.kind == kind)
    }

    /// First terminal of `kind` whose label matches exactly.
    pub fn find(&self, kind: TerminalKind, label: &str) -> Option<TerminalId> {
        self.terminals
            .iter()
            .position(|t| t.kind == kind && t.label == label)
            .map(TerminalId)
    }

    pub fn read(&self, id: TerminalId) -> Option<u64> {
        self.terminals[id.0].state
    }

    pub fn write(&mut self, id: TerminalId, value: Option<u64>) {
        self.terminals[id.0].state = value;
    }

    pub fn len(&self) -> usize {
        self.terminals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terminals.is_empty()
    }
}
