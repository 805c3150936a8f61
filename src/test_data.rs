//! # Test Data Schema
//!
//! Declarative test specifications for a circuit: an ordered list of groups,
//! each a batch of cases sharing one input/output schema. Test data is
//! stored as JSON; field names follow the on-disk schema (`bitWidth`, `n`,
//! `type: "comb" | "seq"`).
//!
//! Every test value crosses the interface boundary as a fixed-width string
//! of `'0'`/`'1'` characters, preserving leading zeros; an undefined value
//! is the literal `"X"`.

use serde::{Deserialize, Serialize};

/// Whether the circuit under test is combinational or sequential (clocked).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestType {
    #[serde(rename = "comb")]
    Comb,
    #[serde(rename = "seq")]
    Seq,
}

/// One named signal: its expected or driven values, one bitstring per case.
/// `results` is filled in by the executor for output signals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSignal {
    pub label: String,
    #[serde(rename = "bitWidth")]
    pub bit_width: u32,
    pub values: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<String>>,
}

/// A batch of `n` cases sharing one schema, bounded by a sequential reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestGroup {
    #[serde(default)]
    pub label: String,
    pub n: usize,
    pub inputs: Vec<TestSignal>,
    pub outputs: Vec<TestSignal>,
}

impl TestGroup {
    pub fn case_count(&self) -> usize {
        self.n
    }
}

/// A full test specification, loaded once per session. Immutable except for
/// the per-output `results` the executor appends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestData {
    #[serde(rename = "type")]
    pub test_type: TestType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub groups: Vec<TestGroup>,
}

impl TestData {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Case count of one group; zero when the index is out of range.
    pub fn case_count(&self, group: usize) -> usize {
        self.groups.get(group).map_or(0, |g| g.n)
    }
}

/// Formats a terminal value as a zero-padded binary string of `bit_width`
/// characters. The undefined state renders as the sentinel `"X"`.
pub fn format_value(value: Option<u64>, bit_width: u32) -> String {
    match value {
        None => "X".to_string(),
        Some(v) => format!("{:0width$b}", v, width = bit_width as usize),
    }
}

/// Parses a bitstring as an unsigned binary value. Anything that is not
/// pure `'0'`/`'1'` (notably the `"X"` sentinel) yields `None`.
pub fn parse_bitstring(bits: &str) -> Option<u64> {
    if bits.is_empty() || !bits.bytes().all(|b| b == b'0' || b == b'1') {
        return None;
    }
    u64::from_str_radix(bits, 2).ok()
}
