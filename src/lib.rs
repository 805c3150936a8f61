//! # Rusty Bench Library
//!
//! A digital logic testbench engine written in Rust.
//!
//! This library provides:
//! - A fixed-capacity discrete-event scheduler ordering circuit state
//!   changes by propagation delay, with O(log n) arbitrary removal
//! - JSON test specifications validated against a circuit's labeled
//!   Input/Output terminals
//! - Interactive case-by-case navigation over hierarchical test data
//! - Fully automated, deterministic replay of all test groups with
//!   sequential clock/reset semantics and pass/fail recording

pub mod binder;
pub mod engine;
pub mod executor;
pub mod navigator;
pub mod scheduler;
pub mod scope;
pub mod test_data;
pub mod validator;

// Re-export commonly used items for easier importing
pub use binder::{bind, IoBinding};
pub use engine::{ClockController, Messenger, NullMessenger, Propagator};
pub use executor::{begin_interactive, run_all, RunSummary};
pub use navigator::TestbenchPosition;
pub use scheduler::{EventId, EventQueue, SchedulerError, SimTime};
pub use scope::{CircuitScope, Terminal, TerminalId, TerminalKind};
pub use test_data::{format_value, parse_bitstring, TestData, TestGroup, TestSignal, TestType};
pub use validator::{validate, Invalid, InvalidKind, ValidationOutcome};
