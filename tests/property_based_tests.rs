//! Property-based tests for scheduler and navigator invariants
//!
//! These verify the heap property against a reference model under
//! arbitrary operation interleavings, upsert uniqueness, reset semantics,
//! and navigation exhaustion counts.

use proptest::prelude::*;
use rusty_bench::navigator::TestbenchPosition;
use rusty_bench::scheduler::{EventQueue, SchedulerError};
use rusty_bench::test_data::{format_value, parse_bitstring, TestData, TestGroup, TestSignal, TestType};
use std::collections::HashMap;
use std::sync::Arc;

const EVENT_COUNT: usize = 8;

#[derive(Debug, Clone)]
enum Op {
    Schedule { id: usize, delay: u64 },
    Cancel { id: usize },
    Pop,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..EVENT_COUNT, 0u64..100).prop_map(|(id, delay)| Op::Schedule { id, delay }),
        1 => (0..EVENT_COUNT).prop_map(|id| Op::Cancel { id }),
        2 => Just(Op::Pop),
    ]
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    proptest::collection::vec(arb_op(), 1..64)
}

proptest! {
    /// After any interleaving of schedule/cancel, pop returns the
    /// currently-minimum-time event, matching a naive reference model.
    #[test]
    fn test_pop_always_returns_minimum(ops in arb_ops()) {
        let mut queue = EventQueue::new(EVENT_COUNT);
        let ids: Vec<_> = (0..EVENT_COUNT).map(|_| queue.register(1)).collect();
        let mut model: HashMap<usize, u64> = HashMap::new();
        let mut now = 0u64;

        for op in ops {
            match op {
                Op::Schedule { id, delay } => {
                    // Upsert keeps live count at most EVENT_COUNT, so
                    // capacity can never overflow here.
                    queue.schedule(ids[id], Some(delay)).unwrap();
                    model.insert(id, now + delay);
                }
                Op::Cancel { id } => {
                    queue.cancel(ids[id]);
                    model.remove(&id);
                }
                Op::Pop => {
                    if model.is_empty() {
                        prop_assert_eq!(queue.pop(), Err(SchedulerError::EmptyQueue));
                    } else {
                        let min_time = *model.values().min().unwrap();
                        let popped = queue.pop().unwrap();
                        let slot = ids.iter().position(|&i| i == popped).unwrap();
                        // Ties may resolve to any event at the minimum time.
                        prop_assert_eq!(model.get(&slot).copied(), Some(min_time));
                        prop_assert_eq!(queue.current_time(), min_time);
                        model.remove(&slot);
                        now = min_time;
                    }
                }
            }
            prop_assert_eq!(queue.len(), model.len());
        }
    }

    /// Re-scheduling an enqueued event leaves exactly one occurrence, at
    /// the newly computed time.
    #[test]
    fn test_reschedule_keeps_single_occurrence(delays in proptest::collection::vec(0u64..50, 1..10)) {
        let mut queue = EventQueue::new(4);
        let subject = queue.register(1);
        let other = queue.register(1);
        queue.schedule(other, Some(1000)).unwrap();

        for &delay in &delays {
            queue.schedule(subject, Some(delay)).unwrap();
        }

        prop_assert_eq!(queue.len(), 2);
        prop_assert_eq!(queue.scheduled_time(subject), Some(*delays.last().unwrap()));

        let mut occurrences = 0;
        while let Ok(id) = queue.pop() {
            if id == subject {
                occurrences += 1;
            }
        }
        prop_assert_eq!(occurrences, 1);
    }

    /// reset() immediately implies isEmpty(), and the queue is reusable.
    #[test]
    fn test_reset_implies_empty(ops in arb_ops()) {
        let mut queue = EventQueue::new(EVENT_COUNT);
        let ids: Vec<_> = (0..EVENT_COUNT).map(|_| queue.register(1)).collect();

        for op in ops {
            match op {
                Op::Schedule { id, delay } => { queue.schedule(ids[id], Some(delay)).unwrap(); }
                Op::Cancel { id } => queue.cancel(ids[id]),
                Op::Pop => { let _ = queue.pop(); }
            }
        }

        queue.reset();
        prop_assert!(queue.is_empty());
        prop_assert_eq!(queue.current_time(), 0);
        prop_assert_eq!(queue.pop(), Err(SchedulerError::EmptyQueue));
        for &id in &ids {
            prop_assert!(!queue.is_scheduled(id));
        }

        queue.schedule(ids[0], Some(3)).unwrap();
        prop_assert_eq!(queue.pop(), Ok(ids[0]));
    }

    /// Stepping with next_case() from the first valid position visits each
    /// case of every non-empty group exactly once, then fails.
    #[test]
    fn test_next_case_exhausts_in_case_count_steps(case_counts in proptest::collection::vec(0usize..5, 1..6)) {
        let data = position_data(&case_counts);
        let total: usize = case_counts.iter().sum();
        let mut position = TestbenchPosition::new(Arc::new(data));

        if total == 0 {
            prop_assert!(!position.first_valid_position());
            prop_assert!(!position.is_valid());
            return Ok(());
        }

        prop_assert!(position.first_valid_position());
        prop_assert!(position.is_valid());

        let mut visited = vec![(position.current_group(), position.current_case())];
        for _ in 1..total {
            prop_assert!(position.next_case());
            visited.push((position.current_group(), position.current_case()));
        }
        // The call after the last case is the failing one.
        prop_assert!(!position.next_case());

        let mut unique = visited.clone();
        unique.sort_unstable();
        unique.dedup();
        prop_assert_eq!(unique.len(), total);
    }

    /// Formatting preserves width and round-trips through parsing for
    /// values that fit the declared width.
    #[test]
    fn test_format_parse_round_trip(value in 0u64..256, width in 1u32..12) {
        let formatted = format_value(Some(value), width);
        if value < (1 << width) {
            prop_assert_eq!(formatted.len(), width as usize);
            prop_assert_eq!(parse_bitstring(&formatted), Some(value));
        } else {
            // Wider values keep all significant bits.
            prop_assert_eq!(parse_bitstring(&formatted), Some(value));
        }
    }
}

fn position_data(case_counts: &[usize]) -> TestData {
    TestData {
        test_type: TestType::Comb,
        title: None,
        groups: case_counts
            .iter()
            .map(|&n| TestGroup {
                label: String::new(),
                n,
                inputs: vec![TestSignal {
                    label: "A".to_string(),
                    bit_width: 1,
                    values: vec!["0".to_string(); n],
                    results: None,
                }],
                outputs: vec![TestSignal {
                    label: "OUT".to_string(),
                    bit_width: 1,
                    values: vec!["0".to_string(); n],
                    results: None,
                }],
            })
            .collect(),
    }
}
