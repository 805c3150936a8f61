//! # Test-Case Navigator
//!
//! Interactive position within hierarchical test data. Every move builds a
//! candidate position, checks it, and only then commits, so a failed move
//! leaves the current position untouched (atomic move-or-no-op). Groups
//! with zero cases are transparently skipped while stepping.

use crate::test_data::TestData;
use std::sync::Arc;

/// A cursor over `(group, case)` coordinates of shared, read-only test
/// data. Instances are cheap value snapshots.
#[derive(Debug, Clone)]
pub struct TestbenchPosition {
    data: Arc<TestData>,
    current_group: usize,
    current_case: usize,
}

impl TestbenchPosition {
    pub fn new(data: Arc<TestData>) -> Self {
        TestbenchPosition {
            data,
            current_group: 0,
            current_case: 0,
        }
    }

    pub fn data(&self) -> &Arc<TestData> {
        &self.data
    }

    pub fn current_group(&self) -> usize {
        self.current_group
    }

    pub fn current_case(&self) -> usize {
        self.current_case
    }

    /// True when the group index is in range and the case index is within
    /// that group's case count.
    pub fn is_valid(&self) -> bool {
        if self.current_group >= self.data.group_count() {
            return false;
        }
        self.current_case < self.data.case_count(self.current_group)
    }

    fn commit(&mut self, candidate: TestbenchPosition) -> bool {
        if !candidate.is_valid() {
            return false;
        }
        self.current_group = candidate.current_group;
        self.current_case = candidate.current_case;
        true
    }

    fn candidate(&self, group: usize, case: usize) -> TestbenchPosition {
        TestbenchPosition {
            data: Arc::clone(&self.data),
            current_group: group,
            current_case: case,
        }
    }

    /// Jumps to an exact position; fails (unchanged) when it is invalid.
    pub fn seek(&mut self, group: usize, case: usize) -> bool {
        let candidate = self.candidate(group, case);
        self.commit(candidate)
    }

    /// Moves to case 0 of the next group with at least one case. Fails
    /// when no such group exists after the current one.
    pub fn next_group(&mut self) -> bool {
        let mut group = self.current_group;
        loop {
            group += 1;
            if group >= self.data.group_count() {
                return false;
            }
            if self.data.case_count(group) > 0 {
                let candidate = self.candidate(group, 0);
                return self.commit(candidate);
            }
        }
    }

    /// Moves to case 0 of the previous non-empty group. Fails when none
    /// exists before the current one.
    pub fn prev_group(&mut self) -> bool {
        let mut group = self.current_group;
        loop {
            if group == 0 {
                return false;
            }
            group -= 1;
            if self.data.case_count(group) > 0 {
                let candidate = self.candidate(group, 0);
                return self.commit(candidate);
            }
        }
    }

    /// Advances one case, wrapping into case 0 of the next non-empty group
    /// at the end of the current one.
    pub fn next_case(&mut self) -> bool {
        let case_count = self.data.case_count(self.current_group);
        if self.current_case + 1 >= case_count {
            return self.next_group();
        }
        let candidate = self.candidate(self.current_group, self.current_case + 1);
        self.commit(candidate)
    }

    /// Steps one case back, wrapping onto the last case of the previous
    /// non-empty group at case 0.
    pub fn prev_case(&mut self) -> bool {
        if self.current_case == 0 {
            if !self.prev_group() {
                return false;
            }
            let last = self.data.case_count(self.current_group) - 1;
            let candidate = self.candidate(self.current_group, last);
            return self.commit(candidate);
        }
        let candidate = self.candidate(self.current_group, self.current_case - 1);
        self.commit(candidate)
    }

    /// Positions on the first case of the first non-empty group. Succeeds
    /// immediately when group 0 has cases; fails (unchanged) when every
    /// group is empty.
    pub fn first_valid_position(&mut self) -> bool {
        if self.data.case_count(0) > 0 {
            let candidate = self.candidate(0, 0);
            return self.commit(candidate);
        }
        let mut probe = self.candidate(0, 0);
        if !probe.next_group() {
            return false;
        }
        let candidate = self.candidate(probe.current_group, probe.current_case);
        self.commit(candidate)
    }
}
