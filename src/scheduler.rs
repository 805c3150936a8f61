//! # Discrete-Event Scheduler
//!
//! A fixed-capacity binary min-heap that orders pending circuit state
//! changes by absolute simulation time.
//!
//! Circuit elements register once and get back an [`EventId`]; all heap
//! bookkeeping (enqueued flag, scheduled time, slot index) stays inside the
//! queue, keyed by that handle. Re-scheduling an already-enqueued event
//! moves it instead of duplicating it, and arbitrary removal is O(log n)
//! via the stored slot index.

use thiserror::Error;

/// Simulation time in propagation-delay ticks.
pub type SimTime = u64;

/// Opaque handle to a registered event. Issued by [`EventQueue::register`]
/// and only meaningful to the queue that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventId(usize);

/// Fatal scheduler failures. Both indicate a violated caller invariant and
/// abort the current operation rather than being absorbed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("event queue capacity of {0} exceeded")]
    CapacityExceeded(usize),
    #[error("pop() called on an empty event queue")]
    EmptyQueue,
}

#[derive(Debug, Clone)]
struct EventRecord {
    propagation_delay: SimTime,
    /// Absolute time this event fires at, valid while `in_queue`.
    time: SimTime,
    in_queue: bool,
    /// Heap slot currently holding this event, valid while `in_queue`.
    slot: usize,
}

/// Binary min-heap event queue keyed by absolute scheduled time.
///
/// Capacity is fixed at construction; the caller sizes it to the maximum
/// live schedule depth of the circuit. Ties on equal timestamps are broken
/// by heap structure, not insertion order.
pub struct EventQueue {
    records: Vec<EventRecord>,
    heap: Vec<EventId>,
    capacity: usize,
    /// Number of occupied heap slots; entries past this are stale.
    len: usize,
    time: SimTime,
}

impl EventQueue {
    pub fn new(capacity: usize) -> Self {
        EventQueue {
            records: Vec::new(),
            heap: Vec::with_capacity(capacity),
            capacity,
            len: 0,
            time: 0,
        }
    }

    /// Registers an event with its default propagation delay and returns
    /// its handle. Registration does not enqueue anything.
    pub fn register(&mut self, propagation_delay: SimTime) -> EventId {
        let id = EventId(self.records.len());
        self.records.push(EventRecord {
            propagation_delay,
            time: 0,
            in_queue: false,
            slot: 0,
        });
        id
    }

    /// Changes the default propagation delay used when `schedule` is called
    /// without an explicit delay. Does not move an already-enqueued event.
    pub fn set_delay(&mut self, id: EventId, propagation_delay: SimTime) {
        self.records[id.0].propagation_delay = propagation_delay;
    }

    /// Schedules `id` at `current_time + delay`, falling back to the
    /// event's registered propagation delay when `delay` is `None`.
    ///
    /// Upsert semantics: an already-enqueued event is first removed, so at
    /// most one occurrence of each event exists in the queue.
    pub fn schedule(&mut self, id: EventId, delay: Option<SimTime>) -> Result<(), SchedulerError> {
        if self.records[id.0].in_queue {
            self.cancel(id);
        }

        if self.len == self.capacity {
            return Err(SchedulerError::CapacityExceeded(self.capacity));
        }

        let record = &mut self.records[id.0];
        record.time = self.time + delay.unwrap_or(record.propagation_delay);
        record.slot = self.len;
        record.in_queue = true;

        if self.len == self.heap.len() {
            self.heap.push(id);
        } else {
            self.heap[self.len] = id;
        }
        self.len += 1;
        self.sift_up(self.len - 1);
        Ok(())
    }

    /// Schedules `id` to fire at the current time, ahead of any event with
    /// a later timestamp.
    pub fn schedule_now(&mut self, id: EventId) -> Result<(), SchedulerError> {
        self.schedule(id, Some(0))
    }

    /// Removes `id` from the queue. No-op when it is not enqueued.
    pub fn cancel(&mut self, id: EventId) {
        if !self.records[id.0].in_queue {
            return;
        }

        let slot = self.records[id.0].slot;
        self.swap(slot, self.len - 1);
        self.records[id.0].in_queue = false;
        self.len -= 1;

        // The event swapped into the vacated slot can be out of order in
        // either direction relative to its new parent and children.
        if slot < self.len {
            self.sift_down(slot);
            self.sift_up(slot);
        }
    }

    /// Removes and returns the minimum-time event, advancing the queue's
    /// current time to that event's scheduled time.
    pub fn pop(&mut self) -> Result<EventId, SchedulerError> {
        if self.is_empty() {
            return Err(SchedulerError::EmptyQueue);
        }

        let id = self.heap[0];
        self.time = self.records[id.0].time;
        self.cancel(id);
        Ok(id)
    }

    /// Drops every pending event and rewinds time to zero. Only the
    /// enqueued flags of occupied slots are cleared; stale heap storage is
    /// overwritten by later inserts.
    pub fn reset(&mut self) {
        tracing::debug!(dropped = self.len, "event queue reset");
        while self.len > 0 {
            let id = self.heap[self.len - 1];
            self.records[id.0].in_queue = false;
            self.len -= 1;
        }
        self.time = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn current_time(&self) -> SimTime {
        self.time
    }

    pub fn is_scheduled(&self, id: EventId) -> bool {
        self.records[id.0].in_queue
    }

    /// Absolute time `id` is scheduled to fire at, if it is enqueued.
    pub fn scheduled_time(&self, id: EventId) -> Option<SimTime> {
        let record = &self.records[id.0];
        record.in_queue.then_some(record.time)
    }

    fn time_at(&self, slot: usize) -> SimTime {
        self.records[self.heap[slot].0].time
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.records[self.heap[a].0].slot = b;
        self.records[self.heap[b].0].slot = a;
        self.heap.swap(a, b);
    }

    fn sift_up(&mut self, start: usize) {
        let mut slot = start;
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.time_at(slot) >= self.time_at(parent) {
                break;
            }
            self.swap(slot, parent);
            slot = parent;
        }
    }

    fn sift_down(&mut self, start: usize) {
        let mut slot = start;
        loop {
            let left = 2 * slot + 1;
            let right = 2 * slot + 2;
            let mut smallest = slot;

            if left < self.len && self.time_at(left) < self.time_at(smallest) {
                smallest = left;
            }
            if right < self.len && self.time_at(right) < self.time_at(smallest) {
                smallest = right;
            }
            if smallest == slot {
                break;
            }

            self.swap(slot, smallest);
            slot = smallest;
        }
    }
}
