//! Serial scheduler for periodic simulation tasks
//!
//! The physics tick, obstacle spawner and hold sampler run on independent
//! cadences but must never interleave. [`SerialScheduler`] owns a virtual clock
//! and a single queue; it fires one task at a time into a handler that holds
//! the only `&mut` to the session.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};
use std::time::Duration;

/// Identifies a registered repeating task
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskHandle(u64);

/// Registration surface handed to whoever needs to start or stop timers
pub trait Scheduler<T> {
    /// Fire `task` every `interval`, first after one interval has elapsed
    fn schedule_repeating(&mut self, interval: Duration, task: T) -> TaskHandle;

    /// Stop a task. Takes effect immediately, even for firings already due.
    fn cancel(&mut self, handle: TaskHandle);

    /// Current virtual time
    fn now(&self) -> Duration;
}

#[derive(Debug)]
struct Entry<T> {
    interval: Duration,
    task: T,
}

/// Virtual-time, single-queue executor
#[derive(Debug)]
pub struct SerialScheduler<T> {
    now: Duration,
    /// Live registrations; cancelled handles are removed here and their queued
    /// firings dropped when popped
    entries: BTreeMap<TaskHandle, Entry<T>>,
    /// (due, sequence, handle); sequence breaks ties in registration order
    queue: BinaryHeap<Reverse<(Duration, u64, TaskHandle)>>,
    next_handle: u64,
    next_seq: u64,
}

impl<T> Default for SerialScheduler<T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            entries: BTreeMap::new(),
            queue: BinaryHeap::new(),
            next_handle: 1,
            next_seq: 0,
        }
    }
}

/// Smallest interval accepted; a zero interval would never let time advance
const MIN_INTERVAL: Duration = Duration::from_millis(1);

impl<T: Clone> SerialScheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live registrations
    pub fn active_tasks(&self) -> usize {
        self.entries.len()
    }

    pub fn is_scheduled(&self, handle: TaskHandle) -> bool {
        self.entries.contains_key(&handle)
    }

    fn enqueue(&mut self, due: Duration, handle: TaskHandle) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse((due, seq, handle)));
    }

    /// Pop the next live firing due at or before `deadline`
    fn pop_due(&mut self, deadline: Duration) -> Option<(Duration, TaskHandle, T)> {
        while let Some(Reverse((due, _, handle))) = self.queue.peek().copied() {
            if due > deadline {
                return None;
            }
            self.queue.pop();
            let Some(entry) = self.entries.get(&handle) else {
                // Cancelled
                continue;
            };
            let interval = entry.interval;
            let task = entry.task.clone();
            // Reschedule before dispatch so the handler can cancel it
            self.enqueue(due + interval, handle);
            return Some((due, handle, task));
        }
        None
    }

    /// Fire every task due up to `deadline`, in time order, then set the clock
    /// to `deadline`. Returns the number of firings dispatched.
    pub fn run_until<F>(&mut self, deadline: Duration, mut handler: F) -> usize
    where
        F: FnMut(T, &mut Self),
    {
        let mut fired = 0;
        while let Some((due, _handle, task)) = self.pop_due(deadline) {
            self.now = due;
            handler(task, self);
            fired += 1;
        }
        if deadline > self.now {
            self.now = deadline;
        }
        fired
    }

    /// Advance the clock by `delta`, firing everything that falls due
    pub fn advance<F>(&mut self, delta: Duration, handler: F) -> usize
    where
        F: FnMut(T, &mut Self),
    {
        let deadline = self.now + delta;
        self.run_until(deadline, handler)
    }
}

impl<T: Clone> Scheduler<T> for SerialScheduler<T> {
    fn schedule_repeating(&mut self, interval: Duration, task: T) -> TaskHandle {
        let interval = interval.max(MIN_INTERVAL);
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.insert(handle, Entry { interval, task });
        self.enqueue(self.now + interval, handle);
        handle
    }

    fn cancel(&mut self, handle: TaskHandle) {
        self.entries.remove(&handle);
    }

    fn now(&self) -> Duration {
        self.now
    }
}
