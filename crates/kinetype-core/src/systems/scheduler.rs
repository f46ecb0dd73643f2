//! # Scheduler
//!
//! Single-threaded cooperative timer queue driven by the host frame clock.
//!
//! ## Responsibilities
//! - **One-shot tasks**: Phase transitions fire once at an absolute time.
//! - **Recurring tasks**: Motion samplers re-fire every interval until cancelled.
//! - **Cancellation**: Per task, per unit, or wholesale on regeneration.
//!
//! Tasks are stamped with the generation that scheduled them. `clear` bumps the
//! generation, so nothing queued before a regeneration can fire after it.

use crate::types::UnitId;
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap, HashSet};

/// Identifies a scheduled task for cancellation.
pub type TaskId = u64;

/// Recurring intervals are clamped to this floor.
const MIN_INTERVAL: f64 = 0.001;

/// A task whose time has come.
#[derive(Clone, Debug, PartialEq)]
pub struct Fired<E> {
    pub task: TaskId,
    pub unit: UnitId,
    pub event: E,
    /// The scheduled firing time (not the time `pop_due` was called).
    pub at: f64,
}

#[derive(Debug)]
struct Entry<E> {
    due: f64,
    seq: u64,
    task: TaskId,
    generation: u64,
    unit: UnitId,
    interval: Option<f64>,
    event: E,
}

impl<E> PartialEq for Entry<E> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<E> Eq for Entry<E> {}

impl<E> PartialOrd for Entry<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Entry<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.due
            .total_cmp(&other.due)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Timer queue keyed by unit.
#[derive(Debug)]
pub struct Scheduler<E> {
    queue: BinaryHeap<Reverse<Entry<E>>>,
    /// Queued, not cancelled tasks and their owning unit.
    live: HashMap<TaskId, UnitId>,
    by_unit: HashMap<UnitId, HashSet<TaskId>>,
    /// Cancelled tasks still sitting in the queue.
    cancelled: HashSet<TaskId>,
    next_task: TaskId,
    next_seq: u64,
    generation: u64,
}

impl<E: Clone> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone> Scheduler<E> {
    pub fn new() -> Self {
        Self {
            queue: BinaryHeap::new(),
            live: HashMap::new(),
            by_unit: HashMap::new(),
            cancelled: HashSet::new(),
            next_task: 0,
            next_seq: 0,
            generation: 0,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of live (not cancelled) tasks.
    pub fn pending(&self) -> usize {
        self.live.len()
    }

    /// Number of live tasks belonging to `unit`.
    pub fn pending_for(&self, unit: UnitId) -> usize {
        self.by_unit.get(&unit).map_or(0, HashSet::len)
    }

    /// Schedules `event` to fire once at `due`.
    pub fn schedule_once(&mut self, unit: UnitId, due: f64, event: E) -> TaskId {
        self.push(unit, due, None, event)
    }

    /// Schedules `event` to fire at `first_due` and then every `interval` seconds.
    pub fn schedule_every(&mut self, unit: UnitId, first_due: f64, interval: f64, event: E) -> TaskId {
        self.push(unit, first_due, Some(interval.max(MIN_INTERVAL)), event)
    }

    fn push(&mut self, unit: UnitId, due: f64, interval: Option<f64>, event: E) -> TaskId {
        let task = self.next_task;
        self.next_task += 1;
        self.live.insert(task, unit);
        self.by_unit.entry(unit).or_default().insert(task);
        self.enqueue(Entry {
            due,
            seq: 0,
            task,
            generation: self.generation,
            unit,
            interval,
            event,
        });
        task
    }

    fn enqueue(&mut self, mut entry: Entry<E>) {
        entry.seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse(entry));
    }

    /// Cancels a single task. Cancelling an already fired one-shot task is a no-op.
    pub fn cancel(&mut self, task: TaskId) {
        if self.forget(task) {
            self.cancelled.insert(task);
        }
    }

    /// Cancels every task belonging to `unit`.
    pub fn cancel_unit(&mut self, unit: UnitId) {
        let Some(tasks) = self.by_unit.remove(&unit) else {
            return;
        };
        for task in tasks {
            self.live.remove(&task);
            self.cancelled.insert(task);
        }
    }

    /// Drops `task` from the live index. Returns false if it was not live.
    fn forget(&mut self, task: TaskId) -> bool {
        let Some(unit) = self.live.remove(&task) else {
            return false;
        };
        if let Some(tasks) = self.by_unit.get_mut(&unit) {
            tasks.remove(&task);
            if tasks.is_empty() {
                self.by_unit.remove(&unit);
            }
        }
        true
    }

    /// Drops every task and starts a new generation.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.live.clear();
        self.by_unit.clear();
        self.cancelled.clear();
        self.generation += 1;
    }

    /// Pops the earliest task due at or before `now`.
    ///
    /// A recurring task is re-queued one interval after its firing time. If that is
    /// still at or before `now` it skips ahead to its last due time not after `now`,
    /// so a long gap between ticks costs at most one catch-up firing.
    pub fn pop_due(&mut self, now: f64) -> Option<Fired<E>> {
        loop {
            let due = match self.queue.peek() {
                Some(Reverse(entry)) => entry.due,
                None => return None,
            };
            if due > now {
                return None;
            }
            let Reverse(mut entry) = self.queue.pop()?;

            if entry.generation != self.generation || self.cancelled.remove(&entry.task) {
                continue;
            }

            let fired = Fired {
                task: entry.task,
                unit: entry.unit,
                event: entry.event.clone(),
                at: entry.due,
            };

            if let Some(interval) = entry.interval {
                let mut next = entry.due + interval;
                if next <= now {
                    let missed = ((now - entry.due) / interval).floor();
                    next = (entry.due + interval * missed).max(next);
                }
                entry.due = next;
                self.enqueue(entry);
            } else {
                self.forget(entry.task);
            }

            return Some(fired);
        }
    }

    /// Earliest live due time, if any.
    pub fn next_due(&self) -> Option<f64> {
        self.queue
            .iter()
            .filter(|Reverse(e)| self.live.contains_key(&e.task))
            .map(|Reverse(e)| e.due)
            .min_by(|a, b| a.total_cmp(b))
    }
}
