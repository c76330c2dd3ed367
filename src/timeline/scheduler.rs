//! Scheduler - Single-threaded virtual-time task queue
//!
//! Every delayed action on the screen (clock ticks, per-character fades,
//! lift-up shifts) is a task on one [`Scheduler`]. Time only moves when the
//! owner calls [`Scheduler::advance_to`], so tests drive the timeline in
//! simulated time and the terminal host drives it from a wall clock.
//!
//! # Ordering
//!
//! - Tasks run in (due time, insertion order)
//! - `now()` equals the running task's due time while it runs
//! - Repeating tasks are never coalesced: advancing past three periods fires
//!   three times
//! - A task may schedule or cancel other tasks; newly scheduled tasks that are
//!   already due run in the same `advance_to` call
//!
//! No borrow of the queue is held while a task runs.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use spark_kinetic::timeline::Scheduler;
//!
//! let scheduler = Scheduler::new();
//! scheduler.schedule_after(Duration::from_millis(300), || println!("fade done"));
//! scheduler.advance_by(Duration::from_secs(1));
//! ```

use std::cell::RefCell;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::rc::Rc;
use std::time::Duration;

// =============================================================================
// TYPES
// =============================================================================

/// Identifies a scheduled task for cancellation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

enum Task {
    Once(Box<dyn FnOnce()>),
    Every { period: Duration, task: Rc<dyn Fn()> },
}

enum Runnable {
    Once(Box<dyn FnOnce()>),
    Every(Rc<dyn Fn()>),
}

// =============================================================================
// QUEUE
// =============================================================================

struct Queue {
    now: Duration,
    /// (due, seq, task id). Entries whose id is gone from `tasks` are stale.
    heap: BinaryHeap<Reverse<(Duration, u64, u64)>>,
    tasks: HashMap<u64, Task>,
    next_id: u64,
    next_seq: u64,
}

impl Queue {
    fn new() -> Self {
        Self {
            now: Duration::ZERO,
            heap: BinaryHeap::new(),
            tasks: HashMap::new(),
            next_id: 0,
            next_seq: 0,
        }
    }

    fn push(&mut self, due: Duration, id: u64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse((due, seq, id)));
    }

    fn insert(&mut self, due: Duration, task: Task) -> TaskId {
        let id = self.next_id;
        self.next_id += 1;
        self.tasks.insert(id, task);
        self.push(due, id);
        TaskId(id)
    }

    /// Pop the next live task due at or before `limit`, moving `now` to it.
    fn pop_due(&mut self, limit: Duration) -> Option<Runnable> {
        while let Some(Reverse((due, _, id))) = self.heap.peek().copied() {
            if due > limit {
                return None;
            }
            self.heap.pop();

            let period = match self.tasks.get(&id) {
                None => continue,
                Some(Task::Once(_)) => None,
                Some(Task::Every { period, .. }) => Some(*period),
            };

            self.now = self.now.max(due);
            match period {
                None => {
                    if let Some(Task::Once(task)) = self.tasks.remove(&id) {
                        return Some(Runnable::Once(task));
                    }
                }
                Some(period) => {
                    self.push(due + period, id);
                    if let Some(Task::Every { task, .. }) = self.tasks.get(&id) {
                        return Some(Runnable::Every(task.clone()));
                    }
                }
            }
        }
        None
    }

    fn next_due(&mut self) -> Option<Duration> {
        while let Some(Reverse((due, _, id))) = self.heap.peek().copied() {
            if self.tasks.contains_key(&id) {
                return Some(due);
            }
            self.heap.pop();
        }
        None
    }
}

// =============================================================================
// SCHEDULER HANDLE
// =============================================================================

/// Shared handle to one timeline. Clones refer to the same queue.
#[derive(Clone)]
pub struct Scheduler {
    queue: Rc<RefCell<Queue>>,
}

impl Scheduler {
    /// Create an empty timeline at time zero.
    pub fn new() -> Self {
        Self {
            queue: Rc::new(RefCell::new(Queue::new())),
        }
    }

    /// Current virtual time since the timeline was created.
    pub fn now(&self) -> Duration {
        self.queue.borrow().now
    }

    /// Run `task` once, `delay` from now.
    pub fn schedule_after<F>(&self, delay: Duration, task: F) -> TaskId
    where
        F: FnOnce() + 'static,
    {
        let mut queue = self.queue.borrow_mut();
        let due = queue.now + delay;
        queue.insert(due, Task::Once(Box::new(task)))
    }

    /// Run `task` every `period`, first firing one period from now.
    ///
    /// A zero period would never let time advance; it is clamped to one
    /// nanosecond.
    pub fn schedule_every<F>(&self, period: Duration, task: F) -> TaskId
    where
        F: Fn() + 'static,
    {
        let period = period.max(Duration::from_nanos(1));
        let mut queue = self.queue.borrow_mut();
        let due = queue.now + period;
        queue.insert(
            due,
            Task::Every {
                period,
                task: Rc::new(task),
            },
        )
    }

    /// Cancel a task. Unknown or finished ids are ignored.
    ///
    /// Returns true if a live task was removed.
    pub fn cancel(&self, id: TaskId) -> bool {
        self.queue.borrow_mut().tasks.remove(&id.0).is_some()
    }

    /// Whether a task is still scheduled.
    pub fn is_scheduled(&self, id: TaskId) -> bool {
        self.queue.borrow().tasks.contains_key(&id.0)
    }

    /// Number of live tasks (repeating tasks count once).
    pub fn pending(&self) -> usize {
        self.queue.borrow().tasks.len()
    }

    /// Due time of the next live task.
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.borrow_mut().next_due()
    }

    /// Run every task due at or before `target`, then move `now` to `target`.
    ///
    /// Moving backwards runs nothing and leaves `now` unchanged.
    /// Returns the number of tasks that ran.
    pub fn advance_to(&self, target: Duration) -> usize {
        let mut ran = 0;
        loop {
            let next = self.queue.borrow_mut().pop_due(target);
            match next {
                Some(Runnable::Once(task)) => task(),
                Some(Runnable::Every(task)) => task(),
                None => break,
            }
            ran += 1;
        }

        let mut queue = self.queue.borrow_mut();
        queue.now = queue.now.max(target);
        ran
    }

    /// Advance by `delta` from the current time.
    pub fn advance_by(&self, delta: Duration) -> usize {
        let target = self.now() + delta;
        self.advance_to(target)
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_runs_in_due_order() {
        let scheduler = Scheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for (delay, label) in [(300, "c"), (100, "a"), (200, "b")] {
            let log = log.clone();
            scheduler.schedule_after(ms(delay), move || log.borrow_mut().push(label));
        }

        assert_eq!(scheduler.advance_to(ms(250)), 2);
        assert_eq!(*log.borrow(), vec!["a", "b"]);
        assert_eq!(scheduler.now(), ms(250));

        scheduler.advance_to(ms(300));
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_same_due_keeps_insertion_order() {
        let scheduler = Scheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for label in 0..5 {
            let log = log.clone();
            scheduler.schedule_after(ms(100), move || log.borrow_mut().push(label));
        }

        scheduler.advance_by(ms(100));
        assert_eq!(*log.borrow(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_now_is_due_time_inside_task() {
        let scheduler = Scheduler::new();
        let seen = Rc::new(Cell::new(Duration::ZERO));

        let (s, seen_clone) = (scheduler.clone(), seen.clone());
        scheduler.schedule_after(ms(120), move || seen_clone.set(s.now()));

        scheduler.advance_to(ms(1000));
        assert_eq!(seen.get(), ms(120));
        assert_eq!(scheduler.now(), ms(1000));
    }

    #[test]
    fn test_repeating_never_coalesces() {
        let scheduler = Scheduler::new();
        let count = Rc::new(Cell::new(0));

        let count_clone = count.clone();
        scheduler.schedule_every(ms(1000), move || count_clone.set(count_clone.get() + 1));

        scheduler.advance_to(ms(999));
        assert_eq!(count.get(), 0);

        scheduler.advance_to(ms(3500));
        assert_eq!(count.get(), 3);
    }

    #[test]
    fn test_cancel() {
        let scheduler = Scheduler::new();
        let fired = Rc::new(Cell::new(false));

        let fired_clone = fired.clone();
        let id = scheduler.schedule_after(ms(10), move || fired_clone.set(true));
        assert!(scheduler.is_scheduled(id));
        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id));

        scheduler.advance_by(ms(100));
        assert!(!fired.get());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_repeating_task_can_cancel_itself() {
        let scheduler = Scheduler::new();
        let count = Rc::new(Cell::new(0));
        let own_id: Rc<Cell<Option<TaskId>>> = Rc::new(Cell::new(None));

        let (s, count_clone, own_clone) = (scheduler.clone(), count.clone(), own_id.clone());
        let id = scheduler.schedule_every(ms(100), move || {
            count_clone.set(count_clone.get() + 1);
            if count_clone.get() == 2 {
                if let Some(id) = own_clone.get() {
                    s.cancel(id);
                }
            }
        });
        own_id.set(Some(id));

        scheduler.advance_by(ms(1000));
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_task_scheduled_from_task_runs_in_same_advance() {
        let scheduler = Scheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let (s, outer_log) = (scheduler.clone(), log.clone());
        scheduler.schedule_after(ms(100), move || {
            outer_log.borrow_mut().push(("outer", s.now()));
            let inner_log = outer_log.clone();
            let s2 = s.clone();
            s.schedule_after(ms(50), move || inner_log.borrow_mut().push(("inner", s2.now())));
        });

        scheduler.advance_to(ms(200));
        assert_eq!(*log.borrow(), vec![("outer", ms(100)), ("inner", ms(150))]);
    }

    #[test]
    fn test_advance_backwards_is_noop() {
        let scheduler = Scheduler::new();
        scheduler.advance_to(ms(500));
        assert_eq!(scheduler.advance_to(ms(100)), 0);
        assert_eq!(scheduler.now(), ms(500));
    }

    #[test]
    fn test_next_due_skips_cancelled() {
        let scheduler = Scheduler::new();
        let first = scheduler.schedule_after(ms(10), || {});
        scheduler.schedule_after(ms(20), || {});
        scheduler.cancel(first);

        assert_eq!(scheduler.next_due(), Some(ms(20)));
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn test_zero_delay_runs_on_next_advance() {
        let scheduler = Scheduler::new();
        let fired = Rc::new(Cell::new(false));

        let fired_clone = fired.clone();
        scheduler.schedule_after(Duration::ZERO, move || fired_clone.set(true));
        assert!(!fired.get());

        scheduler.advance_by(Duration::ZERO);
        assert!(fired.get());
    }
}
