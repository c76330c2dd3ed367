//! Clock - The one periodic tick source of the screen
//!
//! The clock owns a repeating task on the [`Scheduler`] and a bounded second
//! counter. Each tick advances the counter (wrapping `total -> 1`), derives
//! the [`TimerEvent`] and publishes it on the [`EventChannel`].
//!
//! # Pattern
//!
//! - `start()` resets the counter to 0 and arms the periodic task
//! - `start()` while running restarts from 0 (old task cancelled)
//! - `stop()` cancels the task and resets the counter; no-op when stopped
//! - Cascade steps already scheduled by listeners are NOT cancelled by `stop()`
//!
//! The counter is mirrored into a `Signal<u8>` for reactive readers.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use log::debug;
use spark_signals::{signal, Signal};

use super::channel::EventChannel;
use super::event::event_for;
use super::scheduler::{Scheduler, TaskId};
use crate::config::TimelineConfig;

// =============================================================================
// CLOCK STATE
// =============================================================================

struct ClockState {
    /// Always in `0..=total`
    counter: u8,
    total: u8,
    period: Duration,
    task: Option<TaskId>,
}

// =============================================================================
// CLOCK
// =============================================================================

/// Periodic tick source publishing one event per tick.
pub struct Clock {
    state: Rc<RefCell<ClockState>>,
    scheduler: Scheduler,
    channel: EventChannel,
    second: Signal<u8>,
}

impl Clock {
    /// Create a stopped clock.
    pub fn new(scheduler: Scheduler, channel: EventChannel, config: &TimelineConfig) -> Self {
        Self {
            state: Rc::new(RefCell::new(ClockState {
                counter: 0,
                total: config.total_seconds.max(1),
                period: config.tick_period(),
                task: None,
            })),
            scheduler,
            channel,
            second: signal(0),
        }
    }

    /// Reset the counter and start ticking.
    pub fn start(&self) {
        self.cancel_task();

        let period = {
            let mut state = self.state.borrow_mut();
            state.counter = 0;
            state.period
        };
        self.second.set(0);

        let state = self.state.clone();
        let channel = self.channel.clone();
        let second = self.second.clone();
        let id = self
            .scheduler
            .schedule_every(period, move || tick(&state, &channel, &second));
        self.state.borrow_mut().task = Some(id);

        debug!("clock started, period {period:?}");
    }

    /// Stop ticking and reset the counter. No-op when not running.
    pub fn stop(&self) {
        if !self.cancel_task() {
            return;
        }
        self.state.borrow_mut().counter = 0;
        self.second.set(0);

        debug!("clock stopped");
    }

    /// Advance one tick immediately, as the periodic task does.
    pub fn tick(&self) {
        tick(&self.state, &self.channel, &self.second);
    }

    pub fn is_running(&self) -> bool {
        self.state.borrow().task.is_some()
    }

    /// Current counter value (0 before the first tick).
    pub fn second(&self) -> u8 {
        self.state.borrow().counter
    }

    /// Reactive mirror of the counter.
    pub fn second_signal(&self) -> Signal<u8> {
        self.second.clone()
    }

    pub fn total(&self) -> u8 {
        self.state.borrow().total
    }

    fn cancel_task(&self) -> bool {
        let task = self.state.borrow_mut().task.take();
        match task {
            Some(id) => {
                self.scheduler.cancel(id);
                true
            }
            None => false,
        }
    }
}

impl Drop for Clock {
    fn drop(&mut self) {
        self.cancel_task();
    }
}

fn tick(state: &RefCell<ClockState>, channel: &EventChannel, second: &Signal<u8>) {
    let (counter, total) = {
        let mut state = state.borrow_mut();
        state.counter = (state.counter % state.total) + 1;
        (state.counter, state.total)
    };
    second.set(counter);

    let event = event_for(i64::from(counter), total);
    debug!("tick {counter}/{total}: {event}");
    channel.publish(event);
}

// =============================================================================
// TESTS
// =============================================================================
