//! Cascade - Generation-guarded per-unit reveal scheduling
//!
//! A cascade reveals an ordered row of units (characters of a word, words of
//! a stack) one after another. Each unit's "become visible" step is a
//! delayed task on the shared [`Scheduler`].
//!
//! # Delay policies
//!
//! - **Forward**: unit `i` fires at `i * step` (left-to-right reveal)
//! - **Reverse**: unit `i` fires at `(n - 1 - i) * step` (right-to-left, so a
//!   word sliding in from the right appears to settle in reading order)
//!
//! # Generations
//!
//! Every step captures the cascade's generation when it is scheduled. A
//! reset bumps the generation *synchronously* before any new step is
//! scheduled, so a step left over from an aborted run finds a mismatched
//! token and does nothing. Slot `i` is only ever written by the step for
//! slot `i`; there is no other cancellation of in-flight steps.
//!
//! # Example
//!
//! ```ignore
//! let cascade = Cascade::new("title", scheduler.clone(), 7, CascadeTiming {
//!     step: Duration::from_millis(100),
//!     unit_duration: Duration::from_millis(300),
//!     policy: DelayPolicy::Reverse,
//!     easing: Easing::EaseInOut,
//! });
//!
//! cascade.trigger();                    // first run: no reset
//! cascade.run_then(|| println!("done")); // follow-up after 7 * 100ms
//! cascade.restart();                    // hide everything, flip colour, run again
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use log::{debug, trace};

use super::tween::{Easing, Tween};
use crate::timeline::{Scheduler, TaskId};

// =============================================================================
// GENERATION TOKEN
// =============================================================================

/// Monotonic token invalidating stale delayed steps.
///
/// Clones share the same counter.
#[derive(Clone, Debug, Default)]
pub struct Generation {
    current: Rc<Cell<u64>>,
}

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> u64 {
        self.current.get()
    }

    /// Invalidate every step scheduled so far. Returns the new token.
    pub fn bump(&self) -> u64 {
        let next = self.current.get() + 1;
        self.current.set(next);
        next
    }

    pub fn is_current(&self, token: u64) -> bool {
        self.current.get() == token
    }

    /// Schedule `step` after `delay`, tagged with the current token.
    ///
    /// The step is a silent no-op if the generation moved on before it fired.
    pub fn schedule<F>(&self, scheduler: &Scheduler, delay: Duration, step: F) -> TaskId
    where
        F: FnOnce() + 'static,
    {
        let token = self.current();
        let generation = self.clone();
        scheduler.schedule_after(delay, move || {
            if generation.is_current(token) {
                step();
            } else {
                trace!("stale step dropped (token {token}, now {})", generation.current());
            }
        })
    }
}

// =============================================================================
// TIMING
// =============================================================================

/// Which end of the row reveals first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DelayPolicy {
    #[default]
    Forward,
    Reverse,
}

impl DelayPolicy {
    /// Delay of unit `index` in a row of `count` units.
    pub fn delay(self, index: usize, count: usize, step: Duration) -> Duration {
        let slot = match self {
            DelayPolicy::Forward => index,
            DelayPolicy::Reverse => count.saturating_sub(index + 1),
        };
        step * slot as u32
    }
}

/// Timing of one cascade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CascadeTiming {
    /// Delay between two consecutive units
    pub step: Duration,
    /// Fade duration of a single unit (zero = instant)
    pub unit_duration: Duration,
    pub policy: DelayPolicy,
    pub easing: Easing,
}

// =============================================================================
// CASCADE STATE
// =============================================================================

/// Per-cascade visual state: one opacity per unit plus the colour flag.
#[derive(Clone, Debug)]
pub struct CascadeState {
    pub units: Vec<Tween>,
    pub inverted: bool,
    runs: u64,
    last_reset: Option<Duration>,
}

impl CascadeState {
    fn new(units: usize) -> Self {
        Self {
            units: vec![Tween::fixed(0.0); units],
            inverted: false,
            runs: 0,
            last_reset: None,
        }
    }
}

// =============================================================================
// CASCADE
// =============================================================================

/// A row of units revealed one by one.
pub struct Cascade {
    label: &'static str,
    state: Rc<RefCell<CascadeState>>,
    generation: Generation,
    scheduler: Scheduler,
    timing: CascadeTiming,
}

impl Cascade {
    pub fn new(label: &'static str, scheduler: Scheduler, units: usize, timing: CascadeTiming) -> Self {
        Self {
            label,
            state: Rc::new(RefCell::new(CascadeState::new(units))),
            generation: Generation::new(),
            scheduler,
            timing,
        }
    }

    pub fn len(&self) -> usize {
        self.state.borrow().units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn timing(&self) -> CascadeTiming {
        self.timing
    }

    /// `n * step`: when the last forward unit has fired.
    pub fn total_duration(&self) -> Duration {
        self.timing.step * self.len() as u32
    }

    /// Delay of unit `index` under this cascade's policy.
    pub fn delay_of(&self, index: usize) -> Duration {
        self.timing.policy.delay(index, self.len(), self.timing.step)
    }

    pub fn generation(&self) -> u64 {
        self.generation.current()
    }

    /// Hide every unit, flip the colour flag and invalidate pending steps.
    ///
    /// A second reset at the same instant does not flip the colour again.
    pub fn reset(&self) {
        let now = self.scheduler.now();
        let token = self.generation.bump();

        let mut state = self.state.borrow_mut();
        for unit in state.units.iter_mut() {
            unit.set(0.0);
        }
        if state.last_reset != Some(now) {
            state.inverted = !state.inverted;
        }
        state.last_reset = Some(now);

        debug!("{}: reset (generation {token}, inverted {})", self.label, state.inverted);
    }

    /// Invalidate pending steps without touching the visual state.
    pub fn cancel(&self) {
        self.generation.bump();
    }

    /// Schedule every unit's reveal. Returns the generation the steps carry.
    pub fn run(&self) -> u64 {
        let count = {
            let mut state = self.state.borrow_mut();
            state.runs += 1;
            state.units.len()
        };

        for index in 0..count {
            let delay = self.timing.policy.delay(index, count, self.timing.step);
            let state = self.state.clone();
            let scheduler = self.scheduler.clone();
            let timing = self.timing;
            self.generation.schedule(&self.scheduler, delay, move || {
                let now = scheduler.now();
                if let Some(unit) = state.borrow_mut().units.get_mut(index) {
                    unit.retarget(now, 1.0, timing.unit_duration, timing.easing);
                }
            });
        }

        self.generation.current()
    }

    /// [`run`](Self::run), then fire `follow_up` once after
    /// [`total_duration`](Self::total_duration) unless reset first.
    pub fn run_then<F>(&self, follow_up: F) -> u64
    where
        F: FnOnce() + 'static,
    {
        let token = self.run();
        self.generation
            .schedule(&self.scheduler, self.total_duration(), follow_up);
        token
    }

    /// Run on first use, reset and run afterwards.
    pub fn trigger(&self) -> u64 {
        if self.state.borrow().runs > 0 {
            self.reset();
        }
        self.run()
    }

    /// Reset, then run.
    pub fn restart(&self) -> u64 {
        self.reset();
        self.run()
    }

    /// Schedule an extra step bound to the current generation.
    pub fn schedule_guarded<F>(&self, delay: Duration, step: F) -> TaskId
    where
        F: FnOnce() + 'static,
    {
        self.generation.schedule(&self.scheduler, delay, step)
    }

    /// Committed opacity of a unit (0 or 1 for a plain reveal).
    pub fn target(&self, index: usize) -> f32 {
        self.state
            .borrow()
            .units
            .get(index)
            .map(Tween::target)
            .unwrap_or(0.0)
    }

    /// Interpolated opacity of a unit at `now`.
    pub fn opacity(&self, index: usize, now: Duration) -> f32 {
        self.state
            .borrow()
            .units
            .get(index)
            .map(|unit| unit.value_at(now))
            .unwrap_or(0.0)
    }

    /// Interpolated opacity of every unit at `now`.
    pub fn opacities(&self, now: Duration) -> Vec<f32> {
        self.state
            .borrow()
            .units
            .iter()
            .map(|unit| unit.value_at(now))
            .collect()
    }

    /// Number of units whose reveal step has fired.
    pub fn revealed(&self) -> usize {
        self.state
            .borrow()
            .units
            .iter()
            .filter(|unit| unit.target() >= 1.0)
            .count()
    }

    pub fn is_inverted(&self) -> bool {
        self.state.borrow().inverted
    }

    /// Copy of the full state.
    pub fn snapshot(&self) -> CascadeState {
        self.state.borrow().clone()
    }
}

// =============================================================================
// TESTS
// =============================================================================
