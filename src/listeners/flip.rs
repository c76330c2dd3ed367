//! Flip background - the circle flips about its top edge at seconds 3 and 7,
//! and background/circle colours swap at seconds 4 and 8.

use std::cell::{Cell, RefCell};
use std::time::Duration;

use super::Listener;
use crate::animation::{Easing, Tween};
use crate::config::TimelineConfig;
use crate::timeline::{reactions, Reactions, Scheduler, TimerEvent};

/// Flip angle of the turned-over circle, in degrees.
pub const FLIPPED_ANGLE: f32 = 180.0;

pub struct FlipBackground {
    flip: RefCell<Tween>,
    inverted: Cell<bool>,
    scheduler: Scheduler,
    flip_duration: Duration,
}

impl FlipBackground {
    pub fn new(scheduler: Scheduler, config: &TimelineConfig) -> Self {
        Self {
            flip: RefCell::new(Tween::fixed(0.0)),
            inverted: Cell::new(false),
            scheduler,
            flip_duration: config.step_duration(),
        }
    }

    /// Animate to the other face.
    pub fn toggle_flip(&self) {
        let now = self.scheduler.now();
        let mut flip = self.flip.borrow_mut();
        let target = if flip.target() == 0.0 { FLIPPED_ANGLE } else { 0.0 };
        flip.retarget(now, target, self.flip_duration, Easing::EaseInOut);
    }

    pub fn toggle_colour(&self) {
        self.inverted.set(!self.inverted.get());
    }

    /// Rotation about the X axis at `now`, in degrees.
    pub fn flip_angle(&self, now: Duration) -> f32 {
        self.flip.borrow().value_at(now)
    }

    pub fn is_flipped(&self) -> bool {
        self.flip.borrow().target() != 0.0
    }

    /// Black background with a white circle when set.
    pub fn is_inverted(&self) -> bool {
        self.inverted.get()
    }
}

impl Listener for FlipBackground {
    fn handle_event(&self, event: TimerEvent) {
        let reactions = reactions(event);
        if reactions.contains(Reactions::FLIP) {
            self.toggle_flip();
        }
        if reactions.contains(Reactions::COLOUR) {
            self.toggle_colour();
        }
    }
}
