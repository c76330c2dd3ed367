//! Orb - Background disc turning half a revolution twice per loop.
//!
//! Angles are cumulative: each spin turns from the current target, so the
//! orb keeps spinning the same way instead of unwinding. Second 2 snaps it
//! back to the base angle without animating.

use std::cell::RefCell;
use std::time::Duration;

use log::debug;

use super::Listener;
use crate::animation::{Easing, Tween};
use crate::config::TimelineConfig;
use crate::timeline::{reactions, Reactions, Scheduler, TimerEvent};

/// Resting angle in degrees.
pub const ORB_BASE_ANGLE: f32 = -45.0;

/// Angle added by one spin, in degrees.
pub const ORB_HALF_TURN: f32 = -180.0;

pub struct Orb {
    rotation: RefCell<Tween>,
    scheduler: Scheduler,
    spin_duration: Duration,
}

impl Orb {
    pub fn new(scheduler: Scheduler, config: &TimelineConfig) -> Self {
        Self {
            rotation: RefCell::new(Tween::fixed(ORB_BASE_ANGLE)),
            scheduler,
            spin_duration: config.step_duration(),
        }
    }

    /// Snap back to the base angle.
    pub fn reset_rotation(&self) {
        self.rotation.borrow_mut().set(ORB_BASE_ANGLE);
    }

    /// Turn another half revolution from the current target.
    pub fn spin(&self) {
        let now = self.scheduler.now();
        let mut rotation = self.rotation.borrow_mut();
        let target = rotation.target() + ORB_HALF_TURN;
        rotation.retarget(now, target, self.spin_duration, Easing::EaseInOut);
        debug!("orb: spinning to {target}");
    }

    /// Angle at `now`, in degrees.
    pub fn rotation(&self, now: Duration) -> f32 {
        self.rotation.borrow().value_at(now)
    }

    /// Angle the orb is heading to.
    pub fn rotation_target(&self) -> f32 {
        self.rotation.borrow().target()
    }
}

impl Listener for Orb {
    fn handle_event(&self, event: TimerEvent) {
        let reactions = reactions(event);
        if reactions.contains(Reactions::ORB_RESET) {
            self.reset_rotation();
        }
        if reactions.contains(Reactions::ORB_SPIN) {
            self.spin();
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Scheduler, Orb) {
        let scheduler = Scheduler::new();
        let orb = Orb::new(scheduler.clone(), &TimelineConfig::default());
        (scheduler, orb)
    }

    #[test]
    fn test_starts_at_base_angle() {
        let (_, orb) = setup();
        assert_eq!(orb.rotation(Duration::ZERO), ORB_BASE_ANGLE);
    }

    #[test]
    fn test_cumulative_spins() {
        let (scheduler, orb) = setup();

        orb.handle_event(TimerEvent::AtSecond(3));
        assert_eq!(orb.rotation_target(), -225.0);
        assert_eq!(orb.rotation(scheduler.now()), -45.0);

        scheduler.advance_by(Duration::from_secs(1));
        let midway = orb.rotation(scheduler.now());
        assert!(midway < -45.0 && midway > -225.0);

        scheduler.advance_by(Duration::from_secs(1));
        assert_eq!(orb.rotation(scheduler.now()), -225.0);

        orb.handle_event(TimerEvent::AtSecond(7));
        scheduler.advance_by(Duration::from_secs(2));
        assert_eq!(orb.rotation(scheduler.now()), -405.0);
    }

    #[test]
    fn test_second_two_snaps_back() {
        let (scheduler, orb) = setup();
        orb.handle_event(TimerEvent::AtSecond(3));
        orb.handle_event(TimerEvent::AtSecond(7));
        orb.handle_event(TimerEvent::AtSecond(2));

        assert_eq!(orb.rotation(scheduler.now()), ORB_BASE_ANGLE);
        assert_eq!(orb.rotation_target(), ORB_BASE_ANGLE);
    }

    #[test]
    fn test_other_events_ignored() {
        let (scheduler, orb) = setup();
        for event in [1, 4, 5, 6, 8].map(TimerEvent::AtSecond) {
            orb.handle_event(event);
        }
        orb.handle_event(TimerEvent::NoEvent);
        assert_eq!(orb.rotation(scheduler.now()), ORB_BASE_ANGLE);
    }
}
