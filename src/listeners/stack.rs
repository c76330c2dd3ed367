//! Stacked words - "STOP." "THINK." "EXIST." shown one at a time through a
//! one-word-high window, each lift moving the stack up by one word.
//!
//! `begin` is edge-triggered: only a `false -> true` change starts a reveal.
//! Setting it to `false` hides the stack and drops every pending step.
//!
//! Offsets are in word heights. Word `k` sits at row `k - 1 + offset`
//! relative to the window, so a reveal starts with "STOP." in view
//! (`offset = 1`) and every lift brings the next word in.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use log::debug;

use super::Listener;
use crate::animation::{Cascade, CascadeTiming, DelayPolicy, Easing, Tween};
use crate::config::TimelineConfig;
use crate::timeline::{reactions, Reactions, Scheduler, TimerEvent};

pub const STACK_WORDS: [&str; 3] = ["STOP.", "THINK.", "EXIST."];

/// Offset of a fresh reveal.
pub const STACK_START_OFFSET: f32 = 1.0;

pub struct StackedWords {
    begin: Cell<bool>,
    offset: Rc<RefCell<Tween>>,
    first_word: Cascade,
    scheduler: Scheduler,
    lift_duration: Duration,
    lift_gap: Duration,
}

impl StackedWords {
    pub fn new(scheduler: Scheduler, config: &TimelineConfig) -> Self {
        let first_word = Cascade::new(
            "stack",
            scheduler.clone(),
            STACK_WORDS[0].chars().count(),
            CascadeTiming {
                step: config.char_delay(),
                unit_duration: config.char_duration(),
                policy: DelayPolicy::Forward,
                easing: Easing::EaseInOut,
            },
        );

        Self {
            begin: Cell::new(false),
            offset: Rc::new(RefCell::new(Tween::fixed(STACK_START_OFFSET))),
            first_word,
            scheduler,
            lift_duration: config.lift_duration(),
            lift_gap: config.lift_gap(),
        }
    }

    /// Drive the `begin` flag. Returns whether a reveal started.
    pub fn set_begin(&self, begin: bool) -> bool {
        let was = self.begin.replace(begin);
        match (was, begin) {
            (false, true) => {
                self.reveal();
                true
            }
            (true, false) => {
                debug!("stack: hidden");
                self.first_word.cancel();
                false
            }
            _ => false,
        }
    }

    pub fn begin(&self) -> bool {
        self.begin.get()
    }

    /// The stack is only drawn while `begin` is set.
    pub fn is_visible(&self) -> bool {
        self.begin.get()
    }

    /// Delay of lift `k` (1-based) after a reveal starts.
    pub fn lift_delay(&self, lift: usize) -> Duration {
        (self.lift_duration + self.lift_gap) * lift as u32
    }

    fn reveal(&self) {
        debug!("stack: reveal");
        self.first_word.reset();
        self.offset.borrow_mut().set(STACK_START_OFFSET);
        self.first_word.run();

        for lift in 1..STACK_WORDS.len() {
            let offset = self.offset.clone();
            let scheduler = self.scheduler.clone();
            let duration = self.lift_duration;
            self.first_word.schedule_guarded(self.lift_delay(lift), move || {
                let now = scheduler.now();
                let mut offset = offset.borrow_mut();
                let target = offset.target() - 1.0;
                offset.retarget(now, target, duration, Easing::EaseIn);
            });
        }
    }

    pub fn words(&self) -> &'static [&'static str] {
        &STACK_WORDS
    }

    pub fn offset(&self, now: Duration) -> f32 {
        self.offset.borrow().value_at(now)
    }

    /// Offset the stack is heading to.
    pub fn offset_target(&self) -> f32 {
        self.offset.borrow().target()
    }

    /// Per-character opacity of "STOP.".
    pub fn first_word_opacities(&self, now: Duration) -> Vec<f32> {
        self.first_word.opacities(now)
    }

    pub fn first_word(&self) -> &Cascade {
        &self.first_word
    }

    pub fn is_inverted(&self) -> bool {
        self.first_word.is_inverted()
    }
}

impl Listener for StackedWords {
    fn handle_event(&self, event: TimerEvent) {
        let reactions = reactions(event);
        if reactions.contains(Reactions::STACK_BEGIN) {
            self.set_begin(true);
        }
        if reactions.contains(Reactions::STACK_HIDE) {
            self.set_begin(false);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn setup() -> (Scheduler, StackedWords) {
        let scheduler = Scheduler::new();
        let stack = StackedWords::new(scheduler.clone(), &TimelineConfig::default());
        (scheduler, stack)
    }

    #[test]
    fn test_hidden_until_begin() {
        let (_, stack) = setup();
        assert!(!stack.is_visible());
        assert_eq!(stack.first_word_opacities(Duration::ZERO), vec![0.0; 5]);
    }

    #[test]
    fn test_lift_times() {
        let (scheduler, stack) = setup();
        assert!(stack.set_begin(true));
        assert_eq!(stack.offset_target(), 1.0);

        scheduler.advance_to(ms(849));
        assert_eq!(stack.offset_target(), 1.0);
        scheduler.advance_to(ms(850));
        assert_eq!(stack.offset_target(), 0.0);

        scheduler.advance_to(ms(1699));
        assert_eq!(stack.offset_target(), 0.0);
        scheduler.advance_to(ms(1700));
        assert_eq!(stack.offset_target(), -1.0);

        scheduler.advance_to(ms(2500));
        assert_eq!(stack.offset(scheduler.now()), -1.0);
        assert_eq!(stack.offset_target(), -1.0);
    }

    #[test]
    fn test_lift_eases_in() {
        let (scheduler, stack) = setup();
        stack.set_begin(true);
        scheduler.advance_to(ms(850));

        // Ease-in: less than half way at half time
        let halfway = stack.offset(ms(1250));
        assert!(halfway > 0.5 && halfway < 1.0);
    }

    #[test]
    fn test_first_word_fades_forward() {
        let (scheduler, stack) = setup();
        stack.set_begin(true);

        scheduler.advance_to(ms(399));
        assert_eq!(stack.first_word().revealed(), 4);
        scheduler.advance_to(ms(400));
        assert_eq!(stack.first_word().revealed(), 5);
    }

    #[test]
    fn test_begin_is_edge_triggered() {
        let (scheduler, stack) = setup();
        assert!(stack.set_begin(true));
        assert!(stack.is_inverted());

        scheduler.advance_to(ms(900));
        assert!(!stack.set_begin(true));
        assert!(stack.is_inverted());
        assert_eq!(stack.offset_target(), 0.0);
    }

    #[test]
    fn test_hide_drops_pending_lifts() {
        let (scheduler, stack) = setup();
        stack.set_begin(true);
        scheduler.advance_to(ms(900));

        stack.handle_event(TimerEvent::AtSecond(4));
        assert!(!stack.is_visible());

        scheduler.advance_to(ms(3000));
        assert_eq!(stack.offset_target(), 0.0);
    }

    #[test]
    fn test_second_reveal_starts_over() {
        let (scheduler, stack) = setup();
        stack.set_begin(true);
        scheduler.advance_to(ms(2000));
        stack.set_begin(false);

        scheduler.advance_to(ms(4000));
        assert!(stack.set_begin(true));
        assert!(!stack.is_inverted());
        assert_eq!(stack.offset(scheduler.now()), STACK_START_OFFSET);
        assert_eq!(stack.first_word().revealed(), 0);

        scheduler.advance_to(ms(4850));
        assert_eq!(stack.offset_target(), 0.0);
    }

    #[test]
    fn test_event_table() {
        let (_, stack) = setup();
        stack.handle_event(TimerEvent::AtSecond(3));
        assert!(stack.begin());
        stack.handle_event(TimerEvent::AtSecond(8));
        assert!(!stack.begin());
        stack.handle_event(TimerEvent::AtSecond(7));
        assert!(stack.begin());
    }
}
