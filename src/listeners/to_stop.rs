//! "TO" word - fades in left-to-right, then hands over to the stacked words.

use std::rc::Rc;
use std::time::Duration;

use log::debug;

use super::stack::StackedWords;
use super::Listener;
use crate::animation::{Cascade, CascadeTiming, DelayPolicy, Easing};
use crate::config::TimelineConfig;
use crate::timeline::{reactions, Reactions, Scheduler, TimerEvent};

pub const TO_TEXT: &str = "TO";

pub struct ToStopWord {
    cascade: Cascade,
    stack: Rc<StackedWords>,
}

impl ToStopWord {
    pub fn new(scheduler: Scheduler, config: &TimelineConfig, stack: Rc<StackedWords>) -> Self {
        let cascade = Cascade::new(
            "to",
            scheduler,
            TO_TEXT.chars().count(),
            CascadeTiming {
                step: config.char_delay(),
                unit_duration: config.char_duration(),
                policy: DelayPolicy::Forward,
                easing: Easing::EaseInOut,
            },
        );

        Self { cascade, stack }
    }

    /// Fade "TO" in, then set the stack's `begin` once the last
    /// character has started.
    pub fn start(&self) {
        let stack = self.stack.clone();
        self.cascade.run_then(move || {
            stack.set_begin(true);
        });
    }

    /// Hide "TO", hide the stack, toggle colour.
    pub fn reset(&self) {
        self.cascade.reset();
        self.stack.set_begin(false);
    }

    pub fn restart(&self) {
        debug!("to: restart");
        self.reset();
        self.start();
    }

    pub fn text(&self) -> &'static str {
        TO_TEXT
    }

    pub fn opacities(&self, now: Duration) -> Vec<f32> {
        self.cascade.opacities(now)
    }

    pub fn cascade(&self) -> &Cascade {
        &self.cascade
    }

    pub fn stack(&self) -> &StackedWords {
        &self.stack
    }

    pub fn is_inverted(&self) -> bool {
        self.cascade.is_inverted()
    }
}

impl Listener for ToStopWord {
    fn handle_event(&self, event: TimerEvent) {
        if reactions(event).contains(Reactions::TITLE_RESTART) {
            self.restart();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn setup() -> (Scheduler, ToStopWord) {
        let scheduler = Scheduler::new();
        let config = TimelineConfig::default();
        let stack = Rc::new(StackedWords::new(scheduler.clone(), &config));
        let word = ToStopWord::new(scheduler.clone(), &config, stack);
        (scheduler, word)
    }

    #[test]
    fn test_chain_begins_stack() {
        let (scheduler, word) = setup();
        word.start();

        scheduler.advance_to(ms(199));
        assert_eq!(word.cascade().revealed(), 2);
        assert!(!word.stack().begin());

        scheduler.advance_to(ms(200));
        assert!(word.stack().begin());

        // Stack lifts are measured from its own begin
        scheduler.advance_to(ms(1050));
        assert_eq!(word.stack().offset_target(), 0.0);
    }

    #[test]
    fn test_restart_hides_stack_and_rechains() {
        let (scheduler, word) = setup();
        word.start();
        scheduler.advance_to(ms(4000));

        word.handle_event(TimerEvent::AtSecond(4));
        scheduler.advance_to(ms(4000));
        assert!(word.is_inverted());
        assert!(!word.stack().begin());
        assert_eq!(word.cascade().revealed(), 1);

        scheduler.advance_to(ms(4200));
        assert!(word.stack().begin());
    }

    #[test]
    fn test_restart_before_chain_drops_follow_up() {
        let (scheduler, word) = setup();
        word.start();
        scheduler.advance_to(ms(150));

        word.reset();
        scheduler.advance_to(ms(1000));
        assert!(!word.stack().begin());
    }
}
