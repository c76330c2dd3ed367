//! Title word - "NO TIME" slides in from the right while its characters
//! fade in last-to-first. Restarts at seconds 4 and 8.

use std::cell::RefCell;
use std::time::Duration;

use log::debug;

use super::Listener;
use crate::animation::{Cascade, CascadeTiming, DelayPolicy, Easing, Tween};
use crate::config::TimelineConfig;
use crate::timeline::{reactions, Reactions, Scheduler, TimerEvent};

pub const TITLE_TEXT: &str = "NO TIME";

/// Horizontal offset the phrase slides in from.
pub const TITLE_SLIDE_FROM: f32 = 100.0;

pub struct TitleWord {
    offset: RefCell<Tween>,
    cascade: Cascade,
    scheduler: Scheduler,
    slide_duration: Duration,
}

impl TitleWord {
    pub fn new(scheduler: Scheduler, config: &TimelineConfig) -> Self {
        let cascade = Cascade::new(
            "title",
            scheduler.clone(),
            TITLE_TEXT.chars().count(),
            CascadeTiming {
                step: config.char_delay(),
                unit_duration: config.char_duration(),
                policy: DelayPolicy::Reverse,
                easing: Easing::EaseInOut,
            },
        );

        Self {
            offset: RefCell::new(Tween::fixed(TITLE_SLIDE_FROM)),
            cascade,
            scheduler,
            slide_duration: config.title_slide(),
        }
    }

    /// Slide in and fade every character in.
    pub fn start(&self) {
        let now = self.scheduler.now();
        self.offset
            .borrow_mut()
            .retarget(now, 0.0, self.slide_duration, Easing::EaseInOut);
        self.cascade.run();
    }

    /// Back to the right edge, all characters hidden, colour toggled.
    pub fn reset(&self) {
        self.offset.borrow_mut().set(TITLE_SLIDE_FROM);
        self.cascade.reset();
    }

    pub fn restart(&self) {
        debug!("title: restart");
        self.reset();
        self.start();
    }

    pub fn text(&self) -> &'static str {
        TITLE_TEXT
    }

    pub fn offset(&self, now: Duration) -> f32 {
        self.offset.borrow().value_at(now)
    }

    pub fn opacities(&self, now: Duration) -> Vec<f32> {
        self.cascade.opacities(now)
    }

    pub fn cascade(&self) -> &Cascade {
        &self.cascade
    }

    pub fn is_inverted(&self) -> bool {
        self.cascade.is_inverted()
    }
}

impl Listener for TitleWord {
    fn handle_event(&self, event: TimerEvent) {
        if reactions(event).contains(Reactions::TITLE_RESTART) {
            self.restart();
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

    fn setup() -> (Scheduler, TitleWord) {
        let scheduler = Scheduler::new();
        let title = TitleWord::new(scheduler.clone(), &TimelineConfig::default());
        (scheduler, title)
    }

    #[test]
    fn test_initial_state() {
        let (_, title) = setup();
        assert_eq!(title.offset(Duration::ZERO), TITLE_SLIDE_FROM);
        assert_eq!(title.opacities(Duration::ZERO), vec![0.0; 7]);
        assert!(!title.is_inverted());
    }

    #[test]
    fn test_start_reveals_last_character_first() {
        let (scheduler, title) = setup();
        title.start();

        scheduler.advance_to(Duration::ZERO);
        assert_eq!(title.cascade().target(6), 1.0);
        assert_eq!(title.cascade().target(0), 0.0);

        scheduler.advance_to(ms(600));
        assert_eq!(title.cascade().revealed(), 7);
        assert_eq!(title.offset(ms(1000)), 0.0);
        assert_eq!(title.opacities(ms(900)), vec![1.0; 7]);
    }

    #[test]
    fn test_restart_mid_flight() {
        let (scheduler, title) = setup();
        title.start();
        scheduler.advance_to(ms(250));
        assert_eq!(title.cascade().revealed(), 3);

        title.handle_event(TimerEvent::AtSecond(4));
        assert_eq!(title.cascade().target(4), 0.0);
        assert_eq!(title.offset(scheduler.now()), TITLE_SLIDE_FROM);
        assert!(title.is_inverted());

        // Steps from the first run would reveal index 3 at 300ms
        scheduler.advance_to(ms(300));
        assert_eq!(title.cascade().target(3), 0.0);
        assert_eq!(title.cascade().revealed(), 1);
    }

    #[test]
    fn test_back_to_back_restart_toggles_once() {
        let (scheduler, title) = setup();
        title.start();
        scheduler.advance_to(ms(3000));

        title.handle_event(TimerEvent::AtSecond(8));
        title.handle_event(TimerEvent::AtSecond(8));
        scheduler.advance_to(ms(3000));
        assert!(title.is_inverted());
        assert_eq!(title.cascade().revealed(), 1);
    }

    #[test]
    fn test_colour_alternates_per_restart() {
        let (scheduler, title) = setup();
        title.start();
        for (second, inverted) in [(4, true), (8, false), (12, true)] {
            scheduler.advance_to(Duration::from_secs(second));
            title.restart();
            assert_eq!(title.is_inverted(), inverted);
        }
    }
}
