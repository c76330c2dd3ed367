//! Screen - Composition root of the kinetic-typography loop
//!
//! Builds the scheduler, the event channel, the clock and every listener,
//! subscribes the listeners, and exposes one pull-based [`ScreenFrame`]
//! snapshot per frame.
//!
//! Listeners are subscribed in a fixed order: orb, flip, title, stacked
//! words, "TO", subtitles. Within one tick they react in that order.
//!
//! # Example
//!
//! ```ignore
//! let screen = Screen::new(TimelineConfig::default());
//! screen.on_appear();
//!
//! screen.advance_by(Duration::from_millis(16));
//! let frame = screen.frame();
//! ```

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use log::debug;

use crate::config::TimelineConfig;
use crate::listeners::{
    FlipBackground, Mounted, Orb, StackedWords, SubtitleSet, TitleWord, ToStopWord,
};
use crate::timeline::{Clock, EventChannel, Scheduler};

// =============================================================================
// FRAME SNAPSHOT
// =============================================================================

/// A word drawn character by character.
#[derive(Clone, Debug, PartialEq)]
pub struct WordFrame {
    pub text: &'static str,
    /// One opacity per character, in `[0, 1]`
    pub opacities: Vec<f32>,
    pub inverted: bool,
}

/// The lift-up stack behind "TO".
#[derive(Clone, Debug, PartialEq)]
pub struct StackFrame {
    pub visible: bool,
    /// Vertical offset in word heights
    pub offset: f32,
    pub words: &'static [&'static str],
    /// Opacity of each character of the first word
    pub first_word: Vec<f32>,
    pub inverted: bool,
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct ScreenFrame {
    pub now: Duration,
    pub second: u8,
    /// Orb rotation in degrees
    pub orb_rotation: f32,
    /// Circle flip angle in degrees
    pub flip_angle: f32,
    /// Background black, circle white
    pub inverted: bool,
    pub title: WordFrame,
    /// Horizontal slide-in offset of the title
    pub title_offset: f32,
    pub to: WordFrame,
    pub stack: StackFrame,
    pub subtitles: Vec<WordFrame>,
}

// =============================================================================
// SCREEN
// =============================================================================

pub struct Screen {
    config: TimelineConfig,
    scheduler: Scheduler,
    channel: EventChannel,
    clock: Clock,
    orb: Mounted<Orb>,
    flip: Mounted<FlipBackground>,
    title: Mounted<TitleWord>,
    stack: Mounted<StackedWords>,
    to_stop: Mounted<ToStopWord>,
    subtitles: Mounted<SubtitleSet>,
    visible: Cell<bool>,
}

impl Screen {
    pub fn new(config: TimelineConfig) -> Self {
        let scheduler = Scheduler::new();
        let channel = EventChannel::new();
        let clock = Clock::new(scheduler.clone(), channel.clone(), &config);

        let orb = Mounted::new(&channel, Orb::new(scheduler.clone(), &config));
        let flip = Mounted::new(&channel, FlipBackground::new(scheduler.clone(), &config));
        let title = Mounted::new(&channel, TitleWord::new(scheduler.clone(), &config));

        let stack = Rc::new(StackedWords::new(scheduler.clone(), &config));
        let stack = Mounted::from_rc(&channel, stack);
        let to_stop = Mounted::new(
            &channel,
            ToStopWord::new(scheduler.clone(), &config, stack.handle()),
        );

        let subtitles = Mounted::new(&channel, SubtitleSet::new(scheduler.clone(), &config));

        Self {
            config,
            scheduler,
            channel,
            clock,
            orb,
            flip,
            title,
            stack,
            to_stop,
            subtitles,
            visible: Cell::new(false),
        }
    }

    /// Start the clock and the opening reveals.
    pub fn on_appear(&self) {
        debug!("screen: appear at {:?}", self.scheduler.now());
        self.visible.set(true);
        self.clock.start();
        self.title.start();
        self.to_stop.start();
        self.subtitles.start_sequence();
    }

    /// Stop the clock. Steps already scheduled still run.
    pub fn on_disappear(&self) {
        debug!("screen: disappear at {:?}", self.scheduler.now());
        self.visible.set(false);
        self.clock.stop();
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    /// Run every task due up to `target`. Returns how many ran.
    pub fn advance_to(&self, target: Duration) -> usize {
        self.scheduler.advance_to(target)
    }

    pub fn advance_by(&self, delta: Duration) -> usize {
        self.scheduler.advance_by(delta)
    }

    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Snapshot at the scheduler's current time.
    pub fn frame(&self) -> ScreenFrame {
        self.frame_at(self.scheduler.now())
    }

    /// Snapshot with tweens sampled at `now`.
    pub fn frame_at(&self, now: Duration) -> ScreenFrame {
        let subtitles = self
            .subtitles
            .lines()
            .iter()
            .map(|line| WordFrame {
                text: line.text(),
                opacities: line.opacities(now),
                inverted: line.is_inverted(),
            })
            .collect();

        ScreenFrame {
            now,
            second: self.clock.second(),
            orb_rotation: self.orb.rotation(now),
            flip_angle: self.flip.flip_angle(now),
            inverted: self.flip.is_inverted(),
            title: WordFrame {
                text: self.title.text(),
                opacities: self.title.opacities(now),
                inverted: self.title.is_inverted(),
            },
            title_offset: self.title.offset(now),
            to: WordFrame {
                text: self.to_stop.text(),
                opacities: self.to_stop.opacities(now),
                inverted: self.to_stop.is_inverted(),
            },
            stack: StackFrame {
                visible: self.stack.is_visible(),
                offset: self.stack.offset(now),
                words: self.stack.words(),
                first_word: self.stack.first_word_opacities(now),
                inverted: self.stack.is_inverted(),
            },
            subtitles,
        }
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn channel(&self) -> &EventChannel {
        &self.channel
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn orb(&self) -> &Orb {
        &self.orb
    }

    pub fn flip(&self) -> &FlipBackground {
        &self.flip
    }

    pub fn title(&self) -> &TitleWord {
        &self.title
    }

    pub fn stack(&self) -> &StackedWords {
        &self.stack
    }

    pub fn to_stop(&self) -> &ToStopWord {
        &self.to_stop
    }

    pub fn subtitles(&self) -> &SubtitleSet {
        &self.subtitles
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new(TimelineConfig::default())
    }
}

// =============================================================================
// TESTS
// =============================================================================
