//! Subtitles - Small print typed out character by character.
//!
//! A [`Subtitle`] shows its characters instantly at forward delays once its
//! `begin` flag turns on. The [`SubtitleSet`] owns all five and chains them:
//! the lead subtitle and the first body line start together, every further
//! line waits for the previous body lines to finish typing.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use log::debug;

use super::Listener;
use crate::animation::{Cascade, CascadeTiming, DelayPolicy, Easing, Generation};
use crate::config::TimelineConfig;
use crate::timeline::{reactions, Reactions, Scheduler, TimerEvent};

pub const SUBTITLE_TEXTS: [&str; 5] = [
    "CLB 003",
    "LIFE SEEMINGLY FILLED",
    "WITH NEVER-ENDING TASKS.",
    "ORDERDESIGNUK",
    "X BM/000 325",
];

// =============================================================================
// SUBTITLE
// =============================================================================

/// One line of small print.
pub struct Subtitle {
    text: &'static str,
    begin: Cell<bool>,
    cascade: Cascade,
}

impl Subtitle {
    pub fn new(scheduler: Scheduler, text: &'static str, char_delay: Duration) -> Self {
        let cascade = Cascade::new(
            "subtitle",
            scheduler,
            text.chars().count(),
            CascadeTiming {
                step: char_delay,
                unit_duration: Duration::ZERO,
                policy: DelayPolicy::Forward,
                easing: Easing::Linear,
            },
        );

        Self {
            text,
            begin: Cell::new(false),
            cascade,
        }
    }

    /// Drive the `begin` flag; a `false -> true` change types the line.
    pub fn set_begin(&self, begin: bool) -> bool {
        let was = self.begin.replace(begin);
        if !was && begin {
            self.cascade.run();
            return true;
        }
        false
    }

    /// `begin` off, characters hidden, colour toggled.
    pub fn reset(&self) {
        self.begin.set(false);
        self.cascade.reset();
    }

    pub fn begin(&self) -> bool {
        self.begin.get()
    }

    pub fn text(&self) -> &'static str {
        self.text
    }

    pub fn len(&self) -> usize {
        self.cascade.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cascade.is_empty()
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

// =============================================================================
// SUBTITLE SET
// =============================================================================

/// The five subtitles and their start sequence.
pub struct SubtitleSet {
    lines: Vec<Rc<Subtitle>>,
    sequence: Generation,
    scheduler: Scheduler,
    char_delay: Duration,
}

impl SubtitleSet {
    pub fn new(scheduler: Scheduler, config: &TimelineConfig) -> Self {
        let lines = SUBTITLE_TEXTS
            .iter()
            .enumerate()
            .map(|(index, text)| {
                let delay = if index == 0 {
                    config.lead_subtitle_char_delay()
                } else {
                    config.subtitle_char_delay()
                };
                Rc::new(Subtitle::new(scheduler.clone(), text, delay))
            })
            .collect();

        Self {
            lines,
            sequence: Generation::new(),
            scheduler,
            char_delay: config.subtitle_char_delay(),
        }
    }

    /// Start delay of every line, relative to the start of a sequence.
    pub fn start_delays(&self) -> Vec<Duration> {
        let mut delays = Vec::with_capacity(self.lines.len());
        let mut cumulative = Duration::ZERO;
        for (index, line) in self.lines.iter().enumerate() {
            if index == 0 {
                delays.push(Duration::ZERO);
                continue;
            }
            delays.push(cumulative);
            cumulative += self.char_delay * line.len() as u32;
        }
        delays
    }

    /// Begin every line at its start delay.
    pub fn start_sequence(&self) {
        let token = self.sequence.bump();
        debug!("subtitles: sequence {token}");

        for (line, delay) in self.lines.iter().zip(self.start_delays()) {
            if delay.is_zero() {
                line.set_begin(true);
                continue;
            }
            let line = line.clone();
            self.sequence.schedule(&self.scheduler, delay, move || {
                line.set_begin(true);
            });
        }
    }

    pub fn reset_all(&self) {
        self.sequence.bump();
        for line in &self.lines {
            line.reset();
        }
    }

    pub fn restart(&self) {
        self.reset_all();
        self.start_sequence();
    }

    pub fn lines(&self) -> &[Rc<Subtitle>] {
        &self.lines
    }

    pub fn get(&self, index: usize) -> Option<&Subtitle> {
        self.lines.get(index).map(Rc::as_ref)
    }
}

impl Listener for SubtitleSet {
    fn handle_event(&self, event: TimerEvent) {
        if reactions(event).contains(Reactions::SUBTITLE_RESTART) {
            self.restart();
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
