//! # spark-kinetic
//!
//! Timer-driven kinetic typography for the terminal.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for the
//! reactive second counter and [crossterm](https://docs.rs/crossterm) for output.
//!
//! ## Architecture
//!
//! One clock ticks once per second and walks a bounded counter `1..=8`. Every
//! tick becomes a [`TimerEvent`] published on an [`EventChannel`]; independent
//! listeners (orb, flip background, title, "TO", stacked words, subtitles)
//! react by scheduling per-character cascades on a single-threaded
//! [`Scheduler`]. Restarts bump a generation token so stale steps never land.
//!
//! ```text
//! Scheduler → Clock → EventChannel → listeners → cascades → Screen::frame → paint → DiffRenderer
//! ```
//!
//! Time is virtual: the scheduler only moves when driven, so the whole
//! loop is testable without sleeping.
//!
//! ## Modules
//!
//! - [`config`] - Timing constants, TOML loading
//! - [`timeline`] - Scheduler, clock, event channel, reaction table
//! - [`animation`] - Tweens, easing, generation-guarded cascades
//! - [`listeners`] - The visual components
//! - [`screen`] - Composition root and frame snapshot
//! - [`types`] - Colours, attributes, cells
//! - [`renderer`] - Frame buffer, painting, diff rendering
//! - [`pipeline`] - Terminal mount and render loop

pub mod animation;
pub mod config;
pub mod listeners;
pub mod pipeline;
pub mod renderer;
pub mod screen;
pub mod timeline;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::{ConfigError, TimelineConfig};

pub use timeline::{
    event_for, reactions, Clock, EventChannel, Reactions, Scheduler, Subscription, TaskId,
    TimerEvent,
};

pub use animation::{Cascade, CascadeTiming, DelayPolicy, Easing, Generation, Tween};

pub use listeners::{
    FlipBackground, Listener, Mounted, Orb, StackedWords, Subtitle, SubtitleSet, TitleWord,
    ToStopWord,
};

pub use screen::{Screen, ScreenFrame, StackFrame, WordFrame};

pub use renderer::{paint, DiffRenderer, FrameBuffer};

pub use pipeline::{mount, run, tick, unmount, MountHandle};
