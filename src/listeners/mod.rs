//! Listeners - Visual components reacting to timer events
//!
//! Each listener owns its own state and cascades and reacts to the events
//! of one [`EventChannel`]. Listeners never talk to each other; the only
//! exception is the "TO" word, which owns the stacked words it reveals.
//!
//! - **Orb** - Cumulative half-turn rotation
//! - **FlipBackground** - 3D flip of the circle, colour inversion
//! - **TitleWord** - "NO TIME": slide-in plus reverse character fade
//! - **ToStopWord** - "TO": forward fade, then starts the stacked words
//! - **StackedWords** - "STOP." "THINK." "EXIST." lift-up stack
//! - **SubtitleSet** - Five subtitles cascading in sequence
//!
//! # Pattern
//!
//! ```ignore
//! let orb = Mounted::new(&channel, Orb::new(scheduler.clone(), &config));
//! channel.publish(TimerEvent::AtSecond(3)); // orb starts turning
//! orb.rotation(scheduler.now());
//! ```
//!
//! The channel only holds a weak reference to a mounted listener: once the
//! listener is gone its handler does nothing.

use std::ops::Deref;
use std::rc::Rc;

use crate::timeline::{EventChannel, Subscription, TimerEvent};

pub mod flip;
pub mod orb;
pub mod stack;
pub mod subtitle;
pub mod title;
pub mod to_stop;

pub use flip::FlipBackground;
pub use orb::Orb;
pub use stack::StackedWords;
pub use subtitle::{Subtitle, SubtitleSet};
pub use title::TitleWord;
pub use to_stop::ToStopWord;

// =============================================================================
// LISTENER TRAIT
// =============================================================================

/// Something that reacts to timer events.
pub trait Listener {
    fn handle_event(&self, event: TimerEvent);
}

// =============================================================================
// MOUNTED LISTENER
// =============================================================================

/// A listener subscribed to a channel. Dropping it unsubscribes.
pub struct Mounted<L> {
    listener: Rc<L>,
    subscription: Subscription,
}

impl<L: Listener + 'static> Mounted<L> {
    /// Subscribe `listener` to `channel`.
    pub fn new(channel: &EventChannel, listener: L) -> Self {
        Self::from_rc(channel, Rc::new(listener))
    }

    /// Subscribe an already shared listener.
    pub fn from_rc(channel: &EventChannel, listener: Rc<L>) -> Self {
        let weak = Rc::downgrade(&listener);
        let subscription = channel.subscribe(move |event| {
            if let Some(listener) = weak.upgrade() {
                listener.handle_event(event);
            }
        });

        Self {
            listener,
            subscription,
        }
    }
}

impl<L> Mounted<L> {
    /// Shared handle to the listener.
    pub fn handle(&self) -> Rc<L> {
        self.listener.clone()
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_active()
    }

    /// Unsubscribe and hand back the listener.
    pub fn unmount(self) -> Rc<L> {
        let Mounted {
            listener,
            subscription,
        } = self;
        subscription.cancel();
        listener
    }
}

impl<L> Deref for Mounted<L> {
    type Target = L;

    fn deref(&self) -> &L {
        &self.listener
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    struct Counter {
        seen: Cell<usize>,
    }

    impl Listener for Counter {
        fn handle_event(&self, _event: TimerEvent) {
            self.seen.set(self.seen.get() + 1);
        }
    }

    #[test]
    fn test_mounted_receives_events() {
        let channel = EventChannel::new();
        let counter = Mounted::new(&channel, Counter::default());

        channel.publish(TimerEvent::AtSecond(1));
        channel.publish(TimerEvent::AtSecond(1));
        assert_eq!(counter.seen.get(), 2);
        assert!(counter.is_subscribed());
    }

    #[test]
    fn test_unmount_stops_events() {
        let channel = EventChannel::new();
        let counter = Mounted::new(&channel, Counter::default());
        channel.publish(TimerEvent::AtSecond(1));

        let counter = counter.unmount();
        channel.publish(TimerEvent::AtSecond(2));

        assert_eq!(counter.seen.get(), 1);
        assert_eq!(channel.subscriber_count(), 0);
    }

    #[test]
    fn test_unmounted_listener_does_not_animate() {
        let channel = EventChannel::new();
        let counter = Counter::default();

        channel.publish(TimerEvent::AtSecond(4));
        assert_eq!(counter.seen.get(), 0);
    }
}
