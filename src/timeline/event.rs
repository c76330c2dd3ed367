//! Timer events and the event-to-reaction table.
//!
//! A [`TimerEvent`] is derived purely from the clock's second counter by
//! [`event_for`]. [`reactions`] turns an event into the set of things the
//! listeners should do, so the whole choreography lives in one table.

use std::fmt;

// =============================================================================
// TIMER EVENT
// =============================================================================

/// Event published by the clock on every tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TimerEvent {
    /// The counter reached this second of the loop.
    AtSecond(u8),
    /// Nothing happened (initial value, or an out-of-range second).
    #[default]
    NoEvent,
}

impl TimerEvent {
    /// The second carried by the event, if any.
    pub fn second(self) -> Option<u8> {
        match self {
            TimerEvent::AtSecond(second) => Some(second),
            TimerEvent::NoEvent => None,
        }
    }
}

impl fmt::Display for TimerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerEvent::AtSecond(second) => write!(f, "at-second({second})"),
            TimerEvent::NoEvent => f.write_str("no-event"),
        }
    }
}

/// Map a second counter value to its event.
///
/// Total and pure: any value in `0..=total` is `AtSecond(second)`, anything
/// else is `NoEvent`.
pub fn event_for(second: i64, total: u8) -> TimerEvent {
    if (0..=i64::from(total)).contains(&second) {
        TimerEvent::AtSecond(second as u8)
    } else {
        TimerEvent::NoEvent
    }
}

// =============================================================================
// REACTIONS
// =============================================================================

bitflags::bitflags! {
    /// What the listeners do in response to one event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Reactions: u16 {
        /// Orb snaps back to its base angle.
        const ORB_RESET = 1 << 0;
        /// Orb turns another half revolution.
        const ORB_SPIN = 1 << 1;
        /// Background circle flips around its top edge.
        const FLIP = 1 << 2;
        /// Background and circle swap colours.
        const COLOUR = 1 << 3;
        /// Title words hide and reveal again.
        const TITLE_RESTART = 1 << 4;
        /// Subtitles hide and cascade in again.
        const SUBTITLE_RESTART = 1 << 5;
        /// Stacked words start their reveal.
        const STACK_BEGIN = 1 << 6;
        /// Stacked words hide.
        const STACK_HIDE = 1 << 7;
    }
}

/// The choreography table.
pub fn reactions(event: TimerEvent) -> Reactions {
    match event {
        TimerEvent::AtSecond(2) => Reactions::ORB_RESET,
        TimerEvent::AtSecond(3) | TimerEvent::AtSecond(7) => {
            Reactions::ORB_SPIN | Reactions::FLIP | Reactions::STACK_BEGIN
        }
        TimerEvent::AtSecond(4) | TimerEvent::AtSecond(8) => {
            Reactions::COLOUR
                | Reactions::TITLE_RESTART
                | Reactions::SUBTITLE_RESTART
                | Reactions::STACK_HIDE
        }
        _ => Reactions::empty(),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_for_in_range() {
        for second in 0..=8 {
            assert_eq!(event_for(second, 8), TimerEvent::AtSecond(second as u8));
        }
    }

    #[test]
    fn test_event_for_out_of_range() {
        assert_eq!(event_for(-1, 8), TimerEvent::NoEvent);
        assert_eq!(event_for(9, 8), TimerEvent::NoEvent);
        assert_eq!(event_for(i64::MAX, 8), TimerEvent::NoEvent);
        assert_eq!(event_for(i64::MIN, 8), TimerEvent::NoEvent);
    }

    #[test]
    fn test_event_for_follows_total() {
        assert_eq!(event_for(12, 12), TimerEvent::AtSecond(12));
        assert_eq!(event_for(12, 8), TimerEvent::NoEvent);
    }

    #[test]
    fn test_second_accessor() {
        assert_eq!(TimerEvent::AtSecond(3).second(), Some(3));
        assert_eq!(TimerEvent::NoEvent.second(), None);
        assert_eq!(TimerEvent::default(), TimerEvent::NoEvent);
    }

    #[test]
    fn test_reaction_table() {
        assert_eq!(reactions(TimerEvent::AtSecond(2)), Reactions::ORB_RESET);
        assert!(reactions(TimerEvent::AtSecond(3)).contains(Reactions::ORB_SPIN | Reactions::FLIP));
        assert_eq!(reactions(TimerEvent::AtSecond(3)), reactions(TimerEvent::AtSecond(7)));
        assert_eq!(reactions(TimerEvent::AtSecond(4)), reactions(TimerEvent::AtSecond(8)));
        assert!(reactions(TimerEvent::AtSecond(8)).contains(Reactions::TITLE_RESTART));
        assert!(!reactions(TimerEvent::AtSecond(4)).contains(Reactions::FLIP));

        for quiet in [0, 1, 5, 6] {
            assert!(reactions(TimerEvent::AtSecond(quiet)).is_empty());
        }
        assert!(reactions(TimerEvent::NoEvent).is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(TimerEvent::AtSecond(4).to_string(), "at-second(4)");
        assert_eq!(TimerEvent::NoEvent.to_string(), "no-event");
    }
}
