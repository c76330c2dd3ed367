//! Event Channel - Broadcast slot for the current timer event
//!
//! One writer (the clock), many readers (the listeners). Unlike a signal,
//! the channel notifies on *every* publish, including a value equal to the
//! previous one: listeners restart their cascades per tick, not per change.
//!
//! # Re-entrancy
//!
//! Handlers run with no borrow of the channel held, so a handler may
//! subscribe, unsubscribe (itself or others) or read `current()`.
//!
//! - A handler added during a publish is not called for that publish
//! - A handler removed during a publish is not called afterwards
//!
//! # Example
//!
//! ```ignore
//! use spark_kinetic::timeline::{EventChannel, TimerEvent};
//!
//! let channel = EventChannel::new();
//! let subscription = channel.subscribe(|event| println!("got {event}"));
//!
//! channel.publish(TimerEvent::AtSecond(3));
//! channel.publish(TimerEvent::AtSecond(3)); // notifies again
//!
//! drop(subscription); // unsubscribes
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::event::TimerEvent;

/// Handler invoked for every published event.
pub type EventHandler = Rc<dyn Fn(TimerEvent)>;

// =============================================================================
// HANDLER REGISTRY
// =============================================================================

struct Registry {
    current: TimerEvent,
    handlers: Vec<(usize, EventHandler)>,
    next_id: usize,
}

impl Registry {
    fn new() -> Self {
        Self {
            current: TimerEvent::NoEvent,
            handlers: Vec::new(),
            next_id: 0,
        }
    }

    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn contains(&self, id: usize) -> bool {
        self.handlers.iter().any(|(handler_id, _)| *handler_id == id)
    }
}

// =============================================================================
// CHANNEL
// =============================================================================

/// Shared handle to the event slot. Clones publish to the same subscribers.
#[derive(Clone)]
pub struct EventChannel {
    registry: Rc<RefCell<Registry>>,
}

impl EventChannel {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry::new())),
        }
    }

    /// The last published event (`NoEvent` before the first publish).
    pub fn current(&self) -> TimerEvent {
        self.registry.borrow().current
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().handlers.len()
    }

    /// Store `event` and notify every subscriber, in subscription order.
    pub fn publish(&self, event: TimerEvent) {
        let snapshot: Vec<(usize, EventHandler)> = {
            let mut registry = self.registry.borrow_mut();
            registry.current = event;
            registry.handlers.clone()
        };

        for (id, handler) in snapshot {
            let live = self.registry.borrow().contains(id);
            if live {
                handler(event);
            }
        }
    }

    /// Subscribe to all future events.
    ///
    /// The returned [`Subscription`] unsubscribes when cancelled or dropped.
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(TimerEvent) + 'static,
    {
        let id = {
            let mut registry = self.registry.borrow_mut();
            let id = registry.next_id();
            registry.handlers.push((id, Rc::new(handler)));
            id
        };

        Subscription {
            registry: Rc::downgrade(&self.registry),
            id: Some(id),
        }
    }
}

impl Default for EventChannel {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// SUBSCRIPTION
// =============================================================================

/// Live subscription to an [`EventChannel`].
///
/// Holds only a weak reference, so a subscription never keeps the channel
/// alive.
pub struct Subscription {
    registry: Weak<RefCell<Registry>>,
    id: Option<usize>,
}

impl Subscription {
    /// Unsubscribe now. Safe to call from inside a handler.
    pub fn cancel(mut self) {
        self.detach();
    }

    /// Whether the handler is still registered.
    pub fn is_active(&self) -> bool {
        match (self.registry.upgrade(), self.id) {
            (Some(registry), Some(id)) => registry.borrow().contains(id),
            _ => false,
        }
    }

    fn detach(&mut self) {
        let Some(id) = self.id.take() else {
            return;
        };
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        // Dropped after the borrow ends: the handler may own other subscriptions.
        let removed = {
            let mut registry = registry.borrow_mut();
            registry
                .handlers
                .iter()
                .position(|(handler_id, _)| *handler_id == id)
                .map(|index| registry.handlers.remove(index))
        };
        drop(removed);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.detach();
    }
}

// =============================================================================
// TESTS
// =============================================================================
