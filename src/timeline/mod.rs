//! Timeline Module - Clock, event channel and scheduler
//!
//! ```text
//! Scheduler ──tick──▶ Clock ──TimerEvent──▶ EventChannel ──▶ listeners
//!     ▲                                                         │
//!     └──────────── delayed cascade steps ◀─────────────────────┘
//! ```
//!
//! - **Scheduler** - Single-threaded virtual-time task queue
//! - **Clock** - Repeating tick, bounded second counter
//! - **EventChannel** - Notify-on-every-write broadcast slot
//! - **Event** - `TimerEvent`, `event_for`, and the reaction table

pub mod channel;
pub mod clock;
pub mod event;
pub mod scheduler;

pub use channel::{EventChannel, EventHandler, Subscription};
pub use clock::Clock;
pub use event::{event_for, reactions, Reactions, TimerEvent};
pub use scheduler::{Scheduler, TaskId};
