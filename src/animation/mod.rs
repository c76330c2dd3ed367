//! Animation Module - Tweens and generation-guarded cascades
//!
//! - **Tween** - One scalar interpolated toward a committed target
//! - **Cascade** - Per-unit reveal with forward/reverse delays, chained
//!   follow-ups and stale-step protection

pub mod cascade;
pub mod tween;

pub use cascade::{Cascade, CascadeState, CascadeTiming, DelayPolicy, Generation};
pub use tween::{Easing, Tween};
