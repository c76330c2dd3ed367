//! Tweens - Time-based interpolation of one scalar
//!
//! Every animated value on the screen (opacity, rotation, offset) is a
//! [`Tween`]: the committed target plus enough information to interpolate
//! toward it. Readers pull `value_at(now)` once per frame.

use std::time::Duration;

// =============================================================================
// EASING
// =============================================================================

/// Easing curve applied to linear progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    Linear,
    /// Slow start (quadratic)
    EaseIn,
    /// Slow start and end (quadratic in, quadratic out)
    #[default]
    EaseInOut,
}

impl Easing {
    /// Map linear progress `t` in `[0, 1]` onto the curve.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u / 2.0
                }
            }
        }
    }
}

// =============================================================================
// TWEEN
// =============================================================================

/// A scalar moving from `from` to `to` over `duration`, starting at `start`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    start: Duration,
    duration: Duration,
    easing: Easing,
}

impl Tween {
    /// A value that does not move.
    pub const fn fixed(value: f32) -> Self {
        Self {
            from: value,
            to: value,
            start: Duration::ZERO,
            duration: Duration::ZERO,
            easing: Easing::Linear,
        }
    }

    /// Animate from `from` to `to`, beginning at `start`.
    pub fn new(from: f32, to: f32, start: Duration, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            start,
            duration,
            easing,
        }
    }

    /// The committed end value.
    pub fn target(&self) -> f32 {
        self.to
    }

    /// Linear progress in `[0, 1]`.
    pub fn progress(&self, now: Duration) -> f32 {
        if self.duration.is_zero() || now >= self.start + self.duration {
            return 1.0;
        }
        if now <= self.start {
            return 0.0;
        }
        (now - self.start).as_secs_f32() / self.duration.as_secs_f32()
    }

    /// Interpolated value at `now`.
    pub fn value_at(&self, now: Duration) -> f32 {
        let eased = self.easing.apply(self.progress(now));
        self.from + (self.to - self.from) * eased
    }

    /// Whether the value has reached its target at `now`.
    pub fn is_settled(&self, now: Duration) -> bool {
        self.progress(now) >= 1.0
    }

    /// Jump to `value` without animating.
    pub fn set(&mut self, value: f32) {
        *self = Self::fixed(value);
    }

    /// Animate to `to`, continuing from wherever the value is at `now`.
    pub fn retarget(&mut self, now: Duration, to: f32, duration: Duration, easing: Easing) {
        let from = self.value_at(now);
        *self = Self::new(from, to, now, duration, easing);
    }
}

impl Default for Tween {
    fn default() -> Self {
        Self::fixed(0.0)
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

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::EaseIn, Easing::EaseInOut] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            assert_eq!(easing.apply(-3.0), 0.0);
            assert_eq!(easing.apply(7.0), 1.0);
        }
    }

    #[test]
    fn test_easing_shapes() {
        assert_eq!(Easing::Linear.apply(0.25), 0.25);
        assert!(Easing::EaseIn.apply(0.25) < 0.25);
        assert_eq!(Easing::EaseInOut.apply(0.5), 0.5);
        assert!(Easing::EaseInOut.apply(0.25) < 0.25);
        assert!(Easing::EaseInOut.apply(0.75) > 0.75);
    }

    #[test]
    fn test_fixed() {
        let tween = Tween::fixed(-45.0);
        assert_eq!(tween.value_at(Duration::ZERO), -45.0);
        assert_eq!(tween.value_at(ms(10_000)), -45.0);
        assert!(tween.is_settled(Duration::ZERO));
    }

    #[test]
    fn test_interpolates_between_start_and_end() {
        let tween = Tween::new(0.0, 1.0, ms(1000), ms(300), Easing::Linear);
        assert_eq!(tween.value_at(ms(500)), 0.0);
        assert_eq!(tween.value_at(ms(1000)), 0.0);
        assert!((tween.value_at(ms(1150)) - 0.5).abs() < 1e-4);
        assert_eq!(tween.value_at(ms(1300)), 1.0);
        assert!(tween.is_settled(ms(1300)));
        assert!(!tween.is_settled(ms(1299)));
    }

    #[test]
    fn test_retarget_continues_from_current_value() {
        let mut tween = Tween::new(0.0, 100.0, Duration::ZERO, ms(1000), Easing::Linear);
        tween.retarget(ms(500), 0.0, ms(1000), Easing::Linear);

        assert!((tween.value_at(ms(500)) - 50.0).abs() < 1e-3);
        assert_eq!(tween.target(), 0.0);
        assert_eq!(tween.value_at(ms(1500)), 0.0);
    }

    #[test]
    fn test_zero_duration_is_instant() {
        let tween = Tween::new(0.0, 1.0, ms(40), Duration::ZERO, Easing::EaseInOut);
        assert_eq!(tween.value_at(ms(40)), 1.0);
    }
}
