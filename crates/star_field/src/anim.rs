//! Tick-driven interpolation primitives.
//!
//! Scroll steps and flicker fades are both expressed as [`Tween`] values that
//! the host advances once per frame via [`crate::field::StarField::tick`].
//! Cancellation is dropping the tween; there are no callbacks to unhook.

/// Easing curve applied to a tween's normalized progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    #[default]
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
    SineInOut,
}

impl Easing {
    /// Maps linear progress `t` in [0, 1] onto the curve.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadIn => t * t,
            Easing::QuadOut => t * (2.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::SineInOut => 0.5 - 0.5 * (std::f32::consts::PI * t).cos(),
        }
    }
}

/// A scalar interpolation from `from` to `to` over `duration` seconds.
#[derive(Debug, Clone)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    pub duration: f32,
    pub easing: Easing,
    elapsed: f32,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            easing,
            elapsed: 0.0,
        }
    }

    /// Advances the tween by `dt` seconds and returns the current value.
    ///
    /// A non-positive duration completes on the first advance.
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.elapsed = if self.duration > 0.0 {
            (self.elapsed + dt.max(0.0)).min(self.duration)
        } else {
            self.duration
        };
        self.value()
    }

    /// Current value without advancing.
    pub fn value(&self) -> f32 {
        let t = if self.duration > 0.0 {
            self.elapsed / self.duration
        } else {
            1.0
        };
        self.from + (self.to - self.from) * self.easing.apply(t)
    }

    pub fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Rescales both endpoints, preserving progress. Used when the field is
    /// reflowed mid-animation.
    pub fn rescale(&mut self, ratio: f32) {
        self.from *= ratio;
        self.to *= ratio;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_endpoints_are_fixed() {
        for easing in [
            Easing::Linear,
            Easing::QuadIn,
            Easing::QuadOut,
            Easing::QuadInOut,
            Easing::SineInOut,
        ] {
            assert!((easing.apply(0.0)).abs() < 1e-6, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{easing:?} at 1");
        }
    }

    #[test]
    fn easing_is_monotonic_on_samples() {
        for easing in [
            Easing::Linear,
            Easing::QuadIn,
            Easing::QuadOut,
            Easing::QuadInOut,
            Easing::SineInOut,
        ] {
            let mut prev = easing.apply(0.0);
            for i in 1..=100 {
                let next = easing.apply(i as f32 / 100.0);
                assert!(next >= prev - 1e-6, "{easing:?} decreased at {i}");
                prev = next;
            }
        }
    }

    #[test]
    fn tween_advances_to_completion() {
        let mut tween = Tween::new(0.0, 10.0, 1.0, Easing::Linear);
        assert_eq!(tween.advance(0.25), 2.5);
        assert_eq!(tween.advance(0.25), 5.0);
        assert!(!tween.finished());
        assert_eq!(tween.advance(10.0), 10.0);
        assert!(tween.finished());
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        let mut tween = Tween::new(3.0, 7.0, 0.0, Easing::QuadOut);
        assert_eq!(tween.advance(0.0), 7.0);
        assert!(tween.finished());
    }

    #[test]
    fn rescale_preserves_progress() {
        let mut tween = Tween::new(0.0, 100.0, 1.0, Easing::Linear);
        tween.advance(0.5);
        tween.rescale(2.0);
        assert_eq!(tween.value(), 100.0);
        assert_eq!(tween.to, 200.0);
    }

    #[test]
    fn negative_dt_does_not_rewind() {
        let mut tween = Tween::new(0.0, 1.0, 1.0, Easing::Linear);
        tween.advance(0.5);
        assert_eq!(tween.advance(-0.25), 0.5);
    }
}
