//! Periodic opacity perturbation of a random star subset.
//!
//! The scheduler waits a random delay, picks a burst of stars by uniform
//! index (with replacement; duplicate picks race, last write wins), and fades
//! each one to zero and back to its base opacity. It only ever produces
//! opacity writes; positions, sizes, and identities are untouched.
use rand::RngCore;

use crate::anim::{Easing, Tween};
use crate::config::FieldConfig;
use crate::events::{EventSink, FieldEvent, FieldEventKind};
use crate::field::Star;
use crate::placement::{rand01, rand_range};

/// Stars at or below this opacity are left out of a burst.
const VISIBLE_ALPHA_THRESHOLD: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlickerPhase {
    FadeOut,
    FadeIn,
}

#[derive(Debug)]
struct FlickerAnim {
    star: usize,
    base_alpha: f32,
    phase: FlickerPhase,
    tween: Tween,
}

/// Independent flicker timeline, advanced once per frame.
#[derive(Debug)]
pub struct FlickerScheduler {
    enabled: bool,
    fade_duration: f32,
    delay_range: (f32, f32),
    fraction: f32,
    /// Seconds until the next burst; drawn lazily so construction needs no RNG.
    next_delay: Option<f32>,
    active: Vec<FlickerAnim>,
}

impl FlickerScheduler {
    pub fn new(config: &FieldConfig) -> Self {
        Self {
            enabled: config.enable_flicker,
            fade_duration: config.fade_duration,
            delay_range: config.flicker_delay_range,
            fraction: config.flicker_fraction,
            next_delay: None,
            active: Vec::new(),
        }
    }

    /// Number of in-flight fade animations.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Advances the timeline by `dt` seconds and returns the opacity writes
    /// to apply, in application order (later entries win on conflicts).
    pub fn advance(
        &mut self,
        dt: f32,
        stars: &[Star],
        rng: &mut dyn RngCore,
        sink: &mut dyn EventSink,
    ) -> Vec<(usize, f32)> {
        if !self.enabled || stars.is_empty() {
            return Vec::new();
        }

        let mut delay = self
            .next_delay
            .unwrap_or_else(|| rand_range(rng, self.delay_range.0, self.delay_range.1));
        delay -= dt;
        if delay <= 0.0 {
            // At most one burst per tick: a zero delay fires again next
            // frame instead of spinning within this one.
            self.start_burst(stars, rng, sink);
            delay = rand_range(rng, self.delay_range.0, self.delay_range.1);
        }
        self.next_delay = Some(delay);

        let mut writes = Vec::with_capacity(self.active.len());
        for anim in &mut self.active {
            let value = anim.tween.advance(dt);
            writes.push((anim.star, value));

            if anim.tween.finished() && anim.phase == FlickerPhase::FadeOut {
                anim.phase = FlickerPhase::FadeIn;
                anim.tween = Tween::new(0.0, anim.base_alpha, self.fade_duration, Easing::Linear);
            }
        }
        self.active
            .retain(|anim| !(anim.phase == FlickerPhase::FadeIn && anim.tween.finished()));

        writes
    }

    fn start_burst(&mut self, stars: &[Star], rng: &mut dyn RngCore, sink: &mut dyn EventSink) {
        let count = ((stars.len() as f32 * self.fraction).floor() as usize).max(1);

        let mut started = Vec::new();
        for _ in 0..count {
            let index = ((rand01(rng) * stars.len() as f32) as usize).min(stars.len() - 1);
            let star = &stars[index];
            if star.alpha <= VISIBLE_ALPHA_THRESHOLD {
                continue;
            }
            self.active.push(FlickerAnim {
                star: index,
                base_alpha: star.base_alpha,
                phase: FlickerPhase::FadeOut,
                tween: Tween::new(star.alpha, 0.0, self.fade_duration, Easing::Linear),
            });
            started.push(index);
        }

        if !started.is_empty() && sink.wants(FieldEventKind::FlickerBurst) {
            sink.send(FieldEvent::FlickerBurst {
                star_indices: started,
            });
        }
    }

    /// Drops all in-flight fades and the pending delay.
    pub fn cancel(&mut self) {
        self.active.clear();
        self.next_delay = None;
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::display::DisplayHandle;
    use crate::events::VecSink;

    fn star(index: u64, alpha: f32) -> Star {
        Star {
            size: 4.0,
            base_alpha: alpha,
            alpha,
            position: Vec2::ZERO,
            relative: Vec2::new(0.5, 0.5),
            handle: DisplayHandle::new(index),
        }
    }

    fn scheduler(fraction: f32) -> FlickerScheduler {
        FlickerScheduler::new(
            &FieldConfig::default().with_flicker(0.2, (0.1, 0.1), fraction),
        )
    }

    #[test]
    fn burst_size_is_floor_of_fraction_with_minimum_one() {
        let stars: Vec<Star> = (0..40).map(|i| star(i, 0.8)).collect();
        let mut rng = StdRng::seed_from_u64(5);
        let mut sink = VecSink::new();

        // fraction 0.1 of 40 stars -> 4 per burst
        let mut flicker = scheduler(0.1);
        flicker.advance(0.1, &stars, &mut rng, &mut sink);
        assert_eq!(flicker.active_count(), 4);

        // fraction 0.0 still flickers one star per burst
        let mut flicker = scheduler(0.0);
        flicker.advance(0.1, &stars, &mut rng, &mut sink);
        assert_eq!(flicker.active_count(), 1);
    }

    #[test]
    fn dim_stars_are_skipped() {
        let stars: Vec<Star> = (0..10).map(|i| star(i, 0.05)).collect();
        let mut rng = StdRng::seed_from_u64(9);

        let mut flicker = scheduler(1.0);
        let writes = flicker.advance(0.2, &stars, &mut rng, &mut ());
        assert!(writes.is_empty());
        assert_eq!(flicker.active_count(), 0);
    }

    #[test]
    fn full_cycle_returns_to_base_alpha() {
        let stars: Vec<Star> = (0..8).map(|i| star(i, 0.9)).collect();
        let mut rng = StdRng::seed_from_u64(21);
        // One star per burst, 0.5s between bursts, 0.2s per fade leg: the
        // first cycle finishes before the second burst can start.
        let mut flicker = FlickerScheduler::new(
            &FieldConfig::default().with_flicker(0.2, (0.5, 0.5), 0.0),
        );

        let mut last: Vec<(usize, f32)> = Vec::new();
        for _ in 0..48 {
            let writes = flicker.advance(0.02, &stars, &mut rng, &mut ());
            if !writes.is_empty() {
                last = writes;
            }
        }

        // The final write of a completed cycle restores the base opacity.
        let (_, alpha) = *last.last().expect("at least one flicker ran");
        assert!((alpha - 0.9).abs() < 1e-4);
    }

    #[test]
    fn writes_dip_to_zero_between_legs() {
        let stars: Vec<Star> = vec![star(0, 1.0)];
        let mut rng = StdRng::seed_from_u64(3);
        let mut flicker = scheduler(1.0);

        let mut min_alpha = f32::MAX;
        for _ in 0..200 {
            for (_, alpha) in flicker.advance(0.01, &stars, &mut rng, &mut ()) {
                min_alpha = min_alpha.min(alpha);
                assert!((0.0..=1.0).contains(&alpha));
            }
        }
        assert!(min_alpha <= 0.05, "fade never got near zero: {min_alpha}");
    }

    #[test]
    fn disabled_scheduler_produces_nothing() {
        let config = FieldConfig::default().with_flicker_enabled(false);
        let mut flicker = FlickerScheduler::new(&config);
        let stars: Vec<Star> = vec![star(0, 1.0)];
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..100 {
            assert!(flicker.advance(0.1, &stars, &mut rng, &mut ()).is_empty());
        }
    }

    #[test]
    fn cancel_drops_in_flight_fades() {
        let stars: Vec<Star> = (0..10).map(|i| star(i, 0.8)).collect();
        let mut rng = StdRng::seed_from_u64(2);
        let mut flicker = scheduler(1.0);

        flicker.advance(0.2, &stars, &mut rng, &mut ());
        assert!(flicker.active_count() > 0);

        flicker.cancel();
        assert_eq!(flicker.active_count(), 0);
    }

    #[test]
    fn zero_delay_range_fires_one_burst_per_tick() {
        let stars: Vec<Star> = (0..10).map(|i| star(i, 0.8)).collect();
        let mut rng = StdRng::seed_from_u64(13);
        let mut flicker = FlickerScheduler::new(
            &FieldConfig::default().with_flicker(0.2, (0.0, 0.0), 0.0),
        );

        flicker.advance(1.0 / 60.0, &stars, &mut rng, &mut ());
        assert_eq!(flicker.active_count(), 1);
        flicker.advance(1.0 / 60.0, &stars, &mut rng, &mut ());
        assert_eq!(flicker.active_count(), 2);

        // One new fade per tick, each lasting 0.4s (24 ticks): the in-flight
        // set stays bounded instead of exploding.
        for _ in 0..120 {
            flicker.advance(1.0 / 60.0, &stars, &mut rng, &mut ());
        }
        assert!(
            flicker.active_count() <= 26,
            "active fades grew unbounded: {}",
            flicker.active_count()
        );
    }

    #[test]
    fn burst_event_lists_started_stars() {
        let stars: Vec<Star> = (0..20).map(|i| star(i, 0.7)).collect();
        let mut rng = StdRng::seed_from_u64(17);
        let mut sink = VecSink::new();
        let mut flicker = scheduler(0.25);

        flicker.advance(0.2, &stars, &mut rng, &mut sink);

        let indices = sink
            .as_slice()
            .iter()
            .find_map(|event| match event {
                FieldEvent::FlickerBurst { star_indices } => Some(star_indices.clone()),
                _ => None,
            })
            .expect("burst event emitted");
        assert_eq!(indices.len(), 5);
        assert!(indices.iter().all(|&i| i < 20));
    }
}
