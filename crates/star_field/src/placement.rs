//! Constrained placement: size-biased rejection sampling under a
//! minimum-separation constraint.
//!
//! [`place_stars`] is a pure function of the domain, the config, and an
//! injected RNG, so placements are reproducible from a seed. The separation
//! check is O(placed) per candidate, O(n²) over a full run; fine for the
//! tens-to-low-hundreds of stars this targets. A field with thousands of
//! stars would want a spatial hash here instead.
use glam::Vec2;
use rand::RngCore;
use tracing::warn;

use crate::config::FieldConfig;
use crate::events::{EventSink, FieldEvent, FieldEventKind};

/// Generate a random float in the range [0, 1].
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() as f32) / ((u32::MAX as f32) + 1.0)
}

/// Generate a random float in the range [min, max).
#[inline]
pub(crate) fn rand_range(rng: &mut dyn RngCore, min: f32, max: f32) -> f32 {
    min + rand01(rng) * (max - min)
}

/// Linear interpolation between `a` and `b`.
#[inline]
pub(crate) fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// The centered rectangular extent stars are scattered over.
#[derive(Debug, Clone, Copy)]
pub struct PlacementDomain {
    /// Spread extent along x; positions land in [-width/2, width/2].
    pub spread_width: f32,
    /// Spread extent along y; positions land in [-height/2, height/2].
    pub spread_height: f32,
}

impl PlacementDomain {
    pub fn new(spread_width: f32, spread_height: f32) -> Self {
        Self {
            spread_width,
            spread_height,
        }
    }

    fn is_degenerate(&self) -> bool {
        !self.spread_width.is_finite()
            || !self.spread_height.is_finite()
            || self.spread_width <= 0.0
            || self.spread_height <= 0.0
    }
}

/// A successfully placed star, before any display proxy exists.
#[derive(Debug, Clone)]
pub struct PlacedStar {
    /// Star size in pixels.
    pub size: f32,
    /// Resting opacity, derived from size plus jitter, in [0, 1].
    pub base_alpha: f32,
    /// Position in field-local space, centered on the field origin.
    pub position: Vec2,
    /// Position as a fraction of the spread extent, in [0, 1]². This is the
    /// resize-invariant representation; it is computed once and never changes.
    pub relative: Vec2,
}

/// Outcome of a placement run. Under-fill is reported, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementReport {
    /// Stars requested by the config.
    pub requested: usize,
    /// Stars actually placed.
    pub placed: usize,
    /// Outer draws consumed (each draw is one size sample plus up to
    /// `max_placement_attempts` position candidates).
    pub outer_draws: usize,
}

impl PlacementReport {
    /// Whether fewer stars were placed than requested.
    pub fn under_filled(&self) -> bool {
        self.placed < self.requested
    }
}

/// Checks the separation invariant: the candidate must keep at least
/// `min_distance + candidate.size/2 + other.size/2` from every placed star.
fn separation_ok(candidate: Vec2, size: f32, min_distance: f32, placed: &[PlacedStar]) -> bool {
    for star in placed {
        let threshold = (min_distance + size * 0.5 + star.size * 0.5).max(0.0);
        if candidate.distance_squared(star.position) < threshold * threshold {
            return false;
        }
    }
    true
}

/// Scatters up to `config.star_count` stars over `domain`.
///
/// Each star draws its size from `uniform(0,1)^size_bias` mapped onto the
/// configured size range (bias above 1 favors small stars), then tries up to
/// `max_placement_attempts` uniform positions before being skipped. The
/// outer loop gives up after `star_count * 2` draws, so tight constraints
/// degrade to an under-filled field rather than a hang.
pub fn place_stars(
    domain: &PlacementDomain,
    config: &FieldConfig,
    rng: &mut dyn RngCore,
    sink: &mut dyn EventSink,
) -> (Vec<PlacedStar>, PlacementReport) {
    let requested = config.star_count;

    if domain.is_degenerate() || requested == 0 {
        return (
            Vec::new(),
            PlacementReport {
                requested,
                placed: 0,
                outer_draws: 0,
            },
        );
    }

    if sink.wants(FieldEventKind::PlacementStarted) {
        sink.send(FieldEvent::PlacementStarted { requested });
    }

    let (size_min, size_max) = config.star_size_range;
    let half_w = domain.spread_width * 0.5;
    let half_h = domain.spread_height * 0.5;
    let draw_budget = requested * 2;

    let mut placed: Vec<PlacedStar> = Vec::with_capacity(requested);
    let mut outer_draws = 0usize;

    while placed.len() < requested && outer_draws < draw_budget {
        outer_draws += 1;

        let size_factor = rand01(rng).powf(config.size_bias);
        let size = lerp(size_min, size_max, size_factor);

        let mut accepted: Option<Vec2> = None;
        for _ in 0..config.max_placement_attempts {
            let candidate = Vec2::new(
                rand_range(rng, -half_w, half_w),
                rand_range(rng, -half_h, half_h),
            );
            if separation_ok(candidate, size, config.min_star_distance, &placed) {
                accepted = Some(candidate);
                break;
            }
        }

        // Best-effort policy: an exhausted attempt budget skips this star
        // without retrying the outer draw.
        let Some(position) = accepted else {
            if sink.wants(FieldEventKind::StarSkipped) {
                sink.send(FieldEvent::StarSkipped {
                    outer_draw: outer_draws,
                });
            }
            continue;
        };

        let relative = Vec2::new(
            (position.x + half_w) / domain.spread_width,
            (position.y + half_h) / domain.spread_height,
        );

        let alpha_base = lerp(0.3, 1.0, size_factor);
        let alpha_variation = (1.0 - size_factor) * 0.5;
        let base_alpha = (alpha_base + rand_range(rng, -alpha_variation, alpha_variation))
            .clamp(0.0, 1.0);

        if sink.wants(FieldEventKind::StarPlaced) {
            sink.send(FieldEvent::StarPlaced {
                index: placed.len(),
                position,
                size,
            });
        }

        placed.push(PlacedStar {
            size,
            base_alpha,
            position,
            relative,
        });
    }

    let report = PlacementReport {
        requested,
        placed: placed.len(),
        outer_draws,
    };

    if report.under_filled() {
        warn!(
            "Could only place {} of {} stars under the separation constraint.",
            report.placed, report.requested
        );
        if sink.wants(FieldEventKind::Warning) {
            sink.send(FieldEvent::Warning {
                context: "placement".into(),
                message: format!(
                    "Could only place {} of {} stars under the separation constraint",
                    report.placed, report.requested
                ),
            });
        }
    }
    if sink.wants(FieldEventKind::PlacementFinished) {
        sink.send(FieldEvent::PlacementFinished { report });
    }

    (placed, report)
}
