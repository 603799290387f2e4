//! Field configuration: sizing ratios, placement constraints, scroll and
//! flicker parameters.
use crate::anim::Easing;
use crate::error::{Error, Result};

/// Configuration for a star field, immutable for the lifetime of the field.
///
/// All spatial parameters are expressed relative to the viewport so a single
/// config works across screen sizes; [`crate::field::StarField::initialize`]
/// resolves them against concrete viewport dimensions.
#[non_exhaustive]
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldConfig {
    /// Field width as a multiple of the viewport width.
    pub width_ratio: f32,
    /// Base field height as a multiple of the viewport height.
    pub height_ratio: f32,
    /// Additional multiplier applied to the field height to extend the
    /// scrollable extent.
    pub scroll_height_multiplier: f32,
    /// Requested number of stars; the placed count may be lower under tight
    /// separation constraints.
    pub star_count: usize,
    /// Star size range in pixels (min, max).
    pub star_size_range: (f32, f32),
    /// Exponent applied to the uniform size draw; values above 1 skew the
    /// distribution toward small stars.
    pub size_bias: f32,
    /// Minimum edge-to-edge style distance between stars in pixels, before
    /// the per-star radius terms are added.
    pub min_star_distance: f32,
    /// Candidate positions tried per star before it is skipped.
    pub max_placement_attempts: usize,
    /// Multiplier applied to the field dimensions to get the star spread
    /// extent.
    pub star_spread_multiplier: f32,
    /// Whether [`crate::field::StarField::trigger_scroll`] does anything.
    pub enable_scroll: bool,
    /// Duration of one animated scroll step in seconds.
    pub scroll_duration: f32,
    /// Fraction of the total scrollable height covered per scroll step, in
    /// (0, 1].
    pub scroll_step_ratio: f32,
    /// Easing applied to the scroll interpolation.
    pub scroll_easing: Easing,
    /// Whether the flicker scheduler runs.
    pub enable_flicker: bool,
    /// Duration of each flicker fade leg (out, then back in) in seconds.
    pub fade_duration: f32,
    /// Random delay range between flicker bursts in seconds (min, max).
    pub flicker_delay_range: (f32, f32),
    /// Fraction of the star population perturbed per burst, in [0, 1].
    pub flicker_fraction: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width_ratio: 1.0,
            height_ratio: 2.0,
            scroll_height_multiplier: 1.0,
            star_count: 100,
            star_size_range: (2.0, 20.0),
            size_bias: 2.5,
            min_star_distance: 50.0,
            max_placement_attempts: 30,
            star_spread_multiplier: 1.0,
            enable_scroll: true,
            scroll_duration: 0.5,
            scroll_step_ratio: 0.5,
            scroll_easing: Easing::Linear,
            enable_flicker: true,
            fade_duration: 0.5,
            flicker_delay_range: (0.1, 0.5),
            flicker_fraction: 0.1,
        }
    }
}

impl FieldConfig {
    /// Creates a config with the default parameters and the given star count.
    pub fn new(star_count: usize) -> Self {
        Self {
            star_count,
            ..Default::default()
        }
    }

    /// Sets the field width/height ratios relative to the viewport.
    pub fn with_field_ratios(mut self, width_ratio: f32, height_ratio: f32) -> Self {
        self.width_ratio = width_ratio;
        self.height_ratio = height_ratio;
        self
    }

    /// Sets the scrollable-height multiplier.
    pub fn with_scroll_height_multiplier(mut self, multiplier: f32) -> Self {
        self.scroll_height_multiplier = multiplier;
        self
    }

    /// Sets the star size range in pixels.
    pub fn with_size_range(mut self, min: f32, max: f32) -> Self {
        self.star_size_range = (min, max);
        self
    }

    /// Sets the size-bias exponent.
    pub fn with_size_bias(mut self, size_bias: f32) -> Self {
        self.size_bias = size_bias;
        self
    }

    /// Sets the minimum separation distance in pixels.
    pub fn with_min_star_distance(mut self, min_star_distance: f32) -> Self {
        self.min_star_distance = min_star_distance;
        self
    }

    /// Sets the per-star placement attempt budget.
    pub fn with_max_placement_attempts(mut self, attempts: usize) -> Self {
        self.max_placement_attempts = attempts;
        self
    }

    /// Sets the star spread multiplier.
    pub fn with_spread_multiplier(mut self, multiplier: f32) -> Self {
        self.star_spread_multiplier = multiplier;
        self
    }

    /// Configures the scroll step: duration, step ratio, and easing.
    pub fn with_scroll(mut self, duration: f32, step_ratio: f32, easing: Easing) -> Self {
        self.scroll_duration = duration;
        self.scroll_step_ratio = step_ratio;
        self.scroll_easing = easing;
        self
    }

    /// Configures flicker: fade leg duration, delay range, and burst fraction.
    pub fn with_flicker(mut self, fade_duration: f32, delay_range: (f32, f32), fraction: f32) -> Self {
        self.fade_duration = fade_duration;
        self.flicker_delay_range = delay_range;
        self.flicker_fraction = fraction;
        self
    }

    /// Enables or disables scrolling.
    pub fn with_scroll_enabled(mut self, enabled: bool) -> Self {
        self.enable_scroll = enabled;
        self
    }

    /// Enables or disables flicker.
    pub fn with_flicker_enabled(mut self, enabled: bool) -> Self {
        self.enable_flicker = enabled;
        self
    }

    /// Validates the configuration, returning an error if structurally invalid.
    ///
    /// Degenerate-but-safe combinations (a `min_star_distance` too large for
    /// the spread area, an inverted size range) pass validation and result in
    /// an under-filled field instead; callers inspect
    /// [`crate::placement::PlacementReport`] to detect this.
    pub fn validate(&self) -> Result<()> {
        fn positive(name: &str, value: f32) -> Result<()> {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidConfig(format!("{name} must be > 0, got {value}")));
            }
            Ok(())
        }

        positive("width_ratio", self.width_ratio)?;
        positive("height_ratio", self.height_ratio)?;
        positive("star_spread_multiplier", self.star_spread_multiplier)?;
        positive("size_bias", self.size_bias)?;
        positive("scroll_duration", self.scroll_duration)?;
        positive("fade_duration", self.fade_duration)?;

        if !self.scroll_height_multiplier.is_finite() || self.scroll_height_multiplier < 1.0 {
            return Err(Error::InvalidConfig(format!(
                "scroll_height_multiplier must be >= 1, got {}",
                self.scroll_height_multiplier
            )));
        }
        if !self.min_star_distance.is_finite() || self.min_star_distance < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "min_star_distance must be >= 0, got {}",
                self.min_star_distance
            )));
        }
        if !self.star_size_range.0.is_finite() || !self.star_size_range.1.is_finite() {
            return Err(Error::InvalidConfig("star_size_range must be finite".into()));
        }
        if !self.scroll_step_ratio.is_finite()
            || self.scroll_step_ratio <= 0.0
            || self.scroll_step_ratio > 1.0
        {
            return Err(Error::InvalidConfig(format!(
                "scroll_step_ratio must be in (0, 1], got {}",
                self.scroll_step_ratio
            )));
        }
        if !self.flicker_fraction.is_finite()
            || !(0.0..=1.0).contains(&self.flicker_fraction)
        {
            return Err(Error::InvalidConfig(format!(
                "flicker_fraction must be in [0, 1], got {}",
                self.flicker_fraction
            )));
        }
        let (delay_min, delay_max) = self.flicker_delay_range;
        if !delay_min.is_finite() || !delay_max.is_finite() || delay_min < 0.0 || delay_max < delay_min {
            return Err(Error::InvalidConfig(format!(
                "flicker_delay_range must satisfy 0 <= min <= max, got ({delay_min}, {delay_max})"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(FieldConfig::default().validate().is_ok());
    }

    #[test]
    fn builder_sets_fields() {
        let config = FieldConfig::new(50)
            .with_field_ratios(1.5, 3.0)
            .with_size_range(1.0, 8.0)
            .with_min_star_distance(12.0)
            .with_scroll(0.25, 0.5, Easing::QuadInOut)
            .with_flicker(0.4, (0.2, 0.6), 0.2);

        assert_eq!(config.star_count, 50);
        assert_eq!(config.width_ratio, 1.5);
        assert_eq!(config.height_ratio, 3.0);
        assert_eq!(config.star_size_range, (1.0, 8.0));
        assert_eq!(config.min_star_distance, 12.0);
        assert_eq!(config.scroll_step_ratio, 0.5);
        assert_eq!(config.flicker_delay_range, (0.2, 0.6));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_ratios() {
        assert!(FieldConfig::default()
            .with_field_ratios(0.0, 2.0)
            .validate()
            .is_err());
        assert!(FieldConfig::default()
            .with_scroll_height_multiplier(0.5)
            .validate()
            .is_err());
        assert!(FieldConfig::default()
            .with_scroll(0.5, 1.5, Easing::Linear)
            .validate()
            .is_err());
        assert!(FieldConfig::default()
            .with_flicker(0.5, (0.5, 0.1), 0.1)
            .validate()
            .is_err());
        assert!(FieldConfig::default()
            .with_flicker(0.5, (0.1, 0.5), 1.5)
            .validate()
            .is_err());
    }

    #[test]
    fn degenerate_spacing_still_validates() {
        // Too-tight spacing under-fills instead of erroring.
        let config = FieldConfig::default()
            .with_min_star_distance(10_000.0)
            .with_size_range(20.0, 2.0);
        assert!(config.validate().is_ok());
    }
}
