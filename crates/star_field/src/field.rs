//! Star records, resize-stable layout, and the [`StarField`] facade.
//!
//! The facade owns the star list and the scroll/flicker components and is
//! the only thing that talks to the [`DisplayAdapter`]. The host drives it
//! with explicit calls: [`StarField::initialize`] once,
//! [`StarField::reflow`] on viewport changes, [`StarField::trigger_scroll`]
//! on whatever event advances the background, [`StarField::tick`] every
//! frame, and [`StarField::teardown`] at the end.
use glam::Vec2;
use rand::RngCore;
use tracing::{debug, info};

use crate::config::FieldConfig;
use crate::display::{DisplayAdapter, DisplayHandle};
use crate::error::{Error, Result};
use crate::events::{EventSink, FieldEvent, FieldEventKind};
use crate::flicker::FlickerScheduler;
use crate::placement::{lerp, place_stars, PlacementDomain, PlacementReport};
use crate::scroll::ScrollController;

/// Viewport changes smaller than this (in pixels) do not trigger a relayout.
const REFLOW_EPSILON: f32 = 0.01;

/// One placed star. Created during placement, mutated in place by reflow
/// (position) and flicker (opacity), destroyed only at teardown.
#[derive(Debug, Clone)]
pub struct Star {
    /// Size in pixels.
    pub size: f32,
    /// Resting opacity in [0, 1]; larger stars rest brighter.
    pub base_alpha: f32,
    /// Current opacity in [0, 1], perturbed by flicker.
    pub alpha: f32,
    /// Absolute position in field-local space. Valid until the next reflow;
    /// always derivable from `relative` and the current spread dimensions.
    pub position: Vec2,
    /// Resize-invariant position as a fraction of the spread extent.
    pub relative: Vec2,
    /// The host-side visual proxy.
    pub handle: DisplayHandle,
}

/// Resolved field dimensions for the current viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldState {
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Viewport width times `width_ratio`.
    pub field_width: f32,
    /// Viewport height times `height_ratio` times `scroll_height_multiplier`.
    /// This is also the total scrollable height.
    pub field_height: f32,
    pub spread_width: f32,
    pub spread_height: f32,
}

impl FieldState {
    pub fn total_scrollable_height(&self) -> f32 {
        self.field_height
    }
}

fn resolve_state(config: &FieldConfig, viewport_width: f32, viewport_height: f32) -> Result<FieldState> {
    if !viewport_width.is_finite()
        || !viewport_height.is_finite()
        || viewport_width <= 0.0
        || viewport_height <= 0.0
    {
        return Err(Error::InvalidViewport {
            width: viewport_width,
            height: viewport_height,
        });
    }

    let field_width = viewport_width * config.width_ratio;
    let field_height = viewport_height * config.height_ratio * config.scroll_height_multiplier;
    Ok(FieldState {
        viewport_width,
        viewport_height,
        field_width,
        field_height,
        spread_width: field_width * config.star_spread_multiplier,
        spread_height: field_height * config.star_spread_multiplier,
    })
}

/// The star-field engine: placement, layout, scroll, and flicker behind one
/// handle.
#[derive(Debug)]
pub struct StarField {
    config: FieldConfig,
    state: FieldState,
    stars: Vec<Star>,
    report: PlacementReport,
    scroll: ScrollController,
    flicker: FlickerScheduler,
    torn_down: bool,
}

impl StarField {
    /// Places stars for the given viewport and creates their visual proxies.
    ///
    /// Under-fill (fewer stars than requested) is not an error; inspect
    /// [`StarField::report`]. Errors come only from structurally invalid
    /// configs or viewports.
    pub fn initialize(
        config: FieldConfig,
        viewport_width: f32,
        viewport_height: f32,
        adapter: &mut dyn DisplayAdapter,
        rng: &mut dyn RngCore,
    ) -> Result<Self> {
        Self::initialize_with_events(config, viewport_width, viewport_height, adapter, rng, &mut ())
    }

    pub fn initialize_with_events(
        config: FieldConfig,
        viewport_width: f32,
        viewport_height: f32,
        adapter: &mut dyn DisplayAdapter,
        rng: &mut dyn RngCore,
        sink: &mut dyn EventSink,
    ) -> Result<Self> {
        config.validate()?;
        let state = resolve_state(&config, viewport_width, viewport_height)?;

        let domain = PlacementDomain::new(state.spread_width, state.spread_height);
        let (placed, report) = place_stars(&domain, &config, rng, sink);

        let stars: Vec<Star> = placed
            .into_iter()
            .map(|p| {
                let handle = adapter.create_visual(p.size, p.base_alpha);
                adapter.update_visual(handle, p.position.into(), p.base_alpha);
                Star {
                    size: p.size,
                    base_alpha: p.base_alpha,
                    alpha: p.base_alpha,
                    position: p.position,
                    relative: p.relative,
                    handle,
                }
            })
            .collect();

        info!(
            placed = report.placed,
            requested = report.requested,
            field_width = state.field_width,
            field_height = state.field_height,
            "star field initialized"
        );

        let scroll = ScrollController::new(&config);
        let flicker = FlickerScheduler::new(&config);
        Ok(Self {
            config,
            state,
            stars,
            report,
            scroll,
            flicker,
            torn_down: false,
        })
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn state(&self) -> &FieldState {
        &self.state
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Placement outcome of `initialize`.
    pub fn report(&self) -> PlacementReport {
        self.report
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll.current_offset()
    }

    pub fn target_scroll_offset(&self) -> f32 {
        self.scroll.target_offset()
    }

    pub fn is_scrolling(&self) -> bool {
        self.scroll.is_scrolling()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    fn world_position(&self, star: &Star) -> Vec2 {
        star.position + Vec2::new(0.0, self.scroll.current_offset())
    }

    /// Relayouts the field for a new viewport.
    ///
    /// Every star's absolute position is re-derived from its unchanged
    /// relative position; nothing is re-sampled or re-validated, so spacing
    /// may drift under extreme aspect-ratio changes. The scroll offset is
    /// rescaled so visual progress is preserved. Calling with dimensions
    /// within epsilon of the current ones is a no-op.
    pub fn reflow(
        &mut self,
        viewport_width: f32,
        viewport_height: f32,
        adapter: &mut dyn DisplayAdapter,
    ) -> Result<()> {
        self.reflow_with_events(viewport_width, viewport_height, adapter, &mut ())
    }

    pub fn reflow_with_events(
        &mut self,
        viewport_width: f32,
        viewport_height: f32,
        adapter: &mut dyn DisplayAdapter,
        sink: &mut dyn EventSink,
    ) -> Result<()> {
        if self.torn_down {
            return Err(Error::TornDown);
        }
        let new_state = resolve_state(&self.config, viewport_width, viewport_height)?;

        if (viewport_width - self.state.viewport_width).abs() <= REFLOW_EPSILON
            && (viewport_height - self.state.viewport_height).abs() <= REFLOW_EPSILON
        {
            return Ok(());
        }

        let height_ratio = new_state.field_height / self.state.field_height;
        self.scroll.rescale(height_ratio);

        let half_w = new_state.spread_width * 0.5;
        let half_h = new_state.spread_height * 0.5;
        self.state = new_state;

        for i in 0..self.stars.len() {
            let star = &self.stars[i];
            let position = Vec2::new(
                lerp(-half_w, half_w, star.relative.x),
                lerp(-half_h, half_h, star.relative.y),
            );
            self.stars[i].position = position;
            let world = self.world_position(&self.stars[i]);
            let star = &self.stars[i];
            adapter.update_visual(star.handle, world.into(), star.alpha);
        }

        debug!(
            field_width = self.state.field_width,
            field_height = self.state.field_height,
            "star field reflowed"
        );
        if sink.wants(FieldEventKind::Reflowed) {
            sink.send(FieldEvent::Reflowed {
                field_width: self.state.field_width,
                field_height: self.state.field_height,
            });
        }
        Ok(())
    }

    /// Advances the background by one animated step. Returns whether a step
    /// started; `false` means the trigger was ignored (already scrolling,
    /// scrolling disabled, or the field is torn down).
    pub fn trigger_scroll(&mut self) -> bool {
        self.trigger_scroll_with_events(&mut ())
    }

    pub fn trigger_scroll_with_events(&mut self, sink: &mut dyn EventSink) -> bool {
        if self.torn_down {
            return false;
        }
        self.scroll
            .trigger(self.state.total_scrollable_height(), sink)
    }

    /// Advances scroll and flicker by `dt` seconds and pushes the resulting
    /// visual updates through the adapter. Call once per rendered frame.
    pub fn tick(
        &mut self,
        dt: f32,
        adapter: &mut dyn DisplayAdapter,
        rng: &mut dyn RngCore,
    ) -> Result<()> {
        self.tick_with_events(dt, adapter, rng, &mut ())
    }

    pub fn tick_with_events(
        &mut self,
        dt: f32,
        adapter: &mut dyn DisplayAdapter,
        rng: &mut dyn RngCore,
        sink: &mut dyn EventSink,
    ) -> Result<()> {
        if self.torn_down {
            return Err(Error::TornDown);
        }

        // The scroll offset applies to every star at once.
        if let Some(offset) = self.scroll.advance(dt, sink) {
            for star in &self.stars {
                let world = star.position + Vec2::new(0.0, offset);
                adapter.update_visual(star.handle, world.into(), star.alpha);
            }
        }

        let writes = self.flicker.advance(dt, &self.stars, rng, sink);
        for (index, alpha) in writes {
            self.stars[index].alpha = alpha;
            let world = self.world_position(&self.stars[index]);
            let star = &self.stars[index];
            adapter.update_visual(star.handle, world.into(), alpha);
        }

        Ok(())
    }

    /// Cancels all animation state and releases every display handle.
    /// Idempotent; the field cannot be used afterwards.
    pub fn teardown(&mut self, adapter: &mut dyn DisplayAdapter) {
        if self.torn_down {
            return;
        }
        self.scroll.cancel();
        self.flicker.cancel();
        for star in self.stars.drain(..) {
            adapter.destroy_visual(star.handle);
        }
        self.torn_down = true;
        info!("star field torn down");
    }
}
