//! Step-wise scroll state machine with seamless wraparound.
//!
//! The controller owns a single field-level offset; it never touches
//! individual star records. One [`ScrollController::trigger`] starts one
//! animated step; triggers while a step is in flight are silently ignored.
use tracing::debug;

use crate::anim::{Easing, Tween};
use crate::config::FieldConfig;
use crate::events::{EventSink, FieldEvent, FieldEventKind};

/// Scroll state: idle, or animating one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollPhase {
    Idle,
    Scrolling,
}

/// Owns the virtual scroll offset and the in-flight step tween.
#[derive(Debug)]
pub struct ScrollController {
    enabled: bool,
    duration: f32,
    step_ratio: f32,
    easing: Easing,
    phase: ScrollPhase,
    current_offset: f32,
    target_offset: f32,
    tween: Option<Tween>,
}

impl ScrollController {
    pub fn new(config: &FieldConfig) -> Self {
        Self {
            enabled: config.enable_scroll,
            duration: config.scroll_duration,
            step_ratio: config.scroll_step_ratio,
            easing: config.scroll_easing,
            phase: ScrollPhase::Idle,
            current_offset: 0.0,
            target_offset: 0.0,
            tween: None,
        }
    }

    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    pub fn is_scrolling(&self) -> bool {
        self.phase == ScrollPhase::Scrolling
    }

    pub fn current_offset(&self) -> f32 {
        self.current_offset
    }

    pub fn target_offset(&self) -> f32 {
        self.target_offset
    }

    /// Starts one animated scroll step over a field of the given total
    /// scrollable height. Returns whether a step actually started.
    ///
    /// If the step would run past the end of the field, the anchor first
    /// jumps back to the start (the field content is self-similar over its
    /// full extent, so the jump is invisible) and the step animates from
    /// offset zero.
    pub fn trigger(&mut self, total_scrollable_height: f32, sink: &mut dyn EventSink) -> bool {
        if !self.enabled || self.is_scrolling() {
            if sink.wants(FieldEventKind::ScrollIgnored) {
                sink.send(FieldEvent::ScrollIgnored {
                    offset: self.current_offset,
                });
            }
            return false;
        }

        let step = total_scrollable_height * self.step_ratio;
        let wrap_epsilon = total_scrollable_height * 1e-4;

        if self.current_offset + step > total_scrollable_height + wrap_epsilon {
            debug!(
                from = self.current_offset,
                "scroll anchor wrapped to the start of the field"
            );
            if sink.wants(FieldEventKind::ScrollWrapped) {
                sink.send(FieldEvent::ScrollWrapped {
                    from_offset: self.current_offset,
                });
            }
            self.current_offset = 0.0;
        }

        self.target_offset = self.current_offset + step;
        self.tween = Some(Tween::new(
            self.current_offset,
            self.target_offset,
            self.duration,
            self.easing,
        ));
        self.phase = ScrollPhase::Scrolling;

        if sink.wants(FieldEventKind::ScrollStarted) {
            sink.send(FieldEvent::ScrollStarted {
                from: self.current_offset,
                to: self.target_offset,
            });
        }
        true
    }

    /// Advances the in-flight step by `dt` seconds. Returns the new offset
    /// if it changed, `None` while idle.
    pub fn advance(&mut self, dt: f32, sink: &mut dyn EventSink) -> Option<f32> {
        let tween = self.tween.as_mut()?;
        self.current_offset = tween.advance(dt);

        if tween.finished() {
            self.current_offset = self.target_offset;
            self.tween = None;
            self.phase = ScrollPhase::Idle;
            if sink.wants(FieldEventKind::ScrollFinished) {
                sink.send(FieldEvent::ScrollFinished {
                    offset: self.current_offset,
                });
            }
        }
        Some(self.current_offset)
    }

    /// Rescales all offsets after a reflow changed the field height,
    /// preserving visual scroll progress (and tween progress, if mid-step).
    pub fn rescale(&mut self, ratio: f32) {
        self.current_offset *= ratio;
        self.target_offset *= ratio;
        if let Some(tween) = self.tween.as_mut() {
            tween.rescale(ratio);
        }
    }

    /// Cancels any in-flight step, leaving the offset where it is.
    pub fn cancel(&mut self) {
        self.tween = None;
        self.phase = ScrollPhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::VecSink;

    const TOTAL: f32 = 1600.0;

    fn controller() -> ScrollController {
        ScrollController::new(&FieldConfig::default())
    }

    fn run_to_completion(scroll: &mut ScrollController, sink: &mut dyn EventSink) {
        for _ in 0..256 {
            if scroll.advance(1.0 / 60.0, sink).is_none() {
                return;
            }
        }
        panic!("scroll step did not complete");
    }

    #[test]
    fn trigger_while_scrolling_is_ignored() {
        let mut scroll = controller();
        let mut sink = VecSink::new();

        assert!(scroll.trigger(TOTAL, &mut sink));
        assert!(!scroll.trigger(TOTAL, &mut sink));

        assert_eq!(sink.count_of(FieldEventKind::ScrollStarted), 1);
        assert_eq!(sink.count_of(FieldEventKind::ScrollIgnored), 1);
        // The target moved exactly once.
        assert_eq!(scroll.target_offset(), TOTAL * 0.5);
    }

    #[test]
    fn two_steps_then_wraparound() {
        let mut scroll = controller();
        let mut sink = VecSink::new();

        assert_eq!(scroll.current_offset(), 0.0);

        assert!(scroll.trigger(TOTAL, &mut sink));
        run_to_completion(&mut scroll, &mut sink);
        assert_eq!(scroll.current_offset(), TOTAL * 0.5);

        assert!(scroll.trigger(TOTAL, &mut sink));
        run_to_completion(&mut scroll, &mut sink);
        assert_eq!(scroll.current_offset(), TOTAL);
        assert_eq!(sink.count_of(FieldEventKind::ScrollWrapped), 0);

        // Third step cannot fit: the anchor wraps to zero first.
        assert!(scroll.trigger(TOTAL, &mut sink));
        assert_eq!(sink.count_of(FieldEventKind::ScrollWrapped), 1);
        run_to_completion(&mut scroll, &mut sink);
        assert_eq!(scroll.current_offset(), TOTAL * 0.5);
    }

    #[test]
    fn offset_stays_bounded_over_1000_triggers() {
        let mut scroll = controller();

        for _ in 0..1000 {
            scroll.trigger(TOTAL, &mut ());
            run_to_completion(&mut scroll, &mut ());
            let offset = scroll.current_offset();
            assert!(
                (0.0..=TOTAL).contains(&offset),
                "offset {offset} escaped [0, {TOTAL}]"
            );
        }
    }

    #[test]
    fn disabled_scroll_ignores_triggers() {
        let config = FieldConfig::default().with_scroll_enabled(false);
        let mut scroll = ScrollController::new(&config);
        let mut sink = VecSink::new();

        assert!(!scroll.trigger(TOTAL, &mut sink));
        assert_eq!(sink.count_of(FieldEventKind::ScrollIgnored), 1);
        assert!(!scroll.is_scrolling());
    }

    #[test]
    fn rescale_preserves_progress_mid_step() {
        let mut scroll = controller();
        scroll.trigger(TOTAL, &mut ());
        scroll.advance(0.25, &mut ()); // half way through the 0.5s default step

        let before = scroll.current_offset();
        scroll.rescale(2.0);
        assert_eq!(scroll.current_offset(), before * 2.0);
        assert_eq!(scroll.target_offset(), TOTAL);

        run_to_completion(&mut scroll, &mut ());
        assert_eq!(scroll.current_offset(), TOTAL);
    }

    #[test]
    fn cancel_stops_the_step_in_place() {
        let mut scroll = controller();
        scroll.trigger(TOTAL, &mut ());
        scroll.advance(0.1, &mut ());
        let offset = scroll.current_offset();

        scroll.cancel();
        assert!(!scroll.is_scrolling());
        assert_eq!(scroll.current_offset(), offset);
        assert!(scroll.advance(1.0, &mut ()).is_none());
    }
}
