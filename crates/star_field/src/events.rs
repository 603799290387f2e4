//! Event types and sinks for observing field lifecycle.
//!
//! This module defines [`FieldEvent`] and a set of sinks to emit, collect, or
//! forward events while placing, reflowing, scrolling, or flickering via
//! [`crate::field::StarField`]. The `*_with_events` method variants accept
//! any [`EventSink`]; the plain variants route through the no-op `()` sink.
use glam::Vec2;

use crate::placement::PlacementReport;

/// Discriminant for [`FieldEvent`], used by [`EventSink::wants`] to skip
/// building events nobody listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEventKind {
    PlacementStarted,
    StarPlaced,
    StarSkipped,
    PlacementFinished,
    Reflowed,
    ScrollStarted,
    ScrollIgnored,
    ScrollWrapped,
    ScrollFinished,
    FlickerBurst,
    Warning,
}

/// Describes events emitted by field operations.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum FieldEvent {
    /// Emitted when the placement loop starts.
    PlacementStarted {
        /// Requested star count.
        requested: usize,
    },

    /// Emitted for each successfully placed star.
    StarPlaced {
        /// Index of the star in the field's star list.
        index: usize,
        /// Field-local position of the star.
        position: Vec2,
        /// Star size in pixels.
        size: f32,
    },

    /// Emitted when a star's attempt budget is exhausted and it is skipped.
    StarSkipped {
        /// Outer draw number (1-based) that was given up on.
        outer_draw: usize,
    },

    /// Emitted when the placement loop finishes.
    PlacementFinished { report: PlacementReport },

    /// Emitted after a reflow recomputed the field dimensions.
    Reflowed {
        field_width: f32,
        field_height: f32,
    },

    /// Emitted when an animated scroll step starts.
    ScrollStarted { from: f32, to: f32 },

    /// Emitted when a scroll trigger is ignored (already scrolling, or
    /// scrolling disabled).
    ScrollIgnored { offset: f32 },

    /// Emitted when the scroll anchor wraps back to the start of the field.
    ScrollWrapped { from_offset: f32 },

    /// Emitted when an animated scroll step completes.
    ScrollFinished { offset: f32 },

    /// Emitted when a flicker burst starts.
    FlickerBurst {
        /// Indices of the stars whose fade actually started.
        star_indices: Vec<usize>,
    },

    /// Non-fatal warning.
    Warning {
        /// Context string (e.g. "placement").
        context: String,
        /// Human-readable message.
        message: String,
    },
}

impl FieldEvent {
    pub fn kind(&self) -> FieldEventKind {
        match self {
            FieldEvent::PlacementStarted { .. } => FieldEventKind::PlacementStarted,
            FieldEvent::StarPlaced { .. } => FieldEventKind::StarPlaced,
            FieldEvent::StarSkipped { .. } => FieldEventKind::StarSkipped,
            FieldEvent::PlacementFinished { .. } => FieldEventKind::PlacementFinished,
            FieldEvent::Reflowed { .. } => FieldEventKind::Reflowed,
            FieldEvent::ScrollStarted { .. } => FieldEventKind::ScrollStarted,
            FieldEvent::ScrollIgnored { .. } => FieldEventKind::ScrollIgnored,
            FieldEvent::ScrollWrapped { .. } => FieldEventKind::ScrollWrapped,
            FieldEvent::ScrollFinished { .. } => FieldEventKind::ScrollFinished,
            FieldEvent::FlickerBurst { .. } => FieldEventKind::FlickerBurst,
            FieldEvent::Warning { .. } => FieldEventKind::Warning,
        }
    }
}

/// A generic event sink that accepts [`FieldEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: FieldEvent);

    /// Whether the sink cares about a given event kind. Emitters may skip
    /// constructing events for kinds the sink rejects.
    fn wants(&self, _kind: FieldEventKind) -> bool {
        true
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: FieldEvent) {}

    #[inline]
    fn wants(&self, _kind: FieldEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(FieldEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(FieldEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(FieldEvent),
{
    #[inline]
    fn send(&mut self, event: FieldEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects all events in a `Vec`.
#[derive(Default)]
pub struct VecSink {
    events: Vec<FieldEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn into_inner(self) -> Vec<FieldEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[FieldEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Counts collected events of the given kind.
    pub fn count_of(&self, kind: FieldEventKind) -> usize {
        self.events.iter().filter(|e| e.kind() == kind).count()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: FieldEvent) {
        self.events.push(event);
    }
}
