//! The seam between the engine and whatever actually draws stars.
//!
//! The engine never renders: it asks a [`DisplayAdapter`] for an opaque
//! [`DisplayHandle`] per star and pushes position/opacity updates through it.
//! Positions cross the boundary as [`mint::Vector2`] for toolkit interop.
use std::collections::HashMap;

use mint::Vector2;

/// Opaque reference to a host-side visual proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayHandle(u64);

impl DisplayHandle {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Host-implemented rendering surface.
///
/// Handles returned by [`DisplayAdapter::create_visual`] stay valid until
/// [`DisplayAdapter::destroy_visual`]; the engine destroys every handle it
/// created during teardown.
pub trait DisplayAdapter {
    /// Creates a visual proxy for a star of the given pixel size and initial
    /// opacity.
    fn create_visual(&mut self, size: f32, opacity: f32) -> DisplayHandle;

    /// Repositions a proxy and/or sets its opacity. `position` is in
    /// field-local space with the current scroll offset already applied.
    fn update_visual(&mut self, handle: DisplayHandle, position: Vector2<f32>, opacity: f32);

    /// Releases a proxy. The handle must not be used afterwards.
    fn destroy_visual(&mut self, handle: DisplayHandle);
}

/// Adapter that discards everything. Useful for headless placement runs.
#[derive(Debug, Default)]
pub struct NullDisplay {
    next: u64,
}

impl NullDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DisplayAdapter for NullDisplay {
    fn create_visual(&mut self, _size: f32, _opacity: f32) -> DisplayHandle {
        let handle = DisplayHandle(self.next);
        self.next += 1;
        handle
    }

    fn update_visual(&mut self, _handle: DisplayHandle, _position: Vector2<f32>, _opacity: f32) {}

    fn destroy_visual(&mut self, _handle: DisplayHandle) {}
}

/// State of one visual proxy as last seen by a [`RecordingDisplay`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualState {
    pub size: f32,
    pub position: Vector2<f32>,
    pub opacity: f32,
}

/// Adapter that records proxy state. Used by tests and the example binaries.
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    next: u64,
    visuals: HashMap<DisplayHandle, VisualState>,
    created: usize,
    destroyed: usize,
    updates: usize,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visual(&self, handle: DisplayHandle) -> Option<&VisualState> {
        self.visuals.get(&handle)
    }

    /// Visuals currently alive (created and not yet destroyed).
    pub fn live_count(&self) -> usize {
        self.visuals.len()
    }

    pub fn created_count(&self) -> usize {
        self.created
    }

    pub fn destroyed_count(&self) -> usize {
        self.destroyed
    }

    pub fn update_count(&self) -> usize {
        self.updates
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DisplayHandle, &VisualState)> {
        self.visuals.iter()
    }
}

impl DisplayAdapter for RecordingDisplay {
    fn create_visual(&mut self, size: f32, opacity: f32) -> DisplayHandle {
        let handle = DisplayHandle(self.next);
        self.next += 1;
        self.created += 1;
        self.visuals.insert(
            handle,
            VisualState {
                size,
                position: Vector2 { x: 0.0, y: 0.0 },
                opacity,
            },
        );
        handle
    }

    fn update_visual(&mut self, handle: DisplayHandle, position: Vector2<f32>, opacity: f32) {
        debug_assert!(
            self.visuals.contains_key(&handle),
            "update for unknown display handle {handle:?}"
        );
        self.updates += 1;
        if let Some(state) = self.visuals.get_mut(&handle) {
            state.position = position;
            state.opacity = opacity;
        }
    }

    fn destroy_visual(&mut self, handle: DisplayHandle) {
        debug_assert!(
            self.visuals.contains_key(&handle),
            "destroy for unknown display handle {handle:?}"
        );
        if self.visuals.remove(&handle).is_some() {
            self.destroyed += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_display_hands_out_unique_handles() {
        let mut display = NullDisplay::new();
        let a = display.create_visual(2.0, 1.0);
        let b = display.create_visual(2.0, 1.0);
        assert_ne!(a, b);
    }

    #[test]
    fn recording_display_tracks_lifecycle() {
        let mut display = RecordingDisplay::new();
        let handle = display.create_visual(4.0, 0.8);
        assert_eq!(display.live_count(), 1);

        display.update_visual(handle, Vector2 { x: 1.0, y: -2.0 }, 0.5);
        let state = display.visual(handle).expect("visual exists");
        assert_eq!(state.opacity, 0.5);
        assert_eq!(state.position.x, 1.0);

        display.destroy_visual(handle);
        assert_eq!(display.live_count(), 0);
        assert_eq!(display.destroyed_count(), 1);
    }
}
