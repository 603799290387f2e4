#![forbid(unsafe_code)]
//! star_field: procedural star-field background engine.
//!
//! Modules:
//! - placement: size-biased rejection sampling under a minimum-separation constraint
//! - field: star records, resize-stable layout, and the `StarField` facade
//! - scroll: step-wise scroll state machine with seamless wraparound
//! - flicker: periodic opacity perturbation of a random star subset
//! - anim: tick-driven tween/easing primitives shared by scroll and flicker
//! - display: the adapter seam to whatever actually draws the stars
//! - events: observable lifecycle events and sinks
//!
//! The engine never draws and never spawns threads: the host calls
//! [`field::StarField::tick`] once per rendered frame and implements
//! [`display::DisplayAdapter`] to move pixels.
pub mod anim;
pub mod config;
pub mod display;
pub mod error;
pub mod events;
pub mod field;
pub mod flicker;
pub mod placement;
pub mod scroll;

/// Convenient re-exports for common types. Import with `use star_field::prelude::*;`.
pub mod prelude {
    pub use crate::anim::{Easing, Tween};
    pub use crate::config::FieldConfig;
    pub use crate::display::{DisplayAdapter, DisplayHandle, NullDisplay, RecordingDisplay};
    pub use crate::error::{Error, Result};
    pub use crate::events::{EventSink, FieldEvent, FieldEventKind, FnSink, VecSink};
    pub use crate::field::{FieldState, Star, StarField};
    pub use crate::placement::{place_stars, PlacementDomain, PlacementReport};
    pub use crate::scroll::ScrollPhase;
}
