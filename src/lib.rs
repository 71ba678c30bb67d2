//! Orrery renders an animated radial clock face for a small
//! fixed-resolution display.
//!
//! Every timer tick advances a single rotation angle; every redraw composes
//! one frame out of ordered draw passes: a four-color quadrant backdrop, a
//! label backdrop, a rotating ring of hour labels cut out of a filled
//! annulus with the even-odd fill rule, a static tick-mark ring, a
//! counter-rotating bezier ornament, and a pair of orbiting translucent
//! dots.
//!
//! # Pipeline overview
//!
//! 1. **Advance**: the tick handler adds a fixed step to the rotation angle
//!    ([`AnimationState::advance`]).
//! 2. **Compose**: [`compose_frame`] turns the state into an ordered draw
//!    sequence against the [`Canvas`] contract.
//! 3. **Rasterize**: the [`RasterCanvas`] backend produces pixels with
//!    `vello_cpu`; the [`TraceCanvas`] backend records the sequence instead.
//!
//! The geometry core is integer-only: fixed-point coordinates ([`Fixed`]),
//! a modular angular unit ([`Angle`], 86 400 units per turn), and
//! table-driven trigonometry. Rendering is deterministic: the same state
//! always yields the same frame.
#![forbid(unsafe_code)]

mod canvas;
mod compose;
mod config;
mod foundation;
mod glyph;
mod runtime;
mod state;

pub use canvas::raster::{FrameRgba, RasterCanvas};
pub use canvas::trace::{TraceCanvas, TraceOp};
pub use canvas::{Canvas, CornerMask, FillStyle, Rgba8, TextAlign, TextAnchor};
pub use compose::{BRIGHT_GREEN, FOLLY, ICTERINE, LIBERTY, PICTON_BLUE, compose_frame};
pub use config::{FaceConfig, GlyphPolicy};
pub use foundation::error::{OrreryError, OrreryResult};
pub use foundation::fixed::{Angle, FIXED_SCALE, FULL_TURN, Fixed, QUARTER_TURN, TRIG_SCALE};
pub use foundation::geometry::{FPoint, PixelRect, ScaleMap, Transform, polar_point};
pub use glyph::{FontGlyphSource, GlyphOutline, GlyphPathSource};
pub use runtime::{FaceApp, RunStats, TickTimer};
pub use state::AnimationState;
