//! The immediate-mode vector canvas the frame composer draws against.
//!
//! The contract mirrors what the renderer actually consumes from a host
//! rasterizer: transform-free rounded-rectangle fills, and bracketed fill
//! regions that accumulate paths, circles, and glyph outlines and rasterize
//! them together under the even-odd fill rule. Two backends implement it:
//! [`trace::TraceCanvas`] records operations for inspection, and
//! [`raster::RasterCanvas`] produces pixels with `vello_cpu`.

pub mod raster;
pub mod trace;

use crate::foundation::error::OrreryResult;
use crate::foundation::fixed::Fixed;
use crate::foundation::geometry::{FPoint, PixelRect, Transform};
use crate::glyph::GlyphPathSource;

/// A straight (non-premultiplied) RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Rgba8 { r, g, b, a: 255 }
    }

    pub const BLACK: Rgba8 = Rgba8::rgb(0, 0, 0);
    pub const WHITE: Rgba8 = Rgba8::rgb(255, 255, 255);
}

/// Appearance of one fill region: flat color plus a coverage bias.
///
/// Bias zero is a plain opaque fill. Each negative step halves the
/// effective edge coverage, which reads as translucency against whatever
/// was rasterized underneath.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FillStyle {
    pub color: Rgba8,
    pub bias: i8,
}

impl FillStyle {
    pub const fn opaque(color: Rgba8) -> Self {
        FillStyle { color, bias: 0 }
    }
}

/// Which corners of a rectangle fill are rounded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CornerMask {
    pub top_left: bool,
    pub top_right: bool,
    pub bottom_right: bool,
    pub bottom_left: bool,
}

impl CornerMask {
    pub const ALL: CornerMask = CornerMask {
        top_left: true,
        top_right: true,
        bottom_right: true,
        bottom_left: true,
    };
    pub const TOP_LEFT: CornerMask = CornerMask {
        top_left: true,
        top_right: false,
        bottom_right: false,
        bottom_left: false,
    };
    pub const TOP_RIGHT: CornerMask = CornerMask {
        top_left: false,
        top_right: true,
        bottom_right: false,
        bottom_left: false,
    };
    pub const BOTTOM_RIGHT: CornerMask = CornerMask {
        top_left: false,
        top_right: false,
        bottom_right: true,
        bottom_left: false,
    };
    pub const BOTTOM_LEFT: CornerMask = CornerMask {
        top_left: false,
        top_right: false,
        bottom_right: false,
        bottom_left: true,
    };
}

/// Horizontal placement of drawn text relative to the transform offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Vertical placement of drawn text relative to the transform offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    Baseline,
    Middle,
    Top,
}

/// Stateful immediate-mode vector canvas.
///
/// Fill regions are bracketed by [`Canvas::begin_fill`]/[`Canvas::end_fill`]
/// and rasterized as one even-odd composite on `end_fill`; drawing an
/// outline an even number of times relative to an enclosing contour
/// therefore cuts a hole through it. `begin_fill` resets the active
/// transform to identity. Bracketing misuse (nested begins, unbalanced
/// ends) is reported as an error by the backend rather than silently
/// accepted.
pub trait Canvas {
    /// Immediate flat-color rectangle fill with rounded corners. Runs
    /// outside any fill region and ignores the active transform.
    fn fill_rect(&mut self, rect: PixelRect, corner_radius: i32, corners: CornerMask, color: Rgba8);

    /// Opens a fill region with the given appearance.
    fn begin_fill(&mut self, style: FillStyle) -> OrreryResult<()>;

    /// Replaces the active transform applied to subsequent path, curve, and
    /// glyph draws.
    fn set_transform(&mut self, transform: Transform);

    /// Adds a closed polygon under the active transform.
    fn draw_path(&mut self, points: &[FPoint]);

    /// Starts a new subpath at `p` under the active transform.
    fn move_to(&mut self, p: FPoint);

    /// Adds a cubic bezier segment under the active transform.
    fn curve_to(&mut self, c1: FPoint, c2: FPoint, to: FPoint);

    /// Adds a circle at literal surface coordinates, ignoring the active
    /// transform.
    fn plot_circle(&mut self, center: FPoint, radius: Fixed);

    /// Adds the glyph outlines for `text` under the active transform. The
    /// transform's scale is expected to map the source's font units onto
    /// pixels (negative source y flips glyph space onto y-down screen
    /// space).
    fn draw_text(
        &mut self,
        text: &str,
        glyphs: &dyn GlyphPathSource,
        align: TextAlign,
        anchor: TextAnchor,
    );

    /// Closes the current region and rasterizes everything accumulated
    /// since `begin_fill` as a single even-odd fill.
    fn end_fill(&mut self) -> OrreryResult<()>;
}
