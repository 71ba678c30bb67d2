//! The single time-varying quantity of the demo, plus the fixed geometry
//! and the glyph source the render pass reads.

use crate::foundation::fixed::Angle;
use crate::foundation::geometry::{FPoint, PixelRect};
use crate::glyph::GlyphPathSource;

/// Animation state: one rotation angle advancing by a fixed step per timer
/// tick, a center/origin pair computed once from the display bounds, and
/// exclusive ownership of the loaded glyph source.
///
/// Rendering is a pure function of this state; only [`AnimationState::advance`]
/// mutates it, and only the timer tick handler calls `advance`. Dropping the
/// state releases the glyph source.
pub struct AnimationState {
    rotation: Angle,
    step: i32,
    center: FPoint,
    origin: FPoint,
    glyphs: Option<Box<dyn GlyphPathSource>>,
}

impl AnimationState {
    /// Default rotation step per tick, in angular units.
    pub const DEFAULT_STEP: i32 = 100;

    pub fn new(bounds: PixelRect, step: i32, glyphs: Option<Box<dyn GlyphPathSource>>) -> Self {
        let center = bounds.center();
        AnimationState {
            rotation: Angle::ZERO,
            step,
            center,
            // The transform origin of every draw pass. Always equal to the
            // display center in this design; kept as its own field because
            // the passes reference it as the rotation origin, not as "the
            // middle of the screen".
            origin: center,
            glyphs,
        }
    }

    /// Advances the rotation by the configured step. Called once per timer
    /// tick, never from the render pass.
    pub fn advance(&mut self) {
        self.rotation = self.rotation + Angle::from_raw(self.step);
    }

    pub fn rotation(&self) -> Angle {
        self.rotation
    }

    pub fn center(&self) -> FPoint {
        self.center
    }

    pub fn origin(&self) -> FPoint {
        self.origin
    }

    pub fn glyphs(&self) -> Option<&dyn GlyphPathSource> {
        self.glyphs.as_deref()
    }
}
