//! Shared test fixtures.

use orrery::{GlyphOutline, GlyphPathSource};

/// A glyph source that renders every ASCII digit as the same solid square:
/// 600x700 font units on a 1000-unit em, 650 units of advance. Enough to
/// exercise layout, anchoring, and the even-odd cutout without a font file.
pub struct SquareGlyphs {
    outline: GlyphOutline,
}

impl SquareGlyphs {
    pub fn new() -> Self {
        let mut path = kurbo::BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((600.0, 0.0));
        path.line_to((600.0, 700.0));
        path.line_to((0.0, 700.0));
        path.close_path();
        SquareGlyphs {
            outline: GlyphOutline { path, advance: 650 },
        }
    }

    pub fn boxed() -> Box<dyn GlyphPathSource> {
        Box::new(Self::new())
    }
}

impl GlyphPathSource for SquareGlyphs {
    fn units_per_em(&self) -> i32 {
        1000
    }

    fn cap_height(&self) -> i32 {
        700
    }

    fn glyph(&self, ch: char) -> Option<&GlyphOutline> {
        ch.is_ascii_digit().then_some(&self.outline)
    }
}
