//! Glyph outlines as vector paths.
//!
//! The renderer only ever needs a handful of characters as filled outlines,
//! so the font boundary is a small trait: units-per-em, cap height, and a
//! per-character outline with its advance. [`FontGlyphSource`] implements it
//! over a TTF/OTF file via `ttf-parser`, extracting outlines once at load
//! time; rendering never touches the font bytes again.

use std::collections::HashMap;
use std::path::Path;

use crate::foundation::error::{OrreryError, OrreryResult};

/// One extracted glyph: outline in font units (y up), plus the horizontal
/// advance to the next glyph.
#[derive(Clone, Debug)]
pub struct GlyphOutline {
    pub path: kurbo::BezPath,
    pub advance: i32,
}

/// An opaque source of glyph outlines, keyed by character.
pub trait GlyphPathSource {
    /// Font units per em square.
    fn units_per_em(&self) -> i32;

    /// Height of a capital letter (and of the digits this renderer draws)
    /// above the baseline, in font units.
    fn cap_height(&self) -> i32;

    /// The outline for `ch`, or `None` if the font has no such glyph.
    fn glyph(&self, ch: char) -> Option<&GlyphOutline>;

    /// Total advance of `text` in font units; characters without a glyph
    /// contribute nothing.
    fn line_advance(&self, text: &str) -> i32 {
        text.chars()
            .filter_map(|ch| self.glyph(ch))
            .map(|g| g.advance)
            .sum()
    }
}

/// Glyph source backed by a parsed TTF/OTF font.
#[derive(Debug)]
pub struct FontGlyphSource {
    units_per_em: i32,
    cap_height: i32,
    glyphs: HashMap<char, GlyphOutline>,
}

impl FontGlyphSource {
    /// The characters the clock face needs: two-digit hour labels.
    pub const DIGITS: &'static str = "0123456789";

    /// Parses `bytes` and extracts outlines for `chars`.
    ///
    /// Fails if the font cannot be parsed or if none of the requested
    /// characters has an outline; individual missing characters are
    /// tolerated and simply absent from the source.
    pub fn from_bytes(bytes: &[u8], chars: &str) -> OrreryResult<Self> {
        let face = ttf_parser::Face::parse(bytes, 0)
            .map_err(|e| OrreryError::font(format!("parse font: {e}")))?;

        let units_per_em = i32::from(face.units_per_em());
        let cap_height = face
            .capital_height()
            .map(i32::from)
            .unwrap_or(units_per_em * 7 / 10);

        let mut glyphs = HashMap::new();
        for ch in chars.chars() {
            let Some(id) = face.glyph_index(ch) else {
                continue;
            };
            let mut sink = OutlineSink::default();
            if face.outline_glyph(id, &mut sink).is_none() {
                continue;
            }
            let advance = face.glyph_hor_advance(id).map(i32::from).unwrap_or(0);
            glyphs.insert(
                ch,
                GlyphOutline {
                    path: sink.path,
                    advance,
                },
            );
        }

        if glyphs.is_empty() {
            return Err(OrreryError::font(
                "font contains no outlines for the requested characters",
            ));
        }

        tracing::debug!(
            units_per_em,
            cap_height,
            glyphs = glyphs.len(),
            "extracted glyph outlines"
        );

        Ok(FontGlyphSource {
            units_per_em,
            cap_height,
            glyphs,
        })
    }

    /// Reads a font file and extracts the digit outlines.
    pub fn from_file(path: &Path) -> OrreryResult<Self> {
        let bytes = std::fs::read(path)
            .map_err(|e| OrreryError::font(format!("read font '{}': {e}", path.display())))?;
        Self::from_bytes(&bytes, Self::DIGITS)
    }
}

impl GlyphPathSource for FontGlyphSource {
    fn units_per_em(&self) -> i32 {
        self.units_per_em
    }

    fn cap_height(&self) -> i32 {
        self.cap_height
    }

    fn glyph(&self, ch: char) -> Option<&GlyphOutline> {
        self.glyphs.get(&ch)
    }
}

/// Collects a ttf-parser outline into a `kurbo::BezPath`.
#[derive(Default)]
struct OutlineSink {
    path: kurbo::BezPath,
}

impl ttf_parser::OutlineBuilder for OutlineSink {
    fn move_to(&mut self, x: f32, y: f32) {
        self.path.move_to((f64::from(x), f64::from(y)));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.line_to((f64::from(x), f64::from(y)));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.path.quad_to(
            (f64::from(x1), f64::from(y1)),
            (f64::from(x), f64::from(y)),
        );
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.path.curve_to(
            (f64::from(x1), f64::from(y1)),
            (f64::from(x2), f64::from(y2)),
            (f64::from(x), f64::from(y)),
        );
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OneSquare {
        outline: GlyphOutline,
    }

    impl OneSquare {
        fn new() -> Self {
            let mut path = kurbo::BezPath::new();
            path.move_to((0.0, 0.0));
            path.line_to((600.0, 0.0));
            path.line_to((600.0, 700.0));
            path.line_to((0.0, 700.0));
            path.close_path();
            OneSquare {
                outline: GlyphOutline { path, advance: 650 },
            }
        }
    }

    impl GlyphPathSource for OneSquare {
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

    #[test]
    fn line_advance_sums_known_glyphs() {
        let source = OneSquare::new();
        assert_eq!(source.line_advance("07"), 1300);
        assert_eq!(source.line_advance("0x7"), 1300);
        assert_eq!(source.line_advance(""), 0);
    }

    #[test]
    fn garbage_bytes_are_a_font_error() {
        let err = FontGlyphSource::from_bytes(b"not a font", FontGlyphSource::DIGITS).unwrap_err();
        assert!(matches!(err, OrreryError::Font(_)));
    }

    #[test]
    #[ignore = "needs a real font; point ORRERY_TEST_FONT at a TTF/OTF file"]
    fn real_font_digits_have_outlines() {
        let path = std::env::var("ORRERY_TEST_FONT").expect("ORRERY_TEST_FONT not set");
        let source = FontGlyphSource::from_file(Path::new(&path)).unwrap();
        assert!(source.units_per_em() > 0);
        assert!(source.cap_height() > 0);
        for ch in FontGlyphSource::DIGITS.chars() {
            let glyph = source.glyph(ch).expect("digit glyph missing");
            assert!(glyph.advance > 0, "digit {ch}");
            assert!(!glyph.path.elements().is_empty(), "digit {ch}");
        }
    }

    #[test]
    fn outline_sink_builds_closed_path() {
        let mut sink = OutlineSink::default();
        ttf_parser::OutlineBuilder::move_to(&mut sink, 0.0, 0.0);
        ttf_parser::OutlineBuilder::line_to(&mut sink, 10.0, 0.0);
        ttf_parser::OutlineBuilder::quad_to(&mut sink, 15.0, 5.0, 10.0, 10.0);
        ttf_parser::OutlineBuilder::curve_to(&mut sink, 5.0, 12.0, 2.0, 12.0, 0.0, 10.0);
        ttf_parser::OutlineBuilder::close(&mut sink);
        assert_eq!(sink.path.elements().len(), 5);
    }
}
