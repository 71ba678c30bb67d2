//! Recording canvas backend.
//!
//! Captures every draw operation together with the transform that was
//! active when it was issued. Integration tests assert the exact pass
//! structure of a frame against the recorded sequence, and the trace is
//! also a convenient debugging artifact when a pass misbehaves.

use crate::canvas::{Canvas, CornerMask, FillStyle, Rgba8, TextAlign, TextAnchor};
use crate::foundation::error::{OrreryError, OrreryResult};
use crate::foundation::fixed::Fixed;
use crate::foundation::geometry::{FPoint, PixelRect, Transform};
use crate::glyph::GlyphPathSource;

/// One recorded canvas operation.
#[derive(Clone, Debug, PartialEq)]
pub enum TraceOp {
    FillRect {
        rect: PixelRect,
        corner_radius: i32,
        corners: CornerMask,
        color: Rgba8,
    },
    BeginFill(FillStyle),
    Path {
        points: Vec<FPoint>,
        transform: Transform,
    },
    MoveTo {
        p: FPoint,
        transform: Transform,
    },
    CurveTo {
        c1: FPoint,
        c2: FPoint,
        to: FPoint,
        transform: Transform,
    },
    Circle {
        center: FPoint,
        radius: Fixed,
    },
    Text {
        text: String,
        align: TextAlign,
        anchor: TextAnchor,
        transform: Transform,
    },
    EndFill,
}

/// Canvas backend that records operations instead of rasterizing.
#[derive(Default)]
pub struct TraceCanvas {
    ops: Vec<TraceOp>,
    transform: Transform,
    in_region: bool,
}

impl TraceCanvas {
    pub fn new() -> Self {
        TraceCanvas {
            ops: Vec::new(),
            transform: Transform::IDENTITY,
            in_region: false,
        }
    }

    pub fn ops(&self) -> &[TraceOp] {
        &self.ops
    }

    pub fn clear(&mut self) {
        self.ops.clear();
        self.transform = Transform::IDENTITY;
        self.in_region = false;
    }

    /// The ops of each begin/end fill region, in order.
    pub fn regions(&self) -> Vec<&[TraceOp]> {
        let mut regions = Vec::new();
        let mut start = None;
        for (i, op) in self.ops.iter().enumerate() {
            match op {
                TraceOp::BeginFill(_) => start = Some(i + 1),
                TraceOp::EndFill => {
                    if let Some(s) = start.take() {
                        regions.push(&self.ops[s..i]);
                    }
                }
                _ => {}
            }
        }
        regions
    }
}

impl Canvas for TraceCanvas {
    fn fill_rect(
        &mut self,
        rect: PixelRect,
        corner_radius: i32,
        corners: CornerMask,
        color: Rgba8,
    ) {
        self.ops.push(TraceOp::FillRect {
            rect,
            corner_radius,
            corners,
            color,
        });
    }

    fn begin_fill(&mut self, style: FillStyle) -> OrreryResult<()> {
        if self.in_region {
            return Err(OrreryError::canvas("begin_fill inside an open region"));
        }
        self.in_region = true;
        self.transform = Transform::IDENTITY;
        self.ops.push(TraceOp::BeginFill(style));
        Ok(())
    }

    fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    fn draw_path(&mut self, points: &[FPoint]) {
        self.ops.push(TraceOp::Path {
            points: points.to_vec(),
            transform: self.transform,
        });
    }

    fn move_to(&mut self, p: FPoint) {
        self.ops.push(TraceOp::MoveTo {
            p,
            transform: self.transform,
        });
    }

    fn curve_to(&mut self, c1: FPoint, c2: FPoint, to: FPoint) {
        self.ops.push(TraceOp::CurveTo {
            c1,
            c2,
            to,
            transform: self.transform,
        });
    }

    fn plot_circle(&mut self, center: FPoint, radius: Fixed) {
        self.ops.push(TraceOp::Circle { center, radius });
    }

    fn draw_text(
        &mut self,
        text: &str,
        _glyphs: &dyn GlyphPathSource,
        align: TextAlign,
        anchor: TextAnchor,
    ) {
        self.ops.push(TraceOp::Text {
            text: text.to_string(),
            align,
            anchor,
            transform: self.transform,
        });
    }

    fn end_fill(&mut self) -> OrreryResult<()> {
        if !self.in_region {
            return Err(OrreryError::canvas("end_fill without begin_fill"));
        }
        self.in_region = false;
        self.ops.push(TraceOp::EndFill);
        Ok(())
    }
}
