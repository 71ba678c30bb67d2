//! CPU raster canvas backend on top of `vello_cpu`.
//!
//! Each fill region accumulates one device-space `kurbo::BezPath`: polygon
//! and curve points go through the fixed-point transform, glyph outlines go
//! through the equivalent f64 affine, and circles are appended at literal
//! coordinates. `end_fill` rasterizes the whole accumulation as a single
//! even-odd fill, which is what makes glyph outlines plotted inside an
//! annulus read as cutouts.

use crate::canvas::{Canvas, CornerMask, FillStyle, Rgba8, TextAlign, TextAnchor};
use crate::foundation::error::{OrreryError, OrreryResult};
use crate::foundation::fixed::Fixed;
use crate::foundation::geometry::{FPoint, PixelRect, Transform};
use crate::glyph::GlyphPathSource;

use kurbo::Shape as _;

/// One rendered frame, straight from the surface.
#[derive(Clone, Debug)]
pub struct FrameRgba {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

struct Region {
    style: FillStyle,
    path: kurbo::BezPath,
}

/// Canvas backend that rasterizes onto an owned pixel surface.
pub struct RasterCanvas {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    region: Option<Region>,
    transform: Transform,
}

impl RasterCanvas {
    pub fn new(width: u32, height: u32) -> OrreryResult<Self> {
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| OrreryError::validation("surface width exceeds u16"))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| OrreryError::validation("surface height exceeds u16"))?;
        if width_u16 == 0 || height_u16 == 0 {
            return Err(OrreryError::validation("surface dimensions must be > 0"));
        }
        Ok(RasterCanvas {
            width: width_u16,
            height: height_u16,
            ctx: vello_cpu::RenderContext::new(width_u16, height_u16),
            pixmap: vello_cpu::Pixmap::new(width_u16, height_u16),
            region: None,
            transform: Transform::IDENTITY,
        })
    }

    pub fn bounds(&self) -> PixelRect {
        PixelRect::new(0, 0, i32::from(self.width), i32::from(self.height))
    }

    /// Rasterizes everything drawn since the previous frame and returns the
    /// pixels. The surface starts each frame as opaque black.
    pub fn finish_frame(&mut self) -> OrreryResult<FrameRgba> {
        if self.region.is_some() {
            return Err(OrreryError::canvas("finish_frame with an open region"));
        }

        clear_pixmap(&mut self.pixmap, [0, 0, 0, 255]);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
        let data = self.pixmap.data_as_u8_slice().to_vec();
        self.ctx.reset();
        self.transform = Transform::IDENTITY;

        Ok(FrameRgba {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data,
            premultiplied: true,
        })
    }

    fn region_mut(&mut self) -> Option<&mut Region> {
        let region = self.region.as_mut();
        debug_assert!(region.is_some(), "path draw outside a fill region");
        region
    }

    fn apply(&self, p: FPoint) -> kurbo::Point {
        let (x, y) = self.transform.apply(p).to_f64();
        kurbo::Point::new(x, y)
    }
}

impl Canvas for RasterCanvas {
    fn fill_rect(
        &mut self,
        rect: PixelRect,
        corner_radius: i32,
        corners: CornerMask,
        color: Rgba8,
    ) {
        let r = f64::from(corner_radius);
        let radii = kurbo::RoundedRectRadii::new(
            if corners.top_left { r } else { 0.0 },
            if corners.top_right { r } else { 0.0 },
            if corners.bottom_right { r } else { 0.0 },
            if corners.bottom_left { r } else { 0.0 },
        );
        let shape = kurbo::RoundedRect::from_rect(
            kurbo::Rect::new(
                f64::from(rect.x),
                f64::from(rect.y),
                f64::from(rect.x + rect.w),
                f64::from(rect.y + rect.h),
            ),
            radii,
        );

        self.ctx.set_fill_rule(vello_cpu::peniko::Fill::NonZero);
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
        self.ctx.fill_path(&bezpath_to_cpu(&shape.to_path(0.1)));
    }

    fn begin_fill(&mut self, style: FillStyle) -> OrreryResult<()> {
        if self.region.is_some() {
            return Err(OrreryError::canvas("begin_fill inside an open region"));
        }
        self.transform = Transform::IDENTITY;
        self.region = Some(Region {
            style,
            path: kurbo::BezPath::new(),
        });
        Ok(())
    }

    fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    fn draw_path(&mut self, points: &[FPoint]) {
        if points.is_empty() {
            return;
        }
        let device: Vec<kurbo::Point> = points.iter().map(|&p| self.apply(p)).collect();
        let Some(region) = self.region_mut() else {
            return;
        };
        region.path.move_to(device[0]);
        for &p in &device[1..] {
            region.path.line_to(p);
        }
        region.path.close_path();
    }

    fn move_to(&mut self, p: FPoint) {
        let p = self.apply(p);
        if let Some(region) = self.region_mut() {
            region.path.move_to(p);
        }
    }

    fn curve_to(&mut self, c1: FPoint, c2: FPoint, to: FPoint) {
        let (c1, c2, to) = (self.apply(c1), self.apply(c2), self.apply(to));
        if let Some(region) = self.region_mut() {
            region.path.curve_to(c1, c2, to);
        }
    }

    fn plot_circle(&mut self, center: FPoint, radius: Fixed) {
        let (cx, cy) = center.to_f64();
        let circle = kurbo::Circle::new((cx, cy), radius.to_f64());
        if let Some(region) = self.region_mut() {
            region.path.extend(circle.path_elements(0.1));
        }
    }

    fn draw_text(
        &mut self,
        text: &str,
        glyphs: &dyn GlyphPathSource,
        align: TextAlign,
        anchor: TextAnchor,
    ) {
        // Pen position and anchor offsets are in font units; the active
        // transform's scale maps them onto pixels.
        let dx = match align {
            TextAlign::Left => 0,
            TextAlign::Center => -glyphs.line_advance(text) / 2,
            TextAlign::Right => -glyphs.line_advance(text),
        };
        let dy = match anchor {
            TextAnchor::Baseline => 0,
            TextAnchor::Middle => -glyphs.cap_height() / 2,
            TextAnchor::Top => -glyphs.cap_height(),
        };

        let base = self.transform.to_affine();
        let mut pen_x = dx;
        let mut outlines = kurbo::BezPath::new();
        for ch in text.chars() {
            let Some(glyph) = glyphs.glyph(ch) else {
                continue;
            };
            let mut placed = glyph.path.clone();
            placed
                .apply_affine(base * kurbo::Affine::translate((f64::from(pen_x), f64::from(dy))));
            outlines.extend(placed.elements().iter().copied());
            pen_x += glyph.advance;
        }

        if let Some(region) = self.region_mut() {
            region.path.extend(outlines.elements().iter().copied());
        }
    }

    fn end_fill(&mut self) -> OrreryResult<()> {
        let Some(region) = self.region.take() else {
            return Err(OrreryError::canvas("end_fill without begin_fill"));
        };

        let color = region.style.color;
        self.ctx.set_fill_rule(vello_cpu::peniko::Fill::EvenOdd);
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));

        let opacity = coverage_bias_opacity(region.style.bias);
        if opacity < 1.0 {
            self.ctx.push_opacity_layer(opacity);
        }
        self.ctx.fill_path(&bezpath_to_cpu(&region.path));
        if opacity < 1.0 {
            self.ctx.pop_layer();
        }
        Ok(())
    }
}

/// Each negative bias step halves effective coverage; non-negative bias is
/// fully opaque.
fn coverage_bias_opacity(bias: i8) -> f32 {
    if bias >= 0 {
        1.0
    } else {
        2f32.powi(i32::from(bias))
    }
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    for px in pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

fn point_to_cpu(p: kurbo::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3))
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}
