//! Fixed-point points, rectangles, polar placement, and the transform value
//! type the canvas applies to path draws.

use crate::foundation::fixed::{Angle, Fixed, TRIG_SCALE};

/// A 2D point in fixed-point pixel coordinates, y growing downward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FPoint {
    pub x: Fixed,
    pub y: Fixed,
}

impl FPoint {
    pub const fn new(x: Fixed, y: Fixed) -> Self {
        FPoint { x, y }
    }

    pub const fn from_int(x: i32, y: i32) -> Self {
        FPoint {
            x: Fixed::from_int(x),
            y: Fixed::from_int(y),
        }
    }

    pub fn to_f64(self) -> (f64, f64) {
        (self.x.to_f64(), self.y.to_f64())
    }
}

/// An integer pixel rectangle. Origin is the top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl PixelRect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        PixelRect { x, y, w, h }
    }

    /// Center of the rectangle in fixed-point coordinates.
    pub fn center(self) -> FPoint {
        FPoint::from_int(self.x + self.w / 2, self.y + self.h / 2)
    }
}

/// A per-axis rational scale mapping a source design space onto a target
/// size. A negative source component flips that axis (used to map y-up glyph
/// space onto y-down screen space).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScaleMap {
    pub from_x: i32,
    pub from_y: i32,
    pub to_x: i32,
    pub to_y: i32,
}

impl ScaleMap {
    pub const IDENTITY: ScaleMap = ScaleMap {
        from_x: 1,
        from_y: 1,
        to_x: 1,
        to_y: 1,
    };

    pub const fn new(from: (i32, i32), to: (i32, i32)) -> Self {
        ScaleMap {
            from_x: from.0,
            from_y: from.1,
            to_x: to.0,
            to_y: to.1,
        }
    }

    pub fn apply(self, p: FPoint) -> FPoint {
        FPoint {
            x: p.x.mul_div(self.to_x, self.from_x),
            y: p.y.mul_div(self.to_y, self.from_y),
        }
    }

    /// The equivalent floating-point factors, for paths that are not built
    /// out of fixed-point points (glyph outlines in font units).
    pub fn factors(self) -> (f64, f64) {
        (
            f64::from(self.to_x) / f64::from(self.from_x),
            f64::from(self.to_y) / f64::from(self.from_y),
        )
    }
}

/// The affine state applied to path and glyph draws inside a fill region:
/// scale, then rotate, then translate.
///
/// The canvas takes the whole value per set; there is no field-level
/// mutation across draw calls, so a stale transform cannot leak from one
/// region into the next.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub offset: FPoint,
    pub rotation: Angle,
    pub scale: ScaleMap,
}

impl Default for Transform {
    fn default() -> Self {
        Transform::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        offset: FPoint::new(Fixed::ZERO, Fixed::ZERO),
        rotation: Angle::ZERO,
        scale: ScaleMap::IDENTITY,
    };

    pub const fn with_offset(offset: FPoint) -> Self {
        Transform {
            offset,
            rotation: Angle::ZERO,
            scale: ScaleMap::IDENTITY,
        }
    }

    /// Applies scale, rotation, and offset to a fixed-point local point.
    pub fn apply(&self, p: FPoint) -> FPoint {
        let s = self.scale.apply(p);
        let (sin, cos) = (self.rotation.sin(), self.rotation.cos());
        let x = i64::from(s.x.raw());
        let y = i64::from(s.y.raw());
        let rx = (x * i64::from(cos) - y * i64::from(sin)) / i64::from(TRIG_SCALE);
        let ry = (x * i64::from(sin) + y * i64::from(cos)) / i64::from(TRIG_SCALE);
        FPoint {
            x: Fixed::from_raw(rx as i32) + self.offset.x,
            y: Fixed::from_raw(ry as i32) + self.offset.y,
        }
    }

    /// The equivalent `kurbo` affine in pixel space, for f64 path pipelines.
    pub fn to_affine(&self) -> kurbo::Affine {
        let (ox, oy) = self.offset.to_f64();
        let (sx, sy) = self.scale.factors();
        kurbo::Affine::translate((ox, oy))
            * kurbo::Affine::rotate(self.rotation.to_radians())
            * kurbo::Affine::scale_non_uniform(sx, sy)
    }
}

/// Places a point at `radius` from `origin` in the clock-face angle
/// convention: angle zero is straight up from the origin on a y-down
/// screen, one full turn per revolution.
pub fn polar_point(origin: FPoint, radius: Fixed, angle: Angle) -> FPoint {
    let s = angle.sin();
    let c = angle.cos();
    FPoint {
        x: origin.x - radius.mul_div(s, TRIG_SCALE),
        y: origin.y - radius.mul_div(c, TRIG_SCALE),
    }
}
