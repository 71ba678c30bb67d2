//! Frame composition: two backdrop rectangle passes followed by four
//! transform-scoped fill regions.
//!
//! The passes run in a fixed painter's order; there is no depth buffer, so
//! later passes draw over earlier ones. Everything the passes draw is
//! derived from the animation state and a handful of fixed shape
//! parameters.

use crate::canvas::{Canvas, CornerMask, FillStyle, Rgba8, TextAlign, TextAnchor};
use crate::foundation::error::OrreryResult;
use crate::foundation::fixed::{Angle, Fixed, QUARTER_TURN};
use crate::foundation::geometry::{FPoint, PixelRect, ScaleMap, Transform, polar_point};
use crate::state::AnimationState;

/// Background quadrant test pattern, clockwise from top-left.
pub const FOLLY: Rgba8 = Rgba8::rgb(0xFF, 0x00, 0x55);
pub const BRIGHT_GREEN: Rgba8 = Rgba8::rgb(0x00, 0xFF, 0x55);
pub const PICTON_BLUE: Rgba8 = Rgba8::rgb(0x00, 0xAA, 0xFF);
pub const ICTERINE: Rgba8 = Rgba8::rgb(0xFF, 0xFF, 0x55);
/// Orbiting dot color.
pub const LIBERTY: Rgba8 = Rgba8::rgb(0x55, 0x55, 0xAA);

/// Inner radius of the label annulus, pixels.
const RING_INNER: i32 = 50;
/// Radius of the label anchors, pixels.
const RING_TEXT: i32 = 52;
/// Outer radius of the label annulus, pixels.
const RING_OUTER: i32 = 68;
/// Label pixel size.
const TEXT_SIZE: i32 = 18;
/// Radial length of a tick mark, pixels.
const TICK_LEN: i32 = 6;
/// Orbit radius of the blended dot pair, pixels.
const ORBIT_RADIUS: i32 = 30;
/// Radius of each orbiting dot, pixels.
const ORBIT_DOT: i32 = 10;
/// Corner rounding of the background quadrants, pixels.
const QUADRANT_CORNER: i32 = 6;

/// Hour positions on the dial.
const HOURS: i32 = 24;

/// Composes one complete frame of the clock face onto `canvas`.
///
/// Pure with respect to `state`: the same state and bounds always produce
/// the same draw sequence.
#[tracing::instrument(skip_all, fields(rotation = state.rotation().raw()))]
pub fn compose_frame(
    state: &AnimationState,
    bounds: PixelRect,
    canvas: &mut dyn Canvas,
) -> OrreryResult<()> {
    draw_backdrop(bounds, canvas);
    draw_label_backdrop(state, canvas);
    draw_hour_ring(state, canvas)?;
    draw_tick_ring(state, canvas)?;
    draw_ornament(state, canvas)?;
    draw_orbit_pair(state, canvas)?;
    Ok(())
}

/// Four flat-color quadrants with one rounded outer corner each.
fn draw_backdrop(bounds: PixelRect, canvas: &mut dyn Canvas) {
    let w = bounds.w / 2;
    let h = bounds.h / 2;
    let quads = [
        (PixelRect::new(bounds.x, bounds.y, w, h), CornerMask::TOP_LEFT, FOLLY),
        (
            PixelRect::new(bounds.x + w, bounds.y, w, h),
            CornerMask::TOP_RIGHT,
            BRIGHT_GREEN,
        ),
        (
            PixelRect::new(bounds.x + w, bounds.y + h, w, h),
            CornerMask::BOTTOM_RIGHT,
            PICTON_BLUE,
        ),
        (
            PixelRect::new(bounds.x, bounds.y + h, w, h),
            CornerMask::BOTTOM_LEFT,
            ICTERINE,
        ),
    ];
    for (rect, corners, color) in quads {
        canvas.fill_rect(rect, QUADRANT_CORNER, corners, color);
    }
}

/// A dark box spanning the annulus to the right of center, tall enough for
/// one row of labels, so the cutout digits read against it.
fn draw_label_backdrop(state: &AnimationState, canvas: &mut dyn Canvas) {
    let ox = state.origin().x.to_int();
    let oy = state.origin().y.to_int();
    let rect = PixelRect::new(
        ox + RING_INNER + 1,
        oy - TEXT_SIZE / 2,
        RING_OUTER - RING_INNER - 2,
        TEXT_SIZE,
    );
    canvas.fill_rect(rect, 2, CornerMask::ALL, Rgba8::BLACK);
}

/// The rotating ring of two-digit hour labels, cut out of a filled annulus.
///
/// All 24 glyph paths and the two ring circles accumulate into one even-odd
/// region: the circles fill the annulus, and every glyph outline inside it
/// flips coverage back off, leaving the backdrop visible as the text.
fn draw_hour_ring(state: &AnimationState, canvas: &mut dyn Canvas) -> OrreryResult<()> {
    let origin = state.origin();
    let text_radius = Fixed::from_int(RING_TEXT);

    canvas.begin_fill(FillStyle::opaque(Rgba8::WHITE))?;

    if let Some(glyphs) = state.glyphs() {
        let em = glyphs.units_per_em();
        // Glyph space is y-up; the negative source axis flips it onto the
        // screen.
        let scale = ScaleMap::new((em, -em), (TEXT_SIZE, TEXT_SIZE));
        for h in 0..HOURS {
            let angle = state.rotation() + Angle::from_hour(h);
            canvas.set_transform(Transform {
                offset: polar_point(origin, text_radius, angle),
                rotation: Angle::from_raw(QUARTER_TURN) + angle,
                scale,
            });
            let text = format!("{h:02}");
            canvas.draw_text(&text, glyphs, TextAlign::Left, TextAnchor::Middle);
        }
    }

    canvas.plot_circle(state.center(), Fixed::from_int(RING_INNER));
    canvas.plot_circle(state.center(), Fixed::from_int(RING_OUTER));
    canvas.end_fill()
}

/// A static ring of 24 thin marks pointing inward from the annulus edge.
/// The same four local points are drawn for every hour; only the rotation
/// changes, and it never includes the animation angle.
fn draw_tick_ring(state: &AnimationState, canvas: &mut dyn Canvas) -> OrreryResult<()> {
    let outer = Fixed::from_int(RING_INNER);
    let inner = Fixed::from_int(RING_INNER - TICK_LEN);
    let half = Fixed::HALF;
    let points = [
        FPoint::new(outer, half),
        FPoint::new(outer, -half),
        FPoint::new(inner, -half),
        FPoint::new(inner, half),
    ];

    canvas.begin_fill(FillStyle::opaque(Rgba8::BLACK))?;
    for h in 0..HOURS {
        canvas.set_transform(Transform {
            offset: state.origin(),
            rotation: Angle::from_hour(h),
            scale: ScaleMap::IDENTITY,
        });
        canvas.draw_path(&points);
    }
    canvas.end_fill()
}

/// A counter-rotating lens shape traced from four cubic bezier segments in
/// a 60-unit design space, displayed at 40 units.
fn draw_ornament(state: &AnimationState, canvas: &mut dyn Canvas) -> OrreryResult<()> {
    canvas.begin_fill(FillStyle::opaque(Rgba8::BLACK))?;
    canvas.set_transform(Transform {
        offset: state.origin(),
        rotation: -state.rotation(),
        scale: ScaleMap::new((60, 60), (40, 40)),
    });
    let p = FPoint::from_int;
    canvas.move_to(p(-20, -50));
    canvas.curve_to(p(-25, -60), p(25, -60), p(20, -50));
    canvas.curve_to(p(0, 0), p(0, 0), p(20, 50));
    canvas.curve_to(p(25, 60), p(-25, 60), p(-20, 50));
    canvas.curve_to(p(0, 0), p(0, 0), p(-20, -50));
    canvas.end_fill()
}

/// Two translucent dots orbiting the center half a turn apart.
fn draw_orbit_pair(state: &AnimationState, canvas: &mut dyn Canvas) -> OrreryResult<()> {
    let orbit = Fixed::from_int(ORBIT_RADIUS);
    let a = polar_point(
        state.origin(),
        orbit,
        state.rotation() + Angle::from_hour(6),
    );
    let b = polar_point(
        state.origin(),
        orbit,
        state.rotation() + Angle::from_hour(18),
    );

    canvas.begin_fill(FillStyle {
        color: LIBERTY,
        bias: -2,
    })?;
    canvas.plot_circle(a, Fixed::from_int(ORBIT_DOT));
    canvas.plot_circle(b, Fixed::from_int(ORBIT_DOT));
    canvas.end_fill()
}
