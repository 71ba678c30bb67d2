//! Frame composition structure tests against the trace backend.

mod support;

use orrery::{
    Angle, AnimationState, FPoint, Fixed, PixelRect, QUARTER_TURN, TextAlign, TextAnchor,
    TraceCanvas, TraceOp, compose_frame, polar_point,
};
use support::SquareGlyphs;

const BOUNDS: PixelRect = PixelRect::new(0, 0, 144, 168);

fn state_with_glyphs() -> AnimationState {
    AnimationState::new(BOUNDS, 100, Some(SquareGlyphs::boxed()))
}

fn trace(state: &AnimationState) -> TraceCanvas {
    let mut canvas = TraceCanvas::new();
    compose_frame(state, BOUNDS, &mut canvas).unwrap();
    canvas
}

#[test]
fn passes_run_in_painters_order() {
    let state = state_with_glyphs();
    let canvas = trace(&state);

    // Background quadrants and the label backdrop precede every region.
    let first_begin = canvas
        .ops()
        .iter()
        .position(|op| matches!(op, TraceOp::BeginFill(_)))
        .unwrap();
    let rects = canvas.ops()[..first_begin]
        .iter()
        .filter(|op| matches!(op, TraceOp::FillRect { .. }))
        .count();
    assert_eq!(rects, 5);

    let regions = canvas.regions();
    assert_eq!(regions.len(), 4);

    // Region 0: 24 hour labels plus the two annulus circles.
    let texts = regions[0]
        .iter()
        .filter(|op| matches!(op, TraceOp::Text { .. }))
        .count();
    let circles = regions[0]
        .iter()
        .filter(|op| matches!(op, TraceOp::Circle { .. }))
        .count();
    assert_eq!((texts, circles), (24, 2));

    // Region 1: 24 tick marks from the same four points.
    assert_eq!(regions[1].len(), 24);
    assert!(
        regions[1]
            .iter()
            .all(|op| matches!(op, TraceOp::Path { points, .. } if points.len() == 4))
    );

    // Region 2: one move plus four cubic segments.
    assert!(matches!(regions[2][0], TraceOp::MoveTo { .. }));
    assert_eq!(
        regions[2]
            .iter()
            .filter(|op| matches!(op, TraceOp::CurveTo { .. }))
            .count(),
        4
    );
    assert_eq!(regions[2].len(), 5);

    // Region 3: the orbiting dot pair.
    assert_eq!(regions[3].len(), 2);
    assert!(
        regions[3]
            .iter()
            .all(|op| matches!(op, TraceOp::Circle { .. }))
    );
}

#[test]
fn hour_labels_are_two_digit_and_tangent() {
    let state = state_with_glyphs();
    let canvas = trace(&state);
    let regions = canvas.regions();

    let labels: Vec<(&str, &orrery::Transform)> = regions[0]
        .iter()
        .filter_map(|op| match op {
            TraceOp::Text {
                text,
                align,
                anchor,
                transform,
            } => {
                assert_eq!(*align, TextAlign::Left);
                assert_eq!(*anchor, TextAnchor::Middle);
                Some((text.as_str(), transform))
            }
            _ => None,
        })
        .collect();

    let expected: Vec<String> = (0..24).map(|h| format!("{h:02}")).collect();
    assert_eq!(
        labels.iter().map(|(t, _)| *t).collect::<Vec<_>>(),
        expected.iter().map(String::as_str).collect::<Vec<_>>()
    );

    // Each label's rotation is a quarter turn past its ring angle.
    for (h, (_, transform)) in labels.iter().enumerate() {
        let angle = state.rotation() + Angle::from_hour(h as i32);
        assert_eq!(transform.rotation, Angle::from_raw(QUARTER_TURN) + angle);
    }
}

#[test]
fn initial_label_anchor_sits_above_center() {
    let state = state_with_glyphs();
    let canvas = trace(&state);
    let regions = canvas.regions();

    let TraceOp::Text { transform, .. } = &regions[0][0] else {
        panic!("expected first region op to be a label");
    };
    // rotation 0, hour 0: anchor is radius 52 straight up from (72, 84).
    assert_eq!(transform.offset.x.to_int(), 72);
    assert_eq!(transform.offset.y.to_int(), 32);
    assert_eq!(transform.rotation, Angle::from_raw(QUARTER_TURN));
}

#[test]
fn annulus_circles_are_concentric_at_center() {
    let state = state_with_glyphs();
    let canvas = trace(&state);
    let circles: Vec<(FPoint, Fixed)> = canvas.regions()[0]
        .iter()
        .filter_map(|op| match op {
            TraceOp::Circle { center, radius } => Some((*center, *radius)),
            _ => None,
        })
        .collect();
    assert_eq!(
        circles,
        vec![
            (FPoint::from_int(72, 84), Fixed::from_int(50)),
            (FPoint::from_int(72, 84), Fixed::from_int(68)),
        ]
    );
}

#[test]
fn tick_ring_ignores_rotation() {
    let mut state = state_with_glyphs();
    let before = trace(&state);

    for _ in 0..50 {
        state.advance();
    }
    assert_eq!(state.rotation().raw(), 5_000);
    let after = trace(&state);

    assert_eq!(before.regions()[1], after.regions()[1]);

    // Spot-check one tick's rotation is the bare hour angle.
    let TraceOp::Path { transform, .. } = &after.regions()[1][3] else {
        panic!("expected path op");
    };
    assert_eq!(transform.rotation, Angle::from_hour(3));
    assert_eq!(transform.offset, FPoint::from_int(72, 84));
}

#[test]
fn orbit_pair_tracks_rotation() {
    let mut state = state_with_glyphs();
    for _ in 0..10 {
        state.advance();
    }
    assert_eq!(state.rotation().raw(), 1_000);

    let canvas = trace(&state);
    let dots: Vec<FPoint> = canvas.regions()[3]
        .iter()
        .filter_map(|op| match op {
            TraceOp::Circle { center, .. } => Some(*center),
            _ => None,
        })
        .collect();

    let origin = FPoint::from_int(72, 84);
    let orbit = Fixed::from_int(30);
    assert_eq!(
        dots,
        vec![
            polar_point(origin, orbit, Angle::from_raw(1_000) + Angle::from_hour(6)),
            polar_point(origin, orbit, Angle::from_raw(1_000) + Angle::from_hour(18)),
        ]
    );
}

#[test]
fn ornament_counter_rotates() {
    let mut state = state_with_glyphs();
    for _ in 0..10 {
        state.advance();
    }
    let canvas = trace(&state);
    let TraceOp::MoveTo { transform, .. } = &canvas.regions()[2][0] else {
        panic!("expected move op");
    };
    assert_eq!(transform.rotation, -Angle::from_raw(1_000));
    assert_eq!(transform.scale.factors(), (40.0 / 60.0, 40.0 / 60.0));
}

#[test]
fn missing_glyphs_skip_labels_but_keep_ring() {
    let state = AnimationState::new(BOUNDS, 100, None);
    let canvas = trace(&state);
    let regions = canvas.regions();
    assert_eq!(regions.len(), 4);
    assert!(
        regions[0]
            .iter()
            .all(|op| !matches!(op, TraceOp::Text { .. }))
    );
    assert_eq!(regions[0].len(), 2);
}

#[test]
fn label_count_is_rotation_independent() {
    let mut state = state_with_glyphs();
    for rounds in 0..3 {
        let canvas = trace(&state);
        let texts = canvas.regions()[0]
            .iter()
            .filter(|op| matches!(op, TraceOp::Text { .. }))
            .count();
        assert_eq!(texts, 24, "round {rounds}");
        for _ in 0..37 {
            state.advance();
        }
    }
}
