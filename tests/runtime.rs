//! Tick-loop behavior of the demo app.

mod support;

use orrery::{FaceApp, FaceConfig, GlyphPolicy, OrreryError};
use support::SquareGlyphs;

fn config() -> FaceConfig {
    FaceConfig {
        glyph_policy: GlyphPolicy::SkipText,
        ..FaceConfig::default()
    }
}

#[test]
fn run_renders_one_frame_per_tick() {
    let mut app = FaceApp::with_glyphs(&config(), Some(SquareGlyphs::boxed())).unwrap();
    let mut sizes = Vec::new();
    let stats = app
        .run(3, |_, frame| {
            sizes.push((frame.width, frame.height, frame.data.len()));
            Ok(())
        })
        .unwrap();

    assert_eq!(stats.ticks, 3);
    assert_eq!(stats.frames, 3);
    assert_eq!(app.state().rotation().raw(), 300);
    assert!(sizes.iter().all(|&s| s == (144, 168, 144 * 168 * 4)));
    app.shutdown();
}

#[test]
fn redraw_without_dirty_surface_is_a_noop() {
    let mut app = FaceApp::with_glyphs(&config(), None).unwrap();
    assert!(app.redraw().unwrap().is_none());
    app.tick();
    assert!(app.redraw().unwrap().is_some());
    assert!(app.redraw().unwrap().is_none());
}

#[test]
fn expose_renders_the_initial_pose() {
    let mut app = FaceApp::with_glyphs(&config(), None).unwrap();
    app.expose();
    let frame = app.redraw().unwrap().expect("exposed surface is dirty");
    assert_eq!(app.state().rotation().raw(), 0);
    assert_eq!(frame.data.len(), 144 * 168 * 4);
}

#[test]
fn identical_runs_produce_identical_frames() {
    let run = || {
        let mut frames = Vec::new();
        let mut app = FaceApp::with_glyphs(&config(), Some(SquareGlyphs::boxed())).unwrap();
        app.run(4, |_, frame| {
            frames.push(frame.data);
            Ok(())
        })
        .unwrap();
        frames
    };
    assert_eq!(run(), run());
}

#[test]
fn sink_errors_stop_the_run() {
    let mut app = FaceApp::with_glyphs(&config(), None).unwrap();
    let err = app
        .run(5, |i, _| {
            if i == 2 {
                Err(OrreryError::canvas("sink failed"))
            } else {
                Ok(())
            }
        })
        .unwrap_err();
    assert!(matches!(err, OrreryError::Canvas(_)));
    assert_eq!(app.state().rotation().raw(), 300);
}

#[test]
fn invalid_config_is_rejected() {
    let bad = FaceConfig {
        width: 0,
        ..config()
    };
    assert!(matches!(
        FaceApp::with_glyphs(&bad, None),
        Err(OrreryError::Validation(_))
    ));
}
