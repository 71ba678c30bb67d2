//! Host-runtime glue: the cooperative tick loop that owns the animation
//! state, the raster surface, and the re-arming timer.
//!
//! Everything runs on one logical thread: the timer fires, the tick handler
//! advances the state and marks the surface dirty, the redraw handler
//! composes and rasterizes a frame, and the timer re-arms. Shutdown cancels
//! the timer before any resource is released so a pending callback can
//! never touch a dead surface.

use std::time::{Duration, Instant};

use crate::canvas::raster::{FrameRgba, RasterCanvas};
use crate::compose::compose_frame;
use crate::config::{FaceConfig, GlyphPolicy};
use crate::foundation::error::{OrreryError, OrreryResult};
use crate::glyph::{FontGlyphSource, GlyphPathSource};
use crate::state::AnimationState;

/// A one-shot timer that the tick handler re-arms after every fire, with
/// optional wall-clock pacing. Once cancelled it never fires again.
pub struct TickTimer {
    interval: Duration,
    paced: bool,
    armed: bool,
    next: Option<Instant>,
}

impl TickTimer {
    pub fn register(interval: Duration, paced: bool) -> Self {
        TickTimer {
            interval,
            paced,
            armed: true,
            next: paced.then(|| Instant::now() + interval),
        }
    }

    /// Waits for the deadline (when paced) and consumes the arming.
    /// Returns `false` if the timer is not armed.
    pub fn fire(&mut self) -> bool {
        if !self.armed {
            return false;
        }
        if let Some(deadline) = self.next {
            let now = Instant::now();
            if deadline > now {
                std::thread::sleep(deadline - now);
            }
        }
        self.armed = false;
        true
    }

    /// Arms the timer for one more interval.
    pub fn rearm(&mut self) {
        self.armed = true;
        if self.paced {
            // Advance from the previous deadline, not from now, so pacing
            // does not drift by the per-tick processing time.
            self.next = Some(self.next.unwrap_or_else(Instant::now) + self.interval);
        }
    }

    pub fn cancel(&mut self) {
        self.armed = false;
        self.next = None;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

/// Totals returned by [`FaceApp::run`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunStats {
    pub ticks: u64,
    pub frames: u64,
}

/// The demo application: animation state, raster surface, dirty flag, and
/// the tick timer, driven strictly sequentially.
pub struct FaceApp {
    state: AnimationState,
    canvas: RasterCanvas,
    timer: TickTimer,
    dirty: bool,
}

impl FaceApp {
    /// Builds the app from config, loading the glyph source according to
    /// the configured startup policy.
    pub fn new(config: &FaceConfig) -> OrreryResult<Self> {
        let glyphs = load_glyphs(config)?;
        Self::with_glyphs(config, glyphs)
    }

    /// Builds the app with an already-constructed glyph source (or none).
    /// Used by tests and embedders that do not load fonts from disk.
    pub fn with_glyphs(
        config: &FaceConfig,
        glyphs: Option<Box<dyn GlyphPathSource>>,
    ) -> OrreryResult<Self> {
        config.validate()?;
        let canvas = RasterCanvas::new(config.width, config.height)?;
        let state = AnimationState::new(canvas.bounds(), config.step, glyphs);
        let timer = TickTimer::register(Duration::from_millis(config.tick_ms), config.paced);
        tracing::info!(
            width = config.width,
            height = config.height,
            tick_ms = config.tick_ms,
            step = config.step,
            "face app ready"
        );
        Ok(FaceApp {
            state,
            canvas,
            timer,
            dirty: false,
        })
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    /// Marks the surface dirty without advancing the animation, as a host
    /// does for the initial expose of a window.
    pub fn expose(&mut self) {
        self.dirty = true;
    }

    /// Timer-tick handler: advance the state, mark the surface dirty,
    /// re-arm the timer.
    pub fn tick(&mut self) {
        self.state.advance();
        self.dirty = true;
        self.timer.rearm();
        tracing::trace!(rotation = self.state.rotation().raw(), "tick");
    }

    /// Redraw handler: composes and rasterizes a frame if the surface is
    /// dirty, otherwise does nothing.
    pub fn redraw(&mut self) -> OrreryResult<Option<FrameRgba>> {
        if !self.dirty {
            return Ok(None);
        }
        let bounds = self.canvas.bounds();
        compose_frame(&self.state, bounds, &mut self.canvas)?;
        self.dirty = false;
        Ok(Some(self.canvas.finish_frame()?))
    }

    /// Drives the loop for up to `ticks` timer fires, handing each rendered
    /// frame to `sink`. Stops early if the timer is cancelled.
    pub fn run(
        &mut self,
        ticks: u64,
        mut sink: impl FnMut(u64, FrameRgba) -> OrreryResult<()>,
    ) -> OrreryResult<RunStats> {
        let mut stats = RunStats { ticks: 0, frames: 0 };
        for i in 0..ticks {
            if !self.timer.fire() {
                break;
            }
            stats.ticks += 1;
            self.tick();
            if let Some(frame) = self.redraw()? {
                stats.frames += 1;
                sink(i, frame)?;
            }
        }
        Ok(stats)
    }

    /// Tears the app down in the required order: cancel the timer first so
    /// no callback is pending, then release the drawing surface, then the
    /// glyph source.
    pub fn shutdown(mut self) {
        self.timer.cancel();
        drop(self.canvas);
        drop(self.state);
    }
}

fn load_glyphs(config: &FaceConfig) -> OrreryResult<Option<Box<dyn GlyphPathSource>>> {
    match &config.font {
        Some(path) => match FontGlyphSource::from_file(path) {
            Ok(source) => Ok(Some(Box::new(source))),
            Err(err) => match config.glyph_policy {
                GlyphPolicy::Abort => Err(err),
                GlyphPolicy::SkipText => {
                    tracing::warn!(%err, "glyph load failed, rendering without labels");
                    Ok(None)
                }
            },
        },
        None => match config.glyph_policy {
            GlyphPolicy::Abort => Err(OrreryError::font(
                "no font configured; set one or use the skip-text glyph policy",
            )),
            GlyphPolicy::SkipText => {
                tracing::warn!("no font configured, rendering without labels");
                Ok(None)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_fires_once_per_arm() {
        let mut timer = TickTimer::register(Duration::from_millis(5), false);
        assert!(timer.fire());
        assert!(!timer.fire());
        timer.rearm();
        assert!(timer.fire());
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut timer = TickTimer::register(Duration::from_millis(5), false);
        timer.cancel();
        assert!(!timer.fire());
        timer.rearm();
        timer.cancel();
        assert!(!timer.fire());
    }

    #[test]
    fn missing_font_honors_policy() {
        let abort = FaceConfig::default();
        assert!(matches!(
            FaceApp::new(&abort),
            Err(OrreryError::Font(_))
        ));

        let skip = FaceConfig {
            glyph_policy: GlyphPolicy::SkipText,
            ..FaceConfig::default()
        };
        let app = FaceApp::new(&skip).unwrap();
        assert!(app.state().glyphs().is_none());
    }
}
