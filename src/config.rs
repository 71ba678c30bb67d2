//! Startup configuration for the demo host.

use std::path::PathBuf;

use crate::foundation::error::{OrreryError, OrreryResult};
use crate::state::AnimationState;

/// What to do when the glyph source cannot be loaded at startup.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum GlyphPolicy {
    /// Fail startup. A face without labels is considered broken.
    #[default]
    Abort,
    /// Start anyway; the hour ring renders without label cutouts.
    SkipText,
}

/// Host configuration: display geometry, timer cadence, and the glyph
/// startup policy. The shapes of the frame itself are not configurable.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FaceConfig {
    /// Display width in pixels.
    pub width: u32,
    /// Display height in pixels.
    pub height: u32,
    /// Timer interval between ticks, milliseconds.
    pub tick_ms: u64,
    /// Rotation step per tick, angular units.
    pub step: i32,
    /// Font to load the hour-label glyphs from.
    pub font: Option<PathBuf>,
    /// Policy when the font is missing or unreadable.
    pub glyph_policy: GlyphPolicy,
    /// Pace the tick loop against the wall clock instead of running ticks
    /// back to back.
    pub paced: bool,
}

impl Default for FaceConfig {
    fn default() -> Self {
        FaceConfig {
            width: 144,
            height: 168,
            tick_ms: 35,
            step: AnimationState::DEFAULT_STEP,
            font: None,
            glyph_policy: GlyphPolicy::default(),
            paced: false,
        }
    }
}

impl FaceConfig {
    pub fn validate(&self) -> OrreryResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(OrreryError::validation("display dimensions must be > 0"));
        }
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(OrreryError::validation("display dimensions exceed u16"));
        }
        if self.tick_ms == 0 {
            return Err(OrreryError::validation("tick_ms must be > 0"));
        }
        if self.step == 0 {
            return Err(OrreryError::validation("step must be nonzero"));
        }
        Ok(())
    }
}
