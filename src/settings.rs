//! Presentation preferences
//!
//! Nothing here affects the simulation; the frontend reads these.

use serde::{Deserialize, Serialize};

use crate::consts::TARGET_FPS;

/// Frontend settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Frame rate cap for the driver loop. Motion is per frame, so this
    /// also sets game speed.
    pub target_fps: u32,
    /// Show FPS counter
    pub show_fps: bool,
    /// Use the kitty keyboard protocol for exact key release events when
    /// the terminal supports it
    pub keyboard_enhancement: bool,
    /// Without release events, a key counts as held this long after its
    /// last press/repeat (milliseconds). Must exceed the OS auto-repeat
    /// delay, or a held key moves, stalls until the first repeat, then
    /// resumes.
    pub key_hold_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target_fps: TARGET_FPS,
            show_fps: false,
            keyboard_enhancement: true,
            key_hold_ms: 300,
        }
    }
}

impl Settings {
    /// Effective frame rate (never zero)
    pub fn fps(&self) -> u32 {
        self.target_fps.max(1)
    }

    /// Duration of one frame at the target rate
    pub fn frame_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / self.fps() as f64)
    }
}
