pub mod depth;
pub mod lighting;
pub mod logo;
pub mod punch;
pub mod shape;
pub mod timeline;

pub use timeline::AnimationState;

use crate::audio::SoundSink;
use crate::input::KeyState;

/// The logo spans `1 / LOGO_SCALE_DIVISOR` of the display's shorter side per
/// logo unit.
pub const LOGO_SCALE_DIVISOR: f32 = 10.0;

/// Virtual display size in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Display {
    pub width: f32,
    pub height: f32,
}

impl Display {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Terminal cells are drawn as two stacked pixels each.
    pub fn from_terminal(columns: u16, rows: u16) -> Self {
        Self::new(columns as f32, rows as f32 * 2.0)
    }

    pub fn center(&self) -> (f32, f32) {
        (self.width / 2.0, self.height / 2.0)
    }

    /// Pixels per logo unit
    pub fn logo_scale(&self) -> f32 {
        self.width.min(self.height) / LOGO_SCALE_DIVISOR
    }
}

/// What the logic step may use from the outside world during one tick.
pub struct Host<'a> {
    pub keys: &'a mut KeyState,
    pub audio: &'a mut dyn SoundSink,
    pub display: Display,
}

/// Result of one logic step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Continue,
    /// The intro has faded out; the application should exit
    Exit,
}
