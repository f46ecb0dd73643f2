//! Render-facing snapshot of the animated text.
//!
//! The engine never draws. Hosts implement [`RenderSink`] and receive one
//! [`UnitFrame`] per drawable unit, in reading order.

use crate::engine::Phase;
use crate::types::{Color, UnitId, Vec2};
use serde::{Deserialize, Serialize};

/// Everything needed to draw one unit at the current instant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitFrame {
    pub unit_id: UnitId,
    pub text: String,
    pub letter_index: usize,
    pub word_index: usize,
    pub line: usize,
    /// Top-left of the unit's rest position inside the container.
    pub origin: Vec2,
    pub color: Color,
    pub visible: bool,
    pub opacity: f32,
    /// Main-phase displacement from `origin`.
    pub offset: Vec2,
    /// Degrees.
    pub rotation: f32,
    pub phase: Phase,
}

impl UnitFrame {
    /// Final drawing position (`origin + offset`).
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.origin.x + self.offset.x, self.origin.y + self.offset.y)
    }
}

/// Receives a frame of units. Line breaks are never passed to `draw_unit`.
pub trait RenderSink {
    /// Called once before the first unit with the size of the text block.
    fn begin_frame(&mut self, _size: Vec2) {}

    fn draw_unit(&mut self, frame: &UnitFrame);

    fn end_frame(&mut self) {}
}

/// Collects frames in memory.
#[derive(Clone, Debug, Default)]
pub struct FrameRecorder {
    pub frames: Vec<Vec<UnitFrame>>,
    current: Vec<UnitFrame>,
}

impl RenderSink for FrameRecorder {
    fn begin_frame(&mut self, _size: Vec2) {
        self.current.clear();
    }

    fn draw_unit(&mut self, frame: &UnitFrame) {
        self.current.push(frame.clone());
    }

    fn end_frame(&mut self) {
        self.frames.push(std::mem::take(&mut self.current));
    }
}
