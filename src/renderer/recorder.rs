//! Headless render target that records draw calls
//!
//! Keeps only the commands of the current frame: a `clear` starts a new one.

use glam::Vec2;
use serde::Serialize;

use super::{Color, RenderTarget};

/// One recorded draw call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    Clear {
        color: Color,
    },
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
    StrokeRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
        line_width: f32,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
        line_width: f32,
    },
}

/// In-memory surface for native runs and tests
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub width: f32,
    pub height: f32,
    /// Commands since the last clear
    pub commands: Vec<DrawCommand>,
    /// Number of clears seen, i.e. frames drawn
    pub frames: u64,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
            frames: 0,
        }
    }

    /// Resize, as a host would on a layout change
    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Filled rectangles in the current frame with the given color
    pub fn fills_of(&self, color: Color) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::FillRect { color: fill, .. } if *fill == color))
            .count()
    }
}

impl RenderTarget for RecordingSurface {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.commands.push(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color, line_width: f32) {
        self.commands.push(DrawCommand::StrokeRect {
            x,
            y,
            width,
            height,
            color,
            line_width,
        });
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Color, line_width: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            line_width,
        });
    }

    fn clear(&mut self, color: Color) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { color });
        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::palette;

    #[test]
    fn test_clear_starts_new_frame() {
        let mut surface = RecordingSurface::new(400.0, 200.0);
        surface.fill_rect(0.0, 0.0, 10.0, 10.0, palette::OBSTACLE);
        surface.clear(palette::BACKGROUND);
        surface.fill_rect(5.0, 5.0, 10.0, 10.0, palette::OBSTACLE);

        assert_eq!(surface.frames, 1);
        assert_eq!(surface.commands.len(), 2);
        assert_eq!(surface.fills_of(palette::OBSTACLE), 1);
        assert_eq!(surface.size(), (400.0, 200.0));
    }
}
