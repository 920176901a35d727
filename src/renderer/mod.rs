//! 2D rendering module
//!
//! The simulation draws through [`RenderTarget`], a minimal immediate-mode
//! surface (rectangles and lines). The browser backs it with a canvas 2D
//! context; headless runs and tests use [`RecordingSurface`].

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recorder;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recorder::{DrawCommand, RecordingSurface};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// From a 0xRRGGBB literal
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: (rgb >> 16) as u8,
            g: (rgb >> 8) as u8,
            b: rgb as u8,
        }
    }

    /// CSS form, e.g. `#f87171`
    pub fn to_css(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Terminal-style palette
pub mod palette {
    use super::Color;

    pub const BACKGROUND: Color = Color::hex(0x000000);
    pub const GROUND: Color = Color::hex(0x404040);
    pub const OBSTACLE: Color = Color::hex(0xf87171);
    pub const OBSTACLE_DARK: Color = Color::hex(0xdc2626);
    pub const COIN: Color = Color::hex(0x4ade80);
    pub const COIN_DARK: Color = Color::hex(0x22c55e);
    pub const COIN_OUTLINE: Color = Color::hex(0x166534);
}

/// A 2D drawable surface
pub trait RenderTarget {
    /// Surface size in scene pixels (width, height)
    fn size(&self) -> (f32, f32);

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);

    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color, line_width: f32);

    fn line(&mut self, from: Vec2, to: Vec2, color: Color, line_width: f32);

    /// Wipe the whole surface (start of a frame)
    fn clear(&mut self, color: Color) {
        let (w, h) = self.size();
        self.fill_rect(0.0, 0.0, w, h, color);
    }
}
