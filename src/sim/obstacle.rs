//! Obstacles: kinds, shape generation and pass scoring

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::Body;
use crate::lerp;
use crate::settings::ObstacleSettings;

/// Obstacle shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Sits on the ground, grows with difficulty
    #[default]
    Ground,
    /// Narrow and high - needs a timely jump
    Tall,
    /// Long and low - needs a sustained jump
    Wide,
    /// Hangs above the player's head; run under or jump over
    Floating,
}

impl ObstacleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleKind::Ground => "ground",
            ObstacleKind::Tall => "tall",
            ObstacleKind::Wide => "wide",
            ObstacleKind::Floating => "floating",
        }
    }
}

/// Generated size and vertical placement for a new obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleShape {
    pub kind: ObstacleKind,
    pub width: f32,
    pub height: f32,
    pub y: f32,
}

impl ObstacleShape {
    /// Roll a shape for `kind` at the given difficulty.
    ///
    /// `ground_line` is the scene y of the ground; `player_height` sets the
    /// lower edge of the floating band.
    pub fn generate<R: Rng>(
        kind: ObstacleKind,
        difficulty: f32,
        ground_line: f32,
        player_height: f32,
        settings: &ObstacleSettings,
        rng: &mut R,
    ) -> Self {
        let s = settings;
        let width_span = s.max_width - s.min_width;
        let height_span = s.max_height - s.min_height;

        let (width, height) = match kind {
            ObstacleKind::Ground => {
                // 50% of the span at zero difficulty, the full span at max
                let scale = 0.5 + 0.5 * difficulty.clamp(0.0, 1.0);
                let width = lerp(s.min_width, s.min_width + width_span * scale, rng.random());
                let height = lerp(s.min_height, s.min_height + height_span * scale, rng.random());
                (width, height)
            }
            ObstacleKind::Tall => {
                let width = s.min_width + rng.random::<f32>() * 10.0;
                let height = lerp(s.max_height * 0.85, s.max_height, rng.random());
                (width, height)
            }
            ObstacleKind::Wide => {
                let width = (s.max_width - rng.random::<f32>() * 10.0) * 1.5;
                let height = (s.min_height + rng.random::<f32>() * 10.0) * 0.6;
                (width, height)
            }
            ObstacleKind::Floating => {
                let width = lerp(s.min_width, s.max_width, rng.random());
                (width, s.min_height)
            }
        };

        let y = match kind {
            ObstacleKind::Floating => {
                let band = s.float_max_height - s.float_min_height;
                let lift = player_height + s.float_clearance + rng.random::<f32>() * band;
                (ground_line - lift - height).max(0.0)
            }
            _ => ground_line - height,
        };

        Self {
            kind,
            width,
            height,
            y,
        }
    }
}

/// A hazard scrolling toward the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub body: Body,
    pub kind: ObstacleKind,
    /// Set once the right edge is behind the player
    pub passed: bool,
    pub point_value: u32,
}

impl Obstacle {
    pub fn new(x: f32, shape: ObstacleShape, point_value: u32) -> Self {
        Self {
            body: Body::new(x, shape.y, shape.width, shape.height),
            kind: shape.kind,
            passed: false,
            point_value,
        }
    }

    pub fn update(&mut self, game_speed: f32) {
        self.body.scroll(game_speed);
    }

    /// Points for clearing this obstacle, awarded exactly once
    pub fn check_passed(&mut self, player_x: f32) -> u32 {
        if !self.passed && self.body.right() < player_x {
            self.passed = true;
            self.point_value
        } else {
            0
        }
    }
}
