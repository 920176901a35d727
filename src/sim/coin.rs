//! Coins: scrolling pickups that multiply the final score

use serde::{Deserialize, Serialize};

use super::entity::Body;

/// A spinning coin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub body: Body,
    pub collected: bool,
    /// Always 0 with default tuning - coins pay out via the multiplier
    pub point_value: u32,
    /// Animation counter, advanced once per update
    pub spin_frame: u32,
}

impl Coin {
    pub fn new(x: f32, y: f32, width: f32, height: f32, point_value: u32) -> Self {
        Self {
            body: Body::new(x, y, width, height),
            collected: false,
            point_value,
            spin_frame: 0,
        }
    }

    pub fn update(&mut self, game_speed: f32) {
        self.body.scroll(game_speed);
        self.spin_frame = self.spin_frame.wrapping_add(1);
    }

    /// Pick the coin up. Only the first call pays out.
    pub fn collect(&mut self) -> u32 {
        if self.collected {
            return 0;
        }
        self.collected = true;
        self.body.destroy();
        self.point_value
    }

    /// Horizontal scale of the spin (-1..=1); negative shows the back face
    pub fn spin_scale(&self, spin_speed: f32) -> f32 {
        (self.spin_frame as f32 * spin_speed).cos()
    }
}

/// Final score after applying the coin multiplier, floored
pub fn final_score(score: u32, coins: u32, multiplier: f64) -> u32 {
    let total = score as f64 * (1.0 + coins as f64 * multiplier);
    total.floor() as u32
}
