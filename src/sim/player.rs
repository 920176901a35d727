//! Player physics: gravity, jump impulse and ground clamp

use serde::{Deserialize, Serialize};

use super::entity::Body;
use crate::settings::PlayerSettings;

/// The player's runner, locked to a fixed horizontal lane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    /// Vertical velocity (pixels/tick, negative is up)
    pub velocity_y: f32,
    pub jumping: bool,
    /// Resting y (ground line minus player height)
    pub ground_y: f32,
    gravity: f32,
    jump_strength: f32,
}

impl Player {
    /// Create a grounded player with default tuning for the given ground line
    pub fn new(ground_line: f32) -> Self {
        Self::with_settings(ground_line, &PlayerSettings::default(), crate::consts::GRAVITY)
    }

    pub fn with_settings(ground_line: f32, settings: &PlayerSettings, gravity: f32) -> Self {
        let ground_y = (ground_line - settings.height).max(0.0);
        Self {
            body: Body::new(settings.x, ground_y, settings.width, settings.height),
            velocity_y: 0.0,
            jumping: false,
            ground_y,
            gravity,
            jump_strength: settings.jump_strength,
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.body.pos.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.body.pos.y
    }

    pub fn is_grounded(&self) -> bool {
        !self.jumping && self.body.pos.y >= self.ground_y
    }

    /// Recompute ground level after a resize
    pub fn set_ground_level(&mut self, ground_line: f32) {
        self.ground_y = (ground_line - self.body.size.y).max(0.0);
        if !self.jumping || self.body.pos.y > self.ground_y {
            self.body.pos.y = self.ground_y;
        }
    }

    /// Apply gravity and resolve ground/ceiling contact
    pub fn update(&mut self) {
        self.velocity_y += self.gravity;
        self.body.pos.y += self.velocity_y;

        if self.body.pos.y >= self.ground_y {
            self.body.pos.y = self.ground_y;
            self.velocity_y = 0.0;
            self.jumping = false;
        } else if self.body.pos.y < 0.0 {
            // Short scenes: bump the top edge instead of leaving the canvas
            self.body.pos.y = 0.0;
            self.velocity_y = self.velocity_y.max(0.0);
        }
    }

    /// Start a jump if grounded. Returns false for mid-air attempts.
    pub fn jump(&mut self) -> bool {
        if self.is_grounded() {
            self.velocity_y = self.jump_strength;
            self.jumping = true;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.body.pos.y = self.ground_y;
        self.velocity_y = 0.0;
        self.jumping = false;
        self.body.active = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_starts_grounded() {
        let player = Player::new(255.0);
        assert_eq!(player.y(), 255.0 - PLAYER_HEIGHT);
        assert_eq!(player.x(), PLAYER_X);
        assert!(player.is_grounded());
    }

    #[test]
    fn test_jump_and_land() {
        let mut player = Player::new(255.0);
        assert!(player.jump());
        assert_eq!(player.velocity_y, JUMP_STRENGTH);

        // No double jump
        assert!(!player.jump());

        player.update();
        assert!(player.y() < player.ground_y);
        assert!(!player.jump());

        // v0 = -15, g = 0.6 -> back on the ground well within 60 ticks
        for _ in 0..60 {
            player.update();
        }
        assert_eq!(player.y(), player.ground_y);
        assert_eq!(player.velocity_y, 0.0);
        assert!(!player.jumping);
        assert!(player.jump());
    }

    #[test]
    fn test_ceiling_clamp_on_short_scene() {
        // Ground line at 170 leaves less headroom than a full jump needs
        let mut player = Player::new(170.0);
        player.jump();
        for _ in 0..80 {
            player.update();
            assert!(player.y() >= 0.0);
            assert!(player.y() <= player.ground_y);
        }
    }

    #[test]
    fn test_set_ground_level_snaps_when_grounded() {
        let mut player = Player::new(255.0);
        player.set_ground_level(300.0);
        assert_eq!(player.ground_y, 300.0 - PLAYER_HEIGHT);
        assert_eq!(player.y(), player.ground_y);
    }

    #[test]
    fn test_reset() {
        let mut player = Player::new(255.0);
        player.jump();
        player.update();
        player.body.destroy();
        player.reset();
        assert!(player.is_grounded());
        assert!(player.body.active);
        assert_eq!(player.velocity_y, 0.0);
    }
}
