//! Shared entity record and the closed set of entity kinds

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bounds::Bounds;
use super::coin::Coin;
use super::obstacle::Obstacle;
use super::player::Player;

/// Position, size and liveness shared by every simulated object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub active: bool,
}

impl Body {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
            active: true,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_pos_size(self.pos, self.size)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    /// Mark for removal at the end of the tick
    pub fn destroy(&mut self) {
        self.active = false;
    }

    /// Move left with the world; deactivates once fully past the left edge
    pub fn scroll(&mut self, speed: f32) {
        self.pos.x -= speed;
        if self.pos.x < -self.size.x {
            self.destroy();
        }
    }
}

/// Borrowed view over any entity, for iterating all of them uniformly
#[derive(Debug, Clone, Copy)]
pub enum EntityRef<'a> {
    Player(&'a Player),
    Obstacle(&'a Obstacle),
    Coin(&'a Coin),
}

impl<'a> EntityRef<'a> {
    pub fn body(&self) -> &'a Body {
        match *self {
            EntityRef::Player(p) => &p.body,
            EntityRef::Obstacle(o) => &o.body,
            EntityRef::Coin(c) => &c.body,
        }
    }

    pub fn is_active(&self) -> bool {
        self.body().active
    }
}
