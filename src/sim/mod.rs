//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-count timing only (no wall clock)
//! - Seeded RNG only
//! - Drawing goes through the `RenderTarget` trait, never a platform API

pub mod bounds;
pub mod coin;
pub mod collision;
pub mod difficulty;
pub mod entity;
pub mod obstacle;
pub mod player;
pub mod state;
pub mod tick;

pub use bounds::{Bounds, overlaps};
pub use coin::{Coin, final_score};
pub use collision::{CollisionResult, check_collisions};
pub use difficulty::{choose_obstacle_kind, difficulty, find_coin_y, spawn_interval};
pub use entity::{Body, EntityRef};
pub use obstacle::{Obstacle, ObstacleKind, ObstacleShape};
pub use player::Player;
pub use state::{GameEvent, GamePhase, GameState, World};
pub use tick::{TickOutcome, tick};
