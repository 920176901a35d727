//! Bored Runner - the side-scrolling obstacle dodger behind the bored button
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawn policy, per-frame tick)
//! - `engine`: Phase machine, frame bookkeeping and host events
//! - `renderer`: 2D drawing surface abstraction and scene drawing
//! - `platform`: Host frame scheduling (manual or requestAnimationFrame)
//! - `settings`: Data-driven game balance
//! - `viewport`: Responsive canvas sizing

pub mod engine;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod viewport;

pub use engine::{Feature, GameEngine, GameEvent, GamePhase};
pub use settings::{Settings, SettingsError};
pub use viewport::Viewport;

/// Game configuration constants
///
/// These are the defaults behind [`Settings`]; the simulation reads the
/// settings, never these directly.
pub mod consts {
    /// Ground line sits 85% of the way down the canvas
    pub const GROUND_RATIO: f32 = 0.85;
    /// Scroll speed at the start of a run (pixels/tick)
    pub const INITIAL_GAME_SPEED: f64 = 5.0;
    /// Scroll speed added after every tick
    pub const SPEED_INCREMENT: f64 = 0.0015;
    /// Downward acceleration (pixels/tick²)
    pub const GRAVITY: f32 = 0.6;

    /// Responsive sizing
    pub const MIN_ASPECT_RATIO: f32 = 1.0;
    pub const MAX_ASPECT_RATIO: f32 = 2.5;
    pub const MIN_WIDTH: f32 = 300.0;
    pub const MIN_HEIGHT: f32 = 200.0;

    /// Player defaults - fixed lane near the left edge
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 62.0;
    pub const PLAYER_X: f32 = 50.0;
    pub const JUMP_STRENGTH: f32 = -15.0;

    /// Obstacle size range (scaled with difficulty)
    pub const OBSTACLE_MIN_WIDTH: f32 = 20.0;
    pub const OBSTACLE_MAX_WIDTH: f32 = 60.0;
    pub const OBSTACLE_MIN_HEIGHT: f32 = 30.0;
    pub const OBSTACLE_MAX_HEIGHT: f32 = 80.0;
    /// Floating band (extra elevation above the clearance line)
    pub const FLOAT_MIN_HEIGHT: f32 = 40.0;
    pub const FLOAT_MAX_HEIGHT: f32 = 90.0;
    /// Gap kept between a grounded player's head and a floating obstacle
    pub const FLOAT_CLEARANCE: f32 = 10.0;
    pub const OBSTACLE_POINTS: u32 = 10;

    /// Frames between obstacle spawns at zero / full difficulty
    pub const BASE_SPAWN_INTERVAL: f32 = 180.0;
    pub const MIN_SPAWN_INTERVAL: f32 = 80.0;
    /// ~60 seconds at 60 fps to reach max difficulty
    pub const DIFFICULTY_RAMP_FRAMES: f32 = 3600.0;
    pub const MAX_DIFFICULTY: f32 = 1.0;

    /// Obstacle kind chances at zero / full difficulty
    pub const FLOAT_CHANCE_MIN: f32 = 0.0;
    pub const FLOAT_CHANCE_MAX: f32 = 0.3;
    pub const TALL_CHANCE_MIN: f32 = 0.0;
    pub const TALL_CHANCE_MAX: f32 = 0.4;
    pub const WIDE_CHANCE_MIN: f32 = 0.1;
    pub const WIDE_CHANCE_MAX: f32 = 0.5;

    /// Coin defaults
    pub const COIN_WIDTH: f32 = 16.0;
    pub const COIN_HEIGHT: f32 = 16.0;
    pub const COIN_SPAWN_INTERVAL: u64 = 150;
    pub const COIN_SPIN_SPEED: f32 = 0.05;
    /// Coins never add points directly
    pub const COIN_POINTS: u32 = 0;
    /// Each coin adds 10% to the final score
    pub const COIN_MULTIPLIER: f64 = 0.1;
    /// Lowest coin height above the ground line, and the random band above it
    pub const COIN_BASE_LIFT: f32 = 30.0;
    pub const COIN_LIFT_RANGE: f32 = 80.0;
    pub const COIN_SAFE_BUFFER: f32 = 20.0;
    pub const COIN_PLACEMENT_ATTEMPTS: u32 = 5;
    /// Obstacles whose right edge is this close to the spawn x are checked
    pub const COIN_LOOKAHEAD: f32 = 200.0;
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
