//! Session state and core simulation types
//!
//! Everything a run mutates lives here; a fresh `GameState` is built on every
//! start so nothing leaks between sessions.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::coin::Coin;
use super::entity::EntityRef;
use super::obstacle::Obstacle;
use super::player::Player;
use crate::settings::{FeatureFlags, Settings};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// No session, or torn down
    #[default]
    Idle,
    /// Frames are advancing
    Running,
    /// Frame loop suspended mid-run
    Paused,
    /// Run ended on a collision
    Over,
}

/// One-way notifications to the host, each with a single numeric payload
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum GameEvent {
    /// Cumulative obstacle score
    Score(u32),
    /// Cumulative coins collected
    Coins(u32),
    /// Player's vertical position, for the host's sprite overlay
    PlayerMove(f32),
    /// Final score with the coin multiplier applied
    GameOver(u32),
}

impl GameEvent {
    /// Wire name of the event
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::Score(_) => "score",
            GameEvent::Coins(_) => "coins",
            GameEvent::PlayerMove(_) => "playerMove",
            GameEvent::GameOver(_) => "gameOver",
        }
    }

    pub fn payload(&self) -> f64 {
        match *self {
            GameEvent::Score(v) | GameEvent::Coins(v) | GameEvent::GameOver(v) => v as f64,
            GameEvent::PlayerMove(y) => y as f64,
        }
    }
}

/// Scene geometry in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub width: f32,
    pub height: f32,
    /// Scene y of the ground line
    pub ground_line: f32,
}

impl World {
    pub fn new(width: f32, height: f32, ground_ratio: f32) -> Self {
        Self {
            width,
            height,
            ground_line: height * ground_ratio,
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(800.0, 300.0, crate::consts::GROUND_RATIO)
    }
}

/// Complete session state (deterministic for a given seed and input)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub settings: Settings,
    pub features: FeatureFlags,
    pub world: World,
    /// Scroll speed, grows every tick
    pub game_speed: f64,
    /// Simulation tick counter
    pub frame_count: u64,
    /// Obstacle points only; coins apply at game over
    pub score: u32,
    pub coins: u32,
    pub last_obstacle_spawn_frame: u64,
    pub last_coin_spawn_frame: u64,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub collectibles: Vec<Coin>,
}

impl GameState {
    /// Create a new session for the given world and seed
    pub fn new(seed: u64, settings: &Settings, features: FeatureFlags, world: World) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            settings: settings.clone(),
            features,
            world,
            game_speed: settings.world.initial_speed,
            frame_count: 0,
            score: 0,
            coins: 0,
            last_obstacle_spawn_frame: 0,
            last_coin_spawn_frame: 0,
            player: Player::with_settings(
                world.ground_line,
                &settings.player,
                settings.world.gravity,
            ),
            obstacles: Vec::new(),
            collectibles: Vec::new(),
        }
    }

    /// Apply a new scene size (responsive canvas)
    pub fn set_world(&mut self, world: World) {
        self.world = world;
        self.player.set_ground_level(world.ground_line);
    }

    /// Score with the coin multiplier applied
    pub fn final_score(&self) -> u32 {
        super::coin::final_score(self.score, self.coins, self.settings.coins.multiplier)
    }

    /// All active entities, player first
    pub fn entities(&self) -> impl Iterator<Item = EntityRef<'_>> {
        std::iter::once(EntityRef::Player(&self.player))
            .chain(self.obstacles.iter().map(EntityRef::Obstacle))
            .chain(self.collectibles.iter().map(EntityRef::Coin))
            .filter(|e| e.is_active())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(7, &Settings::default(), FeatureFlags::default(), World::default());
        assert_eq!(state.game_speed, INITIAL_GAME_SPEED);
        assert_eq!(state.frame_count, 0);
        assert_eq!(state.score, 0);
        assert_eq!(state.world.ground_line, 300.0 * GROUND_RATIO);
        assert_eq!(state.player.ground_y, state.world.ground_line - PLAYER_HEIGHT);
        assert_eq!(state.entities().count(), 1);
    }

    #[test]
    fn test_event_wire_format() {
        let json = serde_json::to_string(&GameEvent::PlayerMove(12.5)).unwrap();
        assert_eq!(json, r#"{"type":"playerMove","payload":12.5}"#);
        let json = serde_json::to_string(&GameEvent::GameOver(150)).unwrap();
        assert_eq!(json, r#"{"type":"gameOver","payload":150}"#);

        assert_eq!(GameEvent::Coins(3).name(), "coins");
        assert_eq!(GameEvent::Score(20).payload(), 20.0);
    }
}
