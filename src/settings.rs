//! Game tuning and feature settings
//!
//! Persisted separately from anything the host stores, in LocalStorage on the
//! web or a JSON file named by `BORED_RUNNER_SETTINGS` natively. Every field
//! falls back to the defaults in [`crate::consts`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// World scroll and physics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    /// Ground line as a fraction of canvas height
    pub ground_ratio: f32,
    /// Scroll speed is accumulated in f64 so long runs keep the linear law
    pub initial_speed: f64,
    pub speed_increment: f64,
    pub gravity: f32,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            ground_ratio: GROUND_RATIO,
            initial_speed: INITIAL_GAME_SPEED,
            speed_increment: SPEED_INCREMENT,
            gravity: GRAVITY,
        }
    }
}

/// Responsive canvas limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSettings {
    pub min_aspect_ratio: f32,
    pub max_aspect_ratio: f32,
    pub min_width: f32,
    pub min_height: f32,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            min_aspect_ratio: MIN_ASPECT_RATIO,
            max_aspect_ratio: MAX_ASPECT_RATIO,
            min_width: MIN_WIDTH,
            min_height: MIN_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    pub width: f32,
    pub height: f32,
    /// Fixed lane
    pub x: f32,
    /// Initial upward velocity (negative)
    pub jump_strength: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            x: PLAYER_X,
            jump_strength: JUMP_STRENGTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleSettings {
    pub min_width: f32,
    pub max_width: f32,
    pub min_height: f32,
    pub max_height: f32,
    pub float_min_height: f32,
    pub float_max_height: f32,
    pub float_clearance: f32,
    pub points: u32,
}

impl Default for ObstacleSettings {
    fn default() -> Self {
        Self {
            min_width: OBSTACLE_MIN_WIDTH,
            max_width: OBSTACLE_MAX_WIDTH,
            min_height: OBSTACLE_MIN_HEIGHT,
            max_height: OBSTACLE_MAX_HEIGHT,
            float_min_height: FLOAT_MIN_HEIGHT,
            float_max_height: FLOAT_MAX_HEIGHT,
            float_clearance: FLOAT_CLEARANCE,
            points: OBSTACLE_POINTS,
        }
    }
}

/// Chance at zero and full difficulty
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChanceRange {
    pub min: f32,
    pub max: f32,
}

impl ChanceRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultySettings {
    pub base_spawn_interval: f32,
    pub min_spawn_interval: f32,
    pub ramp_frames: f32,
    pub max_difficulty: f32,
    pub float_chance: ChanceRange,
    pub tall_chance: ChanceRange,
    pub wide_chance: ChanceRange,
}

impl Default for DifficultySettings {
    fn default() -> Self {
        Self {
            base_spawn_interval: BASE_SPAWN_INTERVAL,
            min_spawn_interval: MIN_SPAWN_INTERVAL,
            ramp_frames: DIFFICULTY_RAMP_FRAMES,
            max_difficulty: MAX_DIFFICULTY,
            float_chance: ChanceRange::new(FLOAT_CHANCE_MIN, FLOAT_CHANCE_MAX),
            tall_chance: ChanceRange::new(TALL_CHANCE_MIN, TALL_CHANCE_MAX),
            wide_chance: ChanceRange::new(WIDE_CHANCE_MIN, WIDE_CHANCE_MAX),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoinSettings {
    pub width: f32,
    pub height: f32,
    /// Frames between spawn attempts
    pub spawn_interval: u64,
    pub spin_speed: f32,
    pub points: u32,
    /// Final score bonus per coin
    pub multiplier: f64,
    pub base_lift: f32,
    pub lift_range: f32,
    pub safe_buffer: f32,
    pub placement_attempts: u32,
    pub lookahead: f32,
}

impl Default for CoinSettings {
    fn default() -> Self {
        Self {
            width: COIN_WIDTH,
            height: COIN_HEIGHT,
            spawn_interval: COIN_SPAWN_INTERVAL,
            spin_speed: COIN_SPIN_SPEED,
            points: COIN_POINTS,
            multiplier: COIN_MULTIPLIER,
            base_lift: COIN_BASE_LIFT,
            lift_range: COIN_LIFT_RANGE,
            safe_buffer: COIN_SAFE_BUFFER,
            placement_attempts: COIN_PLACEMENT_ATTEMPTS,
            lookahead: COIN_LOOKAHEAD,
        }
    }
}

/// Which spawn policies run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureFlags {
    pub obstacles: bool,
    pub coins: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            obstacles: true,
            coins: true,
        }
    }
}

/// Everything tunable about a run
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub world: WorldSettings,
    pub viewport: ViewportSettings,
    pub player: PlayerSettings,
    pub obstacles: ObstacleSettings,
    pub difficulty: DifficultySettings,
    pub coins: CoinSettings,
    pub features: FeatureFlags,
    /// Fixed RNG seed; `None` seeds from the clock each run
    pub seed: Option<u64>,
}

/// Rejected settings
#[derive(Debug)]
pub enum SettingsError {
    Parse(serde_json::Error),
    Io(std::io::Error),
    /// A value that must be strictly positive was not
    NotPositive { field: &'static str, value: f64 },
    /// A distance or rate that must not be negative was
    Negative { field: &'static str, value: f64 },
    /// A min/max pair is inverted
    InvertedRange { field: &'static str, min: f64, max: f64 },
    /// A chance outside `[0, 1]`
    ChanceOutOfRange { field: &'static str, value: f32 },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "invalid settings json: {e}"),
            Self::Io(e) => write!(f, "cannot read settings: {e}"),
            Self::NotPositive { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            Self::Negative { field, value } => {
                write!(f, "{field} must not be negative, got {value}")
            }
            Self::InvertedRange { field, min, max } => {
                write!(f, "{field} range is inverted: min={min} > max={max}")
            }
            Self::ChanceOutOfRange { field, value } => {
                write!(f, "{field} must be within [0, 1], got {value}")
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), SettingsError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(SettingsError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), SettingsError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(SettingsError::Negative { field, value })
    }
}

fn ordered(field: &'static str, min: f32, max: f32) -> Result<(), SettingsError> {
    if min <= max {
        Ok(())
    } else {
        Err(SettingsError::InvertedRange {
            field,
            min: min as f64,
            max: max as f64,
        })
    }
}

fn chance(field: &'static str, range: ChanceRange) -> Result<(), SettingsError> {
    for value in [range.min, range.max] {
        if !(0.0..=1.0).contains(&value) {
            return Err(SettingsError::ChanceOutOfRange { field, value });
        }
    }
    Ok(())
}

impl Settings {
    /// Parse and validate settings JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let w = &self.world;
        positive("world.ground_ratio", w.ground_ratio as f64)?;
        if w.ground_ratio > 1.0 {
            return Err(SettingsError::ChanceOutOfRange {
                field: "world.ground_ratio",
                value: w.ground_ratio,
            });
        }
        positive("world.initial_speed", w.initial_speed)?;
        non_negative("world.speed_increment", w.speed_increment)?;
        positive("world.gravity", w.gravity as f64)?;

        let v = &self.viewport;
        positive("viewport.min_aspect_ratio", v.min_aspect_ratio as f64)?;
        ordered("viewport.aspect_ratio", v.min_aspect_ratio, v.max_aspect_ratio)?;
        positive("viewport.min_width", v.min_width as f64)?;
        positive("viewport.min_height", v.min_height as f64)?;

        let p = &self.player;
        positive("player.width", p.width as f64)?;
        positive("player.height", p.height as f64)?;
        positive("player.jump_strength (upward)", -p.jump_strength as f64)?;

        let o = &self.obstacles;
        positive("obstacles.min_width", o.min_width as f64)?;
        positive("obstacles.min_height", o.min_height as f64)?;
        ordered("obstacles.width", o.min_width, o.max_width)?;
        ordered("obstacles.height", o.min_height, o.max_height)?;
        ordered("obstacles.float_height", o.float_min_height, o.float_max_height)?;
        non_negative("obstacles.float_clearance", o.float_clearance as f64)?;

        let d = &self.difficulty;
        positive("difficulty.ramp_frames", d.ramp_frames as f64)?;
        positive("difficulty.min_spawn_interval", d.min_spawn_interval as f64)?;
        ordered("difficulty.spawn_interval", d.min_spawn_interval, d.base_spawn_interval)?;
        if !(0.0..=1.0).contains(&d.max_difficulty) {
            return Err(SettingsError::ChanceOutOfRange {
                field: "difficulty.max_difficulty",
                value: d.max_difficulty,
            });
        }
        chance("difficulty.float_chance", d.float_chance)?;
        chance("difficulty.tall_chance", d.tall_chance)?;
        chance("difficulty.wide_chance", d.wide_chance)?;

        let c = &self.coins;
        positive("coins.width", c.width as f64)?;
        positive("coins.height", c.height as f64)?;
        positive("coins.spawn_interval", c.spawn_interval as f64)?;
        positive("coins.placement_attempts", c.placement_attempts as f64)?;
        non_negative("coins.multiplier", c.multiplier)?;
        non_negative("coins.base_lift", c.base_lift as f64)?;
        non_negative("coins.lift_range", c.lift_range as f64)?;
        non_negative("coins.safe_buffer", c.safe_buffer as f64)?;
        non_negative("coins.lookahead", c.lookahead as f64)?;

        Ok(())
    }

    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "bored_runner_settings";

    /// Environment variable naming a settings file (native)
    pub const ENV_VAR: &'static str = "BORED_RUNNER_SETTINGS";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Persist to LocalStorage so toggled features survive a reload
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) else {
            log::warn!("LocalStorage unavailable; settings not saved");
            return;
        };
        match self.to_json() {
            Ok(json) => {
                if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                    log::warn!("LocalStorage rejected settings");
                }
            }
            Err(e) => log::warn!("Cannot encode settings: {}", e),
        }
    }

    /// Load settings from the file named by `BORED_RUNNER_SETTINGS`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_VAR) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::load_file(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path);
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings file {}: {}", path, e);
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: impl AsRef<std::path::Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
