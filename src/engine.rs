//! Game engine: session phases, frame bookkeeping and host events
//!
//! The host binds a render target, issues commands (start, pause, jump...)
//! and delivers frame callbacks. The engine answers only through
//! [`GameEvent`]s.

use crate::platform::{FrameHandle, FrameScheduler};
use crate::renderer::RenderTarget;
use crate::settings::{FeatureFlags, Settings};
use crate::sim::state::World;
use crate::sim::tick::{TickOutcome, tick};

pub use crate::sim::state::{GameEvent, GamePhase, GameState};

/// Toggleable spawn policies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Obstacles,
    Coins,
}

impl Feature {
    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::Obstacles => "obstacles",
            Feature::Coins => "coins",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "obstacles" | "obstacle" => Some(Feature::Obstacles),
            "coins" | "coin" => Some(Feature::Coins),
            _ => None,
        }
    }
}

/// Single event listener
pub type EventListener = Box<dyn FnMut(&GameEvent)>;

/// Events kept for [`GameEngine::drain_events`] while no listener is set
pub const MAX_QUEUED_EVENTS: usize = 1024;

/// Runs sessions of the game against a host scheduler and render target.
///
/// Without a listener, events wait in a queue for
/// [`drain_events`](Self::drain_events). Hosts that never drain lose the
/// oldest `playerMove` events once [`MAX_QUEUED_EVENTS`] is reached; score,
/// coin and game-over events are always kept.
pub struct GameEngine<S: FrameScheduler, T: RenderTarget> {
    settings: Settings,
    features: FeatureFlags,
    scheduler: S,
    target: Option<T>,
    state: GameState,
    phase: GamePhase,
    /// The one outstanding frame request, if any
    pending_frame: Option<FrameHandle>,
    sessions: u64,
    events: Vec<GameEvent>,
    dropped_events: u64,
    listener: Option<EventListener>,
}

impl<S: FrameScheduler, T: RenderTarget> GameEngine<S, T> {
    pub fn new(settings: Settings, scheduler: S) -> Self {
        let features = settings.features;
        let world = World::new(800.0, 300.0, settings.world.ground_ratio);
        let state = GameState::new(settings.seed.unwrap_or(0), &settings, features, world);
        Self {
            settings,
            features,
            scheduler,
            target: None,
            state,
            phase: GamePhase::Idle,
            pending_frame: None,
            sessions: 0,
            events: Vec::new(),
            dropped_events: 0,
            listener: None,
        }
    }

    /// Bind the drawing surface. Required before [`start`](Self::start).
    pub fn init(&mut self, target: T) {
        let world = self.world_for(&target);
        log::info!(
            "Render target bound: {}x{} (ground at {})",
            world.width,
            world.height,
            world.ground_line
        );
        self.target = Some(target);
        self.state.set_world(world);
    }

    /// Re-read the target size after the host resized it
    pub fn resize(&mut self) {
        let Some(target) = self.target.as_ref() else {
            return;
        };
        let world = self.world_for(target);
        log::debug!("Resized to {}x{}", world.width, world.height);
        self.state.set_world(world);
    }

    /// Register the event listener, replacing any previous one.
    ///
    /// The listener runs while the engine is mid-command; it must not call
    /// back into the engine synchronously.
    pub fn on_event(&mut self, listener: impl FnMut(&GameEvent) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Take queued events (only accumulates while no listener is set)
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// `playerMove` events discarded because the queue hit its cap
    pub fn dropped_events(&self) -> u64 {
        self.dropped_events
    }

    pub fn set_feature(&mut self, feature: Feature, enabled: bool) {
        match feature {
            Feature::Obstacles => self.features.obstacles = enabled,
            Feature::Coins => self.features.coins = enabled,
        }
        self.settings.features = self.features;
        self.state.features = self.features;
        log::info!("Feature {} {}", feature.as_str(), if enabled { "on" } else { "off" });
    }

    /// String form for hosts; returns false for unknown names
    pub fn set_feature_by_name(&mut self, name: &str, enabled: bool) -> bool {
        match Feature::from_name(name) {
            Some(feature) => {
                self.set_feature(feature, enabled);
                true
            }
            None => {
                log::warn!("Unknown feature: {}", name);
                false
            }
        }
    }

    /// Begin a fresh session. While running this is an implicit restart.
    pub fn start(&mut self) {
        let Some(target) = self.target.as_ref() else {
            log::warn!("start() before init(); ignoring");
            return;
        };
        let world = self.world_for(target);

        self.cancel_pending_frame();
        self.sessions += 1;
        let seed = self.settings.seed.unwrap_or_else(rand::random);
        self.state = GameState::new(seed, &self.settings, self.features, world);
        self.phase = GamePhase::Running;
        self.schedule_frame();

        log::info!("Session {} started with seed {}", self.sessions, seed);
    }

    /// Tear down the frame loop
    pub fn stop(&mut self) {
        self.cancel_pending_frame();
        if matches!(self.phase, GamePhase::Running | GamePhase::Paused) {
            self.phase = GamePhase::Idle;
            log::info!("Session {} stopped at frame {}", self.sessions, self.state.frame_count);
        }
    }

    /// Running <-> Paused; no effect in other phases
    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Running => {
                self.cancel_pending_frame();
                self.phase = GamePhase::Paused;
                log::info!("Paused at frame {}", self.state.frame_count);
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Running;
                self.schedule_frame();
                log::info!("Resumed at frame {}", self.state.frame_count);
            }
            _ => {}
        }
    }

    /// Jump input. Ignored unless a session is running.
    pub fn jump(&mut self) -> bool {
        if self.phase != GamePhase::Running || self.target.is_none() {
            return false;
        }
        self.state.player.jump()
    }

    /// Host animation callback for a handle this engine requested
    pub fn on_frame(&mut self, handle: FrameHandle) {
        if self.pending_frame != Some(handle) {
            log::debug!("Ignoring stale frame {:?}", handle);
            return;
        }
        self.pending_frame = None;

        if self.phase != GamePhase::Running {
            return;
        }
        let Some(target) = self.target.as_mut() else {
            return;
        };

        let target: &mut dyn RenderTarget = target;
        match tick(&mut self.state, Some(target), &mut self.events) {
            TickOutcome::Continue => self.schedule_frame(),
            TickOutcome::GameOver { final_score } => {
                self.phase = GamePhase::Over;
                log::info!(
                    "Session {} over at frame {}: final score {}",
                    self.sessions,
                    self.state.frame_count,
                    final_score
                );
            }
        }
        self.flush_events();
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn features(&self) -> FeatureFlags {
        self.features
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Session internals, for debugging tools and tests. Hosts should rely on
    /// events instead.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn target(&self) -> Option<&T> {
        self.target.as_ref()
    }

    pub fn target_mut(&mut self) -> Option<&mut T> {
        self.target.as_mut()
    }

    fn world_for(&self, target: &T) -> World {
        let (width, height) = target.size();
        World::new(width, height, self.settings.world.ground_ratio)
    }

    fn schedule_frame(&mut self) {
        self.cancel_pending_frame();
        self.pending_frame = Some(self.scheduler.request_frame());
    }

    fn cancel_pending_frame(&mut self) {
        if let Some(handle) = self.pending_frame.take() {
            self.scheduler.cancel_frame(handle);
        }
    }

    fn flush_events(&mut self) {
        match self.listener.as_mut() {
            Some(listener) => {
                for event in self.events.drain(..) {
                    listener(&event);
                }
            }
            None => self.trim_queue(),
        }
    }

    /// Drop the oldest `playerMove` events beyond the queue cap
    fn trim_queue(&mut self) {
        let excess = self.events.len().saturating_sub(MAX_QUEUED_EVENTS);
        if excess == 0 {
            return;
        }
        if self.dropped_events == 0 {
            log::warn!(
                "Event queue over {} with no listener; dropping old playerMove events",
                MAX_QUEUED_EVENTS
            );
        }

        let mut remaining = excess;
        self.events.retain(|event| {
            if remaining > 0 && matches!(event, GameEvent::PlayerMove(_)) {
                remaining -= 1;
                false
            } else {
                true
            }
        });
        self.dropped_events += (excess - remaining) as u64;
    }
}
