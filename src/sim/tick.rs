//! Per-frame simulation tick
//!
//! Advances the session by exactly one frame in a fixed order: spawn, move,
//! score, collide, draw, speed up. Scoring and collisions always see obstacles
//! in their post-move positions; the speed bump lands after the frame so the
//! first frame runs at the initial speed.

use rand::Rng;

use super::bounds::Bounds;
use super::coin::Coin;
use super::collision::check_collisions;
use super::difficulty::{choose_obstacle_kind, coin_due, difficulty, find_coin_y, obstacle_due};
use super::obstacle::{Obstacle, ObstacleShape};
use super::state::{GameEvent, GameState};
use crate::renderer::RenderTarget;
use crate::renderer::scene::{draw_entity, draw_scenery};

/// What the frame did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// The player hit an obstacle
    GameOver { final_score: u32 },
}

/// Advance the game state by one frame.
///
/// Events are appended to `events` in the order they happen. `target` may be
/// `None` for headless simulation.
pub fn tick(
    state: &mut GameState,
    mut target: Option<&mut dyn RenderTarget>,
    events: &mut Vec<GameEvent>,
) -> TickOutcome {
    state.frame_count += 1;

    if let Some(t) = target.as_deref_mut() {
        draw_scenery(t, &state.world);
    }

    spawn_entities(state);

    state.player.update();
    update_obstacles(state, events);
    update_coins(state);

    let outcome = resolve_collisions(state, events);

    if let Some(t) = target {
        let spin_speed = state.settings.coins.spin_speed;
        for entity in state.entities() {
            draw_entity(t, entity, spin_speed);
        }
    }

    state.game_speed += state.settings.world.speed_increment;
    events.push(GameEvent::PlayerMove(state.player.y()));

    outcome
}

/// Run the spawn policies: obstacles first, then coins
pub fn spawn_entities(state: &mut GameState) {
    let frame = state.frame_count;

    if state.features.obstacles
        && obstacle_due(frame, state.last_obstacle_spawn_frame, &state.settings.difficulty)
    {
        spawn_obstacle(state);
        state.last_obstacle_spawn_frame = frame;
    }

    if state.features.coins && coin_due(frame, state.last_coin_spawn_frame, &state.settings.coins) {
        // Cadence advances even when placement fails; no retry next frame
        state.last_coin_spawn_frame = frame;
        spawn_coin(state);
    }
}

fn spawn_obstacle(state: &mut GameState) {
    let d = difficulty(state.frame_count, &state.settings.difficulty);
    let r: f32 = state.rng.random();
    let kind = choose_obstacle_kind(r, d, &state.settings.difficulty);
    let shape = ObstacleShape::generate(
        kind,
        d,
        state.world.ground_line,
        state.player.body.size.y,
        &state.settings.obstacles,
        &mut state.rng,
    );

    log::debug!(
        "frame {}: spawn {} obstacle {:.0}x{:.0} (difficulty {:.2})",
        state.frame_count,
        kind.as_str(),
        shape.width,
        shape.height,
        d
    );
    state
        .obstacles
        .push(Obstacle::new(state.world.width, shape, state.settings.obstacles.points));
}

fn spawn_coin(state: &mut GameState) {
    let spawn_x = state.world.width;
    let blockers: Vec<Bounds> = state.obstacles.iter().map(|o| o.body.bounds()).collect();
    let coins = &state.settings.coins;

    match find_coin_y(spawn_x, state.world.ground_line, &blockers, coins, &mut state.rng) {
        Some(y) => {
            state
                .collectibles
                .push(Coin::new(spawn_x, y, coins.width, coins.height, coins.points));
        }
        None => log::debug!("frame {}: no safe coin position, skipping", state.frame_count),
    }
}

/// Scroll obstacles, award passes, drop the ones that left the screen
fn update_obstacles(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let speed = state.game_speed as f32;
    let player_x = state.player.x();

    for obstacle in &mut state.obstacles {
        obstacle.update(speed);
        let points = obstacle.check_passed(player_x);
        if points > 0 {
            state.score += points;
            events.push(GameEvent::Score(state.score));
        }
    }
    state.obstacles.retain(|o| o.body.active);
}

fn update_coins(state: &mut GameState) {
    let speed = state.game_speed as f32;
    for coin in &mut state.collectibles {
        coin.update(speed);
    }
    state.collectibles.retain(|c| c.body.active);
}

fn resolve_collisions(state: &mut GameState, events: &mut Vec<GameEvent>) -> TickOutcome {
    let player = state.player.body.bounds();
    let result = check_collisions(&player, &state.obstacles, &mut state.collectibles);

    if let Some(index) = result.fatal {
        let final_score = state.final_score();
        log::info!(
            "frame {}: hit {} obstacle, score {} x {} coins -> {}",
            state.frame_count,
            state.obstacles[index].kind.as_str(),
            state.score,
            state.coins,
            final_score
        );
        events.push(GameEvent::GameOver(final_score));
        return TickOutcome::GameOver { final_score };
    }

    for _ in 0..result.collected {
        state.coins += 1;
        events.push(GameEvent::Coins(state.coins));
    }
    if result.coin_points > 0 {
        state.score += result.coin_points;
        events.push(GameEvent::Score(state.score));
    }
    state.collectibles.retain(|c| c.body.active);

    TickOutcome::Continue
}
