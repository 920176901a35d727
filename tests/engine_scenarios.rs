//! End-to-end engine scenarios driven by a manual scheduler

use std::cell::RefCell;
use std::rc::Rc;

use bored_runner::consts::*;
use bored_runner::platform::ManualScheduler;
use bored_runner::renderer::{RecordingSurface, palette};
use bored_runner::sim::{Obstacle, ObstacleKind, ObstacleShape, final_score};
use bored_runner::{Feature, GameEngine, GameEvent, GamePhase, Settings};

type Engine = GameEngine<ManualScheduler, RecordingSurface>;

fn engine_with_seed(seed: u64) -> Engine {
    let settings = Settings {
        seed: Some(seed),
        ..Default::default()
    };
    let mut engine = GameEngine::new(settings, ManualScheduler::new());
    engine.init(RecordingSurface::new(800.0, 300.0));
    engine
}

fn record(engine: &mut Engine) -> Rc<RefCell<Vec<GameEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    engine.on_event(move |e| sink.borrow_mut().push(*e));
    events
}

/// Deliver up to `frames` due frames; returns how many ran
fn pump(engine: &mut Engine, frames: usize) -> usize {
    let mut delivered = 0;
    for _ in 0..frames {
        let Some(handle) = engine.scheduler_mut().take_due() else {
            break;
        };
        engine.on_frame(handle);
        delivered += 1;
    }
    delivered
}

fn game_overs(events: &[GameEvent]) -> Vec<u32> {
    events
        .iter()
        .filter_map(|e| match e {
            GameEvent::GameOver(score) => Some(*score),
            _ => None,
        })
        .collect()
}

fn block_player(engine: &mut Engine) {
    let state = engine.state_mut();
    let player = state.player.body.bounds();
    let obstacle = Obstacle::new(
        player.x + state.game_speed as f32,
        ObstacleShape {
            kind: ObstacleKind::Ground,
            width: 30.0,
            height: 40.0,
            y: state.world.ground_line - 40.0,
        },
        OBSTACLE_POINTS,
    );
    state.obstacles.push(obstacle);
}

#[test]
fn disabled_features_never_score_or_end() {
    let mut engine = engine_with_seed(11);
    engine.set_feature(Feature::Obstacles, false);
    engine.set_feature(Feature::Coins, false);
    let events = record(&mut engine);

    engine.start();
    assert_eq!(pump(&mut engine, 2000), 2000);

    let state = engine.state();
    assert_eq!(state.score, 0);
    assert_eq!(state.coins, 0);
    assert!(state.obstacles.is_empty());
    assert!(state.collectibles.is_empty());
    assert_eq!(engine.phase(), GamePhase::Running);

    let events = events.borrow();
    assert_eq!(events.len(), 2000);
    assert!(events.iter().all(|e| matches!(e, GameEvent::PlayerMove(_))));
}

#[test]
fn forced_collision_emits_one_game_over() {
    let mut engine = engine_with_seed(3);
    engine.set_feature(Feature::Obstacles, false);
    engine.set_feature(Feature::Coins, false);
    let events = record(&mut engine);

    engine.start();
    pump(&mut engine, 30);
    engine.state_mut().score = 30;
    block_player(&mut engine);

    pump(&mut engine, 1);
    assert_eq!(engine.phase(), GamePhase::Over);
    assert_eq!(engine.scheduler().outstanding(), 0);
    assert_eq!(game_overs(&events.borrow()), vec![30]);

    // The loop is finished; nothing else is delivered
    assert_eq!(pump(&mut engine, 10), 0);
    assert!(!engine.jump());
    engine.toggle_pause();
    assert_eq!(engine.phase(), GamePhase::Over);
    assert_eq!(game_overs(&events.borrow()).len(), 1);
}

#[test]
fn game_over_applies_coin_multiplier() {
    let mut engine = engine_with_seed(3);
    engine.set_feature(Feature::Obstacles, false);
    engine.set_feature(Feature::Coins, false);
    let events = record(&mut engine);

    engine.start();
    pump(&mut engine, 5);
    {
        let state = engine.state_mut();
        state.score = 100;
        state.coins = 5;
    }
    block_player(&mut engine);
    pump(&mut engine, 1);

    assert_eq!(game_overs(&events.borrow()), vec![150]);
}

#[test]
fn idle_runner_eventually_crashes() {
    let mut engine = engine_with_seed(2024);
    let events = record(&mut engine);

    engine.start();
    pump(&mut engine, 2000);

    assert_eq!(engine.phase(), GamePhase::Over);
    let state = engine.state();
    let expected = final_score(state.score, state.coins, COIN_MULTIPLIER);
    assert_eq!(game_overs(&events.borrow()), vec![expected]);
}

#[test]
fn stale_handle_is_ignored() {
    let mut engine = engine_with_seed(5);
    engine.start();
    pump(&mut engine, 10);
    let old = engine.scheduler().peek().expect("frame pending");

    engine.toggle_pause();
    engine.toggle_pause();
    // The pre-pause handle was cancelled; delivering it anyway does nothing
    engine.on_frame(old);
    assert_eq!(engine.state().frame_count, 10);

    pump(&mut engine, 1);
    assert_eq!(engine.state().frame_count, 11);
}

#[test]
fn pause_freezes_the_frame_counter() {
    let mut engine = engine_with_seed(5);
    engine.start();
    pump(&mut engine, 20);
    let speed = engine.state().game_speed;

    engine.toggle_pause();
    assert_eq!(pump(&mut engine, 50), 0);
    assert_eq!(engine.state().frame_count, 20);
    assert_eq!(engine.state().game_speed, speed);

    engine.toggle_pause();
    pump(&mut engine, 1);
    assert_eq!(engine.state().frame_count, 21);
}

#[test]
fn restart_resets_the_session() {
    let mut engine = engine_with_seed(8);
    engine.start();
    pump(&mut engine, 300);
    engine.state_mut().score = 90;

    engine.start();
    let state = engine.state();
    assert_eq!(state.frame_count, 0);
    assert_eq!(state.score, 0);
    assert_eq!(state.coins, 0);
    assert_eq!(state.game_speed, INITIAL_GAME_SPEED);
    assert!(state.obstacles.is_empty());
    assert_eq!(engine.scheduler().outstanding(), 1);
}

#[test]
fn same_seed_same_run() {
    let run = |seed| {
        let mut engine = engine_with_seed(seed);
        let events = record(&mut engine);
        engine.start();
        pump(&mut engine, 1500);
        let events = events.borrow().clone();
        (engine.state().frame_count, events)
    };
    assert_eq!(run(77), run(77));
}

#[test]
fn frames_are_drawn_to_the_target() {
    let mut engine = engine_with_seed(1);
    engine.start();
    pump(&mut engine, 3);

    let surface = engine.target().expect("target bound");
    assert_eq!(surface.frames, 3);
    // Only the last frame's commands are kept; scenery has no obstacle fills
    assert_eq!(surface.fills_of(palette::OBSTACLE), 0);
    assert!(!surface.commands.is_empty());
}

#[test]
fn jump_lifts_the_player() {
    let mut engine = engine_with_seed(1);
    engine.set_feature(Feature::Obstacles, false);
    engine.start();
    let ground_y = engine.state().player.ground_y;

    assert!(engine.jump());
    pump(&mut engine, 5);
    assert!(engine.state().player.y() < ground_y);
    assert!(!engine.jump());
}
