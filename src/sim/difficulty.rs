//! Difficulty ramp and spawn policy
//!
//! Pure functions of the frame counter and tuning. The only state they touch
//! is the RNG handed in by the caller.

use rand::Rng;

use super::bounds::Bounds;
use super::obstacle::ObstacleKind;
use crate::lerp;
use crate::settings::{CoinSettings, DifficultySettings};

/// Difficulty in `[0, max_difficulty]`, linear over `ramp_frames`
pub fn difficulty(frame_count: u64, settings: &DifficultySettings) -> f32 {
    let ramp = frame_count as f32 / settings.ramp_frames;
    ramp.min(settings.max_difficulty)
}

/// Frames between obstacle spawns; shrinks toward `min_spawn_interval`
pub fn spawn_interval(difficulty: f32, settings: &DifficultySettings) -> f32 {
    let base = settings.base_spawn_interval;
    let interval = base - (base - settings.min_spawn_interval) * difficulty;
    interval.max(settings.min_spawn_interval)
}

/// Whether an obstacle is due this frame
pub fn obstacle_due(frame_count: u64, last_spawn_frame: u64, settings: &DifficultySettings) -> bool {
    let d = difficulty(frame_count, settings);
    let elapsed = frame_count.saturating_sub(last_spawn_frame) as f32;
    elapsed >= spawn_interval(d, settings)
}

/// Whether a coin is due this frame
pub fn coin_due(frame_count: u64, last_spawn_frame: u64, settings: &CoinSettings) -> bool {
    frame_count.saturating_sub(last_spawn_frame) >= settings.spawn_interval
}

/// Pick an obstacle kind from one uniform sample `r` in `[0, 1)`.
///
/// Cumulative order is floating, tall, wide; leftover mass is ground.
pub fn choose_obstacle_kind(r: f32, difficulty: f32, settings: &DifficultySettings) -> ObstacleKind {
    let d = difficulty.clamp(0.0, 1.0);
    let float_chance = lerp(settings.float_chance.min, settings.float_chance.max, d);
    let tall_chance = lerp(settings.tall_chance.min, settings.tall_chance.max, d);
    let wide_chance = lerp(settings.wide_chance.min, settings.wide_chance.max, d);

    let mut cumulative = float_chance;
    if r < cumulative {
        return ObstacleKind::Floating;
    }
    cumulative += tall_chance;
    if r < cumulative {
        return ObstacleKind::Tall;
    }
    cumulative += wide_chance;
    if r < cumulative {
        return ObstacleKind::Wide;
    }
    ObstacleKind::Ground
}

/// Search for a coin y that keeps clear of nearby obstacles.
///
/// Each candidate and obstacle is inflated by `safe_buffer` before testing.
/// Returns `None` after `placement_attempts` misses; the caller skips the
/// spawn rather than retrying later.
pub fn find_coin_y<R: Rng>(
    spawn_x: f32,
    ground_line: f32,
    obstacles: &[Bounds],
    settings: &CoinSettings,
    rng: &mut R,
) -> Option<f32> {
    let nearby: Vec<Bounds> = obstacles
        .iter()
        .filter(|b| b.right() >= spawn_x - settings.lookahead)
        .map(|b| b.inflate(settings.safe_buffer))
        .collect();

    for attempt in 0..settings.placement_attempts {
        let lift = settings.base_lift + rng.random::<f32>() * settings.lift_range;
        let y = (ground_line - settings.height - lift).max(0.0);
        let candidate =
            Bounds::new(spawn_x, y, settings.width, settings.height).inflate(settings.safe_buffer);

        if !nearby.iter().any(|b| b.overlaps(&candidate)) {
            return Some(y);
        }
        log::trace!("coin placement attempt {} blocked at y={:.1}", attempt + 1, y);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_difficulty_ramp_and_clamp() {
        let s = DifficultySettings::default();
        assert_eq!(difficulty(0, &s), 0.0);
        assert!((difficulty(1800, &s) - 0.5).abs() < 1e-6);
        assert_eq!(difficulty(3600, &s), MAX_DIFFICULTY);
        assert_eq!(difficulty(100_000, &s), MAX_DIFFICULTY);
    }

    #[test]
    fn test_spawn_interval_bounds() {
        let s = DifficultySettings::default();
        assert_eq!(spawn_interval(0.0, &s), BASE_SPAWN_INTERVAL);
        assert_eq!(spawn_interval(1.0, &s), MIN_SPAWN_INTERVAL);
        assert!((spawn_interval(0.5, &s) - 130.0).abs() < 1e-4);
    }

    #[test]
    fn test_obstacle_due() {
        let s = DifficultySettings::default();
        // The interval shrinks while waiting, so the first spawn lands before 180
        assert!(!obstacle_due(175, 0, &s));
        assert!(obstacle_due(176, 0, &s));
        assert!(!obstacle_due(200, 180, &s));
    }

    #[test]
    fn test_kind_draw_at_zero_difficulty() {
        let s = DifficultySettings::default();
        // float 0, tall 0, wide 0.1
        assert_eq!(choose_obstacle_kind(0.0, 0.0, &s), ObstacleKind::Wide);
        assert_eq!(choose_obstacle_kind(0.05, 0.0, &s), ObstacleKind::Wide);
        assert_eq!(choose_obstacle_kind(0.1, 0.0, &s), ObstacleKind::Ground);
        assert_eq!(choose_obstacle_kind(0.99, 0.0, &s), ObstacleKind::Ground);
    }

    #[test]
    fn test_kind_draw_at_full_difficulty() {
        let s = DifficultySettings::default();
        // float 0.3, tall 0.4, wide 0.5 - ground is never reached
        assert_eq!(choose_obstacle_kind(0.1, 1.0, &s), ObstacleKind::Floating);
        assert_eq!(choose_obstacle_kind(0.35, 1.0, &s), ObstacleKind::Tall);
        assert_eq!(choose_obstacle_kind(0.8, 1.0, &s), ObstacleKind::Wide);
        assert_eq!(choose_obstacle_kind(0.999, 1.0, &s), ObstacleKind::Wide);
    }

    #[test]
    fn test_coin_placement_open_sky() {
        let s = CoinSettings::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let y = find_coin_y(800.0, 255.0, &[], &s, &mut rng).expect("free placement");
        let lowest = 255.0 - COIN_HEIGHT - COIN_BASE_LIFT;
        assert!(y <= lowest);
        assert!(y >= lowest - COIN_LIFT_RANGE);
    }

    #[test]
    fn test_coin_placement_gives_up_when_blocked() {
        let s = CoinSettings::default();
        let mut rng = Pcg32::seed_from_u64(1);
        // A wall covering every candidate height at the spawn column
        let wall = Bounds::new(780.0, 0.0, 60.0, 255.0);
        assert_eq!(find_coin_y(800.0, 255.0, &[wall], &s, &mut rng), None);
    }

    #[test]
    fn test_coin_placement_ignores_far_obstacles() {
        let s = CoinSettings::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let far = Bounds::new(100.0, 0.0, 60.0, 255.0);
        assert!(find_coin_y(800.0, 255.0, &[far], &s, &mut rng).is_some());
    }
}
