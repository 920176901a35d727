//! Collision pass between the player and everything else
//!
//! Obstacle hits are fatal and short-circuit; coin hits are additive.

use super::bounds::Bounds;
use super::coin::Coin;
use super::obstacle::Obstacle;

/// Result of one collision pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionResult {
    /// Index of the first obstacle the player hit
    pub fatal: Option<usize>,
    /// Coins picked up this pass
    pub collected: u32,
    /// Points paid out by those coins (0 with default tuning)
    pub coin_points: u32,
}

impl CollisionResult {
    pub fn is_fatal(&self) -> bool {
        self.fatal.is_some()
    }
}

/// Check the player against obstacles, then coins.
///
/// The first obstacle hit ends the pass before any coin is considered. Every
/// overlapping coin is collected otherwise.
pub fn check_collisions(player: &Bounds, obstacles: &[Obstacle], coins: &mut [Coin]) -> CollisionResult {
    if let Some(index) = obstacles
        .iter()
        .position(|o| o.body.active && o.body.bounds().overlaps(player))
    {
        return CollisionResult {
            fatal: Some(index),
            ..Default::default()
        };
    }

    let mut result = CollisionResult::default();
    for coin in coins.iter_mut() {
        if coin.body.active && !coin.collected && coin.body.bounds().overlaps(player) {
            result.coin_points += coin.collect();
            result.collected += 1;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacle::{ObstacleKind, ObstacleShape};

    fn obstacle_at(x: f32, y: f32) -> Obstacle {
        let shape = ObstacleShape {
            kind: ObstacleKind::Ground,
            width: 30.0,
            height: 30.0,
            y,
        };
        Obstacle::new(x, shape, 10)
    }

    #[test]
    fn test_obstacle_hit_skips_coins() {
        let player = Bounds::new(50.0, 100.0, 40.0, 62.0);
        let obstacles = vec![obstacle_at(300.0, 100.0), obstacle_at(60.0, 120.0)];
        let mut coins = vec![Coin::new(60.0, 110.0, 16.0, 16.0, 0)];

        let result = check_collisions(&player, &obstacles, &mut coins);
        assert_eq!(result.fatal, Some(1));
        assert_eq!(result.collected, 0);
        assert!(!coins[0].collected);
    }

    #[test]
    fn test_all_overlapping_coins_collected() {
        let player = Bounds::new(50.0, 100.0, 40.0, 62.0);
        let mut coins = vec![
            Coin::new(55.0, 105.0, 16.0, 16.0, 1),
            Coin::new(60.0, 130.0, 16.0, 16.0, 2),
            Coin::new(400.0, 130.0, 16.0, 16.0, 4),
        ];

        let result = check_collisions(&player, &[], &mut coins);
        assert!(!result.is_fatal());
        assert_eq!(result.collected, 2);
        assert_eq!(result.coin_points, 3);
        assert!(coins[0].collected && coins[1].collected);
        assert!(!coins[2].collected);
    }

    #[test]
    fn test_inactive_obstacle_ignored() {
        let player = Bounds::new(50.0, 100.0, 40.0, 62.0);
        let mut obstacle = obstacle_at(60.0, 120.0);
        obstacle.body.destroy();
        let result = check_collisions(&player, &[obstacle], &mut []);
        assert!(!result.is_fatal());
    }
}
