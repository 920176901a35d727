//! Scene drawing: scenery, obstacles and spinning coins

use glam::Vec2;

use super::{RenderTarget, palette};
use crate::sim::coin::Coin;
use crate::sim::entity::EntityRef;
use crate::sim::obstacle::Obstacle;
use crate::sim::state::World;

/// Clear to the background and draw the ground line
pub fn draw_scenery(target: &mut dyn RenderTarget, world: &World) {
    target.clear(palette::BACKGROUND);
    target.line(
        Vec2::new(0.0, world.ground_line),
        Vec2::new(world.width, world.ground_line),
        palette::GROUND,
        2.0,
    );
}

pub fn draw_obstacle(target: &mut dyn RenderTarget, obstacle: &Obstacle) {
    let b = obstacle.body.bounds();
    target.fill_rect(b.x, b.y, b.width, b.height, palette::OBSTACLE);
    target.stroke_rect(b.x, b.y, b.width, b.height, palette::OBSTACLE_DARK, 2.0);
}

/// Pixel-style coin, squashed horizontally to fake a spin
pub fn draw_coin(target: &mut dyn RenderTarget, coin: &Coin, spin_speed: f32) {
    let b = coin.body.bounds();
    let center = Vec2::new(b.x + b.width / 2.0, b.y + b.height / 2.0);

    let scale_x = coin.spin_scale(spin_speed);
    let apparent_width = (b.width * scale_x.abs()).max(2.0);
    let half_width = apparent_width / 2.0;
    let half_height = b.height / 2.0;

    // Darker shade while the back face shows
    let color = if scale_x > 0.0 {
        palette::COIN
    } else {
        palette::COIN_DARK
    };

    let left = center.x - half_width;
    let top = center.y - half_height;
    target.fill_rect(left, top, apparent_width, b.height, color);
    target.stroke_rect(left, top, apparent_width, b.height, palette::COIN_OUTLINE, 1.0);

    if apparent_width > 6.0 {
        target.line(
            Vec2::new(center.x, top + 3.0),
            Vec2::new(center.x, center.y + half_height - 3.0),
            palette::COIN_OUTLINE,
            2.0,
        );
    }
}

/// Draw any entity by kind. The player is drawn by the host as an overlay.
pub fn draw_entity(target: &mut dyn RenderTarget, entity: EntityRef<'_>, coin_spin_speed: f32) {
    match entity {
        EntityRef::Player(_) => {}
        EntityRef::Obstacle(obstacle) => draw_obstacle(target, obstacle),
        EntityRef::Coin(coin) => draw_coin(target, coin, coin_spin_speed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, RecordingSurface};
    use crate::sim::player::Player;

    #[test]
    fn test_scenery_clears_then_draws_ground() {
        let mut surface = RecordingSurface::new(800.0, 300.0);
        let world = World::new(800.0, 300.0, 0.85);
        draw_scenery(&mut surface, &world);

        assert_eq!(surface.commands.len(), 2);
        assert!(matches!(surface.commands[0], DrawCommand::Clear { .. }));
        assert!(matches!(surface.commands[1], DrawCommand::Line { color, .. } if color == palette::GROUND));
    }

    #[test]
    fn test_coin_spin_narrows_and_darkens() {
        let mut surface = RecordingSurface::new(800.0, 300.0);
        let mut coin = Coin::new(100.0, 100.0, 16.0, 16.0, 0);
        draw_coin(&mut surface, &coin, 0.05);
        let DrawCommand::FillRect { width, color, .. } = surface.commands[0] else {
            panic!("expected fill");
        };
        assert_eq!(width, 16.0);
        assert_eq!(color, palette::COIN);
        // Center stripe drawn while wide
        assert_eq!(surface.commands.len(), 3);

        // cos(40 * 0.05) = cos(2.0) < 0 -> back face
        coin.spin_frame = 40;
        surface.commands.clear();
        draw_coin(&mut surface, &coin, 0.05);
        let DrawCommand::FillRect { width, color, .. } = surface.commands[0] else {
            panic!("expected fill");
        };
        assert!(width < 16.0);
        assert_eq!(color, palette::COIN_DARK);
    }

    #[test]
    fn test_player_not_drawn() {
        let mut surface = RecordingSurface::new(800.0, 300.0);
        let player = Player::new(255.0);
        draw_entity(&mut surface, EntityRef::Player(&player), 0.05);
        assert!(surface.commands.is_empty());
    }
}
