//! Per-frame overflow check
//!
//! The board is over when the lowest piece edge has travelled a full
//! container height past the starting line. A piece merely brushing the
//! line does not end the game.

use super::state::GameState;
use super::world::PhysicsWorld;

/// Largest distance any active piece's lower edge sits below the starting line
///
/// Pieces entirely above the line contribute nothing, so the result is never
/// negative.
pub fn filled_height<W: PhysicsWorld + ?Sized>(
    state: &GameState,
    world: &W,
    starting_line_y: f32,
) -> f32 {
    let mut filled = 0.0_f32;
    for piece in state.active_pieces() {
        let Some(pos) = world.body_position(piece.handle) else {
            debug_assert!(false, "tracked piece {:?} has no body", piece.handle);
            log::warn!("Tracked piece {:?} has no body", piece.handle);
            continue;
        };
        let bottom = pos.y + piece.radius();
        let past_line = bottom - starting_line_y;
        if past_line > 0.0 {
            filled = filled.max(past_line);
        }
    }
    filled
}

/// Whether a fill height meets the overflow threshold
#[inline]
pub fn overflowed(filled: f32, container_height: f32) -> bool {
    filled >= container_height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{ArcadeWorld, BodyDesc, Piece};
    use glam::Vec2;

    fn place(world: &mut ArcadeWorld, state: &mut GameState, pos: Vec2, size: u32) {
        let handle = world.create_body(BodyDesc {
            pos,
            radius: size as f32 / 2.0,
            size,
            color: 0,
            gravity: 0.0,
            bounce: 0.3,
            collide_world_bounds: true,
        });
        state.track(Piece::new(handle, size));
    }

    #[test]
    fn test_empty_board() {
        let world = ArcadeWorld::new(360.0, 640.0);
        let state = GameState::new(20);
        assert_eq!(filled_height(&state, &world, 100.0), 0.0);
    }

    #[test]
    fn test_piece_above_line_ignored() {
        let mut world = ArcadeWorld::new(360.0, 640.0);
        let mut state = GameState::new(20);
        place(&mut world, &mut state, Vec2::new(100.0, 50.0), 20);
        assert_eq!(filled_height(&state, &world, 100.0), 0.0);
    }

    #[test]
    fn test_takes_maximum() {
        let mut world = ArcadeWorld::new(360.0, 640.0);
        let mut state = GameState::new(20);
        place(&mut world, &mut state, Vec2::new(50.0, 200.0), 20);
        place(&mut world, &mut state, Vec2::new(150.0, 400.0), 40);
        // 400 + 20 - 100
        assert_eq!(filled_height(&state, &world, 100.0), 320.0);
    }

    #[test]
    fn test_overflow_threshold_inclusive() {
        assert!(overflowed(540.0, 540.0));
        assert!(overflowed(541.0, 540.0));
        assert!(!overflowed(539.9, 540.0));
    }
}
