//! Collision detection between the player and the live block set

use super::rect::Rect;
use super::state::Block;

/// Index of the first block (in spawn order) overlapping `player`, if any.
/// Stops at the first hit.
pub fn first_collision(player: &Rect, blocks: &[Block]) -> Option<usize> {
    blocks.iter().position(|block| block.rect.intersects(player))
}
