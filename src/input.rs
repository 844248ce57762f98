//! Translate raw key codes and touch points into player moves.

use crossterm::event::KeyCode;

use crate::entities::Move;
use crate::grid::{pixels_to_row_and_column, GridPosition};

/// Fixed key table: the four arrow keys.  Anything else is `None`.
pub fn move_for_key(code: KeyCode) -> Option<Move> {
    match code {
        KeyCode::Left => Some(Move::Left),
        KeyCode::Up => Some(Move::Up),
        KeyCode::Right => Some(Move::Right),
        KeyCode::Down => Some(Move::Down),
        _ => None,
    }
}

/// One step toward a touched cell in the player's row or column.
/// Touching the player's own cell or a diagonal cell yields nothing.
pub fn infer_touch_move(player: GridPosition, touch: GridPosition) -> Option<Move> {
    let row_diff = touch.row - player.row;
    let col_diff = touch.col - player.col;

    match (row_diff.signum(), col_diff.signum()) {
        (1, 0) => Some(Move::Down),
        (-1, 0) => Some(Move::Up),
        (0, 1) => Some(Move::Right),
        (0, -1) => Some(Move::Left),
        _ => None,
    }
}

/// Resolve a canvas-space touch against the player's cell.
pub fn touch_move(x: f32, y: f32, player: GridPosition) -> Option<Move> {
    infer_touch_move(player, pixels_to_row_and_column(x, y))
}
