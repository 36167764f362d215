/*!
This module holds the single collision rule every piece mutation is validated against.
*/

use crate::{Grid, Piece};

/// Checks whether `piece` overlaps a wall, the floor, or a locked cell of `grid`.
///
/// Cells above the top row (`y < 0`) are exempt from the occupancy check, so pieces may
/// hang partially above the visible grid; they are still checked against both walls.
pub fn collides(grid: &Grid, piece: &Piece) -> bool {
    piece.cells().any(|(x, y)| {
        x < 0
            || x >= Grid::WIDTH as isize
            || y >= Grid::HEIGHT as isize
            || (y >= 0 && grid.get(x, y).is_some_and(|cell| cell.is_filled()))
    })
}
