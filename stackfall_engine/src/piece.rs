/*!
This module implements the active [`Piece`] and its movement and rotation rules.
*/

use crate::{collides, Grid, Shape, Tetromino};

/// An active tetromino in play.
///
/// `(x, y)` is the grid-space position of the top-left corner of the shape matrix.
/// `y` may be negative while a piece is partially above the grid.
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    /// Type of tetromino the active piece is; determines its color.
    pub tetromino: Tetromino,
    /// The current (possibly rotated) shape matrix.
    pub shape: Shape,
    /// Column of the shape's left edge.
    pub x: isize,
    /// Row of the shape's top edge.
    pub y: isize,
}

impl Piece {
    /// Creates a piece of the given type horizontally centered in the top row.
    pub fn spawn(tetromino: Tetromino) -> Self {
        let shape = tetromino.shape();
        Self {
            tetromino,
            shape,
            // Both widths are at most 10, so these casts are lossless.
            x: (Grid::WIDTH / 2) as isize - (shape.width() / 2) as isize,
            y: 0,
        }
    }

    /// Iterates over the absolute `(x, y)` grid coordinates of all occupied cells.
    pub fn cells(&self) -> impl Iterator<Item = (isize, isize)> + '_ {
        self.shape
            .occupied()
            .map(|(dy, dx)| (self.x + dx as isize, self.y + dy as isize))
    }

    /// Tries to rotate the piece in place; the previous shape is kept if the rotation collides.
    ///
    /// Returns whether the rotation was applied.
    pub fn rotate(&mut self, grid: &Grid) -> bool {
        let previous_shape = self.shape;
        self.shape = previous_shape.rotated();
        if collides(grid, self) {
            self.shape = previous_shape;
            false
        } else {
            true
        }
    }

    /// Tries to move the piece by `(dx, dy)`; the move is reverted if it collides.
    ///
    /// Returns whether the move was applied.
    pub fn shift(&mut self, grid: &Grid, dx: isize, dy: isize) -> bool {
        self.x += dx;
        self.y += dy;
        if collides(grid, self) {
            self.x -= dx;
            self.y -= dy;
            false
        } else {
            true
        }
    }

    /// Moves the piece down until the next step would collide, without locking it.
    ///
    /// Returns the number of rows travelled.
    pub fn drop_to_floor(&mut self, grid: &Grid) -> usize {
        let start_y = self.y;
        while !collides(grid, self) {
            self.y += 1;
        }
        self.y -= 1;
        // Saturate in case the piece already collided where it started.
        usize::try_from(self.y - start_y).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cell;

    #[test]
    fn spawn_centers_piece() {
        assert_eq!(Piece::spawn(Tetromino::I).x, 3);
        assert_eq!(Piece::spawn(Tetromino::O).x, 4);
        for tetromino in [Tetromino::J, Tetromino::L, Tetromino::S, Tetromino::T, Tetromino::Z] {
            let piece = Piece::spawn(tetromino);
            assert_eq!((piece.x, piece.y), (4, 0), "{tetromino:?}");
        }
    }

    #[test]
    fn blocked_moves_leave_position_unchanged() {
        let grid = Grid::new();
        let mut piece = Piece::spawn(Tetromino::O);
        piece.x = 0;
        let before = piece;

        assert!(!piece.shift(&grid, -1, 0));
        assert_eq!(piece, before);

        piece.x = 8;
        let before = piece;
        assert!(!piece.shift(&grid, 1, 0));
        assert_eq!(piece, before);
    }

    #[test]
    fn moves_are_blocked_by_locked_cells() {
        let mut grid = Grid::new();
        grid.set(3, 0, Cell::Filled(Tetromino::T.color_id()));
        let mut piece = Piece::spawn(Tetromino::O);
        let before = piece;

        assert!(!piece.shift(&grid, -1, 0));
        assert_eq!(piece, before);
        assert!(piece.shift(&grid, 1, 0));
        assert_eq!(piece.x, 5);
    }

    #[test]
    fn rotation_is_rejected_against_wall() {
        let grid = Grid::new();
        let mut piece = Piece::spawn(Tetromino::I);
        assert!(piece.rotate(&grid));
        piece.x = 9;
        assert!(!collides(&grid, &piece));
        let before = piece;

        // Horizontal again would stick out on the right.
        assert!(!piece.rotate(&grid));
        assert_eq!(piece, before);
    }

    #[test]
    fn drop_rests_piece_on_floor() {
        let grid = Grid::new();
        let mut piece = Piece::spawn(Tetromino::O);

        assert_eq!(piece.drop_to_floor(&grid), 18);
        assert_eq!(piece.y, 18);
        assert!(!collides(&grid, &piece));
    }

    #[test]
    fn drop_rests_piece_on_stack() {
        let mut grid = Grid::new();
        grid.fill_line(19, Tetromino::I.color_id());
        let mut piece = Piece::spawn(Tetromino::I);

        assert_eq!(piece.drop_to_floor(&grid), 18);
        assert_eq!(piece.y, 18);
    }
}
