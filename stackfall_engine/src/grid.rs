/*!
This module implements the fixed-size playing [`Grid`] of locked cells.
*/

use crate::{ColorId, Piece};

/// State of a single grid cell.
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    /// Nothing locked here.
    #[default]
    Empty,
    /// A locked cell of the given color.
    Filled(ColorId),
}

/// The type of horizontal lines of the playing grid.
pub type Line = [Cell; Grid::WIDTH];

const EMPTY_LINE: Line = [Cell::Empty; Grid::WIDTH];

/// The two-dimensional playing field.
///
/// Lines are stored row-major with row `0` at the top. The dimensions never change;
/// the grid is only mutated by [`Grid::merge`] and [`Grid::clear_lines`].
#[derive(Eq, PartialEq, Clone, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    lines: [Line; Grid::HEIGHT],
}

impl Cell {
    /// Whether something is locked in this cell.
    pub const fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// The game field width.
    pub const WIDTH: usize = 10;
    /// The game field height.
    pub const HEIGHT: usize = 20;

    /// Creates an all-empty grid.
    pub const fn new() -> Self {
        Self {
            lines: [EMPTY_LINE; Grid::HEIGHT],
        }
    }

    /// Read accessor to all lines, top line first.
    pub const fn lines(&self) -> &[Line; Grid::HEIGHT] {
        &self.lines
    }

    /// Returns the cell at column `x` and row `y`, or `None` if the coordinates are outside the grid.
    pub fn get(&self, x: isize, y: isize) -> Option<Cell> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        self.lines.get(y)?.get(x).copied()
    }

    /// Overwrites the cell at column `x` and row `y`.
    ///
    /// # Panics
    /// Panics if the coordinates lie outside the grid.
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        self.lines[y][x] = cell;
    }

    /// Fills an entire row with one color.
    ///
    /// # Panics
    /// Panics if `y` lies outside the grid.
    pub fn fill_line(&mut self, y: usize, color: ColorId) {
        self.lines[y] = [Cell::Filled(color); Grid::WIDTH];
    }

    /// Iterates over all filled cells as `(x, y, color)`.
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize, ColorId)> + '_ {
        self.lines.iter().enumerate().flat_map(|(y, line)| {
            line.iter().enumerate().filter_map(move |(x, cell)| match cell {
                Cell::Filled(color) => Some((x, y, *color)),
                Cell::Empty => None,
            })
        })
    }

    /// Whether no cell of the grid is filled.
    pub fn is_empty(&self) -> bool {
        self.lines.iter().flatten().all(|cell| !cell.is_filled())
    }

    /// Copies every occupied cell of `piece` into the grid in the piece's color.
    ///
    /// Cells that lie outside the grid (above the top row in practice) are skipped;
    /// their number is returned.
    pub fn merge(&mut self, piece: &Piece) -> usize {
        let color = piece.tetromino.color_id();
        let mut skipped = 0;
        for (x, y) in piece.cells() {
            match (usize::try_from(x), usize::try_from(y)) {
                (Ok(x), Ok(y)) if x < Grid::WIDTH && y < Grid::HEIGHT => {
                    self.lines[y][x] = Cell::Filled(color);
                }
                _ => skipped += 1,
            }
        }
        skipped
    }

    /// Removes every full line, shifting the lines above it down and inserting empty lines on top.
    ///
    /// Lines are scanned bottom to top. After a removal the same index is examined again,
    /// since the line above has moved into it. Returns the number of lines removed.
    pub fn clear_lines(&mut self) -> u32 {
        let mut lines_cleared = 0;
        let mut y = Grid::HEIGHT;
        while y > 0 {
            let row = y - 1;
            if self.lines[row].iter().all(Cell::is_filled) {
                self.lines[..=row].rotate_right(1);
                self.lines[0] = EMPTY_LINE;
                lines_cleared += 1;
            } else {
                y -= 1;
            }
        }
        lines_cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tetromino;

    fn color(n: u8) -> ColorId {
        ColorId::new(n).unwrap()
    }

    #[test]
    fn new_grid_is_empty() {
        let grid = Grid::new();
        assert!(grid.is_empty());
        assert_eq!(grid.lines().len(), Grid::HEIGHT);
        assert_eq!(grid.filled_cells().count(), 0);
    }

    #[test]
    fn get_rejects_out_of_bounds() {
        let grid = Grid::new();
        assert_eq!(grid.get(0, 0), Some(Cell::Empty));
        assert_eq!(grid.get(-1, 0), None);
        assert_eq!(grid.get(0, -1), None);
        assert_eq!(grid.get(10, 0), None);
        assert_eq!(grid.get(0, 20), None);
    }

    #[test]
    fn clearing_bottom_line_shifts_rest_down() {
        let mut grid = Grid::new();
        grid.fill_line(19, color(1));
        grid.set(3, 18, Cell::Filled(color(2)));
        grid.set(7, 0, Cell::Filled(color(3)));

        assert_eq!(grid.clear_lines(), 1);

        assert_eq!(grid.lines().len(), Grid::HEIGHT);
        assert_eq!(grid.lines()[0], EMPTY_LINE);
        assert_eq!(grid.get(3, 19), Some(Cell::Filled(color(2))));
        assert_eq!(grid.get(7, 1), Some(Cell::Filled(color(3))));
        assert_eq!(grid.filled_cells().count(), 2);
    }

    #[test]
    fn adjacent_full_lines_are_both_cleared() {
        let mut grid = Grid::new();
        grid.fill_line(18, color(4));
        grid.fill_line(19, color(5));
        grid.set(0, 17, Cell::Filled(color(6)));

        assert_eq!(grid.clear_lines(), 2);

        assert_eq!(grid.get(0, 19), Some(Cell::Filled(color(6))));
        assert_eq!(grid.filled_cells().count(), 1);
    }

    #[test]
    fn separated_full_lines_are_cleared() {
        let mut grid = Grid::new();
        grid.fill_line(19, color(1));
        grid.set(5, 18, Cell::Filled(color(2)));
        grid.fill_line(17, color(1));

        assert_eq!(grid.clear_lines(), 2);

        assert_eq!(grid.get(5, 19), Some(Cell::Filled(color(2))));
        assert_eq!(grid.filled_cells().count(), 1);
    }

    #[test]
    fn full_top_line_is_cleared() {
        let mut grid = Grid::new();
        grid.fill_line(0, color(1));
        assert_eq!(grid.clear_lines(), 1);
        assert!(grid.is_empty());
    }

    #[test]
    fn merge_writes_piece_color() {
        let mut grid = Grid::new();
        let mut piece = Piece::spawn(Tetromino::O);
        piece.y = 18;

        assert_eq!(grid.merge(&piece), 0);

        let color = Tetromino::O.color_id();
        for (x, y) in [(4, 18), (5, 18), (4, 19), (5, 19)] {
            assert_eq!(grid.get(x, y), Some(Cell::Filled(color)));
        }
        assert_eq!(grid.filled_cells().count(), 4);
    }

    #[test]
    fn merge_skips_cells_above_grid() {
        let mut grid = Grid::new();
        let mut piece = Piece::spawn(Tetromino::O);
        piece.y = -1;

        assert_eq!(grid.merge(&piece), 2);
        assert_eq!(grid.filled_cells().count(), 2);
        assert!(grid.lines()[0][4].is_filled());
        assert!(grid.lines()[0][5].is_filled());
    }
}
