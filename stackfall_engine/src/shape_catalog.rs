/*!
This module holds the fixed catalog of [`Tetromino`]s and the [`Shape`] matrices they are drawn with.
*/

use crate::ColorId;

/// The largest width or height any [`Shape`] can have.
pub const SHAPE_MAX_SIZE: usize = 4;

/// Represents one of the seven "Tetrominos";
///
/// A *tetromino* is a two-dimensional, geometric shape made by
/// connecting four squares (orthogonally / at along the edges).
///
/// The variants are ordered the way the catalog lists them, which also fixes their [`ColorId`]s.
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tetromino {
    /// 'I'-Tetromino.
    /// Four squares connected as one straight line; `▄▄▄▄`.
    I = 0,
    /// 'J'-Tetromino:
    /// Four squares connected in a 'J'-shape; `█▄▄`.
    J,
    /// 'L'-Tetromino:
    /// Four squares connected in an 'L'-shape; `▄▄█`.
    L,
    /// 'O'-Tetromino.
    /// Four squares connected as one big square; `██`.
    O,
    /// 'S'-Tetromino.
    /// Four squares connected in an 'S'-snaking manner; `▄█▀`.
    S,
    /// 'T'-Tetromino:
    /// Four squares connected in a 'T'-junction shape; `▄█▄`.
    T,
    /// 'Z'-Tetromino:
    /// Four squares connected in a 'Z'-snaking manner; `▀█▄`.
    Z,
}

/// An immutable binary matrix describing which cells of a piece are occupied.
///
/// Row `0` is the top row of the shape. Cells outside of `width` x `height` are always unoccupied,
/// which makes structural equality coincide with equality of the occupied pattern.
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shape {
    width: usize,
    height: usize,
    cells: [[bool; SHAPE_MAX_SIZE]; SHAPE_MAX_SIZE],
}

impl Tetromino {
    /// All `Tetromino` enum variants in catalog order.
    ///
    /// Note that `Tetromino::VARIANTS[t as usize] == t` always holds.
    pub const VARIANTS: [Self; 7] = {
        use Tetromino::*;
        [I, J, L, O, S, T, Z]
    };

    /// Returns the spawn [`Shape`] of the tetromino.
    pub const fn shape(&self) -> Shape {
        match self {
            Tetromino::I => Shape::from_rows([[1, 1, 1, 1]]),
            Tetromino::J => Shape::from_rows([[1, 0, 0], [1, 1, 1]]),
            Tetromino::L => Shape::from_rows([[0, 0, 1], [1, 1, 1]]),
            Tetromino::O => Shape::from_rows([[1, 1], [1, 1]]),
            Tetromino::S => Shape::from_rows([[0, 1, 1], [1, 1, 0]]),
            Tetromino::T => Shape::from_rows([[0, 1, 0], [1, 1, 1]]),
            Tetromino::Z => Shape::from_rows([[1, 1, 0], [0, 1, 1]]),
        }
    }

    /// Returns the color identifier bound to the given tetromino (`1..=7` in catalog order).
    pub const fn color_id(&self) -> ColorId {
        // SAFETY: `*self as u8 + 1 > 0`.
        unsafe { ColorId::new_unchecked(*self as u8 + 1) }
    }

    /// Looks up the tetromino bound to a color identifier, if any.
    pub fn from_color_id(color: ColorId) -> Option<Self> {
        Self::VARIANTS.get(usize::from(color.get() - 1)).copied()
    }
}

impl Shape {
    /// Builds a shape from rows of `0`/`1` values, `rows[0]` being the top row.
    ///
    /// # Panics
    /// Panics if the shape is empty or larger than [`SHAPE_MAX_SIZE`] in either direction.
    pub const fn from_rows<const W: usize, const H: usize>(rows: [[u8; W]; H]) -> Self {
        assert!(0 < W && W <= SHAPE_MAX_SIZE && 0 < H && H <= SHAPE_MAX_SIZE);
        let mut cells = [[false; SHAPE_MAX_SIZE]; SHAPE_MAX_SIZE];
        let mut dy = 0;
        while dy < H {
            let mut dx = 0;
            while dx < W {
                cells[dy][dx] = rows[dy][dx] != 0;
                dx += 1;
            }
            dy += 1;
        }
        Self {
            width: W,
            height: H,
            cells,
        }
    }

    /// Number of columns of the matrix.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows of the matrix.
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Whether the cell at row `dy` and column `dx` is occupied.
    pub const fn is_occupied(&self, dy: usize, dx: usize) -> bool {
        dy < self.height && dx < self.width && self.cells[dy][dx]
    }

    /// Iterates over the `(dy, dx)` offsets of all occupied cells, row by row.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.height)
            .flat_map(move |dy| (0..self.width).map(move |dx| (dy, dx)))
            .filter(|&(dy, dx)| self.cells[dy][dx])
    }

    /// Returns the shape turned by 90°.
    ///
    /// Row `i` of the result is column `i` of `self` read bottom-to-top,
    /// i.e. `new[i][j] = old[height - 1 - j][i]`.
    pub fn rotated(&self) -> Self {
        let mut cells = [[false; SHAPE_MAX_SIZE]; SHAPE_MAX_SIZE];
        for (i, row) in cells.iter_mut().enumerate().take(self.width) {
            for (j, cell) in row.iter_mut().enumerate().take(self.height) {
                *cell = self.cells[self.height - 1 - j][i];
            }
        }
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tetromino_has_four_cells() {
        for tetromino in Tetromino::VARIANTS {
            assert_eq!(tetromino.shape().occupied().count(), 4, "{tetromino:?}");
        }
    }

    #[test]
    fn color_ids_follow_catalog_order() {
        for (i, tetromino) in Tetromino::VARIANTS.into_iter().enumerate() {
            assert_eq!(usize::from(tetromino.color_id().get()), i + 1);
            assert_eq!(Tetromino::from_color_id(tetromino.color_id()), Some(tetromino));
        }
    }

    #[test]
    fn square_survives_four_rotations() {
        let o = Tetromino::O.shape();
        let mut shape = o;
        for _ in 0..4 {
            shape = shape.rotated();
            assert_eq!(shape, o);
        }
    }

    #[test]
    fn line_toggles_orientation() {
        let horizontal = Tetromino::I.shape();
        let vertical = horizontal.rotated();
        assert_eq!((vertical.width(), vertical.height()), (1, 4));
        assert!((0..4).all(|dy| vertical.is_occupied(dy, 0)));
        assert_eq!(vertical.rotated(), horizontal);
    }

    #[test]
    fn rotation_reads_columns_bottom_to_top() {
        // J: [[1,0,0],[1,1,1]] turns into [[1,1],[1,0],[1,0]].
        let rotated = Tetromino::J.shape().rotated();
        assert_eq!(rotated, Shape::from_rows([[1, 1], [1, 0], [1, 0]]));
        // T: [[0,1,0],[1,1,1]] turns into [[1,0],[1,1],[1,0]].
        let rotated = Tetromino::T.shape().rotated();
        assert_eq!(rotated, Shape::from_rows([[1, 0], [1, 1], [1, 0]]));
    }

    #[test]
    fn every_shape_returns_after_full_turn() {
        for tetromino in Tetromino::VARIANTS {
            let shape = tetromino.shape();
            assert_eq!(shape.rotated().rotated().rotated().rotated(), shape);
        }
    }
}
