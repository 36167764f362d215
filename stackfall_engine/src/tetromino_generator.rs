/*!
This module handles random generation of [`Tetromino`]s.
*/

use rand::Rng;

use crate::{GameRng, Tetromino};

/// Handles the information of which pieces to spawn during a game.
///
/// Every [`Tetromino`] is equally likely and independent of history; there is no bag.
/// The generator implements [`Iterator`] and never runs out.
#[derive(Eq, PartialEq, Clone, Debug)]
pub struct TetrominoGenerator {
    rng: GameRng,
}

impl TetrominoGenerator {
    /// Creates a uniform generator drawing from the given PRNG.
    pub const fn uniform(rng: GameRng) -> Self {
        Self { rng }
    }

    /// Picks the next tetromino.
    pub fn draw(&mut self) -> Tetromino {
        let idx = self.rng.random_range(0..Tetromino::VARIANTS.len());
        Tetromino::VARIANTS[idx]
    }
}

impl Iterator for TetrominoGenerator {
    type Item = Tetromino;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.draw())
    }
}
