/*!
This module handles creation / initialization / building of [`Game`]s.
*/

use std::time::Duration;

use rand_chacha::rand_core::SeedableRng;

use crate::{Configuration, Game, GameRng, GameState, TetrominoGenerator};

/// This builder exposes the ability to configure a new [`Game`].
///
/// Generally speaking, when using `GameBuilder`, you’ll first call [`GameBuilder::new`] or
/// [`Game::builder`], then chain calls to methods to set each field, then call [`GameBuilder::build`].
/// The `GameBuilder` is not used up and its configuration can be re-used to initialize more [`Game`]s.
#[derive(PartialEq, Eq, Clone, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameBuilder {
    /// The configuration that will be set for the game.
    pub config: Configuration,
    /// The value to seed the game's PRNG with.
    pub seed: Option<u64>,
}

impl GameBuilder {
    /// Creates a blank new template representing a yet-to-be-started [`Game`] ready for configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a [`Game`] with the information specified by `self`.
    ///
    /// Without an explicit seed, a random one is chosen.
    pub fn build(&self) -> Game {
        let seed = self.seed.unwrap_or_else(rand::random);
        let mut generator = TetrominoGenerator::uniform(GameRng::seed_from_u64(seed));
        let preview = generator.draw();
        Game {
            config: self.config.clone(),
            seed,
            state: GameState::default(),
            generator,
            preview,
        }
    }

    /// Sets the [`Configuration`] that will be used by [`Game`].
    pub fn config(&mut self, x: Configuration) -> &mut Self {
        self.config = x;
        self
    }

    /// How long the loop waits between two gravity ticks.
    pub fn tick_interval(&mut self, x: Duration) -> &mut Self {
        self.config.tick_interval = x;
        self
    }

    /// The value to seed the game's PRNG with.
    pub fn seed(&mut self, x: u64) -> &mut Self {
        self.seed = Some(x);
        self
    }
}
