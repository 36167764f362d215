/*!
# Stackfall Engine

`stackfall_engine` is an implementation of a classic, single-player falling-block game engine:
a 10x20 grid, seven tetrominos chosen uniformly at random, single-direction rotation without
wall kicks, 100 points per cleared line, and a fixed-interval gravity tick.

The engine does no I/O by itself. Frontends draw through a [`Renderer`] and play music through an
[`AudioSink`], and feed time into a [`Session`], which owns the [`Game`] and its [`Ticker`].

# Examples

```
use std::time::Instant;

use stackfall_engine::*;

let game = Game::builder().seed(42).build();
let mut session = Session::new(game, NullRenderer, Silence);

// The start command resets the grid and spawns the first piece.
session.start(Instant::now()).unwrap();

// Player commands take effect immediately.
session.press(Button::MoveLeft).unwrap();

// Advancing time runs the gravity tick whenever one is due.
session.update(Instant::now()).unwrap();

let GameState { grid, piece, score, .. } = session.game().state();
```
*/

#![warn(missing_docs)]

mod collision;
mod game_builder;
pub mod game_loop;
mod game_update;
mod grid;
mod piece;
pub mod presentation;
pub mod shape_catalog;
pub mod tetromino_generator;

use std::{num::NonZeroU8, time::Duration};

use rand_chacha::ChaCha12Rng;

pub use collision::collides;
pub use game_builder::GameBuilder;
pub use game_loop::{Session, Ticker};
pub use game_update::{clear_lines, hard_drop, lock, move_down, rotate, shift, spawn, Step};
pub use grid::{Cell, Grid, Line};
pub use piece::Piece;
pub use presentation::{render, score_text, AudioError, AudioSink, NullRenderer, Renderer, Silence};
pub use shape_catalog::{Shape, Tetromino};
pub use tetromino_generator::TetrominoGenerator;

/// Abstract identifier for the color a cell is drawn in.
pub type ColorId = NonZeroU8;
/// The internal RNG used by a game.
pub type GameRng = ChaCha12Rng;

/// Points awarded for every line cleared.
pub const POINTS_PER_LINE: u32 = 100;

/// Represents an abstract game input.
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Button {
    /// Moves the piece once to the left.
    MoveLeft = 0,
    /// Moves the piece once to the right.
    MoveRight,
    /// "Soft" dropping.
    /// This drops a piece down by one, locking it immediately if it hit a surface.
    DropSoft,
    /// Rotate the piece by 90°.
    Rotate,
    /// "Hard" dropping.
    /// This immediately drops a piece all the way down until it hits a surface.
    /// The piece only locks on the following gravity tick or soft drop.
    DropHard,
}

/// Where the game is in its lifecycle.
///
/// This is a view derived from the `started` and `game_over` flags of [`GameState`].
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Waiting for the start command; nothing happens on the grid.
    NotStarted,
    /// Gravity ticks and player commands are being applied.
    Running,
    /// A freshly spawned piece did not fit. The next tick ends the game.
    GameOver,
}

/// An event reported by the engine so a frontend can react to it.
#[derive(Eq, PartialEq, Clone, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Feedback {
    /// A new game was started.
    GameStarted,
    /// A new piece entered the grid.
    PieceSpawned(Tetromino),
    /// A piece was hard dropped, travelling the given number of rows.
    HardDrop {
        /// Rows travelled.
        rows: usize,
    },
    /// A piece was merged into the grid.
    PieceLocked(Piece),
    /// Lines were cleared by the last lock.
    LinesCleared {
        /// Number of lines removed.
        lines: u32,
        /// Points added to the score.
        score_bonus: u32,
    },
    /// A spawned piece overlapped the stack; the game is over.
    ToppedOut,
    /// The game ended and was reset.
    GameEnded {
        /// Score reached before the reset.
        final_score: u32,
    },
}

/// Configuration options of the game.
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Configuration {
    /// How long the loop waits between two gravity ticks.
    pub tick_interval: Duration,
}

/// Struct storing internal game state that changes over the course of play.
#[derive(Eq, PartialEq, Clone, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// The grid of locked cells.
    pub grid: Grid,
    /// The piece under player control, if one has been spawned yet.
    pub piece: Option<Piece>,
    /// Current score.
    pub score: u32,
    /// Whether the last spawned piece did not fit.
    pub game_over: bool,
    /// Whether a game is in progress.
    pub started: bool,
    /// Lines cleared so far.
    pub lines_cleared: u32,
    /// Pieces locked so far.
    pub pieces_locked: u32,
}

/// Main game struct representing a round of play.
#[derive(Eq, PartialEq, Clone, Debug)]
pub struct Game {
    config: Configuration,
    seed: u64,
    state: GameState,
    generator: TetrominoGenerator,
    preview: Tetromino,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(1000),
        }
    }
}

impl GameState {
    /// The lifecycle phase described by the state's flags.
    pub const fn phase(&self) -> Phase {
        match (self.started, self.game_over) {
            (false, _) => Phase::NotStarted,
            (true, false) => Phase::Running,
            (true, true) => Phase::GameOver,
        }
    }
}

impl Game {
    /// Creates a blank new template representing a yet-to-be-started [`Game`] ready for configuration.
    pub fn builder() -> GameBuilder {
        GameBuilder::default()
    }

    /// Read accessor for the game's configuration.
    pub const fn config(&self) -> &Configuration {
        &self.config
    }

    /// The value the game's PRNG was seeded with.
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Read accessor for the current game state.
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// The current lifecycle phase.
    pub const fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// The tetromino that will be spawned next.
    pub const fn preview(&self) -> Tetromino {
        self.preview
    }
}
