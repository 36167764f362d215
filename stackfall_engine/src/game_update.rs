/*!
This module implements the rules that advance a [`GameState`], and the [`Game`] entry points built on them.

The rules are free functions over `&mut GameState` so each one can be exercised on its own.
*/

use crate::{
    collides, Button, Feedback, Game, GameState, Phase, Piece, Tetromino, POINTS_PER_LINE,
};

/// Outcome of a successful [`move_down`].
#[derive(Eq, PartialEq, Clone, Copy, Hash, Debug)]
pub enum Step {
    /// The piece moved down one row.
    Fell,
    /// The piece could not move, so it was locked and a new piece was spawned.
    Locked {
        /// The piece as it was merged into the grid.
        piece: Piece,
        /// Number of lines removed after merging.
        lines_cleared: u32,
        /// Type of the newly spawned piece.
        spawned: Tetromino,
        /// Whether the newly spawned piece overlapped the stack.
        topped_out: bool,
    },
}

/// Places a fresh piece of the given type at the top of the grid.
///
/// If it overlaps locked cells, `game_over` is set; the grid is left untouched either way.
/// Returns whether the piece fits.
pub fn spawn(state: &mut GameState, tetromino: Tetromino) -> bool {
    let piece = Piece::spawn(tetromino);
    let fits = !collides(&state.grid, &piece);
    state.piece = Some(piece);
    if !fits {
        state.game_over = true;
    }
    fits
}

/// Tries to rotate the current piece. Returns whether it turned.
pub fn rotate(state: &mut GameState) -> bool {
    let GameState { grid, piece, .. } = state;
    piece.as_mut().is_some_and(|piece| piece.rotate(grid))
}

/// Tries to move the current piece sideways by `dx` columns. Returns whether it moved.
pub fn shift(state: &mut GameState, dx: isize) -> bool {
    let GameState { grid, piece, .. } = state;
    piece.as_mut().is_some_and(|piece| piece.shift(grid, dx, 0))
}

/// Moves the current piece to the lowest position it can reach, without locking it.
///
/// Returns the number of rows travelled, or `None` if there is no piece.
pub fn hard_drop(state: &mut GameState) -> Option<usize> {
    let GameState { grid, piece, .. } = state;
    piece.as_mut().map(|piece| piece.drop_to_floor(grid))
}

/// Removes the current piece and merges it into the grid.
///
/// Returns the merged piece, or `None` if there was none.
pub fn lock(state: &mut GameState) -> Option<Piece> {
    let piece = state.piece.take()?;
    let skipped = state.grid.merge(&piece);
    if skipped > 0 {
        log::warn!("{skipped} cell(s) of {piece:?} lay above the grid and were not merged");
    }
    state.pieces_locked += 1;
    Some(piece)
}

/// Removes all full lines and awards [`POINTS_PER_LINE`] for each.
///
/// Returns the number of lines removed.
pub fn clear_lines(state: &mut GameState) -> u32 {
    let lines = state.grid.clear_lines();
    if lines > 0 {
        state.lines_cleared += lines;
        state.score = state.score.saturating_add(lines * POINTS_PER_LINE);
    }
    lines
}

/// Moves the current piece down one row; if that collides, locks it, clears lines and spawns
/// a piece of the type returned by `next`.
///
/// Returns `None` if there is no piece.
pub fn move_down(state: &mut GameState, next: impl FnOnce() -> Tetromino) -> Option<Step> {
    let GameState { grid, piece, .. } = state;
    if piece.as_mut()?.shift(grid, 0, 1) {
        return Some(Step::Fell);
    }
    let piece = lock(state)?;
    let lines_cleared = clear_lines(state);
    let spawned = next();
    let topped_out = !spawn(state, spawned);
    Some(Step::Locked {
        piece,
        lines_cleared,
        spawned,
        topped_out,
    })
}

impl Game {
    /// Starts a new round: resets grid and score and spawns the first piece.
    ///
    /// Has no effect unless the game is [`Phase::NotStarted`].
    pub fn start(&mut self) -> Vec<Feedback> {
        if self.phase() != Phase::NotStarted {
            return Vec::new();
        }
        self.state = GameState {
            started: true,
            ..GameState::default()
        };
        let mut feedback = vec![Feedback::GameStarted];
        let tetromino = self.next_tetromino();
        feedback.push(Feedback::PieceSpawned(tetromino));
        if !spawn(&mut self.state, tetromino) {
            feedback.push(Feedback::ToppedOut);
        }
        feedback
    }

    /// Applies a player command to the current piece.
    ///
    /// Commands are ignored unless the game is [`Phase::Running`].
    pub fn press(&mut self, button: Button) -> Vec<Feedback> {
        let mut feedback = Vec::new();
        if self.phase() != Phase::Running {
            return feedback;
        }
        match button {
            Button::MoveLeft => {
                shift(&mut self.state, -1);
            }
            Button::MoveRight => {
                shift(&mut self.state, 1);
            }
            Button::Rotate => {
                rotate(&mut self.state);
            }
            Button::DropSoft => self.fall(&mut feedback),
            Button::DropHard => {
                if let Some(rows) = hard_drop(&mut self.state) {
                    feedback.push(Feedback::HardDrop { rows });
                }
            }
        }
        feedback
    }

    /// Advances the game by one gravity tick.
    ///
    /// - [`Phase::NotStarted`]: nothing happens.
    /// - [`Phase::Running`]: the piece moves down one row (or locks).
    /// - [`Phase::GameOver`]: the state is reset and the game returns to [`Phase::NotStarted`].
    pub fn tick(&mut self) -> Vec<Feedback> {
        let mut feedback = Vec::new();
        match self.phase() {
            Phase::NotStarted => {}
            Phase::Running => self.fall(&mut feedback),
            Phase::GameOver => {
                let final_score = self.state.score;
                self.state = GameState::default();
                feedback.push(Feedback::GameEnded { final_score });
            }
        }
        feedback
    }

    fn next_tetromino(&mut self) -> Tetromino {
        std::mem::replace(&mut self.preview, self.generator.draw())
    }

    fn fall(&mut self, feedback: &mut Vec<Feedback>) {
        let Game {
            state,
            generator,
            preview,
            ..
        } = self;
        let step = move_down(state, || std::mem::replace(preview, generator.draw()));
        if let Some(Step::Locked {
            piece,
            lines_cleared,
            spawned,
            topped_out,
        }) = step
        {
            feedback.push(Feedback::PieceLocked(piece));
            if lines_cleared > 0 {
                feedback.push(Feedback::LinesCleared {
                    lines: lines_cleared,
                    score_bonus: lines_cleared * POINTS_PER_LINE,
                });
            }
            feedback.push(Feedback::PieceSpawned(spawned));
            if topped_out {
                feedback.push(Feedback::ToppedOut);
            }
        }
    }
}
