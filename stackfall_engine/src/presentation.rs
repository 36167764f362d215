/*!
This module defines the capabilities a frontend provides to show a game: a [`Renderer`] and an [`AudioSink`].
*/

use std::{fmt, io};

use crate::{ColorId, Game, Grid};

/// A drawing surface `Grid::WIDTH` x `Grid::HEIGHT` cells large, plus a small preview surface.
///
/// A frame is drawn as [`Renderer::clear`], a series of [`Renderer::draw_cell`] and
/// [`Renderer::draw_preview_cell`] calls, then [`Renderer::present`].
pub trait Renderer {
    /// Blanks the main and preview surfaces.
    fn clear(&mut self) -> io::Result<()>;

    /// Paints the grid cell at column `x` and row `y` in `color`.
    fn draw_cell(&mut self, x: usize, y: usize, color: ColorId) -> io::Result<()>;

    /// Paints a cell of the next-piece preview.
    fn draw_preview_cell(&mut self, _x: usize, _y: usize, _color: ColorId) -> io::Result<()> {
        Ok(())
    }

    /// Updates the score display.
    fn show_score(&mut self, score: u32) -> io::Result<()>;

    /// Notifies the player that the game ended with `final_score`.
    fn show_game_over(&mut self, final_score: u32) -> io::Result<()>;

    /// Makes everything drawn since the last [`Renderer::clear`] visible.
    fn present(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A renderer that discards everything; useful for headless runs.
#[derive(Eq, PartialEq, Clone, Copy, Hash, Default, Debug)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn clear(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn draw_cell(&mut self, _x: usize, _y: usize, _color: ColorId) -> io::Result<()> {
        Ok(())
    }

    fn show_score(&mut self, _score: u32) -> io::Result<()> {
        Ok(())
    }

    fn show_game_over(&mut self, _final_score: u32) -> io::Result<()> {
        Ok(())
    }
}

/// Reasons background music could not be started.
#[derive(Eq, PartialEq, Clone, Hash, Debug)]
pub enum AudioError {
    /// No output device could be opened.
    NoDevice(String),
    /// The track could not be loaded or decoded.
    Track(String),
    /// The platform refused playback.
    Rejected(String),
}

/// Background music playback.
///
/// Failing to start playback must never affect the game; callers log the error and carry on.
pub trait AudioSink {
    /// Starts looping playback.
    fn play(&mut self) -> Result<(), AudioError>;

    /// Stops playback and rewinds to the beginning.
    fn stop(&mut self);
}

/// An audio sink that plays nothing.
#[derive(Eq, PartialEq, Clone, Copy, Hash, Default, Debug)]
pub struct Silence;

impl AudioSink for Silence {
    fn play(&mut self) -> Result<(), AudioError> {
        Ok(())
    }

    fn stop(&mut self) {}
}

impl<A: AudioSink + ?Sized> AudioSink for Box<A> {
    fn play(&mut self) -> Result<(), AudioError> {
        (**self).play()
    }

    fn stop(&mut self) {
        (**self).stop()
    }
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioError::NoDevice(e) => write!(f, "no audio output device: {e}"),
            AudioError::Track(e) => write!(f, "could not load track: {e}"),
            AudioError::Rejected(e) => write!(f, "playback rejected: {e}"),
        }
    }
}

impl std::error::Error for AudioError {}

/// Formats the score display text.
pub fn score_text(score: u32) -> String {
    format!("Score: {score}")
}

/// Draws one frame of `game`: all locked cells, the current piece on top, and the preview.
///
/// Piece cells above the grid are not drawn.
pub fn render(game: &Game, renderer: &mut impl Renderer) -> io::Result<()> {
    let state = game.state();
    renderer.clear()?;
    for (x, y, color) in state.grid.filled_cells() {
        renderer.draw_cell(x, y, color)?;
    }
    if let Some(piece) = &state.piece {
        let color = piece.tetromino.color_id();
        for (x, y) in piece.cells() {
            if let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) {
                if x < Grid::WIDTH && y < Grid::HEIGHT {
                    renderer.draw_cell(x, y, color)?;
                }
            }
        }
    }
    if state.started {
        let preview = game.preview();
        for (y, x) in preview.shape().occupied() {
            renderer.draw_preview_cell(x, y, preview.color_id())?;
        }
    }
    renderer.present()
}
