use std::io::{self, Write};

use stackfall_engine::{score_text, ColorId, Grid, Renderer};

use crate::{
    application::{Application, Glyphset},
    game_renderers::ScreenBuf,
    palette_presets::Palette,
};

const X_BOARD: usize = 30;
const Y_BOARD: usize = 1;
const X_SIDE_LEFT: usize = 3;
const X_SIDE_RIGHT: usize = 54;
const Y_PREVIEW: usize = 3;
const Y_MESSAGE: usize = 10;

/// Draws the game into a terminal, two columns per grid cell.
#[derive(Debug)]
pub struct TerminalRenderer<'a, T: Write> {
    term: &'a mut T,
    screen: ScreenBuf,
    palette: Palette,
    glyphset: Glyphset,
    cells: [[Option<ColorId>; Grid::WIDTH]; Grid::HEIGHT],
    preview: Vec<(usize, usize, ColorId)>,
    score: u32,
    game_over: Option<u32>,
}

impl<'a, T: Write> TerminalRenderer<'a, T> {
    pub fn new(term: &'a mut T, palette: Palette, glyphset: Glyphset) -> Self {
        Self {
            term,
            screen: ScreenBuf::default(),
            palette,
            glyphset,
            cells: [[None; Grid::WIDTH]; Grid::HEIGHT],
            preview: Vec::new(),
            score: 0,
            game_over: None,
        }
    }

    /// Makes the next [`Renderer::present`] redraw the whole screen.
    pub fn invalidate(&mut self) {
        self.screen.invalidate();
    }

    fn tile(&self) -> &'static str {
        match self.glyphset {
            Glyphset::ASCII => "[]",
            Glyphset::Unicode => "██",
        }
    }

    #[rustfmt::skip]
    fn base_screen(&self) -> Vec<String> {
        let (wall, floor, ceiling) = match self.glyphset {
            Glyphset::ASCII => ("|", "+--------------------+", "+--------------------+"),
            Glyphset::Unicode => ("║", "╚════════════════════╝", "╓╶╶╶╶╶╶╶╶╶╶╶╶╶╶╶╶╶╶╶╶╖"),
        };
        let (keys_move, keys_rotate, keys_soft) = match self.glyphset {
            Glyphset::ASCII => ("<- ->", "^", "v"),
            Glyphset::Unicode => ("← →", "↑", "↓"),
        };
        let mut left = vec![String::new(); Grid::HEIGHT];
        left[1] = score_text(self.score);
        left[5] = "KEYBINDS".to_owned();
        left[6] = "--------".to_owned();
        left[7] = format!("Move    {keys_move}");
        left[8] = format!("Rotate  {keys_rotate}");
        left[9] = format!("Soft    {keys_soft}");
        left[10] = "Drop    Space".to_owned();
        left[11] = "Leave   Esc".to_owned();
        let mut right = vec![String::new(); Grid::HEIGHT];
        right[1] = "NEXT".to_owned();
        if let Some(final_score) = self.game_over {
            right[Y_MESSAGE] = "GAME OVER".to_owned();
            right[Y_MESSAGE + 1] = format!("Final {}", score_text(final_score));
        }

        let x_left = X_SIDE_LEFT;
        let w_left = X_BOARD - 1 - X_SIDE_LEFT;
        let w_gap = X_SIDE_RIGHT - (X_BOARD + 2 * Grid::WIDTH + 1);
        let mut lines = Vec::with_capacity(Grid::HEIGHT + 2);
        lines.push(format!("{:w$}{ceiling}", "", w = X_BOARD - 1));
        for (l, r) in left.iter().zip(right.iter()) {
            lines.push(format!(
                "{:x_left$}{l:<w_left$}{wall}{:20}{wall}{:w_gap$}{r}", "", "", ""
            ));
        }
        lines.push(format!("{:w$}{floor}", "", w = X_BOARD - 1));
        lines
    }
}

impl<T: Write> Renderer for TerminalRenderer<'_, T> {
    fn clear(&mut self) -> io::Result<()> {
        self.cells = [[None; Grid::WIDTH]; Grid::HEIGHT];
        self.preview.clear();
        Ok(())
    }

    fn draw_cell(&mut self, x: usize, y: usize, color: ColorId) -> io::Result<()> {
        if let Some(cell) = self.cells.get_mut(y).and_then(|line| line.get_mut(x)) {
            *cell = Some(color);
        }
        Ok(())
    }

    fn draw_preview_cell(&mut self, x: usize, y: usize, color: ColorId) -> io::Result<()> {
        self.preview.push((x, y, color));
        Ok(())
    }

    fn show_score(&mut self, score: u32) -> io::Result<()> {
        self.score = score;
        Ok(())
    }

    fn show_game_over(&mut self, final_score: u32) -> io::Result<()> {
        self.game_over = Some(final_score);
        self.present()
    }

    fn present(&mut self) -> io::Result<()> {
        let base_screen = self.base_screen();
        self.screen.buffer_from(base_screen);
        let tile = self.tile();
        let get_color = |color: &ColorId| self.palette.get(&color.get()).copied();
        for (y, line) in self.cells.iter().enumerate() {
            for (x, cell) in line.iter().enumerate() {
                if let Some(color) = cell {
                    self.screen
                        .buffer_str(tile, get_color(color), (X_BOARD + 2 * x, Y_BOARD + y));
                }
            }
        }
        for (x, y, color) in &self.preview {
            self.screen.buffer_str(
                tile,
                get_color(color),
                (X_SIDE_RIGHT + 2 * x, Y_BOARD + Y_PREVIEW + y),
            );
        }
        let (x_main, y_main) = Application::<T>::fetch_main_xy();
        self.screen.flush(&mut *self.term, (x_main, y_main + 1))
    }
}

#[cfg(test)]
mod tests {
    use stackfall_engine::Tetromino;

    use super::*;
    use crate::palette_presets::original_palette;

    #[test]
    fn board_is_framed_and_scored() {
        let mut term = Vec::new();
        let renderer = TerminalRenderer::new(&mut term, original_palette(), Glyphset::ASCII);
        let lines = renderer.base_screen();

        assert_eq!(lines.len(), Grid::HEIGHT + 2);
        assert_eq!(lines[0].find('+'), Some(X_BOARD - 1));
        assert!(lines[2].contains("Score: 0"));
        for line in &lines[1..=Grid::HEIGHT] {
            assert_eq!(line.chars().nth(X_BOARD - 1), Some('|'));
            assert_eq!(line.chars().nth(X_BOARD + 2 * Grid::WIDTH), Some('|'));
        }
    }

    #[test]
    fn game_over_message_carries_final_score() {
        let mut term = Vec::new();
        let mut renderer = TerminalRenderer::new(&mut term, original_palette(), Glyphset::Unicode);
        renderer.show_game_over(700).unwrap();
        renderer.show_score(0).unwrap();
        let lines = renderer.base_screen();

        assert!(lines[Y_BOARD + 1].contains("Score: 0"));
        assert!(lines[Y_BOARD + Y_MESSAGE].contains("GAME OVER"));
        assert!(lines[Y_BOARD + Y_MESSAGE + 1].contains("Final Score: 700"));
    }

    #[test]
    fn cells_land_in_board_columns() {
        let mut term = Vec::new();
        let mut renderer = TerminalRenderer::new(&mut term, original_palette(), Glyphset::ASCII);
        let color = Tetromino::I.color_id();
        renderer.clear().unwrap();
        renderer.draw_cell(0, 0, color).unwrap();
        renderer.draw_cell(9, 19, color).unwrap();
        renderer.draw_cell(10, 0, color).unwrap();
        renderer.present().unwrap();

        let filled = renderer.cells.iter().flatten().filter(|c| c.is_some()).count();
        assert_eq!(filled, 2);
        assert_eq!(renderer.screen.line(Y_BOARD).find("[]"), Some(X_BOARD));
        assert_eq!(
            renderer.screen.line(Y_BOARD + 19).rfind("[]"),
            Some(X_BOARD + 18)
        );
    }
}
