pub mod terminal;

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{Color, Print, PrintStyledContent, Stylize},
    terminal as term_cmd, QueueableCommand,
};

type ScreenLine = Vec<(char, Option<Color>)>;

/// Double-buffered character screen that only rewrites what changed between frames.
#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub struct ScreenBuf {
    prev: Vec<ScreenLine>,
    next: Vec<ScreenLine>,
    origin: (u16, u16),
}

impl ScreenBuf {
    pub fn buffer_from(&mut self, base_screen: Vec<String>) {
        self.next = base_screen
            .iter()
            .map(|str| str.chars().zip(std::iter::repeat(None)).collect())
            .collect();
    }

    pub fn buffer_str(&mut self, str: &str, fg_color: Option<Color>, (x, y): (usize, usize)) {
        for (x_c, c) in str.chars().enumerate() {
            // Lazy: just fill up until desired starting row and column exist.
            while y >= self.next.len() {
                self.next.push(Vec::new());
            }
            let row = &mut self.next[y];
            while x + x_c >= row.len() {
                row.push((' ', None));
            }
            row[x + x_c] = (c, fg_color);
        }
    }

    /// Forgets the previous frame so the next flush redraws everything.
    pub fn invalidate(&mut self) {
        self.prev.clear();
    }

    fn put(
        &self,
        term: &mut impl Write,
        (c, fg_color): (char, Option<Color>),
        x: usize,
        y: usize,
    ) -> io::Result<()> {
        let to_u16 = |n: usize| u16::try_from(n).unwrap_or(u16::MAX);
        term.queue(cursor::MoveTo(
            self.origin.0.saturating_add(to_u16(x)),
            self.origin.1.saturating_add(to_u16(y)),
        ))?;
        match fg_color {
            Some(color) => term.queue(PrintStyledContent(c.with(color)))?,
            None => term.queue(Print(c))?,
        };
        Ok(())
    }

    /// Writes the buffered frame to `term`, with its top left corner at `origin`.
    pub fn flush(&mut self, term: &mut impl Write, origin: (u16, u16)) -> io::Result<()> {
        term.queue(term_cmd::BeginSynchronizedUpdate)?;
        if self.prev.is_empty() || origin != self.origin {
            // Redraw entire screen.
            self.origin = origin;
            term.queue(term_cmd::Clear(term_cmd::ClearType::All))?;
            for (y, line) in self.next.iter().enumerate() {
                for (x, &cell) in line.iter().enumerate() {
                    self.put(term, cell, x, y)?;
                }
            }
        } else {
            // Compare next to previous frame and only write differences, blanking what disappeared.
            let blank = (' ', None);
            let height = self.prev.len().max(self.next.len());
            for y in 0..height {
                let line_prev = self.prev.get(y).map_or(&[][..], Vec::as_slice);
                let line_next = self.next.get(y).map_or(&[][..], Vec::as_slice);
                for x in 0..line_prev.len().max(line_next.len()) {
                    let cell_prev = line_prev.get(x).copied().unwrap_or(blank);
                    let cell_next = line_next.get(x).copied().unwrap_or(blank);
                    if cell_prev != cell_next {
                        self.put(term, cell_next, x, y)?;
                    }
                }
            }
        }
        // End frame update and flush.
        term.queue(cursor::MoveTo(0, 0))?;
        term.queue(term_cmd::EndSynchronizedUpdate)?;
        term.flush()?;
        // Swap buffers, keeping a copy so the same frame can be flushed again.
        self.prev = self.next.clone();
        Ok(())
    }

    #[cfg(test)]
    fn line(&self, y: usize) -> String {
        self.prev
            .get(y)
            .map(|line| line.iter().map(|(c, _)| c).collect())
            .unwrap_or_default()
    }

    #[cfg(test)]
    fn cell(&self, x: usize, y: usize) -> Option<(char, Option<Color>)> {
        self.prev.get(y).and_then(|line| line.get(x)).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_str_grows_screen() {
        let mut screen = ScreenBuf::default();
        screen.buffer_from(vec!["ab".to_owned()]);
        screen.buffer_str("[]", Some(Color::Red), (3, 2));
        let mut out = Vec::new();
        screen.flush(&mut out, (0, 0)).unwrap();

        assert_eq!(screen.line(0), "ab");
        assert_eq!(screen.line(1), "");
        assert_eq!(screen.line(2), "   []");
        assert_eq!(screen.cell(3, 2), Some(('[', Some(Color::Red))));
    }

    #[test]
    fn unchanged_frame_writes_almost_nothing() {
        let mut screen = ScreenBuf::default();
        let frame = vec!["Score: 0".to_owned(); 5];

        let mut first = Vec::new();
        screen.buffer_from(frame.clone());
        screen.flush(&mut first, (2, 2)).unwrap();

        let mut second = Vec::new();
        screen.buffer_from(frame);
        screen.flush(&mut second, (2, 2)).unwrap();

        assert!(second.len() < first.len() / 4);

        // Moving the frame forces a full redraw.
        let mut moved = Vec::new();
        screen.buffer_from(vec!["Score: 0".to_owned(); 5]);
        screen.flush(&mut moved, (3, 2)).unwrap();
        assert!(moved.len() > first.len() / 2);
    }
}
