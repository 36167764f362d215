use std::collections::HashMap;

use crossterm::style::Color;

/// Terminal colors by engine color id.
/// A missing entry means "terminal default".
pub type Palette = HashMap<u8, Color>;

#[derive(
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Clone,
    Copy,
    Hash,
    Debug,
    Default,
    clap::ValueEnum,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PaletteChoice {
    #[default]
    Original,
    Color16,
    Monochrome,
}

impl PaletteChoice {
    pub fn palette(self) -> Palette {
        match self {
            PaletteChoice::Original => original_palette(),
            PaletteChoice::Color16 => color16_palette(),
            PaletteChoice::Monochrome => monochrome_palette(),
        }
    }
}

pub fn monochrome_palette() -> Palette {
    HashMap::new()
}

pub fn color16_palette() -> Palette {
    const COLORS_COLOR16: [(u8, Color); 7] = [
        (1, Color::Red),
        (2, Color::Cyan),
        (3, Color::Green),
        (4, Color::Magenta),
        (5, Color::DarkYellow),
        (6, Color::Yellow),
        (7, Color::Blue),
    ];
    HashMap::from(COLORS_COLOR16)
}

pub fn original_palette() -> Palette {
    #[rustfmt::skip]
    const COLORS_ORIGINAL: [(u8, Color); 7] = [
        (  1, Color::Rgb{r:255,g: 13,b:114}), // #FF0D72
        (  2, Color::Rgb{r: 13,g:194,b:255}), // #0DC2FF
        (  3, Color::Rgb{r: 13,g:255,b:114}), // #0DFF72
        (  4, Color::Rgb{r:245,g: 56,b:255}), // #F538FF
        (  5, Color::Rgb{r:255,g:142,b: 13}), // #FF8E0D
        (  6, Color::Rgb{r:255,g:225,b: 56}), // #FFE138
        (  7, Color::Rgb{r: 56,g:119,b:255}), // #3877FF
    ];
    HashMap::from(COLORS_ORIGINAL)
}
