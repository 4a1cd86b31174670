//! Sprite Definitions
//!
//! The robot is drawn from a character pattern and a palette that maps each
//! pattern key to a glyph and color. The palette changes with mood and eye
//! variant; the pattern changes only when decorations come and go.

use std::collections::HashMap;

use ratatui::style::Color;

/// A single colored cell in a sprite
#[derive(Clone, Debug, PartialEq)]
pub struct ColoredCell {
    pub ch: char,
    pub fg: Color,
}

impl ColoredCell {
    pub const fn new(ch: char, fg: Color) -> Self {
        Self { ch, fg }
    }

    /// Transparent cell
    pub const fn empty() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ch == ' '
    }
}

/// A rendered sprite frame
#[derive(Clone, Debug)]
pub struct Frame {
    /// 2D grid of colored cells (row-major)
    pub cells: Vec<Vec<ColoredCell>>,
    pub width: u16,
    pub height: u16,
}

impl Frame {
    pub fn new(cells: Vec<Vec<ColoredCell>>) -> Self {
        let height = cells.len() as u16;
        let width = cells.iter().map(|row| row.len() as u16).max().unwrap_or(0);
        Self {
            cells,
            width,
            height,
        }
    }

    /// Cell at position (empty if out of bounds)
    pub fn get(&self, x: u16, y: u16) -> &ColoredCell {
        static EMPTY: ColoredCell = ColoredCell::empty();
        self.cells
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .unwrap_or(&EMPTY)
    }
}

/// Build a frame from a pattern using a palette of `(key, glyph, color)`.
///
/// Space is always transparent. Keys missing from the palette render as
/// themselves in the terminal's default color.
pub fn build_frame(pattern: &[&str], palette: &[(char, char, Color)]) -> Frame {
    let color_map: HashMap<char, (char, Color)> = palette
        .iter()
        .map(|&(key, ch, color)| (key, (ch, color)))
        .collect();

    let cells = pattern
        .iter()
        .map(|line| {
            line.chars()
                .map(|c| match (c, color_map.get(&c)) {
                    (' ', _) => ColoredCell::empty(),
                    (_, Some(&(ch, color))) => ColoredCell::new(ch, color),
                    (other, None) => ColoredCell::new(other, Color::Reset),
                })
                .collect()
        })
        .collect();

    Frame::new(cells)
}
