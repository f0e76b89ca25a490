//! Rendered character grids: rows of glyph cells with optional color.

use crate::color::Rgb;
use crate::palette::{Palette, PaletteSlot};
use serde::{Deserialize, Serialize};

/// Color attached to a cell, passed through to the display surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellColor {
    /// A named palette slot, resolved by the display's theme.
    Slot(PaletteSlot),
    /// A literal true-color value.
    Rgb(Rgb),
}

impl CellColor {
    /// Resolve to RGB using a palette snapshot.
    #[must_use]
    pub const fn resolve(self, palette: &Palette) -> Rgb {
        match self {
            Self::Slot(slot) => palette.get(slot),
            Self::Rgb(rgb) => rgb,
        }
    }
}

/// One character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Glyph to display.
    pub glyph: char,
    /// Optional color tag.
    pub color: Option<CellColor>,
}

impl Cell {
    /// A blank cell.
    pub const BLANK: Self = Self::plain(' ');

    /// An uncolored cell.
    #[must_use]
    pub const fn plain(glyph: char) -> Self {
        Self { glyph, color: None }
    }

    /// A colored cell.
    #[must_use]
    pub const fn colored(glyph: char, color: CellColor) -> Self {
        Self {
            glyph,
            color: Some(color),
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}

/// A run of adjacent cells in one row sharing the same color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Column of the first cell.
    pub start: usize,
    /// Glyphs of the run.
    pub text: String,
    /// Shared color.
    pub color: Option<CellColor>,
}

/// Immutable renderer output.
///
/// Rows may differ in length (framing lines are not padded).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RenderedGrid {
    rows: Vec<Vec<Cell>>,
}

impl RenderedGrid {
    /// Wrap finished rows.
    #[must_use]
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// A grid of uncolored text, one row per line.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            rows: text
                .lines()
                .map(|line| line.chars().map(Cell::plain).collect())
                .collect(),
        }
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Length of the longest row.
    #[must_use]
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Whether the grid has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// A single row.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&[Cell]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// A single cell.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Glyphs of a row as a string.
    #[must_use]
    pub fn line(&self, index: usize) -> Option<String> {
        self.row(index)
            .map(|cells| cells.iter().map(|c| c.glyph).collect())
    }

    /// All rows as strings.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|cells| cells.iter().map(|c| c.glyph).collect())
            .collect()
    }

    /// Glyphs joined by newlines, colors dropped.
    #[must_use]
    pub fn to_plain_text(&self) -> String {
        self.lines().join("\n")
    }

    /// Same-color runs of a row.
    #[must_use]
    pub fn spans(&self, index: usize) -> Vec<Span> {
        let Some(cells) = self.rows.get(index) else {
            return Vec::new();
        };
        let mut spans: Vec<Span> = Vec::new();
        for (col, cell) in cells.iter().enumerate() {
            match spans.last_mut() {
                Some(span) if span.color == cell.color => span.text.push(cell.glyph),
                _ => spans.push(Span {
                    start: col,
                    text: cell.glyph.to_string(),
                    color: cell.color,
                }),
            }
        }
        spans
    }
}
