//! Writes rendered grids to a terminal through crossterm.

use crate::color::ColorMode;
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Color as CrosstermColor, Print, ResetColor, SetForegroundColor};
use std::io::{self, BufWriter, Write};
use textscope_core::{Palette, RenderedGrid};

/// Presents [`RenderedGrid`]s, one same-color span at a time.
///
/// Tracks the current foreground so runs of equal color cost one escape
/// sequence.
#[derive(Debug)]
pub struct GridPresenter {
    color_mode: ColorMode,
    last_fg: Option<CrosstermColor>,
    spans_written: usize,
    style_changes: usize,
}

impl Default for GridPresenter {
    fn default() -> Self {
        Self::with_color_mode(ColorMode::detect())
    }
}

impl GridPresenter {
    /// Create a presenter with a specific color mode.
    #[must_use]
    pub const fn with_color_mode(color_mode: ColorMode) -> Self {
        Self {
            color_mode,
            last_fg: None,
            spans_written: 0,
            style_changes: 0,
        }
    }

    /// Get the color mode.
    #[must_use]
    pub const fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    /// Set the color mode.
    pub fn set_color_mode(&mut self, mode: ColorMode) {
        self.color_mode = mode;
    }

    /// Spans written by the last call.
    #[must_use]
    pub const fn spans_written(&self) -> usize {
        self.spans_written
    }

    /// Foreground changes issued by the last call.
    #[must_use]
    pub const fn style_changes(&self) -> usize {
        self.style_changes
    }

    /// Draw `grid` with its top-left corner at `(x, y)`.
    ///
    /// Returns the number of spans written.
    pub fn draw<W: Write>(
        &mut self,
        grid: &RenderedGrid,
        origin: (u16, u16),
        palette: &Palette,
        writer: &mut W,
    ) -> io::Result<usize> {
        let mut out = BufWriter::with_capacity(8192, writer);
        self.begin(&mut out)?;
        for row in 0..grid.height() {
            let y = origin.1.saturating_add(row as u16);
            queue!(out, MoveTo(origin.0, y))?;
            self.write_row(grid, row, palette, &mut out)?;
        }
        queue!(out, ResetColor)?;
        out.flush()?;
        Ok(self.spans_written)
    }

    /// Write `grid` as newline-separated lines at the cursor, for
    /// non-interactive output.
    pub fn write_lines<W: Write>(
        &mut self,
        grid: &RenderedGrid,
        palette: &Palette,
        writer: &mut W,
    ) -> io::Result<usize> {
        let mut out = BufWriter::with_capacity(8192, writer);
        self.begin(&mut out)?;
        for row in 0..grid.height() {
            self.write_row(grid, row, palette, &mut out)?;
            if self.last_fg.take().is_some() {
                queue!(out, ResetColor)?;
            }
            queue!(out, Print("\n"))?;
        }
        out.flush()?;
        Ok(self.spans_written)
    }

    fn begin<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        self.spans_written = 0;
        self.style_changes = 0;
        self.last_fg = None;
        if self.color_mode != ColorMode::Mono {
            queue!(out, ResetColor)?;
        }
        Ok(())
    }

    fn write_row<W: Write>(
        &mut self,
        grid: &RenderedGrid,
        row: usize,
        palette: &Palette,
        out: &mut W,
    ) -> io::Result<()> {
        for span in grid.spans(row) {
            let fg = span
                .color
                .and_then(|c| self.color_mode.to_crossterm(c, palette));
            if fg != self.last_fg {
                match fg {
                    Some(color) => queue!(out, SetForegroundColor(color))?,
                    None => queue!(out, ResetColor)?,
                }
                self.last_fg = fg;
                self.style_changes += 1;
            }
            queue!(out, Print(&span.text))?;
            self.spans_written += 1;
        }
        Ok(())
    }
}
