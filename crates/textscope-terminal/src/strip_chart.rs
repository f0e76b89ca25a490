//! Scrolling strip charts.
//!
//! A framed system graph puts several panels side by side:
//!
//! ```text
//!     ┌─CPU─42%─────┬─RAM─30%─────┐
//!     │ CPU 42%     │ RAM 30%     │
//! 100%│-------------│-------------│
//!     │          @  │             │
//!     │       %%%#  │             │
//!  50%│------####*--│-------------│
//!     │    ***++++= │ ~~~~~~~~~~~ │
//!   0%│......:......│.............│
//!     └─────────────┴─────────────┘
//!      0s                    time →
//! ```
//!
//! A stock graph is a single unframed panel filled with solid blocks.
//!
//! Each column is one sample, newest on the right. A sample `v` fills row
//! `r` (counted from the bottom) when `r <= v * (height - 1)`; filled cells
//! take their glyph from the panel ramp at `r / max(v * (height - 1), 1)`.
//! A zero sample, or a column with no sample yet, draws nothing.

use textscope_core::{clamp01, Cell, CellColor, GlyphRamp, MetricKey, RenderedGrid, SeriesStore};
use textscope_layout::LABEL_GUTTER;
use unicode_width::UnicodeWidthChar;

/// Glyph of solid fills.
pub const SOLID_GLYPH: char = '█';
/// Glyph of background cells on gridline rows.
pub const GRID_GLYPH: char = '-';
/// Left axis label.
pub const AXIS_START_LABEL: &str = "0s";
/// Right axis label.
pub const AXIS_END_LABEL: &str = "time →";

/// How filled cells are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillStyle {
    /// Density ramp, densest at the fill line.
    #[default]
    Ramp,
    /// Solid blocks.
    Solid,
}

/// One metric panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelSpec {
    /// Series to draw.
    pub key: MetricKey,
    /// Title label, e.g. `CPU`.
    pub label: String,
    /// Shading ramp for [`FillStyle::Ramp`].
    pub ramp: GlyphRamp,
    /// Fill style.
    pub fill: FillStyle,
    /// Color of filled cells.
    pub accent: Option<CellColor>,
}

impl PanelSpec {
    /// A ramp-filled panel without accent color.
    #[must_use]
    pub fn new(key: MetricKey, label: impl Into<String>, ramp: GlyphRamp) -> Self {
        Self {
            key,
            label: label.into(),
            ramp,
            fill: FillStyle::Ramp,
            accent: None,
        }
    }

    /// The CPU panel.
    #[must_use]
    pub fn cpu() -> Self {
        Self::new(MetricKey::cpu(), "CPU", GlyphRamp::cpu())
    }

    /// The RAM panel.
    #[must_use]
    pub fn ram() -> Self {
        Self::new(MetricKey::ram(), "RAM", GlyphRamp::ram())
    }

    /// The GPU panel.
    #[must_use]
    pub fn gpu() -> Self {
        Self::new(MetricKey::gpu(), "GPU", GlyphRamp::gpu())
    }

    /// CPU, RAM and GPU panels in display order.
    #[must_use]
    pub fn system() -> Vec<Self> {
        vec![Self::cpu(), Self::ram(), Self::gpu()]
    }

    /// Set the fill style.
    #[must_use]
    pub fn with_fill(mut self, fill: FillStyle) -> Self {
        self.fill = fill;
        self
    }

    /// Set the accent color.
    #[must_use]
    pub fn with_accent(mut self, accent: CellColor) -> Self {
        self.accent = Some(accent);
        self
    }

    /// Title text ` LABEL NN% ` for a latest value.
    #[must_use]
    pub fn title(&self, latest: f64) -> String {
        format!(" {} {}% ", self.label, percent(latest))
    }
}

/// `round(clamp01(v) * 100)`.
#[must_use]
pub fn percent(value: f64) -> u32 {
    (clamp01(value) * 100.0).round() as u32
}

/// Pad with spaces or trim `text` to exactly `width` display columns.
///
/// A wide glyph that would straddle the edge is replaced by padding.
#[must_use]
pub fn pad_or_trim(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(width);
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.extend(std::iter::repeat(' ').take(width - used));
    out
}

/// Renders strip charts from a series store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripChartRenderer {
    height: usize,
    grid_interval_percent: u32,
}

impl Default for StripChartRenderer {
    fn default() -> Self {
        Self::new(10)
    }
}

impl StripChartRenderer {
    /// Renderer for charts `height` rows tall (at least 2), gridlines every 25%.
    #[must_use]
    pub fn new(height: usize) -> Self {
        Self {
            height: height.max(2),
            grid_interval_percent: 25,
        }
    }

    /// Set the gridline interval in percent (1-100).
    #[must_use]
    pub fn with_grid_interval(mut self, percent: u32) -> Self {
        self.grid_interval_percent = percent.clamp(1, 100);
        self
    }

    /// Chart rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Gridline interval in percent.
    #[must_use]
    pub const fn grid_interval_percent(&self) -> u32 {
        self.grid_interval_percent
    }

    /// The y-axis value of `row` (from the top), in percent.
    #[must_use]
    pub fn row_percent(&self, row: usize) -> u32 {
        let span = (self.height - 1) as f64;
        let from_bottom = (self.height - 1 - row.min(self.height - 1)) as f64;
        (from_bottom / span * 100.0).round() as u32
    }

    /// Whether `row` is a gridline row.
    #[must_use]
    pub fn is_grid_row(&self, row: usize) -> bool {
        self.row_percent(row) % self.grid_interval_percent == 0
    }

    /// Cell for sample `value` at `row` (from the top).
    ///
    /// `None` values are columns with no sample yet.
    #[must_use]
    pub fn cell(&self, value: Option<f64>, row: usize, panel: &PanelSpec, grid_row: bool) -> Cell {
        let background = Cell::plain(if grid_row { GRID_GLYPH } else { ' ' });
        let v = clamp01(value.unwrap_or(0.0));
        if v <= 0.0 {
            return background;
        }
        let filled = v * (self.height - 1) as f64;
        let from_bottom = (self.height - 1 - row.min(self.height - 1)) as f64;
        if from_bottom > filled {
            return background;
        }
        let glyph = match panel.fill {
            FillStyle::Solid => SOLID_GLYPH,
            FillStyle::Ramp => {
                let t = from_bottom / filled.max(1.0);
                panel.ramp.glyph_for(t as f32)
            }
        };
        match panel.accent {
            Some(color) => Cell::colored(glyph, color),
            None => Cell::plain(glyph),
        }
    }

    /// One panel row of `width` cells. Missing leading samples are empty.
    fn panel_row<'a>(
        &'a self,
        values: &'a [f64],
        width: usize,
        row: usize,
        panel: &'a PanelSpec,
        grid_row: bool,
    ) -> impl Iterator<Item = Cell> + 'a {
        let missing = width.saturating_sub(values.len());
        (0..width).map(move |col| {
            let value = col.checked_sub(missing).and_then(|i| values.get(i)).copied();
            self.cell(value, row, panel, grid_row)
        })
    }

    /// Render a framed multi-panel chart, each panel `panel_width` columns.
    ///
    /// Layout is top border with titles, title line, `height` plot rows
    /// with y labels, bottom border, then the time axis line.
    #[must_use]
    pub fn render(&self, series: &SeriesStore, panels: &[PanelSpec], panel_width: usize) -> RenderedGrid {
        let width = panel_width.max(1);
        let gutter = || std::iter::repeat(Cell::BLANK).take(LABEL_GUTTER);
        let mut rows: Vec<Vec<Cell>> = Vec::with_capacity(self.height + 4);

        let titles: Vec<String> = panels
            .iter()
            .map(|p| pad_or_trim(&p.title(series.latest(&p.key)), width))
            .collect();

        // Top border with embedded titles.
        let mut top: Vec<Cell> = gutter().collect();
        top.push(Cell::plain('┌'));
        for (i, title) in titles.iter().enumerate() {
            if i > 0 {
                top.push(Cell::plain('┬'));
            }
            top.extend(title.chars().map(|c| Cell::plain(if c == ' ' { '─' } else { c })));
        }
        top.push(Cell::plain('┐'));
        rows.push(top);

        // Title line.
        let mut title_line: Vec<Cell> = gutter().collect();
        title_line.push(Cell::plain('│'));
        for title in &titles {
            title_line.extend(title.chars().map(Cell::plain));
            title_line.push(Cell::plain('│'));
        }
        rows.push(title_line);

        let tails: Vec<Vec<f64>> = panels.iter().map(|p| series.tail(&p.key, width)).collect();
        for row in 0..self.height {
            let grid_row = self.is_grid_row(row);
            let label = if grid_row {
                format!("{:>3}%", self.row_percent(row))
            } else {
                " ".repeat(LABEL_GUTTER)
            };
            let mut line: Vec<Cell> = label.chars().map(Cell::plain).collect();
            line.push(Cell::plain('│'));
            for (panel, values) in panels.iter().zip(&tails) {
                line.extend(self.panel_row(values, width, row, panel, grid_row));
                line.push(Cell::plain('│'));
            }
            rows.push(line);
        }

        // Bottom border.
        let mut bottom: Vec<Cell> = gutter().collect();
        bottom.push(Cell::plain('└'));
        for i in 0..panels.len() {
            if i > 0 {
                bottom.push(Cell::plain('┴'));
            }
            bottom.extend(std::iter::repeat(Cell::plain('─')).take(width));
        }
        bottom.push(Cell::plain('┘'));
        rows.push(bottom);

        rows.push(axis_line(width, panels.len()).chars().map(Cell::plain).collect());
        RenderedGrid::new(rows)
    }

    /// Render an unframed single-panel chart `width` columns wide.
    #[must_use]
    pub fn render_stock(&self, series: &SeriesStore, panel: &PanelSpec, width: usize) -> RenderedGrid {
        let values = series.tail(&panel.key, width);
        let rows = (0..self.height)
            .map(|row| self.panel_row(&values, width, row, panel, false).collect())
            .collect();
        RenderedGrid::new(rows)
    }
}

/// Time axis below a framed chart.
///
/// The end label is right-aligned to the inner width and omitted when it
/// does not fit.
#[must_use]
pub fn axis_line(panel_width: usize, panel_count: usize) -> String {
    let panels = panel_count.max(1);
    let inner = panel_width * panels + (panels - 1);
    let mut axis = " ".repeat(LABEL_GUTTER + 1);
    axis.push_str(AXIS_START_LABEL);
    let used = AXIS_START_LABEL.chars().count() + AXIS_END_LABEL.chars().count();
    if let Some(padding) = inner.checked_sub(used) {
        axis.push_str(&" ".repeat(padding));
        axis.push_str(AXIS_END_LABEL);
    }
    axis
}
