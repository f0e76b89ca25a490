//! Side-by-side strip chart panel partitioning.
//!
//! A framed chart row looks like:
//!
//! ```text
//! " 50%" + "│" + panel + "│" + panel + "│" + panel + "│"
//! ```
//!
//! i.e. a label gutter, one outer border on each side and one separator
//! between neighbouring panels.

use serde::{Deserialize, Serialize};

/// Width of the left-side percentage label gutter (`"100%"`).
pub const LABEL_GUTTER: usize = 4;
/// Width of each outer border glyph.
pub const OUTER_BORDER: usize = 1;
/// Width of each separator between panels.
pub const SEPARATOR: usize = 1;

/// Inclusive bounds on a single panel's width, in columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelBounds {
    /// Narrowest allowed panel.
    pub min: usize,
    /// Widest allowed panel.
    pub max: usize,
}

impl Default for PanelBounds {
    fn default() -> Self {
        Self { min: 18, max: 34 }
    }
}

impl PanelBounds {
    /// Create bounds; `max` is raised to `min` when smaller.
    #[must_use]
    pub fn new(min: usize, max: usize) -> Self {
        Self {
            min,
            max: max.max(min),
        }
    }

    /// Clamp a width into the bounds.
    #[must_use]
    pub fn clamp(&self, width: usize) -> usize {
        width.max(self.min).min(self.max.max(self.min))
    }
}

/// Derived geometry of one framed chart. Recomputed every render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelLayout {
    /// Columns per panel.
    pub panel_width: usize,
    /// Number of panels.
    pub panel_count: usize,
    /// Columns of the label gutter.
    pub label_gutter: usize,
    /// Columns occupied by the whole chart, gutter and borders included.
    pub total_width: usize,
}

impl PanelLayout {
    /// Columns between the outer borders: panels plus separators.
    #[must_use]
    pub fn inner_width(&self) -> usize {
        self.panel_width * self.panel_count + self.panel_count.saturating_sub(1) * SEPARATOR
    }

    /// Whether the chart is wider than `available` columns.
    #[must_use]
    pub fn overflows(&self, available: usize) -> bool {
        crate::would_overflow(self.total_width, available)
    }
}

/// Fixed gutter/border cost of a framed chart with `panel_count` panels.
#[must_use]
pub fn frame_overhead(panel_count: usize) -> usize {
    let panels = panel_count.max(1);
    LABEL_GUTTER + 2 * OUTER_BORDER + (panels - 1) * SEPARATOR
}

/// Computes panel geometry from the available character columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphLayoutEngine {
    bounds: PanelBounds,
}

impl GraphLayoutEngine {
    /// Create an engine with the given per-panel bounds.
    #[must_use]
    pub const fn new(bounds: PanelBounds) -> Self {
        Self { bounds }
    }

    /// Per-panel bounds.
    #[must_use]
    pub const fn bounds(&self) -> PanelBounds {
        self.bounds
    }

    /// Width of each of `panel_count` panels sharing `available_cols`.
    ///
    /// Subtracts [`frame_overhead`], floor-divides the remainder evenly and
    /// clamps into `[min, max]`. A negative remainder clamps to `min`; a
    /// panel count of zero is treated as one.
    #[must_use]
    pub fn compute_panel_width(
        available_cols: usize,
        panel_count: usize,
        min_panel_width: usize,
        max_panel_width: usize,
    ) -> usize {
        let bounds = PanelBounds::new(min_panel_width, max_panel_width);
        let panels = panel_count.max(1);
        let remainder = available_cols.saturating_sub(frame_overhead(panels));
        bounds.clamp(remainder / panels)
    }

    /// Full chart geometry for `panel_count` panels.
    #[must_use]
    pub fn layout(&self, available_cols: usize, panel_count: usize) -> PanelLayout {
        let panels = panel_count.max(1);
        let panel_width = Self::compute_panel_width(
            available_cols,
            panels,
            self.bounds.min,
            self.bounds.max,
        );
        PanelLayout {
            panel_width,
            panel_count: panels,
            label_gutter: LABEL_GUTTER,
            total_width: panel_width * panels + frame_overhead(panels),
        }
    }

    /// Width of an unframed single-metric chart: all available columns,
    /// but never fewer than the panel minimum.
    #[must_use]
    pub fn single_width(&self, available_cols: usize) -> usize {
        available_cols.max(self.bounds.min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_three_panels_in_100_columns() {
        // 100 - (4 + 2 + 2) = 92; 92 / 3 = 30
        assert_eq!(GraphLayoutEngine::compute_panel_width(100, 3, 18, 34), 30);
    }

    #[test]
    fn test_clamps_to_max() {
        assert_eq!(GraphLayoutEngine::compute_panel_width(400, 3, 18, 34), 34);
    }

    #[test]
    fn test_negative_remainder_clamps_to_min() {
        assert_eq!(GraphLayoutEngine::compute_panel_width(5, 3, 18, 34), 18);
        assert_eq!(GraphLayoutEngine::compute_panel_width(0, 3, 18, 34), 18);
    }

    #[test]
    fn test_zero_panels_treated_as_one() {
        // 40 - 6 = 34
        assert_eq!(GraphLayoutEngine::compute_panel_width(40, 0, 1, 100), 34);
    }

    #[test]
    fn test_inverted_bounds() {
        assert_eq!(GraphLayoutEngine::compute_panel_width(100, 3, 20, 10), 20);
    }

    #[test]
    fn test_frame_overhead() {
        assert_eq!(frame_overhead(1), 6);
        assert_eq!(frame_overhead(3), 8);
        assert_eq!(frame_overhead(0), 6);
    }

    #[test]
    fn test_layout_totals() {
        let engine = GraphLayoutEngine::new(PanelBounds::default());
        let layout = engine.layout(100, 3);
        assert_eq!(layout.panel_width, 30);
        assert_eq!(layout.inner_width(), 92);
        assert_eq!(layout.total_width, 98);
        assert!(!layout.overflows(100));
    }

    #[test]
    fn test_layout_overflow_when_too_narrow() {
        let engine = GraphLayoutEngine::new(PanelBounds::default());
        let layout = engine.layout(40, 3);
        assert_eq!(layout.panel_width, 18);
        assert!(layout.overflows(40));
    }

    #[test]
    fn test_single_width() {
        let engine = GraphLayoutEngine::new(PanelBounds::new(18, 34));
        assert_eq!(engine.single_width(80), 80);
        assert_eq!(engine.single_width(3), 18);
    }

    #[test]
    fn test_bounds_serde() {
        let bounds: PanelBounds = serde_json::from_str(r#"{"min":10,"max":20}"#).unwrap();
        assert_eq!(bounds, PanelBounds::new(10, 20));
    }

    proptest! {
        #[test]
        fn prop_width_within_bounds(
            cols in 0usize..1000, panels in 0usize..8, min in 1usize..40, extra in 0usize..40
        ) {
            let max = min + extra;
            let w = GraphLayoutEngine::compute_panel_width(cols, panels, min, max);
            prop_assert!(w >= min && w <= max);
        }

        #[test]
        fn prop_unclamped_layout_fits(cols in 0usize..1000, panels in 1usize..6) {
            let w = GraphLayoutEngine::compute_panel_width(cols, panels, 0, usize::MAX);
            prop_assert!(cols < frame_overhead(panels) || w * panels + frame_overhead(panels) <= cols);
        }
    }
}
