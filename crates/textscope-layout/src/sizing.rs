//! Pixel/character conversions and fit scales.
//!
//! Text measurement itself is a host service; this module only turns the
//! measured (or estimated) monospace cell width into column counts.

/// Cell width assumed when the host cannot measure one.
pub const FALLBACK_CHAR_WIDTH: f32 = 10.0;

/// Art grids wider than this shrink their glyphs proportionally.
pub const ART_REFERENCE_RESOLUTION: f32 = 48.0;

/// Smallest scale the terminal is shrunk to when it does not fit.
pub const MIN_TERMINAL_SCALE: f32 = 0.5;

/// Advance width of a typical monospace glyph as a fraction of its em size.
pub const MONOSPACE_ADVANCE: f32 = 0.6;

/// Width of one monospace glyph in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharMetrics {
    width_px: f32,
}

impl Default for CharMetrics {
    fn default() -> Self {
        Self {
            width_px: FALLBACK_CHAR_WIDTH,
        }
    }
}

impl CharMetrics {
    /// Use a measured glyph width; non-positive or non-finite measurements
    /// fall back to [`FALLBACK_CHAR_WIDTH`].
    #[must_use]
    pub fn measured(width_px: f32) -> Self {
        if width_px.is_finite() && width_px > 0.0 {
            Self { width_px }
        } else {
            Self::default()
        }
    }

    /// Estimate the glyph width of a monospace font at `points` (96 dpi).
    #[must_use]
    pub fn from_point_size(points: f32) -> Self {
        Self::measured(points * 96.0 / 72.0 * MONOSPACE_ADVANCE)
    }

    /// Glyph width in pixels.
    #[must_use]
    pub const fn width_px(&self) -> f32 {
        self.width_px
    }

    /// Whole columns fitting in `pixel_width`. Widths below one pixel per
    /// glyph are treated as one.
    #[must_use]
    pub fn columns_for(&self, pixel_width: f32) -> usize {
        if !pixel_width.is_finite() || pixel_width <= 0.0 {
            return 0;
        }
        (pixel_width / self.width_px.max(1.0)).floor() as usize
    }
}

/// Whether content of `content_extent` would overflow `available_extent`.
#[must_use]
pub fn would_overflow(content_extent: usize, available_extent: usize) -> bool {
    content_extent > available_extent
}

/// Glyph scale for an art grid of `resolution` columns: `min(48 / resolution, 1)`.
#[must_use]
pub fn art_font_scale(resolution: u32) -> f32 {
    if resolution == 0 {
        return 1.0;
    }
    (ART_REFERENCE_RESOLUTION / resolution as f32).min(1.0)
}

/// Scale that fits content of `scroll` size into a `client` viewport.
///
/// Each ratio is `client / scroll` (1 when the client extent is 0); the
/// result is the smaller ratio, clamped to `[0.5, 1]`.
#[must_use]
pub fn terminal_fit_scale(client: (f32, f32), scroll: (f32, f32)) -> f32 {
    let ratio = |c: f32, s: f32| {
        if c > 0.0 && s > 0.0 {
            c / s
        } else {
            1.0
        }
    };
    let w = ratio(client.0, scroll.0);
    let h = ratio(client.1, scroll.1);
    w.min(h).clamp(MIN_TERMINAL_SCALE, 1.0)
}
