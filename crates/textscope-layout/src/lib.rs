#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]
//! Layout for textscope strip charts.
//!
//! - [`GraphLayoutEngine`] partitions the available character columns
//!   across side-by-side panels, honoring per-panel [`PanelBounds`].
//! - [`CharMetrics`] converts host pixel widths into character columns.
//! - [`would_overflow`], [`art_font_scale`] and [`terminal_fit_scale`]
//!   decide when content must shrink or hide.
//!
//! Everything here is cheap and pure, so it is recomputed on every tick.

mod panel;
mod sizing;

pub use panel::{
    frame_overhead, GraphLayoutEngine, PanelBounds, PanelLayout, LABEL_GUTTER, OUTER_BORDER,
    SEPARATOR,
};
pub use sizing::{
    art_font_scale, terminal_fit_scale, would_overflow, CharMetrics, ART_REFERENCE_RESOLUTION,
    FALLBACK_CHAR_WIDTH, MIN_TERMINAL_SCALE, MONOSPACE_ADVANCE,
};
