//! Terminal front end for textscope.
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::too_many_lines)]
//!
//! Two displays share one palette and one tick loop:
//!
//! - **ASCII art**: an image (media thumbnail, configured default, or the
//!   built-in picture) is sampled at a chosen resolution and mapped to
//!   density glyphs by [`AsciiArtRenderer`], optionally colored through the
//!   palette. Loading walks a [`FallbackChain`]; re-renders caused by
//!   settings bursts are coalesced by a [`Debouncer`].
//! - **Strip charts**: normalized CPU/RAM/GPU samples scroll right to left
//!   in framed side-by-side panels ([`StripChartRenderer`]).
//!
//! [`Dashboard`] owns the state and drives both; [`GridPresenter`] writes
//! the resulting grids to a terminal through `crossterm`.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use textscope_terminal::{BuiltinRasterizer, Dashboard, Settings};
//!
//! let mut dash = Dashboard::new(Settings::default()).with_rasterizer(BuiltinRasterizer);
//! dash.sample(Duration::ZERO);
//! dash.render_art_now();
//! assert_eq!(dash.art().height(), 25);
//! assert!(dash.render_system_graph(120).is_some());
//! ```

mod app;
mod art;
mod color;
pub mod config;
mod debounce;
mod error;
mod fallback;
pub mod host;
mod present;
pub mod raster;
pub mod sampler;
mod strip_chart;

pub use app::Dashboard;
pub use art::{ArtOptions, AsciiArtRenderer};
pub use color::{slot_to_ansi, ColorMode};
pub use config::{ArtColorMode, ArtSettings, GraphSettings, PaletteSettings, Settings};
pub use debounce::Debouncer;
pub use error::{ConfigError, RasterError, ScopeError};
pub use fallback::{
    failure_grid, render_with_fallback, ArtOutcome, FallbackChain, FallbackState, FAILURE_MARKER,
};
pub use host::{Changes, HostProperties, PropertyUpdate};
pub use present::GridPresenter;
pub use raster::{ArtSource, BuiltinRasterizer, FileRasterizer, ImageRasterizer, PixelGrid};
pub use sampler::{DemoSampler, MetricSource, SeededRng, DEFAULT_SEED};
pub use strip_chart::{
    axis_line, pad_or_trim, percent, FillStyle, PanelSpec, StripChartRenderer, AXIS_END_LABEL,
    AXIS_START_LABEL, GRID_GLYPH, SOLID_GLYPH,
};

// Re-export core types for convenience
pub use textscope_core::{
    Cell, CellColor, GlyphRamp, MetricKey, Palette, PaletteSlot, PaletteStore, PaletteTheme,
    RenderedGrid, Rgb, SeriesStore,
};
pub use textscope_layout::{CharMetrics, GraphLayoutEngine, PanelBounds, PanelLayout};
