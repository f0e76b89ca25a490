#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]
//! Core types for textscope.
//!
//! This crate provides the substrate shared by the image-art and strip chart
//! renderers:
//! - Colors: [`Rgb`] with luminance and saturation math
//! - The 16-slot terminal palette: [`Palette`], [`PaletteSlot`], [`PaletteStore`]
//!   and nearest-entry quantization ([`Palette::nearest`])
//! - Built-in palettes: [`PaletteTheme`]
//! - Density ramps: [`GlyphRamp`]
//! - Renderer output: [`RenderedGrid`], [`Cell`], [`CellColor`]
//! - Sample history: [`TimeSeriesBuffer`], [`SeriesStore`]

mod color;
mod glyph;
mod grid;
mod palette;
mod series;
mod theme;

pub use color::{luminance, parse_unit_triplet, saturate, ColorParseError, Rgb};
pub use glyph::{GlyphRamp, ART_RAMP, CPU_RAMP, GPU_RAMP, RAM_RAMP};
pub use grid::{Cell, CellColor, RenderedGrid, Span};
pub use palette::{Palette, PaletteSlot, PaletteStore};
pub use series::{clamp01, MetricKey, SeriesStore, TimeSeriesBuffer, DEFAULT_CAPACITY};
pub use theme::PaletteTheme;
