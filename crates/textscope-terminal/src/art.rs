//! Image-to-character art conversion.
//!
//! Each sample becomes one cell: the glyph comes from the luminance of the
//! saturation-adjusted color, the optional color tag is either that color
//! verbatim or its nearest palette slot.

use crate::config::{sanitize_saturation, ArtColorMode, ArtSettings};
use crate::raster::PixelGrid;
use textscope_core::{
    luminance, saturate, Cell, CellColor, GlyphRamp, Palette, RenderedGrid, Rgb,
};

/// Per-render options, taken from the settings snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArtOptions {
    /// Attach a color to each cell.
    pub color_enabled: bool,
    /// How the color is chosen.
    pub color_mode: ArtColorMode,
    /// Chroma multiplier.
    pub saturation: f32,
}

impl Default for ArtOptions {
    fn default() -> Self {
        Self {
            color_enabled: false,
            color_mode: ArtColorMode::Theme,
            saturation: 1.0,
        }
    }
}

impl From<&ArtSettings> for ArtOptions {
    fn from(art: &ArtSettings) -> Self {
        Self {
            color_enabled: art.colored,
            color_mode: art.color_mode,
            saturation: art.saturation,
        }
    }
}

impl ArtOptions {
    /// Enable coloring in `mode`.
    #[must_use]
    pub const fn colored(mut self, mode: ArtColorMode) -> Self {
        self.color_enabled = true;
        self.color_mode = mode;
        self
    }

    /// Set the saturation.
    #[must_use]
    pub const fn with_saturation(mut self, saturation: f32) -> Self {
        self.saturation = saturation;
        self
    }
}

/// Converts sample grids into character art.
#[derive(Debug, Clone, Default)]
pub struct AsciiArtRenderer {
    ramp: GlyphRamp,
}

impl AsciiArtRenderer {
    /// Renderer using the default art ramp.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer using a custom ramp.
    #[must_use]
    pub fn with_ramp(ramp: GlyphRamp) -> Self {
        Self { ramp }
    }

    /// The glyph ramp, sparsest first.
    #[must_use]
    pub fn ramp(&self) -> &GlyphRamp {
        &self.ramp
    }

    /// Render `pixels` to a grid of exactly the same dimensions.
    ///
    /// Alpha is ignored. Theme quantization reads `palette`; it is unused
    /// otherwise.
    #[must_use]
    pub fn render(&self, pixels: &PixelGrid, options: &ArtOptions, palette: &Palette) -> RenderedGrid {
        let saturation = sanitize_saturation(options.saturation);
        let rows = pixels
            .rows()
            .map(|row| {
                row.chunks_exact(4)
                    .map(|px| {
                        let channels = saturate(
                            [f32::from(px[0]), f32::from(px[1]), f32::from(px[2])],
                            saturation,
                        );
                        self.cell(channels, options, palette)
                    })
                    .collect()
            })
            .collect();
        RenderedGrid::new(rows)
    }

    fn cell(&self, channels: [f32; 3], options: &ArtOptions, palette: &Palette) -> Cell {
        let glyph = self.ramp.glyph_for(luminance(channels) / 255.0);
        if !options.color_enabled {
            return Cell::plain(glyph);
        }
        let color = match options.color_mode {
            ArtColorMode::Direct => CellColor::Rgb(Rgb::from_channels(channels)),
            ArtColorMode::Theme => {
                let [r, g, b] = channels;
                CellColor::Slot(palette.nearest(r, g, b))
            }
        };
        Cell::colored(glyph, color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use textscope_core::PaletteSlot;

    fn solid(rgb: [u8; 3]) -> PixelGrid {
        PixelGrid::filled(6, 3, rgb).unwrap()
    }

    #[test]
    fn test_dimensions_match_input() {
        let grid = AsciiArtRenderer::new().render(
            &solid([10, 20, 30]),
            &ArtOptions::default(),
            &Palette::default(),
        );
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.width(), 6);
        assert!(grid.rows().iter().all(|r| r.len() == 6));
    }

    #[test]
    fn test_black_is_sparsest_white_is_densest() {
        let renderer = AsciiArtRenderer::new();
        let palette = Palette::default();
        let options = ArtOptions::default();
        let black = renderer.render(&solid([0, 0, 0]), &options, &palette);
        let white = renderer.render(&solid([255, 255, 255]), &options, &palette);
        let sparsest = renderer.ramp().sparsest();
        let densest = renderer.ramp().densest();
        assert!(black.rows().iter().flatten().all(|c| c.glyph == sparsest));
        assert!(white.rows().iter().flatten().all(|c| c.glyph == densest));
    }

    #[test]
    fn test_monochrome_has_no_color() {
        let grid = AsciiArtRenderer::new().render(
            &solid([200, 30, 30]),
            &ArtOptions::default(),
            &Palette::default(),
        );
        assert!(grid.rows().iter().flatten().all(|c| c.color.is_none()));
    }

    #[test]
    fn test_direct_color_passes_adjusted_rgb() {
        let options = ArtOptions::default().colored(ArtColorMode::Direct);
        let grid = AsciiArtRenderer::new().render(&solid([12, 34, 56]), &options, &Palette::default());
        assert_eq!(
            grid.cell(0, 0).and_then(|c| c.color),
            Some(CellColor::Rgb(Rgb::new(12, 34, 56)))
        );
    }

    #[test]
    fn test_theme_color_quantizes() {
        let options = ArtOptions::default().colored(ArtColorMode::Theme);
        let grid = AsciiArtRenderer::new().render(&solid([250, 5, 5]), &options, &Palette::default());
        assert_eq!(
            grid.cell(2, 5).and_then(|c| c.color),
            Some(CellColor::Slot(PaletteSlot::BrightRed))
        );
    }

    #[test]
    fn test_zero_saturation_is_gray() {
        let options = ArtOptions::default()
            .colored(ArtColorMode::Direct)
            .with_saturation(0.0);
        let grid = AsciiArtRenderer::new().render(&solid([255, 0, 0]), &options, &Palette::default());
        match grid.cell(0, 0).and_then(|c| c.color) {
            Some(CellColor::Rgb(rgb)) => assert!(rgb.is_gray(), "{rgb}"),
            other => panic!("unexpected color {other:?}"),
        }
    }

    #[test]
    fn test_invalid_saturation_treated_as_identity() {
        let renderer = AsciiArtRenderer::new();
        let palette = Palette::default();
        let base = ArtOptions::default().colored(ArtColorMode::Direct);
        let plain = renderer.render(&solid([40, 160, 90]), &base, &palette);
        let nan = renderer.render(&solid([40, 160, 90]), &base.with_saturation(f32::NAN), &palette);
        assert_eq!(plain, nan);
    }

    #[test]
    fn test_options_from_settings() {
        let art = ArtSettings {
            colored: true,
            color_mode: ArtColorMode::Direct,
            saturation: 1.5,
            ..ArtSettings::default()
        };
        let options = ArtOptions::from(&art);
        assert!(options.color_enabled);
        assert_eq!(options.color_mode, ArtColorMode::Direct);
        assert_eq!(options.saturation, 1.5);
    }
}
