//! Renderer behaviour through the public API.

use proptest::prelude::*;
use textscope_terminal::{
    ArtColorMode, ArtOptions, AsciiArtRenderer, CellColor, GlyphRamp, GraphLayoutEngine,
    MetricKey, Palette, PaletteSlot, PanelSpec, PixelGrid, SeriesStore, StripChartRenderer,
    GRID_GLYPH,
};

// =============================================================================
// ASCII art
// =============================================================================

mod art {
    use super::*;

    #[test]
    fn black_is_sparsest_white_is_densest() {
        let renderer = AsciiArtRenderer::new();
        let pixels = PixelGrid::from_fn(2, 1, |x, _| if x == 0 { [0, 0, 0] } else { [255, 255, 255] })
            .unwrap();
        let grid = renderer.render(&pixels, &ArtOptions::default(), &Palette::default());
        assert_eq!(grid.cell(0, 0).map(|c| c.glyph), Some(' '));
        assert_eq!(grid.cell(0, 1).map(|c| c.glyph), Some('@'));
    }

    #[test]
    fn zero_saturation_red_quantizes_to_gray() {
        let renderer = AsciiArtRenderer::new();
        let pixels = PixelGrid::filled(4, 2, [255, 0, 0]).unwrap();
        let options = ArtOptions::default()
            .colored(ArtColorMode::Theme)
            .with_saturation(0.0);
        let grid = renderer.render(&pixels, &options, &Palette::default());
        let grays = [
            PaletteSlot::Black,
            PaletteSlot::White,
            PaletteSlot::BrightBlack,
            PaletteSlot::BrightWhite,
        ];
        for row in grid.rows() {
            for cell in row {
                match cell.color {
                    Some(CellColor::Slot(slot)) => assert!(grays.contains(&slot), "{slot:?}"),
                    other => panic!("expected a slot, got {other:?}"),
                }
            }
        }
    }

    #[test]
    fn direct_mode_keeps_pixel_color() {
        let pixels = PixelGrid::filled(1, 1, [12, 200, 90]).unwrap();
        let options = ArtOptions::default().colored(ArtColorMode::Direct);
        let grid = AsciiArtRenderer::new().render(&pixels, &options, &Palette::default());
        let color = grid.cell(0, 0).and_then(|c| c.color);
        assert_eq!(
            color,
            Some(CellColor::Rgb(textscope_terminal::Rgb::new(12, 200, 90)))
        );
    }

    proptest! {
        #[test]
        fn output_matches_sample_dimensions(w in 1u32..40, h in 1u32..20, shade in 0u8..=255) {
            let pixels = PixelGrid::filled(w, h, [shade, shade, shade]).unwrap();
            let grid = AsciiArtRenderer::new().render(&pixels, &ArtOptions::default(), &Palette::default());
            prop_assert_eq!(grid.height(), h as usize);
            prop_assert!(grid.rows().iter().all(|r| r.len() == w as usize));
        }

        #[test]
        fn brighter_never_sparser(a in 0u8..=255, b in 0u8..=255) {
            let ramp = GlyphRamp::art();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let pixels = PixelGrid::from_fn(2, 1, |x, _| {
                let v = if x == 0 { lo } else { hi };
                [v, v, v]
            }).unwrap();
            let grid = AsciiArtRenderer::new().render(&pixels, &ArtOptions::default(), &Palette::default());
            let index = |col: usize| {
                let glyph = grid.cell(0, col).map(|c| c.glyph).unwrap_or(' ');
                ramp.glyphs().iter().position(|g| *g == glyph).unwrap_or(0)
            };
            prop_assert!(index(0) <= index(1));
        }
    }
}

// =============================================================================
// Strip charts
// =============================================================================

mod strip_chart {
    use super::*;

    fn store_with(value: f64, samples: usize) -> SeriesStore {
        let mut store = SeriesStore::system(100, false);
        for _ in 0..samples {
            store.append(&MetricKey::ram(), value);
        }
        store
    }

    #[test]
    fn full_value_fills_every_row() {
        let chart = StripChartRenderer::new(8);
        let grid = chart.render_stock(&store_with(1.0, 20), &PanelSpec::ram(), 20);
        for row in grid.rows() {
            assert!(row.iter().all(|c| c.glyph != ' ' && c.glyph != GRID_GLYPH));
        }
    }

    #[test]
    fn zero_value_is_all_background() {
        let chart = StripChartRenderer::new(8);
        let grid = chart.render_stock(&store_with(0.0, 20), &PanelSpec::ram(), 20);
        for row in grid.rows() {
            assert!(row.iter().all(|c| c.glyph == ' '));
        }
    }

    #[test]
    fn short_history_is_right_aligned() {
        let chart = StripChartRenderer::new(4);
        let grid = chart.render_stock(&store_with(1.0, 3), &PanelSpec::ram(), 10);
        let bottom = grid.line(3).unwrap();
        assert!(bottom.starts_with("       "));
        assert!(!bottom.ends_with(' '));
    }

    #[test]
    fn framed_chart_width_matches_layout() {
        let engine = GraphLayoutEngine::default();
        let layout = engine.layout(100, 3);
        let grid = StripChartRenderer::new(10).render(
            &SeriesStore::system(100, true),
            &PanelSpec::system(),
            layout.panel_width,
        );
        assert_eq!(grid.row(0).map(<[_]>::len), Some(layout.total_width));
        assert_eq!(grid.row(2).map(<[_]>::len), Some(layout.total_width));
    }
}

// =============================================================================
// Layout
// =============================================================================

mod layout {
    use super::*;

    #[test]
    fn three_panels_in_hundred_columns() {
        assert_eq!(GraphLayoutEngine::compute_panel_width(100, 3, 18, 34), 30);
    }

    #[test]
    fn narrow_terminal_clamps_to_minimum() {
        assert_eq!(GraphLayoutEngine::compute_panel_width(10, 3, 18, 34), 18);
    }

    #[test]
    fn wide_terminal_clamps_to_maximum() {
        assert_eq!(GraphLayoutEngine::compute_panel_width(500, 3, 18, 34), 34);
    }

    proptest! {
        #[test]
        fn width_always_within_bounds(cols in 0usize..1000, panels in 0usize..8) {
            let w = GraphLayoutEngine::compute_panel_width(cols, panels, 18, 34);
            prop_assert!((18..=34).contains(&w));
        }
    }
}
