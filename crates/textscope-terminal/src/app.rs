//! Dashboard state and tick driver.
//!
//! [`Dashboard`] owns every piece of state the two renderers read: the
//! settings snapshot, the palette, the sample history and the current art.
//! It never reads a clock; callers pass `now`/`elapsed` in, so a host
//! event loop and the tests drive it the same way.

use crate::art::{ArtOptions, AsciiArtRenderer};
use crate::config::Settings;
use crate::debounce::Debouncer;
use crate::fallback::{render_with_fallback, ArtOutcome, FallbackChain, FallbackState};
use crate::host::{Changes, HostProperties};
use crate::raster::{FileRasterizer, ImageRasterizer};
use crate::sampler::{DemoSampler, MetricSource};
use crate::strip_chart::{FillStyle, PanelSpec, StripChartRenderer};
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use textscope_core::{
    CellColor, GlyphRamp, MetricKey, Palette, PaletteSlot, PaletteStore, RenderedGrid,
    SeriesStore,
};
use textscope_layout::{art_font_scale, CharMetrics, GraphLayoutEngine, PanelLayout};

/// Arguments of a pending art render.
#[derive(Debug, Clone)]
struct ArtRequest {
    settings: Arc<Settings>,
    thumbnail: Option<String>,
}

/// Everything needed to produce both displays from one tick loop.
pub struct Dashboard {
    settings: Arc<Settings>,
    palette: PaletteStore,
    series: SeriesStore,
    layout: GraphLayoutEngine,
    chart: StripChartRenderer,
    panels: Vec<PanelSpec>,
    art_renderer: AsciiArtRenderer,
    rasterizer: Box<dyn ImageRasterizer>,
    source: Box<dyn MetricSource>,
    art_debounce: Debouncer<ArtRequest>,
    media_thumbnail: Option<String>,
    art: ArtOutcome,
    art_renders: usize,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("settings", &self.settings)
            .field("theme", &self.palette.theme())
            .field("panels", &self.panels.len())
            .field("art_state", &self.art.state)
            .field("art_renders", &self.art_renders)
            .finish_non_exhaustive()
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Dashboard {
    /// Dashboard reading images from disk and sampling demo metrics.
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        let settings = Arc::new(settings.sanitized());
        let mut palette = PaletteStore::default();
        palette.rebuild(
            settings.palette.theme(),
            &settings.palette.override_colors(),
        );
        let graph = &settings.graph;
        Self {
            series: SeriesStore::system(graph.max_samples, graph.prefill),
            layout: GraphLayoutEngine::new(graph.bounds()),
            chart: StripChartRenderer::new(graph.height)
                .with_grid_interval(graph.grid_interval_percent),
            panels: default_panels(),
            art_renderer: AsciiArtRenderer::new(),
            rasterizer: Box::new(FileRasterizer),
            source: Box::new(DemoSampler::default()),
            art_debounce: Debouncer::new(Duration::from_millis(settings.art.debounce_ms)),
            media_thumbnail: None,
            art: ArtOutcome {
                grid: RenderedGrid::default(),
                source: None,
                state: FallbackState::TryingPrimary,
            },
            art_renders: 0,
            palette,
            settings,
        }
    }

    /// Replace the image rasterizer.
    #[must_use]
    pub fn with_rasterizer(mut self, rasterizer: impl ImageRasterizer + 'static) -> Self {
        self.rasterizer = Box::new(rasterizer);
        self
    }

    /// Replace the metric source.
    #[must_use]
    pub fn with_source(mut self, source: impl MetricSource + 'static) -> Self {
        self.source = Box::new(source);
        self
    }

    /// Replace the strip chart panels.
    #[must_use]
    pub fn with_panels(mut self, panels: Vec<PanelSpec>) -> Self {
        self.panels = panels;
        self
    }

    /// Current settings snapshot.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Shared palette snapshot.
    #[must_use]
    pub fn palette(&self) -> Arc<Palette> {
        self.palette.snapshot()
    }

    /// Sample history.
    #[must_use]
    pub fn series(&self) -> &SeriesStore {
        &self.series
    }

    /// Strip chart panels.
    #[must_use]
    pub fn panels(&self) -> &[PanelSpec] {
        &self.panels
    }

    /// Latest art, or the failure marker.
    #[must_use]
    pub fn art(&self) -> &RenderedGrid {
        &self.art.grid
    }

    /// Latest art render with its source and chain state.
    #[must_use]
    pub fn art_outcome(&self) -> &ArtOutcome {
        &self.art
    }

    /// Number of art renders performed so far.
    #[must_use]
    pub const fn art_renders(&self) -> usize {
        self.art_renders
    }

    /// Whether an art render is waiting for its quiet period.
    #[must_use]
    pub const fn art_pending(&self) -> bool {
        self.art_debounce.is_pending()
    }

    /// Time until the pending art render is due.
    #[must_use]
    pub fn art_due_in(&self, now: Instant) -> Option<Duration> {
        self.art_debounce.remaining(now)
    }

    /// Fold a host property batch into a new snapshot.
    ///
    /// Palette changes apply immediately; art changes are debounced.
    pub fn apply_properties(&mut self, properties: &Value, now: Instant) -> Changes {
        let update = HostProperties::apply(&self.settings, properties);
        let changes = update.changes;
        if !changes.is_empty() {
            self.install(update.settings, changes, now);
        }
        changes
    }

    /// Replace the whole settings snapshot.
    pub fn set_settings(&mut self, settings: Settings, now: Instant) {
        let settings = settings.sanitized();
        let changes = Changes {
            art: settings.art != self.settings.art || settings.palette != self.settings.palette,
            palette: settings.palette != self.settings.palette,
            layout: settings.graph != self.settings.graph
                || settings.text_size_pt != self.settings.text_size_pt
                || settings.ignore_too_big != self.settings.ignore_too_big,
        };
        self.install(settings, changes, now);
    }

    fn install(&mut self, settings: Settings, changes: Changes, now: Instant) {
        let previous = Arc::clone(&self.settings);
        self.settings = Arc::new(settings);

        if changes.palette {
            self.palette.rebuild(
                self.settings.palette.theme(),
                &self.settings.palette.override_colors(),
            );
        }

        let graph = &self.settings.graph;
        if graph != &previous.graph {
            self.layout = GraphLayoutEngine::new(graph.bounds());
            self.chart = StripChartRenderer::new(graph.height)
                .with_grid_interval(graph.grid_interval_percent);
            if graph.max_samples != previous.graph.max_samples
                || graph.prefill != previous.graph.prefill
            {
                tracing::debug!(capacity = graph.max_samples, "series store reinitialized");
                self.series = SeriesStore::system(graph.max_samples, graph.prefill);
            }
        }

        self.art_debounce
            .set_window(Duration::from_millis(self.settings.art.debounce_ms));
        if changes.art {
            self.request_art_refresh(now);
        }
    }

    /// Set or clear the current media thumbnail.
    pub fn set_media_thumbnail(&mut self, thumbnail: Option<String>, now: Instant) {
        if self.media_thumbnail == thumbnail {
            return;
        }
        self.media_thumbnail = thumbnail;
        if self.settings.art.use_media_art {
            self.request_art_refresh(now);
        }
    }

    /// Schedule an art render with the current settings, superseding any
    /// pending one.
    pub fn request_art_refresh(&mut self, now: Instant) {
        let request = ArtRequest {
            settings: Arc::clone(&self.settings),
            thumbnail: self.media_thumbnail.clone(),
        };
        self.art_debounce.trigger(request, now);
    }

    /// Run a due art render. Returns whether one ran.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.art_debounce.poll(now) {
            Some(request) => {
                tracing::debug!(
                    resolution = request.settings.art.resolution,
                    "debounced art render"
                );
                self.render_art_with(&request);
                true
            }
            None => false,
        }
    }

    /// Render art now with the current settings, dropping any pending
    /// request.
    pub fn render_art_now(&mut self) -> &RenderedGrid {
        self.art_debounce.cancel();
        let request = ArtRequest {
            settings: Arc::clone(&self.settings),
            thumbnail: self.media_thumbnail.clone(),
        };
        self.render_art_with(&request);
        &self.art.grid
    }

    fn render_art_with(&mut self, request: &ArtRequest) {
        let art = &request.settings.art;
        let chain = FallbackChain::for_settings(art, request.thumbnail.as_deref());
        let palette = self.palette.snapshot();
        self.art = render_with_fallback(
            chain,
            self.rasterizer.as_ref(),
            &self.art_renderer,
            art.resolution,
            &ArtOptions::from(art),
            &palette,
        );
        self.art_renders += 1;
    }

    /// Pull one batch from the metric source into the history.
    pub fn sample(&mut self, elapsed: Duration) {
        for (key, value) in self.source.sample(elapsed) {
            self.series.append(&key, value);
        }
    }

    /// Record a host-provided sample directly.
    pub fn push_sample(&mut self, key: &MetricKey, value: f64) {
        self.series.append(key, value);
    }

    /// Glyph width implied by the host font size.
    #[must_use]
    pub fn char_metrics(&self) -> CharMetrics {
        self.settings
            .text_size_pt
            .map_or_else(CharMetrics::default, CharMetrics::from_point_size)
    }

    /// Character columns fitting in `pixel_width`.
    #[must_use]
    pub fn columns_for_pixels(&self, pixel_width: f32) -> usize {
        self.char_metrics().columns_for(pixel_width)
    }

    /// Glyph scale for the current art resolution.
    #[must_use]
    pub fn art_scale(&self) -> f32 {
        art_font_scale(self.settings.art.resolution)
    }

    /// Geometry of the framed system graph in `available_cols`.
    #[must_use]
    pub fn system_layout(&self, available_cols: usize) -> PanelLayout {
        self.layout.layout(available_cols, self.panels.len())
    }

    /// Framed multi-panel graph fitted to `available_cols`.
    ///
    /// `None` when the graph would overflow and overflow is not ignored.
    #[must_use]
    pub fn render_system_graph(&self, available_cols: usize) -> Option<RenderedGrid> {
        let layout = self.system_layout(available_cols);
        if layout.overflows(available_cols) && !self.settings.ignore_too_big {
            tracing::debug!(
                available_cols,
                needed = layout.total_width,
                "system graph hidden"
            );
            return None;
        }
        Some(
            self.chart
                .render(&self.series, &self.panels, layout.panel_width),
        )
    }

    /// Unframed solid graph of one metric spanning `available_cols`.
    #[must_use]
    pub fn render_stock_graph(&self, key: &MetricKey, available_cols: usize) -> RenderedGrid {
        let panel = self
            .panels
            .iter()
            .find(|p| &p.key == key)
            .cloned()
            .unwrap_or_else(|| PanelSpec::new(key.clone(), key.as_str(), GlyphRamp::cpu()))
            .with_fill(FillStyle::Solid);
        let width = self.layout.single_width(available_cols);
        self.chart.render_stock(&self.series, &panel, width)
    }
}

fn default_panels() -> Vec<PanelSpec> {
    let accents = [PaletteSlot::BrightCyan, PaletteSlot::BrightMagenta, PaletteSlot::BrightGreen];
    PanelSpec::system()
        .into_iter()
        .zip(accents)
        .map(|(panel, slot)| panel.with_accent(CellColor::Slot(slot)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RasterError;
    use crate::fallback::FAILURE_MARKER;
    use crate::raster::{ArtSource, BuiltinRasterizer, PixelGrid};
    use serde_json::json;
    use textscope_core::PaletteTheme;

    /// Source returning the same value for every metric.
    struct Constant(f64);

    impl MetricSource for Constant {
        fn sample(&mut self, _elapsed: Duration) -> Vec<(MetricKey, f64)> {
            vec![
                (MetricKey::cpu(), self.0),
                (MetricKey::ram(), self.0),
                (MetricKey::gpu(), self.0),
            ]
        }
    }

    struct Failing;

    impl ImageRasterizer for Failing {
        fn rasterize(&self, source: &ArtSource, _: u32, _: u32) -> Result<PixelGrid, RasterError> {
            Err(RasterError::UnsupportedSource(source.to_string()))
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn dashboard() -> Dashboard {
        Dashboard::new(Settings::default())
            .with_rasterizer(BuiltinRasterizer)
            .with_source(Constant(0.5))
    }

    #[test]
    fn test_new_applies_palette_settings() {
        let mut settings = Settings::default();
        settings.palette.theme = "nord".into();
        let dash = Dashboard::new(settings);
        assert_eq!(*dash.palette(), PaletteTheme::Nord.palette());
    }

    #[test]
    fn test_sample_appends_to_series() {
        let mut dash = dashboard();
        dash.sample(Duration::ZERO);
        assert_eq!(dash.series().latest(&MetricKey::gpu()), 0.5);
        assert_eq!(dash.series().get(&MetricKey::cpu()).map(|b| b.len()), Some(1200));
    }

    #[test]
    fn test_art_burst_renders_once() {
        let t0 = Instant::now();
        let mut dash = dashboard();
        for (i, res) in [20u32, 22, 24, 26, 28].iter().enumerate() {
            let props = json!({ "asciiresolution": { "value": res + 2 } });
            dash.apply_properties(&props, t0 + ms(i as u64 * 10));
        }
        let mut renders = 0;
        for step in 0..50 {
            if dash.poll(t0 + ms(step * 10)) {
                renders += 1;
            }
        }
        assert_eq!(renders, 1);
        assert_eq!(dash.art_renders(), 1);
        assert_eq!(dash.art().width(), 28);
        assert_eq!(dash.art().height(), 14);
    }

    #[test]
    fn test_palette_change_is_immediate() {
        let t0 = Instant::now();
        let mut dash = dashboard();
        let changes = dash.apply_properties(&json!({ "theme": { "value": "dracula" } }), t0);
        assert!(changes.palette);
        assert_eq!(*dash.palette(), PaletteTheme::Dracula.palette());
        assert!(dash.art_pending());
    }

    #[test]
    fn test_thumbnail_triggers_refresh_only_with_media_art() {
        let t0 = Instant::now();
        let mut dash = dashboard();
        dash.set_media_thumbnail(Some("file:///cover.png".into()), t0);
        assert!(dash.art_pending());

        let mut settings = Settings::default();
        settings.art.use_media_art = false;
        let mut dash = Dashboard::new(settings).with_rasterizer(BuiltinRasterizer);
        dash.set_media_thumbnail(Some("file:///cover.png".into()), t0);
        assert!(!dash.art_pending());
    }

    #[test]
    fn test_broken_thumbnail_falls_back_to_builtin() {
        let t0 = Instant::now();
        let mut dash = dashboard();
        dash.set_media_thumbnail(Some("file:///missing.png".into()), t0);
        assert!(dash.poll(t0 + ms(150)));
        assert_eq!(dash.art_outcome().source, Some(ArtSource::Builtin));
        assert_eq!(dash.art().height(), 25);
    }

    #[test]
    fn test_all_sources_failing_shows_marker() {
        let mut dash = Dashboard::default().with_rasterizer(Failing);
        dash.render_art_now();
        assert_eq!(dash.art().to_plain_text(), FAILURE_MARKER);
        assert!(dash.art_outcome().is_failure());
    }

    #[test]
    fn test_render_now_cancels_pending() {
        let t0 = Instant::now();
        let mut dash = dashboard();
        dash.request_art_refresh(t0);
        dash.render_art_now();
        assert!(!dash.art_pending());
        assert!(!dash.poll(t0 + ms(1000)));
        assert_eq!(dash.art_renders(), 1);
    }

    #[test]
    fn test_system_graph_fits() {
        let mut dash = dashboard();
        dash.sample(Duration::ZERO);
        let grid = dash.render_system_graph(100).unwrap();
        assert_eq!(grid.height(), 10 + 4);
        // gutter 4 + 3 panels of 30 + 4 borders
        assert_eq!(grid.row(0).map(<[_]>::len), Some(98));
    }

    #[test]
    fn test_system_graph_hidden_when_too_narrow() {
        let t0 = Instant::now();
        let mut dash = dashboard();
        assert!(dash.render_system_graph(40).is_none());
        dash.apply_properties(&json!({ "hideitoobigiwarning": { "value": true } }), t0);
        assert!(dash.render_system_graph(40).is_some());
    }

    #[test]
    fn test_stock_graph_width() {
        let mut dash = dashboard();
        dash.sample(Duration::ZERO);
        let grid = dash.render_stock_graph(&MetricKey::ram(), 60);
        assert_eq!(grid.width(), 60);
        assert_eq!(grid.height(), 10);
        let narrow = dash.render_stock_graph(&MetricKey::ram(), 4);
        assert_eq!(narrow.width(), 18);
    }

    #[test]
    fn test_graph_settings_change_rebuilds_store() {
        let t0 = Instant::now();
        let mut dash = dashboard();
        let mut settings = dash.settings().clone();
        settings.graph.max_samples = 50;
        settings.graph.height = 6;
        dash.set_settings(settings, t0);
        assert_eq!(dash.series().capacity(), 50);
        dash.sample(Duration::ZERO);
        assert_eq!(dash.render_stock_graph(&MetricKey::cpu(), 20).height(), 6);
        assert!(!dash.art_pending());
    }

    #[test]
    fn test_columns_for_pixels() {
        let t0 = Instant::now();
        let mut dash = dashboard();
        assert_eq!(dash.columns_for_pixels(800.0), 80);
        dash.apply_properties(&json!({ "textsize": { "value": 15 } }), t0);
        assert_eq!(dash.columns_for_pixels(1200.0), 100);
    }

    #[test]
    fn test_custom_panels_and_host_samples() {
        let disk = MetricKey::new("disk");
        let mut dash = dashboard().with_panels(vec![PanelSpec::new(
            disk.clone(),
            "DSK",
            GlyphRamp::ram(),
        )]);
        dash.push_sample(&disk, 1.5);
        assert_eq!(dash.series().latest(&disk), 1.0);
        assert_eq!(dash.panels().len(), 1);
        // gutter 4 + one panel of 34 + 2 borders
        let grid = dash.render_system_graph(200).unwrap();
        assert_eq!(grid.row(0).map(<[_]>::len), Some(40));
        assert!(grid.line(0).unwrap().contains("DSK"));
    }

    #[test]
    fn test_art_scale_follows_resolution() {
        let mut settings = Settings::default();
        settings.art.resolution = 96;
        assert_eq!(Dashboard::new(settings).art_scale(), 0.5);
        assert_eq!(dashboard().art_scale(), 48.0 / 50.0);
    }
}
