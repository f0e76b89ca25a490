//! Art source fallback.
//!
//! Art is loaded from an ordered list of candidates: the media thumbnail,
//! the configured default image, then the built-in image. A failing
//! candidate advances the chain; when every candidate has failed the output
//! is [`FAILURE_MARKER`] rather than stale or blank art.

use crate::art::{ArtOptions, AsciiArtRenderer};
use crate::config::ArtSettings;
use crate::raster::{sample_dimensions, ArtSource, ImageRasterizer};
use textscope_core::{Palette, RenderedGrid};

/// Text shown when no art source could be loaded.
pub const FAILURE_MARKER: &str = "[ Failed to Load Image ]";

/// Position in the fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FallbackState {
    /// Trying the preferred source.
    TryingPrimary,
    /// Trying the configured default image.
    TryingDefault,
    /// Trying the built-in image.
    TryingBuiltin,
    /// Every candidate failed.
    Failed,
}

/// Ordered art candidates with a cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackChain {
    stages: Vec<(FallbackState, ArtSource)>,
    position: usize,
}

impl FallbackChain {
    /// Chain of `primary`, then `default`, then the built-in image.
    ///
    /// Missing candidates and candidates equal to an earlier one are
    /// skipped.
    #[must_use]
    pub fn new(primary: Option<ArtSource>, default: Option<ArtSource>) -> Self {
        let mut stages: Vec<(FallbackState, ArtSource)> = Vec::with_capacity(3);
        let candidates = [
            (FallbackState::TryingPrimary, primary),
            (FallbackState::TryingDefault, default),
            (FallbackState::TryingBuiltin, Some(ArtSource::Builtin)),
        ];
        for (state, source) in candidates {
            let Some(source) = source else { continue };
            if stages.iter().any(|(_, seen)| *seen == source) {
                continue;
            }
            stages.push((state, source));
        }
        Self {
            stages,
            position: 0,
        }
    }

    /// Chain for the current art settings and media thumbnail.
    ///
    /// The thumbnail leads when media art is enabled and one is present;
    /// otherwise the default image does.
    #[must_use]
    pub fn for_settings(art: &ArtSettings, media_thumbnail: Option<&str>) -> Self {
        let default = art.default_image.clone().map(ArtSource::Uri);
        match media_thumbnail.filter(|_| art.use_media_art) {
            Some(thumb) => Self::new(Some(ArtSource::Uri(thumb.to_string())), default),
            None => Self::new(default, None),
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> FallbackState {
        self.stages
            .get(self.position)
            .map_or(FallbackState::Failed, |(state, _)| *state)
    }

    /// Source being tried, `None` once failed.
    #[must_use]
    pub fn current(&self) -> Option<&ArtSource> {
        self.stages.get(self.position).map(|(_, source)| source)
    }

    /// Give up on the current source and move to the next.
    pub fn advance(&mut self) -> FallbackState {
        if self.position < self.stages.len() {
            self.position += 1;
        }
        self.state()
    }

    /// Whether every candidate has failed.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.state() == FallbackState::Failed
    }

    /// Number of distinct candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the chain has no candidates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

/// Outcome of running a chain to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtOutcome {
    /// The art, or the failure marker.
    pub grid: RenderedGrid,
    /// The source that produced the art.
    pub source: Option<ArtSource>,
    /// Final chain state.
    pub state: FallbackState,
}

impl ArtOutcome {
    /// Whether the failure marker was produced.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.state == FallbackState::Failed
    }
}

/// The failure marker as a one-row grid.
#[must_use]
pub fn failure_grid() -> RenderedGrid {
    RenderedGrid::from_text(FAILURE_MARKER)
}

/// Rasterize and render the first loadable candidate of `chain`.
pub fn render_with_fallback(
    mut chain: FallbackChain,
    rasterizer: &dyn ImageRasterizer,
    renderer: &AsciiArtRenderer,
    resolution: u32,
    options: &ArtOptions,
    palette: &Palette,
) -> ArtOutcome {
    let (width, height) = sample_dimensions(resolution);
    while let Some(source) = chain.current().cloned() {
        match rasterizer.rasterize(&source, width, height) {
            Ok(pixels) => {
                tracing::debug!(%source, width, height, "art rendered");
                return ArtOutcome {
                    grid: renderer.render(&pixels, options, palette),
                    source: Some(source),
                    state: chain.state(),
                };
            }
            Err(err) => {
                tracing::warn!(%source, error = %err, "art source failed, falling back");
                chain.advance();
            }
        }
    }
    tracing::error!("no art source could be loaded");
    ArtOutcome {
        grid: failure_grid(),
        source: None,
        state: FallbackState::Failed,
    }
}
