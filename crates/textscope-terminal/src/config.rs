//! Settings snapshots loaded from YAML.
//!
//! A [`Settings`] value is never edited in place by the renderers; changes
//! produce a new snapshot (see [`crate::host::HostProperties`]).
//!
//! ```yaml
//! art:
//!   resolution: 64
//!   color_mode: direct
//! graph:
//!   height: 12
//! palette:
//!   theme: nord
//!   overrides:
//!     bright-red: [1.0, 0.2, 0.2]
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use textscope_core::{PaletteSlot, PaletteTheme, Rgb};
use textscope_layout::PanelBounds;

/// Lowest accepted art resolution (sample columns).
pub const MIN_RESOLUTION: u32 = 2;
/// Highest accepted art resolution.
pub const MAX_RESOLUTION: u32 = 400;

/// How art cells are colored when coloring is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtColorMode {
    /// Quantize to the nearest palette slot.
    #[default]
    Theme,
    /// Attach the adjusted RGB verbatim.
    #[serde(alias = "image")]
    Direct,
}

impl ArtColorMode {
    /// Parse a mode name; `image` is accepted for `direct`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "theme" => Some(Self::Theme),
            "direct" | "image" => Some(Self::Direct),
            _ => None,
        }
    }
}

/// ASCII art settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtSettings {
    /// Sample columns; rows are half of this.
    pub resolution: u32,
    /// Chroma multiplier: 0 is grayscale, 1 unchanged.
    pub saturation: f32,
    /// Attach per-cell colors.
    pub colored: bool,
    /// Palette quantization or direct RGB.
    pub color_mode: ArtColorMode,
    /// Prefer the current media thumbnail over the default image.
    pub use_media_art: bool,
    /// Image shown when no media art is available.
    pub default_image: Option<String>,
    /// Quiet period before a re-render fires.
    pub debounce_ms: u64,
}

impl Default for ArtSettings {
    fn default() -> Self {
        Self {
            resolution: 50,
            saturation: 1.0,
            colored: true,
            color_mode: ArtColorMode::Theme,
            use_media_art: true,
            default_image: None,
            debounce_ms: 150,
        }
    }
}

/// Strip chart settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphSettings {
    /// Chart rows.
    pub height: usize,
    /// Samples retained per metric.
    pub max_samples: usize,
    /// Narrowest panel.
    pub min_panel_width: usize,
    /// Widest panel.
    pub max_panel_width: usize,
    /// Gridline spacing in percent.
    pub grid_interval_percent: u32,
    /// Start every series full of zeros.
    pub prefill: bool,
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            height: 10,
            max_samples: 1200,
            min_panel_width: 18,
            max_panel_width: 34,
            grid_interval_percent: 25,
            prefill: true,
        }
    }
}

impl GraphSettings {
    /// Per-panel width bounds.
    #[must_use]
    pub fn bounds(&self) -> PanelBounds {
        PanelBounds::new(self.min_panel_width, self.max_panel_width)
    }
}

/// Palette theme plus per-slot overrides in normalized `[r, g, b]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteSettings {
    /// Built-in theme name.
    pub theme: String,
    /// Slot colors replacing the theme's.
    pub overrides: BTreeMap<PaletteSlot, [f32; 3]>,
}

impl Default for PaletteSettings {
    fn default() -> Self {
        Self {
            theme: PaletteTheme::default().name().to_string(),
            overrides: BTreeMap::new(),
        }
    }
}

impl PaletteSettings {
    /// Resolved theme; unknown names fall back to the default.
    #[must_use]
    pub fn theme(&self) -> PaletteTheme {
        PaletteTheme::from_name_or_default(&self.theme)
    }

    /// Overrides converted to 8-bit colors.
    #[must_use]
    pub fn override_colors(&self) -> Vec<(PaletteSlot, Rgb)> {
        self.overrides
            .iter()
            .map(|(&slot, &[r, g, b])| (slot, Rgb::from_normalized(r, g, b)))
            .collect()
    }
}

/// Complete settings snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// ASCII art settings.
    pub art: ArtSettings,
    /// Strip chart settings.
    pub graph: GraphSettings,
    /// Palette settings.
    pub palette: PaletteSettings,
    /// Sampling/redraw interval.
    pub refresh_ms: u64,
    /// Keep showing content that overflows instead of hiding it.
    pub ignore_too_big: bool,
    /// Host font size, used to estimate the glyph width.
    pub text_size_pt: Option<f32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            art: ArtSettings::default(),
            graph: GraphSettings::default(),
            palette: PaletteSettings::default(),
            refresh_ms: 1000,
            ignore_too_big: false,
            text_size_pt: None,
        }
    }
}

impl Settings {
    /// XDG-style config paths searched by [`Settings::load`], in order.
    pub fn config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg_config).join("textscope/config.yaml"));
        }
        if let Ok(home) = std::env::var("HOME") {
            paths.push(PathBuf::from(home).join(".config/textscope/config.yaml"));
        }
        paths
    }

    /// Load the first readable config file, falling back to defaults.
    pub fn load() -> Self {
        for path in Self::config_paths() {
            if !path.exists() {
                continue;
            }
            match Self::load_from_file(&path) {
                Ok(settings) => return settings,
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "ignoring config file");
                }
            }
        }
        Self::default()
    }

    /// Load and sanitize settings from a YAML file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse and sanitize settings from YAML text. Missing fields default.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Self = serde_yaml_ng::from_str(contents)?;
        Ok(settings.sanitized())
    }

    /// Default configuration as commented YAML.
    pub fn default_yaml() -> String {
        r"# textscope configuration file
# Location: ~/.config/textscope/config.yaml

# Sampling and redraw interval in milliseconds
refresh_ms: 1000

# Keep showing the graph when it is wider than the terminal
ignore_too_big: false

# Font size in points; omit to assume 10px wide glyphs
# text_size_pt: 12

art:
  resolution: 50          # sample columns; rows are half
  saturation: 1.0         # 0 = grayscale, >1 exaggerates
  colored: true
  color_mode: theme       # theme | direct
  use_media_art: true
  # default_image: /path/to/cover.png
  debounce_ms: 150

graph:
  height: 10
  max_samples: 1200
  min_panel_width: 18
  max_panel_width: 34
  grid_interval_percent: 25
  prefill: true

palette:
  theme: xterm            # xterm | tokyo_night | dracula | nord | monokai
  overrides: {}
  # overrides:
  #   bright-red: [1.0, 0.33, 0.33]
"
        .to_string()
    }

    /// Clamp out-of-range values into their accepted ranges.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        let resolution = self.art.resolution.clamp(MIN_RESOLUTION, MAX_RESOLUTION);
        if resolution != self.art.resolution {
            tracing::debug!(from = self.art.resolution, to = resolution, "resolution clamped");
            self.art.resolution = resolution;
        }
        self.art.saturation = sanitize_saturation(self.art.saturation);
        self.art.default_image = self
            .art
            .default_image
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(normalize_image_uri);

        let graph = &mut self.graph;
        graph.height = graph.height.max(2);
        graph.max_samples = graph.max_samples.max(1);
        graph.min_panel_width = graph.min_panel_width.max(1);
        graph.max_panel_width = graph.max_panel_width.max(graph.min_panel_width);
        if !(1..=100).contains(&graph.grid_interval_percent) {
            tracing::debug!(
                value = graph.grid_interval_percent,
                "grid interval out of range, using default"
            );
            graph.grid_interval_percent = defaults.graph.grid_interval_percent;
        }

        self.text_size_pt = self.text_size_pt.filter(|pt| pt.is_finite() && *pt > 0.0);
        if self.refresh_ms == 0 {
            self.refresh_ms = defaults.refresh_ms;
        }
        self
    }
}

/// Saturation for the art renderer: non-finite becomes 1, negative 0.
#[must_use]
pub fn sanitize_saturation(value: f32) -> f32 {
    if !value.is_finite() {
        tracing::debug!(value, "non-finite saturation, using 1.0");
        1.0
    } else if value < 0.0 {
        0.0
    } else {
        value
    }
}

/// Normalize an image reference to a URI.
///
/// `file:///`, `http://` and `https://` references are kept; anything else
/// is treated as a filesystem path, its backslashes turned into `/` and
/// `file:///` prefixed.
#[must_use]
pub fn normalize_image_uri(reference: &str) -> String {
    if reference.starts_with("file:///") || reference.starts_with("http") {
        return reference.to_string();
    }
    let path = reference.replace('\\', "/");
    format!("file:///{}", path.trim_start_matches('/'))
}
