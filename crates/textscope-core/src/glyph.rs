//! Density ramps: glyphs ordered from sparsest to densest.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ramp used for image art.
pub const ART_RAMP: &str = " .:-=+*#%@";
/// Default shading ramp for the CPU panel.
pub const CPU_RAMP: &str = ".:-=+*#%@";
/// Default shading ramp for the RAM panel.
pub const RAM_RAMP: &str = ".,:;!~+*#";
/// Default shading ramp for the GPU panel.
pub const GPU_RAMP: &str = ".:-=+*#%@";

/// Non-empty ordered sequence of glyphs, sparsest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GlyphRamp {
    glyphs: Vec<char>,
}

impl GlyphRamp {
    /// Build a ramp from the characters of `glyphs`. `None` if empty.
    #[must_use]
    pub fn new(glyphs: &str) -> Option<Self> {
        let glyphs: Vec<char> = glyphs.chars().collect();
        if glyphs.is_empty() {
            None
        } else {
            Some(Self { glyphs })
        }
    }

    /// The 10-level image art ramp.
    #[must_use]
    pub fn art() -> Self {
        Self::from_static(ART_RAMP)
    }

    /// The CPU panel ramp.
    #[must_use]
    pub fn cpu() -> Self {
        Self::from_static(CPU_RAMP)
    }

    /// The RAM panel ramp.
    #[must_use]
    pub fn ram() -> Self {
        Self::from_static(RAM_RAMP)
    }

    /// The GPU panel ramp.
    #[must_use]
    pub fn gpu() -> Self {
        Self::from_static(GPU_RAMP)
    }

    fn from_static(glyphs: &'static str) -> Self {
        Self {
            glyphs: glyphs.chars().collect(),
        }
    }

    /// Number of levels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Index for an intensity fraction: `floor(f * (len - 1))`, clamped.
    ///
    /// Non-finite fractions select the sparsest glyph.
    #[must_use]
    pub fn index_for(&self, fraction: f32) -> usize {
        let last = self.glyphs.len().saturating_sub(1);
        if !fraction.is_finite() || fraction <= 0.0 {
            return 0;
        }
        ((fraction * last as f32).floor() as usize).min(last)
    }

    /// Glyph for an intensity fraction in [0.0, 1.0].
    #[must_use]
    pub fn glyph_for(&self, fraction: f32) -> char {
        self.glyphs[self.index_for(fraction)]
    }

    /// First (sparsest) glyph.
    #[must_use]
    pub fn sparsest(&self) -> char {
        self.glyphs[0]
    }

    /// Last (densest) glyph.
    #[must_use]
    pub fn densest(&self) -> char {
        self.glyphs[self.glyphs.len() - 1]
    }

    /// Glyphs in order.
    #[must_use]
    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }
}

impl Default for GlyphRamp {
    fn default() -> Self {
        Self::art()
    }
}

impl fmt::Display for GlyphRamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.glyphs.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

impl TryFrom<String> for GlyphRamp {
    type Error = &'static str;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value).ok_or("glyph ramp must not be empty")
    }
}

impl From<GlyphRamp> for String {
    fn from(ramp: GlyphRamp) -> Self {
        ramp.to_string()
    }
}
