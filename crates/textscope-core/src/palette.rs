//! The 16-slot terminal palette and nearest-entry color quantization.

use crate::color::Rgb;
use crate::theme::PaletteTheme;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// One of the 16 canonical terminal colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaletteSlot {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl PaletteSlot {
    /// Number of palette slots.
    pub const COUNT: usize = 16;

    /// All slots in index order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Black,
        Self::Red,
        Self::Green,
        Self::Yellow,
        Self::Blue,
        Self::Magenta,
        Self::Cyan,
        Self::White,
        Self::BrightBlack,
        Self::BrightRed,
        Self::BrightGreen,
        Self::BrightYellow,
        Self::BrightBlue,
        Self::BrightMagenta,
        Self::BrightCyan,
        Self::BrightWhite,
    ];

    /// Slot index, 0-15.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Slot for an index, `None` if out of range.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Canonical kebab-case name (`black`, ..., `bright-white`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
            Self::BrightBlack => "bright-black",
            Self::BrightRed => "bright-red",
            Self::BrightGreen => "bright-green",
            Self::BrightYellow => "bright-yellow",
            Self::BrightBlue => "bright-blue",
            Self::BrightMagenta => "bright-magenta",
            Self::BrightCyan => "bright-cyan",
            Self::BrightWhite => "bright-white",
        }
    }

    /// Slot for a canonical name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|slot| slot.name() == name)
    }

    /// Whether this is one of the eight bright variants.
    #[must_use]
    pub const fn is_bright(self) -> bool {
        self.index() >= 8
    }
}

impl fmt::Display for PaletteSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Exactly 16 RGB entries indexed by [`PaletteSlot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    entries: [Rgb; PaletteSlot::COUNT],
}

impl Palette {
    /// Create a palette from 16 entries in slot order.
    #[must_use]
    pub const fn new(entries: [Rgb; PaletteSlot::COUNT]) -> Self {
        Self { entries }
    }

    /// Color of a slot.
    #[must_use]
    pub const fn get(&self, slot: PaletteSlot) -> Rgb {
        self.entries[slot.index()]
    }

    /// Replace the color of a slot.
    pub fn set(&mut self, slot: PaletteSlot, color: Rgb) {
        self.entries[slot.index()] = color;
    }

    /// Entries in slot order.
    #[must_use]
    pub const fn entries(&self) -> &[Rgb; PaletteSlot::COUNT] {
        &self.entries
    }

    /// Iterate `(slot, color)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (PaletteSlot, Rgb)> + '_ {
        PaletteSlot::ALL.iter().map(|&slot| (slot, self.get(slot)))
    }

    /// Nearest slot to float channels in [0.0, 255.0].
    ///
    /// Minimizes squared Euclidean distance; ties go to the lowest index.
    #[must_use]
    pub fn nearest(&self, r: f32, g: f32, b: f32) -> PaletteSlot {
        let mut best = PaletteSlot::Black;
        let mut best_dist = f32::INFINITY;
        for (slot, entry) in self.iter() {
            let [cr, cg, cb] = entry.channels();
            let dist = (r - cr).powi(2) + (g - cg).powi(2) + (b - cb).powi(2);
            if dist < best_dist {
                best_dist = dist;
                best = slot;
            }
        }
        best
    }

    /// Nearest slot to an 8-bit color.
    #[must_use]
    pub fn nearest_rgb(&self, color: Rgb) -> PaletteSlot {
        let [r, g, b] = color.channels();
        self.nearest(r, g, b)
    }
}

impl Default for Palette {
    fn default() -> Self {
        PaletteTheme::default().palette()
    }
}

/// Holds the active palette and rebuilds it on theme changes.
///
/// Renderers take [`PaletteStore::snapshot`], which stays valid and unchanged
/// after later rebuilds.
#[derive(Debug, Clone)]
pub struct PaletteStore {
    theme: PaletteTheme,
    palette: Arc<Palette>,
}

impl Default for PaletteStore {
    fn default() -> Self {
        Self::new(PaletteTheme::default())
    }
}

impl PaletteStore {
    /// Create a store holding a theme's palette.
    #[must_use]
    pub fn new(theme: PaletteTheme) -> Self {
        Self {
            theme,
            palette: Arc::new(theme.palette()),
        }
    }

    /// Rebuild wholesale from a theme plus per-slot overrides.
    pub fn rebuild(&mut self, theme: PaletteTheme, overrides: &[(PaletteSlot, Rgb)]) {
        let mut palette = theme.palette();
        for &(slot, color) in overrides {
            palette.set(slot, color);
        }
        tracing::debug!(
            theme = theme.name(),
            overrides = overrides.len(),
            "palette rebuilt"
        );
        self.theme = theme;
        self.palette = Arc::new(palette);
    }

    /// Theme the current palette was built from.
    #[must_use]
    pub const fn theme(&self) -> PaletteTheme {
        self.theme
    }

    /// Shared read-only handle to the current palette.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Palette> {
        Arc::clone(&self.palette)
    }
}
