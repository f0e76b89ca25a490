//! Color mode detection and cell color conversion for terminals.

use crossterm::style::Color as CrosstermColor;
use textscope_core::{CellColor, Palette, PaletteSlot, Rgb};

/// Terminal color capability mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// 24-bit true color (COLORTERM=truecolor or 24bit).
    #[default]
    TrueColor,
    /// 256 color palette.
    Color256,
    /// 16 ANSI colors.
    Color16,
    /// Monochrome (no color).
    Mono,
}

impl ColorMode {
    /// Auto-detect terminal color capabilities.
    #[must_use]
    pub fn detect() -> Self {
        Self::detect_with_env(std::env::var("COLORTERM").ok(), std::env::var("TERM").ok())
    }

    /// Detect color mode from environment variable values.
    #[must_use]
    #[allow(clippy::needless_pass_by_value)]
    pub fn detect_with_env(colorterm: Option<String>, term: Option<String>) -> Self {
        if let Some(ref ct) = colorterm {
            if ct == "truecolor" || ct == "24bit" {
                return Self::TrueColor;
            }
        }

        match term.as_deref() {
            Some(t) if t.contains("256color") => Self::Color256,
            Some(t) if t.contains("color") || t.contains("xterm") => Self::Color16,
            Some("dumb") | None => Self::Mono,
            _ => Self::Color16,
        }
    }

    /// Convert a cell color to a crossterm color; `None` means "leave the
    /// terminal's default foreground".
    ///
    /// Slot colors resolve through `palette` on true-color and 256-color
    /// terminals. On 16-color terminals they map straight to the matching
    /// ANSI color so the terminal's own theme applies.
    #[must_use]
    pub fn to_crossterm(&self, color: CellColor, palette: &Palette) -> Option<CrosstermColor> {
        match (self, color) {
            (Self::Mono, _) => None,
            (Self::Color16, CellColor::Slot(slot)) => Some(slot_to_ansi(slot)),
            (_, color) => Some(self.rgb_to_crossterm(color.resolve(palette))),
        }
    }

    /// Convert a literal RGB value based on this mode.
    #[must_use]
    pub fn rgb_to_crossterm(&self, color: Rgb) -> CrosstermColor {
        let Rgb { r, g, b } = color;
        match self {
            Self::TrueColor => CrosstermColor::Rgb { r, g, b },
            Self::Color256 => CrosstermColor::AnsiValue(Self::rgb_to_256(r, g, b)),
            Self::Color16 => Self::rgb_to_16(r, g, b),
            Self::Mono => CrosstermColor::White,
        }
    }

    /// Convert RGB to 256-color palette index.
    fn rgb_to_256(r: u8, g: u8, b: u8) -> u8 {
        if r == g && g == b {
            if r < 8 {
                return 16;
            }
            if r > 248 {
                return 231;
            }
            // Grayscale ramp: colors 232-255
            return 232 + ((r - 8) / 10).min(23);
        }

        // 6x6x6 color cube (colors 16-231)
        let r_idx = (u16::from(r) * 5 / 255) as u8;
        let g_idx = (u16::from(g) * 5 / 255) as u8;
        let b_idx = (u16::from(b) * 5 / 255) as u8;
        16 + 36 * r_idx + 6 * g_idx + b_idx
    }

    /// Convert RGB to 16-color ANSI.
    fn rgb_to_16(r: u8, g: u8, b: u8) -> CrosstermColor {
        let luminance = (u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114) / 1000;
        let bright = luminance > 127;

        let max = r.max(g).max(b);
        let threshold = max / 2;

        let has_r = r > threshold;
        let has_g = g > threshold;
        let has_b = b > threshold;

        let slot = match (has_r, has_g, has_b) {
            (false, false, false) => PaletteSlot::Black,
            (true, false, false) => PaletteSlot::Red,
            (false, true, false) => PaletteSlot::Green,
            (true, true, false) => PaletteSlot::Yellow,
            (false, false, true) => PaletteSlot::Blue,
            (true, false, true) => PaletteSlot::Magenta,
            (false, true, true) => PaletteSlot::Cyan,
            (true, true, true) => PaletteSlot::White,
        };
        let slot = if bright {
            PaletteSlot::from_index(slot.index() + 8).unwrap_or(slot)
        } else {
            slot
        };
        slot_to_ansi(slot)
    }
}

/// The crossterm ANSI color for a palette slot.
#[must_use]
pub const fn slot_to_ansi(slot: PaletteSlot) -> CrosstermColor {
    match slot {
        PaletteSlot::Black => CrosstermColor::Black,
        PaletteSlot::Red => CrosstermColor::DarkRed,
        PaletteSlot::Green => CrosstermColor::DarkGreen,
        PaletteSlot::Yellow => CrosstermColor::DarkYellow,
        PaletteSlot::Blue => CrosstermColor::DarkBlue,
        PaletteSlot::Magenta => CrosstermColor::DarkMagenta,
        PaletteSlot::Cyan => CrosstermColor::DarkCyan,
        PaletteSlot::White => CrosstermColor::Grey,
        PaletteSlot::BrightBlack => CrosstermColor::DarkGrey,
        PaletteSlot::BrightRed => CrosstermColor::Red,
        PaletteSlot::BrightGreen => CrosstermColor::Green,
        PaletteSlot::BrightYellow => CrosstermColor::Yellow,
        PaletteSlot::BrightBlue => CrosstermColor::Blue,
        PaletteSlot::BrightMagenta => CrosstermColor::Magenta,
        PaletteSlot::BrightCyan => CrosstermColor::Cyan,
        PaletteSlot::BrightWhite => CrosstermColor::White,
    }
}
