//! Built-in 16-color terminal themes.
//!
//! Every theme provides a complete palette; hosts may override single slots
//! on top of it (see [`crate::PaletteStore::rebuild`]).

use crate::color::Rgb;
use crate::palette::Palette;
use serde::{Deserialize, Serialize};

/// Named built-in palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaletteTheme {
    /// xterm defaults.
    #[default]
    Xterm,
    /// Tokyo Night (dark, modern).
    TokyoNight,
    /// Dracula (dark, purple).
    Dracula,
    /// Nord (cool, arctic).
    Nord,
    /// Monokai (classic).
    Monokai,
}

impl PaletteTheme {
    /// All built-in themes.
    pub const ALL: [Self; 5] = [
        Self::Xterm,
        Self::TokyoNight,
        Self::Dracula,
        Self::Nord,
        Self::Monokai,
    ];

    /// Theme identifier.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Xterm => "xterm",
            Self::TokyoNight => "tokyo_night",
            Self::Dracula => "dracula",
            Self::Nord => "nord",
            Self::Monokai => "monokai",
        }
    }

    /// Look up a theme by name. Dashes and case are ignored.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL.into_iter().find(|t| t.name() == normalized)
    }

    /// Look up a theme, falling back to [`PaletteTheme::Xterm`].
    #[must_use]
    pub fn from_name_or_default(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            tracing::warn!(theme = name, "unknown palette theme, using xterm");
            Self::default()
        })
    }

    /// The theme's full palette.
    #[must_use]
    pub fn palette(self) -> Palette {
        let hex: [&str; 16] = match self {
            Self::Xterm => [
                "#000000", "#cd0000", "#00cd00", "#cdcd00", "#0000ee", "#cd00cd", "#00cdcd",
                "#e5e5e5", "#7f7f7f", "#ff0000", "#00ff00", "#ffff00", "#5c5cff", "#ff00ff",
                "#00ffff", "#ffffff",
            ],
            Self::TokyoNight => [
                "#15161e", "#f7768e", "#9ece6a", "#e0af68", "#7aa2f7", "#bb9af7", "#7dcfff",
                "#a9b1d6", "#414868", "#ff7a93", "#b9f27c", "#ff9e64", "#7da6ff", "#c0a8ff",
                "#0db9d7", "#c0caf5",
            ],
            Self::Dracula => [
                "#21222c", "#ff5555", "#50fa7b", "#f1fa8c", "#bd93f9", "#ff79c6", "#8be9fd",
                "#f8f8f2", "#6272a4", "#ff6e6e", "#69ff94", "#ffffa5", "#d6acff", "#ff92df",
                "#a4ffff", "#ffffff",
            ],
            Self::Nord => [
                "#3b4252", "#bf616a", "#a3be8c", "#ebcb8b", "#81a1c1", "#b48ead", "#88c0d0",
                "#e5e9f0", "#4c566a", "#d08770", "#b5d19c", "#f0d399", "#5e81ac", "#c895bf",
                "#8fbcbb", "#eceff4",
            ],
            Self::Monokai => [
                "#272822", "#f92672", "#a6e22e", "#f4bf75", "#66d9ef", "#ae81ff", "#a1efe4",
                "#f8f8f2", "#75715e", "#fd5ff0", "#b6f23e", "#fd971f", "#78dcf5", "#c29dff",
                "#b1f5ec", "#f9f8f5",
            ],
        };
        Palette::new(hex.map(parse_hex))
    }
}

/// Parse a 6-digit hex literal, white on malformed input.
fn parse_hex(hex: &str) -> Rgb {
    Rgb::from_hex(hex).unwrap_or(Rgb::WHITE)
}
