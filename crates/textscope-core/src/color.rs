//! 8-bit RGB colors and the luminance/saturation math shared by the renderers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Luminance weights (ITU-R BT.601) in per-mille, so that white sums to
/// exactly 255.
const LUMA_R: f32 = 299.0;
const LUMA_G: f32 = 587.0;
const LUMA_B: f32 = 114.0;

/// RGB color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    /// Red component [0, 255]
    pub r: u8,
    /// Green component [0, 255]
    pub g: u8,
    /// Blue component [0, 255]
    pub b: u8,
}

impl Rgb {
    /// Black.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create a color from 8-bit components.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from normalized components in [0.0, 1.0].
    ///
    /// Each component becomes `round(v * 255)`. Out-of-range values are
    /// clamped and non-finite values map to 0.
    #[must_use]
    pub fn from_normalized(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: unit_to_byte(r),
            g: unit_to_byte(g),
            b: unit_to_byte(b),
        }
    }

    /// Create a color from float channels in [0.0, 255.0], truncating.
    #[must_use]
    pub fn from_channels(channels: [f32; 3]) -> Self {
        Self {
            r: channel_to_byte(channels[0]),
            g: channel_to_byte(channels[1]),
            b: channel_to_byte(channels[2]),
        }
    }

    /// Parse a whitespace separated triple of normalized floats, e.g. `"0.1 0.5 1"`.
    ///
    /// Returns `None` unless exactly three numbers are present.
    #[must_use]
    pub fn parse_normalized_triplet(text: &str) -> Option<Self> {
        parse_unit_triplet(text).map(|[r, g, b]| Self::from_normalized(r, g, b))
    }

    /// Parse a hex color string (e.g., "#ff0000" or "ff0000").
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 {
            return Err(ColorParseError::InvalidLength);
        }
        let byte = |range: std::ops::Range<usize>| {
            hex.get(range)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .ok_or(ColorParseError::InvalidHex)
        };
        Ok(Self::new(byte(0..2)?, byte(2..4)?, byte(4..6)?))
    }

    /// Channels as floats in [0.0, 255.0].
    #[must_use]
    pub fn channels(self) -> [f32; 3] {
        [f32::from(self.r), f32::from(self.g), f32::from(self.b)]
    }

    /// Perceived luminance in [0.0, 255.0].
    #[must_use]
    pub fn luminance(self) -> f32 {
        luminance(self.channels())
    }

    /// Whether all three components are equal.
    #[must_use]
    pub const fn is_gray(self) -> bool {
        self.r == self.g && self.g == self.b
    }

    /// Hex string, e.g. `#1a1b26`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Error parsing a color string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorParseError {
    /// Not exactly six hex digits.
    InvalidLength,
    /// Non-hex characters.
    InvalidHex,
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength => write!(f, "hex color must have 6 digits"),
            Self::InvalidHex => write!(f, "invalid hex digit"),
        }
    }
}

impl std::error::Error for ColorParseError {}

/// Split `"r g b"` into exactly three floats, unconverted.
#[must_use]
pub fn parse_unit_triplet(text: &str) -> Option<[f32; 3]> {
    let mut parts = text.split_whitespace().map(str::parse::<f32>);
    let r = parts.next()?.ok()?;
    let g = parts.next()?.ok()?;
    let b = parts.next()?.ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some([r, g, b])
}

/// Luminance `0.299R + 0.587G + 0.114B` of float channels.
#[must_use]
pub fn luminance(channels: [f32; 3]) -> f32 {
    (LUMA_R * channels[0] + LUMA_G * channels[1] + LUMA_B * channels[2]) / 1000.0
}

/// Scale chroma around the luminance axis.
///
/// `0.0` yields gray, `1.0` returns the input, values above one exaggerate
/// chroma. Every channel is clamped to [0.0, 255.0].
#[must_use]
pub fn saturate(channels: [f32; 3], saturation: f32) -> [f32; 3] {
    let y = luminance(channels);
    channels.map(|c| (y + (c - y) * saturation).clamp(0.0, 255.0))
}

fn unit_to_byte(v: f32) -> u8 {
    if v.is_finite() {
        (v.clamp(0.0, 1.0) * 255.0).round() as u8
    } else {
        0
    }
}

fn channel_to_byte(v: f32) -> u8 {
    if v.is_finite() {
        v.clamp(0.0, 255.0) as u8
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_from_normalized_rounds() {
        let c = Rgb::from_normalized(0.5, 0.25, 1.0);
        assert_eq!(c, Rgb::new(128, 64, 255));
    }

    #[test]
    fn test_from_normalized_clamps_and_rejects_nan() {
        let c = Rgb::from_normalized(-1.0, 2.0, f32::NAN);
        assert_eq!(c, Rgb::new(0, 255, 0));
    }

    #[test]
    fn test_parse_normalized_triplet() {
        assert_eq!(
            Rgb::parse_normalized_triplet("0 0.5 1"),
            Some(Rgb::new(0, 128, 255))
        );
        assert_eq!(
            Rgb::parse_normalized_triplet("  1   1 1 "),
            Some(Rgb::WHITE)
        );
    }

    #[test]
    fn test_parse_normalized_triplet_rejects_bad_input() {
        assert_eq!(Rgb::parse_normalized_triplet("0 0.5"), None);
        assert_eq!(Rgb::parse_normalized_triplet("0 0.5 1 1"), None);
        assert_eq!(Rgb::parse_normalized_triplet("a b c"), None);
        assert_eq!(Rgb::parse_normalized_triplet(""), None);
    }

    #[test]
    fn test_from_hex() {
        assert_eq!(Rgb::from_hex("#ff0000"), Ok(Rgb::new(255, 0, 0)));
        assert_eq!(Rgb::from_hex("1a1b26"), Ok(Rgb::new(0x1a, 0x1b, 0x26)));
        assert_eq!(Rgb::from_hex("#fff"), Err(ColorParseError::InvalidLength));
        assert_eq!(Rgb::from_hex("#gg0000"), Err(ColorParseError::InvalidHex));
    }

    #[test]
    fn test_to_hex_and_display() {
        let c = Rgb::new(26, 27, 38);
        assert_eq!(c.to_hex(), "#1a1b26");
        assert_eq!(c.to_string(), "rgb(26, 27, 38)");
    }

    #[test]
    fn test_luminance_extremes() {
        assert_eq!(Rgb::BLACK.luminance(), 0.0);
        assert!((Rgb::WHITE.luminance() - 255.0).abs() < 0.01);
    }

    #[test]
    fn test_saturate_zero_is_gray() {
        let out = saturate([255.0, 0.0, 0.0], 0.0);
        assert!((out[0] - out[1]).abs() < f32::EPSILON);
        assert!((out[1] - out[2]).abs() < f32::EPSILON);
        assert!((out[0] - 76.245).abs() < 0.01);
    }

    #[test]
    fn test_saturate_one_is_identity() {
        let input = [12.0, 200.0, 99.0];
        let out = saturate(input, 1.0);
        for (a, b) in input.iter().zip(out.iter()) {
            assert!((a - b).abs() < 0.001);
        }
    }

    #[test]
    fn test_saturate_high_clamps() {
        let out = saturate([255.0, 0.0, 0.0], 4.0);
        assert_eq!(out[0], 255.0);
        assert_eq!(out[1], 0.0);
    }

    #[test]
    fn test_from_channels_truncates() {
        assert_eq!(Rgb::from_channels([76.9, 0.2, 254.99]), Rgb::new(76, 0, 254));
        assert_eq!(Rgb::from_channels([-3.0, 300.0, f32::NAN]), Rgb::new(0, 255, 0));
    }

    #[test]
    fn test_is_gray() {
        assert!(Rgb::new(7, 7, 7).is_gray());
        assert!(!Rgb::new(7, 7, 8).is_gray());
    }

    #[test]
    fn test_serde_roundtrip_shape() {
        let json = serde_json::to_string(&Rgb::new(1, 2, 3)).unwrap();
        assert_eq!(json, r#"{"r":1,"g":2,"b":3}"#);
    }

    proptest! {
        #[test]
        fn prop_saturate_stays_in_range(
            r in 0.0f32..=255.0, g in 0.0f32..=255.0, b in 0.0f32..=255.0, s in 0.0f32..8.0
        ) {
            let out = saturate([r, g, b], s);
            for c in out {
                prop_assert!((0.0..=255.0).contains(&c));
            }
        }

        #[test]
        fn prop_saturate_zero_collapses_channels(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
            let out = saturate(Rgb::new(r, g, b).channels(), 0.0);
            prop_assert!((out[0] - out[1]).abs() < 0.001);
            prop_assert!((out[1] - out[2]).abs() < 0.001);
        }
    }
}
