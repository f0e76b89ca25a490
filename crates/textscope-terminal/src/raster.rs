//! Image sources and their rasterization to exact sample grids.
//!
//! The renderers never see images, only [`PixelGrid`]s that already have the
//! requested dimensions. [`ImageRasterizer`] is the seam where a host can
//! plug in its own decoder; [`FileRasterizer`] decodes local files with the
//! `image` crate and [`BuiltinRasterizer`] draws the built-in default.

use crate::error::RasterError;
use image::imageops::FilterType;
use image::DynamicImage;
use std::fmt;
use std::path::PathBuf;

/// Bytes per RGBA pixel.
const RGBA: usize = 4;

/// Where art comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArtSource {
    /// A `file:///` or remote URI, or a bare path.
    Uri(String),
    /// The procedurally drawn default image.
    Builtin,
}

impl fmt::Display for ArtSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uri(uri) => write!(f, "{uri}"),
            Self::Builtin => write!(f, "<builtin>"),
        }
    }
}

/// A row-major RGBA sample grid of exactly `width × height` pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelGrid {
    /// Wrap an RGBA buffer, validating its length.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::EmptyGrid { width, height });
        }
        let expected = width as usize * height as usize * RGBA;
        if data.len() != expected {
            return Err(RasterError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A grid of one opaque color.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Result<Self, RasterError> {
        Self::from_fn(width, height, |_, _| rgb)
    }

    /// Build a grid by evaluating `f(x, y)` for every opaque pixel.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(u32, u32) -> [u8; 3],
    ) -> Result<Self, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::EmptyGrid { width, height });
        }
        let mut data = Vec::with_capacity(width as usize * height as usize * RGBA);
        for y in 0..height {
            for x in 0..width {
                let [r, g, b] = f(x, y);
                data.extend_from_slice(&[r, g, b, 255]);
            }
        }
        Self::new(width, height, data)
    }

    /// Sample columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Sample rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// RGBA at `(x, y)`, or `None` outside the grid.
    #[must_use]
    pub fn rgba(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * RGBA;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Iterate rows of RGBA pixels, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.data.chunks_exact(self.width as usize * RGBA)
    }
}

/// Produces a sample grid of exactly the requested size from a source.
pub trait ImageRasterizer {
    /// Rasterize `source` to `width × height` samples.
    fn rasterize(
        &self,
        source: &ArtSource,
        width: u32,
        height: u32,
    ) -> Result<PixelGrid, RasterError>;
}

/// Sample grid dimensions for an art resolution: `(resolution, resolution / 2)`.
///
/// Glyph cells are roughly twice as tall as wide, so half as many rows keep
/// the aspect ratio. Both dimensions are at least one.
#[must_use]
pub fn sample_dimensions(resolution: u32) -> (u32, u32) {
    let width = resolution.max(1);
    (width, (width / 2).max(1))
}

/// Draws the built-in default art: a dusk gradient with a low sun.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinRasterizer;

impl BuiltinRasterizer {
    /// Draw the default image at `width × height`.
    pub fn draw(width: u32, height: u32) -> Result<PixelGrid, RasterError> {
        let w = width.max(1) as f32;
        let h = height.max(1) as f32;
        PixelGrid::from_fn(width, height, |x, y| {
            let u = (x as f32 + 0.5) / w;
            let v = (y as f32 + 0.5) / h;
            // Sun centred low, radius in normalized units with 2:1 cells.
            let dx = u - 0.5;
            let dy = (v - 0.62) * 0.5;
            let d = (dx * dx + dy * dy).sqrt();
            if d < 0.16 {
                let glow = 1.0 - d / 0.16;
                return [255, (190.0 + 60.0 * glow) as u8, (80.0 + 120.0 * glow) as u8];
            }
            if v > 0.75 {
                // Ground
                let shade = 40.0 + 30.0 * (1.0 - v);
                return [shade as u8 / 2, shade as u8, shade as u8 / 3];
            }
            let r = 30.0 + 200.0 * v;
            let g = 20.0 + 90.0 * v;
            let b = 90.0 + 60.0 * (1.0 - v);
            [r as u8, g as u8, b as u8]
        })
    }
}

impl ImageRasterizer for BuiltinRasterizer {
    fn rasterize(
        &self,
        source: &ArtSource,
        width: u32,
        height: u32,
    ) -> Result<PixelGrid, RasterError> {
        match source {
            ArtSource::Builtin => Self::draw(width, height),
            ArtSource::Uri(uri) => Err(RasterError::UnsupportedSource(uri.clone())),
        }
    }
}

/// Decodes local image files with the `image` crate.
///
/// Remote URIs are rejected; the built-in source is delegated to
/// [`BuiltinRasterizer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FileRasterizer;

impl FileRasterizer {
    /// Filesystem path for a `file:///` URI or bare path; `None` for
    /// remote URIs.
    #[must_use]
    pub fn local_path(uri: &str) -> Option<PathBuf> {
        if uri.starts_with("http://") || uri.starts_with("https://") {
            return None;
        }
        let Some(rest) = uri.strip_prefix("file:///") else {
            return Some(PathBuf::from(uri));
        };
        // `file:///C:/x` names a drive path, `file:///tmp/x` an absolute one.
        let bytes = rest.as_bytes();
        if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
            Some(PathBuf::from(rest))
        } else {
            Some(PathBuf::from(format!("/{rest}")))
        }
    }

    /// Decode an in-memory image and resample it to `width × height`.
    pub fn rasterize_bytes(bytes: &[u8], width: u32, height: u32) -> Result<PixelGrid, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::EmptyGrid { width, height });
        }
        let image = image::load_from_memory(bytes)?;
        Self::resample(&image, width, height)
    }

    fn resample(image: &DynamicImage, width: u32, height: u32) -> Result<PixelGrid, RasterError> {
        let resized = image.resize_exact(width, height, FilterType::Nearest);
        PixelGrid::new(width, height, resized.to_rgba8().into_raw())
    }
}

impl ImageRasterizer for FileRasterizer {
    fn rasterize(
        &self,
        source: &ArtSource,
        width: u32,
        height: u32,
    ) -> Result<PixelGrid, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::EmptyGrid { width, height });
        }
        let uri = match source {
            ArtSource::Builtin => return BuiltinRasterizer.rasterize(source, width, height),
            ArtSource::Uri(uri) => uri,
        };
        let path =
            Self::local_path(uri).ok_or_else(|| RasterError::UnsupportedSource(uri.clone()))?;
        let bytes = std::fs::read(&path)?;
        let image = image::load_from_memory(&bytes)?;
        tracing::debug!(
            path = %path.display(),
            source_width = image.width(),
            source_height = image.height(),
            width,
            height,
            "rasterizing image"
        );
        Self::resample(&image, width, height)
    }
}
