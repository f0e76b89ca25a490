//! Error types for textscope-terminal.
//!
//! Only I/O and parse failures are errors. Out-of-range settings are clamped
//! (see [`crate::config::Settings::sanitized`]) and raster failures are
//! absorbed by the fallback chain.

use thiserror::Error;

/// Errors loading or parsing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the settings file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not valid YAML for [`crate::config::Settings`].
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// A host property payload is not valid JSON.
    #[error("invalid property payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors turning an image source into a sample grid.
#[derive(Debug, Error)]
pub enum RasterError {
    /// The image file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The image could not be decoded.
    #[error("image decode error: {0}")]
    Decode(#[from] image::ImageError),

    /// The source kind cannot be loaded (e.g. remote URIs).
    #[error("unsupported image source: {0}")]
    UnsupportedSource(String),

    /// A zero-sized sample grid was requested.
    #[error("empty sample grid: {width}x{height}")]
    EmptyGrid { width: u32, height: u32 },

    /// The pixel buffer length does not match the declared dimensions.
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// Top-level error for the `textscope` binary.
#[derive(Debug, Error)]
pub enum ScopeError {
    /// IO error from terminal operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Image rasterization failed.
    #[error("raster error: {0}")]
    Raster(#[from] RasterError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ConfigError = io_err.into();
        assert!(matches!(err, ConfigError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_config_error_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ConfigError::from(json_err);
        assert!(err.to_string().starts_with("invalid property payload"));
    }

    #[test]
    fn test_raster_error_messages() {
        let err = RasterError::EmptyGrid {
            width: 0,
            height: 3,
        };
        assert_eq!(err.to_string(), "empty sample grid: 0x3");

        let err = RasterError::SizeMismatch {
            expected: 16,
            actual: 12,
        };
        assert!(err.to_string().contains("12 bytes"));

        let err = RasterError::UnsupportedSource("https://x/y.png".to_string());
        assert!(err.to_string().contains("https://x/y.png"));
    }

    #[test]
    fn test_scope_error_wraps() {
        let err = ScopeError::from(RasterError::UnsupportedSource("a".into()));
        assert!(err.to_string().starts_with("raster error"));

        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = ScopeError::from(ConfigError::from(io_err));
        assert!(err.to_string().contains("access denied"));
    }

    #[test]
    fn test_scope_error_debug() {
        let err = ScopeError::Io(std::io::Error::new(std::io::ErrorKind::Other, "x"));
        assert!(format!("{err:?}").contains("Io"));
    }
}
