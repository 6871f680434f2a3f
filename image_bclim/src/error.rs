use thiserror::Error;

use crate::ImageFormat;

#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum SurfaceError {
    #[error("surface pixel count {width} x {height} would overflow")]
    PixelCountWouldOverflow { width: u32, height: u32 },

    #[error("expected surface to have at least {expected} bytes but found {actual}")]
    NotEnoughData { expected: usize, actual: usize },

    #[error("converting data with format {format:?} is not supported")]
    UnsupportedFormat { format: ImageFormat },

    #[error("format code {code} does not match any known format")]
    UnrecognizedFormat { code: u32 },
}

#[derive(Debug, Error)]
pub enum BclimError {
    #[error("expected container to have at least {expected} bytes but found {actual}")]
    MalformedContainer { expected: usize, actual: usize },

    #[error("header length {header_length} exceeds the container length {actual}")]
    HeaderOutOfBounds { header_length: u32, actual: usize },

    #[error("{} is not a file", .path.display())]
    NotAFile { path: std::path::PathBuf },

    #[error("error converting surface: {0}")]
    Surface(#[from] SurfaceError),

    #[error("error reading container: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "image")]
    #[error("error writing image: {0}")]
    Image(#[from] image::ImageError),

    #[cfg(feature = "image")]
    #[error("data length {data_length} is not valid for a {width}x{height} image")]
    InvalidImageDimensions {
        width: u32,
        height: u32,
        data_length: usize,
    },
}

/// An error reported by a [Decompress](crate::Decompress) implementation.
#[derive(Debug, Error)]
#[error("error decompressing container: {message}")]
pub struct DecompressError {
    pub message: String,
}

impl DecompressError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
