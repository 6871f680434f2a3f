//! # Introduction
//! BCLIM textures store pixels in 8x8 tiles with the pixels of each tile
//! arranged in Morton (Z-order) order. This library converts between these tiled
//! payloads and linear RGBA8 pixels for all of the uncompressed 3DS texture formats.
//!
//! The easiest way to read a texture is with [convert()] or [image_from_bclim].
//! Lower level access is available through [Surface] and [SurfaceRgba8].
//!
//! # Limitations
//! ETC1 and ETC1A4 are recognized but can not be decoded or encoded.
//! Compressed containers require a [Decompress] implementation supplied by the caller.

mod bclim;
pub use bclim::*;

mod canvas;
pub use canvas::*;

#[cfg(feature = "image")]
mod convert;
#[cfg(feature = "image")]
pub use convert::*;

mod decode;
pub use decode::rgba8_from_tiled;

mod encode;
pub use encode::tiled_from_rgba8;

mod error;
pub use error::*;

pub mod morton;

pub mod rgba;
pub use rgba::{decode_color, encode_cell};

mod surface;
pub use surface::{Surface, SurfaceRgba8};

/// Supported texture formats in the order of their numeric format codes.
///
/// Some formats store fewer than four channels.
/// Missing channels are filled with `255` when decoding.
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "strum",
    derive(strum::EnumString, strum::Display, strum::EnumIter)
)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ImageFormat {
    L8,
    A8,
    La4,
    La8,
    Hilo8,
    Rgb565,
    Rgb8,
    Rgba5551,
    Rgba4444,
    Rgba8888,
    Etc1,
    Etc1A4,
    L4,
    A4,
}

impl ImageFormat {
    /// The numeric format code stored by BCLIM tooling.
    pub fn code(&self) -> u32 {
        match self {
            ImageFormat::L8 => 0x0,
            ImageFormat::A8 => 0x1,
            ImageFormat::La4 => 0x2,
            ImageFormat::La8 => 0x3,
            ImageFormat::Hilo8 => 0x4,
            ImageFormat::Rgb565 => 0x5,
            ImageFormat::Rgb8 => 0x6,
            ImageFormat::Rgba5551 => 0x7,
            ImageFormat::Rgba4444 => 0x8,
            ImageFormat::Rgba8888 => 0x9,
            ImageFormat::Etc1 => 0xA,
            ImageFormat::Etc1A4 => 0xB,
            ImageFormat::L4 => 0xC,
            ImageFormat::A4 => 0xD,
        }
    }

    /// The size of a single pixel in bits.
    ///
    /// ETC1 formats report their average rate even though they can't be converted.
    pub fn bits_per_pixel(&self) -> usize {
        match self {
            ImageFormat::L8 => 8,
            ImageFormat::A8 => 8,
            ImageFormat::La4 => 8,
            ImageFormat::La8 => 16,
            ImageFormat::Hilo8 => 16,
            ImageFormat::Rgb565 => 16,
            ImageFormat::Rgb8 => 24,
            ImageFormat::Rgba5551 => 16,
            ImageFormat::Rgba4444 => 16,
            ImageFormat::Rgba8888 => 32,
            ImageFormat::Etc1 => 4,
            ImageFormat::Etc1A4 => 8,
            ImageFormat::L4 => 4,
            ImageFormat::A4 => 4,
        }
    }

    /// Returns `true` for formats that can be decoded and encoded.
    pub fn is_supported(&self) -> bool {
        !matches!(self, ImageFormat::Etc1 | ImageFormat::Etc1A4)
    }

    /// The number of bytes needed to store `pixels` pixels in this format.
    pub(crate) fn size_in_bytes(&self, pixels: usize) -> Option<usize> {
        Some(div_round_up(pixels.checked_mul(self.bits_per_pixel())?, 8))
    }
}

impl TryFrom<u32> for ImageFormat {
    type Error = SurfaceError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0x0 => Ok(ImageFormat::L8),
            0x1 => Ok(ImageFormat::A8),
            0x2 => Ok(ImageFormat::La4),
            0x3 => Ok(ImageFormat::La8),
            0x4 => Ok(ImageFormat::Hilo8),
            0x5 => Ok(ImageFormat::Rgb565),
            0x6 => Ok(ImageFormat::Rgb8),
            0x7 => Ok(ImageFormat::Rgba5551),
            0x8 => Ok(ImageFormat::Rgba4444),
            0x9 => Ok(ImageFormat::Rgba8888),
            0xA => Ok(ImageFormat::Etc1),
            0xB => Ok(ImageFormat::Etc1A4),
            0xC => Ok(ImageFormat::L4),
            0xD => Ok(ImageFormat::A4),
            code => Err(SurfaceError::UnrecognizedFormat { code }),
        }
    }
}

/// The width and height of a tile in pixels.
pub const TILE_DIMENSION: u32 = 8;

/// The number of pixels in a single tile.
pub const TILE_PIXELS: u32 = TILE_DIMENSION * TILE_DIMENSION;

fn div_round_up(x: usize, d: usize) -> usize {
    x / d + usize::from(x % d != 0)
}

fn round_up(x: usize, n: usize) -> usize {
    ((x + n - 1) / n) * n
}
