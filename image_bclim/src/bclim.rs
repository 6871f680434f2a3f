use std::path::Path;

use crate::{BclimError, DecompressError};

/// The first byte of a container with a compressed payload.
pub const COMPRESSED_MARKER: u8 = 0x11;

/// The number of bytes read from the start of the container.
pub const HEADER_SIZE: usize = 0x10;

/// Expands compressed containers.
///
/// Implemented for closures taking the compressed bytes.
/// ```rust
/// use image_bclim::{Decompress, DecompressError};
///
/// let decompressor = |data: &[u8]| -> Result<Vec<u8>, DecompressError> { Ok(data.to_vec()) };
/// assert_eq!(Ok(vec![1, 2]), decompressor.decompress(&[1, 2]).map_err(|e| e.message));
/// ```
pub trait Decompress {
    /// Decompresses the entire container including the marker byte.
    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, DecompressError>;
}

impl<F> Decompress for F
where
    F: Fn(&[u8]) -> Result<Vec<u8>, DecompressError>,
{
    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, DecompressError> {
        self(data)
    }
}

/// A [Decompress] implementation that fails for every compressed container.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDecompressor;

impl Decompress for NoDecompressor {
    fn decompress(&self, _data: &[u8]) -> Result<Vec<u8>, DecompressError> {
        Err(DecompressError::new("no decompressor is available"))
    }
}

/// A parsed texture container.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bclim {
    /// The offset of the pixel data from the start of the container.
    pub header_length: u32,
    /// The width of the image in pixels before any padding.
    pub width: u32,
    /// The height of the image in pixels before any padding.
    pub height: u32,
    /// The tiled pixel data starting at [header_length](#structfield.header_length).
    pub data: Vec<u8>,
}

/// The result of parsing a container that may be compressed.
#[derive(Debug)]
pub enum Parsed {
    Texture(Bclim),
    /// The container was compressed and could not be expanded.
    DecompressionFailed(DecompressError),
}

impl Parsed {
    /// Returns the texture or an empty texture if decompression failed.
    ///
    /// An empty texture decodes to an image with no pixels.
    pub fn into_texture(self) -> Bclim {
        match self {
            Parsed::Texture(bclim) => bclim,
            Parsed::DecompressionFailed(_) => Bclim::default(),
        }
    }
}

impl Bclim {
    /// Parses a container from `data`.
    ///
    /// Containers starting with [COMPRESSED_MARKER] are expanded with `decompressor` first.
    /// Failing to decompress is not an error and returns [Parsed::DecompressionFailed].
    pub fn from_bytes<D: Decompress + ?Sized>(
        data: &[u8],
        decompressor: &D,
    ) -> Result<Parsed, BclimError> {
        match data.first() {
            None => Err(BclimError::MalformedContainer {
                expected: HEADER_SIZE,
                actual: 0,
            }),
            Some(&COMPRESSED_MARKER) => match decompressor.decompress(data) {
                Ok(decompressed) => Self::from_decompressed_bytes(&decompressed).map(Parsed::Texture),
                Err(e) => {
                    log::warn!("Treating compressed container as empty: {e}");
                    Ok(Parsed::DecompressionFailed(e))
                }
            },
            Some(_) => Self::from_decompressed_bytes(data).map(Parsed::Texture),
        }
    }

    /// Parses a container from `data` without checking for compression.
    pub fn from_decompressed_bytes(data: &[u8]) -> Result<Self, BclimError> {
        if data.len() < HEADER_SIZE {
            return Err(BclimError::MalformedContainer {
                expected: HEADER_SIZE,
                actual: data.len(),
            });
        }

        let header_length = read_u32(data, 0x0);
        let width = read_u32(data, 0x8);
        let height = read_u32(data, 0xC);

        let data = data
            .get(header_length as usize..)
            .ok_or(BclimError::HeaderOutOfBounds {
                header_length,
                actual: data.len(),
            })?
            .to_vec();

        Ok(Self {
            header_length,
            width,
            height,
            data,
        })
    }

    /// Reads and parses the container at `path`.
    pub fn from_file<P: AsRef<Path>, D: Decompress + ?Sized>(
        path: P,
        decompressor: &D,
    ) -> Result<Parsed, BclimError> {
        let data = read_file(path.as_ref())?;
        Self::from_bytes(&data, decompressor)
    }
}

pub(crate) fn read_file(path: &Path) -> Result<Vec<u8>, BclimError> {
    if !path.is_file() {
        return Err(BclimError::NotAFile {
            path: path.to_owned(),
        });
    }
    Ok(std::fs::read(path)?)
}

fn read_u32(data: &[u8], offset: usize) -> u32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&data[offset..offset + 4]);
    u32::from_le_bytes(bytes)
}
