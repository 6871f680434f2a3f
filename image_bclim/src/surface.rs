use crate::{ImageFormat, SurfaceError};

/// A tiled surface with an image format known at runtime.
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Surface<T> {
    /// The width of the surface in pixels.
    pub width: u32,
    /// The height of the surface in pixels.
    pub height: u32,
    /// The format of the bytes in [data](#structfield.data).
    pub image_format: ImageFormat,
    /// The pixel data ordered by tile from left to right and top to bottom.
    /// Pixels within a tile use the order from [morton](crate::morton).
    pub data: T,
}

impl<T: AsRef<[u8]>> Surface<T> {
    /// The number of bytes required for `width` x `height` pixels in [image_format](#structfield.image_format).
    pub(crate) fn validate(&self) -> Result<usize, SurfaceError> {
        if !self.image_format.is_supported() {
            return Err(SurfaceError::UnsupportedFormat {
                format: self.image_format,
            });
        }

        let expected = pixel_count(self.width, self.height)
            .and_then(|count| self.image_format.size_in_bytes(count))
            .ok_or(SurfaceError::PixelCountWouldOverflow {
                width: self.width,
                height: self.height,
            })?;

        validate_length(expected, self.data.as_ref())
    }
}

/// An uncompressed RGBA8 surface with 4 bytes per pixel in row-major order.
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurfaceRgba8<T> {
    /// The width of the surface in pixels.
    pub width: u32,
    /// The height of the surface in pixels.
    pub height: u32,
    /// The pixel data with the pixel at `(x, y)` starting at byte `(y * width + x) * 4`.
    pub data: T,
}

impl<T: AsRef<[u8]>> SurfaceRgba8<T> {
    /// Get the RGBA values for the pixel at `(x, y)`.
    ///
    /// Returns [None] if the pixel is outside the surface.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = (y as usize * self.width as usize + x as usize) * 4;
        let pixel = self.data.as_ref().get(index..index + 4)?;
        pixel.try_into().ok()
    }

    pub(crate) fn validate(&self) -> Result<usize, SurfaceError> {
        let expected = pixel_count(self.width, self.height)
            .and_then(|count| count.checked_mul(4))
            .ok_or(SurfaceError::PixelCountWouldOverflow {
                width: self.width,
                height: self.height,
            })?;

        validate_length(expected, self.data.as_ref())
    }
}

pub(crate) fn pixel_count(width: u32, height: u32) -> Option<usize> {
    (width as usize).checked_mul(height as usize)
}

fn validate_length(expected: usize, data: &[u8]) -> Result<usize, SurfaceError> {
    if data.len() < expected {
        Err(SurfaceError::NotEnoughData {
            expected,
            actual: data.len(),
        })
    } else {
        Ok(expected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_surface_not_enough_data() {
        let result = Surface {
            width: 8,
            height: 8,
            image_format: ImageFormat::Rgba8888,
            data: &[0u8; 255],
        }
        .validate();

        assert_eq!(
            Err(SurfaceError::NotEnoughData {
                expected: 256,
                actual: 255
            }),
            result
        );
    }

    #[test]
    fn validate_surface_nibbles() {
        let result = Surface {
            width: 8,
            height: 8,
            image_format: ImageFormat::L4,
            data: &[0u8; 32],
        }
        .validate();

        assert_eq!(Ok(32), result);
    }

    #[test]
    fn validate_surface_unsupported() {
        let result = Surface {
            width: 8,
            height: 8,
            image_format: ImageFormat::Etc1,
            data: &[0u8; 32],
        }
        .validate();

        assert_eq!(
            Err(SurfaceError::UnsupportedFormat {
                format: ImageFormat::Etc1
            }),
            result
        );
    }

    #[test]
    fn validate_surface_overflow() {
        let result = Surface {
            width: u32::MAX,
            height: u32::MAX,
            image_format: ImageFormat::Rgba8888,
            data: &[0u8; 0],
        }
        .validate();

        // The pixel count fits in a 64 bit usize but the byte count does not.
        assert!(matches!(
            result,
            Err(SurfaceError::PixelCountWouldOverflow { .. })
        ));
    }

    #[test]
    fn validate_rgba8_not_enough_data() {
        let result = SurfaceRgba8 {
            width: 2,
            height: 2,
            data: &[0u8; 15],
        }
        .validate();

        assert_eq!(
            Err(SurfaceError::NotEnoughData {
                expected: 16,
                actual: 15
            }),
            result
        );
    }

    #[test]
    fn get_pixel_bounds() {
        let surface = SurfaceRgba8 {
            width: 2,
            height: 1,
            data: vec![1, 2, 3, 4, 5, 6, 7, 8],
        };
        assert_eq!(Some([5, 6, 7, 8]), surface.get_pixel(1, 0));
        assert_eq!(None, surface.get_pixel(2, 0));
        assert_eq!(None, surface.get_pixel(0, 1));
    }
}
