use crate::{
    decode::{pixel_position, tiles_per_row},
    encode_canvas,
    rgba::{encode_cell, encode_nibble},
    surface::pixel_count,
    Canvas, CanvasPolicy, ImageFormat, Surface, SurfaceError, SurfaceRgba8,
};

/// Replaces the color of fully transparent pixels before encoding.
const TRANSPARENT_FILL: [u8; 4] = [86, 86, 86, 0];

impl<T: AsRef<[u8]>> SurfaceRgba8<T> {
    /// Encode an RGBA8 surface to the given `format`.
    ///
    /// The returned surface has the dimensions of the padded canvas selected by `policy`.
    pub fn encode(
        &self,
        format: ImageFormat,
        policy: CanvasPolicy,
    ) -> Result<Surface<Vec<u8>>, SurfaceError> {
        let (canvas, data) = encode_tiled(self, format, policy)?;
        Ok(Surface {
            width: canvas.width,
            height: canvas.height,
            image_format: format,
            data,
        })
    }
}

/// Encodes an RGBA8 surface of dimensions `width` x `height` to tiles with the given `format`.
///
/// Images that are not a square power of two are padded according to `policy`.
/// Padded pixels are fully transparent and the data is then padded with zeros
/// to a power of two length.
pub fn tiled_from_rgba8(
    width: u32,
    height: u32,
    rgba8: &[u8],
    format: ImageFormat,
    policy: CanvasPolicy,
) -> Result<Vec<u8>, SurfaceError> {
    let surface = SurfaceRgba8 {
        width,
        height,
        data: rgba8,
    };
    let (_, data) = encode_tiled(&surface, format, policy)?;
    Ok(data)
}

fn encode_tiled<T: AsRef<[u8]>>(
    surface: &SurfaceRgba8<T>,
    format: ImageFormat,
    policy: CanvasPolicy,
) -> Result<(Canvas, Vec<u8>), SurfaceError> {
    surface.validate()?;
    if !format.is_supported() {
        return Err(SurfaceError::UnsupportedFormat { format });
    }

    let overflow = SurfaceError::PixelCountWouldOverflow {
        width: surface.width,
        height: surface.height,
    };
    let canvas = encode_canvas(surface.width, surface.height, policy).ok_or(overflow.clone())?;
    let count = pixel_count(canvas.width, canvas.height).ok_or(overflow.clone())?;
    let size = format.size_in_bytes(count).ok_or(overflow)?;

    let tiles_per_row = tiles_per_row(canvas.width);
    let mut data = Vec::with_capacity(size);

    let mut i = 0;
    while i < count {
        let (x, y) = pixel_position(i, tiles_per_row);

        match format {
            ImageFormat::L4 | ImageFormat::A4 => {
                // Transparent pixels stay zeroed for 4 bit formats.
                let low = encode_nibble(nibble_pixel(surface, x, y), format)?;
                let high = encode_nibble(nibble_pixel(surface, x + 1, y), format)?;
                data.push(low | (high << 4));
                i += 2;
            }
            _ => {
                let bytes = encode_cell(source_pixel(surface, x, y), format)?;
                data.extend_from_slice(&bytes);
                i += 1;
            }
        }
    }

    if !canvas.perfect {
        let padded_size = match data.len() {
            0 => 0,
            len => len.checked_next_power_of_two().unwrap_or(len),
        };
        log::debug!(
            "Padding {}x{} surface to {}x{} with {} bytes of data",
            surface.width,
            surface.height,
            canvas.width,
            canvas.height,
            padded_size
        );
        data.resize(padded_size, 0u8);
    }

    Ok((canvas, data))
}

fn source_pixel<T: AsRef<[u8]>>(surface: &SurfaceRgba8<T>, x: u32, y: u32) -> [u8; 4] {
    match surface.get_pixel(x, y) {
        Some([_, _, _, 0]) => TRANSPARENT_FILL,
        Some(rgba) => rgba,
        None => [0u8; 4],
    }
}

fn nibble_pixel<T: AsRef<[u8]>>(surface: &SurfaceRgba8<T>, x: u32, y: u32) -> [u8; 4] {
    match surface.get_pixel(x, y) {
        Some([_, _, _, 0]) | None => [0u8; 4],
        Some(rgba) => rgba,
    }
}
