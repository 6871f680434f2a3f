use crate::{
    morton::tile_index_to_xy, rgba::decode_color, round_up, ImageFormat, Surface, SurfaceError,
    SurfaceRgba8, TILE_DIMENSION, TILE_PIXELS,
};

impl<T: AsRef<[u8]>> Surface<T> {
    /// Decode the tiled pixels from `surface` to RGBA8.
    pub fn decode_rgba8(&self) -> Result<SurfaceRgba8<Vec<u8>>, SurfaceError> {
        let data = rgba8_from_tiled(self.width, self.height, self.data.as_ref(), self.image_format)?;
        Ok(SurfaceRgba8 {
            width: self.width,
            height: self.height,
            data,
        })
    }
}

/// Decodes a tiled surface of dimensions `width` x `height` with the given `format` to RGBA8.
///
/// Tiles are read from left to right and top to bottom.
/// Pixels of a partially covered tile that land outside the surface are skipped.
pub fn rgba8_from_tiled(
    width: u32,
    height: u32,
    data: &[u8],
    format: ImageFormat,
) -> Result<Vec<u8>, SurfaceError> {
    Surface {
        width,
        height,
        image_format: format,
        data,
    }
    .validate()?;

    // The pixel count is already validated above.
    let pixel_count = width as usize * height as usize;
    let mut rgba8 = vec![0u8; pixel_count * 4];
    let tiles_per_row = tiles_per_row(width);

    let mut offset = 0;
    let mut i = 0;
    while i < pixel_count {
        let (x, y) = pixel_position(i, tiles_per_row);

        match format {
            ImageFormat::L4 | ImageFormat::A4 => {
                // The low nibble is the first pixel.
                // The next tile index is always the pixel to the right.
                let value = data[offset] as u32;
                offset += 1;

                let low = decode_color(value & 0xF, format)?;
                set_pixel(&mut rgba8, width, height, x, y, low);

                let high = decode_color(value >> 4, format)?;
                set_pixel(&mut rgba8, width, height, x + 1, y, high);

                i += 2;
            }
            _ => {
                let size = format.bits_per_pixel() / 8;
                let cell = read_cell(&data[offset..offset + size]);
                offset += size;

                let color = decode_color(cell, format)?;
                set_pixel(&mut rgba8, width, height, x, y, color);

                i += 1;
            }
        }
    }

    Ok(rgba8)
}

pub(crate) fn tiles_per_row(width: u32) -> usize {
    (round_up(width as usize, TILE_DIMENSION as usize) / TILE_DIMENSION as usize).max(1)
}

/// The `(x, y)` position of the `i`-th pixel in tiled order.
pub(crate) fn pixel_position(i: usize, tiles_per_row: usize) -> (u32, u32) {
    let (x, y) = tile_index_to_xy((i % TILE_PIXELS as usize) as u32);
    let tile = i / TILE_PIXELS as usize;
    (
        x + (tile % tiles_per_row) as u32 * TILE_DIMENSION,
        y + (tile / tiles_per_row) as u32 * TILE_DIMENSION,
    )
}

fn read_cell(bytes: &[u8]) -> u32 {
    let mut cell = [0u8; 4];
    cell[..bytes.len()].copy_from_slice(bytes);
    u32::from_le_bytes(cell)
}

fn set_pixel(rgba8: &mut [u8], width: u32, height: u32, x: u32, y: u32, rgba: [u8; 4]) {
    if x < width && y < height {
        let index = (y as usize * width as usize + x as usize) * 4;
        rgba8[index..index + 4].copy_from_slice(&rgba);
    }
}
