use crate::{round_up, TILE_DIMENSION};

/// The working dimensions used when converting to or from tiles.
///
/// The canvas may be larger than the image due to padding.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    /// `true` if the image is a square power of two and the canvas matches it exactly.
    pub perfect: bool,
}

/// How to pad images that are not a square power of two when encoding.
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum CanvasPolicy {
    /// Pad each dimension to its own power of two for narrow images
    /// with a smaller dimension below 32 pixels.
    /// Other images use a square canvas.
    #[default]
    Rectangle,
    /// Always pad to a square power of two.
    Square,
}

/// Returns the smallest power of two that is at least `x`.
///
/// Unlike [u32::next_power_of_two], this returns `0` for `0`.
/// Returns [None] if the result does not fit in a `u32`.
pub fn next_power_of_two(x: u32) -> Option<u32> {
    match x {
        0 => Some(0),
        x => x.checked_next_power_of_two(),
    }
}

/// Selects the canvas for decoding an entire texture with `payload_len` bytes of data.
///
/// Dimensions are rounded up to whole tiles and then to a power of two.
/// The power of two padding is skipped if the padded canvas has more pixels
/// than the payload could hold with 4 bytes per pixel.
/// Returns [None] if the tile aligned dimensions do not fit in a `u32`.
pub fn decode_canvas(width: u32, height: u32, payload_len: usize) -> Option<Canvas> {
    let tile_width = round_up(width as usize, TILE_DIMENSION as usize);
    let tile_height = round_up(height as usize, TILE_DIMENSION as usize);

    let padded = (
        next_power_of_two_usize(tile_width),
        next_power_of_two_usize(tile_height),
    );

    let fits = match padded {
        (Some(w), Some(h)) => w
            .checked_mul(h)
            .map(|area| area <= payload_len / 4)
            .unwrap_or(false),
        _ => false,
    };

    let (w, h) = match padded {
        (Some(w), Some(h)) if fits => (w, h),
        _ => {
            log::debug!(
                "Canvas for {width}x{height} does not fit {payload_len} bytes when padded, using {tile_width}x{tile_height}"
            );
            (tile_width, tile_height)
        }
    };

    let w = u32::try_from(w).ok()?;
    let h = u32::try_from(h).ok()?;

    Some(Canvas {
        width: w,
        height: h,
        perfect: width == height && width.is_power_of_two() && w == width && h == height,
    })
}

/// Selects the canvas for encoding a `width` x `height` image.
///
/// Returns [None] if the padded dimensions do not fit in a `u32`.
pub fn encode_canvas(width: u32, height: u32, policy: CanvasPolicy) -> Option<Canvas> {
    let perfect = width == height && width.is_power_of_two();
    if perfect {
        return Some(Canvas {
            width,
            height,
            perfect,
        });
    }

    let (w, h) = if policy == CanvasPolicy::Rectangle && width.min(height) < 32 {
        (next_power_of_two(width)?, next_power_of_two(height)?)
    } else {
        let size = next_power_of_two(width)?.max(next_power_of_two(height)?);
        (size, size)
    };

    Some(Canvas {
        width: w,
        height: h,
        perfect,
    })
}

fn next_power_of_two_usize(x: usize) -> Option<usize> {
    match x {
        0 => Some(0),
        x => x
            .checked_next_power_of_two()
            .filter(|&x| x <= u32::MAX as usize),
    }
}
