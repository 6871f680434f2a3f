//! Conversions between pixel indices within a tile and tile coordinates.
//!
//! Pixels in a tile are stored in Z-order by interleaving the bits of the coordinates.
//! Even bits of the index select x and odd bits select y.
//! ```text
//!  0  1  4  5 16 17 20 21
//!  2  3  6  7 18 19 22 23
//!  8  9 12 13 24 25 28 29
//! 10 11 14 15 26 27 30 31
//! ...
//! ```

/// Splits the tile index `d` into `(x, y)` coordinates within the tile.
///
/// Valid indices are `0..64`, giving coordinates in `0..8`.
pub fn tile_index_to_xy(d: u32) -> (u32, u32) {
    (compact_bits(d), compact_bits(d >> 1))
}

/// Combines the tile coordinates `x` and `y` into an index within the tile.
///
/// This is the inverse of [tile_index_to_xy].
pub fn xy_to_tile_index(x: u32, y: u32) -> u32 {
    spread_bits(x) | (spread_bits(y) << 1)
}

// Keep every other bit and pack them into the low half.
fn compact_bits(x: u32) -> u32 {
    let mut x = x & 0x55555555;
    x = (x ^ (x >> 1)) & 0x33333333;
    x = (x ^ (x >> 2)) & 0x0f0f0f0f;
    x = (x ^ (x >> 4)) & 0x00ff00ff;
    x = (x ^ (x >> 8)) & 0x0000ffff;
    x
}

// Inserts a zero bit after each of the low 16 bits.
fn spread_bits(x: u32) -> u32 {
    let mut x = x & 0x0000ffff;
    x = (x | (x << 8)) & 0x00ff00ff;
    x = (x | (x << 4)) & 0x0f0f0f0f;
    x = (x | (x << 2)) & 0x33333333;
    x = (x | (x << 1)) & 0x55555555;
    x
}
