//! Conversions between single pixels and RGBA8.
//!
//! Each format has a [Pixel] type storing the little endian bytes of one cell.
//! [decode_color] and [encode_cell] select the type from an [ImageFormat] at runtime.
use bytemuck::{Pod, Zeroable};

use crate::{ImageFormat, SurfaceError};

pub mod convert;
use convert::{
    luma, unorm4_to_unorm8, unorm5_to_unorm8, unorm6_to_unorm8, unorm8_to_unorm4,
    unorm8_to_unorm5, unorm8_to_unorm6,
};

#[repr(C)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Pod, Zeroable)]
pub struct L8(pub u8);

#[repr(C)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Pod, Zeroable)]
pub struct A8(pub u8);

/// Luminance in the high nibble and alpha in the low nibble.
#[repr(C)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Pod, Zeroable)]
pub struct La4(pub u8);

#[repr(C)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Pod, Zeroable)]
pub struct La8(pub [u8; 2]);

#[repr(C)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Pod, Zeroable)]
pub struct Hilo8(pub [u8; 2]);

#[repr(C)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Pod, Zeroable)]
pub struct Rgb565(pub [u8; 2]);

/// Stored as BGR.
#[repr(C)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Pod, Zeroable)]
pub struct Rgb8(pub [u8; 3]);

#[repr(C)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Pod, Zeroable)]
pub struct Rgba5551(pub [u8; 2]);

#[repr(C)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Pod, Zeroable)]
pub struct Rgba4444(pub [u8; 2]);

/// Stored as ABGR.
#[repr(C)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Pod, Zeroable)]
pub struct Rgba8888(pub [u8; 4]);

/// A single 4 bit luminance value.
/// Two pixels share each byte of a surface.
#[repr(C)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Pod, Zeroable)]
pub struct L4(pub u8);

/// A single 4 bit alpha value.
/// Two pixels share each byte of a surface.
#[repr(C)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Pod, Zeroable)]
pub struct A4(pub u8);

/// A pixel stored as up to 4 little endian bytes.
pub trait Pixel: Pod {
    /// Creates a pixel from the low bytes of `cell`.
    fn from_cell(cell: u32) -> Self {
        let bytes = cell.to_le_bytes();
        bytemuck::pod_read_unaligned(&bytes[..std::mem::size_of::<Self>()])
    }

    /// The little endian bytes of the pixel as an integer.
    fn to_cell(self) -> u32 {
        let mut bytes = [0u8; 4];
        bytes[..std::mem::size_of::<Self>()].copy_from_slice(bytemuck::bytes_of(&self));
        u32::from_le_bytes(bytes)
    }
}

impl<P: Pod> Pixel for P {}

pub trait ToRgba {
    fn to_rgba(self) -> [u8; 4];
}

pub trait FromRgba {
    fn from_rgba(rgba: [u8; 4]) -> Self;
}

impl ToRgba for L8 {
    fn to_rgba(self) -> [u8; 4] {
        [self.0, self.0, self.0, 255u8]
    }
}

impl FromRgba for L8 {
    fn from_rgba(rgba: [u8; 4]) -> Self {
        Self(luma(rgba))
    }
}

impl ToRgba for A8 {
    fn to_rgba(self) -> [u8; 4] {
        [255u8, 255u8, 255u8, self.0]
    }
}

impl FromRgba for A8 {
    fn from_rgba(rgba: [u8; 4]) -> Self {
        Self(rgba[3])
    }
}

// Decoding leaves both nibbles unscaled while encoding divides by 17.
// Existing LA4 textures depend on this, so don't rescale here.
impl ToRgba for La4 {
    fn to_rgba(self) -> [u8; 4] {
        let l = self.0 >> 4;
        let a = self.0 & 0xF;
        [l, l, l, a]
    }
}

impl FromRgba for La4 {
    fn from_rgba(rgba: [u8; 4]) -> Self {
        Self((unorm8_to_unorm4(rgba[0]) << 4) | unorm8_to_unorm4(rgba[3]))
    }
}

impl ToRgba for La8 {
    fn to_rgba(self) -> [u8; 4] {
        let [a, l] = self.0;
        [l, l, l, a]
    }
}

impl FromRgba for La8 {
    fn from_rgba(rgba: [u8; 4]) -> Self {
        Self([rgba[3], rgba[0]])
    }
}

impl ToRgba for Hilo8 {
    fn to_rgba(self) -> [u8; 4] {
        let [lo, hi] = self.0;
        [hi, lo, 255u8, 255u8]
    }
}

impl FromRgba for Hilo8 {
    fn from_rgba(rgba: [u8; 4]) -> Self {
        Self([rgba[1], rgba[0]])
    }
}

impl ToRgba for Rgb565 {
    fn to_rgba(self) -> [u8; 4] {
        // Most significant bit -> RGB -> least significant bit.
        let v = u16::from_le_bytes(self.0);
        [
            unorm5_to_unorm8((v >> 11) as u8),
            unorm6_to_unorm8((v >> 5) as u8),
            unorm5_to_unorm8(v as u8),
            255u8,
        ]
    }
}

impl FromRgba for Rgb565 {
    fn from_rgba(rgba: [u8; 4]) -> Self {
        let r = unorm8_to_unorm5(rgba[0]) as u16;
        let g = unorm8_to_unorm6(rgba[1]) as u16;
        let b = unorm8_to_unorm5(rgba[2]) as u16;
        Self(((r << 11) | (g << 5) | b).to_le_bytes())
    }
}

impl ToRgba for Rgb8 {
    fn to_rgba(self) -> [u8; 4] {
        let [b, g, r] = self.0;
        [r, g, b, 255u8]
    }
}

impl FromRgba for Rgb8 {
    fn from_rgba(rgba: [u8; 4]) -> Self {
        Self([rgba[2], rgba[1], rgba[0]])
    }
}

impl ToRgba for Rgba5551 {
    fn to_rgba(self) -> [u8; 4] {
        // Most significant bit -> RGBA -> least significant bit.
        let v = u16::from_le_bytes(self.0);
        [
            unorm5_to_unorm8((v >> 11) as u8),
            unorm5_to_unorm8((v >> 6) as u8),
            unorm5_to_unorm8((v >> 1) as u8),
            if v & 1 == 1 { 255u8 } else { 0u8 },
        ]
    }
}

impl FromRgba for Rgba5551 {
    fn from_rgba(rgba: [u8; 4]) -> Self {
        let r = unorm8_to_unorm5(rgba[0]) as u16;
        let g = unorm8_to_unorm5(rgba[1]) as u16;
        let b = unorm8_to_unorm5(rgba[2]) as u16;
        let a = (rgba[3] > 0x80) as u16;
        Self(((r << 11) | (g << 6) | (b << 1) | a).to_le_bytes())
    }
}

impl ToRgba for Rgba4444 {
    fn to_rgba(self) -> [u8; 4] {
        // Most significant bit -> RGBA -> least significant bit.
        let [ba, rg] = self.0;
        [
            unorm4_to_unorm8(rg >> 4),
            unorm4_to_unorm8(rg & 0xF),
            unorm4_to_unorm8(ba >> 4),
            unorm4_to_unorm8(ba & 0xF),
        ]
    }
}

impl FromRgba for Rgba4444 {
    fn from_rgba(rgba: [u8; 4]) -> Self {
        let [r, g, b, a] = rgba.map(unorm8_to_unorm4);
        Self([(b << 4) | a, (r << 4) | g])
    }
}

impl ToRgba for Rgba8888 {
    fn to_rgba(self) -> [u8; 4] {
        let [a, b, g, r] = self.0;
        [r, g, b, a]
    }
}

impl FromRgba for Rgba8888 {
    fn from_rgba(rgba: [u8; 4]) -> Self {
        let [r, g, b, a] = rgba;
        Self([a, b, g, r])
    }
}

impl ToRgba for L4 {
    fn to_rgba(self) -> [u8; 4] {
        let l = unorm4_to_unorm8(self.0);
        [l, l, l, 255u8]
    }
}

impl FromRgba for L4 {
    fn from_rgba(rgba: [u8; 4]) -> Self {
        Self(unorm8_to_unorm4(luma(rgba)))
    }
}

impl ToRgba for A4 {
    fn to_rgba(self) -> [u8; 4] {
        [255u8, 255u8, 255u8, unorm4_to_unorm8(self.0)]
    }
}

impl FromRgba for A4 {
    fn from_rgba(rgba: [u8; 4]) -> Self {
        Self(unorm8_to_unorm4(rgba[3]))
    }
}

fn decode<P: Pixel + ToRgba>(cell: u32) -> [u8; 4] {
    P::from_cell(cell).to_rgba()
}

fn encode<P: Pixel + FromRgba>(rgba: [u8; 4]) -> Vec<u8> {
    bytemuck::bytes_of(&P::from_rgba(rgba)).to_vec()
}

/// Decodes the raw value of a single pixel to RGBA8.
///
/// The `cell` contains the little endian bytes of the pixel.
/// For [ImageFormat::L4] and [ImageFormat::A4], the `cell` is a single 4 bit value.
pub fn decode_color(cell: u32, format: ImageFormat) -> Result<[u8; 4], SurfaceError> {
    use ImageFormat as F;
    match format {
        F::L8 => Ok(decode::<L8>(cell)),
        F::A8 => Ok(decode::<A8>(cell)),
        F::La4 => Ok(decode::<La4>(cell)),
        F::La8 => Ok(decode::<La8>(cell)),
        F::Hilo8 => Ok(decode::<Hilo8>(cell)),
        F::Rgb565 => Ok(decode::<Rgb565>(cell)),
        F::Rgb8 => Ok(decode::<Rgb8>(cell)),
        F::Rgba5551 => Ok(decode::<Rgba5551>(cell)),
        F::Rgba4444 => Ok(decode::<Rgba4444>(cell)),
        F::Rgba8888 => Ok(decode::<Rgba8888>(cell)),
        F::L4 => Ok(decode::<L4>(cell & 0xF)),
        F::A4 => Ok(decode::<A4>(cell & 0xF)),
        F::Etc1 | F::Etc1A4 => Err(SurfaceError::UnsupportedFormat { format }),
    }
}

/// Encodes a single RGBA8 pixel to the little endian bytes of `format`.
///
/// For [ImageFormat::L4] and [ImageFormat::A4], the result is a single byte
/// with the 4 bit value in the low nibble.
pub fn encode_cell(rgba: [u8; 4], format: ImageFormat) -> Result<Vec<u8>, SurfaceError> {
    use ImageFormat as F;
    match format {
        F::L8 => Ok(encode::<L8>(rgba)),
        F::A8 => Ok(encode::<A8>(rgba)),
        F::La4 => Ok(encode::<La4>(rgba)),
        F::La8 => Ok(encode::<La8>(rgba)),
        F::Hilo8 => Ok(encode::<Hilo8>(rgba)),
        F::Rgb565 => Ok(encode::<Rgb565>(rgba)),
        F::Rgb8 => Ok(encode::<Rgb8>(rgba)),
        F::Rgba5551 => Ok(encode::<Rgba5551>(rgba)),
        F::Rgba4444 => Ok(encode::<Rgba4444>(rgba)),
        F::Rgba8888 => Ok(encode::<Rgba8888>(rgba)),
        F::L4 => Ok(encode::<L4>(rgba)),
        F::A4 => Ok(encode::<A4>(rgba)),
        F::Etc1 | F::Etc1A4 => Err(SurfaceError::UnsupportedFormat { format }),
    }
}

/// Encodes a single RGBA8 pixel to a 4 bit value for [ImageFormat::L4] or [ImageFormat::A4].
pub(crate) fn encode_nibble(rgba: [u8; 4], format: ImageFormat) -> Result<u8, SurfaceError> {
    match format {
        ImageFormat::L4 => Ok(L4::from_rgba(rgba).0),
        ImageFormat::A4 => Ok(A4::from_rgba(rgba).0),
        _ => Err(SurfaceError::UnsupportedFormat { format }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(bytes: &[u8]) -> u32 {
        let mut cell = [0u8; 4];
        cell[..bytes.len()].copy_from_slice(bytes);
        u32::from_le_bytes(cell)
    }

    // A spread of colors touching every value of each channel.
    fn sample_colors() -> impl Iterator<Item = [u8; 4]> {
        (0..=255u8).flat_map(|v| {
            [
                [v, v, v, v],
                [v, 255 - v, v / 2, v ^ 0x5A],
                [v.wrapping_mul(7), v, 255 - v, 255],
                [0, v, 0, 0x80],
            ]
        })
    }

    fn round_trip(rgba: [u8; 4], format: ImageFormat) -> [u8; 4] {
        let bytes = encode_cell(rgba, format).unwrap();
        decode_color(cell(&bytes), format).unwrap()
    }

    #[test]
    fn decode_l8() {
        assert_eq!([255, 255, 255, 255], decode_color(0xFF, ImageFormat::L8).unwrap());
        assert_eq!([64, 64, 64, 255], decode_color(64, ImageFormat::L8).unwrap());
    }

    #[test]
    fn decode_a8() {
        assert_eq!([255, 255, 255, 64], decode_color(64, ImageFormat::A8).unwrap());
    }

    #[test]
    fn decode_la4_unscaled() {
        assert_eq!([0xF, 0xF, 0xF, 0x3], decode_color(0xF3, ImageFormat::La4).unwrap());
    }

    #[test]
    fn encode_la4_scaled() {
        assert_eq!(
            vec![0xF3],
            encode_cell([0xFF, 0, 0, 0x33], ImageFormat::La4).unwrap()
        );
    }

    #[test]
    fn la4_decoded_colors_encode_to_zero() {
        // Decoded nibbles are never rescaled, so they all fall below 17.
        let decoded = decode_color(0xFF, ImageFormat::La4).unwrap();
        assert_eq!(vec![0x00], encode_cell(decoded, ImageFormat::La4).unwrap());
    }

    #[test]
    fn decode_la8() {
        assert_eq!(
            [0x12, 0x12, 0x12, 0x34],
            decode_color(0x1234, ImageFormat::La8).unwrap()
        );
    }

    #[test]
    fn decode_hilo8() {
        assert_eq!(
            [0x12, 0x34, 255, 255],
            decode_color(0x1234, ImageFormat::Hilo8).unwrap()
        );
    }

    #[test]
    fn decode_rgb565() {
        assert_eq!([255, 252, 255, 255], decode_color(0xFFFF, ImageFormat::Rgb565).unwrap());
        assert_eq!([0x29, 0, 0, 255], decode_color(5 << 11, ImageFormat::Rgb565).unwrap());
        assert_eq!([0, 8, 0, 255], decode_color(2 << 5, ImageFormat::Rgb565).unwrap());
    }

    #[test]
    fn encode_rgb565() {
        assert_eq!(
            vec![0xFF, 0xFF],
            encode_cell([255, 255, 255, 255], ImageFormat::Rgb565).unwrap()
        );
        // Red rounds up to the next table entry.
        assert_eq!(
            (2u16 << 11).to_le_bytes().to_vec(),
            encode_cell([0x09, 0, 0, 255], ImageFormat::Rgb565).unwrap()
        );
    }

    #[test]
    fn decode_rgb8() {
        assert_eq!(
            [0x56, 0x34, 0x12, 255],
            decode_color(0x563412, ImageFormat::Rgb8).unwrap()
        );
    }

    #[test]
    fn encode_rgb8_bgr_order() {
        assert_eq!(
            vec![3, 2, 1],
            encode_cell([1, 2, 3, 4], ImageFormat::Rgb8).unwrap()
        );
    }

    #[test]
    fn decode_rgba5551() {
        assert_eq!([0, 0, 0, 0], decode_color(0x0000, ImageFormat::Rgba5551).unwrap());
        assert_eq!(
            [255, 255, 255, 255],
            decode_color(0xFFFF, ImageFormat::Rgba5551).unwrap()
        );
        assert_eq!([0, 0, 0, 255], decode_color(0x0001, ImageFormat::Rgba5551).unwrap());
    }

    #[test]
    fn encode_rgba5551_alpha_threshold() {
        assert_eq!(
            vec![0x00, 0x00],
            encode_cell([0, 0, 0, 0x80], ImageFormat::Rgba5551).unwrap()
        );
        assert_eq!(
            vec![0x01, 0x00],
            encode_cell([0, 0, 0, 0x81], ImageFormat::Rgba5551).unwrap()
        );
    }

    #[test]
    fn decode_rgba4444() {
        assert_eq!(
            [255, 255, 255, 255],
            decode_color(0xFFFF, ImageFormat::Rgba4444).unwrap()
        );
        assert_eq!(
            [0x11, 0x22, 0x33, 0x44],
            decode_color(0x1234, ImageFormat::Rgba4444).unwrap()
        );
    }

    #[test]
    fn decode_rgba8888() {
        assert_eq!(
            [0x12, 0x34, 0x56, 0x78],
            decode_color(0x12345678, ImageFormat::Rgba8888).unwrap()
        );
    }

    #[test]
    fn encode_rgba8888_abgr_order() {
        assert_eq!(
            vec![4, 3, 2, 1],
            encode_cell([1, 2, 3, 4], ImageFormat::Rgba8888).unwrap()
        );
    }

    #[test]
    fn decode_l4() {
        assert_eq!([0x88, 0x88, 0x88, 255], decode_color(0x8, ImageFormat::L4).unwrap());
    }

    #[test]
    fn decode_a4() {
        assert_eq!([255, 255, 255, 0xFF], decode_color(0xF, ImageFormat::A4).unwrap());
    }

    #[test]
    fn encode_l4_luma() {
        assert_eq!(vec![0xF], encode_cell([255, 255, 255, 0], ImageFormat::L4).unwrap());
        assert_eq!(vec![0x4], encode_cell([255, 0, 0, 255], ImageFormat::L4).unwrap());
    }

    #[test]
    fn lossless_formats_round_trip() {
        for format in [
            ImageFormat::Rgb8,
            ImageFormat::Rgba8888,
            ImageFormat::La8,
            ImageFormat::Hilo8,
        ] {
            let bits = format.bits_per_pixel();
            for value in [0u32, 1, 0x7F, 0x80, 0xFF, 0x1234, 0xABCD, 0x123456, 0xDEADBEEF] {
                let value = if bits == 32 {
                    value
                } else {
                    value & ((1 << bits) - 1)
                };
                let rgba = decode_color(value, format).unwrap();
                assert_eq!(rgba, round_trip(rgba, format), "{format:?} {value:x}");
                assert_eq!(
                    value,
                    cell(&encode_cell(rgba, format).unwrap()),
                    "{format:?}"
                );
            }
        }
    }

    #[test]
    fn lossless_formats_representable_colors() {
        for rgba in sample_colors() {
            let [r, g, b, a] = rgba;
            assert_eq!(rgba, round_trip(rgba, ImageFormat::Rgba8888));
            assert_eq!([r, g, b, 255], round_trip([r, g, b, 255], ImageFormat::Rgb8));
            assert_eq!([r, r, r, a], round_trip([r, r, r, a], ImageFormat::La8));
            assert_eq!([r, g, 255, 255], round_trip([r, g, 255, 255], ImageFormat::Hilo8));
        }
    }

    #[test]
    fn lossy_formats_idempotent() {
        for format in [
            ImageFormat::Rgb565,
            ImageFormat::Rgba5551,
            ImageFormat::Rgba4444,
            ImageFormat::L4,
            ImageFormat::A4,
            ImageFormat::L8,
            ImageFormat::A8,
        ] {
            for rgba in sample_colors() {
                let once = round_trip(rgba, format);
                assert_eq!(once, round_trip(once, format), "{format:?} {rgba:?}");
            }
        }
    }

    #[test]
    fn unsupported_formats() {
        for format in [ImageFormat::Etc1, ImageFormat::Etc1A4] {
            assert_eq!(
                Err(SurfaceError::UnsupportedFormat { format }),
                decode_color(0, format)
            );
            assert_eq!(
                Err(SurfaceError::UnsupportedFormat { format }),
                encode_cell([0; 4], format)
            );
        }
    }

    #[test]
    fn encode_nibble_requires_4bit_format() {
        assert_eq!(Ok(0xF), encode_nibble([0, 0, 0, 255], ImageFormat::A4));
        assert_eq!(
            Err(SurfaceError::UnsupportedFormat {
                format: ImageFormat::L8
            }),
            encode_nibble([0; 4], ImageFormat::L8)
        );
    }
}
