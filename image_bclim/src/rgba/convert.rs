/// Expands a 5 bit channel to 8 bits.
///
/// Entries are strictly increasing, which [unorm8_to_unorm5] relies on.
pub const UNORM5_TO_UNORM8: [u8; 32] = [
    0x00, 0x08, 0x10, 0x18, 0x20, 0x29, 0x31, 0x39, 0x41, 0x4A, 0x52, 0x5A, 0x62, 0x6A, 0x73,
    0x7B, 0x83, 0x8B, 0x94, 0x9C, 0xA4, 0xAC, 0xB4, 0xBD, 0xC5, 0xCD, 0xD5, 0xDE, 0xE6, 0xEE,
    0xF6, 0xFF,
];

pub fn unorm5_to_unorm8(x: u8) -> u8 {
    UNORM5_TO_UNORM8[(x & 0x1F) as usize]
}

/// Finds the first table entry that is at least `x`.
///
/// This rounds up rather than to the nearest value.
/// For example, `0x09` maps to `2` (`0x10`) and not `1` (`0x08`).
pub fn unorm8_to_unorm5(x: u8) -> u8 {
    // The last entry is 0xFF, so every input has a match.
    UNORM5_TO_UNORM8.partition_point(|&v| v < x) as u8
}

pub fn unorm4_to_unorm8(x: u8) -> u8 {
    (x & 0xF) * 0x11
}

pub fn unorm8_to_unorm4(x: u8) -> u8 {
    x / 0x11
}

pub fn unorm6_to_unorm8(x: u8) -> u8 {
    (x & 0x3F) * 4
}

pub fn unorm8_to_unorm6(x: u8) -> u8 {
    x >> 2
}

/// Luminance using fixed point Rec. 601 weights.
pub fn luma(rgba: [u8; 4]) -> u8 {
    let [r, g, b, _] = rgba.map(u32::from);
    (((0x4CB2 * r + 0x9691 * g + 0x1D3E * b) >> 16) & 0xFF) as u8
}
