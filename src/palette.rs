//! Piece colours
//!
//! Only the first nine tiers have a dedicated colour; larger pieces share
//! the fallback blue.

/// Colour for sizes without a table entry
pub const DEFAULT_COLOR: u32 = 0x0000ff;

const SIZE_COLORS: [(u32, u32); 9] = [
    (20, 0x3498db),
    (30, 0x2ecc71),
    (40, 0xe67e22),
    (50, 0xe74c3c),
    (60, 0x9b59b6),
    (70, 0xf1c40f),
    (80, 0x1abc9c),
    (90, 0x34495e),
    (100, 0xe84393),
];

/// RGB colour (0xRRGGBB) for a piece size
pub fn color_for_size(size: u32) -> u32 {
    SIZE_COLORS
        .iter()
        .find(|(s, _)| *s == size)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_COLOR)
}

/// CSS hex string (`#rrggbb`) for canvas fill/stroke styles
pub fn css_hex(color: u32) -> String {
    format!("#{:06x}", color & 0x00ff_ffff)
}
