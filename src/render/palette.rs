//! Stable per-series colours.

use egui::Color32;

const PALETTE: [Color32; 8] = [
    Color32::from_rgb(0x7a, 0xa2, 0xf7),
    Color32::from_rgb(0x9e, 0xce, 0x6a),
    Color32::from_rgb(0xf7, 0x76, 0x8e),
    Color32::from_rgb(0xbb, 0x9a, 0xf7),
    Color32::from_rgb(0xe0, 0xaf, 0x68),
    Color32::from_rgb(0x73, 0xda, 0xca),
    Color32::from_rgb(0xf4, 0xb8, 0xe4),
    Color32::from_rgb(0xff, 0xd4, 0x79),
];

pub const AXIS: Color32 = Color32::from_rgb(0x3b, 0x42, 0x5e);
pub const LABEL: Color32 = Color32::from_rgb(0xa8, 0xb3, 0xcf);
pub const ACTIVE: Color32 = Color32::from_rgb(0x2e, 0x9e, 0x5b);
pub const INACTIVE: Color32 = Color32::from_rgb(0x8a, 0x2b, 0x36);

/// Colour of the series at `index`; wraps around the palette.
pub fn series_color(index: usize) -> Color32 {
    PALETTE[index % PALETTE.len()]
}
