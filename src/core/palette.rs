use rand::seq::IndexedRandom;
use rand::Rng;

use super::color::Color;

/// The fixed set targets and filler options are drawn from.
pub const PALETTE: [Color; 18] = [
    Color::rgb(0xFF, 0x6B, 0x6B),
    Color::rgb(0x4E, 0xCD, 0xC4),
    Color::rgb(0x45, 0xB7, 0xD1),
    Color::rgb(0x96, 0xCE, 0xB4),
    Color::rgb(0xFF, 0xEE, 0xAD),
    Color::rgb(0xD4, 0xA5, 0xA5),
    Color::rgb(0x9B, 0x59, 0xB6),
    Color::rgb(0x34, 0x98, 0xDB),
    Color::rgb(0xE7, 0x4C, 0x3C),
    Color::rgb(0x2E, 0xCC, 0x71),
    Color::rgb(0xF1, 0xC4, 0x0F),
    Color::rgb(0x1A, 0xBC, 0x9C),
    Color::rgb(0xE6, 0x7E, 0x22),
    Color::rgb(0x95, 0xA5, 0xA6),
    Color::rgb(0xD3, 0x54, 0x00),
    Color::rgb(0x27, 0xAE, 0x60),
    Color::rgb(0x8E, 0x44, 0xAD),
    Color::rgb(0x29, 0x80, 0xB9),
];

pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
    // PALETTE is non-empty, so choose always yields a value
    *PALETTE.choose(rng).unwrap_or(&PALETTE[0])
}
