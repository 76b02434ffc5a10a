//! 24-bit RGB colors in their canonical `#RRGGBB` form.
use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Default per-channel spread used for decoy colors.
pub const DEFAULT_SPREAD: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("empty color string")]
    EmptyInput,
    #[error("color must start with '#'")]
    MissingHash,
    #[error("expected 6 hex digits, found {0}")]
    InvalidLength(usize),
    #[error("invalid hex digit in color")]
    InvalidHexChar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#RRGGBB` (hex digits in either case).
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        if hex.is_empty() {
            return Err(ColorParseError::EmptyInput);
        }
        let digits = hex.strip_prefix('#').ok_or(ColorParseError::MissingHash)?;
        if digits.len() != 6 {
            return Err(ColorParseError::InvalidLength(digits.len()));
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidHexChar);
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| ColorParseError::InvalidHexChar);
        Ok(Self {
            r: channel(&digits[0..2])?,
            g: channel(&digits[2..4])?,
            b: channel(&digits[4..6])?,
        })
    }

    /// Canonical 7-character form, e.g. `#4ECDC4`.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Shifts each channel by the given offset, clamping to 0..=255 and rounding.
    pub fn perturbed_by(&self, offsets: [f64; 3]) -> Self {
        let shift = |channel: u8, offset: f64| (f64::from(channel) + offset).clamp(0.0, 255.0).round() as u8;
        Self {
            r: shift(self.r, offsets[0]),
            g: shift(self.g, offsets[1]),
            b: shift(self.b, offsets[2]),
        }
    }

    /// A visually close decoy: every channel moves by a uniform draw from `[-spread, spread]`.
    /// A negative spread counts by magnitude; a non-finite one leaves the color as is.
    pub fn perturbed<R: Rng + ?Sized>(&self, rng: &mut R, spread: f64) -> Self {
        let spread = if spread.is_finite() { spread.abs() } else { 0.0 };
        let mut offset = || rng.random_range(-spread..=spread);
        let offsets = [offset(), offset(), offset()];
        self.perturbed_by(offsets)
    }
}

/// String-level decoy generation. A malformed `base` comes back unchanged.
pub fn similar_color<R: Rng + ?Sized>(base: &str, rng: &mut R) -> String {
    match Color::from_hex(base) {
        Ok(color) => color.perturbed(rng, DEFAULT_SPREAD).to_hex(),
        Err(err) => {
            tracing::warn!(%base, error = %err, "cannot perturb malformed color, keeping it");
            base.to_string()
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<Color> for ratatui::style::Color {
    fn from(color: Color) -> Self {
        ratatui::style::Color::Rgb(color.r, color.g, color.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Color::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn parses_and_prints_canonical_hex() {
        let color: Color = "#4ecdc4".parse().unwrap();
        assert_eq!(color, Color::rgb(0x4E, 0xCD, 0xC4));
        assert_eq!(color.to_string(), "#4ECDC4");
    }

    #[test]
    fn rejects_malformed_strings() {
        assert_eq!(Color::from_hex(""), Err(ColorParseError::EmptyInput));
        assert_eq!(Color::from_hex("4ECDC4"), Err(ColorParseError::MissingHash));
        assert_eq!(Color::from_hex("#4ECDC"), Err(ColorParseError::InvalidLength(5)));
        assert_eq!(Color::from_hex("#4ECDCZ"), Err(ColorParseError::InvalidHexChar));
        assert_eq!(Color::from_hex("#+1+2+3"), Err(ColorParseError::InvalidHexChar));
    }

    #[test]
    fn fixed_offsets_shift_each_channel() {
        let base = Color::from_hex("#4ECDC4").unwrap();
        assert_eq!(base.perturbed_by([10.0, -10.0, 0.0]).to_hex(), "#58C3C4");
    }

    #[test]
    fn offsets_clamp_at_channel_bounds() {
        let base = Color::rgb(250, 3, 128);
        assert_eq!(base.perturbed_by([9.6, -7.2, 0.4]), Color::rgb(255, 0, 128));
        assert_eq!(base.perturbed_by([-0.5, 0.5, 0.6]), Color::rgb(250, 4, 129));
    }

    #[test]
    fn perturbed_stays_within_spread() {
        let mut rng = StdRng::seed_from_u64(7);
        let base = Color::rgb(0, 128, 255);
        for _ in 0..500 {
            let decoy = base.perturbed(&mut rng, DEFAULT_SPREAD);
            assert!(decoy.r <= 10);
            assert!((118..=138).contains(&decoy.g));
            assert!(decoy.b >= 245);
        }
    }

    #[test]
    fn unusable_spreads_do_not_panic() {
        let mut rng = StdRng::seed_from_u64(3);
        let base = Color::rgb(100, 100, 100);
        for spread in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(base.perturbed(&mut rng, spread), base);
        }
        for _ in 0..100 {
            let decoy = base.perturbed(&mut rng, -4.0);
            assert!(decoy.r.abs_diff(100) <= 4 && decoy.g.abs_diff(100) <= 4 && decoy.b.abs_diff(100) <= 4);
        }
    }

    #[test]
    fn similar_color_always_yields_valid_hex() {
        let mut rng = StdRng::seed_from_u64(42);
        for base in ["#000000", "#FFFFFF", "#4ECDC4", "#d35400"] {
            for _ in 0..100 {
                let out = similar_color(base, &mut rng);
                assert_eq!(out.len(), 7);
                assert!(Color::from_hex(&out).is_ok(), "{out} is not a color");
            }
        }
    }

    #[test]
    fn similar_color_keeps_malformed_input() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(similar_color("teal", &mut rng), "teal");
        assert_eq!(similar_color("#12", &mut rng), "#12");
    }
}
