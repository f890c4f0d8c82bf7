//! Colour values and the cosine palette.

use crate::error::StyleError;
use serde::{Serialize, Serializer};
use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

/// Linear RGBA colour, each channel nominally in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Clamp every channel into [0, 1]. NaN channels become 0.
    pub fn clamped(self) -> Self {
        fn unit(c: f64) -> f64 {
            if c.is_nan() {
                0.0
            } else {
                c.clamp(0.0, 1.0)
            }
        }
        Self {
            r: unit(self.r),
            g: unit(self.g),
            b: unit(self.b),
            a: unit(self.a),
        }
    }

    /// Source-over composite onto `background`. The result is opaque.
    pub fn over(self, background: Color) -> Color {
        let a = self.a;
        Color::rgb(
            self.r * a + background.r * (1.0 - a),
            self.g * a + background.g * (1.0 - a),
            self.b * a + background.b * (1.0 - a),
        )
    }

    /// Quantise to 8-bit RGB.
    pub fn to_rgb8(self) -> [u8; 3] {
        let c = self.clamped();
        [
            (c.r * 255.0).round() as u8,
            (c.g * 255.0).round() as u8,
            (c.b * 255.0).round() as u8,
        ]
    }

    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

impl FromStr for Color {
    type Err = StyleError;

    /// Parse `#rrggbb` or `#rrggbbaa` (the leading `#` is optional).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if !(hex.len() == 6 || hex.len() == 8) || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(StyleError::InvalidColor(s.to_string()));
        }

        let channel = |i: usize| -> Result<f64, StyleError> {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map(|v| v as f64 / 255.0)
                .map_err(|_| StyleError::InvalidColor(s.to_string()))
        };

        let alpha = if hex.len() == 8 { channel(6)? } else { 1.0 };
        Ok(Color {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a: alpha,
        })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Cosine gradient `a + b * cos(2pi * (c * t + d))`, evaluated per channel.
///
/// See <https://iquilezles.org/articles/palettes/> for the family of
/// palettes this parameterisation covers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CosinePalette {
    pub a: [f64; 3],
    pub b: [f64; 3],
    pub c: [f64; 3],
    pub d: [f64; 3],
}

impl CosinePalette {
    /// Warm rainbow used by the cell style.
    pub const RAINBOW: CosinePalette = CosinePalette {
        a: [0.5, 0.5, 0.5],
        b: [0.5, 0.5, 0.5],
        c: [1.0, 1.0, 1.0],
        d: [1.0, 0.3, 0.5],
    };

    pub fn sample(&self, t: f64) -> Color {
        let ch = |i: usize| self.a[i] + self.b[i] * (TAU * (self.c[i] * t + self.d[i])).cos();
        Color::rgb(ch(0), ch(1), ch(2))
    }
}
