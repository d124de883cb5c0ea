//! Color values and the conversions the drawing tools rely on.
//!
//! A [`Color`] is an opaque RGB triple. Hex strings are the canonical text
//! form; HSL is used by the lighten and darken tools.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{GridError, GridResult};

/// An immutable RGB color, 0-255 per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Hue in degrees `[0, 360)`, saturation and lightness in percent `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Canonical lowercase `#rrggbb` form
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parses `#rrggbb`, `rrggbb` or the short `#rgb` form.
    pub fn parse_hex(input: &str) -> GridResult<Self> {
        let invalid = || GridError::InvalidColor(input.to_owned());
        let digits = input.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match digits.len() {
            6 => Ok(Self::rgb(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                // "#abc" is shorthand for "#aabbcc"
                let expand = |i: usize| channel(&digits[i..i + 1]).map(|v| v * 17);
                Ok(Self::rgb(expand(0)?, expand(1)?, expand(2)?))
            }
            _ => Err(invalid()),
        }
    }

    /// Parses a hex string or a CSS `rgb(r, g, b)` string.
    pub fn parse_css(input: &str) -> GridResult<Self> {
        let trimmed = input.trim();
        let Some(body) = trimmed
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        else {
            return Self::parse_hex(trimmed);
        };

        let channels: Vec<u8> = body
            .split(',')
            .map(|part| part.trim().parse::<u8>())
            .collect::<Result<_, _>>()
            .map_err(|_| GridError::InvalidColor(input.to_owned()))?;

        match channels.as_slice() {
            [r, g, b] => Ok(Self::rgb(*r, *g, *b)),
            _ => Err(GridError::InvalidColor(input.to_owned())),
        }
    }

    pub fn to_hsl(self) -> Hsl {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return Hsl { h: 0.0, s: 0.0, l: l * 100.0 };
        }

        let d = max - min;
        let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Hsl {
            h: (h * 60.0).rem_euclid(360.0),
            s: s * 100.0,
            l: l * 100.0,
        }
    }

    /// Builds a color from HSL, clamping each component to its legal range first.
    pub fn from_hsl(h: f64, s: f64, l: f64) -> Self {
        let h = if h.is_finite() { h.rem_euclid(360.0) } else { 0.0 };
        let s = s.clamp(0.0, 100.0) / 100.0;
        let l = l.clamp(0.0, 100.0) / 100.0;

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let h_prime = h / 60.0;
        let x = chroma * (1.0 - (h_prime % 2.0 - 1.0).abs());
        let (r1, g1, b1) = match h_prime as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = l - chroma / 2.0;
        let to_channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;

        Self::rgb(to_channel(r1), to_channel(g1), to_channel(b1))
    }

    /// Raises lightness by `percent` points. Pure white is returned as is.
    pub fn lighten(self, percent: f64) -> Self {
        if self == Self::WHITE {
            return self;
        }
        self.shift_lightness(percent)
    }

    /// Lowers lightness by `percent` points. Pure black is returned as is.
    pub fn darken(self, percent: f64) -> Self {
        if self == Self::BLACK {
            return self;
        }
        self.shift_lightness(-percent)
    }

    fn shift_lightness(self, delta: f64) -> Self {
        let hsl = self.to_hsl();
        Self::from_hsl(hsl.h, hsl.s, (hsl.l + delta).clamp(0.0, 100.0))
    }
}

/// Draws a color uniformly from the 24-bit RGB space.
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
    let [_, r, g, b] = rng.gen_range(0..=0x00ff_ffff_u32).to_be_bytes();
    Color::rgb(r, g, b)
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::str::FromStr for Color {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_css(s)
    }
}

impl TryFrom<String> for Color {
    type Error = GridError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_css(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}
