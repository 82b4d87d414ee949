use std::fmt;
use std::str::FromStr;

use crate::config::ConfigError;

/// Thumb fill color.
#[derive(Debug, Clone, PartialEq)]
pub enum Color {
    Rgb { r: u8, g: u8, b: u8 },
    Rgba { r: u8, g: u8, b: u8, a: f32 },
    Oklch { l: f32, c: f32, h: f32, a: f32 },
}

/// Resolved 8-bit sRGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Color {
    /// `rgb(37, 99, 235)`
    fn default() -> Self {
        Self::rgb(37, 99, 235)
    }
}

impl Color {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb { r, g, b }
    }

    pub fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self::Rgba {
            r,
            g,
            b,
            a: a.clamp(0.0, 1.0),
        }
    }

    pub fn oklch(l: f32, c: f32, h: f32) -> Self {
        Self::Oklch { l, c, h, a: 1.0 }
    }

    pub fn oklcha(l: f32, c: f32, h: f32, a: f32) -> Self {
        Self::Oklch {
            l,
            c,
            h,
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Alpha channel in `[0, 1]`.
    pub fn alpha(&self) -> f32 {
        match self {
            Self::Rgb { .. } => 1.0,
            Self::Rgba { a, .. } | Self::Oklch { a, .. } => *a,
        }
    }

    pub fn to_css(&self) -> String {
        match self {
            Self::Rgb { r, g, b } => format!("rgb({r}, {g}, {b})"),
            Self::Rgba { r, g, b, a } => format!("rgba({r}, {g}, {b}, {a})"),
            Self::Oklch { l, c, h, a } => {
                if *a >= 1.0 {
                    format!("oklch({l} {c} {h})")
                } else {
                    format!("oklch({l} {c} {h} / {a})")
                }
            }
        }
    }

    pub fn to_rgb(&self) -> Rgb {
        match self {
            Self::Rgb { r, g, b } | Self::Rgba { r, g, b, .. } => Rgb::new(*r, *g, *b),
            Self::Oklch { l, c, h, .. } => oklch_to_rgb(*l, *c, *h),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl FromStr for Color {
    type Err = ConfigError;

    /// Parses `#rgb`, `#rrggbb`, `rgb(r, g, b)`, `rgba(r, g, b, a)` and
    /// `oklch(l c h [/ a])`. Whitespace inside and before the parentheses is
    /// tolerated (`rgb (37, 99, 235)`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || ConfigError::InvalidColor(s.to_string());

        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(invalid);
        }

        let (name, args) = split_function(s).ok_or_else(invalid)?;
        let parts: Vec<&str> = args
            .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();

        let color = match (name.as_str(), parts.as_slice()) {
            ("rgb", [r, g, b]) => Some(Color::rgb(channel(r)?, channel(g)?, channel(b)?)),
            ("rgb" | "rgba", [r, g, b, a]) => Some(Color::rgba(
                channel(r)?,
                channel(g)?,
                channel(b)?,
                unit(a)?,
            )),
            ("oklch", [l, c, h]) => Some(Color::oklch(unit(l)?, number(c)?, number(h)?)),
            ("oklch", [l, c, h, a]) => {
                Some(Color::oklcha(unit(l)?, number(c)?, number(h)?, unit(a)?))
            }
            _ => None,
        };

        color.ok_or_else(invalid)
    }
}

fn split_function(s: &str) -> Option<(String, &str)> {
    let open = s.find('(')?;
    let inner = s[open + 1..].strip_suffix(')')?;
    let name = s[..open].trim().to_ascii_lowercase();
    Some((name, inner))
}

fn parse_hex(hex: &str) -> Option<Color> {
    let digit = |i: usize| u8::from_str_radix(hex.get(i..i + 1)?, 16).ok();
    match hex.len() {
        3 => Some(Color::rgb(
            digit(0)? * 17,
            digit(1)? * 17,
            digit(2)? * 17,
        )),
        6 => {
            let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
            Some(Color::rgb(byte(0)?, byte(2)?, byte(4)?))
        }
        _ => None,
    }
}

fn channel(s: &str) -> Result<u8, ConfigError> {
    s.parse::<u8>()
        .map_err(|_| ConfigError::InvalidColor(s.to_string()))
}

fn number(s: &str) -> Result<f32, ConfigError> {
    s.parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ConfigError::InvalidColor(s.to_string()))
}

/// A `[0, 1]` value, also accepted as a percentage.
fn unit(s: &str) -> Result<f32, ConfigError> {
    match s.strip_suffix('%') {
        Some(pct) => number(pct).map(|v| v / 100.0),
        None => number(s),
    }
}

fn oklch_to_rgb(l: f32, c: f32, h: f32) -> Rgb {
    use palette::{Clamp, IntoColor, Oklch, Srgb};

    let oklch = Oklch::new(l, c, h);
    let srgb: Srgb = oklch.into_color();
    let (r, g, b) = srgb.clamp().into_format::<u8>().into_components();

    Rgb::new(r, g, b)
}
