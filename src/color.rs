// Copyright 2022 Spanfile
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Color representations and the conversions between them.
//!
//! Colors travel through the crate as [`Rgb`] values and are rendered as lowercase `#rrggbb` strings at the edges.
//! Hue-preserving adjustments happen in [`Hsl`], and readability is judged with the WCAG 2.0 relative luminance and
//! contrast ratio.

use crate::error::ParseColorError;
use palette::IntoColor;
use std::{fmt, str::FromStr};

type PaletteHsl = palette::Hsl<palette::encoding::Srgb, f64>;

/// Luminance returned for a hex string that can't be parsed.
const NEUTRAL_LUMINANCE: f64 = 0.5;

/// An opaque 8-bit sRGB color.
///
/// Formats as a lowercase `#rrggbb` string and parses from six hex digits with an optional leading `#`, in either
/// case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Rgb {
    red: u8,
    green: u8,
    blue: u8,
}

/// An [`Rgb`] color with an alpha channel, rendered as a CSS `rgba()` function when translucent.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Rgba {
    rgb: Rgb,
    alpha: f64,
}

/// A color in the HSL cylinder. Hue is in degrees within `[0, 360)`, saturation and lightness within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Builds a color from channels in `[0, 1]`, rounding to the nearest 8-bit value and clamping anything out of
    /// range.
    pub fn from_unit(red: f64, green: f64, blue: f64) -> Self {
        Self::new(unit_to_channel(red), unit_to_channel(green), unit_to_channel(blue))
    }

    pub fn red(self) -> u8 {
        self.red
    }

    pub fn green(self) -> u8 {
        self.green
    }

    pub fn blue(self) -> u8 {
        self.blue
    }

    pub fn channels(self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }

    pub fn to_hex(self) -> String {
        self.to_string()
    }

    /// The channels as a bare `r, g, b` list, for CSS functions that take the channels separately.
    pub fn channel_list(self) -> String {
        format!("{}, {}, {}", self.red, self.green, self.blue)
    }

    pub fn hsl(self) -> Hsl {
        rgb_to_hsl(self)
    }

    pub fn luminance(self) -> f64 {
        relative_luminance(self)
    }

    pub fn with_alpha(self, alpha: f64) -> Rgba {
        Rgba::new(self, alpha)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex_to_rgb(s).ok_or_else(|| ParseColorError::new(s))
    }
}

impl TryFrom<String> for Rgb {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_hex()
    }
}

impl Rgba {
    pub fn new(rgb: Rgb, alpha: f64) -> Self {
        Self {
            rgb,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    pub fn opaque(rgb: Rgb) -> Self {
        Self::new(rgb, 1.0)
    }

    pub fn rgb(self) -> Rgb {
        self.rgb
    }

    pub fn alpha(self) -> f64 {
        self.alpha
    }

    pub fn is_opaque(self) -> bool {
        self.alpha >= 1.0
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "{}", self.rgb)
        } else {
            write!(f, "rgba({}, {})", self.rgb.channel_list(), self.alpha)
        }
    }
}

impl FromStr for Rgba {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(rgb) = hex_to_rgb(s) {
            return Ok(Self::opaque(rgb));
        }

        // rgba(r, g, b, a)
        let inner = s
            .trim()
            .strip_prefix("rgba(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| ParseColorError::new(s))?;

        let parts = inner.split(',').map(str::trim).collect::<Vec<_>>();
        if let [red, green, blue, alpha] = parts[..] {
            let channel = |part: &str| part.parse::<u8>().map_err(|_| ParseColorError::new(s));
            let alpha = alpha.parse::<f64>().map_err(|_| ParseColorError::new(s))?;

            Ok(Self::new(Rgb::new(channel(red)?, channel(green)?, channel(blue)?), alpha))
        } else {
            Err(ParseColorError::new(s))
        }
    }
}

impl TryFrom<String> for Rgba {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_string()
    }
}

impl From<Rgb> for Rgba {
    fn from(rgb: Rgb) -> Self {
        Self::opaque(rgb)
    }
}

/// Parses exactly six hex digits with an optional leading `#`. Anything else yields `None`.
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);

    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Formats channels given on the 0-255 scale as `#rrggbb`, rounding and clamping each one first.
pub fn rgb_to_hex(red: f64, green: f64, blue: f64) -> String {
    Rgb::from_unit(red / 255.0, green / 255.0, blue / 255.0).to_hex()
}

pub fn rgb_to_hsl(color: Rgb) -> Hsl {
    let raw = palette::Srgb::from_components(color.channels());
    let raw_float: palette::Srgb<f64> = raw.into_format();
    let hsl: PaletteHsl = raw_float.into_color();
    let (hue, saturation, lightness) = hsl.into_components();

    Hsl {
        hue: hue.to_positive_degrees(),
        saturation,
        lightness,
    }
}

pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    // achromatic
    if hsl.saturation <= 0.0 {
        return Rgb::from_unit(hsl.lightness, hsl.lightness, hsl.lightness);
    }

    let hsl = PaletteHsl::new(
        hsl.hue,
        hsl.saturation.clamp(0.0, 1.0),
        hsl.lightness.clamp(0.0, 1.0),
    );
    let rgb: palette::Srgb<f64> = hsl.into_color();
    let (red, green, blue) = rgb.into_components();

    Rgb::from_unit(red, green, blue)
}

pub fn hsl_to_hex(hue: f64, saturation: f64, lightness: f64) -> String {
    hsl_to_rgb(Hsl {
        hue,
        saturation,
        lightness,
    })
    .to_hex()
}

/// Rebuilds a color after letting `adjust` rewrite its HSL components, e.g.
/// `adjust_hsl(color, |hsl| Hsl { lightness: 0.1, ..hsl })`.
pub fn adjust_hsl<F>(color: Rgb, adjust: F) -> Rgb
where
    F: FnOnce(Hsl) -> Hsl,
{
    hsl_to_rgb(adjust(rgb_to_hsl(color)))
}

/// WCAG 2.0 relative luminance in `[0, 1]`.
pub fn relative_luminance(color: Rgb) -> f64 {
    0.2126 * linearize(color.red) + 0.7152 * linearize(color.green) + 0.0722 * linearize(color.blue)
}

/// Relative luminance of a hex string. Malformed input is treated as a neutral mid-luminance color.
pub fn relative_luminance_hex(hex: &str) -> f64 {
    hex_to_rgb(hex).map_or(NEUTRAL_LUMINANCE, relative_luminance)
}

/// WCAG contrast ratio in `[1, 21]`. Symmetric in its arguments.
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    ratio_of_luminances(relative_luminance(a), relative_luminance(b))
}

pub fn contrast_ratio_hex(a: &str, b: &str) -> f64 {
    ratio_of_luminances(relative_luminance_hex(a), relative_luminance_hex(b))
}

fn ratio_of_luminances(a: f64, b: f64) -> f64 {
    let lighter = a.max(b);
    let darker = a.min(b);

    (lighter + 0.05) / (darker + 0.05)
}

fn linearize(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;

    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn unit_to_channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }

    (value * 255.0).round().clamp(0.0, 255.0) as u8
}
