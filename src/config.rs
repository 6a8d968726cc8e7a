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

//! Tunable numbers behind palette generation.
//!
//! The constants here are product decisions rather than derived values. The hue bias against blue and the 0.6
//! dark/light threshold in particular are visual tuning, kept at their current values so existing themes don't shift.

use crate::color::Rgb;

/// Dominant color reported when an image yields no opaque samples.
pub const FALLBACK_COLOR: Rgb = Rgb::new(0x43, 0x38, 0xca);

/// Card surface the accent and primary text are checked against in dark mode.
pub const DARK_CARD_BASE: Rgb = Rgb::new(0x1e, 0x1e, 0x2e);
/// Card surface the accent and primary text are checked against in light mode.
pub const LIGHT_CARD_BASE: Rgb = Rgb::new(0xff, 0xff, 0xff);

/// Edge length of the square grid images are resampled to before sampling.
pub const DEFAULT_SAMPLE_EDGE: u32 = 50;
/// Samples with an alpha below this are dropped.
pub const MIN_SAMPLE_ALPHA: u8 = 128;

pub const DEFAULT_COLOR_COUNT: usize = 5;
/// Each channel is integer-divided by this to find a sample's bucket.
pub const DEFAULT_QUANTIZE_PRECISION: u8 = 24;

/// Primary colors darker than this luminance produce a dark palette. Deliberately above the 0.5 midpoint.
pub const DEFAULT_DARK_LUMINANCE_THRESHOLD: f64 = 0.6;
/// Background luminance below which the readable color search treats the background as dark.
pub const SEARCH_DARK_LUMINANCE_THRESHOLD: f64 = 0.5;

/// WCAG AAA for normal text.
pub const DEFAULT_TEXT_RATIO: f64 = 7.0;
/// WCAG AA for normal text.
pub const DEFAULT_BUTTON_RATIO: f64 = 4.5;
/// WCAG AA for large text and non-text elements.
pub const DEFAULT_ACCENT_RATIO: f64 = 3.0;

pub const SECONDARY_TEXT_ALPHA: f64 = 0.75;

/// Caller-tunable parameters for extraction and palette assembly.
///
/// The defaults are the documented values of the constants in this module.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct ContrastConfig {
    /// How many dominant colors to ask for. The quantizer returns up to twice this many candidates.
    pub color_count: usize,
    pub quantize_precision: u8,
    pub sample_edge: u32,
    pub dark_luminance_threshold: f64,
    /// Minimum contrast of the primary text against the card base.
    pub text_ratio: f64,
    /// Minimum contrast of the button text against the accent.
    pub button_ratio: f64,
    /// Minimum contrast of the accent against the card base.
    pub accent_ratio: f64,
}

impl Default for ContrastConfig {
    fn default() -> Self {
        Self {
            color_count: DEFAULT_COLOR_COUNT,
            quantize_precision: DEFAULT_QUANTIZE_PRECISION,
            sample_edge: DEFAULT_SAMPLE_EDGE,
            dark_luminance_threshold: DEFAULT_DARK_LUMINANCE_THRESHOLD,
            text_ratio: DEFAULT_TEXT_RATIO,
            button_ratio: DEFAULT_BUTTON_RATIO,
            accent_ratio: DEFAULT_ACCENT_RATIO,
        }
    }
}

#[cfg(feature = "cli")]
impl ContrastConfig {
    /// Load a configuration from a JSON file. Missing fields take their default values.
    pub fn from_json_file(path: &std::path::Path) -> Result<Self, crate::error::ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }
}
