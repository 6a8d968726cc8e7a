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

//! Assembles a complete UI palette from an image's dominant colors.

use crate::{
    color::{adjust_hsl, Hsl, Rgb, Rgba},
    config::{ContrastConfig, DARK_CARD_BASE, LIGHT_CARD_BASE, SECONDARY_TEXT_ALPHA},
    readable::{ensure_contrast, synthesize},
    vibrancy::find_vibrant_color,
};
use tracing::debug;

/// Glass card overlay in dark mode, as color and alpha.
const DARK_GLASS: (Rgb, f64) = (Rgb::new(20, 20, 30), 0.6);
/// Glass card overlay in light mode, as color and alpha.
const LIGHT_GLASS: (Rgb, f64) = (Rgb::WHITE, 0.85);

/// Saturation and lightness of the solid card surface in dark mode. The hue comes from the image.
const DARK_SURFACE: (f64, f64) = (0.2, 0.1);
/// Saturation and lightness of the solid card surface in light mode.
const LIGHT_SURFACE: (f64, f64) = (0.1, 0.98);

/// The colors of a generated theme.
///
/// Every text color meets the contrast it was synthesized for against the surface it's drawn on: the primary text
/// against the card base, the button text against the accent. The only exception is when the search couldn't get
/// there and fell back to plain white or black.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorPalette {
    text_primary: Rgb,
    text_primary_rgb: String,
    text_secondary: Rgba,
    card_background: Rgba,
    card_background_solid: Rgb,
    accent: Rgb,
    accent_rgb: String,
    accent_text: Rgb,
    button_background: Rgb,
    button_text: Rgb,
    is_dark: bool,
}

impl ColorPalette {
    /// The fixed light palette used whenever nothing could be extracted.
    pub fn default_palette() -> Self {
        let text_primary = Rgb::new(0x1e, 0x29, 0x3b);
        let accent = Rgb::new(0x8b, 0x5c, 0xf6);

        Self {
            text_primary,
            text_primary_rgb: text_primary.channel_list(),
            text_secondary: Rgba::opaque(Rgb::new(0x64, 0x74, 0x8b)),
            card_background: Rgba::new(Rgb::WHITE, 0.95),
            card_background_solid: Rgb::WHITE,
            accent,
            accent_rgb: accent.channel_list(),
            accent_text: Rgb::WHITE,
            button_background: accent,
            button_text: Rgb::WHITE,
            is_dark: false,
        }
    }

    pub fn text_primary(&self) -> Rgb {
        self.text_primary
    }

    /// The primary text color's channels as `r, g, b`.
    pub fn text_primary_rgb(&self) -> &str {
        &self.text_primary_rgb
    }

    pub fn text_secondary(&self) -> Rgba {
        self.text_secondary
    }

    /// Translucent card surface for glass-style cards.
    pub fn card_background(&self) -> Rgba {
        self.card_background
    }

    pub fn card_background_solid(&self) -> Rgb {
        self.card_background_solid
    }

    pub fn accent(&self) -> Rgb {
        self.accent
    }

    /// The accent color's channels as `r, g, b`.
    pub fn accent_rgb(&self) -> &str {
        &self.accent_rgb
    }

    pub fn accent_text(&self) -> Rgb {
        self.accent_text
    }

    pub fn button_background(&self) -> Rgb {
        self.button_background
    }

    pub fn button_text(&self) -> Rgb {
        self.button_text
    }

    pub fn is_dark(&self) -> bool {
        self.is_dark
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::default_palette()
    }
}

/// Builds a palette from dominant colors ordered most frequent first, with the default thresholds.
pub fn generate_contrast_palette(dominant_colors: &[Rgb]) -> ColorPalette {
    generate_contrast_palette_with(dominant_colors, &ContrastConfig::default())
}

/// Builds a palette from dominant colors ordered most frequent first. An empty list yields
/// [`ColorPalette::default_palette`].
pub fn generate_contrast_palette_with(dominant_colors: &[Rgb], config: &ContrastConfig) -> ColorPalette {
    let primary = match dominant_colors.first() {
        Some(primary) => *primary,
        None => return ColorPalette::default_palette(),
    };

    let is_dark = primary.luminance() < config.dark_luminance_threshold;
    let card_base = if is_dark { DARK_CARD_BASE } else { LIGHT_CARD_BASE };

    // the accent has to stay visible on cards, and everything else is tinted from it
    let accent_seed = find_vibrant_color(dominant_colors).unwrap_or(primary);
    let accent = ensure_contrast(accent_seed, card_base, config.accent_ratio);
    let text_primary = synthesize(accent, card_base, config.text_ratio);

    // buttons are filled with the accent, so their text is checked against it
    let button_text = synthesize(primary, accent, config.button_ratio);

    let (saturation, lightness) = if is_dark { DARK_SURFACE } else { LIGHT_SURFACE };
    let (glass, glass_alpha) = if is_dark { DARK_GLASS } else { LIGHT_GLASS };
    let card_background_solid = adjust_hsl(primary, |hsl| Hsl {
        saturation,
        lightness,
        ..hsl
    });

    debug!(%primary, %accent_seed, %accent, %text_primary, is_dark, "generated contrast palette");

    ColorPalette {
        text_primary,
        text_primary_rgb: text_primary.channel_list(),
        text_secondary: text_primary.with_alpha(SECONDARY_TEXT_ALPHA),
        card_background: glass.with_alpha(glass_alpha),
        card_background_solid,
        accent,
        accent_rgb: accent.channel_list(),
        accent_text: button_text,
        button_background: accent,
        button_text,
        is_dark,
    }
}

/// [`generate_contrast_palette`] over hex strings. Strings that don't parse are skipped.
pub fn generate_contrast_palette_hex<S>(dominant_colors: &[S]) -> ColorPalette
where
    S: AsRef<str>,
{
    let colors = dominant_colors
        .iter()
        .filter_map(|hex| crate::color::hex_to_rgb(hex.as_ref()))
        .collect::<Vec<_>>();

    generate_contrast_palette(&colors)
}
