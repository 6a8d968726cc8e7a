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

//! A library to derive readable UI color palettes from a background image.
//!
//! Given an image, the library finds its dominant colors, picks the most vibrant of them as a signature accent and
//! synthesizes text, card and button colors that keep the accent's hue while meeting WCAG contrast ratios against the
//! surfaces they're drawn on. Generation never fails: images that can't be loaded or sampled produce a fixed default
//! palette instead.
//!
//! ```no_run
//! let result = contrastive::preload_and_extract("background.jpg");
//! println!("{}", result.palette.text_primary());
//! ```

pub mod color;
pub mod config;
mod contrast_palette;
pub mod error;
pub mod quantizer;
pub mod readable;
pub mod sampler;
mod swatch;
pub mod vibrancy;

pub use crate::{
    color::{contrast_ratio, hex_to_rgb, relative_luminance, Hsl, Rgb, Rgba},
    config::ContrastConfig,
    contrast_palette::{
        generate_contrast_palette, generate_contrast_palette_hex, generate_contrast_palette_with, ColorPalette,
    },
    error::{ExtractError, ParseColorError, Result},
    readable::synthesize,
    swatch::Swatch,
};
#[cfg(feature = "cli")]
pub use crate::error::ConfigError;
pub use image;
pub use palette;

use image::{ImageBuffer, Pixel};
use quantizer::BucketQuantizer;
use std::path::Path;
use tracing::warn;

/// Where the palette of a [`PaletteResult`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaletteSource {
    Extracted,
    Default,
}

/// The outcome of extracting a palette from an image.
///
/// `ready` is always set: from the caller's side the pipeline completed even when it had to fall back to the default
/// palette. `source` tells the two cases apart.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PaletteResult {
    pub palette: ColorPalette,
    pub ready: bool,
    pub source: PaletteSource,
}

impl PaletteResult {
    fn extracted(palette: ColorPalette) -> Self {
        Self {
            palette,
            ready: true,
            source: PaletteSource::Extracted,
        }
    }

    fn fallback() -> Self {
        Self {
            palette: ColorPalette::default_palette(),
            ready: true,
            source: PaletteSource::Default,
        }
    }
}

pub struct PaletteBuilder<P>
where
    P: Pixel<Subpixel = u8> + 'static,
{
    image: ImageBuffer<P, Vec<u8>>,
    config: ContrastConfig,
}

impl ColorPalette {
    pub fn from_image<P>(image: ImageBuffer<P, Vec<u8>>) -> PaletteBuilder<P>
    where
        P: Pixel<Subpixel = u8> + 'static,
    {
        PaletteBuilder::from_image(image)
    }
}

impl<P> PaletteBuilder<P>
where
    P: Pixel<Subpixel = u8> + 'static,
{
    pub fn from_image(image: ImageBuffer<P, Vec<u8>>) -> Self {
        Self {
            image,
            config: ContrastConfig::default(),
        }
    }

    pub fn config(self, config: ContrastConfig) -> Self {
        Self { config, ..self }
    }

    pub fn color_count(mut self, color_count: usize) -> Self {
        self.config.color_count = color_count;
        self
    }

    pub fn quantize_precision(mut self, quantize_precision: u8) -> Self {
        self.config.quantize_precision = quantize_precision;
        self
    }

    pub fn sample_edge(mut self, sample_edge: u32) -> Self {
        self.config.sample_edge = sample_edge;
        self
    }

    pub fn dark_luminance_threshold(mut self, threshold: f64) -> Self {
        self.config.dark_luminance_threshold = threshold;
        self
    }

    pub fn text_ratio(mut self, ratio: f64) -> Self {
        self.config.text_ratio = ratio;
        self
    }

    pub fn button_ratio(mut self, ratio: f64) -> Self {
        self.config.button_ratio = ratio;
        self
    }

    pub fn accent_ratio(mut self, ratio: f64) -> Self {
        self.config.accent_ratio = ratio;
        self
    }

    /// The image's dominant colors with their populations, most frequent first.
    pub fn swatches(&self) -> Vec<Swatch> {
        let samples = sampler::sample_pixels(&self.image, self.config.sample_edge);
        quantize(samples, &self.config)
    }

    pub fn dominant_colors(&self) -> Vec<Rgb> {
        self.swatches().into_iter().map(Swatch::rgb).collect()
    }

    pub fn generate(self) -> ColorPalette {
        generate_contrast_palette_with(&self.dominant_colors(), &self.config)
    }
}

/// Loads the image at `path` and returns its dominant colors, most frequent first.
///
/// The list is never empty for an image that loads: one without opaque pixels yields the single fallback color.
pub fn extract_dominant_colors<T>(path: T, config: &ContrastConfig) -> Result<Vec<Rgb>>
where
    T: AsRef<Path>,
{
    let samples = sampler::load_samples(path, config.sample_edge)?;
    Ok(quantize(samples, config).into_iter().map(Swatch::rgb).collect())
}

/// Extracts a palette from the image at `path` with the default configuration.
pub fn preload_and_extract<T>(path: T) -> PaletteResult
where
    T: AsRef<Path>,
{
    preload_and_extract_with(path, &ContrastConfig::default())
}

/// Extracts a palette from the image at `path`. Any failure to load the image produces the default palette.
pub fn preload_and_extract_with<T>(path: T, config: &ContrastConfig) -> PaletteResult
where
    T: AsRef<Path>,
{
    let path = path.as_ref();

    match extract_dominant_colors(path, config) {
        Ok(colors) => PaletteResult::extracted(generate_contrast_palette_with(&colors, config)),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "color extraction failed, using the default palette");
            PaletteResult::fallback()
        }
    }
}

/// [`preload_and_extract_with`] on tokio's blocking pool.
///
/// There's no internal timeout; wrap the future in `tokio::time::timeout` to bound it. Dropping the future doesn't
/// stop a decode that is already running.
#[cfg(feature = "tokio")]
pub async fn preload_and_extract_async<T>(path: T, config: ContrastConfig) -> PaletteResult
where
    T: AsRef<Path> + Send + 'static,
{
    match tokio::task::spawn_blocking(move || preload_and_extract_with(path, &config)).await {
        Ok(result) => result,
        Err(e) => {
            let e = ExtractError::Task { message: e.to_string() };
            warn!(error = %e, "color extraction task failed, using the default palette");
            PaletteResult::fallback()
        }
    }
}

fn quantize(samples: Vec<Rgb>, config: &ContrastConfig) -> Vec<Swatch> {
    if samples.is_empty() {
        warn!("image has no opaque samples, using the fallback color");
    }

    BucketQuantizer::new(samples, config.color_count)
        .precision(config.quantize_precision)
        .get_quantized_colors()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{RgbImage, RgbaImage};

    #[test]
    fn builder_generates_from_buffer() {
        let image = RgbImage::from_fn(120, 80, |x, y| {
            if (x + y) % 7 == 0 {
                image::Rgb([14, 18, 44])
            } else {
                image::Rgb([10, 14, 39])
            }
        });

        let palette = ColorPalette::from_image(image).color_count(3).generate();

        assert!(palette.is_dark());
        assert!(contrast_ratio(palette.text_primary(), config::DARK_CARD_BASE) >= 7.0);
    }

    #[test]
    fn builder_honors_config() {
        let image = RgbImage::from_pixel(10, 10, image::Rgb([0xe0, 0x7a, 0x5f]));
        let builder = PaletteBuilder::from_image(image).color_count(1).sample_edge(4);

        assert_eq!(builder.swatches(), vec![Swatch::new(Rgb::new(0xe0, 0x7a, 0x5f), 16)]);

        let strict = builder.text_ratio(4.5).generate();
        assert!(contrast_ratio(strict.text_primary(), config::DARK_CARD_BASE) >= 4.5);
    }

    #[test]
    fn builder_honors_button_ratio() {
        let navy = Rgb::new(0x1e, 0x3a, 0x8a);
        let image = || RgbImage::from_pixel(10, 10, image::Rgb([0x1e, 0x3a, 0x8a]));

        let strict = PaletteBuilder::from_image(image()).generate();
        let relaxed = PaletteBuilder::from_image(image()).button_ratio(2.0).generate();

        // the accent doesn't depend on the button ratio, only the button text does
        assert_eq!(strict.accent(), relaxed.accent());
        assert_eq!(strict.button_text(), synthesize(navy, strict.accent(), config::DEFAULT_BUTTON_RATIO));
        assert_eq!(relaxed.button_text(), synthesize(navy, relaxed.accent(), 2.0));
        assert_ne!(strict.button_text(), relaxed.button_text());
        assert!(contrast_ratio(relaxed.button_text(), relaxed.accent()) >= 2.0);
    }

    #[test]
    fn transparent_image_uses_fallback_color() {
        let image = RgbaImage::from_pixel(20, 20, image::Rgba([255, 0, 0, 0]));
        let builder = PaletteBuilder::from_image(image);

        assert_eq!(builder.dominant_colors(), vec![config::FALLBACK_COLOR]);

        // the fallback color still goes through assembly, so this isn't the default palette
        assert_ne!(builder.generate(), ColorPalette::default_palette());
    }

    #[test]
    fn missing_image_yields_default_palette() {
        let result = preload_and_extract("no/such/image.png");

        assert_eq!(
            result,
            PaletteResult {
                palette: ColorPalette::default_palette(),
                ready: true,
                source: PaletteSource::Default,
            }
        );
    }
}
