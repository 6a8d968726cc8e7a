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

//! Turns an image into a small, bounded set of opaque color samples.
//!
//! Every image is resampled onto a fixed square grid regardless of its resolution, so sampling cost doesn't grow with
//! the image and fine detail is smoothed away in favor of stable dominant colors.

use crate::{
    color::Rgb,
    config::MIN_SAMPLE_ALPHA,
    error::{ExtractError, Result},
};
use image::{imageops, DynamicImage, GenericImageView, ImageBuffer, Pixel};
use std::path::Path;
use tracing::{debug, warn};

/// Resamples `image` onto an `edge` × `edge` grid and returns the color of every cell that is at least half opaque.
/// An image without pixels yields no samples.
pub fn sample_pixels<P>(image: &ImageBuffer<P, Vec<u8>>, edge: u32) -> Vec<Rgb>
where
    P: Pixel<Subpixel = u8> + 'static,
{
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        warn!(width, height, "image has no pixels to sample");
        return Vec::new();
    }

    let edge = edge.max(1);
    let grid = imageops::resize(image, edge, edge, imageops::FilterType::Triangle);

    let samples = grid
        .pixels()
        .filter_map(|pixel| {
            let image::Rgba([r, g, b, a]) = pixel.to_rgba();
            (a >= MIN_SAMPLE_ALPHA).then(|| Rgb::new(r, g, b))
        })
        .collect::<Vec<_>>();

    debug!(width, height, edge, samples = samples.len(), "sampled image");
    samples
}

pub fn sample_image(image: &DynamicImage, edge: u32) -> Vec<Rgb> {
    sample_pixels(&image.to_rgba8(), edge)
}

/// Decodes the image at `path` and samples it.
pub fn load_samples<T>(path: T, edge: u32) -> Result<Vec<Rgb>>
where
    T: AsRef<Path>,
{
    let image = image::open(path)?;
    sample_decoded(&image, edge)
}

/// Decodes an in-memory encoded image, guessing its format from its contents, and samples it.
pub fn load_samples_from_memory(bytes: &[u8], edge: u32) -> Result<Vec<Rgb>> {
    let image = image::load_from_memory(bytes)?;
    sample_decoded(&image, edge)
}

fn sample_decoded(image: &DynamicImage, edge: u32) -> Result<Vec<Rgb>> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(ExtractError::EmptyImage { width, height });
    }

    Ok(sample_image(image, edge))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{RgbImage, RgbaImage};

    #[test]
    fn sample_count_is_bounded_by_the_grid() {
        let image = RgbImage::from_pixel(640, 480, image::Rgb([10, 14, 39]));
        let samples = sample_pixels(&image, 50);

        assert_eq!(samples.len(), 50 * 50);
        assert!(samples.iter().all(|sample| *sample == Rgb::new(10, 14, 39)));
    }

    #[test]
    fn small_images_are_upsampled() {
        let image = RgbImage::from_pixel(3, 2, image::Rgb([200, 100, 0]));

        assert_eq!(sample_pixels(&image, 50).len(), 2500);
        assert_eq!(sample_pixels(&image, 0).len(), 1);
    }

    #[test]
    fn transparent_samples_are_dropped() {
        let image = RgbaImage::from_fn(100, 100, |x, _| {
            if x < 50 {
                image::Rgba([255, 0, 0, 0])
            } else {
                image::Rgba([0, 0, 255, 255])
            }
        });
        let samples = sample_pixels(&image, 50);

        assert!((1150..=1350).contains(&samples.len()), "{} samples", samples.len());

        let invisible = RgbaImage::from_pixel(100, 100, image::Rgba([255, 255, 255, 127]));
        assert!(sample_pixels(&invisible, 50).is_empty());
    }

    #[test]
    fn empty_image_yields_nothing() {
        let image = RgbImage::new(0, 0);
        assert!(sample_pixels(&image, 50).is_empty());
    }

    #[test]
    fn unloadable_inputs_are_errors() {
        assert!(matches!(
            load_samples("this/file/does/not/exist.png", 50),
            Err(ExtractError::ImageLoad { .. })
        ));
        assert!(matches!(
            load_samples_from_memory(b"definitely not an image", 50),
            Err(ExtractError::ImageLoad { .. })
        ));
    }

    #[test]
    fn decodes_encoded_images() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, image::Rgb([1, 2, 3])));
        let mut bytes = std::io::Cursor::new(Vec::new());
        image.write_to(&mut bytes, image::ImageOutputFormat::Png).unwrap();

        let samples = load_samples_from_memory(bytes.get_ref(), 10).unwrap();
        assert_eq!(samples.len(), 100);
        assert!(samples.iter().all(|sample| *sample == Rgb::new(1, 2, 3)));
    }
}
