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

//! Picks the "signature" color of an image among its dominant colors.

use crate::color::{Hsl, Rgb};
use std::ops::RangeInclusive;

/// Colors less saturated than this count as gray and are never picked.
pub const MIN_VIBRANT_SATURATION: f64 = 0.2;
/// Colors darker than this are penalized.
pub const MIN_VIBRANT_LIGHTNESS: f64 = 0.2;
/// Colors lighter than this are penalized.
pub const MAX_VIBRANT_LIGHTNESS: f64 = 0.85;
pub const EXTREME_LIGHTNESS_PENALTY: f64 = 0.5;

/// Hues considered blue. Blue is the fallback hue, so it gets no bonus.
pub const BLUE_HUES: RangeInclusive<f64> = 200.0..=260.0;
pub const NON_BLUE_BONUS: f64 = 1.2;

/// Scores a color by how usable it is as an accent. `None` means the color is too gray to consider at all.
pub fn vibrancy_score(hsl: Hsl) -> Option<f64> {
    if hsl.saturation < MIN_VIBRANT_SATURATION {
        return None;
    }

    let mut score = hsl.saturation;

    if hsl.lightness < MIN_VIBRANT_LIGHTNESS || hsl.lightness > MAX_VIBRANT_LIGHTNESS {
        score *= EXTREME_LIGHTNESS_PENALTY;
    }

    if !BLUE_HUES.contains(&hsl.hue) {
        score *= NON_BLUE_BONUS;
    }

    Some(score)
}

/// The highest scoring color among `colors`, or `None` if every one of them is too gray. The first color wins ties.
pub fn find_vibrant_color(colors: &[Rgb]) -> Option<Rgb> {
    let mut max_score = 0.0;
    let mut max_score_color = None;

    for color in colors.iter().copied() {
        if let Some(score) = vibrancy_score(color.hsl()) {
            if score > max_score {
                max_score = score;
                max_score_color = Some(color);
            }
        }
    }

    max_score_color
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hsl(hue: f64, saturation: f64, lightness: f64) -> Hsl {
        Hsl {
            hue,
            saturation,
            lightness,
        }
    }

    #[test]
    fn grays_are_rejected() {
        assert_eq!(vibrancy_score(hsl(30.0, 0.19, 0.5)), None);
        assert_eq!(find_vibrant_color(&[Rgb::new(128, 128, 128), Rgb::WHITE, Rgb::BLACK]), None);
    }

    #[test]
    fn scoring_rules() {
        let blue_mid = vibrancy_score(hsl(230.0, 0.5, 0.5)).unwrap();
        assert!((blue_mid - 0.5).abs() < 1e-9);

        let red_mid = vibrancy_score(hsl(0.0, 0.5, 0.5)).unwrap();
        assert!((red_mid - 0.6).abs() < 1e-9);

        let blue_dark = vibrancy_score(hsl(230.0, 0.5, 0.1)).unwrap();
        assert!((blue_dark - 0.25).abs() < 1e-9);

        let red_light = vibrancy_score(hsl(0.0, 0.5, 0.9)).unwrap();
        assert!((red_light - 0.3).abs() < 1e-9);
    }

    #[test]
    fn blue_band_is_inclusive() {
        assert!((vibrancy_score(hsl(200.0, 0.5, 0.5)).unwrap() - 0.5).abs() < 1e-9);
        assert!((vibrancy_score(hsl(260.0, 0.5, 0.5)).unwrap() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn prefers_saturated_non_blue() {
        let muted_green = Rgb::new(0x6b, 0x8e, 0x6b);
        let vivid_orange = Rgb::new(0xf9, 0x73, 0x16);
        let vivid_blue = Rgb::new(0x3b, 0x82, 0xf6);

        assert_eq!(
            find_vibrant_color(&[muted_green, vivid_blue, vivid_orange]),
            Some(vivid_orange)
        );
    }

    #[test]
    fn dark_navy_is_still_usable() {
        assert_eq!(
            find_vibrant_color(&[Rgb::new(0x0a, 0x0e, 0x27)]),
            Some(Rgb::new(0x0a, 0x0e, 0x27))
        );
    }
}
