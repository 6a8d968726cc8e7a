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

//! Hue-preserving search for a readable variant of a color.
//!
//! The search holds the source hue fixed and walks lightness in fixed steps away from the background, raising
//! saturation to a floor so the result still reads as a color instead of a pastel or a gray. It returns the first
//! candidate that reaches the requested contrast. When nothing does, it falls back to the best candidate if that at
//! least reaches the large-text floor, and to plain white or black otherwise.

use crate::{
    color::{contrast_ratio, hex_to_rgb, hsl_to_rgb, relative_luminance, Hsl, Rgb},
    config::SEARCH_DARK_LUMINANCE_THRESHOLD,
};
use tracing::trace;

pub const SEARCH_STEPS: usize = 20;
pub const LIGHTNESS_STEP: f64 = 0.05;
pub const MIN_SEARCH_LIGHTNESS: f64 = 0.02;
pub const MAX_SEARCH_LIGHTNESS: f64 = 0.98;
/// Search starting lightness, unless the source is already on the correct side of it.
pub const START_LIGHTNESS: f64 = 0.5;

/// Sources less saturated than this are treated as intentionally gray and keep their saturation.
pub const GRAY_SOURCE_SATURATION: f64 = 0.1;
pub const DARK_BACKGROUND_SATURATION_FLOOR: f64 = 0.6;
pub const LIGHT_BACKGROUND_SATURATION_FLOOR: f64 = 0.8;

/// The best unsuccessful candidate is still used if it reaches this ratio, the WCAG floor for large text.
pub const BEST_EFFORT_RATIO: f64 = 3.0;

/// Stands in for a hex string that can't be parsed.
const NEUTRAL_COLOR: Rgb = Rgb::new(0x80, 0x80, 0x80);

/// How a synthesized color was arrived at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The color meets the requested ratio.
    Met,
    /// No candidate met the requested ratio; this is the best one, which still reaches [`BEST_EFFORT_RATIO`].
    BestEffort,
    /// Not even [`BEST_EFFORT_RATIO`] was reachable; this is white on a dark background or black on a light one.
    LastResort,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Synthesized {
    pub color: Rgb,
    pub ratio: f64,
    pub outcome: Outcome,
}

/// A color with `source`'s hue that reaches `min_ratio` contrast against `background` whenever the search can find
/// one. See [`synthesize_detailed`] for how the fallbacks are chosen.
pub fn synthesize(source: Rgb, background: Rgb, min_ratio: f64) -> Rgb {
    synthesize_detailed(source, background, min_ratio).color
}

/// [`synthesize`] over hex strings. Malformed input stands for a neutral mid-gray.
pub fn synthesize_hex(source: &str, background: &str, min_ratio: f64) -> String {
    let source = hex_to_rgb(source).unwrap_or(NEUTRAL_COLOR);
    let background = hex_to_rgb(background).unwrap_or(NEUTRAL_COLOR);

    synthesize(source, background, min_ratio).to_hex()
}

/// Keeps `color` visible against `background`. The same search as [`synthesize`], named for its use with the lower
/// non-text ratios.
pub fn ensure_contrast(color: Rgb, background: Rgb, min_ratio: f64) -> Rgb {
    synthesize(color, background, min_ratio)
}

pub fn synthesize_detailed(source: Rgb, background: Rgb, min_ratio: f64) -> Synthesized {
    let background_is_dark = relative_luminance(background) < SEARCH_DARK_LUMINANCE_THRESHOLD;
    let source_hsl = source.hsl();

    // bright text on a dark surface, dark text on a light one
    let (step, mut lightness) = if background_is_dark {
        (LIGHTNESS_STEP, source_hsl.lightness.max(START_LIGHTNESS))
    } else {
        (-LIGHTNESS_STEP, source_hsl.lightness.min(START_LIGHTNESS))
    };

    let saturation = saturation_floor(source_hsl.saturation, background_is_dark);

    let mut best: Option<(Rgb, f64)> = None;

    for _ in 0..SEARCH_STEPS {
        let candidate = hsl_to_rgb(Hsl {
            hue: source_hsl.hue,
            saturation,
            lightness,
        });
        let ratio = contrast_ratio(candidate, background);
        trace!(%candidate, lightness, ratio, "readable color candidate");

        if ratio >= min_ratio {
            return Synthesized {
                color: candidate,
                ratio,
                outcome: Outcome::Met,
            };
        }

        if best.map_or(true, |(_, best_ratio)| ratio > best_ratio) {
            best = Some((candidate, ratio));
        }

        lightness += step;

        if !(MIN_SEARCH_LIGHTNESS..=MAX_SEARCH_LIGHTNESS).contains(&lightness) {
            break;
        }
    }

    match best {
        Some((color, ratio)) if ratio >= BEST_EFFORT_RATIO => Synthesized {
            color,
            ratio,
            outcome: Outcome::BestEffort,
        },
        _ => {
            let color = if background_is_dark { Rgb::WHITE } else { Rgb::BLACK };

            Synthesized {
                color,
                ratio: contrast_ratio(color, background),
                outcome: Outcome::LastResort,
            }
        }
    }
}

/// Raise saturation to the floor for the background, never lowering it. Near-gray sources are left alone.
fn saturation_floor(saturation: f64, background_is_dark: bool) -> f64 {
    if saturation < GRAY_SOURCE_SATURATION {
        return saturation;
    }

    let floor = if background_is_dark {
        DARK_BACKGROUND_SATURATION_FLOOR
    } else {
        LIGHT_BACKGROUND_SATURATION_FLOOR
    };

    saturation.max(floor)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DARK_CARD: Rgb = Rgb::new(0x1e, 0x1e, 0x2e);
    const VIOLET: Rgb = Rgb::new(0x8b, 0x5c, 0xf6);

    fn hue_distance(a: f64, b: f64) -> f64 {
        let d = (a - b).abs() % 360.0;
        d.min(360.0 - d)
    }

    #[test]
    fn lightens_on_dark_background() {
        let result = synthesize_detailed(VIOLET, DARK_CARD, 7.0);

        assert_eq!(result.outcome, Outcome::Met);
        assert!(result.ratio >= 7.0);
        assert!(result.color.hsl().lightness > VIOLET.hsl().lightness);
        assert!(hue_distance(result.color.hsl().hue, VIOLET.hsl().hue) < 3.0);
    }

    #[test]
    fn darkens_on_light_background() {
        let result = synthesize_detailed(VIOLET, Rgb::WHITE, 7.0);

        assert_eq!(result.outcome, Outcome::Met);
        assert!(contrast_ratio(result.color, Rgb::WHITE) >= 7.0);
        assert!(result.color.hsl().lightness < VIOLET.hsl().lightness);
        assert!(result.color.hsl().saturation >= 0.75);
    }

    #[test]
    fn already_readable_source_is_kept_close() {
        // the search starts from the source's own lightness when it's already on the right side
        let pale = Rgb::new(0xee, 0xee, 0xff);
        let result = synthesize(pale, DARK_CARD, 4.5);

        assert!(contrast_ratio(result, DARK_CARD) >= 4.5);
        assert!(result.hsl().lightness >= pale.hsl().lightness - 0.01);
    }

    #[test]
    fn gray_source_stays_gray() {
        let result = synthesize(Rgb::new(0x80, 0x80, 0x80), Rgb::WHITE, 4.5);

        assert_eq!(result, Rgb::new(0x73, 0x73, 0x73));
        assert!(contrast_ratio(result, Rgb::WHITE) >= 4.5);
    }

    #[test]
    fn unreachable_ratio_falls_back_to_white() {
        // just below the search's dark threshold, so white is the only direction and it can't reach 3:1
        let background = Rgb::new(0xbb, 0xbb, 0xbb);
        let result = synthesize_detailed(Rgb::new(0x12, 0x34, 0x56), background, 4.5);

        assert_eq!(result.outcome, Outcome::LastResort);
        assert_eq!(result.color, Rgb::WHITE);
    }

    #[test]
    fn best_effort_on_light_background_is_dark() {
        let background = Rgb::new(0xc0, 0xc0, 0xc0);
        let result = synthesize_detailed(Rgb::new(0x12, 0x34, 0x56), background, 21.0);

        assert_eq!(result.outcome, Outcome::BestEffort);
        assert!(result.ratio >= BEST_EFFORT_RATIO && result.ratio < 21.0);
        assert!(result.color.luminance() < 0.05);
    }

    #[test]
    fn best_effort_when_ratio_is_out_of_reach() {
        let result = synthesize_detailed(Rgb::new(0x80, 0x80, 0x80), Rgb::new(0x77, 0x77, 0x77), 21.0);

        assert_eq!(result.outcome, Outcome::BestEffort);
        assert_eq!(result.color, Rgb::new(0xf3, 0xf3, 0xf3));
    }

    #[test]
    fn meets_text_ratio_on_both_card_bases_across_hues() {
        for hue in (0..360).step_by(15) {
            let source = hsl_to_rgb(Hsl {
                hue: f64::from(hue),
                saturation: 0.7,
                lightness: 0.5,
            });

            for background in [DARK_CARD, Rgb::WHITE] {
                let result = synthesize_detailed(source, background, 7.0);

                assert_eq!(result.outcome, Outcome::Met, "hue {hue} on {background}");
                assert!(result.ratio >= 7.0);
            }
        }
    }

    #[test]
    fn hex_entry_point_tolerates_garbage() {
        let result = synthesize_hex("nope", "#ffffff", 4.5);

        assert!(crate::color::contrast_ratio_hex(&result, "#ffffff") >= 4.5);
        assert_eq!(synthesize_hex("#8B5CF6", "#1E1E2E", 7.0), synthesize(VIOLET, DARK_CARD, 7.0).to_hex());
    }
}
