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

use crate::{
    color::Rgb,
    config::{DEFAULT_QUANTIZE_PRECISION, FALLBACK_COLOR},
    swatch::Swatch,
};
use std::collections::HashMap;

/// Groups samples into coarse RGB buckets and reports the most populated ones, most frequent first.
///
/// Each channel is integer-divided by the precision to find a sample's bucket, so with the default precision of 24 a
/// channel falls into one of 11 steps. The reported color of a bucket is the average of the samples in it rather than
/// the bucket's corner, which keeps it close to what the eye sees.
pub struct BucketQuantizer {
    samples: Vec<Rgb>,
    max_colors: usize,
    precision: u8,
}

#[derive(Debug, Default)]
struct Bucket {
    // insertion order, used to break ties between equally populated buckets
    first_seen: usize,
    count: u32,
    red_sum: u64,
    green_sum: u64,
    blue_sum: u64,
}

impl BucketQuantizer {
    /// `color_count` is the number of colors the caller wants. Twice as many candidates are kept so later selection
    /// steps have more to choose from.
    pub fn new(samples: Vec<Rgb>, color_count: usize) -> Self {
        Self {
            samples,
            max_colors: color_count.saturating_mul(2),
            precision: DEFAULT_QUANTIZE_PRECISION,
        }
    }

    pub fn precision(self, precision: u8) -> Self {
        Self {
            precision: precision.max(1),
            ..self
        }
    }

    /// Never empty: an empty sample set yields a single fallback swatch with zero population.
    pub fn get_quantized_colors(self) -> Vec<Swatch> {
        if self.samples.is_empty() {
            return vec![Swatch::new(FALLBACK_COLOR, 0)];
        }

        // accumulate a histogram of bucketed sample values along with the running channel sums
        let mut buckets: HashMap<(u8, u8, u8), Bucket> = HashMap::new();
        for (index, sample) in self.samples.iter().enumerate() {
            let bucket = buckets.entry(self.bucket_key(*sample)).or_insert_with(|| Bucket {
                first_seen: index,
                ..Bucket::default()
            });

            let (r, g, b) = sample.channels();
            bucket.count += 1;
            bucket.red_sum += u64::from(r);
            bucket.green_sum += u64::from(g);
            bucket.blue_sum += u64::from(b);
        }

        let mut buckets = buckets.into_values().collect::<Vec<_>>();
        buckets.sort_by(|lhs, rhs| {
            rhs.count
                .cmp(&lhs.count)
                .then_with(|| lhs.first_seen.cmp(&rhs.first_seen))
        });

        buckets
            .into_iter()
            .take(self.max_colors.max(1))
            .map(|bucket| bucket.average())
            .collect()
    }

    fn bucket_key(&self, sample: Rgb) -> (u8, u8, u8) {
        let (r, g, b) = sample.channels();
        (r / self.precision, g / self.precision, b / self.precision)
    }
}

impl Bucket {
    fn average(&self) -> Swatch {
        let count = f64::from(self.count);
        let mean = |sum: u64| (sum as f64 / count).round() as u8;

        Swatch::new(
            Rgb::new(mean(self.red_sum), mean(self.green_sum), mean(self.blue_sum)),
            self.count,
        )
    }
}

/// The dominant colors among `samples`, most frequent first. Returns at most `2 × color_count` colors and never an
/// empty list.
pub fn quantize_colors(samples: Vec<Rgb>, color_count: usize) -> Vec<Rgb> {
    BucketQuantizer::new(samples, color_count)
        .get_quantized_colors()
        .into_iter()
        .map(Swatch::rgb)
        .collect()
}
