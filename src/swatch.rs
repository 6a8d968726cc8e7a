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

use crate::color::{Hsl, Rgb};

/// A dominant color found in an image, with the number of samples that were averaged into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Swatch {
    color: Rgb,
    population: u32,
}

impl Swatch {
    pub fn new(color: Rgb, population: u32) -> Swatch {
        Self { color, population }
    }

    pub fn rgb(self) -> Rgb {
        self.color
    }

    pub fn hsl(self) -> Hsl {
        self.color.hsl()
    }

    pub fn hex(self) -> String {
        self.color.to_hex()
    }

    /// Number of samples in the swatch. Zero for the fallback swatch of an image with no usable samples.
    pub fn population(self) -> u32 {
        self.population
    }
}
