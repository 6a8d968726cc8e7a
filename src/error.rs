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

//! Error types.
//!
//! Only the image loading boundary can fail. Everything past it degrades to documented defaults instead of returning
//! an error, so these types mostly show up in logs and in the lower-level sampling API.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExtractError>;

/// Failure to turn an image reference into color samples.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The image couldn't be opened or decoded.
    #[error("failed to load image: {source}")]
    ImageLoad {
        #[from]
        source: image::ImageError,
    },

    /// The image has no pixels to sample.
    #[error("image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    /// The background task running the extraction didn't complete.
    #[error("extraction task failed: {message}")]
    Task { message: String },
}

/// Failure to load a [`crate::ContrastConfig`] from a file.
#[cfg(feature = "cli")]
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Json(#[from] serde_json::Error),
}

/// A string that isn't a `#rrggbb` hex color or an `rgba(r, g, b, a)` function.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid color: {input:?}")]
pub struct ParseColorError {
    input: String,
}

impl ParseColorError {
    pub(crate) fn new(input: impl Into<String>) -> Self {
        Self { input: input.into() }
    }

    pub fn input(&self) -> &str {
        &self.input
    }
}
