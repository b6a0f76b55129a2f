// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Linear-space RGBA color.

use serde::{Deserialize, Serialize};

/// A color in linear RGB space with alpha.
///
/// Shading happens in linear space; the sRGB surface format takes care of
/// the final encoding. Colors authored as hex codes are sRGB and must be
/// converted with [`LinearRgba::from_srgb_hex`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearRgba {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl LinearRgba {
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Creates a color from linear components.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from a `0xRRGGBB` sRGB hex code.
    ///
    /// # Examples
    ///
    /// ```
    /// use boxfall_core::math::LinearRgba;
    /// assert_eq!(LinearRgba::from_srgb_hex(0x000000), LinearRgba::BLACK);
    /// assert!((LinearRgba::from_srgb_hex(0xffffff).g - 1.0).abs() < 1e-6);
    /// ```
    pub fn from_srgb_hex(hex: u32) -> Self {
        let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
        Self::new(channel(16), channel(8), channel(0), 1.0)
    }

    /// Returns the channels as an array.
    #[inline]
    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for LinearRgba {
    fn default() -> Self {
        Self::WHITE
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mid_grey_is_darker_in_linear_space() {
        let grey = LinearRgba::from_srgb_hex(0xaaaaaa);
        assert!(grey.r < 170.0 / 255.0);
        assert_relative_eq!(grey.r, grey.g);
        assert_relative_eq!(grey.g, grey.b);
    }

    #[test]
    fn test_channel_order() {
        let c = LinearRgba::from_srgb_hex(0xff0000);
        assert_relative_eq!(c.r, 1.0, epsilon = 1e-6);
        assert_relative_eq!(c.g, 0.0);
        assert_relative_eq!(c.b, 0.0);
    }
}
