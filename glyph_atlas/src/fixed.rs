// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversions for 26.6 fixed-point values.
//!
//! Rasterizers and shapers report metrics as integers scaled by 64. Face metrics are
//! truncated to whole pixels, while shaping advances and offsets keep their fraction.

/// Number of 26.6 units in one pixel.
pub const ONE_PIXEL: i64 = 64;

/// Converts a 26.6 value to whole pixels, truncating toward zero.
#[inline]
#[allow(clippy::cast_possible_truncation, reason = "clamped to the i32 range first")]
pub fn to_pixels(value: i64) -> i32 {
    // Clamp rather than wrap on corrupt records.
    (value / ONE_PIXEL).clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Converts a 26.6 value to fractional pixels.
#[inline]
pub fn to_pixels_f32(value: i32) -> f32 {
    value as f32 / 64.0
}

/// Converts fractional pixels to the nearest 26.6 value.
#[inline]
#[allow(
    clippy::cast_possible_truncation,
    reason = "pixel metrics are far inside the i64 range"
)]
pub fn from_pixels_f32(pixels: f32) -> i64 {
    (pixels * 64.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_of_640_is_ten_pixels() {
        assert_eq!(to_pixels_f32(640), 10.0, "640 / 64 must be exact");
    }

    #[test]
    fn fractional_advances_are_kept() {
        assert_eq!(to_pixels_f32(-96), -1.5, "negative fractions survive conversion");
        assert_eq!(to_pixels_f32(1), 1.0 / 64.0, "the smallest step is 1/64");
    }

    #[test]
    fn whole_pixel_conversion_truncates_toward_zero() {
        assert_eq!(to_pixels(1000), 15, "1000 / 64 = 15.625");
        assert_eq!(to_pixels(-449), -7, "descenders truncate toward zero");
        assert_eq!(to_pixels(i64::MAX), i32::MAX, "out-of-range values clamp");
    }

    #[test]
    fn pixels_round_to_nearest_unit() {
        assert_eq!(from_pixels_f32(12.0), 768, "whole pixels are exact");
        assert_eq!(from_pixels_f32(0.51 / 64.0), 1, "rounds to nearest");
    }
}
