// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Normalized texture coordinates of a glyph within its atlas.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct UvRect {
    /// Left edge, in `[0, 1]`.
    pub u0: f32,
    /// Top edge, in `[0, 1]`.
    pub v0: f32,
    /// Right edge, in `[0, 1]`.
    pub u1: f32,
    /// Bottom edge, in `[0, 1]`.
    ///
    /// Extends one texel past the glyph's bitmap so the last row is not clipped when
    /// sampling.
    pub v1: f32,
}

impl UvRect {
    /// Computes the rectangle for a `width` x `height` bitmap whose top-left pixel is at
    /// (`x`, `y`) in an atlas with the given side length.
    pub fn for_bitmap(x: u32, y: u32, width: u32, height: u32, side: u32) -> Self {
        let side = side as f32;
        Self {
            u0: x as f32 / side,
            v0: y as f32 / side,
            u1: (x + width) as f32 / side,
            v1: (y + height + 1) as f32 / side,
        }
    }
}

/// A glyph stored in an atlas.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FontGlyph {
    /// Glyph index within the font.
    pub index: u32,
    /// Location of the bitmap in the atlas.
    pub uv: UvRect,
    /// Bitmap width in pixels.
    pub width: u32,
    /// Bitmap height in pixels.
    pub height: u32,
    /// Offset from the pen position to the left edge of the bitmap.
    pub bearing_x: i32,
    /// Offset from the baseline up to the top edge of the bitmap.
    pub bearing_y: i32,
}
