// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Packed glyph atlases.
//!
//! An [`Atlas`] is a square RGBA image holding every glyph of one font instance. It is
//! produced once by [`AtlasBuilder`] and never modified afterwards.

mod builder;
pub mod packer;

pub use builder::{AtlasBuilder, GlyphTable};

/// Position of a padded glyph footprint in an atlas, in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AtlasSlot {
    /// Left edge of the footprint.
    pub x: u32,
    /// Top edge of the footprint.
    pub y: u32,
    /// Footprint width, including padding on both sides.
    pub width: u32,
    /// Footprint height, including padding on both sides.
    pub height: u32,
}

/// A square RGBA texture holding the glyphs of one font instance.
#[derive(Clone, PartialEq, Eq)]
pub struct Atlas {
    side: u32,
    pixels: Vec<[u8; 4]>,
}

impl core::fmt::Debug for Atlas {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Atlas")
            .field("width", &self.side)
            .field("height", &self.side)
            .finish_non_exhaustive()
    }
}

impl Atlas {
    /// Creates a transparent atlas.
    pub(crate) fn new(side: u32) -> Self {
        Self {
            side,
            pixels: vec![[0; 4]; side as usize * side as usize],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.side
    }

    /// Height in pixels. Always equal to the width.
    pub fn height(&self) -> u32 {
        self.side
    }

    /// Pixels in row-major order.
    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    /// Pixels as tightly packed RGBA bytes, ready for texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Returns the pixel at (`x`, `y`), or `None` if it is outside the atlas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.side || y >= self.side {
            return None;
        }
        self.pixels
            .get(y as usize * self.side as usize + x as usize)
            .copied()
    }

    pub(crate) fn put(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let index = y as usize * self.side as usize + x as usize;
        self.pixels[index] = rgba;
    }
}
