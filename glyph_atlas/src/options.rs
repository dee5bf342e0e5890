// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Options used when loading fonts and building their atlases.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AtlasOptions {
    /// Empty pixels added on every side of a glyph to prevent sampling bleed.
    ///
    /// The default value is 2.
    pub padding: u32,

    /// Side length the atlas sizing search starts from. The side doubles until every
    /// glyph fits.
    ///
    /// The default value is 128.
    pub initial_size: u32,

    /// Largest side length the sizing search may reach before giving up with
    /// [`ErrorKind::AtlasOverflow`](crate::ErrorKind::AtlasOverflow).
    ///
    /// The default value is 16384.
    pub max_size: u32,

    /// Resolution passed to the rasterizer when setting the character size.
    ///
    /// The default value is 72, which makes one point equal one pixel.
    pub dpi: u32,

    /// If true, glyphs are first rendered with subpixel (LCD) anti-aliasing and fall
    /// back to grayscale when the rasterizer does not support it.
    ///
    /// The default value is true.
    pub subpixel: bool,
}

impl Default for AtlasOptions {
    fn default() -> Self {
        Self {
            padding: 2,
            initial_size: 128,
            max_size: 16384,
            dpi: 72,
            subpixel: true,
        }
    }
}
