// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod mock;

pub(crate) use mock::{MockFont, MockRasterizer, MockShaper};

use crate::{AtlasOptions, Font, FontGlyph};

pub(crate) type MockFontInstance = Font<MockRasterizer, MockShaper>;

/// Loads `font` at `size` points square with default options.
pub(crate) fn load(font: &MockFont, size: u32) -> MockFontInstance {
    load_with(
        &mut MockRasterizer::init_host(),
        font,
        size,
        &AtlasOptions::default(),
    )
}

pub(crate) fn load_with(
    rasterizer: &mut MockRasterizer,
    font: &MockFont,
    size: u32,
    options: &AtlasOptions,
) -> MockFontInstance {
    Font::load(
        rasterizer,
        &mut MockShaper::default(),
        font.data(),
        size,
        size,
        options,
    )
    .expect("mock font loads")
}

/// Top-left pixel of a glyph's bitmap, recovered from its texture coordinates.
pub(crate) fn bitmap_origin(glyph: &FontGlyph, side: u32) -> (u32, u32) {
    let side = side as f32;
    (
        (glyph.uv.u0 * side).round() as u32,
        (glyph.uv.v0 * side).round() as u32,
    )
}

pub(crate) fn utf16(text: &str) -> Vec<u16> {
    text.encode_utf16().collect()
}
