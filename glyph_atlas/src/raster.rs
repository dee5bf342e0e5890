// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-glyph access to rasterizer output with a single RGBA pixel accessor.

use crate::backend::{GlyphSlot, PixelMode, Rasterizer, RenderFailure, RenderMode};
use crate::native::{GlyphMetrics, RecordLayout};
use crate::Error;

/// Bitmap lefts above this value are an unsigned wraparound, not a real bearing.
const BEARING_SENTINEL: i64 = 10_000;

/// A rendered glyph whose pixels are borrowed from the rasterizer's slot.
///
/// Dimensions are visible pixels: for [`PixelMode::Lcd`] the raw rows are three times
/// wider than [`width`](Self::width).
#[derive(Copy, Clone, Debug)]
pub struct RasterGlyph<'a> {
    index: u32,
    width: u32,
    height: u32,
    bearing_x: i32,
    bearing_y: i32,
    format: PixelMode,
    pitch: usize,
    pixels: &'a [u8],
}

impl<'a> RasterGlyph<'a> {
    /// Validates a rasterizer slot and wraps it.
    ///
    /// `layout` is used to read the slot's glyph metrics record when the bearing needs
    /// correcting.
    pub fn from_slot(index: u32, slot: GlyphSlot<'a>, layout: RecordLayout) -> Result<Self, Error> {
        let format = slot.pixel_mode;
        let width = match format {
            PixelMode::Lcd => slot.width / 3,
            PixelMode::Gray | PixelMode::Bgra => slot.width,
        };
        let height = slot.rows;
        let row_bytes = width as usize * format.bytes_per_pixel();
        if width > 0 && height > 0 {
            let needed = (height as usize - 1) * slot.pitch + row_bytes;
            if slot.pitch < row_bytes || slot.buffer.len() < needed {
                return Err(Error::glyph_raster(index, "bitmap buffer too small"));
            }
        }
        let bearing_x = if slot.bitmap_left > BEARING_SENTINEL {
            let metrics = GlyphMetrics::decode(slot.metrics, layout).map_err(|e| e.with_glyph(index))?;
            let corrected = corrected_bearing_x(metrics.hori_bearing_x);
            log::warn!(
                "glyph {index}: bitmap left {} looks wrapped, using {corrected}",
                slot.bitmap_left
            );
            corrected
        } else {
            i32::try_from(slot.bitmap_left).unwrap_or(i32::MIN)
        };
        Ok(Self {
            index,
            width,
            height,
            bearing_x,
            bearing_y: slot.bitmap_top,
            format,
            pitch: slot.pitch,
            pixels: slot.buffer,
        })
    }

    /// Glyph index within the font.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Visible width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Offset from the pen position to the bitmap's left edge.
    pub fn bearing_x(&self) -> i32 {
        self.bearing_x
    }

    /// Offset from the baseline up to the bitmap's top edge.
    pub fn bearing_y(&self) -> i32 {
        self.bearing_y
    }

    /// Pixel layout of the borrowed rows.
    pub fn format(&self) -> PixelMode {
        self.format
    }

    /// Reads the pixel at (`x`, `y`) as straight RGBA.
    ///
    /// Gray coverage is replicated to all color channels, LCD triples map to R, G and B,
    /// and BGRA is reordered. Gray and LCD pixels are opaque.
    ///
    /// # Panics
    ///
    /// Panics if (`x`, `y`) is outside the glyph.
    pub fn read_pixel(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} glyph",
            self.width,
            self.height
        );
        let start = y as usize * self.pitch + x as usize * self.format.bytes_per_pixel();
        let px = &self.pixels[start..start + self.format.bytes_per_pixel()];
        match self.format {
            PixelMode::Gray => [px[0], px[0], px[0], 255],
            PixelMode::Lcd => [px[0], px[1], px[2], 255],
            PixelMode::Bgra => [px[2], px[1], px[0], px[3]],
        }
    }
}

/// Replacement left bearing for a wrapped bitmap left, computed from the glyph's
/// horizontal bearing in 26.6.
#[allow(clippy::cast_possible_truncation, reason = "clamped to the i32 range first")]
fn corrected_bearing_x(hori_bearing_x: i64) -> i32 {
    let value = i64::from(u32::MAX / 64) - hori_bearing_x / 64;
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Renders glyphs of one face and hands each to a consumer while the slot is live.
pub struct GlyphRasterSource<'r, R: Rasterizer> {
    rasterizer: &'r mut R,
    face: &'r R::Face,
    subpixel: bool,
    layout: RecordLayout,
}

impl<R: Rasterizer> core::fmt::Debug for GlyphRasterSource<'_, R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GlyphRasterSource")
            .field("subpixel", &self.subpixel)
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

impl<'r, R: Rasterizer> GlyphRasterSource<'r, R> {
    /// Creates a source over `face`. With `subpixel`, LCD rendering is requested first.
    pub fn new(rasterizer: &'r mut R, face: &'r R::Face, subpixel: bool) -> Self {
        let layout = rasterizer.record_layout();
        Self {
            rasterizer,
            face,
            subpixel,
            layout,
        }
    }

    /// Renders glyph `index` and passes it to `consume`.
    ///
    /// The glyph's pixels live in the rasterizer's slot and are only valid inside
    /// `consume`; anything that must outlive the call has to be copied out.
    pub fn with_glyph<T>(
        &mut self,
        index: u32,
        consume: impl FnOnce(&RasterGlyph<'_>) -> T,
    ) -> Result<T, Error> {
        let layout = self.layout;
        if self.subpixel {
            match self.rasterizer.render_glyph(self.face, index, RenderMode::Lcd) {
                Ok(slot) => return Ok(consume(&RasterGlyph::from_slot(index, slot, layout)?)),
                Err(RenderFailure::Unsupported) => {
                    log::trace!("glyph {index}: subpixel rendering unavailable, using grayscale");
                }
                Err(RenderFailure::Failed) => {
                    return Err(Error::glyph_raster(index, "render glyph"));
                }
            }
        }
        let slot = self
            .rasterizer
            .render_glyph(self.face, index, RenderMode::Normal)
            .map_err(|_| Error::glyph_raster(index, "render glyph"))?;
        Ok(consume(&RasterGlyph::from_slot(index, slot, layout)?))
    }
}
