// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`Rasterizer`] built on swash's scaler.
//!
//! Glyphs are rendered from their outlines. The rendered image is rewritten into the
//! slot layout the rest of the crate expects: coverage masks stay one byte per pixel,
//! subpixel masks become R, G, B triples and color images become BGRA.

use core::fmt;

use ::swash::scale::image::Content;
use ::swash::scale::{Render, ScaleContext, Source};
use ::swash::zeno::Format;
use ::swash::FontRef;

use crate::backend::{GlyphSlot, PixelMode, RasterFace, Rasterizer, RenderFailure, RenderMode};
use crate::fixed::{from_pixels_f32, ONE_PIXEL};
use crate::native::{GlyphMetrics, Record, RecordLayout, SizeMetrics};
use crate::{Error, FontData};

/// A face loaded by [`SwashRasterizer`].
#[derive(Clone)]
pub struct SwashFace {
    data: FontData,
    index: u32,
    glyph_count: u32,
    ppem: (f32, f32),
    size_metrics: Record,
}

impl fmt::Debug for SwashFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwashFace")
            .field("index", &self.index)
            .field("glyph_count", &self.glyph_count)
            .field("ppem", &self.ppem)
            .finish_non_exhaustive()
    }
}

impl SwashFace {
    fn font_ref(&self) -> Option<FontRef<'_>> {
        FontRef::from_index(self.data.as_ref(), self.index as usize)
    }
}

impl RasterFace for SwashFace {
    fn data(&self) -> &FontData {
        &self.data
    }

    fn index(&self) -> u32 {
        self.index
    }

    fn glyph_count(&self) -> u32 {
        self.glyph_count
    }

    fn char_index(&self, codepoint: u32) -> u32 {
        self.font_ref()
            .map(|font| u32::from(font.charmap().map(codepoint)))
            .unwrap_or(0)
    }

    fn size_metrics(&self) -> &[u8] {
        &self.size_metrics
    }

    fn ppem(&self) -> (f32, f32) {
        self.ppem
    }
}

/// Rasterizer backed by a swash [`ScaleContext`].
pub struct SwashRasterizer {
    context: ScaleContext,
    layout: RecordLayout,
    pixels: Vec<u8>,
    metrics: Record,
}

impl fmt::Debug for SwashRasterizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwashRasterizer")
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

impl Rasterizer for SwashRasterizer {
    type Face = SwashFace;

    fn init() -> Result<Self, Error> {
        Ok(Self {
            context: ScaleContext::new(),
            layout: RecordLayout::host(),
            pixels: Vec::new(),
            metrics: Record::new(),
        })
    }

    fn record_layout(&self) -> RecordLayout {
        self.layout
    }

    fn load_face(&mut self, data: FontData, index: u32) -> Result<Self::Face, Error> {
        let glyph_count = FontRef::from_index(data.as_ref(), index as usize)
            .ok_or(Error::resource_init("load face"))?
            .metrics(&[])
            .glyph_count;
        Ok(SwashFace {
            data,
            index,
            glyph_count: u32::from(glyph_count),
            ppem: (0.0, 0.0),
            size_metrics: Record::new(),
        })
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "ppem and scale values are small positive numbers"
    )]
    fn set_char_size(
        &mut self,
        face: &mut Self::Face,
        h_size: u32,
        v_size: u32,
        dpi: u32,
    ) -> Result<(), Error> {
        if h_size == 0 || v_size == 0 || dpi == 0 {
            return Err(Error::resource_init("set char size"));
        }
        let x_ppem = h_size as f32 * dpi as f32 / 72.0;
        let y_ppem = v_size as f32 * dpi as f32 / 72.0;
        let font = face
            .font_ref()
            .ok_or(Error::resource_init("set char size"))?;
        let design = font.metrics(&[]);
        let units_per_em = f32::from(design.units_per_em.max(1));
        let vertical = design.scale(y_ppem);
        // swash reports descent as a positive distance below the baseline.
        let descent = vertical.descent.abs();
        let size = SizeMetrics {
            x_ppem: x_ppem.round() as u16,
            y_ppem: y_ppem.round() as u16,
            x_scale: (x_ppem * ONE_PIXEL as f32 / units_per_em * 65536.0).round() as i64,
            y_scale: (y_ppem * ONE_PIXEL as f32 / units_per_em * 65536.0).round() as i64,
            ascender: from_pixels_f32(vertical.ascent),
            descender: -from_pixels_f32(descent),
            height: from_pixels_f32(vertical.ascent + descent + vertical.leading),
            max_advance: from_pixels_f32(design.scale(x_ppem).max_width),
        };
        face.ppem = (x_ppem, y_ppem);
        face.size_metrics = size.encode(self.layout);
        Ok(())
    }

    fn render_glyph(
        &mut self,
        face: &Self::Face,
        glyph: u32,
        mode: RenderMode,
    ) -> Result<GlyphSlot<'_>, RenderFailure> {
        let glyph_id = u16::try_from(glyph).map_err(|_| RenderFailure::Failed)?;
        let font = face.font_ref().ok_or(RenderFailure::Failed)?;
        let format = match mode {
            RenderMode::Lcd => Format::Subpixel,
            RenderMode::Normal => Format::Alpha,
        };
        let size = face.ppem.1;
        let mut scaler = self.context.builder(font).size(size).hint(true).build();
        let image = Render::new(&[Source::Outline])
            .format(format)
            .render(&mut scaler, glyph_id)
            .ok_or(RenderFailure::Failed)?;

        let placement = image.placement;
        self.pixels.clear();
        let (pixel_mode, row_width) = match image.content {
            Content::Mask => {
                self.pixels.extend_from_slice(&image.data);
                (PixelMode::Gray, placement.width)
            }
            Content::SubpixelMask => {
                for px in image.data.chunks_exact(4) {
                    self.pixels.extend_from_slice(&px[..3]);
                }
                (PixelMode::Lcd, placement.width * 3)
            }
            Content::Color => {
                for px in image.data.chunks_exact(4) {
                    self.pixels.extend_from_slice(&[px[2], px[1], px[0], px[3]]);
                }
                (PixelMode::Bgra, placement.width)
            }
        };
        let pitch = match pixel_mode {
            PixelMode::Bgra => placement.width as usize * 4,
            PixelMode::Gray | PixelMode::Lcd => row_width as usize,
        };

        let advance = font.glyph_metrics(&[]).scale(size).advance_width(glyph_id);
        self.metrics = GlyphMetrics {
            width: i64::from(placement.width) * ONE_PIXEL,
            height: i64::from(placement.height) * ONE_PIXEL,
            hori_bearing_x: i64::from(placement.left) * ONE_PIXEL,
            hori_bearing_y: i64::from(placement.top) * ONE_PIXEL,
            hori_advance: from_pixels_f32(advance),
            ..GlyphMetrics::default()
        }
        .encode(self.layout);

        Ok(GlyphSlot {
            pixel_mode,
            width: row_width,
            rows: placement.height,
            pitch,
            buffer: &self.pixels,
            bitmap_left: i64::from(placement.left),
            bitmap_top: placement.top,
            metrics: &self.metrics,
        })
    }
}
