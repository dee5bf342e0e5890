// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory rasterizer and shaper over a tiny synthetic font format.
//!
//! A [`MockFont`] serializes to font data that only these backends understand:
//! a `MOCK` tag, a flags byte, a glyph count and ten bytes per glyph
//! (codepoint, 16-bit width and height, fill value, failure flag).

use std::sync::Arc;

use linebender_resource_handle::Blob;

use crate::backend::{
    GlyphSlot, PixelMode, RasterFace, Rasterizer, RenderFailure, RenderMode, ShapeBuffer,
    ShapeFeature, ShapedInfo, ShapedPosition, Shaper, ShapingFont,
};
use crate::fixed::ONE_PIXEL;
use crate::native::{GlyphMetrics, Record, RecordLayout, SizeMetrics};
use crate::{Error, FontData};

const TAG: &[u8; 4] = b"MOCK";
const FLAG_LCD: u8 = 1;
const GLYPH_RECORD: usize = 10;

/// One glyph of a [`MockFont`].
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct MockGlyph {
    pub(crate) codepoint: Option<char>,
    pub(crate) width: u16,
    pub(crate) height: u16,
    pub(crate) fill: u8,
    pub(crate) fail: bool,
}

/// Description of a synthetic font.
#[derive(Clone, Debug, Default)]
pub(crate) struct MockFont {
    glyphs: Vec<MockGlyph>,
    lcd: bool,
}

impl MockFont {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// A `.notdef` glyph followed by one glyph per character of `chars`.
    ///
    /// Glyph `i` is `3 + i % 4` pixels wide, `5 + i % 3` tall and filled with `10 + i`.
    pub(crate) fn with_chars(chars: &str) -> Self {
        let mut font = Self::new().glyph(None, 4, 6, 1);
        for (i, ch) in chars.chars().enumerate() {
            let i = i as u8 + 1;
            font = font.glyph(Some(ch), u16::from(3 + i % 4), u16::from(5 + i % 3), 10 + i);
        }
        font
    }

    pub(crate) fn glyph(
        mut self,
        codepoint: Option<char>,
        width: u16,
        height: u16,
        fill: u8,
    ) -> Self {
        self.glyphs.push(MockGlyph {
            codepoint,
            width,
            height,
            fill,
            fail: false,
        });
        self
    }

    /// Makes the rasterizer render LCD bitmaps when asked to.
    pub(crate) fn lcd(mut self) -> Self {
        self.lcd = true;
        self
    }

    /// Makes glyph `index` fail to render.
    pub(crate) fn failing(mut self, index: usize) -> Self {
        self.glyphs[index].fail = true;
        self
    }

    pub(crate) fn glyphs(&self) -> &[MockGlyph] {
        &self.glyphs
    }

    pub(crate) fn data(&self) -> FontData {
        let mut bytes = Vec::with_capacity(9 + self.glyphs.len() * GLYPH_RECORD);
        bytes.extend_from_slice(TAG);
        bytes.push(if self.lcd { FLAG_LCD } else { 0 });
        bytes.extend_from_slice(&(self.glyphs.len() as u32).to_le_bytes());
        for glyph in &self.glyphs {
            let codepoint = glyph.codepoint.map(u32::from).unwrap_or(0);
            bytes.extend_from_slice(&codepoint.to_le_bytes());
            bytes.extend_from_slice(&glyph.width.to_le_bytes());
            bytes.extend_from_slice(&glyph.height.to_le_bytes());
            bytes.extend_from_slice(&[glyph.fill, u8::from(glyph.fail)]);
        }
        Blob::new(Arc::new(bytes))
    }

    fn parse(data: &[u8]) -> Option<Self> {
        let rest = data.strip_prefix(TAG)?;
        let (&flags, rest) = rest.split_first()?;
        let count = u32::from_le_bytes(rest.get(..4)?.try_into().ok()?) as usize;
        let records = rest.get(4..4 + count * GLYPH_RECORD)?;
        let glyphs = records
            .chunks_exact(GLYPH_RECORD)
            .map(|record| MockGlyph {
                codepoint: char::from_u32(u32::from_le_bytes([
                    record[0], record[1], record[2], record[3],
                ]))
                .filter(|&ch| ch != '\0'),
                width: u16::from_le_bytes([record[4], record[5]]),
                height: u16::from_le_bytes([record[6], record[7]]),
                fill: record[8],
                fail: record[9] != 0,
            })
            .collect();
        Some(Self {
            glyphs,
            lcd: flags & FLAG_LCD != 0,
        })
    }

    fn char_index(&self, codepoint: u32) -> u32 {
        self.glyphs
            .iter()
            .position(|glyph| glyph.codepoint.map(u32::from) == Some(codepoint))
            .map(|index| index as u32)
            .unwrap_or(0)
    }
}

/// Face of a [`MockFont`].
#[derive(Debug)]
pub(crate) struct MockFace {
    data: FontData,
    font: MockFont,
    ppem: (f32, f32),
    size_metrics: Record,
}

impl RasterFace for MockFace {
    fn data(&self) -> &FontData {
        &self.data
    }

    fn index(&self) -> u32 {
        0
    }

    fn glyph_count(&self) -> u32 {
        self.font.glyphs.len() as u32
    }

    fn char_index(&self, codepoint: u32) -> u32 {
        self.font.char_index(codepoint)
    }

    fn size_metrics(&self) -> &[u8] {
        &self.size_metrics
    }

    fn ppem(&self) -> (f32, f32) {
        self.ppem
    }
}

/// Rasterizer for [`MockFont`] data.
///
/// Size metrics scale with the vertical pixel size: ascender 3/4, descender 1/4 and line
/// height 5/4 of an em. Every glyph has a left bearing of 1 and sits on the baseline.
#[derive(Debug)]
pub(crate) struct MockRasterizer {
    layout: RecordLayout,
    pixels: Vec<u8>,
    metrics: Record,
}

impl MockRasterizer {
    pub(crate) fn init_host() -> Self {
        Self::with_layout(RecordLayout::host())
    }

    pub(crate) fn with_layout(layout: RecordLayout) -> Self {
        Self {
            layout,
            pixels: Vec::new(),
            metrics: Record::new(),
        }
    }
}

impl Rasterizer for MockRasterizer {
    type Face = MockFace;

    fn init() -> Result<Self, Error> {
        Ok(Self::init_host())
    }

    fn record_layout(&self) -> RecordLayout {
        self.layout
    }

    fn load_face(&mut self, data: FontData, index: u32) -> Result<MockFace, Error> {
        if index != 0 {
            return Err(Error::resource_init("load face"));
        }
        let font = MockFont::parse(data.as_ref()).ok_or(Error::resource_init("load face"))?;
        Ok(MockFace {
            data,
            font,
            ppem: (0.0, 0.0),
            size_metrics: Record::new(),
        })
    }

    fn set_char_size(
        &mut self,
        face: &mut MockFace,
        h_size: u32,
        v_size: u32,
        dpi: u32,
    ) -> Result<(), Error> {
        let x_ppem = h_size * dpi / 72;
        let y_ppem = v_size * dpi / 72;
        let em = i64::from(y_ppem) * ONE_PIXEL;
        let size = SizeMetrics {
            x_ppem: x_ppem as u16,
            y_ppem: y_ppem as u16,
            ascender: em * 3 / 4,
            descender: -em / 4,
            height: em * 5 / 4,
            max_advance: em,
            ..SizeMetrics::default()
        };
        face.ppem = (x_ppem as f32, y_ppem as f32);
        face.size_metrics = size.encode(self.layout);
        Ok(())
    }

    fn render_glyph(
        &mut self,
        face: &MockFace,
        glyph: u32,
        mode: RenderMode,
    ) -> Result<GlyphSlot<'_>, RenderFailure> {
        let spec = *face
            .font
            .glyphs
            .get(glyph as usize)
            .ok_or(RenderFailure::Failed)?;
        if spec.fail {
            return Err(RenderFailure::Failed);
        }
        let width = u32::from(spec.width);
        let rows = u32::from(spec.height);
        let (pixel_mode, raw_width) = match mode {
            RenderMode::Lcd if face.font.lcd => (PixelMode::Lcd, width * 3),
            RenderMode::Lcd => return Err(RenderFailure::Unsupported),
            RenderMode::Normal => (PixelMode::Gray, width),
        };
        self.pixels.clear();
        for _ in 0..width * rows {
            match pixel_mode {
                PixelMode::Lcd => {
                    self.pixels
                        .extend_from_slice(&[spec.fill, spec.fill / 2, spec.fill / 4]);
                }
                _ => self.pixels.push(spec.fill),
            }
        }
        self.metrics = GlyphMetrics {
            width: i64::from(width) * ONE_PIXEL,
            height: i64::from(rows) * ONE_PIXEL,
            hori_bearing_x: ONE_PIXEL,
            hori_bearing_y: i64::from(rows) * ONE_PIXEL,
            hori_advance: i64::from(width + 1) * ONE_PIXEL,
            ..GlyphMetrics::default()
        }
        .encode(self.layout);
        Ok(GlyphSlot {
            pixel_mode,
            width: raw_width,
            rows,
            pitch: raw_width as usize,
            buffer: &self.pixels,
            bitmap_left: 1,
            bitmap_top: rows as i32,
            metrics: &self.metrics,
        })
    }
}

/// Shaper for [`MockFont`] data.
///
/// Maps each codepoint through the font's character map and advances by the glyph
/// width plus one pixel. With kerning on, `A` followed by `V` is pulled one pixel closer.
#[derive(Debug, Default)]
pub(crate) struct MockShaper {
    pub(crate) fonts_created: usize,
}

impl Shaper for MockShaper {
    type Font = MockShapingFont;

    fn create_font<F: RasterFace>(&mut self, face: &F) -> Result<MockShapingFont, Error> {
        let font =
            MockFont::parse(face.data().as_ref()).ok_or(Error::resource_init("create shaping font"))?;
        self.fonts_created += 1;
        Ok(MockShapingFont { font })
    }

    fn create_buffer(&mut self) -> Result<MockBuffer, Error> {
        Ok(MockBuffer::default())
    }
}

#[derive(Debug)]
pub(crate) struct MockShapingFont {
    font: MockFont,
}

impl ShapingFont for MockShapingFont {
    type Buffer = MockBuffer;

    fn shape(&self, buffer: &mut MockBuffer, features: &[ShapeFeature]) {
        let kerning = features.contains(&ShapeFeature::KERNING);
        buffer.infos.clear();
        buffer.positions.clear();
        for (i, &(ch, cluster)) in buffer.text.iter().enumerate() {
            let glyph_index = self.font.char_index(u32::from(ch));
            let width = self.font.glyphs[glyph_index as usize].width;
            let mut x_advance = (i32::from(width) + 1) * ONE_PIXEL as i32;
            if kerning && ch == 'A' && buffer.text.get(i + 1).map(|&(next, _)| next) == Some('V') {
                x_advance -= ONE_PIXEL as i32;
            }
            buffer.infos.push(ShapedInfo {
                glyph_index,
                cluster,
            });
            buffer.positions.push(ShapedPosition {
                x_advance,
                ..ShapedPosition::default()
            });
        }
        buffer.text.clear();
    }
}

#[derive(Debug, Default)]
pub(crate) struct MockBuffer {
    text: Vec<(char, u32)>,
    infos: Vec<ShapedInfo>,
    positions: Vec<ShapedPosition>,
}

impl ShapeBuffer for MockBuffer {
    fn clear(&mut self) {
        self.text.clear();
        self.infos.clear();
        self.positions.clear();
    }

    fn add_utf16(&mut self, text: &[u16]) {
        let mut cluster = 0;
        for ch in char::decode_utf16(text.iter().copied()) {
            let ch = ch.unwrap_or(char::REPLACEMENT_CHARACTER);
            self.text.push((ch, cluster));
            cluster += ch.len_utf16() as u32;
        }
    }

    fn add_codepoints(&mut self, text: &[u32]) {
        for (cluster, &codepoint) in text.iter().enumerate() {
            let ch = char::from_u32(codepoint).unwrap_or(char::REPLACEMENT_CHARACTER);
            self.text.push((ch, cluster as u32));
        }
    }

    fn guess_segment_properties(&mut self) {}

    fn glyph_infos(&self) -> &[ShapedInfo] {
        &self.infos
    }

    fn glyph_positions(&self) -> &[ShapedPosition] {
        &self.positions
    }
}
