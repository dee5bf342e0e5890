// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`Shaper`] built on harfrust.
//!
//! harfrust positions glyphs in font units. [`HarfrustFont`] scales them to 26.6 at the
//! pixel size of the face it was created from.

use core::fmt;

use ::harfrust::{Feature, FontRef, ShaperData, Tag, UnicodeBuffer};
use skrifa::instance::{LocationRef, Size};
use skrifa::MetadataProvider;
use smallvec::SmallVec;

use crate::backend::{
    RasterFace, ShapeBuffer, ShapeFeature, ShapedInfo, ShapedPosition, Shaper, ShapingFont,
};
use crate::fixed::ONE_PIXEL;
use crate::{Error, FontData};

/// Shaping engine backed by harfrust. Holds no state of its own.
#[derive(Copy, Clone, Debug, Default)]
pub struct HarfrustShaper;

impl Shaper for HarfrustShaper {
    type Font = HarfrustFont;

    fn create_font<F: RasterFace>(&mut self, face: &F) -> Result<Self::Font, Error> {
        let data = face.data().clone();
        let index = face.index();
        let font_ref = FontRef::from_index(data.as_ref(), index)
            .map_err(|_| Error::resource_init("create shaping font"))?;
        let shaper_data = ShaperData::new(&font_ref);
        let units_per_em = font_ref
            .metrics(Size::unscaled(), LocationRef::default())
            .units_per_em;
        let units_per_em = f32::from(units_per_em.max(1));
        let (x_ppem, y_ppem) = face.ppem();
        Ok(HarfrustFont {
            data,
            index,
            shaper_data,
            x_scale: x_ppem * ONE_PIXEL as f32 / units_per_em,
            y_scale: y_ppem * ONE_PIXEL as f32 / units_per_em,
        })
    }

    fn create_buffer(&mut self) -> Result<HarfrustBuffer, Error> {
        Ok(HarfrustBuffer::default())
    }
}

/// A face prepared for shaping with harfrust.
pub struct HarfrustFont {
    data: FontData,
    index: u32,
    shaper_data: ShaperData,
    x_scale: f32,
    y_scale: f32,
}

impl fmt::Debug for HarfrustFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HarfrustFont")
            .field("index", &self.index)
            .field("x_scale", &self.x_scale)
            .field("y_scale", &self.y_scale)
            .finish_non_exhaustive()
    }
}

impl HarfrustFont {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "scaled font units stay far inside the i32 range"
    )]
    fn scale(units: i32, scale: f32) -> i32 {
        (units as f32 * scale).round() as i32
    }
}

impl ShapingFont for HarfrustFont {
    type Buffer = HarfrustBuffer;

    fn shape(&self, buffer: &mut HarfrustBuffer, features: &[ShapeFeature]) {
        buffer.infos.clear();
        buffer.positions.clear();
        let unicode = buffer.unicode.take().unwrap_or_else(UnicodeBuffer::new);
        let Ok(font_ref) = FontRef::from_index(self.data.as_ref(), self.index) else {
            log::error!("font data no longer parses; shaping produced no glyphs");
            buffer.unicode = Some(unicode);
            return;
        };
        let features: SmallVec<[Feature; 4]> = features
            .iter()
            .map(|feature| Feature::new(Tag::new(&feature.tag), feature.value, ..))
            .collect();
        let shaper = self.shaper_data.shaper(&font_ref).build();
        let glyphs = shaper.shape(unicode, &features);

        buffer.infos.reserve(glyphs.len());
        buffer.positions.reserve(glyphs.len());
        for (info, pos) in glyphs.glyph_infos().iter().zip(glyphs.glyph_positions()) {
            buffer.infos.push(ShapedInfo {
                glyph_index: info.glyph_id,
                cluster: info.cluster,
            });
            buffer.positions.push(ShapedPosition {
                x_advance: Self::scale(pos.x_advance, self.x_scale),
                y_advance: Self::scale(pos.y_advance, self.y_scale),
                x_offset: Self::scale(pos.x_offset, self.x_scale),
                y_offset: Self::scale(pos.y_offset, self.y_scale),
            });
        }
        buffer.unicode = Some(glyphs.clear());
    }
}

/// Text and shaping results for [`HarfrustFont`].
#[derive(Default)]
pub struct HarfrustBuffer {
    unicode: Option<UnicodeBuffer>,
    infos: Vec<ShapedInfo>,
    positions: Vec<ShapedPosition>,
}

impl fmt::Debug for HarfrustBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HarfrustBuffer")
            .field("infos", &self.infos)
            .field("positions", &self.positions)
            .finish_non_exhaustive()
    }
}

impl HarfrustBuffer {
    fn unicode(&mut self) -> &mut UnicodeBuffer {
        self.unicode.get_or_insert_with(UnicodeBuffer::new)
    }
}

impl ShapeBuffer for HarfrustBuffer {
    fn clear(&mut self) {
        self.unicode().clear();
        self.infos.clear();
        self.positions.clear();
    }

    #[allow(clippy::cast_possible_truncation, reason = "a char is 1 or 2 code units")]
    fn add_utf16(&mut self, text: &[u16]) {
        let unicode = self.unicode();
        let mut cluster = 0_u32;
        for ch in char::decode_utf16(text.iter().copied()) {
            let ch = ch.unwrap_or(char::REPLACEMENT_CHARACTER);
            unicode.add(ch, cluster);
            cluster += ch.len_utf16() as u32;
        }
    }

    fn add_codepoints(&mut self, text: &[u32]) {
        let unicode = self.unicode();
        for (cluster, &codepoint) in (0_u32..).zip(text) {
            let ch = char::from_u32(codepoint).unwrap_or(char::REPLACEMENT_CHARACTER);
            unicode.add(ch, cluster);
        }
    }

    fn guess_segment_properties(&mut self) {
        self.unicode().guess_segment_properties();
    }

    fn glyph_infos(&self) -> &[ShapedInfo] {
        &self.infos
    }

    fn glyph_positions(&self) -> &[ShapedPosition] {
        &self.positions
    }
}
