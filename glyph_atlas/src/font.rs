// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use crate::atlas::GlyphTable;
use crate::backend::{RasterFace, Rasterizer, ShapeBuffer, ShapeBufferOf, ShapeFeature, Shaper, ShapingFont};
use crate::{Atlas, AtlasBuilder, AtlasOptions, Error, FontData, FontGlyph, FontMetrics, ShapedRun};

/// Features applied to every shaping call.
const SHAPE_FEATURES: [ShapeFeature; 1] = [ShapeFeature::KERNING];

/// Engine handles owned by a live font. Fields drop in declaration order.
struct Resources<R: Rasterizer, S: Shaper> {
    shaping_font: S::Font,
    buffer: ShapeBufferOf<S>,
    face: R::Face,
    data: FontData,
}

/// One font file loaded at one size, with all of its glyphs packed into an atlas.
///
/// The atlas, metrics and glyph table are built once by [`Font::load`] and never change.
/// The font also keeps the face and shaping handles it needs for codepoint lookup and
/// [`shape`](Self::shape); those are released by [`dispose`](Self::dispose) or on drop.
pub struct Font<R: Rasterizer, S: Shaper> {
    h_size: u32,
    v_size: u32,
    atlas: Atlas,
    metrics: FontMetrics,
    glyphs: GlyphTable,
    unknown: FontGlyph,
    space: FontGlyph,
    resources: Option<Resources<R, S>>,
}

impl<R: Rasterizer, S: Shaper> fmt::Debug for Font<R, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("h_size", &self.h_size)
            .field("v_size", &self.v_size)
            .field("atlas", &self.atlas)
            .field("metrics", &self.metrics)
            .field("glyphs", &self.glyphs.len())
            .field("disposed", &self.is_disposed())
            .finish_non_exhaustive()
    }
}

impl<R: Rasterizer, S: Shaper> Font<R, S> {
    /// Loads the first face of `data` at `h_size` x `v_size` points and builds its atlas
    /// from every glyph in the face.
    pub fn load(
        rasterizer: &mut R,
        shaper: &mut S,
        data: FontData,
        h_size: u32,
        v_size: u32,
        options: &AtlasOptions,
    ) -> Result<Self, Error> {
        let mut face = rasterizer.load_face(data.clone(), 0)?;
        rasterizer.set_char_size(&mut face, h_size, v_size, options.dpi)?;
        let metrics = FontMetrics::extract(face.size_metrics(), rasterizer.record_layout())?;

        let (atlas, glyphs) =
            AtlasBuilder::new(options).build(rasterizer, &face, 0..face.glyph_count())?;
        let unknown = *glyphs
            .unknown_glyph()
            .ok_or(Error::resource_init("face has no glyphs"))?;
        let space = glyphs
            .get(face.char_index(u32::from(' ')))
            .copied()
            .unwrap_or(unknown);

        let shaping_font = shaper.create_font(&face)?;
        let buffer = shaper.create_buffer()?;
        log::debug!(
            "loaded font at {h_size}x{v_size}: {} glyphs, {}px atlas",
            glyphs.len(),
            atlas.width()
        );

        Ok(Self {
            h_size,
            v_size,
            atlas,
            metrics,
            glyphs,
            unknown,
            space,
            resources: Some(Resources {
                shaping_font,
                buffer,
                face,
                data,
            }),
        })
    }

    /// Horizontal and vertical size in points.
    pub fn size(&self) -> (u32, u32) {
        (self.h_size, self.v_size)
    }

    /// The packed glyph texture.
    pub fn atlas(&self) -> &Atlas {
        &self.atlas
    }

    /// Vertical metrics in pixels.
    pub fn metrics(&self) -> FontMetrics {
        self.metrics
    }

    /// All glyphs in the atlas.
    pub fn glyphs(&self) -> &GlyphTable {
        &self.glyphs
    }

    /// Number of glyphs in the atlas.
    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Glyph drawn for codepoints and indices that have no atlas entry.
    pub fn unknown_glyph(&self) -> &FontGlyph {
        &self.unknown
    }

    /// Glyph for U+0020, resolved when the font was loaded.
    pub fn space_glyph(&self) -> &FontGlyph {
        &self.space
    }

    /// Returns the atlas entry for a glyph index, or the unknown glyph.
    pub fn glyph_by_index(&self, index: u32) -> &FontGlyph {
        self.glyphs.get(index).unwrap_or(&self.unknown)
    }

    /// Returns the atlas entry for a Unicode codepoint, or the unknown glyph.
    ///
    /// Needs the face, so it must not be called after [`dispose`](Self::dispose).
    pub fn glyph_by_codepoint(&self, codepoint: u32) -> &FontGlyph {
        match &self.resources {
            Some(resources) => self.glyph_by_index(resources.face.char_index(codepoint)),
            None => {
                log::error!("glyph lookup for U+{codepoint:04X} on a disposed font");
                debug_assert!(false, "glyph lookup on a disposed font");
                &self.unknown
            }
        }
    }

    /// Shapes UTF-16 text.
    ///
    /// The returned run borrows the font's shaping buffer; the next call to any shaping
    /// method replaces its contents.
    pub fn shape(&mut self, text: &[u16]) -> Result<ShapedRun<'_>, Error> {
        self.shape_with(|buffer| buffer.add_utf16(text))
    }

    /// Shapes a sequence of Unicode codepoints.
    pub fn shape_codepoints(&mut self, text: &[u32]) -> Result<ShapedRun<'_>, Error> {
        self.shape_with(|buffer| buffer.add_codepoints(text))
    }

    /// Shapes a string.
    pub fn shape_str(&mut self, text: &str) -> Result<ShapedRun<'_>, Error> {
        let codepoints = text.chars().map(u32::from).collect::<Vec<_>>();
        self.shape_codepoints(&codepoints)
    }

    fn shape_with(
        &mut self,
        fill: impl FnOnce(&mut ShapeBufferOf<S>),
    ) -> Result<ShapedRun<'_>, Error> {
        let Some(resources) = self.resources.as_mut() else {
            log::error!("shape called on a disposed font");
            return Err(Error::disposed("shape"));
        };
        resources.buffer.clear();
        fill(&mut resources.buffer);
        resources.buffer.guess_segment_properties();
        resources
            .shaping_font
            .shape(&mut resources.buffer, &SHAPE_FEATURES);

        let buffer = &resources.buffer;
        Ok(ShapedRun::new(
            &self.glyphs,
            &self.unknown,
            buffer.glyph_infos(),
            buffer.glyph_positions(),
        ))
    }

    /// Returns true once the engine handles have been released.
    pub fn is_disposed(&self) -> bool {
        self.resources.is_none()
    }

    /// Releases the shaping font, shaping buffer, face and font data.
    ///
    /// The atlas, metrics and glyph table stay readable. Calling this again does nothing.
    pub fn dispose(&mut self) {
        if let Some(resources) = self.resources.take() {
            log::debug!(
                "releasing font at {}x{} ({} bytes of font data)",
                self.h_size,
                self.v_size,
                resources.data.as_ref().len()
            );
            drop(resources);
        }
    }
}

impl<R: Rasterizer, S: Shaper> Drop for Font<R, S> {
    fn drop(&mut self) {
        self.dispose();
    }
}
