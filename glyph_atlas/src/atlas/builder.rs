// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use hashbrown::HashMap;

use super::packer::{atlas_side, footprint, pack};
use super::Atlas;
use crate::backend::Rasterizer;
use crate::raster::GlyphRasterSource;
use crate::{AtlasOptions, Error, FontGlyph, UvRect};

/// Glyph index to atlas entry mapping of one font instance.
#[derive(Clone, Debug, Default)]
pub struct GlyphTable {
    glyphs: HashMap<u32, FontGlyph>,
    first: Option<u32>,
}

impl GlyphTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a glyph, replacing any entry with the same index.
    pub fn insert(&mut self, glyph: FontGlyph) {
        self.first.get_or_insert(glyph.index);
        self.glyphs.insert(glyph.index, glyph);
    }

    /// Returns the entry for a glyph index.
    pub fn get(&self, index: u32) -> Option<&FontGlyph> {
        self.glyphs.get(&index)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Returns true if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Iterates over all entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &FontGlyph> + '_ {
        self.glyphs.values()
    }

    /// The glyph drawn for unmapped codepoints.
    ///
    /// Glyph 0 (`.notdef`) when present, otherwise the first glyph that was inserted.
    pub fn unknown_glyph(&self) -> Option<&FontGlyph> {
        self.get(0).or_else(|| self.first.and_then(|index| self.get(index)))
    }
}

/// A glyph copied out of the rasterizer, waiting for its atlas position.
struct StagedGlyph {
    index: u32,
    width: u32,
    height: u32,
    bearing_x: i32,
    bearing_y: i32,
    pixels: Vec<[u8; 4]>,
}

/// Renders a set of glyphs and packs them into an [`Atlas`].
#[derive(Clone, Debug)]
pub struct AtlasBuilder {
    padding: u32,
    initial_size: u32,
    max_size: u32,
    subpixel: bool,
}

impl Default for AtlasBuilder {
    fn default() -> Self {
        Self::new(&AtlasOptions::default())
    }
}

impl AtlasBuilder {
    /// Creates a builder using the atlas settings of `options`.
    pub fn new(options: &AtlasOptions) -> Self {
        Self {
            padding: options.padding,
            initial_size: options.initial_size,
            max_size: options.max_size,
            subpixel: options.subpixel,
        }
    }

    /// Renders every glyph in `glyphs` and packs them, in iteration order, into a new
    /// atlas.
    ///
    /// Any glyph that fails to render fails the whole build.
    pub fn build<R: Rasterizer>(
        &self,
        rasterizer: &mut R,
        face: &R::Face,
        glyphs: impl IntoIterator<Item = u32>,
    ) -> Result<(Atlas, GlyphTable), Error> {
        let mut source = GlyphRasterSource::new(rasterizer, face, self.subpixel);
        let staged = glyphs
            .into_iter()
            .map(|index| {
                source.with_glyph(index, |glyph| {
                    let mut pixels = Vec::with_capacity(glyph.width() as usize * glyph.height() as usize);
                    for y in 0..glyph.height() {
                        for x in 0..glyph.width() {
                            pixels.push(glyph.read_pixel(x, y));
                        }
                    }
                    StagedGlyph {
                        index,
                        width: glyph.width(),
                        height: glyph.height(),
                        bearing_x: glyph.bearing_x(),
                        bearing_y: glyph.bearing_y(),
                        pixels,
                    }
                })
            })
            .collect::<Result<Vec<_>, Error>>()?;

        let footprints = staged
            .iter()
            .map(|glyph| footprint(glyph.width, glyph.height, self.padding))
            .collect::<Vec<_>>();
        let side = atlas_side(&footprints, self.initial_size, self.max_size)?;
        let slots = pack(&footprints, side).ok_or_else(Error::atlas_overflow)?;

        let mut atlas = Atlas::new(side);
        let mut table = GlyphTable::new();
        for (glyph, slot) in staged.iter().zip(&slots) {
            let left = slot.x + self.padding;
            let top = slot.y + self.padding;
            if glyph.width > 0 {
                for (y, row) in (top..).zip(glyph.pixels.chunks_exact(glyph.width as usize)) {
                    for (x, &rgba) in (left..).zip(row) {
                        atlas.put(x, y, rgba);
                    }
                }
            }
            log::trace!(
                "glyph {} ({}x{}) at ({left}, {top})",
                glyph.index,
                glyph.width,
                glyph.height
            );
            table.insert(FontGlyph {
                index: glyph.index,
                uv: UvRect::for_bitmap(left, top, glyph.width, glyph.height, side),
                width: glyph.width,
                height: glyph.height,
                bearing_x: glyph.bearing_x,
                bearing_y: glyph.bearing_y,
            });
        }
        log::debug!("built {side}x{side} atlas with {} glyphs", table.len());
        Ok((atlas, table))
    }
}
