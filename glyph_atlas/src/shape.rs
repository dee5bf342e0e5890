// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Projection of shaping output onto atlas glyphs.

use core::slice;

use crate::atlas::GlyphTable;
use crate::backend::{ShapedInfo, ShapedPosition};
use crate::fixed::to_pixels_f32;
use crate::{FontGlyph, UvRect};

/// A shaped glyph resolved against a font's atlas.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShapedGlyph<'a> {
    /// Horizontal pen advance after this glyph, in pixels.
    pub x_advance: f32,
    /// Vertical pen advance after this glyph, in pixels, y-up.
    pub y_advance: f32,
    /// Horizontal displacement from the pen, in pixels.
    pub x_offset: f32,
    /// Vertical displacement from the pen, in pixels, y-up.
    pub y_offset: f32,
    /// Index of the first input unit this glyph was produced from.
    pub cluster: u32,
    /// The atlas entry to draw.
    pub glyph: &'a FontGlyph,
}

impl ShapedGlyph<'_> {
    /// Screen rectangle of this glyph with the pen at (`pen_x`, `pen_y`) on the baseline.
    ///
    /// Screen space is y-down.
    pub fn quad(&self, pen_x: f32, pen_y: f32) -> GlyphQuad {
        let x0 = pen_x + self.x_offset + self.glyph.bearing_x as f32;
        let y0 = pen_y - self.y_offset - self.glyph.bearing_y as f32;
        GlyphQuad {
            index: self.glyph.index,
            x0,
            y0,
            x1: x0 + self.glyph.width as f32,
            y1: y0 + self.glyph.height as f32,
            uv: self.glyph.uv,
        }
    }
}

/// Shaped glyphs of one run, in shaping order.
///
/// Borrows the font that produced it, so the font cannot shape again until the run is
/// dropped.
#[derive(Clone, Debug)]
pub struct ShapedRun<'a> {
    table: &'a GlyphTable,
    unknown: &'a FontGlyph,
    infos: slice::Iter<'a, ShapedInfo>,
    positions: slice::Iter<'a, ShapedPosition>,
}

impl<'a> ShapedRun<'a> {
    pub(crate) fn new(
        table: &'a GlyphTable,
        unknown: &'a FontGlyph,
        infos: &'a [ShapedInfo],
        positions: &'a [ShapedPosition],
    ) -> Self {
        debug_assert_eq!(
            infos.len(),
            positions.len(),
            "shaper returned mismatched infos and positions"
        );
        Self {
            table,
            unknown,
            infos: infos.iter(),
            positions: positions.iter(),
        }
    }

    /// Lays the run out from (`origin_x`, `baseline_y`), yielding one quad per glyph.
    pub fn quads(self, origin_x: f32, baseline_y: f32) -> Quads<'a> {
        Quads {
            run: self,
            pen_x: origin_x,
            pen_y: baseline_y,
        }
    }
}

impl<'a> Iterator for ShapedRun<'a> {
    type Item = ShapedGlyph<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let info = self.infos.next()?;
        let pos = self.positions.next()?;
        Some(ShapedGlyph {
            x_advance: to_pixels_f32(pos.x_advance),
            y_advance: to_pixels_f32(pos.y_advance),
            x_offset: to_pixels_f32(pos.x_offset),
            y_offset: to_pixels_f32(pos.y_offset),
            cluster: info.cluster,
            glyph: self.table.get(info.glyph_index).unwrap_or(self.unknown),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.infos.len().min(self.positions.len());
        (len, Some(len))
    }
}

impl ExactSizeIterator for ShapedRun<'_> {}

/// A textured rectangle for one glyph, in screen pixels (y-down).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GlyphQuad {
    /// Glyph index the quad was made for.
    pub index: u32,
    /// Left edge.
    pub x0: f32,
    /// Top edge.
    pub y0: f32,
    /// Right edge.
    pub x1: f32,
    /// Bottom edge.
    pub y1: f32,
    /// Atlas coordinates to sample.
    pub uv: UvRect,
}

/// Quads of a [`ShapedRun`], advancing a pen along the run.
#[derive(Clone, Debug)]
pub struct Quads<'a> {
    run: ShapedRun<'a>,
    pen_x: f32,
    pen_y: f32,
}

impl Iterator for Quads<'_> {
    type Item = GlyphQuad;

    fn next(&mut self) -> Option<Self::Item> {
        let glyph = self.run.next()?;
        let quad = glyph.quad(self.pen_x, self.pen_y);
        self.pen_x += glyph.x_advance;
        // Shaper advances are y-up.
        self.pen_y -= glyph.y_advance;
        Some(quad)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.run.size_hint()
    }
}

impl ExactSizeIterator for Quads<'_> {}
