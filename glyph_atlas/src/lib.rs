// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph Atlas rasterizes every glyph of a font at one size into a single packed RGBA
//! texture, and projects shaped runs onto that texture so a renderer can draw a run with
//! one textured draw call.
//!
//! The pipeline is:
//!
//! 1. A [`Rasterizer`] loads a face and renders glyphs into native-style slots.
//! 2. [`AtlasBuilder`] normalizes each slot through [`RasterGlyph`], packs the glyphs with
//!    the shelf strategy in [`packer`](atlas::packer) and copies them into an [`Atlas`].
//! 3. A [`Font`] owns the atlas, its [`FontMetrics`] and the glyph table, and resolves
//!    codepoints to [`FontGlyph`]s.
//! 4. [`Font::shape`] runs a [`Shaper`] and yields [`ShapedGlyph`]s that reference the atlas.
//!
//! [`FontCollection`] owns the shared rasterizer and every loaded [`Font`].
//!
//! ## Features
//!
//! - `swash` (enabled by default): [`SwashRasterizer`](backend::swash::SwashRasterizer),
//!   a rasterizer built on swash's scaler.
//! - `harfrust` (enabled by default): [`HarfrustShaper`](backend::harfrust::HarfrustShaper),
//!   a shaper built on harfrust.

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod atlas;
pub mod backend;
mod collection;
mod error;
pub mod fixed;
mod font;
mod glyph;
mod metrics;
pub mod native;
mod options;
mod raster;
mod shape;

#[cfg(test)]
mod tests;

pub use linebender_resource_handle::Blob;

pub use atlas::{Atlas, AtlasBuilder, AtlasSlot, GlyphTable};
pub use backend::{
    GlyphSlot, PixelMode, RasterFace, Rasterizer, RenderFailure, RenderMode, ShapeBuffer,
    ShapeBufferOf, ShapeFeature, ShapedInfo, ShapedPosition, Shaper, ShapingFont,
};
pub use collection::{FontCollection, FontKey};
pub use error::{Error, ErrorKind};
pub use font::Font;
pub use glyph::{FontGlyph, UvRect};
pub use metrics::FontMetrics;
pub use options::AtlasOptions;
pub use raster::{GlyphRasterSource, RasterGlyph};
pub use shape::{GlyphQuad, Quads, ShapedGlyph, ShapedRun};

/// Shared, reference counted font file bytes.
pub type FontData = Blob<u8>;
