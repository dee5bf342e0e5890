// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interfaces to the rasterization and shaping engines.
//!
//! The crate does not parse font files, rasterize outlines or run shaping itself. Those
//! jobs belong to a [`Rasterizer`] and a [`Shaper`]; this module defines what they must
//! provide. Default implementations live in [`swash`] and [`harfrust`] behind the
//! features of the same name.

#[cfg(feature = "harfrust")]
pub mod harfrust;
#[cfg(feature = "swash")]
pub mod swash;

use crate::native::RecordLayout;
use crate::{Error, FontData};

/// Anti-aliasing mode requested from the rasterizer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RenderMode {
    /// 8-bit coverage per pixel.
    Normal,
    /// Horizontal subpixel coverage, one byte per color channel.
    Lcd,
}

/// Pixel layout of a rendered glyph bitmap.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PixelMode {
    /// One coverage byte per pixel.
    Gray,
    /// Three coverage bytes per pixel (R, G, B); the raw row is three times wider than
    /// the glyph.
    Lcd,
    /// Four bytes per pixel in B, G, R, A order.
    Bgra,
}

impl PixelMode {
    /// Number of bytes one visible pixel occupies.
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Gray => 1,
            Self::Lcd => 3,
            Self::Bgra => 4,
        }
    }
}

/// A glyph rendered into the rasterizer's slot.
///
/// The slot borrows the rasterizer, so its buffer cannot be held across the next render.
#[derive(Copy, Clone, Debug)]
pub struct GlyphSlot<'a> {
    /// Layout of `buffer`.
    pub pixel_mode: PixelMode,
    /// Row width in buffer units. For [`PixelMode::Lcd`] this is three times the
    /// visible width.
    pub width: u32,
    /// Number of rows.
    pub rows: u32,
    /// Byte distance between the starts of two rows.
    pub pitch: usize,
    /// Pixel rows, top to bottom.
    pub buffer: &'a [u8],
    /// Distance from the pen position to the bitmap's left edge, in pixels.
    ///
    /// Wide enough to carry the unsigned wraparound some native libraries report.
    pub bitmap_left: i64,
    /// Distance from the baseline up to the bitmap's top edge, in pixels.
    pub bitmap_top: i32,
    /// Glyph metrics record in the rasterizer's [`RecordLayout`].
    ///
    /// [`RecordLayout`]: crate::native::RecordLayout
    pub metrics: &'a [u8],
}

/// Why a glyph could not be rendered.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RenderFailure {
    /// The requested [`RenderMode`] is not available; another mode may succeed.
    Unsupported,
    /// The glyph could not be loaded or rendered.
    Failed,
}

/// A face loaded by a [`Rasterizer`].
pub trait RasterFace {
    /// The font file the face was loaded from.
    fn data(&self) -> &FontData;

    /// Index of the face within its font file.
    fn index(&self) -> u32;

    /// Number of glyphs in the face.
    fn glyph_count(&self) -> u32;

    /// Maps a Unicode codepoint to a glyph index. Unmapped codepoints return 0.
    fn char_index(&self, codepoint: u32) -> u32;

    /// Size metrics record at the current character size, in the rasterizer's
    /// [`RecordLayout`](crate::native::RecordLayout).
    fn size_metrics(&self) -> &[u8];

    /// Horizontal and vertical pixels per em at the current character size.
    fn ppem(&self) -> (f32, f32);
}

/// A rasterization engine. One instance is shared by every font of a collection.
pub trait Rasterizer: Sized {
    /// Face type produced by this rasterizer.
    type Face: RasterFace;

    /// Creates the engine.
    fn init() -> Result<Self, Error>;

    /// Layout of the native records this engine produces.
    fn record_layout(&self) -> RecordLayout {
        RecordLayout::host()
    }

    /// Loads face `index` from `data`.
    fn load_face(&mut self, data: FontData, index: u32) -> Result<Self::Face, Error>;

    /// Sets the character size of `face`, in points, at `dpi`.
    fn set_char_size(
        &mut self,
        face: &mut Self::Face,
        h_size: u32,
        v_size: u32,
        dpi: u32,
    ) -> Result<(), Error>;

    /// Renders one glyph into the engine's slot.
    fn render_glyph(
        &mut self,
        face: &Self::Face,
        glyph: u32,
        mode: RenderMode,
    ) -> Result<GlyphSlot<'_>, RenderFailure>;
}

/// An OpenType feature setting applied while shaping.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ShapeFeature {
    /// Four byte feature tag.
    pub tag: [u8; 4],
    /// Feature value; 0 disables, 1 enables.
    pub value: u32,
}

impl ShapeFeature {
    /// Kerning, enabled.
    pub const KERNING: Self = Self {
        tag: *b"kern",
        value: 1,
    };
}

/// Glyph index and source cluster of one shaped glyph.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ShapedInfo {
    /// Glyph index within the font.
    pub glyph_index: u32,
    /// Index of the first input unit this glyph was produced from.
    pub cluster: u32,
}

/// Positioning of one shaped glyph, in 26.6.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ShapedPosition {
    /// Horizontal pen advance after this glyph.
    pub x_advance: i32,
    /// Vertical pen advance after this glyph.
    pub y_advance: i32,
    /// Horizontal displacement of this glyph from the pen.
    pub x_offset: i32,
    /// Vertical displacement of this glyph from the pen, y-up.
    pub y_offset: i32,
}

/// Input and output storage of a shaping engine.
pub trait ShapeBuffer {
    /// Removes all text and results.
    fn clear(&mut self);

    /// Appends UTF-16 text. Unpaired surrogates become U+FFFD.
    fn add_utf16(&mut self, text: &[u16]);

    /// Appends Unicode codepoints. Invalid values become U+FFFD.
    fn add_codepoints(&mut self, text: &[u32]);

    /// Infers direction, script and language from the buffered text.
    fn guess_segment_properties(&mut self);

    /// Glyphs of the last shaping pass, in shaping order.
    fn glyph_infos(&self) -> &[ShapedInfo];

    /// Positions of the last shaping pass, parallel to [`glyph_infos`](Self::glyph_infos).
    fn glyph_positions(&self) -> &[ShapedPosition];
}

/// A font prepared for shaping.
pub trait ShapingFont {
    /// Buffer type this font shapes into.
    type Buffer: ShapeBuffer;

    /// Shapes the buffered text, replacing it with glyphs and positions.
    fn shape(&self, buffer: &mut Self::Buffer, features: &[ShapeFeature]);
}

/// A shaping engine.
pub trait Shaper {
    /// Shaping font type produced by this engine.
    type Font: ShapingFont;

    /// Prepares `face` for shaping at its current character size.
    fn create_font<F: RasterFace>(&mut self, face: &F) -> Result<Self::Font, Error>;

    /// Creates an empty buffer.
    fn create_buffer(&mut self) -> Result<<Self::Font as ShapingFont>::Buffer, Error>;
}

/// Buffer type used by a [`Shaper`]'s fonts.
pub type ShapeBufferOf<S> = <<S as Shaper>::Font as ShapingFont>::Buffer;
