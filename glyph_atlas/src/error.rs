// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Error type for font loading, atlas construction and shaping.
///
/// Carries a non-exhaustive [`ErrorKind`], a short description of the failing step and,
/// for per-glyph failures, the glyph index that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    context: &'static str,
    glyph: Option<u32>,
}

impl Error {
    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The step that failed, e.g. `"load face"`.
    pub fn context(&self) -> &'static str {
        self.context
    }

    /// The glyph index being processed when the error occurred, if any.
    pub fn glyph(&self) -> Option<u32> {
        self.glyph
    }

    pub(crate) fn resource_init(context: &'static str) -> Self {
        Self {
            kind: ErrorKind::ResourceInit,
            context,
            glyph: None,
        }
    }

    pub(crate) fn glyph_raster(glyph: u32, context: &'static str) -> Self {
        Self {
            kind: ErrorKind::GlyphRaster,
            context,
            glyph: Some(glyph),
        }
    }

    pub(crate) fn disposed(context: &'static str) -> Self {
        Self {
            kind: ErrorKind::Disposed,
            context,
            glyph: None,
        }
    }

    pub(crate) fn atlas_overflow() -> Self {
        Self {
            kind: ErrorKind::AtlasOverflow,
            context: "size atlas",
            glyph: None,
        }
    }

    pub(crate) fn malformed_record(context: &'static str) -> Self {
        Self {
            kind: ErrorKind::MalformedRecord,
            context,
            glyph: None,
        }
    }

    /// Attaches a glyph index to an error raised while processing that glyph.
    pub(crate) fn with_glyph(mut self, glyph: u32) -> Self {
        self.glyph = Some(glyph);
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            ErrorKind::ResourceInit => "failed to initialize font resource",
            ErrorKind::GlyphRaster => "failed to rasterize glyph",
            ErrorKind::Disposed => "font used after disposal",
            ErrorKind::AtlasOverflow => "glyphs do not fit in the largest allowed atlas",
            ErrorKind::MalformedRecord => "native record is truncated",
        };
        match self.glyph {
            Some(glyph) => write!(f, "{what} ({}, glyph {glyph})", self.context),
            None => write!(f, "{what} ({})", self.context),
        }
    }
}

impl core::error::Error for Error {}

/// The non-exhaustive category of an [`Error`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A face, shaping font or rasterizer could not be created. The font is unusable.
    ResourceInit,

    /// A glyph could not be rendered while building an atlas. No partial atlas is produced.
    GlyphRaster,

    /// An operation was invoked on a font after it was disposed.
    Disposed,

    /// The glyph set needs a larger atlas than [`AtlasOptions::max_size`] allows.
    ///
    /// [`AtlasOptions::max_size`]: crate::AtlasOptions::max_size
    AtlasOverflow,

    /// A size or glyph metrics record was shorter than its layout requires.
    MalformedRecord,
}
