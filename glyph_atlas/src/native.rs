// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Size and glyph metrics records in the rasterizer's native layout.
//!
//! Rasterizers hand face and glyph metrics over as C-style records whose integer fields
//! are a platform `long`. That type is 4 bytes wide on Windows and on 32-bit targets and
//! 8 bytes wide elsewhere, so the same record has two byte layouts. Each rasterizer reports
//! its [`RecordLayout`] as a value; the default follows the compilation target. Readers go
//! through a bounds-checked view with an explicit field stride instead of raw offsets.

use smallvec::SmallVec;

use crate::Error;

/// Owned bytes of one native record.
pub type Record = SmallVec<[u8; 64]>;

/// Width of the native `long` used by metrics records.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RecordLayout {
    /// 32-bit `long` fields (Windows, 32-bit targets).
    Narrow,
    /// 64-bit `long` fields (LP64 targets).
    Wide,
}

impl RecordLayout {
    /// The layout native libraries use on the target this crate was compiled for.
    pub const fn host() -> Self {
        if cfg!(target_os = "windows") || cfg!(target_pointer_width = "32") {
            Self::Narrow
        } else {
            Self::Wide
        }
    }

    /// Size of one `long` field in bytes.
    pub const fn long_size(self) -> usize {
        match self {
            Self::Narrow => 4,
            Self::Wide => 8,
        }
    }

    /// Offset of the first `long` in a size metrics record.
    ///
    /// The two leading `u16` ppem fields are padded up to the alignment of `long`.
    const fn size_metrics_longs_offset(self) -> usize {
        self.long_size()
    }

    /// Total byte length of a size metrics record.
    pub const fn size_metrics_len(self) -> usize {
        self.size_metrics_longs_offset() + SIZE_METRICS_LONGS * self.long_size()
    }

    /// Total byte length of a glyph metrics record.
    pub const fn glyph_metrics_len(self) -> usize {
        GLYPH_METRICS_LONGS * self.long_size()
    }

    fn longs(self, bytes: &[u8], start: usize, count: usize) -> Option<LongFields<'_>> {
        let stride = self.long_size();
        let bytes = bytes.get(start..start + count * stride)?;
        Some(LongFields {
            bytes,
            stride,
            layout: self,
        })
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "narrow records hold 32-bit longs"
    )]
    fn push_long(self, out: &mut Record, value: i64) {
        match self {
            // Truncation is what the native struct does with out-of-range values.
            Self::Narrow => out.extend_from_slice(&(value as i32).to_ne_bytes()),
            Self::Wide => out.extend_from_slice(&value.to_ne_bytes()),
        }
    }
}

const SIZE_METRICS_LONGS: usize = 6;
const GLYPH_METRICS_LONGS: usize = 8;

/// A view over consecutive `long` fields.
struct LongFields<'a> {
    bytes: &'a [u8],
    stride: usize,
    layout: RecordLayout,
}

impl LongFields<'_> {
    fn get(&self, field: usize) -> i64 {
        let start = field * self.stride;
        let raw = &self.bytes[start..start + self.stride];
        match self.layout {
            RecordLayout::Narrow => {
                let mut buf = [0_u8; 4];
                buf.copy_from_slice(raw);
                i64::from(i32::from_ne_bytes(buf))
            }
            RecordLayout::Wide => {
                let mut buf = [0_u8; 8];
                buf.copy_from_slice(raw);
                i64::from_ne_bytes(buf)
            }
        }
    }
}

/// Face metrics at the current character size. All `long` fields are 26.6 except the
/// scales, which are 16.16.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SizeMetrics {
    /// Horizontal pixels per em.
    pub x_ppem: u16,
    /// Vertical pixels per em.
    pub y_ppem: u16,
    /// Design units to 26.6 scale, horizontal, in 16.16.
    pub x_scale: i64,
    /// Design units to 26.6 scale, vertical, in 16.16.
    pub y_scale: i64,
    /// Distance from the baseline to the top of the face.
    pub ascender: i64,
    /// Distance from the baseline to the bottom of the face; negative below the baseline.
    pub descender: i64,
    /// Baseline-to-baseline distance.
    pub height: i64,
    /// Largest horizontal advance.
    pub max_advance: i64,
}

impl SizeMetrics {
    /// Reads a size metrics record.
    pub fn decode(bytes: &[u8], layout: RecordLayout) -> Result<Self, Error> {
        let ppem = bytes
            .get(0..4)
            .ok_or(Error::malformed_record("size metrics"))?;
        let longs = layout
            .longs(bytes, layout.size_metrics_longs_offset(), SIZE_METRICS_LONGS)
            .ok_or(Error::malformed_record("size metrics"))?;
        Ok(Self {
            x_ppem: u16::from_ne_bytes([ppem[0], ppem[1]]),
            y_ppem: u16::from_ne_bytes([ppem[2], ppem[3]]),
            x_scale: longs.get(0),
            y_scale: longs.get(1),
            ascender: longs.get(2),
            descender: longs.get(3),
            height: longs.get(4),
            max_advance: longs.get(5),
        })
    }

    /// Writes this record in the given layout.
    pub fn encode(&self, layout: RecordLayout) -> Record {
        let mut out = Record::new();
        out.extend_from_slice(&self.x_ppem.to_ne_bytes());
        out.extend_from_slice(&self.y_ppem.to_ne_bytes());
        out.resize(layout.size_metrics_longs_offset(), 0);
        for value in [
            self.x_scale,
            self.y_scale,
            self.ascender,
            self.descender,
            self.height,
            self.max_advance,
        ] {
            layout.push_long(&mut out, value);
        }
        out
    }
}

/// Metrics of the glyph currently held in a rasterizer slot, in 26.6.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GlyphMetrics {
    /// Width of the glyph's bounding box.
    pub width: i64,
    /// Height of the glyph's bounding box.
    pub height: i64,
    /// Left side bearing for horizontal layout.
    pub hori_bearing_x: i64,
    /// Top side bearing for horizontal layout.
    pub hori_bearing_y: i64,
    /// Advance width for horizontal layout.
    pub hori_advance: i64,
    /// Left side bearing for vertical layout.
    pub vert_bearing_x: i64,
    /// Top side bearing for vertical layout.
    pub vert_bearing_y: i64,
    /// Advance height for vertical layout.
    pub vert_advance: i64,
}

impl GlyphMetrics {
    /// Reads a glyph metrics record.
    pub fn decode(bytes: &[u8], layout: RecordLayout) -> Result<Self, Error> {
        let longs = layout
            .longs(bytes, 0, GLYPH_METRICS_LONGS)
            .ok_or(Error::malformed_record("glyph metrics"))?;
        Ok(Self {
            width: longs.get(0),
            height: longs.get(1),
            hori_bearing_x: longs.get(2),
            hori_bearing_y: longs.get(3),
            hori_advance: longs.get(4),
            vert_bearing_x: longs.get(5),
            vert_bearing_y: longs.get(6),
            vert_advance: longs.get(7),
        })
    }

    /// Writes this record in the given layout.
    pub fn encode(&self, layout: RecordLayout) -> Record {
        let mut out = Record::new();
        for value in [
            self.width,
            self.height,
            self.hori_bearing_x,
            self.hori_bearing_y,
            self.hori_advance,
            self.vert_bearing_x,
            self.vert_bearing_y,
            self.vert_advance,
        ] {
            layout.push_long(&mut out, value);
        }
        out
    }
}
