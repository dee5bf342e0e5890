// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::fixed::to_pixels;
use crate::native::{RecordLayout, SizeMetrics};
use crate::Error;

/// Vertical metrics of a font instance, in whole pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FontMetrics {
    /// Distance from the baseline to the top of the face.
    pub ascender: i32,
    /// Distance from the baseline to the bottom of the face; negative below the baseline.
    pub descender: i32,
    /// Baseline-to-baseline distance.
    pub line_height: i32,
}

impl FontMetrics {
    /// Reads the metrics from a face's size metrics record.
    ///
    /// The record's 26.6 values are truncated to whole pixels.
    pub fn extract(record: &[u8], layout: RecordLayout) -> Result<Self, Error> {
        let size = SizeMetrics::decode(record, layout)?;
        Ok(Self::from(size))
    }
}

impl From<SizeMetrics> for FontMetrics {
    fn from(size: SizeMetrics) -> Self {
        Self {
            ascender: to_pixels(size.ascender),
            descender: to_pixels(size.descender),
            line_height: to_pixels(size.height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_are_truncated_pixels_in_either_layout() {
        let size = SizeMetrics {
            ascender: 14 * 64 + 40,
            descender: -(3 * 64 + 10),
            height: 19 * 64,
            ..SizeMetrics::default()
        };
        for layout in [RecordLayout::Narrow, RecordLayout::Wide] {
            let metrics = FontMetrics::extract(&size.encode(layout), layout).unwrap();
            assert_eq!(
                metrics,
                FontMetrics {
                    ascender: 14,
                    descender: -3,
                    line_height: 19,
                },
                "{layout:?}"
            );
        }
    }

    #[test]
    fn mismatched_layout_reads_different_values() {
        let size = SizeMetrics {
            ascender: 960,
            ..SizeMetrics::default()
        };
        let record = size.encode(RecordLayout::Wide);
        let misread = FontMetrics::extract(&record, RecordLayout::Narrow).unwrap();
        assert_ne!(misread.ascender, 15, "layouts are not interchangeable");
    }
}
