// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shelf packing of glyph footprints into a square atlas.
//!
//! Footprints are placed left to right in the order given. When the next footprint
//! would cross the right edge, the cursor returns to the left edge and moves down by the
//! tallest footprint of the finished row. Input order is never changed, so the same
//! order always produces the same layout.

use crate::{AtlasSlot, Error};

/// Width and height of a glyph with `padding` added on every side.
#[inline]
pub fn footprint(width: u32, height: u32, padding: u32) -> (u32, u32) {
    (width + 2 * padding, height + 2 * padding)
}

/// Incremental shelf packer for one candidate side length.
#[derive(Clone, Debug)]
pub struct ShelfPacker {
    side: u32,
    x: u32,
    y: u32,
    row_height: u32,
}

impl ShelfPacker {
    /// Creates a packer for a `side` x `side` atlas.
    pub fn new(side: u32) -> Self {
        Self {
            side,
            x: 0,
            y: 0,
            row_height: 0,
        }
    }

    /// Side length this packer places into.
    pub fn side(&self) -> u32 {
        self.side
    }

    /// Places a footprint, returning `None` if it does not fit.
    pub fn place(&mut self, width: u32, height: u32) -> Option<AtlasSlot> {
        if self.x.saturating_add(width) > self.side {
            self.x = 0;
            self.y = self.y.saturating_add(self.row_height);
            self.row_height = 0;
        }
        if self.x.saturating_add(width) > self.side || self.y.saturating_add(height) > self.side {
            return None;
        }
        let slot = AtlasSlot {
            x: self.x,
            y: self.y,
            width,
            height,
        };
        self.x += width;
        self.row_height = self.row_height.max(height);
        Some(slot)
    }
}

/// Places every footprint in order, or returns `None` if they do not all fit.
pub fn pack(footprints: &[(u32, u32)], side: u32) -> Option<Vec<AtlasSlot>> {
    let mut packer = ShelfPacker::new(side);
    footprints
        .iter()
        .map(|&(width, height)| packer.place(width, height))
        .collect()
}

fn fits(footprints: &[(u32, u32)], side: u32) -> bool {
    let mut packer = ShelfPacker::new(side);
    footprints
        .iter()
        .all(|&(width, height)| packer.place(width, height).is_some())
}

/// Finds the smallest side, starting at `initial` and doubling, that fits every
/// footprint.
///
/// Fails with [`ErrorKind::AtlasOverflow`](crate::ErrorKind::AtlasOverflow) once
/// doubling would pass `max`.
pub fn atlas_side(footprints: &[(u32, u32)], initial: u32, max: u32) -> Result<u32, Error> {
    let mut side = initial.max(1);
    loop {
        if fits(footprints, side) {
            log::debug!("{} glyphs fit a {side}x{side} atlas", footprints.len());
            return Ok(side);
        }
        side = side
            .checked_mul(2)
            .filter(|&next| next <= max)
            .ok_or_else(Error::atlas_overflow)?;
    }
}
