// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loads a font file, writes its glyph atlas to `atlas.png` and draws a line of text
//! from that atlas into `line.png`.
//!
//! ```text
//! cargo run -p atlas_dump -- <font file> [text] [size in points]
//! ```

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use glyph_atlas::backend::harfrust::HarfrustShaper;
use glyph_atlas::backend::swash::SwashRasterizer;
use glyph_atlas::{Blob, FontCollection, GlyphQuad};
use image::{Rgba, RgbaImage};

const DEFAULT_TEXT: &str = "Sphinx of black quartz, judge my vow.";
const DEFAULT_SIZE: u32 = 24;
const MARGIN: u32 = 8;

#[allow(
    clippy::cast_possible_truncation,
    reason = "pixel coordinates of a single line image are small and bounds-checked"
)]
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next().map(PathBuf::from) else {
        log::error!("usage: atlas_dump <font file> [text] [size in points]");
        std::process::exit(2);
    };
    let text = args.next().unwrap_or_else(|| DEFAULT_TEXT.to_owned());
    let size = match args.next() {
        Some(size) => size.parse()?,
        None => DEFAULT_SIZE,
    };

    let data = Blob::new(Arc::new(std::fs::read(&path)?));
    let name = path.display().to_string();
    let mut fonts = FontCollection::<SwashRasterizer, HarfrustShaper>::default();
    let font = fonts.load_font(&name, data, size, size)?;

    let atlas = font.atlas();
    let side = atlas.width();
    log::info!(
        "{name} at {size}pt: {} glyphs in a {side}x{side} atlas, metrics {:?}",
        font.glyph_count(),
        font.metrics()
    );
    let atlas_image = RgbaImage::from_raw(side, side, atlas.as_bytes().to_vec())
        .ok_or("atlas buffer does not match its size")?;
    atlas_image.save("atlas.png")?;
    log::info!("wrote atlas.png");

    let metrics = font.metrics();
    let baseline = (MARGIN as i32 + metrics.ascender) as f32;
    let quads: Vec<GlyphQuad> = font
        .shape_str(&text)?
        .quads(MARGIN as f32, baseline)
        .collect();
    let right = quads.iter().fold(0.0_f32, |right, quad| right.max(quad.x1));
    let width = right.ceil() as u32 + MARGIN;
    let height = (2 * MARGIN as i32 + metrics.line_height).max(1) as u32;

    // Black text on white, reading each atlas channel as coverage.
    let atlas = font.atlas();
    let mut line = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));
    for quad in &quads {
        let src_x = (quad.uv.u0 * side as f32).round() as u32;
        let src_y = (quad.uv.v0 * side as f32).round() as u32;
        let glyph_width = (quad.x1 - quad.x0) as u32;
        let glyph_height = (quad.y1 - quad.y0) as u32;
        for dy in 0..glyph_height {
            for dx in 0..glyph_width {
                let x = quad.x0.round() as i64 + i64::from(dx);
                let y = quad.y0.round() as i64 + i64::from(dy);
                if x < 0 || y < 0 || x >= i64::from(width) || y >= i64::from(height) {
                    continue;
                }
                let Some([r, g, b, _]) = atlas.pixel(src_x + dx, src_y + dy) else {
                    continue;
                };
                let dst = line.get_pixel_mut(x as u32, y as u32);
                for (channel, coverage) in dst.0.iter_mut().zip([r, g, b]) {
                    *channel = channel.saturating_sub(coverage);
                }
            }
        }
    }
    line.save("line.png")?;
    log::info!("wrote line.png ({} glyphs)", quads.len());
    Ok(())
}
