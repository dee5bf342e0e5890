// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::utils::{MockFont, load, utf16};

#[test]
fn empty_text_shapes_to_nothing() {
    let mut font = load(&MockFont::with_chars("A"), 16);
    assert_eq!(font.shape_str("").unwrap().len(), 0);
    assert_eq!(font.shape(&[]).unwrap().len(), 0);
}

#[test]
fn runs_do_not_leak_into_each_other() {
    let mut font = load(&MockFont::with_chars("AB"), 16);
    let first: Vec<u32> = font.shape_str("A").unwrap().map(|g| g.glyph.index).collect();
    let second: Vec<u32> = font.shape_str("B").unwrap().map(|g| g.glyph.index).collect();
    assert_eq!(first, [1]);
    assert_eq!(second, [2], "previous text is cleared before shaping");
}

#[test]
fn advances_are_in_pixels() {
    let mut font = load(&MockFont::with_chars("AB"), 16);
    let advances: Vec<f32> = font.shape_str("AB").unwrap().map(|g| g.x_advance).collect();
    assert_eq!(advances, [5.0, 6.0], "glyph width plus one pixel");
}

#[test]
fn kerning_is_requested() {
    let mut font = load(&MockFont::with_chars("AV"), 16);
    let advances: Vec<f32> = font.shape_str("AV").unwrap().map(|g| g.x_advance).collect();
    assert_eq!(advances, [4.0, 6.0], "A is pulled toward V");
}

#[test]
fn utf16_clusters_count_code_units() {
    let mut font = load(&MockFont::with_chars("ab"), 16);
    let glyphs: Vec<_> = font
        .shape(&utf16("a\u{1F600}b"))
        .unwrap()
        .map(|g| (g.glyph.index, g.cluster))
        .collect();
    assert_eq!(glyphs, [(1, 0), (0, 1), (2, 3)]);
}

#[test]
fn unpaired_surrogates_become_unknown_glyphs() {
    let mut font = load(&MockFont::with_chars("a"), 16);
    let indices: Vec<u32> = font
        .shape(&[u16::from(b'a'), 0xD800, u16::from(b'a')])
        .unwrap()
        .map(|g| g.glyph.index)
        .collect();
    assert_eq!(indices, [1, 0, 1]);
}

#[test]
fn invalid_codepoints_become_unknown_glyphs() {
    let mut font = load(&MockFont::with_chars("a"), 16);
    let glyphs: Vec<_> = font
        .shape_codepoints(&[0x61, 0x11_0000, 0x61])
        .unwrap()
        .map(|g| (g.glyph.index, g.cluster))
        .collect();
    assert_eq!(glyphs, [(1, 0), (0, 1), (1, 2)]);
}

#[test]
fn space_shapes_to_the_space_glyph() {
    let mut font = load(&MockFont::with_chars("A "), 16);
    let space = *font.space_glyph();
    let shaped: Vec<_> = font.shape_str(" ").unwrap().map(|g| *g.glyph).collect();
    assert_eq!(shaped, [space]);
}

#[test]
fn quads_follow_the_pen() {
    let mut font = load(&MockFont::with_chars("AB"), 16);
    let a = *font.glyph_by_index(1);
    let b = *font.glyph_by_index(2);
    let quads: Vec<_> = font.shape_str("AB").unwrap().quads(10.0, 30.0).collect();
    assert_eq!(quads.len(), 2);

    assert_eq!(quads[0].index, 1);
    assert_eq!(quads[0].x0, 11.0, "left bearing of one pixel");
    assert_eq!(quads[0].y0, 30.0 - a.height as f32, "glyph sits on the baseline");
    assert_eq!(quads[0].x1 - quads[0].x0, a.width as f32);
    assert_eq!(quads[0].uv, a.uv);

    assert_eq!(quads[1].index, 2);
    assert_eq!(quads[1].x0, 10.0 + 5.0 + 1.0, "after the first advance");
    assert_eq!(quads[1].y1, 30.0, "bottom on the baseline");
    assert_eq!(quads[1].uv, b.uv);
}
