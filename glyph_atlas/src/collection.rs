// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use hashbrown::HashMap;

use crate::backend::{Rasterizer, Shaper};
use crate::{AtlasOptions, Error, Font, FontData};

/// Key of a font in a [`FontCollection`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FontKey {
    /// Name the font was registered under.
    pub name: String,
    /// Vertical size in points.
    pub size: u32,
}

impl FontKey {
    /// Creates a key.
    pub fn new(name: impl Into<String>, size: u32) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

/// Owns the shared rasterizer and every font loaded through it.
///
/// The rasterizer is created on the first load and released by
/// [`dispose`](Self::dispose) or on drop, after all fonts.
///
/// Loading is not synchronized; callers that share a collection between threads must
/// serialize access themselves.
pub struct FontCollection<R: Rasterizer, S: Shaper> {
    fonts: HashMap<FontKey, Font<R, S>>,
    rasterizer: Option<R>,
    shaper: S,
    options: AtlasOptions,
}

impl<R: Rasterizer, S: Shaper> fmt::Debug for FontCollection<R, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontCollection")
            .field("fonts", &self.fonts.keys().collect::<Vec<_>>())
            .field("rasterizer_initialized", &self.rasterizer.is_some())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<R: Rasterizer, S: Shaper + Default> Default for FontCollection<R, S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<R: Rasterizer, S: Shaper> FontCollection<R, S> {
    /// Creates an empty collection with default [`AtlasOptions`].
    pub fn new(shaper: S) -> Self {
        Self::with_options(shaper, AtlasOptions::default())
    }

    /// Creates an empty collection that builds atlases with `options`.
    pub fn with_options(shaper: S, options: AtlasOptions) -> Self {
        Self {
            fonts: HashMap::new(),
            rasterizer: None,
            shaper,
            options,
        }
    }

    /// Options used for every load.
    pub fn options(&self) -> &AtlasOptions {
        &self.options
    }

    /// Returns true once the shared rasterizer has been created.
    pub fn is_initialized(&self) -> bool {
        self.rasterizer.is_some()
    }

    /// Loads `data` as `name` at `h_size` x `v_size` points and builds its atlas.
    ///
    /// If a font with the same name and vertical size is already loaded, it is returned
    /// and `data` is ignored.
    pub fn load_font(
        &mut self,
        name: &str,
        data: FontData,
        h_size: u32,
        v_size: u32,
    ) -> Result<&mut Font<R, S>, Error> {
        let key = FontKey::new(name, v_size);
        if self.fonts.contains_key(&key) {
            log::debug!("font {name:?} at {v_size}pt already loaded");
            return self
                .fonts
                .get_mut(&key)
                .ok_or(Error::resource_init("font lookup"));
        }
        if self.rasterizer.is_none() {
            log::debug!("initializing rasterizer");
            self.rasterizer = Some(R::init()?);
        }
        let rasterizer = self
            .rasterizer
            .as_mut()
            .ok_or(Error::resource_init("rasterizer"))?;
        let font = Font::load(
            rasterizer,
            &mut self.shaper,
            data,
            h_size,
            v_size,
            &self.options,
        )?;
        Ok(self.fonts.entry(key).or_insert(font))
    }

    /// Returns a loaded font.
    pub fn get(&self, name: &str, size: u32) -> Option<&Font<R, S>> {
        self.fonts.get(&FontKey::new(name, size))
    }

    /// Returns a loaded font for shaping.
    pub fn get_mut(&mut self, name: &str, size: u32) -> Option<&mut Font<R, S>> {
        self.fonts.get_mut(&FontKey::new(name, size))
    }

    /// Disposes and removes a font. Returns false if no such font was loaded.
    pub fn unload(&mut self, name: &str, size: u32) -> bool {
        match self.fonts.remove(&FontKey::new(name, size)) {
            Some(mut font) => {
                font.dispose();
                true
            }
            None => false,
        }
    }

    /// Number of loaded fonts.
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// Returns true if no fonts are loaded.
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Iterates over the loaded fonts.
    pub fn iter(&self) -> impl Iterator<Item = (&FontKey, &Font<R, S>)> + '_ {
        self.fonts.iter()
    }

    /// Disposes every font, then releases the rasterizer. Calling this again does
    /// nothing; a later load starts over with a new rasterizer.
    pub fn dispose(&mut self) {
        for (_, mut font) in self.fonts.drain() {
            font.dispose();
        }
        if self.rasterizer.take().is_some() {
            log::debug!("released rasterizer");
        }
    }
}

impl<R: Rasterizer, S: Shaper> Drop for FontCollection<R, S> {
    fn drop(&mut self) {
        self.dispose();
    }
}
