//! Session-owned sprite catalogs.
//!
//! A catalog is the ordered set of equally-sized square sprites one layer's
//! tile indices point into. The original frames are immutable; every rescale
//! regenerates the working frames from them, so repeated zooming never
//! compounds resampling loss. Translucent variants (hover and import
//! previews) are derived on demand and memoized.
//!
//! Decoding images from disk is the shell's job; catalogs are built from
//! frames the shell already loaded.

use std::collections::HashMap;

use image::{imageops, Rgba, RgbaImage};

use tilesmith_core::TileLayer;

/// Opacity of the hover preview overlay.
pub const HOVER_OPACITY: f32 = 0.35;
/// Opacity of the staged-import preview overlay.
pub const IMPORT_OPACITY: f32 = 0.5;

/// An ordered set of equally-sized square sprites for one layer.
#[derive(Debug, Clone, Default)]
pub struct SpriteCatalog {
    originals: Vec<RgbaImage>,
    scaled: Vec<RgbaImage>,
    frame_size: u32,
    translucent: HashMap<(u32, u16), RgbaImage>,
}

impl SpriteCatalog {
    /// Builds a catalog from uniform square frames. The frame size is taken
    /// from the first frame; callers supply frames of one size.
    pub fn new(frames: Vec<RgbaImage>) -> Self {
        let frame_size = frames.first().map_or(0, |frame| frame.width());
        SpriteCatalog {
            scaled: frames.clone(),
            originals: frames,
            frame_size,
            translucent: HashMap::new(),
        }
    }

    /// Single-color frames, for tests and placeholder art.
    pub fn solid(colors: &[[u8; 4]], size: u32) -> Self {
        let frames = colors
            .iter()
            .map(|&rgba| RgbaImage::from_pixel(size, size, Rgba(rgba)))
            .collect();
        Self::new(frames)
    }

    /// Number of frames.
    pub fn len(&self) -> u32 {
        self.originals.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.originals.is_empty()
    }

    /// Edge length of the scaled frames, in pixels.
    pub fn frame_size(&self) -> u32 {
        self.frame_size
    }

    /// The frame at `index` at the current scale.
    pub fn frame(&self, index: u32) -> Option<&RgbaImage> {
        self.scaled.get(index as usize)
    }

    /// Rescales every frame to `size` pixels square, from the originals.
    /// Memoized translucent variants are dropped (they are scale-bound).
    pub fn rescale(&mut self, size: u32) {
        if size == self.frame_size {
            return;
        }
        self.scaled = self
            .originals
            .iter()
            .map(|frame| imageops::resize(frame, size, size, imageops::FilterType::Nearest))
            .collect();
        self.frame_size = size;
        self.translucent.clear();
    }

    /// A translucent copy of a frame for overlay previews, computed once per
    /// `(index, opacity)` and cached until the next rescale.
    pub fn translucent(&mut self, index: u32, opacity: f32) -> Option<&RgbaImage> {
        if index as usize >= self.scaled.len() {
            return None;
        }
        let key = (index, opacity_key(opacity));
        if !self.translucent.contains_key(&key) {
            let faded = fade(&self.scaled[index as usize], opacity);
            self.translucent.insert(key, faded);
        }
        self.translucent.get(&key)
    }
}

/// Sprite catalogs for all three layers.
#[derive(Debug, Clone, Default)]
pub struct CatalogSet {
    pub block: SpriteCatalog,
    pub liquid: SpriteCatalog,
    pub interactable: SpriteCatalog,
}

impl CatalogSet {
    pub fn new(block: SpriteCatalog, liquid: SpriteCatalog, interactable: SpriteCatalog) -> Self {
        CatalogSet {
            block,
            liquid,
            interactable,
        }
    }

    /// The catalog backing one layer.
    pub fn layer(&self, layer: TileLayer) -> &SpriteCatalog {
        match layer {
            TileLayer::Block => &self.block,
            TileLayer::Liquid => &self.liquid,
            TileLayer::Interactable => &self.interactable,
        }
    }

    pub fn layer_mut(&mut self, layer: TileLayer) -> &mut SpriteCatalog {
        match layer {
            TileLayer::Block => &mut self.block,
            TileLayer::Liquid => &mut self.liquid,
            TileLayer::Interactable => &mut self.interactable,
        }
    }

    /// Rescales every catalog to the same frame size (after a zoom).
    pub fn rescale_all(&mut self, size: u32) {
        for layer in TileLayer::ALL {
            self.layer_mut(layer).rescale(size);
        }
    }
}

/// Opacity is keyed per-mille so float inputs stay hashable.
fn opacity_key(opacity: f32) -> u16 {
    (opacity.clamp(0.0, 1.0) * 1000.0).round() as u16
}

/// Scales every pixel's alpha by `opacity` in `0.0..=1.0`.
fn fade(frame: &RgbaImage, opacity: f32) -> RgbaImage {
    let opacity = opacity.clamp(0.0, 1.0);
    let mut out = frame.clone();
    for pixel in out.pixels_mut() {
        pixel.0[3] = (pixel.0[3] as f32 * opacity).round() as u8;
    }
    out
}
