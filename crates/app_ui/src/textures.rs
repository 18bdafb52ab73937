//! Decoded-asset to egui texture bridge
//!
//! Preload events arrive as raw RGBA8 buffers indexed by gallery slot;
//! this store uploads them through egui's texture manager and hands out
//! handles by slot index. Slots without a texture yet paint as flat
//! placeholder rects.

use egui::{ColorImage, Context, TextureHandle, TextureOptions};

pub struct TextureStore {
    slots: Vec<Option<TextureHandle>>,
    loaded: usize,
}

impl TextureStore {
    pub fn new(slot_count: usize) -> Self {
        Self {
            slots: (0..slot_count).map(|_| None).collect(),
            loaded: 0,
        }
    }

    /// Upload one decoded slot. Out-of-range indices are dropped (the
    /// config may have shrunk since the preloader was spawned).
    pub fn install(&mut self, ctx: &Context, index: usize, width: u32, height: u32, rgba: &[u8]) {
        if index >= self.slots.len() {
            tracing::warn!(index, slots = self.slots.len(), "texture slot out of range");
            return;
        }
        if rgba.len() != (width as usize) * (height as usize) * 4 {
            tracing::warn!(index, "texture buffer size mismatch, slot skipped");
            return;
        }
        let image = ColorImage::from_rgba_unmultiplied([width as usize, height as usize], rgba);
        let handle = ctx.load_texture(format!("asset-{index}"), image, TextureOptions::LINEAR);
        if self.slots[index].is_none() {
            self.loaded += 1;
        }
        self.slots[index] = Some(handle);
    }

    pub fn get(&self, index: usize) -> Option<&TextureHandle> {
        self.slots.get(index).and_then(|slot| slot.as_ref())
    }

    pub fn loaded(&self) -> usize {
        self.loaded
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}
